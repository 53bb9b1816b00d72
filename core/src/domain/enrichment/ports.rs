use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError, enrichment::entities::ProductMatch,
    food_analysis::entities::UpcCode,
};

/// Product database lookup by barcode.
///
/// `Ok(None)` means the database has no match. Missing credentials and
/// non-success responses are `Err(CoreError::EnrichmentFailure)`.
pub trait ProductLookup: Send + Sync {
    fn lookup_upc(
        &self,
        upc: UpcCode,
    ) -> impl Future<Output = Result<Option<ProductMatch>, CoreError>> + Send;
}
