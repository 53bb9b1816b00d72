use std::sync::Arc;

use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{info, warn};

use crate::domain::{
    enrichment::{entities::EnrichmentReport, ports::ProductLookup},
    food_analysis::entities::{FoodAnalysisRecord, UpcCode},
};

/// Minimum `upc_confidence` (inclusive) for a product lookup.
pub const ENRICHMENT_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// The UPC to look up, if the record qualifies: a code is present and the
/// model is at least [`ENRICHMENT_CONFIDENCE_THRESHOLD`] sure of it.
pub fn enrichment_target(record: &FoodAnalysisRecord) -> Option<&UpcCode> {
    let confidence = record.upc_confidence?;
    let upc = record.upc_code.as_ref()?;

    (confidence >= ENRICHMENT_CONFIDENCE_THRESHOLD && !upc.as_str().is_empty()).then_some(upc)
}

/// Looks the code up and logs what came back. Never fails.
pub async fn enrich<P: ProductLookup>(lookup: &P, upc: UpcCode) -> EnrichmentReport {
    info!(upc = %upc, "looking up product");

    match lookup.lookup_upc(upc.clone()).await {
        Ok(Some(product)) => {
            info!(
                upc = %upc,
                fdc_id = product.fdc_id,
                description = %product.description,
                product_url = product.product_url.as_deref().unwrap_or_default(),
                "product match found"
            );
            if product.nutrients.is_empty() {
                info!(upc = %upc, "no nutrition information available");
            }
            for nutrient in &product.nutrients {
                info!(upc = %upc, nutrient = %nutrient.name, amount = %nutrient.amount, "product nutrient");
            }
            EnrichmentReport::Matched(product)
        }
        Ok(None) => {
            info!(upc = %upc, "no product found for UPC");
            EnrichmentReport::NoMatch
        }
        Err(e) => {
            warn!(upc = %upc, error = %e, "product lookup failed");
            EnrichmentReport::Failed(e.to_string())
        }
    }
}

/// Starts a detached lookup when the record qualifies.
///
/// The caller is not expected to await the handle; it is returned so the
/// outcome can be observed in tests. Without a Tokio runtime the lookup is
/// skipped.
pub fn maybe_enrich<P>(
    lookup: Arc<P>,
    record: &FoodAnalysisRecord,
) -> Option<JoinHandle<EnrichmentReport>>
where
    P: ProductLookup + 'static,
{
    let upc = enrichment_target(record)?.clone();

    let Ok(handle) = Handle::try_current() else {
        warn!(upc = %upc, "no async runtime available, skipping product lookup");
        return None;
    };

    Some(handle.spawn(async move { enrich(lookup.as_ref(), upc).await }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        common::entities::app_errors::CoreError,
        enrichment::entities::{ProductMatch, ProductNutrient},
        test_support::FakeProductLookup as FakeLookup,
    };

    fn record(upc: Option<&str>, confidence: Option<f64>) -> FoodAnalysisRecord {
        let mut record: FoodAnalysisRecord = serde_json::from_str("{}").unwrap();
        record.upc_code = upc.and_then(UpcCode::parse);
        record.upc_confidence = confidence;
        record
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert!(enrichment_target(&record(Some("012345678905"), Some(0.7))).is_some());
        assert!(enrichment_target(&record(Some("012345678905"), Some(0.6999))).is_none());
        assert!(enrichment_target(&record(Some("012345678905"), Some(1.0))).is_some());
    }

    #[test]
    fn test_low_confidence_does_not_fire() {
        assert!(enrichment_target(&record(Some("012345678905"), Some(0.5))).is_none());
    }

    #[test]
    fn test_requires_both_code_and_confidence() {
        assert!(enrichment_target(&record(None, Some(0.95))).is_none());
        assert!(enrichment_target(&record(Some("012345678905"), None)).is_none());
        assert!(enrichment_target(&record(Some("unknown"), Some(0.95))).is_none());
    }

    #[tokio::test]
    async fn test_maybe_enrich_spawns_lookup_for_confident_record() {
        let product = ProductMatch {
            fdc_id: Some(1750340),
            description: "Apples, fuji, with skin, raw".to_string(),
            product_url: None,
            nutrients: vec![ProductNutrient {
                name: "Energy".to_string(),
                amount: "63 KCAL".to_string(),
            }],
        };
        let lookup = Arc::new(FakeLookup::returning(Ok(Some(product.clone()))));

        let handle = maybe_enrich(lookup.clone(), &record(Some("012345678905"), Some(0.7)))
            .expect("lookup should fire");

        assert_eq!(handle.await.unwrap(), EnrichmentReport::Matched(product));
        assert_eq!(*lookup.calls.lock().unwrap(), vec!["012345678905".to_string()]);
    }

    #[tokio::test]
    async fn test_maybe_enrich_skips_unconfident_record() {
        let lookup = Arc::new(FakeLookup::returning(Ok(None)));

        let handle = maybe_enrich(lookup.clone(), &record(Some("012345678905"), Some(0.5)));

        assert!(handle.is_none());
        assert!(lookup.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_enrich_reports_no_match_and_failure() {
        let upc = UpcCode::parse("012345678905").unwrap();

        let empty = FakeLookup::returning(Ok(None));
        assert_eq!(enrich(&empty, upc.clone()).await, EnrichmentReport::NoMatch);

        let failing = FakeLookup::returning(Err(CoreError::EnrichmentFailure(
            "status 500".to_string(),
        )));
        assert_eq!(
            enrich(&failing, upc).await,
            EnrichmentReport::Failed("Enrichment failed: status 500".to_string())
        );
    }

    #[test]
    fn test_maybe_enrich_without_runtime_is_a_no_op() {
        let lookup = Arc::new(FakeLookup::returning(Ok(None)));

        let handle = maybe_enrich(lookup.clone(), &record(Some("012345678905"), Some(0.9)));

        assert!(handle.is_none());
        assert!(lookup.calls.lock().unwrap().is_empty());
    }
}
