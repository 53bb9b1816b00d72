use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Best product-database match for a UPC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductMatch {
    pub fdc_id: Option<i64>,
    pub description: String,
    pub product_url: Option<String>,
    pub nutrients: Vec<ProductNutrient>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductNutrient {
    pub name: String,
    /// Value with unit, e.g. `"52 kcal"`.
    pub amount: String,
}

/// What an enrichment attempt produced. Only ever logged.
#[derive(Debug, Clone, PartialEq)]
pub enum EnrichmentReport {
    Matched(ProductMatch),
    NoMatch,
    Failed(String),
}
