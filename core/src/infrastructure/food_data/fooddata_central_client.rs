use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, instrument, warn};

use crate::domain::{
    common::entities::app_errors::CoreError,
    enrichment::{
        entities::{ProductMatch, ProductNutrient},
        ports::ProductLookup,
    },
    food_analysis::entities::UpcCode,
};

const FDC_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";
const FDC_DATA_TYPES: [&str; 3] = ["Foundation", "SR Legacy", "Survey (FNDDS)"];

/// USDA FoodData Central search by UPC.
#[derive(Debug, Clone)]
pub struct FoodDataCentralClient {
    api_key: Option<String>,
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<SearchFood>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchFood {
    fdc_id: Option<i64>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    food_nutrients: Vec<SearchNutrient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchNutrient {
    nutrient_name: Option<String>,
    value: Option<serde_json::Number>,
    #[serde(default)]
    unit_name: String,
}

impl SearchNutrient {
    /// Nutrients without a name or with a zero value are dropped.
    fn into_product_nutrient(self) -> Option<ProductNutrient> {
        let name = self.nutrient_name.filter(|n| !n.trim().is_empty())?;
        let value = self.value.filter(|v| v.as_f64() != Some(0.0))?;

        Some(ProductNutrient {
            name,
            amount: format!("{} {}", value, self.unit_name).trim_end().to_string(),
        })
    }
}

pub fn product_url(fdc_id: i64) -> String {
    format!("https://fdc.nal.usda.gov/fdc-app.html#/food-details/{fdc_id}/nutrients")
}

impl SearchResponse {
    fn best_match(self) -> Option<ProductMatch> {
        let food = self.foods.into_iter().next()?;

        Some(ProductMatch {
            fdc_id: food.fdc_id,
            description: food.description,
            product_url: food.fdc_id.map(product_url),
            nutrients: food
                .food_nutrients
                .into_iter()
                .filter_map(SearchNutrient::into_product_nutrient)
                .collect(),
        })
    }
}

impl FoodDataCentralClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, FDC_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: Option<String>, base_url: String) -> Self {
        let api_key = api_key.filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            warn!("FOODDATA_API_KEY is not set, product lookups are disabled");
        }

        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }
}

impl ProductLookup for FoodDataCentralClient {
    #[instrument(skip(self), fields(upc = %upc))]
    async fn lookup_upc(&self, upc: UpcCode) -> Result<Option<ProductMatch>, CoreError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(CoreError::EnrichmentFailure(
                "FoodData Central API key not configured".to_string(),
            ));
        };

        let url = format!("{}/foods/search", self.base_url);
        let mut query = vec![
            ("api_key", api_key),
            ("query", upc.as_str()),
            ("pageSize", "1"),
        ];
        query.extend(FDC_DATA_TYPES.iter().map(|data_type| ("dataType", *data_type)));

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                error!("FoodData Central request failed: {}", e);
                CoreError::EnrichmentFailure(format!("request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("FoodData Central error: {} - {}", status, body);
            return Err(CoreError::EnrichmentFailure(format!("status {status}")));
        }

        let search: SearchResponse = response.json().await.map_err(|e| {
            let e = e.without_url();
            error!("Failed to parse FoodData Central response: {}", e);
            CoreError::EnrichmentFailure(format!("unreadable response: {}", e))
        })?;

        debug!(hits = search.foods.len(), "FoodData Central search finished");
        Ok(search.best_match())
    }
}
