use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct SaveAnalysisRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "filename must be between 1 and 255 characters"
    ))]
    pub filename: String,
    #[schema(value_type = Object)]
    pub analysis: serde_json::Value,
    #[serde(default)]
    pub consumed: bool,
}

#[derive(Debug, Serialize, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct GetHistoryParams {
    /// `day`, `week`, `month` or `all`.
    #[schema(example = "week")]
    pub period: Option<String>,
    pub consumed: Option<bool>,
}
