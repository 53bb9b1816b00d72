use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::generate_timestamp;

/// One analysis a user kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UploadRecord {
    pub id: Uuid,
    pub identity: String,
    pub filename: String,
    #[schema(value_type = Object)]
    pub analysis: serde_json::Value,
    pub consumed: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct UploadRecordConfig {
    pub identity: String,
    pub filename: String,
    pub analysis: serde_json::Value,
    pub consumed: bool,
}

impl UploadRecord {
    pub fn new(config: UploadRecordConfig) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            identity: config.identity,
            filename: config.filename,
            analysis: config.analysis,
            consumed: config.consumed,
            timestamp: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_is_v7_and_shares_the_record_timestamp() {
        let record = UploadRecord::new(UploadRecordConfig {
            identity: "alice".to_string(),
            filename: "lunch.jpg".to_string(),
            analysis: serde_json::json!({ "food_name": "Salad" }),
            consumed: true,
        });

        assert_eq!(record.id.get_version_num(), 7);
        let (seconds, _) = record.id.get_timestamp().unwrap().to_unix();
        assert_eq!(seconds as i64, record.timestamp.timestamp());
    }
}
