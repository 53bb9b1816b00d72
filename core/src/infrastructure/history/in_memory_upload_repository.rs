use tokio::sync::RwLock;

use crate::domain::{
    common::entities::app_errors::CoreError,
    history::{entities::UploadRecord, ports::UploadRepository, value_objects::GetHistoryFilter},
};

/// Process-local history. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryUploadRepository {
    records: RwLock<Vec<UploadRecord>>,
}

impl InMemoryUploadRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UploadRepository for InMemoryUploadRepository {
    async fn save(&self, record: UploadRecord) -> Result<UploadRecord, CoreError> {
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn list_by_identity(
        &self,
        identity: String,
        filter: GetHistoryFilter,
    ) -> Result<Vec<UploadRecord>, CoreError> {
        let mut records: Vec<UploadRecord> = self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.identity == identity)
            .filter(|r| filter.since.is_none_or(|since| r.timestamp >= since))
            .filter(|r| filter.consumed.is_none_or(|consumed| r.consumed == consumed))
            .cloned()
            .collect();

        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| b.id.cmp(&a.id)));
        Ok(records)
    }
}
