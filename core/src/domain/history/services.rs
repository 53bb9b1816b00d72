use tracing::info;

use crate::domain::{
    authentication::{ports::IdentityVerifier, value_objects::Identity},
    common::{entities::app_errors::CoreError, services::Service},
    enrichment::ports::ProductLookup,
    food_analysis::ports::LLMClient,
    history::{
        entities::{UploadRecord, UploadRecordConfig},
        ports::{HistoryService, UploadRepository},
        value_objects::{GetHistoryFilter, GetHistoryInput, SaveAnalysisInput},
    },
    pronunciation::ports::PronunciationSynthesizer,
};

impl<LLM, PL, SY, UR, IV> HistoryService for Service<LLM, PL, SY, UR, IV>
where
    LLM: LLMClient,
    PL: ProductLookup,
    SY: PronunciationSynthesizer,
    UR: UploadRepository,
    IV: IdentityVerifier,
{
    async fn save_analysis(
        &self,
        identity: Identity,
        input: SaveAnalysisInput,
    ) -> Result<UploadRecord, CoreError> {
        let filename = input.filename.trim();
        if filename.is_empty() {
            return Err(CoreError::Invalid("filename must not be empty".to_string()));
        }

        let record = UploadRecord::new(UploadRecordConfig {
            identity: identity.subject,
            filename: filename.to_string(),
            analysis: input.analysis,
            consumed: input.consumed,
        });

        let record = self.upload_repository.save(record).await?;
        info!(id = %record.id, filename = %record.filename, consumed = record.consumed, "analysis saved");

        Ok(record)
    }

    async fn get_history(
        &self,
        identity: Identity,
        input: GetHistoryInput,
    ) -> Result<Vec<UploadRecord>, CoreError> {
        let filter = GetHistoryFilter {
            since: input.period.since(chrono::Utc::now()),
            consumed: input.consumed,
        };

        self.upload_repository
            .list_by_identity(identity.subject, filter)
            .await
    }
}
