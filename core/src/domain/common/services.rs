use std::sync::Arc;

use crate::domain::image::value_objects::CompressionSettings;

/// The analysis service. Every collaborator is built once at startup and
/// shared read-only between requests.
pub struct Service<LLM, PL, SY, UR, IV> {
    pub llm_client: Arc<LLM>,
    pub product_lookup: Arc<PL>,
    pub synthesizer: Arc<SY>,
    pub upload_repository: Arc<UR>,
    pub identity_verifier: Arc<IV>,
    pub compression: CompressionSettings,
}

impl<LLM, PL, SY, UR, IV> Service<LLM, PL, SY, UR, IV> {
    pub fn new(
        llm_client: Arc<LLM>,
        product_lookup: Arc<PL>,
        synthesizer: Arc<SY>,
        upload_repository: Arc<UR>,
        identity_verifier: Arc<IV>,
        compression: CompressionSettings,
    ) -> Self {
        Self {
            llm_client,
            product_lookup,
            synthesizer,
            upload_repository,
            identity_verifier,
            compression,
        }
    }
}

impl<LLM, PL, SY, UR, IV> Clone for Service<LLM, PL, SY, UR, IV> {
    fn clone(&self) -> Self {
        Self {
            llm_client: self.llm_client.clone(),
            product_lookup: self.product_lookup.clone(),
            synthesizer: self.synthesizer.clone(),
            upload_repository: self.upload_repository.clone(),
            identity_verifier: self.identity_verifier.clone(),
            compression: self.compression,
        }
    }
}
