use tracing::debug;

use crate::domain::{
    authentication::{
        ports::{AuthService, IdentityVerifier},
        value_objects::{AuthorizeRequestInput, AuthorizeRequestOutput},
    },
    common::{entities::app_errors::CoreError, services::Service},
    enrichment::ports::ProductLookup,
    food_analysis::ports::LLMClient,
    history::ports::UploadRepository,
    pronunciation::ports::PronunciationSynthesizer,
};

impl<LLM, PL, SY, UR, IV> AuthService for Service<LLM, PL, SY, UR, IV>
where
    LLM: LLMClient,
    PL: ProductLookup,
    SY: PronunciationSynthesizer,
    UR: UploadRepository,
    IV: IdentityVerifier,
{
    async fn authorize_request(
        &self,
        input: AuthorizeRequestInput,
    ) -> Result<AuthorizeRequestOutput, CoreError> {
        let identity = self.identity_verifier.verify(&input.token)?;
        debug!(subject = %identity.subject, "request authorized");

        Ok(AuthorizeRequestOutput { identity })
    }
}
