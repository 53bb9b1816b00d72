use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::{debug, error};

use crate::domain::{
    authentication::{entities::JwtClaim, ports::IdentityVerifier, value_objects::Identity},
    common::entities::app_errors::CoreError,
};

/// HS256 bearer tokens signed with a shared secret. The `sub` claim is the
/// identity; `exp` is checked only when the token carries one.
#[derive(Clone)]
pub struct JwtIdentityVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Mints a token for `subject`, valid for `ttl` when given.
    pub fn issue(&self, subject: &str, ttl: Option<Duration>) -> Result<String, CoreError> {
        let now = Utc::now();
        let claims = JwtClaim::new(
            subject.to_string(),
            now.timestamp(),
            ttl.map(|ttl| (now + ttl).timestamp()),
        );

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            error!("Failed to sign token: {}", e);
            CoreError::Invalid(format!("cannot sign token: {e}"))
        })
    }
}

impl IdentityVerifier for JwtIdentityVerifier {
    fn verify(&self, token: &str) -> Result<Identity, CoreError> {
        let data = decode::<JwtClaim>(token, &self.decoding_key, &self.validation).map_err(|e| {
            debug!(error = %e, "rejected bearer token");
            CoreError::Unauthorized
        })?;

        let subject = data.claims.sub.trim();
        if subject.is_empty() {
            return Err(CoreError::Unauthorized);
        }

        Ok(Identity::new(subject))
    }
}
