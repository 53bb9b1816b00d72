use std::future::Future;

use crate::domain::{
    authentication::value_objects::{AuthorizeRequestInput, AuthorizeRequestOutput, Identity},
    common::entities::app_errors::CoreError,
};

/// Turns a bearer credential into a verified identity.
#[cfg_attr(test, mockall::automock)]
pub trait IdentityVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<Identity, CoreError>;
}

pub trait AuthService: Send + Sync {
    fn authorize_request(
        &self,
        input: AuthorizeRequestInput,
    ) -> impl Future<Output = Result<AuthorizeRequestOutput, CoreError>> + Send;
}
