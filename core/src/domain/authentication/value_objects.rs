use serde::{Deserialize, Serialize};

/// A verified caller. The analysis pipeline never authenticates; it trusts
/// whatever identity the HTTP layer attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub subject: String,
}

impl Identity {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthorizeRequestInput {
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct AuthorizeRequestOutput {
    pub identity: Identity,
}
