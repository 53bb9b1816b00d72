use serde::{Deserialize, Serialize};

/// Claims carried by a bearer token. `sub` is the identity string handed to
/// the storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaim {
    pub sub: String,
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl JwtClaim {
    pub fn new(sub: String, iat: i64, exp: Option<i64>) -> Self {
        Self { sub, iat, exp }
    }
}
