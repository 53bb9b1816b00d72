pub mod jwt_identity_verifier;

pub use jwt_identity_verifier::JwtIdentityVerifier;
