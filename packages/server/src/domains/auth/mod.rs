//! Auth domain - verifies identity provider access tokens
//!
//! Responsibilities:
//! - Fetching and caching the provider's signing keys (JWKS)
//! - RS256 signature, expiry, issuer and audience checks
//! - Reading role claims out of a verified payload

pub mod identity;
pub mod jwks;
pub mod jwt;

pub use identity::IdentityPayload;
pub use jwks::{JwksCache, JwksError};
pub use jwt::{JwtError, JwtVerifier};
