use std::sync::Arc;

use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde_json::{Map, Value};

use super::identity::IdentityPayload;
use super::jwks::{JwksCache, JwksError};
use crate::config::AuthConfig;

#[derive(thiserror::Error, Debug)]
pub enum JwtError {
    #[error("failed to parse JWT header: {0}")]
    InvalidJwtHeader(jsonwebtoken::errors::Error),
    #[error("token algorithm {0:?} is not allowed")]
    AlgorithmNotAllowed(Algorithm),
    #[error(transparent)]
    Jwks(#[from] JwksError),
    #[error("failed to decode JWK: {0}")]
    InvalidDecodingKey(jsonwebtoken::errors::Error),
    #[error("failed to decode token: {0}")]
    FailedToDecodeToken(jsonwebtoken::errors::Error),
}

/// Verifies RS256 access tokens issued by the identity provider
pub struct JwtVerifier {
    keys: Arc<JwksCache>,
    issuer: String,
    audience: String,
}

impl JwtVerifier {
    pub fn new(keys: Arc<JwksCache>, issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            keys,
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }

    /// Verifier backed by the provider's remote JWKS endpoint
    pub fn from_config(config: &AuthConfig) -> Self {
        let keys = JwksCache::remote(
            config.jwks_uri(),
            config.jwks_requests_per_minute,
            config.jwks_cache_ttl,
        );
        Self::new(Arc::new(keys), config.issuer(), config.audience.clone())
    }

    /// Verify signature, expiry, issuer and audience, returning the claims
    pub async fn verify(&self, token: &str) -> Result<IdentityPayload, JwtError> {
        let header = decode_header(token).map_err(JwtError::InvalidJwtHeader)?;
        if header.alg != Algorithm::RS256 {
            return Err(JwtError::AlgorithmNotAllowed(header.alg));
        }

        let jwk = self.keys.signing_key(header.kid.as_deref()).await?;
        let key = DecodingKey::from_jwk(&jwk).map_err(JwtError::InvalidDecodingKey)?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);

        decode::<Map<String, Value>>(token, &key, &validation)
            .map(|data| IdentityPayload::new(data.claims))
            .map_err(JwtError::FailedToDecodeToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ROLE_NAMESPACE;
    use crate::kernel::test_dependencies::{TestTokenIssuer, TEST_AUDIENCE, TEST_ISSUER};
    use jsonwebtoken::errors::ErrorKind;
    use serde_json::json;

    fn verifier() -> JwtVerifier {
        TestTokenIssuer::verifier()
    }

    fn decode_error_kind(err: JwtError) -> ErrorKind {
        match err {
            JwtError::FailedToDecodeToken(e) => e.into_kind(),
            other => panic!("expected decode failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_verify_valid_token() {
        let issuer = TestTokenIssuer::new();
        let token = issuer.token_with_roles("auth0|reader", &["admin"]);

        let payload = verifier().verify(&token).await.unwrap();

        assert_eq!(payload.subject(), Some("auth0|reader"));
        assert!(payload.has_role(DEFAULT_ROLE_NAMESPACE, "admin"));
    }

    #[tokio::test]
    async fn test_invalid_token() {
        let result = verifier().verify("invalid_token").await;
        assert!(matches!(result, Err(JwtError::InvalidJwtHeader(_))));
    }

    #[tokio::test]
    async fn test_expired_token() {
        let issuer = TestTokenIssuer::new();
        let now = chrono::Utc::now().timestamp();
        let token = issuer.sign(json!({
            "sub": "auth0|late",
            "iss": TEST_ISSUER,
            "aud": TEST_AUDIENCE,
            "iat": now - 7200,
            "exp": now - 3600,
        }));

        let err = verifier().verify(&token).await.unwrap_err();
        assert!(matches!(decode_error_kind(err), ErrorKind::ExpiredSignature));
    }

    #[tokio::test]
    async fn test_wrong_audience() {
        let issuer = TestTokenIssuer::new();
        let now = chrono::Utc::now().timestamp();
        let token = issuer.sign(json!({
            "sub": "auth0|other-api",
            "iss": TEST_ISSUER,
            "aud": "https://some-other-api",
            "exp": now + 3600,
        }));

        let err = verifier().verify(&token).await.unwrap_err();
        assert!(matches!(decode_error_kind(err), ErrorKind::InvalidAudience));
    }

    #[tokio::test]
    async fn test_audience_list_containing_api_is_accepted() {
        let issuer = TestTokenIssuer::new();
        let now = chrono::Utc::now().timestamp();
        let token = issuer.sign(json!({
            "sub": "auth0|multi",
            "iss": TEST_ISSUER,
            "aud": [TEST_AUDIENCE, "https://tenant.auth0.com/userinfo"],
            "exp": now + 3600,
        }));

        assert!(verifier().verify(&token).await.is_ok());
    }

    #[tokio::test]
    async fn test_wrong_issuer() {
        let issuer = TestTokenIssuer::new();
        let now = chrono::Utc::now().timestamp();
        let token = issuer.sign(json!({
            "sub": "auth0|elsewhere",
            "iss": "https://evil.example/",
            "aud": TEST_AUDIENCE,
            "exp": now + 3600,
        }));

        let err = verifier().verify(&token).await.unwrap_err();
        assert!(matches!(decode_error_kind(err), ErrorKind::InvalidIssuer));
    }

    #[tokio::test]
    async fn test_missing_audience_rejected() {
        let issuer = TestTokenIssuer::new();
        let now = chrono::Utc::now().timestamp();
        let token = issuer.sign(json!({
            "sub": "auth0|noaud",
            "iss": TEST_ISSUER,
            "exp": now + 3600,
            DEFAULT_ROLE_NAMESPACE: ["admin"],
        }));

        let err = verifier().verify(&token).await.unwrap_err();
        assert!(matches!(
            decode_error_kind(err),
            ErrorKind::MissingRequiredClaim(ref claim) if claim == "aud"
        ));
    }

    #[tokio::test]
    async fn test_missing_issuer_rejected() {
        let issuer = TestTokenIssuer::new();
        let now = chrono::Utc::now().timestamp();
        let token = issuer.sign(json!({
            "sub": "auth0|noiss",
            "aud": TEST_AUDIENCE,
            "exp": now + 3600,
            DEFAULT_ROLE_NAMESPACE: ["admin"],
        }));

        let err = verifier().verify(&token).await.unwrap_err();
        assert!(matches!(
            decode_error_kind(err),
            ErrorKind::MissingRequiredClaim(ref claim) if claim == "iss"
        ));
    }

    #[tokio::test]
    async fn test_wrong_signing_key() {
        // Same kid as the published key, signed with a different private key
        let token = TestTokenIssuer::rogue().token_with_roles("auth0|forger", &["admin"]);

        let err = verifier().verify(&token).await.unwrap_err();
        assert!(matches!(decode_error_kind(err), ErrorKind::InvalidSignature));
    }

    #[tokio::test]
    async fn test_hs256_token_rejected() {
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::new(Algorithm::HS256),
            &json!({ "sub": "auth0|hmac", "exp": chrono::Utc::now().timestamp() + 3600 }),
            &jsonwebtoken::EncodingKey::from_secret(b"shared"),
        )
        .unwrap();

        let result = verifier().verify(&token).await;
        assert!(matches!(
            result,
            Err(JwtError::AlgorithmNotAllowed(Algorithm::HS256))
        ));
    }
}
