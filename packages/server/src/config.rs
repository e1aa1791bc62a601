use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::num::NonZeroU32;
use std::time::Duration;

/// Claim key holding the role array when `ROLE_NAMESPACE` is unset
pub const DEFAULT_ROLE_NAMESPACE: &str = "https://myapp.com/roles";

const DEFAULT_JWKS_REQUESTS_PER_MINUTE: NonZeroU32 = match NonZeroU32::new(5) {
    Some(n) => n,
    None => unreachable!(),
};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub auth: AuthConfig,
}

/// Identity provider settings used to verify bearer tokens
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Identity provider base URL, always with a scheme and no trailing slash
    pub domain: String,
    pub audience: String,
    pub issuer_override: Option<String>,
    pub jwks_uri_override: Option<String>,
    pub role_namespace: String,
    pub jwks_requests_per_minute: NonZeroU32,
    pub jwks_cache_ttl: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://data/database.sqlite".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            allowed_origins: parse_list(
                &env::var("ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            ),
            auth: AuthConfig {
                domain: normalize_domain(
                    &env::var("AUTH0_DOMAIN").context("AUTH0_DOMAIN must be set")?,
                ),
                audience: env::var("AUTH0_AUDIENCE").context("AUTH0_AUDIENCE must be set")?,
                issuer_override: env::var("AUTH0_ISSUER").ok(),
                jwks_uri_override: env::var("AUTH0_JWKS_URI").ok(),
                role_namespace: env::var("ROLE_NAMESPACE")
                    .unwrap_or_else(|_| DEFAULT_ROLE_NAMESPACE.to_string()),
                jwks_requests_per_minute: match env::var("JWKS_REQUESTS_PER_MINUTE") {
                    Ok(raw) => parse_requests_per_minute(&raw)?,
                    Err(_) => DEFAULT_JWKS_REQUESTS_PER_MINUTE,
                },
                jwks_cache_ttl: Duration::from_secs(
                    env::var("JWKS_CACHE_TTL_SECS")
                        .unwrap_or_else(|_| "600".to_string())
                        .parse()
                        .context("JWKS_CACHE_TTL_SECS must be a valid number")?,
                ),
            },
        })
    }
}

impl AuthConfig {
    /// Settings for a provider rooted at `domain`, everything else defaulted
    pub fn new(domain: &str, audience: impl Into<String>) -> Self {
        Self {
            domain: normalize_domain(domain),
            audience: audience.into(),
            issuer_override: None,
            jwks_uri_override: None,
            role_namespace: DEFAULT_ROLE_NAMESPACE.to_string(),
            jwks_requests_per_minute: DEFAULT_JWKS_REQUESTS_PER_MINUTE,
            jwks_cache_ttl: Duration::from_secs(600),
        }
    }

    /// Expected `iss` claim. The provider issues tokens with a trailing slash.
    pub fn issuer(&self) -> String {
        self.issuer_override
            .clone()
            .unwrap_or_else(|| format!("{}/", self.domain))
    }

    pub fn jwks_uri(&self) -> String {
        self.jwks_uri_override
            .clone()
            .unwrap_or_else(|| format!("{}/.well-known/jwks.json", self.domain))
    }
}

fn normalize_domain(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// At least one JWKS fetch per minute, or key rotation could never be picked up
fn parse_requests_per_minute(raw: &str) -> Result<NonZeroU32> {
    raw.trim()
        .parse()
        .context("JWKS_REQUESTS_PER_MINUTE must be a number greater than zero")
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
