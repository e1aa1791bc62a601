use std::num::NonZeroU32;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use jsonwebtoken::jwk::{Jwk, JwkSet};
use tracing::{debug, warn};

#[derive(thiserror::Error, Debug)]
pub enum JwksError {
    #[error("failed to load remote jwks: {0}")]
    RemoteJwksNetworkError(#[from] reqwest::Error),
    #[error("jwks refresh rate limit exceeded")]
    RateLimited,
    #[error("no signing key matches kid {0:?}")]
    SigningKeyNotFound(Option<String>),
}

enum JwksSource {
    Remote {
        url: String,
        client: reqwest::Client,
        fetches: DefaultDirectRateLimiter,
    },
    Static,
}

struct CachedKeys {
    set: Arc<JwkSet>,
    fetched_at: Instant,
}

/// Signing keys of the identity provider.
///
/// Remote key sets are cached for `ttl`. A cache miss on `kid` (key rotation) or an
/// expired cache triggers a refetch, and refetches are capped at
/// `requests_per_minute` (a full burst, then one more every `60 / n` seconds).
/// When a refetch is refused or fails, a stale key that still matches is served.
pub struct JwksCache {
    source: JwksSource,
    ttl: Duration,
    keys: RwLock<Option<CachedKeys>>,
}

impl JwksCache {
    pub fn remote(url: impl Into<String>, requests_per_minute: NonZeroU32, ttl: Duration) -> Self {
        Self {
            source: JwksSource::Remote {
                url: url.into(),
                client: reqwest::Client::new(),
                fetches: RateLimiter::direct(Quota::per_minute(requests_per_minute)),
            },
            ttl,
            keys: RwLock::new(None),
        }
    }

    /// A fixed key set that never expires and is never refetched
    pub fn from_static(set: JwkSet) -> Self {
        Self {
            source: JwksSource::Static,
            ttl: Duration::MAX,
            keys: RwLock::new(Some(CachedKeys {
                set: Arc::new(set),
                fetched_at: Instant::now(),
            })),
        }
    }

    /// Resolve the key a token header points at
    pub async fn signing_key(&self, kid: Option<&str>) -> Result<Jwk, JwksError> {
        let cached = self.cached();

        if let Some((set, true)) = &cached {
            if let Some(key) = find_key(set, kid) {
                return Ok(key.clone());
            }
        }

        match self.refresh().await {
            Ok(set) => find_key(&set, kid)
                .cloned()
                .ok_or_else(|| JwksError::SigningKeyNotFound(kid.map(String::from))),
            Err(err) => {
                if let Some(key) = cached.as_ref().and_then(|(set, _)| find_key(set, kid)) {
                    warn!(error = %err, "jwks refresh failed, serving stale signing key");
                    return Ok(key.clone());
                }
                Err(err)
            }
        }
    }

    fn cached(&self) -> Option<(Arc<JwkSet>, bool)> {
        let guard = self.keys.read().unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().map(|cached| {
            let fresh = cached.fetched_at.elapsed() < self.ttl;
            (cached.set.clone(), fresh)
        })
    }

    async fn refresh(&self) -> Result<Arc<JwkSet>, JwksError> {
        let (url, client) = match &self.source {
            JwksSource::Remote {
                url,
                client,
                fetches,
            } => {
                if fetches.check().is_err() {
                    return Err(JwksError::RateLimited);
                }
                (url, client)
            }
            JwksSource::Static => {
                return self
                    .cached()
                    .map(|(set, _)| set)
                    .ok_or(JwksError::SigningKeyNotFound(None));
            }
        };

        debug!("loading jwks from a remote source: {}", url);
        let set: JwkSet = client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let set = Arc::new(set);

        let mut guard = self.keys.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(CachedKeys {
            set: set.clone(),
            fetched_at: Instant::now(),
        });

        Ok(set)
    }

}

/// Match on `kid`; a token without one is accepted only when the set holds a single key.
fn find_key<'a>(set: &'a JwkSet, kid: Option<&str>) -> Option<&'a Jwk> {
    match kid {
        Some(kid) => set.find(kid),
        None if set.keys.len() == 1 => set.keys.first(),
        None => None,
    }
}
