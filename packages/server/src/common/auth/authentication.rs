use crate::domains::auth::IdentityPayload;

/// Outcome of checking a request's bearer token.
///
/// Populated once per request by the authentication middleware; the access
/// pipeline decides whether an unauthenticated request may proceed.
#[derive(Clone, Debug)]
pub enum Authentication {
    Verified(IdentityPayload),
    Unauthenticated(String),
}

impl Authentication {
    /// No Authorization header was sent
    pub fn anonymous() -> Self {
        Self::Unauthenticated("missing authorization header".to_string())
    }

    pub fn identity(&self) -> Option<&IdentityPayload> {
        match self {
            Self::Verified(identity) => Some(identity),
            Self::Unauthenticated(_) => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity().is_some()
    }
}

impl Default for Authentication {
    fn default() -> Self {
        Self::anonymous()
    }
}
