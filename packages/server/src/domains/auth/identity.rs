use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claims of a token whose signature, expiry, issuer and audience have been verified.
///
/// Only ever constructed by [`JwtVerifier`](super::JwtVerifier) (or test helpers),
/// so holding one means the caller is authenticated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityPayload(Map<String, Value>);

impl IdentityPayload {
    pub fn new(claims: Map<String, Value>) -> Self {
        Self(claims)
    }

    /// The `sub` claim, if it is a string
    pub fn subject(&self) -> Option<&str> {
        self.0.get("sub").and_then(Value::as_str)
    }

    /// Role strings stored under `namespace`.
    ///
    /// A missing or non-array claim yields no roles; non-string entries are skipped.
    pub fn roles(&self, namespace: &str) -> Vec<&str> {
        match self.0.get(namespace) {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    pub fn has_role(&self, namespace: &str, role: &str) -> bool {
        self.roles(namespace).contains(&role)
    }
}
