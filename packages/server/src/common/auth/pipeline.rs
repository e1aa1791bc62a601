use super::{AuthError, Authentication};
use crate::domains::auth::IdentityPayload;

/// The only role the service recognizes
pub const ADMIN_ROLE: &str = "admin";

/// A single check in the access pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessStep {
    Authenticate,
    AuthorizeAdmin,
}

/// What an operation requires of its caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Any verified token
    Authenticated,
    /// A verified token carrying the admin role
    Admin,
}

impl AccessPolicy {
    /// Steps run in order; the first failure stops the pipeline
    pub fn steps(&self) -> &'static [AccessStep] {
        match self {
            AccessPolicy::Authenticated => &[AccessStep::Authenticate],
            AccessPolicy::Admin => &[AccessStep::Authenticate, AccessStep::AuthorizeAdmin],
        }
    }
}

/// Authentication check: the request must carry a verified identity
pub fn authenticate(authentication: &Authentication) -> Result<&IdentityPayload, AuthError> {
    match authentication {
        Authentication::Verified(identity) => Ok(identity),
        Authentication::Unauthenticated(reason) => {
            tracing::debug!(reason = %reason, "rejecting unauthenticated request");
            Err(AuthError::AuthenticationRequired)
        }
    }
}

/// Authorization check: the identity must list `admin` under `role_namespace`.
///
/// Reaching this without an identity means the steps ran out of order, which is
/// still reported as missing authentication.
pub fn authorize_admin(
    identity: Option<&IdentityPayload>,
    role_namespace: &str,
) -> Result<(), AuthError> {
    let identity = identity.ok_or(AuthError::AuthenticationRequired)?;

    if !identity.has_role(role_namespace, ADMIN_ROLE) {
        tracing::debug!(sub = ?identity.subject(), "admin role missing");
        return Err(AuthError::Forbidden);
    }

    Ok(())
}

/// Run every step of `policy` against the request
pub fn enforce<'a>(
    policy: AccessPolicy,
    authentication: &'a Authentication,
    role_namespace: &str,
) -> Result<&'a IdentityPayload, AuthError> {
    let mut identity = None;

    for step in policy.steps() {
        match step {
            AccessStep::Authenticate => identity = Some(authenticate(authentication)?),
            AccessStep::AuthorizeAdmin => authorize_admin(identity, role_namespace)?,
        }
    }

    identity.ok_or(AuthError::AuthenticationRequired)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ROLE_NAMESPACE as NS;
    use serde_json::{json, Value};

    fn verified(claims: Value) -> Authentication {
        match claims {
            Value::Object(map) => Authentication::Verified(IdentityPayload::new(map)),
            _ => panic!("claims must be an object"),
        }
    }

    #[test]
    fn test_admin_policy_authenticates_first() {
        assert_eq!(
            AccessPolicy::Admin.steps(),
            &[AccessStep::Authenticate, AccessStep::AuthorizeAdmin]
        );
        assert_eq!(
            AccessPolicy::Authenticated.steps(),
            &[AccessStep::Authenticate]
        );
    }

    #[test]
    fn test_authenticated_policy_accepts_any_identity() {
        let auth = verified(json!({ "sub": "auth0|reader" }));
        let identity = enforce(AccessPolicy::Authenticated, &auth, NS).unwrap();
        assert_eq!(identity.subject(), Some("auth0|reader"));
    }

    #[test]
    fn test_anonymous_rejected_by_every_policy() {
        let auth = Authentication::anonymous();
        for policy in [AccessPolicy::Authenticated, AccessPolicy::Admin] {
            assert_eq!(
                enforce(policy, &auth, NS).unwrap_err(),
                AuthError::AuthenticationRequired
            );
        }
    }

    #[test]
    fn test_invalid_token_is_unauthenticated_not_forbidden() {
        let auth = Authentication::Unauthenticated("failed to decode token".to_string());
        assert_eq!(
            enforce(AccessPolicy::Admin, &auth, NS).unwrap_err(),
            AuthError::AuthenticationRequired
        );
    }

    #[test]
    fn test_admin_policy_requires_role() {
        let reader = verified(json!({ "sub": "auth0|reader", NS: ["editor"] }));
        assert_eq!(
            enforce(AccessPolicy::Admin, &reader, NS).unwrap_err(),
            AuthError::Forbidden
        );

        let admin = verified(json!({ "sub": "auth0|admin", NS: ["admin"] }));
        assert!(enforce(AccessPolicy::Admin, &admin, NS).is_ok());
    }

    #[test]
    fn test_role_namespace_is_configurable() {
        let auth = verified(json!({ "https://books.example/roles": ["admin"] }));

        assert_eq!(
            enforce(AccessPolicy::Admin, &auth, NS).unwrap_err(),
            AuthError::Forbidden
        );
        assert!(enforce(AccessPolicy::Admin, &auth, "https://books.example/roles").is_ok());
    }

    #[test]
    fn test_authorize_without_identity_is_unauthenticated() {
        assert_eq!(
            authorize_admin(None, NS).unwrap_err(),
            AuthError::AuthenticationRequired
        );
    }
}
