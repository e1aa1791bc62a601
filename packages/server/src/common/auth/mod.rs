//! Access control for the books API
//!
//! Operations declare an [`AccessPolicy`] and run it through [`enforce`] before
//! touching any business logic:
//!
//! ```rust,ignore
//! enforce(AccessPolicy::Admin, &ctx.authentication, &ctx.role_namespace)?;
//! ```
//!
//! The policy expands to an ordered list of steps (authenticate, then authorize),
//! so the sequencing is explicit and testable rather than implied by annotations.

mod authentication;
mod errors;
mod pipeline;

pub use authentication::Authentication;
pub use errors::AuthError;
pub use pipeline::{authenticate, authorize_admin, enforce, AccessPolicy, AccessStep, ADMIN_ROLE};
