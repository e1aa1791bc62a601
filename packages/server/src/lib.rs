// Books Dashboard - API Core
//
// GraphQL CRUD backend for the books resource. Every operation requires a
// verified bearer token; mutations additionally require the admin role claim.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
