//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- The authenticated user, loaded from a JWT Bearer token.
//!   `Option<AuthUser>` admits anonymous callers.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` flag.

pub mod auth;
pub mod rbac;
