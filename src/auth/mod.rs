//! Identity session consumption.
//!
//! Signup, login and password handling live in the external identity
//! provider; this module only resolves the session cookie it issues.

pub mod middleware;

pub use middleware::{AuthContext, SESSION_COOKIE_NAME};
