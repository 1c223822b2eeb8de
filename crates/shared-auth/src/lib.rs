//! # Shared Auth - Token Authentication
//!
//! Stateless credential validation for client sessions.
//!
//! ## Components
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | `token` | HMAC-SHA3-256 token issue/verify, freshness window |
//! | `errors` | Distinct expired vs. forbidden outcomes |
//!
//! ## Security Properties
//!
//! - **Keyed hash**: tokens are HMAC-SHA3-256 over `uid + timestamp`,
//!   keyed by the shared secret.
//! - **Constant-time comparison**: token verification never short-circuits
//!   on a byte mismatch.
//! - **Expiry before signature**: a stale credential is rejected as
//!   expired even when its signature would validate.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod errors;
pub mod token;

pub use errors::AuthError;
pub use token::{constant_time_compare, TokenAuthenticator};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
