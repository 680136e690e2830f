//! Authentication and Authorization module
//!
//! HTTP Basic credentials checked against an in-memory store of bcrypt
//! hashes; the authenticated [`Principal`] carries the roles used by the
//! per-route guards.

pub mod basic;
pub mod credentials;
pub mod password;

pub use basic::{decode_basic_header, BasicCredentials};
pub use credentials::{AuthError, CredentialStore, Principal, Role};
pub use password::{hash_password, verify_password};
