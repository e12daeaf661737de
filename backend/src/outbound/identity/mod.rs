//! Identity provider adapters implementing the `IdentityVerifier` port.
//!
//! `FirebaseIdentityVerifier` asks the Identity Toolkit who a token belongs
//! to; `StaticTokenVerifier` serves a fixed token table for local runs.

mod dto;
mod firebase;
mod static_tokens;

pub use firebase::{DEFAULT_IDENTITY_BASE_URL, FirebaseIdentityVerifier};
pub use static_tokens::{StaticTokenError, StaticTokenVerifier};
