//! Shared helpers for the embedded PostgreSQL integration suites.
//!
//! Integration tests compile as separate crates, so helpers used by more than
//! one suite live here and are pulled in with `mod support;`.

pub mod cluster_skip;
pub mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{provision_template_database, shared_cluster};
