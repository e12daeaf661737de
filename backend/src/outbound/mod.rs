//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: process-local repositories with the same semantics
//! - **identity**: identity provider token verifiers
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod identity;
pub mod memory;
pub mod persistence;
