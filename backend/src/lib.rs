//! Chromascape backend library: ownership-checked records for users, devices,
//! light patterns and pattern schedules behind an actix-web surface.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use domain::TraceId;
pub use middleware::Trace;
