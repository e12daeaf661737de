//! Domain primitives, ports and services.
//!
//! Purpose: model the four records (user, device, pattern, scheduled pattern),
//! the two-role principal model, and the ownership-checked operation set.
//! Nothing here knows about HTTP or SQL; adapters live under `inbound` and
//! `outbound`.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Record ids, ExternalUid, entities and insert payloads.
//! - Principal, UserPrincipal, DevicePrincipal, Role.
//! - MutationOutcome: zero-row vs applied result of conditional mutations.
//! - Services: PrincipalResolver, AccountService, DeviceService,
//!   PatternService, ScheduleService.

pub mod account_service;
pub mod auth;
pub mod device;
pub mod device_service;
pub mod error;
pub mod ids;
pub mod mutation;
pub mod pattern;
pub mod pattern_service;
pub mod ports;
pub mod principal;
pub mod principal_resolver;
pub mod schedule;
pub mod schedule_service;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{BearerCredential, BearerParseError};
pub use self::device::Device;
pub use self::device_service::DeviceService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{
    DeviceId, EXTERNAL_UID_MAX, ExternalUid, ExternalUidError, IdParseError, PatternId,
    ScheduleId, UserId,
};
pub use self::mutation::MutationOutcome;
pub use self::pattern::{NewPattern, Pattern, PatternContent};
pub use self::pattern_service::PatternService;
pub use self::principal::{DevicePrincipal, Principal, Role, UserPrincipal};
pub use self::principal_resolver::PrincipalResolver;
pub use self::schedule::{NewSchedule, ScheduledPattern};
pub use self::schedule_service::ScheduleService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::User;
