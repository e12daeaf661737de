//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod device_repository;
mod identity_verifier;
mod pattern_repository;
mod record_store_error;
mod schedule_repository;
mod user_repository;

pub use device_repository::DeviceRepository;
#[cfg(test)]
pub use device_repository::MockDeviceRepository;
#[cfg(test)]
pub use identity_verifier::MockIdentityVerifier;
pub use identity_verifier::{IdentityVerificationError, IdentityVerifier};
#[cfg(test)]
pub use pattern_repository::MockPatternRepository;
pub use pattern_repository::PatternRepository;
pub use record_store_error::RecordStoreError;
#[cfg(test)]
pub use schedule_repository::MockScheduleRepository;
pub use schedule_repository::ScheduleRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
