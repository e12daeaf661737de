//! Device listing, pattern assignment, pairing and unpairing.
//!
//! Each mutation is a single conditional statement whose predicate carries the
//! ownership rule. A zero-row result surfaces as
//! [`crate::domain::ErrorCode::NotFoundOrNotOwned`] without saying which half
//! of the predicate failed.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::ports::DeviceRepository;
use crate::domain::{
    Device, DeviceId, DevicePrincipal, Error, MutationOutcome, PatternId, UserId, UserPrincipal,
};

const DEVICE_RECORD: &str = "device";

/// Ownership-checked device operations.
#[derive(Clone)]
pub struct DeviceService {
    devices: Arc<dyn DeviceRepository>,
}

impl DeviceService {
    pub fn new(devices: Arc<dyn DeviceRepository>) -> Self {
        Self { devices }
    }

    /// Devices paired to the caller. An empty list is a normal result.
    pub async fn list_devices(&self, owner: &UserPrincipal) -> Result<Vec<Device>, Error> {
        Ok(self.devices.list_for_owner(owner.id).await?)
    }

    /// Point one of the caller's devices at a pattern.
    ///
    /// Returns the number of devices updated.
    pub async fn assign_pattern(
        &self,
        owner: &UserPrincipal,
        device: DeviceId,
        pattern: PatternId,
    ) -> Result<u64, Error> {
        let outcome = self.devices.assign_pattern(owner.id, device, pattern).await?;
        log_no_match(outcome, "assign_pattern", device);
        outcome.require_match(DEVICE_RECORD)
    }

    /// Release one of the caller's devices so another user can pair it.
    pub async fn unpair(&self, owner: &UserPrincipal, device: DeviceId) -> Result<(), Error> {
        let outcome = self.devices.unpair(owner.id, device).await?;
        log_no_match(outcome, "unpair", device);
        outcome.require_match(DEVICE_RECORD)?;
        info!(%device, "device unpaired");
        Ok(())
    }

    /// Claim the calling device for `owner`. Only succeeds while unpaired.
    pub async fn pair(&self, device: &DevicePrincipal, owner: UserId) -> Result<(), Error> {
        let outcome = self.devices.pair(device.id, owner).await?;
        log_no_match(outcome, "pair", device.id);
        outcome.require_match(DEVICE_RECORD)?;
        info!(device = %device.id, user = %owner, "device paired");
        Ok(())
    }
}

fn log_no_match(outcome: MutationOutcome, operation: &'static str, device: DeviceId) {
    if outcome == MutationOutcome::NoMatch {
        debug!(operation, %device, "device mutation matched no row");
    }
}

#[cfg(test)]
#[path = "device_service_tests.rs"]
mod tests;
