//! Profile reads and first-contact record creation for users and devices.

use std::sync::Arc;

use tracing::info;

use crate::domain::ports::{DeviceRepository, UserRepository};
use crate::domain::{Device, DevicePrincipal, Error, ExternalUid, User, UserPrincipal};

/// Creates and reads the caller's own user or device record.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    devices: Arc<dyn DeviceRepository>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>, devices: Arc<dyn DeviceRepository>) -> Self {
        Self { users, devices }
    }

    /// Fetch the profile of the authenticated user.
    pub async fn user_profile(&self, principal: &UserPrincipal) -> Result<User, Error> {
        self.users
            .find_by_external_uid(&principal.external_uid)
            .await?
            .ok_or_else(|| Error::not_found("user profile not found"))
    }

    /// Fetch the profile of the authenticated device.
    pub async fn device_profile(&self, principal: &DevicePrincipal) -> Result<Device, Error> {
        self.devices
            .find_by_external_uid(&principal.external_uid)
            .await?
            .ok_or_else(|| Error::not_found("device profile not found"))
    }

    /// Register a user for a verified subject.
    pub async fn create_user(&self, external_uid: &ExternalUid) -> Result<User, Error> {
        let user = self.users.insert(external_uid).await?;
        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Register an unpaired device for a verified subject.
    pub async fn create_device(&self, external_uid: &ExternalUid) -> Result<Device, Error> {
        let device = self.devices.insert(external_uid).await?;
        info!(device_id = %device.id, "device registered");
        Ok(device)
    }
}
