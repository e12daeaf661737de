//! Credential verification and principal resolution.
//!
//! Authentication is two steps: the identity provider vouches for a subject,
//! then the subject is looked up in the table for the role the route demands.
//! A subject with no record of that role is unauthorized, not "not found".
//! Store failures during the lookup propagate unchanged so an outage is never
//! reported as a bad credential.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::{DeviceRepository, IdentityVerifier, UserRepository};
use crate::domain::{
    BearerCredential, DevicePrincipal, Error, ExternalUid, Principal, Role, UserPrincipal,
};

/// Resolves bearer credentials into local principals.
#[derive(Clone)]
pub struct PrincipalResolver {
    verifier: Arc<dyn IdentityVerifier>,
    users: Arc<dyn UserRepository>,
    devices: Arc<dyn DeviceRepository>,
}

impl PrincipalResolver {
    pub fn new(
        verifier: Arc<dyn IdentityVerifier>,
        users: Arc<dyn UserRepository>,
        devices: Arc<dyn DeviceRepository>,
    ) -> Self {
        Self {
            verifier,
            users,
            devices,
        }
    }

    /// Ask the identity provider who the credential belongs to.
    ///
    /// Every verifier failure collapses into [`crate::domain::ErrorCode::Unauthorized`].
    pub async fn verify(&self, credential: &BearerCredential) -> Result<ExternalUid, Error> {
        self.verifier.verify(credential).await.map_err(|err| {
            debug!(
                fingerprint = %credential.fingerprint(),
                reason = %err,
                "credential verification failed"
            );
            Error::unauthorized("invalid credential")
        })
    }

    /// Look up the local record of `role` for a verified subject.
    pub async fn resolve(&self, external_uid: &ExternalUid, role: Role) -> Result<Principal, Error> {
        let principal = match role {
            Role::User => self
                .users
                .find_by_external_uid(external_uid)
                .await?
                .map(|user| {
                    Principal::User(UserPrincipal {
                        id: user.id,
                        external_uid: user.external_uid,
                    })
                }),
            Role::Device => self
                .devices
                .find_by_external_uid(external_uid)
                .await?
                .map(|device| {
                    Principal::Device(DevicePrincipal {
                        id: device.id,
                        external_uid: device.external_uid,
                    })
                }),
        };
        principal.ok_or_else(|| {
            debug!(%role, "verified subject has no local record for role");
            Error::unauthorized(format!("no {role} registered for this credential"))
        })
    }

    /// Verify the credential and resolve it as a user.
    pub async fn authenticate_user(
        &self,
        credential: &BearerCredential,
    ) -> Result<UserPrincipal, Error> {
        let external_uid = self.verify(credential).await?;
        match self.resolve(&external_uid, Role::User).await? {
            Principal::User(user) => Ok(user),
            Principal::Device(_) => Err(Error::internal("user lookup yielded a device principal")),
        }
    }

    /// Verify the credential and resolve it as a device.
    pub async fn authenticate_device(
        &self,
        credential: &BearerCredential,
    ) -> Result<DevicePrincipal, Error> {
        let external_uid = self.verify(credential).await?;
        match self.resolve(&external_uid, Role::Device).await? {
            Principal::Device(device) => Ok(device),
            Principal::User(_) => Err(Error::internal("device lookup yielded a user principal")),
        }
    }
}

#[cfg(test)]
#[path = "principal_resolver_tests.rs"]
mod tests;
