//! Resolved local identities behind an authenticated request.
//!
//! Users and devices authenticate with the same kind of identity provider
//! token but live in disjoint tables. A route states which role it accepts by
//! asking for [`UserPrincipal`] or [`DevicePrincipal`]; the resolver refuses a
//! credential whose subject has no record of that role.

use super::{DeviceId, ExternalUid, UserId};

/// Which table a subject is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Device,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Device => "device",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPrincipal {
    pub id: UserId,
    pub external_uid: ExternalUid,
}

/// An authenticated device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevicePrincipal {
    pub id: DeviceId,
    pub external_uid: ExternalUid,
}

/// Either kind of resolved principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    User(UserPrincipal),
    Device(DevicePrincipal),
}
