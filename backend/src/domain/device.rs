//! Device record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::{DeviceId, ExternalUid, PatternId, UserId};

/// A physical light controller.
///
/// ## Invariants
/// - `user_id == None` means the device is unpaired and any user may claim it.
/// - Once paired only the owning user may reassign its pattern or unpair it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    #[schema(value_type = String, example = "12")]
    pub id: DeviceId,
    #[schema(value_type = String)]
    pub external_uid: ExternalUid,
    #[schema(value_type = Option<String>, example = "7")]
    pub user_id: Option<UserId>,
    #[schema(value_type = Option<String>)]
    pub pattern_id: Option<PatternId>,
    /// Opaque description of the physical light arrangement.
    #[schema(value_type = Option<Object>)]
    pub light_layout: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl Device {
    /// Whether the device has no owning user.
    #[must_use]
    pub fn is_unpaired(&self) -> bool {
        self.user_id.is_none()
    }
}
