//! Scheduled pattern record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{DeviceId, PatternId, ScheduleId};

/// A request to run a pattern on a device at a future time.
///
/// Nothing in this service executes schedules; they are stored for the device
/// fleet to pick up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPattern {
    #[schema(value_type = String, example = "5")]
    pub id: ScheduleId,
    #[schema(value_type = String, example = "12")]
    pub device_id: DeviceId,
    #[schema(value_type = String, example = "3")]
    pub pattern_id: PatternId,
    pub scheduled_for: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a schedule. Ownership of both references is checked by
/// the store in the same statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewSchedule {
    pub device_id: DeviceId,
    pub pattern_id: PatternId,
    pub scheduled_for: DateTime<Utc>,
}
