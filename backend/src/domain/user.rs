//! User record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ExternalUid, UserId};

/// A person who owns devices and patterns.
///
/// Serialised in camelCase with the id rendered as a decimal string, e.g.
/// `{"id":"7","externalUid":"Xk2f9qLm","createdAt":"2025-01-01T00:00:00Z"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(value_type = String, example = "7")]
    pub id: UserId,
    #[schema(value_type = String, example = "Xk2f9qLm")]
    pub external_uid: ExternalUid,
    pub created_at: DateTime<Utc>,
}
