//! Pattern record and its opaque payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{PatternId, UserId};

/// Light-show payload. Carried verbatim; never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternContent(String);

impl PatternContent {
    /// Wrap a payload.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Rebuild a payload from stored bytes.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected so a corrupt
    /// row never blocks listing the rest.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(String::from_utf8_lossy(bytes).into_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

/// A pattern owned by exactly one user. Immutable except for deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    #[schema(value_type = String, example = "3")]
    pub id: PatternId,
    #[schema(value_type = String, example = "7")]
    pub user_id: UserId,
    #[schema(value_type = String, example = "AB")]
    pub content: PatternContent,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPattern {
    pub owner: UserId,
    pub content: PatternContent,
}
