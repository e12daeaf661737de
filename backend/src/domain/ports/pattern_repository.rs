//! Port abstraction for pattern persistence adapters.
use async_trait::async_trait;

use crate::domain::{MutationOutcome, NewPattern, Pattern, PatternId, UserId};

use super::RecordStoreError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatternRepository: Send + Sync {
    /// Fetch any pattern by id regardless of owner.
    async fn find_by_id(&self, id: PatternId) -> Result<Option<Pattern>, RecordStoreError>;

    /// List patterns owned by `owner`.
    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Pattern>, RecordStoreError>;

    /// Insert a pattern and return it with its generated id and timestamp.
    async fn insert(&self, pattern: &NewPattern) -> Result<Pattern, RecordStoreError>;

    /// Delete `id` when it is owned by `owner`.
    async fn delete_owned(
        &self,
        owner: UserId,
        id: PatternId,
    ) -> Result<MutationOutcome, RecordStoreError>;
}
