//! Port abstraction for user persistence adapters.
use async_trait::async_trait;

use crate::domain::{ExternalUid, User};

use super::RecordStoreError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch the user registered for an identity provider subject.
    async fn find_by_external_uid(
        &self,
        external_uid: &ExternalUid,
    ) -> Result<Option<User>, RecordStoreError>;

    /// Insert a user for the subject.
    ///
    /// Fails with [`RecordStoreError::Conflict`] when one already exists.
    async fn insert(&self, external_uid: &ExternalUid) -> Result<User, RecordStoreError>;
}
