//! Port abstraction for device persistence adapters.
//!
//! Every mutation folds the ownership check into the statement that performs
//! it and reports a zero-row result as [`MutationOutcome::NoMatch`].
use async_trait::async_trait;

use crate::domain::{Device, DeviceId, ExternalUid, MutationOutcome, PatternId, UserId};

use super::RecordStoreError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceRepository: Send + Sync {
    /// Fetch the device registered for an identity provider subject.
    async fn find_by_external_uid(
        &self,
        external_uid: &ExternalUid,
    ) -> Result<Option<Device>, RecordStoreError>;

    /// Insert an unpaired device for the subject.
    async fn insert(&self, external_uid: &ExternalUid) -> Result<Device, RecordStoreError>;

    /// List devices paired to `owner`.
    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Device>, RecordStoreError>;

    /// Set `pattern_id` on `device` when it is paired to `owner`.
    ///
    /// An unknown pattern fails with [`RecordStoreError::MissingReference`].
    async fn assign_pattern(
        &self,
        owner: UserId,
        device: DeviceId,
        pattern: PatternId,
    ) -> Result<MutationOutcome, RecordStoreError>;

    /// Clear the owner of `device` when it is paired to `owner`.
    async fn unpair(
        &self,
        owner: UserId,
        device: DeviceId,
    ) -> Result<MutationOutcome, RecordStoreError>;

    /// Pair `device` to `owner` when it currently has no owner.
    ///
    /// An unknown user fails with [`RecordStoreError::MissingReference`].
    async fn pair(
        &self,
        device: DeviceId,
        owner: UserId,
    ) -> Result<MutationOutcome, RecordStoreError>;
}
