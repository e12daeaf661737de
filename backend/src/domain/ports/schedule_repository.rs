//! Port abstraction for scheduled pattern persistence adapters.
use async_trait::async_trait;

use crate::domain::{MutationOutcome, NewSchedule, ScheduleId, ScheduledPattern, UserId};

use super::RecordStoreError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Insert a schedule only when both its device and its pattern belong to
    /// `owner`.
    ///
    /// Returns `None` when the ownership predicate matched nothing; no row is
    /// written in that case.
    async fn insert_owned(
        &self,
        owner: UserId,
        schedule: &NewSchedule,
    ) -> Result<Option<ScheduledPattern>, RecordStoreError>;

    /// Delete `id` when its device belongs to `owner`.
    async fn delete_owned(
        &self,
        owner: UserId,
        id: ScheduleId,
    ) -> Result<MutationOutcome, RecordStoreError>;
}
