//! PostgreSQL-backed `ScheduleRepository` implementation using Diesel ORM.
//!
//! The insert is an `INSERT ... SELECT` that only yields a row when both the
//! device and the pattern belong to the caller, so the ownership check and
//! the write happen in one statement.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Timestamptz};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RecordStoreError, ScheduleRepository};
use crate::domain::{
    DeviceId, MutationOutcome, NewSchedule, PatternId, ScheduleId, ScheduledPattern, UserId,
};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error, outcome_from_affected};
use super::models::ScheduleRow;
use super::pool::DbPool;
use super::schema::{devices, scheduled_patterns};

const INSERT_OWNED_SCHEDULE_SQL: &str = "\
    INSERT INTO scheduled_patterns (device_id, pattern_id, scheduled_for) \
    SELECT d.id, p.id, $3 \
    FROM devices d, patterns p \
    WHERE d.id = $1 AND d.user_id = $4 AND p.id = $2 AND p.user_id = $4 \
    RETURNING id, device_id, pattern_id, scheduled_for, created_at";

/// Diesel-backed implementation of the schedule repository port.
#[derive(Clone)]
pub struct DieselScheduleRepository {
    pool: DbPool,
}

impl DieselScheduleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl From<ScheduleRow> for ScheduledPattern {
    fn from(row: ScheduleRow) -> Self {
        Self {
            id: ScheduleId::new(row.id),
            device_id: DeviceId::new(row.device_id),
            pattern_id: PatternId::new(row.pattern_id),
            scheduled_for: row.scheduled_for,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl ScheduleRepository for DieselScheduleRepository {
    async fn insert_owned(
        &self,
        owner: UserId,
        schedule: &NewSchedule,
    ) -> Result<Option<ScheduledPattern>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ScheduleRow> = diesel::sql_query(INSERT_OWNED_SCHEDULE_SQL)
            .bind::<BigInt, _>(schedule.device_id.get())
            .bind::<BigInt, _>(schedule.pattern_id.get())
            .bind::<Timestamptz, _>(schedule.scheduled_for)
            .bind::<BigInt, _>(owner.get())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(ScheduledPattern::from))
    }

    async fn delete_owned(
        &self,
        owner: UserId,
        id: ScheduleId,
    ) -> Result<MutationOutcome, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let owned_devices = devices::table
            .filter(devices::user_id.eq(owner.get()))
            .select(devices::id);

        let affected = diesel::delete(
            scheduled_patterns::table
                .filter(scheduled_patterns::id.eq(id.get()))
                .filter(scheduled_patterns::device_id.eq_any(owned_devices)),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(outcome_from_affected(affected))
    }
}
