//! PostgreSQL-backed `DeviceRepository` implementation using Diesel ORM.
//!
//! Ownership is part of each `UPDATE ... WHERE` so the check and the write are
//! one atomic statement.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DeviceRepository, RecordStoreError};
use crate::domain::{Device, DeviceId, ExternalUid, MutationOutcome, PatternId, UserId};

use super::diesel_basic_error_mapping::{
    corrupt_row, map_diesel_error, map_pool_error, outcome_from_affected,
};
use super::models::{DeviceRow, NewDeviceRow};
use super::pool::DbPool;
use super::schema::devices;

/// Diesel-backed implementation of the device repository port.
#[derive(Clone)]
pub struct DieselDeviceRepository {
    pool: DbPool,
}

impl DieselDeviceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_device(row: DeviceRow) -> Result<Device, RecordStoreError> {
    let DeviceRow {
        id,
        external_uid,
        user_id,
        pattern_id,
        light_layout,
        created_at,
    } = row;
    Ok(Device {
        id: DeviceId::new(id),
        external_uid: ExternalUid::new(external_uid)
            .map_err(|err| corrupt_row("devices.external_uid", err))?,
        user_id: user_id.map(UserId::new),
        pattern_id: pattern_id.map(PatternId::new),
        light_layout,
        created_at,
    })
}

#[async_trait]
impl DeviceRepository for DieselDeviceRepository {
    async fn find_by_external_uid(
        &self,
        external_uid: &ExternalUid,
    ) -> Result<Option<Device>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = devices::table
            .filter(devices::external_uid.eq(external_uid.as_str()))
            .select(DeviceRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_device).transpose()
    }

    async fn insert(&self, external_uid: &ExternalUid) -> Result<Device, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(devices::table)
            .values(NewDeviceRow {
                external_uid: external_uid.as_str(),
            })
            .returning(DeviceRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_device(row)
    }

    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Device>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<DeviceRow> = devices::table
            .filter(devices::user_id.eq(owner.get()))
            .order(devices::id.asc())
            .select(DeviceRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_device).collect()
    }

    async fn assign_pattern(
        &self,
        owner: UserId,
        device: DeviceId,
        pattern: PatternId,
    ) -> Result<MutationOutcome, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::update(
            devices::table
                .filter(devices::id.eq(device.get()))
                .filter(devices::user_id.eq(owner.get())),
        )
        .set(devices::pattern_id.eq(pattern.get()))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(outcome_from_affected(affected))
    }

    async fn unpair(
        &self,
        owner: UserId,
        device: DeviceId,
    ) -> Result<MutationOutcome, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::update(
            devices::table
                .filter(devices::id.eq(device.get()))
                .filter(devices::user_id.eq(owner.get())),
        )
        .set(devices::user_id.eq(None::<i64>))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(outcome_from_affected(affected))
    }

    async fn pair(
        &self,
        device: DeviceId,
        owner: UserId,
    ) -> Result<MutationOutcome, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::update(
            devices::table
                .filter(devices::id.eq(device.get()))
                .filter(devices::user_id.is_null()),
        )
        .set(devices::user_id.eq(owner.get()))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(outcome_from_affected(affected))
    }
}
