//! Process-local record store implementing every repository port.
//!
//! Mirrors the PostgreSQL adapter's semantics: unique subjects, foreign key
//! checks on the rows a mutation actually touches, `ON DELETE` actions for
//! patterns, and conditional mutations that report zero-row outcomes. A single
//! mutex guards all tables so each operation is atomic.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};
use serde_json::Value;

use crate::domain::ports::{
    DeviceRepository, PatternRepository, RecordStoreError, ScheduleRepository, UserRepository,
};
use crate::domain::{
    Device, DeviceId, ExternalUid, MutationOutcome, NewPattern, NewSchedule, Pattern, PatternId,
    ScheduleId, ScheduledPattern, User, UserId,
};

#[derive(Default)]
struct Sequence(i64);

impl Sequence {
    fn next(&mut self) -> i64 {
        self.0 += 1;
        self.0
    }
}

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    devices: BTreeMap<i64, Device>,
    patterns: BTreeMap<i64, Pattern>,
    schedules: BTreeMap<i64, ScheduledPattern>,
    user_seq: Sequence,
    device_seq: Sequence,
    pattern_seq: Sequence,
    schedule_seq: Sequence,
}

impl Tables {
    fn user_exists(&self, id: UserId) -> bool {
        self.users.contains_key(&id.get())
    }

    fn owns_device(&self, owner: UserId, device: DeviceId) -> bool {
        self.devices
            .get(&device.get())
            .is_some_and(|row| row.user_id == Some(owner))
    }

    fn owns_pattern(&self, owner: UserId, pattern: PatternId) -> bool {
        self.patterns
            .get(&pattern.get())
            .is_some_and(|row| row.user_id == owner)
    }
}

/// In-memory implementation of the user, device, pattern and schedule ports.
///
/// Cloning shares the underlying tables.
#[derive(Clone)]
pub struct InMemoryRecordStore {
    tables: Arc<Mutex<Tables>>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryRecordStore {
    /// Create an empty store stamping rows with `clock`.
    pub fn new(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            tables: Arc::new(Mutex::new(Tables::default())),
            clock,
        }
    }

    /// Attach a light layout to a device, as provisioning tooling would.
    pub fn set_light_layout(&self, device: DeviceId, layout: Value) -> Result<(), RecordStoreError> {
        let mut tables = self.lock()?;
        let row = tables
            .devices
            .get_mut(&device.get())
            .ok_or_else(|| RecordStoreError::query(format!("device {device} does not exist")))?;
        row.light_layout = Some(layout);
        Ok(())
    }

    /// Fetch a device by internal id; used by tests to observe state.
    pub fn device(&self, device: DeviceId) -> Result<Option<Device>, RecordStoreError> {
        Ok(self.lock()?.devices.get(&device.get()).cloned())
    }

    /// Number of stored schedules.
    pub fn schedule_count(&self) -> Result<usize, RecordStoreError> {
        Ok(self.lock()?.schedules.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, RecordStoreError> {
        self.tables
            .lock()
            .map_err(|_| RecordStoreError::query("in-memory store lock poisoned"))
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }
}

#[async_trait]
impl UserRepository for InMemoryRecordStore {
    async fn find_by_external_uid(
        &self,
        external_uid: &ExternalUid,
    ) -> Result<Option<User>, RecordStoreError> {
        let tables = self.lock()?;
        Ok(tables
            .users
            .values()
            .find(|user| &user.external_uid == external_uid)
            .cloned())
    }

    async fn insert(&self, external_uid: &ExternalUid) -> Result<User, RecordStoreError> {
        let created_at = self.now();
        let mut tables = self.lock()?;
        if tables
            .users
            .values()
            .any(|user| &user.external_uid == external_uid)
        {
            return Err(RecordStoreError::conflict("users_external_uid_key"));
        }
        let id = tables.user_seq.next();
        let user = User {
            id: UserId::new(id),
            external_uid: external_uid.clone(),
            created_at,
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl DeviceRepository for InMemoryRecordStore {
    async fn find_by_external_uid(
        &self,
        external_uid: &ExternalUid,
    ) -> Result<Option<Device>, RecordStoreError> {
        let tables = self.lock()?;
        Ok(tables
            .devices
            .values()
            .find(|device| &device.external_uid == external_uid)
            .cloned())
    }

    async fn insert(&self, external_uid: &ExternalUid) -> Result<Device, RecordStoreError> {
        let created_at = self.now();
        let mut tables = self.lock()?;
        if tables
            .devices
            .values()
            .any(|device| &device.external_uid == external_uid)
        {
            return Err(RecordStoreError::conflict("devices_external_uid_key"));
        }
        let id = tables.device_seq.next();
        let device = Device {
            id: DeviceId::new(id),
            external_uid: external_uid.clone(),
            user_id: None,
            pattern_id: None,
            light_layout: None,
            created_at,
        };
        tables.devices.insert(id, device.clone());
        Ok(device)
    }

    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Device>, RecordStoreError> {
        let tables = self.lock()?;
        Ok(tables
            .devices
            .values()
            .filter(|device| device.user_id == Some(owner))
            .cloned()
            .collect())
    }

    async fn assign_pattern(
        &self,
        owner: UserId,
        device: DeviceId,
        pattern: PatternId,
    ) -> Result<MutationOutcome, RecordStoreError> {
        let mut tables = self.lock()?;
        if !tables.owns_device(owner, device) {
            return Ok(MutationOutcome::NoMatch);
        }
        if !tables.patterns.contains_key(&pattern.get()) {
            return Err(RecordStoreError::missing_reference("devices_pattern_id_fkey"));
        }
        if let Some(row) = tables.devices.get_mut(&device.get()) {
            row.pattern_id = Some(pattern);
        }
        Ok(MutationOutcome::Applied { rows: 1 })
    }

    async fn unpair(
        &self,
        owner: UserId,
        device: DeviceId,
    ) -> Result<MutationOutcome, RecordStoreError> {
        let mut tables = self.lock()?;
        match tables.devices.get_mut(&device.get()) {
            Some(row) if row.user_id == Some(owner) => {
                row.user_id = None;
                Ok(MutationOutcome::Applied { rows: 1 })
            }
            _ => Ok(MutationOutcome::NoMatch),
        }
    }

    async fn pair(
        &self,
        device: DeviceId,
        owner: UserId,
    ) -> Result<MutationOutcome, RecordStoreError> {
        let mut tables = self.lock()?;
        let unpaired = tables
            .devices
            .get(&device.get())
            .is_some_and(Device::is_unpaired);
        if !unpaired {
            return Ok(MutationOutcome::NoMatch);
        }
        if !tables.user_exists(owner) {
            return Err(RecordStoreError::missing_reference("devices_user_id_fkey"));
        }
        if let Some(row) = tables.devices.get_mut(&device.get()) {
            row.user_id = Some(owner);
        }
        Ok(MutationOutcome::Applied { rows: 1 })
    }
}

#[async_trait]
impl PatternRepository for InMemoryRecordStore {
    async fn find_by_id(&self, id: PatternId) -> Result<Option<Pattern>, RecordStoreError> {
        Ok(self.lock()?.patterns.get(&id.get()).cloned())
    }

    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Pattern>, RecordStoreError> {
        let tables = self.lock()?;
        Ok(tables
            .patterns
            .values()
            .filter(|pattern| pattern.user_id == owner)
            .cloned()
            .collect())
    }

    async fn insert(&self, pattern: &NewPattern) -> Result<Pattern, RecordStoreError> {
        let created_at = self.now();
        let mut tables = self.lock()?;
        if !tables.user_exists(pattern.owner) {
            return Err(RecordStoreError::missing_reference("patterns_user_id_fkey"));
        }
        let id = tables.pattern_seq.next();
        let stored = Pattern {
            id: PatternId::new(id),
            user_id: pattern.owner,
            content: pattern.content.clone(),
            created_at,
        };
        tables.patterns.insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete_owned(
        &self,
        owner: UserId,
        id: PatternId,
    ) -> Result<MutationOutcome, RecordStoreError> {
        let mut tables = self.lock()?;
        if !tables.owns_pattern(owner, id) {
            return Ok(MutationOutcome::NoMatch);
        }
        tables.patterns.remove(&id.get());
        for device in tables.devices.values_mut() {
            if device.pattern_id == Some(id) {
                device.pattern_id = None;
            }
        }
        tables.schedules.retain(|_, schedule| schedule.pattern_id != id);
        Ok(MutationOutcome::Applied { rows: 1 })
    }
}

#[async_trait]
impl ScheduleRepository for InMemoryRecordStore {
    async fn insert_owned(
        &self,
        owner: UserId,
        schedule: &NewSchedule,
    ) -> Result<Option<ScheduledPattern>, RecordStoreError> {
        let created_at = self.now();
        let mut tables = self.lock()?;
        if !(tables.owns_device(owner, schedule.device_id)
            && tables.owns_pattern(owner, schedule.pattern_id))
        {
            return Ok(None);
        }
        let id = tables.schedule_seq.next();
        let stored = ScheduledPattern {
            id: ScheduleId::new(id),
            device_id: schedule.device_id,
            pattern_id: schedule.pattern_id,
            scheduled_for: schedule.scheduled_for,
            created_at,
        };
        tables.schedules.insert(id, stored.clone());
        Ok(Some(stored))
    }

    async fn delete_owned(
        &self,
        owner: UserId,
        id: ScheduleId,
    ) -> Result<MutationOutcome, RecordStoreError> {
        let mut tables = self.lock()?;
        let owned = tables
            .schedules
            .get(&id.get())
            .is_some_and(|schedule| tables.owns_device(owner, schedule.device_id));
        if !owned {
            return Ok(MutationOutcome::NoMatch);
        }
        tables.schedules.remove(&id.get());
        Ok(MutationOutcome::Applied { rows: 1 })
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
