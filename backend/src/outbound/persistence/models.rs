//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{devices, patterns, scheduled_patterns, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub external_uid: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub external_uid: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = devices)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DeviceRow {
    pub id: i64,
    pub external_uid: String,
    pub user_id: Option<i64>,
    pub pattern_id: Option<i64>,
    pub light_layout: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = devices)]
pub(crate) struct NewDeviceRow<'a> {
    pub external_uid: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = patterns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PatternRow {
    pub id: i64,
    pub user_id: i64,
    pub content: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = patterns)]
pub(crate) struct NewPatternRow<'a> {
    pub user_id: i64,
    pub content: &'a [u8],
}

/// Row returned by the conditional schedule insert, read by column name.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = scheduled_patterns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ScheduleRow {
    pub id: i64,
    pub device_id: i64,
    pub pattern_id: i64,
    pub scheduled_for: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
