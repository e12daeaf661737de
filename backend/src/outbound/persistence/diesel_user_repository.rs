//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RecordStoreError, UserRepository};
use crate::domain::{ExternalUid, User, UserId};

use super::diesel_basic_error_mapping::{corrupt_row, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: UserRow) -> Result<User, RecordStoreError> {
    let UserRow {
        id,
        external_uid,
        created_at,
    } = row;
    Ok(User {
        id: UserId::new(id),
        external_uid: ExternalUid::new(external_uid)
            .map_err(|err| corrupt_row("users.external_uid", err))?,
        created_at,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_external_uid(
        &self,
        external_uid: &ExternalUid,
    ) -> Result<Option<User>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::external_uid.eq(external_uid.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn insert(&self, external_uid: &ExternalUid) -> Result<User, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(users::table)
            .values(NewUserRow {
                external_uid: external_uid.as_str(),
            })
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_user(row)
    }
}
