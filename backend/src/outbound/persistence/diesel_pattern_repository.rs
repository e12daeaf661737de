//! PostgreSQL-backed `PatternRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PatternRepository, RecordStoreError};
use crate::domain::{MutationOutcome, NewPattern, Pattern, PatternContent, PatternId, UserId};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error, outcome_from_affected};
use super::models::{NewPatternRow, PatternRow};
use super::pool::DbPool;
use super::schema::patterns;

/// Diesel-backed implementation of the pattern repository port.
#[derive(Clone)]
pub struct DieselPatternRepository {
    pool: DbPool,
}

impl DieselPatternRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl From<PatternRow> for Pattern {
    fn from(row: PatternRow) -> Self {
        Self {
            id: PatternId::new(row.id),
            user_id: UserId::new(row.user_id),
            content: PatternContent::from_bytes(&row.content),
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl PatternRepository for DieselPatternRepository {
    async fn find_by_id(&self, id: PatternId) -> Result<Option<Pattern>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = patterns::table
            .find(id.get())
            .select(PatternRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Pattern::from))
    }

    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Pattern>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PatternRow> = patterns::table
            .filter(patterns::user_id.eq(owner.get()))
            .order(patterns::id.asc())
            .select(PatternRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Pattern::from).collect())
    }

    async fn insert(&self, pattern: &NewPattern) -> Result<Pattern, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(patterns::table)
            .values(NewPatternRow {
                user_id: pattern.owner.get(),
                content: pattern.content.as_bytes(),
            })
            .returning(PatternRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Pattern::from(row))
    }

    async fn delete_owned(
        &self,
        owner: UserId,
        id: PatternId,
    ) -> Result<MutationOutcome, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Device assignments and schedules are released by the FK actions.
        let affected = diesel::delete(
            patterns::table
                .filter(patterns::id.eq(id.get()))
                .filter(patterns::user_id.eq(owner.get())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(outcome_from_affected(affected))
    }
}
