//! Pattern listing, creation, deletion and public lookup.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::ports::PatternRepository;
use crate::domain::{
    Error, MutationOutcome, NewPattern, Pattern, PatternContent, PatternId, UserPrincipal,
};

/// Pattern operations. All but [`PatternService::fetch_public`] are scoped to
/// the calling user.
#[derive(Clone)]
pub struct PatternService {
    patterns: Arc<dyn PatternRepository>,
}

impl PatternService {
    pub fn new(patterns: Arc<dyn PatternRepository>) -> Self {
        Self { patterns }
    }

    pub async fn list_patterns(&self, owner: &UserPrincipal) -> Result<Vec<Pattern>, Error> {
        Ok(self.patterns.list_for_owner(owner.id).await?)
    }

    /// Store a new pattern owned by the caller. The payload is not inspected.
    pub async fn create_pattern(
        &self,
        owner: &UserPrincipal,
        content: PatternContent,
    ) -> Result<Pattern, Error> {
        let pattern = self
            .patterns
            .insert(&NewPattern {
                owner: owner.id,
                content,
            })
            .await?;
        info!(pattern_id = %pattern.id, user_id = %owner.id, "pattern created");
        Ok(pattern)
    }

    /// Delete one of the caller's patterns.
    ///
    /// Device assignments and schedules referencing it are cleared by the store.
    pub async fn delete_pattern(&self, owner: &UserPrincipal, id: PatternId) -> Result<(), Error> {
        let outcome = self.patterns.delete_owned(owner.id, id).await?;
        if outcome == MutationOutcome::NoMatch {
            debug!(pattern_id = %id, "pattern delete matched no row");
        }
        outcome.require_match("pattern")?;
        Ok(())
    }

    /// Look up any pattern by id. Absence is `None`, not an error.
    pub async fn fetch_public(&self, id: PatternId) -> Result<Option<Pattern>, Error> {
        Ok(self.patterns.find_by_id(id).await?)
    }
}
