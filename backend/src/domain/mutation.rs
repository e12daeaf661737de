//! Outcome of an ownership-scoped store mutation.

use super::Error;

/// Result of a conditional update or delete whose predicate includes the
/// caller's ownership.
///
/// A zero-row result is a normal outcome rather than an error at the store
/// boundary; services decide how to surface it.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The predicate matched and `rows` records were changed.
    Applied { rows: u64 },
    /// No record satisfied the compound predicate.
    NoMatch,
}

impl MutationOutcome {
    /// Classify an affected-row count.
    ///
    /// # Examples
    /// ```
    /// use chromascape_backend::domain::MutationOutcome;
    ///
    /// assert_eq!(MutationOutcome::from_rows(0), MutationOutcome::NoMatch);
    /// assert_eq!(MutationOutcome::from_rows(2), MutationOutcome::Applied { rows: 2 });
    /// ```
    pub fn from_rows(rows: u64) -> Self {
        if rows == 0 {
            Self::NoMatch
        } else {
            Self::Applied { rows }
        }
    }

    /// Number of rows changed; zero for [`MutationOutcome::NoMatch`].
    #[must_use]
    pub fn rows(self) -> u64 {
        match self {
            Self::Applied { rows } => rows,
            Self::NoMatch => 0,
        }
    }

    /// Turn a zero-row outcome into the undifferentiated ownership error.
    ///
    /// The message names the record kind but never says whether the record
    /// was missing or belonged to someone else.
    pub fn require_match(self, record: &str) -> Result<u64, Error> {
        match self {
            Self::Applied { rows } => Ok(rows),
            Self::NoMatch => Err(Error::not_found_or_not_owned(format!(
                "{record} not found or not owned"
            ))),
        }
    }
}
