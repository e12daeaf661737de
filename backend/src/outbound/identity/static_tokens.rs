//! Fixed token table for local development and tests.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::ports::{IdentityVerificationError, IdentityVerifier};
use crate::domain::{BearerCredential, ExternalUid, ExternalUidError};

/// Problems with a `token=uid` entry. Entries are reported by position so the
/// token itself never reaches logs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StaticTokenError {
    #[error("static token entry {index} must be formatted as token=uid")]
    MissingSeparator { index: usize },
    #[error("static token entry {index} has an empty token")]
    EmptyToken { index: usize },
    #[error("static token entry {index} has an invalid uid: {source}")]
    InvalidUid {
        index: usize,
        source: ExternalUidError,
    },
    #[error("static token entry {index} repeats an earlier token")]
    Duplicate { index: usize },
}

/// Verifier backed by an in-process table of tokens.
#[derive(Default)]
pub struct StaticTokenVerifier {
    tokens: HashMap<String, ExternalUid>,
}

impl StaticTokenVerifier {
    /// Parse `token=uid` entries.
    ///
    /// # Examples
    /// ```
    /// use chromascape_backend::outbound::identity::StaticTokenVerifier;
    ///
    /// let verifier = StaticTokenVerifier::from_entries(["dev-token=alice"]).unwrap();
    /// assert_eq!(verifier.len(), 1);
    /// ```
    pub fn from_entries<I, S>(entries: I) -> Result<Self, StaticTokenError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokens = HashMap::new();
        for (index, entry) in entries.into_iter().enumerate() {
            let (token, uid) = entry
                .as_ref()
                .split_once('=')
                .ok_or(StaticTokenError::MissingSeparator { index })?;
            let token = token.trim();
            if token.is_empty() {
                return Err(StaticTokenError::EmptyToken { index });
            }
            let uid = ExternalUid::new(uid.trim())
                .map_err(|source| StaticTokenError::InvalidUid { index, source })?;
            if tokens.insert(token.to_owned(), uid).is_some() {
                return Err(StaticTokenError::Duplicate { index });
            }
        }
        Ok(Self { tokens })
    }

    /// Number of configured tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl IdentityVerifier for StaticTokenVerifier {
    async fn verify(
        &self,
        credential: &BearerCredential,
    ) -> Result<ExternalUid, IdentityVerificationError> {
        self.tokens
            .get(credential.token())
            .cloned()
            .ok_or_else(|| IdentityVerificationError::rejected("unknown static token"))
    }
}
