//! Bearer credentials presented by callers.

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Length of the credential fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Reasons an `Authorization` header does not yield a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BearerParseError {
    #[error("authorization header is missing")]
    Missing,
    #[error("authorization scheme must be Bearer")]
    WrongScheme,
    #[error("bearer token must not be empty")]
    EmptyToken,
}

/// Identity provider token taken from an `Authorization: Bearer` header.
///
/// The raw token is zeroed on drop and never printed; use
/// [`BearerCredential::fingerprint`] to correlate log lines.
pub struct BearerCredential {
    token: Zeroizing<String>,
}

impl BearerCredential {
    /// Wrap a bare token.
    pub fn new(token: impl Into<String>) -> Result<Self, BearerParseError> {
        let token = Zeroizing::new(token.into());
        if token.trim().is_empty() {
            return Err(BearerParseError::EmptyToken);
        }
        Ok(Self { token })
    }

    /// Parse an `Authorization` header value.
    ///
    /// The scheme is matched case-insensitively.
    ///
    /// # Examples
    /// ```
    /// use chromascape_backend::domain::{BearerCredential, BearerParseError};
    ///
    /// let credential = BearerCredential::from_header(Some("Bearer abc")).expect("bearer");
    /// assert_eq!(credential.token(), "abc");
    /// assert_eq!(
    ///     BearerCredential::from_header(Some("Basic abc")).err(),
    ///     Some(BearerParseError::WrongScheme)
    /// );
    /// ```
    pub fn from_header(header: Option<&str>) -> Result<Self, BearerParseError> {
        let header = header.ok_or(BearerParseError::Missing)?;
        let (scheme, token) = header
            .trim_start()
            .split_once(' ')
            .ok_or(BearerParseError::WrongScheme)?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return Err(BearerParseError::WrongScheme);
        }
        Self::new(token.trim())
    }

    /// Borrow the raw token for the outbound verification call.
    #[must_use]
    pub fn token(&self) -> &str {
        self.token.as_str()
    }

    /// Truncated SHA-256 of the token as hex, safe to log.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.token.as_bytes());
        let digest = hasher.finalize();
        hex::encode(&digest[..FINGERPRINT_BYTES])
    }
}

impl std::fmt::Debug for BearerCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerCredential")
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}
