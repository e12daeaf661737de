//! Port abstraction for identity provider token verification.
use async_trait::async_trait;

use crate::domain::{BearerCredential, ExternalUid};

use super::define_port_error;

define_port_error! {
    /// Reasons a credential could not be verified.
    ///
    /// Callers collapse all of these into a single unauthorized outcome; the
    /// variants exist for logging.
    pub enum IdentityVerificationError {
        /// The provider looked at the token and refused it.
        Rejected { message: String } => "identity token rejected: {message}" as unauthorized,
        /// The provider could not be reached or answered with a server error.
        Unavailable { message: String } => "identity provider unavailable: {message}" as unauthorized,
        /// The provider answered with a payload that could not be interpreted.
        Malformed { message: String } => "identity provider response malformed: {message}" as unauthorized,
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Return the identity provider subject the credential was issued to.
    async fn verify(
        &self,
        credential: &BearerCredential,
    ) -> Result<ExternalUid, IdentityVerificationError>;
}
