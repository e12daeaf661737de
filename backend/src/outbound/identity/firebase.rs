//! Reqwest-backed Firebase Identity Toolkit verifier.
//!
//! This adapter owns transport details only: request serialisation, timeout and
//! HTTP error mapping, and decoding the account lookup into an external uid.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::dto::{LookupRequestDto, LookupResponseDto};
use crate::domain::ports::{IdentityVerificationError, IdentityVerifier};
use crate::domain::{BearerCredential, ExternalUid};

/// Public Identity Toolkit endpoint.
pub const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com";
const LOOKUP_PATH: &str = "v1/accounts:lookup";

/// Identity verifier that resolves ID tokens through `accounts:lookup`.
pub struct FirebaseIdentityVerifier {
    client: Client,
    lookup_url: String,
    api_key: Zeroizing<String>,
}

impl FirebaseIdentityVerifier {
    /// Build a verifier using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: &Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            lookup_url: lookup_url(base_url),
            api_key: Zeroizing::new(api_key.into()),
        })
    }
}

fn lookup_url(base_url: &Url) -> String {
    format!("{}/{LOOKUP_PATH}", base_url.as_str().trim_end_matches('/'))
}

#[async_trait]
impl IdentityVerifier for FirebaseIdentityVerifier {
    async fn verify(
        &self,
        credential: &BearerCredential,
    ) -> Result<ExternalUid, IdentityVerificationError> {
        let response = self
            .client
            .post(self.lookup_url.as_str())
            .query(&[("key", self.api_key.as_str())])
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&LookupRequestDto {
                id_token: credential.token(),
            })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            let error = map_status_error(status, body.as_ref());
            if matches!(error, IdentityVerificationError::Unavailable { .. }) {
                warn!(fingerprint = %credential.fingerprint(), %error, "identity lookup failed");
            } else {
                debug!(fingerprint = %credential.fingerprint(), %error, "identity lookup refused");
            }
            return Err(error);
        }

        parse_external_uid(body.as_ref())
    }
}

fn parse_external_uid(body: &[u8]) -> Result<ExternalUid, IdentityVerificationError> {
    let decoded: LookupResponseDto = serde_json::from_slice(body).map_err(|error| {
        IdentityVerificationError::malformed(format!("invalid lookup payload: {error}"))
    })?;
    let user = decoded
        .users
        .into_iter()
        .next()
        .ok_or_else(|| IdentityVerificationError::rejected("no account matches token"))?;
    ExternalUid::new(user.local_id)
        .map_err(|error| IdentityVerificationError::malformed(format!("invalid localId: {error}")))
}

fn map_transport_error(error: reqwest::Error) -> IdentityVerificationError {
    IdentityVerificationError::unavailable(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> IdentityVerificationError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS | StatusCode::REQUEST_TIMEOUT => {
            IdentityVerificationError::unavailable(message)
        }
        _ if status.is_client_error() => IdentityVerificationError::rejected(message),
        _ => IdentityVerificationError::unavailable(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 120;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
#[path = "firebase_tests.rs"]
mod tests;
