//! Test helpers for inbound HTTP components.

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use async_trait::async_trait;

use crate::domain::ports::{
    DeviceRepository, IdentityVerificationError, IdentityVerifier, UserRepository,
};
use crate::domain::{BearerCredential, DeviceId, ExternalUid, UserId};
use crate::outbound::identity::StaticTokenVerifier;
use crate::outbound::memory::InMemoryRecordStore;

use super::state::{HttpState, HttpStatePorts};

pub const USER_TOKEN: &str = "user-token";
pub const OTHER_USER_TOKEN: &str = "other-user-token";
pub const DEVICE_TOKEN: &str = "device-token";

/// HTTP state over an in-memory store with a fixed token table.
///
/// `seeded` registers a user for [`USER_TOKEN`], another for
/// [`OTHER_USER_TOKEN`] and an unpaired device for [`DEVICE_TOKEN`].
pub struct TestBackend {
    pub store: InMemoryRecordStore,
    state: web::Data<HttpState>,
    user_id: Option<UserId>,
    other_user_id: Option<UserId>,
    device_id: Option<DeviceId>,
}

fn uid(raw: &str) -> ExternalUid {
    ExternalUid::new(raw).expect("valid test uid")
}

/// Verifier that refuses every token after a delay, keeping the
/// authentication extractor pending while sibling extractors complete.
pub struct SlowRejectingVerifier {
    delay: Duration,
}

impl SlowRejectingVerifier {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl IdentityVerifier for SlowRejectingVerifier {
    async fn verify(
        &self,
        _credential: &BearerCredential,
    ) -> Result<ExternalUid, IdentityVerificationError> {
        tokio::time::sleep(self.delay).await;
        Err(IdentityVerificationError::rejected("token expired"))
    }
}

impl TestBackend {
    pub fn empty() -> Self {
        let verifier = StaticTokenVerifier::from_entries([
            format!("{USER_TOKEN}=user-uid"),
            format!("{OTHER_USER_TOKEN}=other-user-uid"),
            format!("{DEVICE_TOKEN}=device-uid"),
        ])
        .expect("valid token table");
        Self::with_verifier(Arc::new(verifier))
    }

    /// Empty store behind an arbitrary verifier.
    pub fn with_verifier(verifier: Arc<dyn IdentityVerifier>) -> Self {
        let store = InMemoryRecordStore::default();
        let state = HttpState::new(HttpStatePorts {
            verifier,
            users: Arc::new(store.clone()),
            devices: Arc::new(store.clone()),
            patterns: Arc::new(store.clone()),
            schedules: Arc::new(store.clone()),
        });
        Self {
            store,
            state: web::Data::new(state),
            user_id: None,
            other_user_id: None,
            device_id: None,
        }
    }

    pub async fn seeded() -> Self {
        let mut backend = Self::empty();
        let user = UserRepository::insert(&backend.store, &uid("user-uid"))
            .await
            .expect("seed user");
        let other = UserRepository::insert(&backend.store, &uid("other-user-uid"))
            .await
            .expect("seed other user");
        let device = DeviceRepository::insert(&backend.store, &uid("device-uid"))
            .await
            .expect("seed device");
        backend.user_id = Some(user.id);
        backend.other_user_id = Some(other.id);
        backend.device_id = Some(device.id);
        backend
    }

    pub fn data(&self) -> web::Data<HttpState> {
        self.state.clone()
    }

    pub fn user_id(&self) -> UserId {
        self.user_id.expect("backend was seeded")
    }

    pub fn other_user_id(&self) -> UserId {
        self.other_user_id.expect("backend was seeded")
    }

    pub fn device_id(&self) -> DeviceId {
        self.device_id.expect("backend was seeded")
    }
}

pub fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (
        actix_web::http::header::AUTHORIZATION,
        format!("Bearer {token}"),
    )
}
