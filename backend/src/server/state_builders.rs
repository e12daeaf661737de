//! Builders for the identity verifier and the repository-backed HTTP state.

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, Result, bail};
use reqwest::Url;
use tracing::{info, warn};

use chromascape_backend::domain::ports::IdentityVerifier;
use chromascape_backend::inbound::http::health::StoreBackend;
use chromascape_backend::inbound::http::state::{HttpState, HttpStatePorts};
use chromascape_backend::outbound::identity::{
    DEFAULT_IDENTITY_BASE_URL, FirebaseIdentityVerifier, StaticTokenVerifier,
};
use chromascape_backend::outbound::memory::InMemoryRecordStore;
use chromascape_backend::outbound::persistence::{
    DbPool, DieselDeviceRepository, DieselPatternRepository, DieselScheduleRepository,
    DieselUserRepository,
};

use super::ServerConfig;
use super::settings::AppSettings;

/// Select the identity verifier from settings.
///
/// An API key selects the identity provider lookup. Without one the static
/// token table is used, which must then be non-empty.
pub fn build_identity_verifier(settings: &AppSettings) -> Result<Arc<dyn IdentityVerifier>> {
    if let Some(api_key) = settings.firebase_api_key() {
        let raw_base = settings
            .identity_base_url()
            .unwrap_or(DEFAULT_IDENTITY_BASE_URL);
        let base_url =
            Url::parse(raw_base).wrap_err_with(|| format!("invalid identity base URL {raw_base}"))?;
        let verifier =
            FirebaseIdentityVerifier::new(&base_url, api_key, settings.identity_timeout())
                .wrap_err("failed to build identity provider client")?;
        info!(base_url = %base_url, "verifying credentials with the identity provider");
        return Ok(Arc::new(verifier));
    }

    let verifier = StaticTokenVerifier::from_entries(settings.static_token_entries())
        .wrap_err("invalid static token table")?;
    if verifier.is_empty() {
        bail!("no identity provider API key and no static tokens configured");
    }
    warn!(
        tokens = verifier.len(),
        "identity provider not configured; accepting static tokens"
    );
    Ok(Arc::new(verifier))
}

fn diesel_ports(pool: &DbPool, verifier: Arc<dyn IdentityVerifier>) -> HttpStatePorts {
    HttpStatePorts {
        verifier,
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        devices: Arc::new(DieselDeviceRepository::new(pool.clone())),
        patterns: Arc::new(DieselPatternRepository::new(pool.clone())),
        schedules: Arc::new(DieselScheduleRepository::new(pool.clone())),
    }
}

fn memory_ports(verifier: Arc<dyn IdentityVerifier>) -> HttpStatePorts {
    let store = InMemoryRecordStore::default();
    HttpStatePorts {
        verifier,
        users: Arc::new(store.clone()),
        devices: Arc::new(store.clone()),
        patterns: Arc::new(store.clone()),
        schedules: Arc::new(store),
    }
}

/// Build the shared HTTP state, using Diesel adapters when a pool is
/// configured and a process-local store otherwise.
pub fn build_http_state(config: &ServerConfig) -> (web::Data<HttpState>, StoreBackend) {
    let verifier = config.verifier.clone();
    let (ports, backend) = match &config.db_pool {
        Some(pool) => (diesel_ports(pool, verifier), StoreBackend::Postgres),
        None => {
            warn!("no database configured; records are held in memory");
            (memory_ports(verifier), StoreBackend::Memory)
        }
    };
    (web::Data::new(HttpState::new(ports)), backend)
}
