//! Backend entry-point: loads settings, prepares the record store and serves
//! the REST API with OpenAPI docs in debug builds.

mod server;

use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use chromascape_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{AppSettings, ServerConfig, build_identity_verifier, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    let bind_addr = settings.bind_addr()?;
    let verifier = build_identity_verifier(&settings)?;
    let mut config = ServerConfig::new(bind_addr, verifier);

    if let Some(database_url) = settings.database_url() {
        let url = database_url.to_owned();
        tokio::task::spawn_blocking(move || run_pending_migrations(&url))
            .await
            .wrap_err("migration task panicked")?
            .wrap_err("failed to apply migrations")?;
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
        )
        .await
        .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    let (server, _health_state) = create_server(config).wrap_err("failed to bind server")?;
    info!(%bind_addr, "server listening");
    server.await.wrap_err("server terminated with an error")
}
