//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use chromascape_backend::domain::ports::IdentityVerifier;
use chromascape_backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) verifier: Arc<dyn IdentityVerifier>,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a configuration that verifies credentials with `verifier`
    /// and keeps records in memory until a pool is attached.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, verifier: Arc<dyn IdentityVerifier>) -> Self {
        Self {
            bind_addr,
            verifier,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, every repository port is served by its Diesel adapter.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "Exercised by server construction tests")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
