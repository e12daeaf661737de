//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    DeviceRepository, IdentityVerifier, PatternRepository, ScheduleRepository, UserRepository,
};
use crate::domain::{
    AccountService, DeviceService, PatternService, PrincipalResolver, ScheduleService,
};

/// Parameter object bundling the port implementations the services run on.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub verifier: Arc<dyn IdentityVerifier>,
    pub users: Arc<dyn UserRepository>,
    pub devices: Arc<dyn DeviceRepository>,
    pub patterns: Arc<dyn PatternRepository>,
    pub schedules: Arc<dyn ScheduleRepository>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub resolver: PrincipalResolver,
    pub accounts: AccountService,
    pub devices: DeviceService,
    pub patterns: PatternService,
    pub schedules: ScheduleService,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Wire the domain services from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use chromascape_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use chromascape_backend::outbound::identity::StaticTokenVerifier;
    /// use chromascape_backend::outbound::memory::InMemoryRecordStore;
    ///
    /// let store = InMemoryRecordStore::default();
    /// let state = HttpState::new(HttpStatePorts {
    ///     verifier: Arc::new(StaticTokenVerifier::default()),
    ///     users: Arc::new(store.clone()),
    ///     devices: Arc::new(store.clone()),
    ///     patterns: Arc::new(store.clone()),
    ///     schedules: Arc::new(store),
    /// });
    /// let _devices = state.devices.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            verifier,
            users,
            devices,
            patterns,
            schedules,
        } = ports;
        Self {
            resolver: PrincipalResolver::new(verifier, users.clone(), devices.clone()),
            accounts: AccountService::new(users, devices.clone()),
            devices: DeviceService::new(devices),
            patterns: PatternService::new(patterns),
            schedules: ScheduleService::new(schedules),
        }
    }
}
