//! Server harness and shared world for the ownership scenarios.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. The `WorldFixture` ensures the server
//! is stopped even if a test panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

use chromascape_backend::Trace;
use chromascape_backend::domain::ports::{DeviceRepository, UserRepository};
use chromascape_backend::domain::{DeviceId, ExternalUid, PatternId, UserId};
use chromascape_backend::inbound::http::api_routes;
use chromascape_backend::inbound::http::error::json_error_handler;
use chromascape_backend::inbound::http::state::{HttpState, HttpStatePorts};
use chromascape_backend::outbound::identity::StaticTokenVerifier;
use chromascape_backend::outbound::memory::InMemoryRecordStore;

pub(crate) const ALICE_TOKEN: &str = "alice-token";
pub(crate) const BOB_TOKEN: &str = "bob-token";
pub(crate) const CAROL_TOKEN: &str = "carol-token";
pub(crate) const LAMP_TOKEN: &str = "lamp-token";

const TOKEN_TABLE: [&str; 4] = [
    "alice-token=alice-uid",
    "bob-token=bob-uid",
    "carol-token=carol-uid",
    "lamp-token=lamp-uid",
];

pub(crate) struct OwnershipWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) store: InMemoryRecordStore,
    pub(crate) alice: Option<UserId>,
    pub(crate) bob: Option<UserId>,
    pub(crate) lamp: Option<DeviceId>,
    pub(crate) alice_pattern: Option<PatternId>,
    pub(crate) bob_pattern: Option<PatternId>,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
}

impl OwnershipWorld {
    pub(crate) fn alice(&self) -> UserId {
        self.alice.expect("alice registered")
    }

    pub(crate) fn bob(&self) -> UserId {
        self.bob.expect("bob registered")
    }

    pub(crate) fn lamp(&self) -> DeviceId {
        self.lamp.expect("lamp registered")
    }
}

pub(crate) type SharedWorld = Rc<RefCell<OwnershipWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        shutdown(self.world.clone());
    }
}

pub(crate) fn shutdown(world: SharedWorld) {
    // `LocalSet` must be driven on the thread that owns it, so we lock the world
    // while calling `block_on`. The future must not try to lock the world.
    let ctx = world.borrow();
    let server = ctx.server.clone();
    ctx.local.block_on(&ctx.runtime, async move {
        server.stop(true).await;
    });
}

pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

/// Drive a store future on the world's runtime.
pub(crate) fn with_store<R, F>(
    world: &SharedWorld,
    operation: impl FnOnce(InMemoryRecordStore) -> F,
) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let store = ctx.store.clone();
    ctx.local.block_on(&ctx.runtime, operation(store))
}

fn uid(raw: &str) -> ExternalUid {
    ExternalUid::new(raw).expect("fixture uid")
}

/// Register alice and bob. Carol keeps a valid token but no user row.
pub(crate) fn register_users(world: &SharedWorld) {
    let (alice, bob) = with_store(world, |store| async move {
        let alice = UserRepository::insert(&store, &uid("alice-uid"))
            .await
            .expect("insert alice");
        let bob = UserRepository::insert(&store, &uid("bob-uid"))
            .await
            .expect("insert bob");
        (alice.id, bob.id)
    });
    let mut ctx = world.borrow_mut();
    ctx.alice = Some(alice);
    ctx.bob = Some(bob);
}

pub(crate) fn register_lamp(world: &SharedWorld) {
    let lamp = with_store(world, |store| async move {
        DeviceRepository::insert(&store, &uid("lamp-uid"))
            .await
            .expect("insert lamp")
    });
    world.borrow_mut().lamp = Some(lamp.id);
}

async fn spawn_ownership_server(http_state: HttpState) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;

    let http_data = web::Data::new(http_state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(http_data.clone())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .wrap(Trace)
            .configure(api_routes)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

fn create_runtime_and_local() -> (Runtime, LocalSet) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();

    (runtime, local)
}

pub(crate) fn world() -> WorldFixture {
    let (runtime, local) = create_runtime_and_local();
    let verifier = StaticTokenVerifier::from_entries(TOKEN_TABLE).expect("token table");
    let store = InMemoryRecordStore::default();
    let http_state = HttpState::new(HttpStatePorts {
        verifier: Arc::new(verifier),
        users: Arc::new(store.clone()),
        devices: Arc::new(store.clone()),
        patterns: Arc::new(store.clone()),
        schedules: Arc::new(store.clone()),
    });

    let (base_url, server) = local
        .block_on(&runtime, async { spawn_ownership_server(http_state).await })
        .expect("server should start");

    let world = Rc::new(RefCell::new(OwnershipWorld {
        runtime,
        local,
        base_url,
        server,
        store,
        alice: None,
        bob: None,
        lamp: None,
        alice_pattern: None,
        bob_pattern: None,
        last_status: None,
        last_body: None,
    }));

    WorldFixture { world }
}
