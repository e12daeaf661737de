//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api` route, the health probes, the entity and
//! request schemas, and the bearer token security scheme. Swagger UI serves it
//! in debug builds.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Device, Error, ErrorCode, Pattern, ScheduledPattern, User};
use crate::inbound::http::devices::PairDeviceRequest;
use crate::inbound::http::health::{ReadinessResponse, StoreBackend};
use crate::inbound::http::users::{
    AssignPatternRequest, CreatePatternRequest, CreateScheduleRequest, DeletePatternRequest,
    DeleteScheduleRequest, RemoveDeviceRequest, UpdateCountResponse,
};
use crate::inbound::http::validation::IdInput;

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let mut scheme = Http::new(HttpAuthScheme::Bearer);
        scheme.description = Some("Identity provider ID token.".to_owned());
        components.add_security_scheme("BearerAuth", SecurityScheme::Http(scheme));
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Chromascape backend API",
        description = "Users, devices, light patterns and schedules, scoped by ownership."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_devices,
        crate::inbound::http::users::list_patterns,
        crate::inbound::http::users::create_pattern,
        crate::inbound::http::users::delete_pattern,
        crate::inbound::http::users::assign_device_pattern,
        crate::inbound::http::users::remove_device,
        crate::inbound::http::users::create_pattern_schedule,
        crate::inbound::http::users::delete_pattern_schedule,
        crate::inbound::http::devices::get_device,
        crate::inbound::http::devices::create_device,
        crate::inbound::http::devices::pair_device,
        crate::inbound::http::patterns::get_pattern,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        Device,
        Pattern,
        ScheduledPattern,
        Error,
        ErrorCode,
        IdInput,
        CreatePatternRequest,
        DeletePatternRequest,
        AssignPatternRequest,
        RemoveDeviceRequest,
        CreateScheduleRequest,
        DeleteScheduleRequest,
        UpdateCountResponse,
        PairDeviceRequest,
        ReadinessResponse,
        StoreBackend,
    )),
    tags(
        (name = "users", description = "Operations on the caller's user record and owned resources"),
        (name = "devices", description = "Operations performed by a device"),
        (name = "patterns", description = "Public pattern lookup"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
