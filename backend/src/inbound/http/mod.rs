//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod devices;
pub mod error;
pub mod health;
pub mod patterns;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api` route.
///
/// Callers supply `web::Data<HttpState>` and, optionally, a JSON config using
/// [`error::json_error_handler`].
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(users::get_user)
            .service(users::create_user)
            .service(users::list_devices)
            .service(users::list_patterns)
            .service(users::create_pattern)
            .service(users::delete_pattern)
            .service(users::assign_device_pattern)
            .service(users::remove_device)
            .service(users::create_pattern_schedule)
            .service(users::delete_pattern_schedule)
            .service(devices::get_device)
            .service(devices::create_device)
            .service(devices::pair_device)
            .service(patterns::get_pattern),
    );
}
