//! Device API handlers.
//!
//! ```text
//! GET   /api/device
//! POST  /api/device
//! PATCH /api/device/user   {"user_id":"7"}
//! ```

use actix_web::{get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Device, Error, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{AuthenticatedDevice, VerifiedIdentity};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::SUCCESS;
use crate::inbound::http::validation::{FieldName, IdInput, parse_record_id};

const USER_ID: FieldName = FieldName::new("user_id");

/// Body for `PATCH /api/device/user`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct PairDeviceRequest {
    pub user_id: Option<IdInput>,
}

/// Fetch the authenticated device's profile.
#[utoipa::path(
    get,
    path = "/api/device",
    responses(
        (status = 200, description = "Device profile", body = Device),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Profile missing", body = Error)
    ),
    tags = ["devices"],
    operation_id = "getDevice"
)]
#[get("/device")]
pub async fn get_device(
    state: web::Data<HttpState>,
    AuthenticatedDevice(principal): AuthenticatedDevice,
) -> ApiResult<web::Json<Device>> {
    let device = state.accounts.device_profile(&principal).await?;
    Ok(web::Json(device))
}

/// Register an unpaired device for the caller's verified subject.
#[utoipa::path(
    post,
    path = "/api/device",
    responses(
        (status = 200, description = "Created device", body = Device),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 409, description = "Device already exists", body = Error)
    ),
    tags = ["devices"],
    operation_id = "createDevice"
)]
#[post("/device")]
pub async fn create_device(
    state: web::Data<HttpState>,
    VerifiedIdentity(external_uid): VerifiedIdentity,
) -> ApiResult<web::Json<Device>> {
    let device = state.accounts.create_device(&external_uid).await?;
    Ok(web::Json(device))
}

/// Pair the calling device to a user. Fails once the device has an owner.
#[utoipa::path(
    patch,
    path = "/api/device/user",
    request_body = PairDeviceRequest,
    responses(
        (status = 200, description = "Paired", body = String, example = json!("success")),
        (status = 400, description = "Invalid or unknown user id, or device already paired", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["devices"],
    operation_id = "pairDevice"
)]
#[patch("/device/user")]
pub async fn pair_device(
    state: web::Data<HttpState>,
    AuthenticatedDevice(principal): AuthenticatedDevice,
    payload: Result<web::Json<PairDeviceRequest>, actix_web::Error>,
) -> ApiResult<web::Json<&'static str>> {
    let owner: UserId = parse_record_id(payload?.into_inner().user_id, USER_ID)?;
    state.devices.pair(&principal, owner).await?;
    Ok(web::Json(SUCCESS))
}
