//! User API handlers.
//!
//! ```text
//! GET    /api/user
//! POST   /api/user
//! GET    /api/user/devices
//! GET    /api/user/patterns
//! POST   /api/user/pattern            {"content":"AB"}
//! DELETE /api/user/pattern            {"pattern_id":"3"}
//! POST   /api/user/device_pattern     {"device_id":"12","pattern_id":"3"}
//! GET    /api/user/remove_device      {"device_id":"12"}
//! POST   /api/user/pattern_schedule   {"device_id":"12","pattern_id":"3","scheduled_time":"2025-06-01T18:30:00Z"}
//! DELETE /api/user/pattern_schedule   {"scheduled_pattern_id":"5"}
//! ```
//!
//! Every route except `POST /api/user` requires a credential that resolves to
//! a registered user. Bodies are extracted as `Result` and only unwrapped once
//! the principal is resolved, so a rejected credential answers 401 whatever
//! the body holds.

use actix_web::{delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Device, DeviceId, Error, NewSchedule, Pattern, PatternContent, PatternId, ScheduleId,
    ScheduledPattern, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{AuthenticatedUser, VerifiedIdentity};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, IdInput, parse_record_id, parse_rfc3339_timestamp, require,
};

pub(crate) const SUCCESS: &str = "success";

const CONTENT: FieldName = FieldName::new("content");
const DEVICE_ID: FieldName = FieldName::new("device_id");
const PATTERN_ID: FieldName = FieldName::new("pattern_id");
const SCHEDULED_TIME: FieldName = FieldName::new("scheduled_time");
const SCHEDULED_PATTERN_ID: FieldName = FieldName::new("scheduled_pattern_id");

/// Body for `POST /api/user/pattern`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreatePatternRequest {
    #[schema(example = "AB")]
    pub content: Option<String>,
}

/// Body for `DELETE /api/user/pattern`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct DeletePatternRequest {
    pub pattern_id: Option<IdInput>,
}

/// Body for `POST /api/user/device_pattern`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct AssignPatternRequest {
    pub device_id: Option<IdInput>,
    pub pattern_id: Option<IdInput>,
}

/// Body for `GET /api/user/remove_device`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct RemoveDeviceRequest {
    pub device_id: Option<IdInput>,
}

/// Body for `POST /api/user/pattern_schedule`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateScheduleRequest {
    pub device_id: Option<IdInput>,
    pub pattern_id: Option<IdInput>,
    #[schema(example = "2025-06-01T18:30:00Z")]
    pub scheduled_time: Option<String>,
}

/// Body for `DELETE /api/user/pattern_schedule`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct DeleteScheduleRequest {
    pub scheduled_pattern_id: Option<IdInput>,
}

/// Number of devices a pattern assignment updated.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateCountResponse {
    pub count: u64,
}

impl TryFrom<CreateScheduleRequest> for NewSchedule {
    type Error = Error;

    fn try_from(value: CreateScheduleRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            device_id: parse_record_id(value.device_id, DEVICE_ID)?,
            pattern_id: parse_record_id(value.pattern_id, PATTERN_ID)?,
            scheduled_for: parse_rfc3339_timestamp(value.scheduled_time, SCHEDULED_TIME)?,
        })
    }
}

/// Fetch the authenticated user's profile.
#[utoipa::path(
    get,
    path = "/api/user",
    responses(
        (status = 200, description = "User profile", body = User),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Profile missing", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/user")]
pub async fn get_user(
    state: web::Data<HttpState>,
    AuthenticatedUser(principal): AuthenticatedUser,
) -> ApiResult<web::Json<User>> {
    let user = state.accounts.user_profile(&principal).await?;
    Ok(web::Json(user))
}

/// Register a user for the caller's verified subject.
#[utoipa::path(
    post,
    path = "/api/user",
    responses(
        (status = 200, description = "Created user", body = User),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 409, description = "User already exists", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    VerifiedIdentity(external_uid): VerifiedIdentity,
) -> ApiResult<web::Json<User>> {
    let user = state.accounts.create_user(&external_uid).await?;
    Ok(web::Json(user))
}

/// List devices paired to the caller.
#[utoipa::path(
    get,
    path = "/api/user/devices",
    responses(
        (status = 200, description = "Paired devices", body = [Device]),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUserDevices"
)]
#[get("/user/devices")]
pub async fn list_devices(
    state: web::Data<HttpState>,
    AuthenticatedUser(principal): AuthenticatedUser,
) -> ApiResult<web::Json<Vec<Device>>> {
    let devices = state.devices.list_devices(&principal).await?;
    Ok(web::Json(devices))
}

/// List patterns owned by the caller.
#[utoipa::path(
    get,
    path = "/api/user/patterns",
    responses(
        (status = 200, description = "Owned patterns", body = [Pattern]),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUserPatterns"
)]
#[get("/user/patterns")]
pub async fn list_patterns(
    state: web::Data<HttpState>,
    AuthenticatedUser(principal): AuthenticatedUser,
) -> ApiResult<web::Json<Vec<Pattern>>> {
    let patterns = state.patterns.list_patterns(&principal).await?;
    Ok(web::Json(patterns))
}

/// Store a new pattern owned by the caller.
#[utoipa::path(
    post,
    path = "/api/user/pattern",
    request_body = CreatePatternRequest,
    responses(
        (status = 200, description = "Created pattern", body = Pattern),
        (status = 400, description = "Missing content", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["users"],
    operation_id = "createPattern"
)]
#[post("/user/pattern")]
pub async fn create_pattern(
    state: web::Data<HttpState>,
    AuthenticatedUser(principal): AuthenticatedUser,
    payload: Result<web::Json<CreatePatternRequest>, actix_web::Error>,
) -> ApiResult<web::Json<Pattern>> {
    let content = require(payload?.into_inner().content, CONTENT)?;
    let pattern = state
        .patterns
        .create_pattern(&principal, PatternContent::new(content))
        .await?;
    Ok(web::Json(pattern))
}

/// Delete one of the caller's patterns.
#[utoipa::path(
    delete,
    path = "/api/user/pattern",
    request_body = DeletePatternRequest,
    responses(
        (status = 200, description = "Deleted", body = String, example = json!("success")),
        (status = 400, description = "Invalid id, or pattern not found or not owned", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["users"],
    operation_id = "deletePattern"
)]
#[delete("/user/pattern")]
pub async fn delete_pattern(
    state: web::Data<HttpState>,
    AuthenticatedUser(principal): AuthenticatedUser,
    payload: Result<web::Json<DeletePatternRequest>, actix_web::Error>,
) -> ApiResult<web::Json<&'static str>> {
    let id: PatternId = parse_record_id(payload?.into_inner().pattern_id, PATTERN_ID)?;
    state.patterns.delete_pattern(&principal, id).await?;
    Ok(web::Json(SUCCESS))
}

/// Point one of the caller's devices at a pattern.
#[utoipa::path(
    post,
    path = "/api/user/device_pattern",
    request_body = AssignPatternRequest,
    responses(
        (status = 200, description = "Devices updated", body = UpdateCountResponse),
        (status = 400, description = "Invalid ids, unknown pattern, or device not found or not owned", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["users"],
    operation_id = "assignDevicePattern"
)]
#[post("/user/device_pattern")]
pub async fn assign_device_pattern(
    state: web::Data<HttpState>,
    AuthenticatedUser(principal): AuthenticatedUser,
    payload: Result<web::Json<AssignPatternRequest>, actix_web::Error>,
) -> ApiResult<web::Json<UpdateCountResponse>> {
    let AssignPatternRequest {
        device_id,
        pattern_id,
    } = payload?.into_inner();
    let device: DeviceId = parse_record_id(device_id, DEVICE_ID)?;
    let pattern: PatternId = parse_record_id(pattern_id, PATTERN_ID)?;
    let count = state
        .devices
        .assign_pattern(&principal, device, pattern)
        .await?;
    Ok(web::Json(UpdateCountResponse { count }))
}

/// Unpair one of the caller's devices.
///
/// Served as `GET` with a JSON body for compatibility with existing clients.
#[utoipa::path(
    get,
    path = "/api/user/remove_device",
    request_body = RemoveDeviceRequest,
    responses(
        (status = 200, description = "Unpaired", body = String, example = json!("success")),
        (status = 400, description = "Invalid id, or device not found or not owned", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["users"],
    operation_id = "removeDevice"
)]
#[get("/user/remove_device")]
pub async fn remove_device(
    state: web::Data<HttpState>,
    AuthenticatedUser(principal): AuthenticatedUser,
    payload: Result<web::Json<RemoveDeviceRequest>, actix_web::Error>,
) -> ApiResult<web::Json<&'static str>> {
    let device: DeviceId = parse_record_id(payload?.into_inner().device_id, DEVICE_ID)?;
    state.devices.unpair(&principal, device).await?;
    Ok(web::Json(SUCCESS))
}

/// Schedule a pattern on one of the caller's devices.
#[utoipa::path(
    post,
    path = "/api/user/pattern_schedule",
    request_body = CreateScheduleRequest,
    responses(
        (status = 200, description = "Created schedule", body = ScheduledPattern),
        (status = 400, description = "Invalid input, or device or pattern not found or not owned", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["users"],
    operation_id = "createPatternSchedule"
)]
#[post("/user/pattern_schedule")]
pub async fn create_pattern_schedule(
    state: web::Data<HttpState>,
    AuthenticatedUser(principal): AuthenticatedUser,
    payload: Result<web::Json<CreateScheduleRequest>, actix_web::Error>,
) -> ApiResult<web::Json<ScheduledPattern>> {
    let schedule = NewSchedule::try_from(payload?.into_inner())?;
    let created = state
        .schedules
        .create_schedule(&principal, schedule)
        .await?;
    Ok(web::Json(created))
}

/// Delete a schedule on one of the caller's devices.
#[utoipa::path(
    delete,
    path = "/api/user/pattern_schedule",
    request_body = DeleteScheduleRequest,
    responses(
        (status = 200, description = "Deleted", body = String, example = json!("success")),
        (status = 400, description = "Invalid id, or schedule not found or not owned", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["users"],
    operation_id = "deletePatternSchedule"
)]
#[delete("/user/pattern_schedule")]
pub async fn delete_pattern_schedule(
    state: web::Data<HttpState>,
    AuthenticatedUser(principal): AuthenticatedUser,
    payload: Result<web::Json<DeleteScheduleRequest>, actix_web::Error>,
) -> ApiResult<web::Json<&'static str>> {
    let id: ScheduleId =
        parse_record_id(payload?.into_inner().scheduled_pattern_id, SCHEDULED_PATTERN_ID)?;
    state.schedules.delete_schedule(&principal, id).await?;
    Ok(web::Json(SUCCESS))
}
