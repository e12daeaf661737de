//! Public pattern lookup.
//!
//! ```text
//! GET /api/pattern/{pattern_id}
//! ```

use actix_web::{get, web};

use crate::domain::{Error, Pattern, PatternId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, IdInput, parse_record_id};

const PATTERN_ID: FieldName = FieldName::new("pattern_id");

/// Fetch any pattern by id without authentication.
///
/// An unknown id yields `null` with status 200.
#[utoipa::path(
    get,
    path = "/api/pattern/{pattern_id}",
    params(("pattern_id" = String, Path, description = "Decimal pattern id")),
    responses(
        (status = 200, description = "Pattern, or null when absent", body = Pattern),
        (status = 400, description = "Invalid id", body = Error)
    ),
    tags = ["patterns"],
    operation_id = "getPattern",
    security([])
)]
#[get("/pattern/{pattern_id}")]
pub async fn get_pattern(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Option<Pattern>>> {
    let id: PatternId = parse_record_id(Some(IdInput::Text(path.into_inner())), PATTERN_ID)?;
    let pattern = state.patterns.fetch_public(id).await?;
    Ok(web::Json(pattern))
}
