//! Wire shapes for the Identity Toolkit `accounts:lookup` call.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LookupRequestDto<'a> {
    pub id_token: &'a str,
}

/// Accounts matched by the token. Absent when the token is valid but the
/// account no longer exists.
#[derive(Debug, Deserialize)]
pub(super) struct LookupResponseDto {
    #[serde(default)]
    pub users: Vec<LookupUserDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LookupUserDto {
    pub local_id: String,
}
