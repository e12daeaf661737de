//! Request extractors that authenticate the caller.
//!
//! Handlers declare the role they accept by taking one of these extractors:
//! [`AuthenticatedUser`], [`AuthenticatedDevice`], or [`VerifiedIdentity`]
//! for routes that only need a verified subject (record creation). Every
//! failure before the handler runs becomes a 401 except store outages, which
//! keep their own status.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{BearerCredential, DevicePrincipal, Error, ExternalUid, UserPrincipal};

use super::state::HttpState;

/// Caller authenticated as a user.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub UserPrincipal);

/// Caller authenticated as a device.
#[derive(Debug, Clone)]
pub struct AuthenticatedDevice(pub DevicePrincipal);

/// Caller whose credential verified, whether or not a local record exists.
#[derive(Debug, Clone)]
pub struct VerifiedIdentity(pub ExternalUid);

fn bearer_credential(req: &HttpRequest) -> Result<BearerCredential, Error> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .map(|value| value.to_str().unwrap_or_default());
    BearerCredential::from_header(header).map_err(|reason| {
        debug!(%reason, path = %req.path(), "rejecting request without usable bearer credential");
        Error::unauthorized("missing or malformed bearer credential")
    })
}

fn http_state(req: &HttpRequest) -> Result<web::Data<HttpState>, Error> {
    req.app_data::<web::Data<HttpState>>()
        .cloned()
        .ok_or_else(|| Error::internal("HTTP state is not registered"))
}

fn prepare(req: &HttpRequest) -> Result<(web::Data<HttpState>, BearerCredential), Error> {
    let state = http_state(req)?;
    let credential = bearer_credential(req)?;
    Ok((state, credential))
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let prepared = prepare(req);
        Box::pin(async move {
            let (state, credential) = prepared?;
            state.resolver.authenticate_user(&credential).await.map(Self)
        })
    }
}

impl FromRequest for AuthenticatedDevice {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let prepared = prepare(req);
        Box::pin(async move {
            let (state, credential) = prepared?;
            state
                .resolver
                .authenticate_device(&credential)
                .await
                .map(Self)
        })
    }
}

impl FromRequest for VerifiedIdentity {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let prepared = prepare(req);
        Box::pin(async move {
            let (state, credential) = prepared?;
            state.resolver.verify(&credential).await.map(Self)
        })
    }
}
