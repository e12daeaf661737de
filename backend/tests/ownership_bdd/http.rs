//! HTTP helpers issuing bearer-authenticated JSON requests.

use actix_web::http::{Method, header};
use awc::Client;
use serde_json::Value;

use crate::harness::{SharedWorld, with_world_async};

pub(crate) struct JsonRequest<'a> {
    pub(crate) token: Option<&'a str>,
    pub(crate) method: Method,
    pub(crate) path: &'a str,
    pub(crate) payload: Option<Value>,
}

pub(crate) fn perform_json_request(world: &SharedWorld, spec: JsonRequest<'_>) {
    let authorization = spec.token.map(|token| format!("Bearer {token}"));
    let (status, body) = with_world_async(world, |base_url| async move {
        let mut request =
            Client::default().request(spec.method, format!("{base_url}{}", spec.path));
        if let Some(value) = authorization {
            request = request.insert_header((header::AUTHORIZATION, value));
        }
        let mut response = match spec.payload {
            Some(payload) => request.send_json(&payload).await.expect("json request"),
            None => request.send().await.expect("request"),
        };
        let status = response.status().as_u16();
        let body = response.body().await.expect("body");
        let json: Value = serde_json::from_slice(&body).expect("json body");
        (status, json)
    });

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.last_body = Some(body);
}
