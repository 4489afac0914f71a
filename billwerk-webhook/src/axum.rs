use axum::{Json, body::Bytes, extract::State, http::HeaderMap};
use serde_json::{Value, json};

use crate::{
    endpoint::{SIGNATURE_HEADER, WebhookEndpoint},
    errors::ErrorResponse,
};

/// Axum handler acknowledging Billwerk deliveries.
///
/// Mount with `post(webhook)` on a router whose state is a [`WebhookEndpoint`].
pub async fn webhook(
    State(endpoint): State<WebhookEndpoint>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ErrorResponse> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());
    endpoint.handle_with_signature(&body, signature).await?;
    Ok(Json(json!({ "success": true })))
}
