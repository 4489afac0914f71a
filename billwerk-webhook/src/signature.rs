//! Billwerk webhook signatures.
//!
//! Every delivery carries `signature = hex(HMAC-SHA256(secret, timestamp + id))`
//! where `secret` is the webhook secret of the Billwerk account.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{errors::WebhookError, event::WebhookEvent};

type HmacSha256 = Hmac<Sha256>;

fn mac(secret: &str, timestamp: &str, id: &str) -> Result<HmacSha256, WebhookError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| WebhookError::InvalidSignature)?;
    mac.update(timestamp.as_bytes());
    mac.update(id.as_bytes());
    Ok(mac)
}

/// Compute the signature Billwerk sends for a delivery.
pub fn sign(secret: &str, timestamp: &str, id: &str) -> Result<String, WebhookError> {
    Ok(hex::encode(mac(secret, timestamp, id)?.finalize().into_bytes()))
}

/// Check the signature of an event in constant time.
pub fn verify_signature(secret: &str, event: &WebhookEvent) -> Result<(), WebhookError> {
    let expected =
        hex::decode(event.signature.trim()).map_err(|_| WebhookError::InvalidSignature)?;

    mac(secret, &event.timestamp, &event.id)?
        .verify_slice(&expected)
        .map_err(|_| WebhookError::InvalidSignature)
}
