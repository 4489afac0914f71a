use bon::Builder;

use crate::{
    dispatcher::Dispatcher,
    errors::{ErrorResponse, WebhookError},
    event::WebhookEvent,
    signature::verify_signature,
};

/// Header carrying the delivery signature, as an alternative to the body field.
pub const SIGNATURE_HEADER: &str = "reepay-signature";

/// Receives Billwerk webhook deliveries.
///
/// Signatures are only checked when a secret is configured.
#[derive(Builder, Clone)]
pub struct WebhookEndpoint {
    /// Webhook secret of the Billwerk account.
    #[builder(into)]
    pub secret: Option<String>,
    #[builder(default)]
    pub dispatcher: Dispatcher,
}

impl std::fmt::Debug for WebhookEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookEndpoint")
            .field("secret", &self.secret.as_ref().map(|_| "***"))
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}

impl WebhookEndpoint {
    /// Parse a delivery body and check its signature.
    pub fn parse(&self, body: &[u8]) -> Result<WebhookEvent, WebhookError> {
        self.parse_with_signature(body, None)
    }

    /// Like [`parse`](Self::parse), with the signature taken from the
    /// `Reepay-Signature` header when one was sent.
    pub fn parse_with_signature(
        &self,
        body: &[u8],
        signature: Option<&str>,
    ) -> Result<WebhookEvent, WebhookError> {
        let mut event: WebhookEvent = serde_json::from_slice(body)?;
        if let Some(signature) = signature.map(str::trim).filter(|s| !s.is_empty()) {
            event.signature = signature.to_string();
        }
        if let Some(secret) = &self.secret {
            verify_signature(secret, &event)?;
        }
        Ok(event)
    }

    /// Parse, verify and dispatch a delivery body.
    pub async fn handle(&self, body: &[u8]) -> Result<(), ErrorResponse> {
        self.handle_with_signature(body, None).await
    }

    pub async fn handle_with_signature(
        &self,
        body: &[u8],
        signature: Option<&str>,
    ) -> Result<(), ErrorResponse> {
        self.process(body, signature).await.map_err(|err| {
            #[cfg(feature = "tracing")]
            match &err {
                WebhookError::Handler { .. } => tracing::error!("Billwerk webhook error: {err}"),
                _ => tracing::warn!("Rejected Billwerk webhook: {err}"),
            }
            ErrorResponse::from(err)
        })
    }

    async fn process(&self, body: &[u8], signature: Option<&str>) -> Result<(), WebhookError> {
        let event = self.parse_with_signature(body, signature)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            id = %event.id,
            event_type = %event.event_type,
            "Received Billwerk webhook"
        );

        self.dispatcher.dispatch(event).await?;
        Ok(())
    }
}
