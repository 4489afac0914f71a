use std::{collections::HashMap, pin::Pin, sync::Arc};

use crate::{
    errors::{HandlerError, WebhookError},
    event::{EventType, WebhookEvent},
};

pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<(), HandlerError>> + Send>>;

type Handler = Arc<dyn Fn(WebhookEvent) -> HandlerFuture + Send + Sync>;

/// Routes webhook events to the handler registered for their type.
///
/// ```
/// use billwerk_webhook::{dispatcher::Dispatcher, event::EventType};
///
/// let dispatcher = Dispatcher::new().on(EventType::InvoiceSettled, |event| async move {
///     println!("invoice {:?} settled", event.invoice);
///     Ok(())
/// });
/// assert!(dispatcher.handles(&EventType::InvoiceSettled));
/// ```
#[derive(Clone, Default)]
pub struct Dispatcher {
    handlers: HashMap<EventType, Handler>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set()
            .entries(self.handlers.keys().map(EventType::as_str))
            .finish()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `event_type`, replacing any previous one.
    pub fn on<F, Fut>(mut self, event_type: EventType, handler: F) -> Self
    where
        F: Fn(WebhookEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
    {
        let handler: Handler =
            Arc::new(move |event: WebhookEvent| -> HandlerFuture { Box::pin(handler(event)) });
        self.handlers.insert(event_type, handler);
        self
    }

    pub fn handles(&self, event_type: &EventType) -> bool {
        self.handlers.contains_key(event_type)
    }

    /// Run the handler for the event.
    ///
    /// Returns `Ok(false)` when no handler is registered for the event type.
    pub async fn dispatch(&self, event: WebhookEvent) -> Result<bool, WebhookError> {
        let Some(handler) = self.handlers.get(&event.event_type) else {
            #[cfg(feature = "tracing")]
            tracing::debug!(event_type = %event.event_type, "Ignoring unhandled webhook event");
            return Ok(false);
        };

        let event_type = event.event_type.to_string();
        handler(event)
            .await
            .map(|_| true)
            .map_err(|reason| WebhookError::Handler { event_type, reason })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn event(event_type: EventType) -> WebhookEvent {
        WebhookEvent {
            id: "d1".to_string(),
            event_id: "e1".to_string(),
            event_type,
            timestamp: "2026-10-19T10:00:00.000Z".to_string(),
            signature: String::new(),
            customer: Some("cust-1".to_string()),
            invoice: None,
            subscription: None,
            transaction: None,
            payment_method: None,
        }
    }

    #[tokio::test]
    async fn runs_the_registered_handler() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        let dispatcher = Dispatcher::new().on(EventType::CustomerCreated, move |event| {
            let counter = counter.clone();
            async move {
                assert_eq!(event.customer.as_deref(), Some("cust-1"));
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });

        let handled = dispatcher
            .dispatch(event(EventType::CustomerCreated))
            .await
            .unwrap();

        assert!(handled);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn ignores_unregistered_types() {
        let dispatcher = Dispatcher::new();

        let handled = dispatcher
            .dispatch(event(EventType::Other("invoice_dunning".to_string())))
            .await
            .unwrap();

        assert!(!handled);
    }

    #[tokio::test]
    async fn handler_errors_name_the_event_type() {
        let dispatcher = Dispatcher::new().on(EventType::InvoiceFailed, |_| async {
            Err::<(), HandlerError>("order not found".into())
        });

        let err = dispatcher
            .dispatch(event(EventType::InvoiceFailed))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Webhook handler for invoice_failed failed: order not found"
        );
    }
}
