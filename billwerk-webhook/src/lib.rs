//! Receive Billwerk (Reepay) webhooks.
//!
//! A [`WebhookEndpoint`](endpoint::WebhookEndpoint) parses a delivery, checks
//! its HMAC signature and hands it to the handler registered for its
//! [`EventType`](event::EventType) in a [`Dispatcher`](dispatcher::Dispatcher).
//! Deliveries of unhandled types are acknowledged.
//!
//! ```no_run
//! use axum::{Router, routing::post};
//! use billwerk_webhook::{
//!     axum::webhook, dispatcher::Dispatcher, endpoint::WebhookEndpoint, event::EventType,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let endpoint = WebhookEndpoint::builder()
//!     .secret("webhook-secret")
//!     .dispatcher(Dispatcher::new().on(EventType::InvoiceSettled, |event| async move {
//!         println!("invoice {:?} settled", event.invoice);
//!         Ok(())
//!     }))
//!     .build();
//!
//! let app = Router::new()
//!     .route("/billwerk/webhook", post(webhook))
//!     .with_state(endpoint);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod dispatcher;
pub mod endpoint;
pub mod errors;
pub mod event;
pub mod signature;

#[cfg(feature = "axum")]
pub mod axum;
