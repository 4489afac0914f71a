//! # Billwerk Gateway
//!
//! A typed gateway for the [Billwerk](https://www.billwerk.plus) payment platform
//! (formerly Reepay): hosted checkout, server-side charges, refunds, saved cards,
//! customers and subscriptions.
//!
//! Every operation follows the same three steps:
//!
//! 1. Build the operation parameters with their builder.
//! 2. Get a pending request from the [`Gateway`](gateway::Gateway). Nothing is sent yet,
//!    [`data()`](message::Request::data) shows the payload that would be sent.
//! 3. [`send()`](message::Request::send) it. Parameter errors are returned as `Err` before
//!    any I/O. A failed provider call is **not** an `Err`, it is reported by the response
//!    through [`is_successful()`](message::Response::is_successful) and
//!    [`message()`](message::Response::message).
//!
//! ## Related Crates
//!
//! - **`billwerk-core`**: the shared amount, currency, payload and provider types, re-exported
//!   here as [`types`], [`transport`], [`provider`] and [`errors`].
//! - **`billwerk-webhook`**: receiving and verifying Billwerk webhook events.
//!
//! ## Hosted checkout
//!
//! ```no_run
//! use billwerk_gateway::{
//!     config::GatewayConfig,
//!     gateway::Gateway,
//!     message::{PurchaseParams, Request, Response},
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = Gateway::http(GatewayConfig::from_env()?)?;
//!
//! let response = gateway
//!     .purchase(
//!         PurchaseParams::builder()
//!             .amount("10.00")
//!             .currency("EUR")
//!             .transaction_id("order-42")
//!             .return_url("https://shop.example.com/return".parse()?)
//!             .build(),
//!     )
//!     .send()
//!     .await?;
//!
//! if response.is_redirect() {
//!     println!("send the customer to {:?}", response.redirect_url());
//! } else {
//!     println!("checkout failed: {:?}", response.message());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Bring your own provider
//!
//! The gateway talks to Billwerk only through the [`provider::Provider`] trait. The default
//! [`provider_client::HttpProvider`] (feature `http-client`) calls the REST API with `reqwest`,
//! any other implementation can be passed to [`Gateway::new`](gateway::Gateway::new), e.g.
//! an in-memory provider in tests.

pub mod config;
pub mod gateway;
pub mod message;

#[cfg(feature = "http-client")]
pub mod provider_client;

pub mod core {
    pub use billwerk_core::core::*;
}

pub mod errors {
    pub use billwerk_core::errors::*;
}

pub mod provider {
    pub use billwerk_core::provider::*;
}

pub mod transport {
    pub use billwerk_core::transport::*;
}

pub mod types {
    pub use billwerk_core::types::*;
}
