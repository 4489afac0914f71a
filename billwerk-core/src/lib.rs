//! Billwerk core library.
//!
//! This library provides the shared types for Billwerk gateway integrations:
//! amounts and currencies, provider request payloads and resource objects,
//! and the [`provider::Provider`] trait that concrete clients implement.

pub mod core;
pub mod errors;
pub mod provider;
pub mod transport;
pub mod types;
