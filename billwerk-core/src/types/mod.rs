//! Core types used across the Billwerk gateway crates.

mod amount;
mod common;
mod currency;

pub use amount::*;
pub use common::*;
pub use currency::*;
