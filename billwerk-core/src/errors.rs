/// Error types for pre-flight request handling.
///
/// These are raised before any provider call is made. Failures of the provider
/// call itself are never reported through this type, see
/// [`Outcome`](crate::provider::Outcome).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required parameter is absent or empty.
    #[error("The {0} parameter is required")]
    MissingParameter(&'static str),

    /// A completion call could not resolve the provider resource id.
    #[error("Missing {0} reference")]
    MissingReference(&'static str),

    /// The amount could not be converted into minor units.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// The currency is not a three letter ISO 4217 code.
    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),

    /// A configuration value could not be interpreted.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization/deserialization errors.
    #[error("Serde JSON error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    /// URL parse errors.
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),
}

/// A specialized `Result` type for Billwerk core operations.
pub type Result<T> = std::result::Result<T, Error>;
