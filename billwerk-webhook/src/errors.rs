use http::StatusCode;
use serde::Serialize;

/// Error type returned by webhook handlers.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("Malformed webhook payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Invalid webhook signature")]
    InvalidSignature,
    #[error("Webhook handler for {event_type} failed: {reason}")]
    Handler {
        event_type: String,
        reason: HandlerError,
    },
}

impl WebhookError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebhookError::Malformed(_) => StatusCode::BAD_REQUEST,
            WebhookError::InvalidSignature => StatusCode::UNAUTHORIZED,
            WebhookError::Handler { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Represents an error response to send back to Billwerk.
///
/// Any non-2xx status makes Billwerk retry the delivery later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub status: StatusCode,
    pub error: String,
}

/// JSON body of an [`ErrorResponse`].
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'a str,
}

impl ErrorResponse {
    pub fn body(&self) -> ErrorBody<'_> {
        ErrorBody { error: &self.error }
    }
}

impl From<WebhookError> for ErrorResponse {
    fn from(err: WebhookError) -> Self {
        let error = match &err {
            WebhookError::Malformed(_) => "Malformed webhook payload",
            WebhookError::InvalidSignature => "Invalid signature",
            // Handler details stay in the logs.
            WebhookError::Handler { .. } => "Webhook processing failed",
        };
        ErrorResponse {
            status: err.status(),
            error: error.to_string(),
        }
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for ErrorResponse {
    fn into_response(self) -> axum::response::Response {
        (self.status, axum::extract::Json(self.body())).into_response()
    }
}
