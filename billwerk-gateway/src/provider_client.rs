//! A [`Provider`] calling the Billwerk REST and checkout APIs over HTTP.

use base64::{Engine, prelude::BASE64_STANDARD};
use http::{HeaderMap, HeaderValue, Method, header::AUTHORIZATION};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use url::Url;

use crate::{
    config::GatewayConfig,
    provider::{Provider, ProviderError},
    transport::{
        Charge, ChargeCancelRequest, ChargeCreateRequest, ChargeLookup, ChargeSessionRequest,
        ChargeSettleRequest, Customer, CustomerLookup, CustomerRequest, Invoice, InvoiceLookup,
        PaymentMethod, PaymentMethodInactivateRequest, RecurringSessionRequest, Refund,
        RefundCreateRequest, Session, Subscription, SubscriptionCancelRequest,
        SubscriptionCreateRequest, Transaction, TransactionLookup,
    },
    types::{AnyJson, MinorUnit},
};

/// Billwerk HTTP client.
///
/// Authenticates with HTTP Basic auth, the private API key as user name and an
/// empty password. Every call is a single attempt.
#[derive(Clone)]
pub struct HttpProvider {
    pub client: reqwest::Client,
    pub api_endpoint: Url,
    pub checkout_endpoint: Url,
}

impl std::fmt::Debug for HttpProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpProvider")
            .field("api_endpoint", &self.api_endpoint)
            .field("checkout_endpoint", &self.checkout_endpoint)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HttpProviderError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::errors::Error),
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("Invalid API key header: {0}")]
    InvalidApiKey(#[from] http::header::InvalidHeaderValue),
    #[error("HTTP request error: {0}")]
    HttpRequestError(#[from] reqwest::Error),
    #[error("Serialization/Deserialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("{error}")]
    Api {
        status: u16,
        code: Option<String>,
        error: String,
        message: Option<String>,
    },
}

impl ProviderError for HttpProviderError {
    fn code(&self) -> Option<String> {
        match self {
            HttpProviderError::Api { code, status, .. } => {
                code.clone().or_else(|| Some(status.to_string()))
            }
            HttpProviderError::HttpRequestError(err) => {
                err.status().map(|s| s.as_u16().to_string())
            }
            _ => None,
        }
    }
}

/// Error body returned by Billwerk for non-2xx responses.
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<AnyJson>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    http_status: Option<u16>,
}

#[derive(Debug, Serialize)]
struct SettleBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<MinorUnit>,
}

impl HttpProvider {
    pub fn new(config: &GatewayConfig) -> Result<Self, HttpProviderError> {
        let credentials = BASE64_STANDARD.encode(format!("{}:", config.api_key));
        let mut authorization = HeaderValue::from_str(&format!("Basic {credentials}"))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(HttpProvider {
            client: builder.build()?,
            api_endpoint: config.endpoint()?,
            checkout_endpoint: config.checkout_endpoint()?,
        })
    }

    fn api_url(&self, segments: &[&str]) -> Result<Url, HttpProviderError> {
        join_segments(&self.api_endpoint, segments)
    }

    fn checkout_url(&self, segments: &[&str]) -> Result<Url, HttpProviderError> {
        join_segments(&self.checkout_endpoint, segments)
    }

    async fn call<B, T>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<T, HttpProviderError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        #[cfg(feature = "tracing")]
        tracing::debug!(%method, %url, "Sending Billwerk API request");

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let body: ApiErrorBody = serde_json::from_slice(&bytes).unwrap_or_default();

        #[cfg(feature = "tracing")]
        tracing::debug!(status = status.as_u16(), "Billwerk API returned an error: {body:?}");

        Err(HttpProviderError::Api {
            status: body.http_status.unwrap_or(status.as_u16()),
            code: body.code.map(|code| match code {
                AnyJson::String(s) => s,
                other => other.to_string(),
            }),
            error: body.error.unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            }),
            message: body.message,
        })
    }
}

/// Append path segments to a base URL without dropping its own path.
fn join_segments(base: &Url, segments: &[&str]) -> Result<Url, HttpProviderError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| HttpProviderError::InvalidEndpoint(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

const NO_BODY: Option<&()> = None;

impl Provider for HttpProvider {
    type Error = HttpProviderError;

    async fn charge_session(&self, request: ChargeSessionRequest) -> Result<Session, Self::Error> {
        let url = self.checkout_url(&["session", "charge"])?;
        self.call(Method::POST, url, Some(&request)).await
    }

    async fn recurring_session(
        &self,
        request: RecurringSessionRequest,
    ) -> Result<Session, Self::Error> {
        let url = self.checkout_url(&["session", "recurring"])?;
        self.call(Method::POST, url, Some(&request)).await
    }

    async fn create_charge(&self, request: ChargeCreateRequest) -> Result<Charge, Self::Error> {
        let url = self.api_url(&["charge"])?;
        self.call(Method::POST, url, Some(&request)).await
    }

    async fn get_charge(&self, request: ChargeLookup) -> Result<Charge, Self::Error> {
        let url = self.api_url(&["charge", request.charge.as_str()])?;
        self.call(Method::GET, url, NO_BODY).await
    }

    async fn settle_charge(&self, request: ChargeSettleRequest) -> Result<Charge, Self::Error> {
        let url = self.api_url(&["charge", request.handle.as_str(), "settle"])?;
        let body = SettleBody {
            amount: request.amount,
        };
        self.call(Method::POST, url, Some(&body)).await
    }

    async fn cancel_charge(&self, request: ChargeCancelRequest) -> Result<Charge, Self::Error> {
        let url = self.api_url(&["charge", request.handle.as_str(), "cancel"])?;
        self.call(Method::POST, url, NO_BODY).await
    }

    async fn get_invoice(&self, request: InvoiceLookup) -> Result<Invoice, Self::Error> {
        let url = self.api_url(&["invoice", request.invoice.as_str()])?;
        self.call(Method::GET, url, NO_BODY).await
    }

    async fn create_refund(&self, request: RefundCreateRequest) -> Result<Refund, Self::Error> {
        let url = self.api_url(&["refund"])?;
        self.call(Method::POST, url, Some(&request)).await
    }

    async fn inactivate_payment_method(
        &self,
        request: PaymentMethodInactivateRequest,
    ) -> Result<PaymentMethod, Self::Error> {
        let url = self.api_url(&["payment_method", request.id.as_str()])?;
        self.call(Method::DELETE, url, NO_BODY).await
    }

    async fn get_transaction(&self, request: TransactionLookup) -> Result<Transaction, Self::Error> {
        let url = self.api_url(&["transaction", request.id.as_str()])?;
        self.call(Method::GET, url, NO_BODY).await
    }

    async fn create_customer(&self, request: CustomerRequest) -> Result<Customer, Self::Error> {
        let url = self.api_url(&["customer"])?;
        self.call(Method::POST, url, Some(&request)).await
    }

    async fn update_customer(&self, request: CustomerRequest) -> Result<Customer, Self::Error> {
        let url = self.api_url(&["customer", request.handle.as_str()])?;

        // The handle is addressed by the path, the body only carries changes.
        let mut body = serde_json::to_value(&request)?;
        if let Some(fields) = body.as_object_mut() {
            fields.remove("handle");
        }
        self.call(Method::PUT, url, Some(&body)).await
    }

    async fn get_customer(&self, request: CustomerLookup) -> Result<Customer, Self::Error> {
        let url = self.api_url(&["customer", request.handle.as_str()])?;
        self.call(Method::GET, url, NO_BODY).await
    }

    async fn create_subscription(
        &self,
        request: SubscriptionCreateRequest,
    ) -> Result<Subscription, Self::Error> {
        let url = self.api_url(&["subscription"])?;
        self.call(Method::POST, url, Some(&request)).await
    }

    async fn cancel_subscription(
        &self,
        request: SubscriptionCancelRequest,
    ) -> Result<Subscription, Self::Error> {
        let url = self.api_url(&["subscription", request.handle.as_str(), "cancel"])?;
        self.call(Method::POST, url, NO_BODY).await
    }
}
