//! Per-operation requests and responses.
//!
//! Each operation has a parameter struct implementing [`Operation`], which maps the
//! parameters onto the provider payload and names the provider call to make. The
//! gateway wraps the parameters into a [`PendingRequest`], and every pending request
//! shares the same [`Request`] send path.

use std::sync::Arc;

use billwerk_core::core::non_empty;

use crate::{
    config::GatewayConfig,
    errors::{Error, Result},
    provider::{Outcome, Provider, ProviderFailure},
    types::{Amount, Currency, MinorUnit, QueryParams},
};

/// Declare a response type wrapping the [`Outcome`] of one provider call.
macro_rules! outcome_response {
    ($(#[$meta:meta])* $name:ident, $resource:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            outcome: $crate::provider::Outcome<$resource>,
        }

        impl $name {
            pub fn new(outcome: $crate::provider::Outcome<$resource>) -> Self {
                $name { outcome }
            }
        }

        impl From<$crate::provider::Outcome<$resource>> for $name {
            fn from(outcome: $crate::provider::Outcome<$resource>) -> Self {
                $name::new(outcome)
            }
        }
    };
}

mod authorize;
mod card;
mod customer;
mod purchase;
mod refund;
mod subscription;
mod transaction;

pub use authorize::*;
pub use card::*;
pub use customer::*;
pub use purchase::*;
pub use refund::*;
pub use subscription::*;
pub use transaction::*;

/// One gateway operation: its parameters, payload mapping and provider call.
pub trait Operation {
    /// Operation name used in logs.
    const NAME: &'static str;

    type Payload;
    type Resource;
    type Response: Response + From<Outcome<Self::Resource>>;

    /// Validate the parameters and map them onto the provider payload.
    fn to_payload(&self, config: &GatewayConfig) -> Result<Self::Payload>;

    /// Perform the provider call for this operation.
    fn call<P: Provider>(
        provider: &P,
        payload: Self::Payload,
    ) -> impl Future<Output = std::result::Result<Self::Resource, P::Error>>;
}

/// A request that has been created but not sent.
pub trait Request {
    type Params;
    type Payload;
    type Response: Response;

    /// The parameters the request was created with.
    fn params(&self) -> &Self::Params;

    /// Validate the parameters and build the provider payload.
    ///
    /// No I/O happens here, so this can be used to inspect what would be sent.
    /// Handles missing from the parameters are generated on every call, so
    /// [`send`](Self::send) may send different ones. To send exactly the
    /// inspected payload, pass it to [`send_data`](Self::send_data).
    fn data(&self) -> Result<Self::Payload>;

    /// Send a payload to the provider.
    ///
    /// Provider failures are captured in the response and never returned as `Err`.
    fn send_data(&self, payload: Self::Payload) -> impl Future<Output = Self::Response>;

    /// Build the payload and send it.
    fn send(&self) -> impl Future<Output = Result<Self::Response>> {
        async move {
            let payload = self.data()?;
            Ok(self.send_data(payload).await)
        }
    }
}

/// Uniform view on the result of an operation.
pub trait Response {
    type Resource;

    /// The outcome of the provider call.
    fn outcome(&self) -> &Outcome<Self::Resource>;

    /// Whether the operation reached its terminal success state.
    ///
    /// Always `false` when the provider call failed.
    fn is_successful(&self) -> bool;

    /// Reference of the Billwerk resource, for use in follow-up calls.
    fn transaction_reference(&self) -> Option<&str>;

    /// The resource returned by Billwerk, if the call succeeded.
    fn resource(&self) -> Option<&Self::Resource> {
        self.outcome().as_success()
    }

    fn failure(&self) -> Option<&ProviderFailure> {
        self.outcome().as_failed()
    }

    /// Error message of a failed provider call.
    fn message(&self) -> Option<&str> {
        self.failure().map(|f| f.message.as_str())
    }

    /// Error code of a failed provider call.
    fn code(&self) -> Option<&str> {
        self.failure().and_then(|f| f.code.as_deref())
    }

    fn is_redirect(&self) -> bool {
        false
    }

    fn redirect_url(&self) -> Option<&str> {
        None
    }

    fn redirect_method(&self) -> &'static str {
        "GET"
    }

    fn state(&self) -> Option<&str> {
        None
    }

    fn is_pending(&self) -> bool {
        false
    }
}

/// A request created by the [`Gateway`](crate::gateway::Gateway), sent with [`Request::send`].
#[derive(Debug, Clone)]
pub struct PendingRequest<P, O> {
    provider: P,
    config: Arc<GatewayConfig>,
    params: O,
}

impl<P, O> PendingRequest<P, O> {
    pub fn new(provider: P, config: Arc<GatewayConfig>, params: O) -> Self {
        PendingRequest {
            provider,
            config,
            params,
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

impl<P: Provider, O: Operation> Request for PendingRequest<P, O> {
    type Params = O;
    type Payload = O::Payload;
    type Response = O::Response;

    fn params(&self) -> &O {
        &self.params
    }

    fn data(&self) -> Result<O::Payload> {
        self.params.to_payload(&self.config)
    }

    async fn send_data(&self, payload: O::Payload) -> O::Response {
        #[cfg(feature = "tracing")]
        tracing::debug!(operation = O::NAME, "Dispatching Billwerk request");

        let result = O::call(&self.provider, payload).await;

        #[cfg(feature = "tracing")]
        if let Err(err) = &result {
            tracing::warn!(operation = O::NAME, "Billwerk provider call failed: {err}");
        }

        O::Response::from(Outcome::from_result(result))
    }
}

pub(crate) fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str> {
    non_empty(value).ok_or(Error::MissingParameter(name))
}

pub(crate) fn optional(value: &Option<String>) -> Option<String> {
    non_empty(value).map(str::to_string)
}

pub(crate) fn required_currency(currency: &Option<String>) -> Result<Currency> {
    required(currency, "currency")?.parse()
}

/// Convert a required amount with a required currency.
pub(crate) fn required_amount(
    amount: &Option<Amount>,
    currency: &Currency,
) -> Result<MinorUnit> {
    match amount {
        Some(amount) if !amount.is_empty() => amount.to_minor_units(currency),
        _ => Err(Error::MissingParameter("amount")),
    }
}

/// Convert an amount that may be absent. A present amount needs the currency.
pub(crate) fn optional_amount(
    amount: &Option<Amount>,
    currency: &Option<String>,
) -> Result<Option<MinorUnit>> {
    match amount {
        Some(amount) if !amount.is_empty() => {
            let currency = required_currency(currency)?;
            amount.to_minor_units(&currency).map(Some)
        }
        _ => Ok(None),
    }
}

/// Resolve the resource id of a completion call from the return query, falling
/// back to an explicit reference.
pub(crate) fn resolve_reference(
    query: &QueryParams,
    key: &'static str,
    fallback: &Option<String>,
) -> Result<String> {
    query
        .get(key)
        .or_else(|| query.get("id"))
        .or_else(|| non_empty(fallback))
        .map(str::to_string)
        .ok_or(Error::MissingReference(key))
}

/// Whether a resource reports `state` as one of `states`.
pub(crate) fn state_in(state: &Option<String>, states: &[&str]) -> bool {
    state.as_deref().is_some_and(|s| states.contains(&s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_prefers_query_over_fallback() {
        let query = QueryParams::parse("invoice=inv-from-query&id=cs_1");
        let fallback = Some("inv-fallback".to_string());
        assert_eq!(
            resolve_reference(&query, "invoice", &fallback).unwrap(),
            "inv-from-query"
        );

        let query = QueryParams::parse("id=cs_1");
        assert_eq!(resolve_reference(&query, "invoice", &fallback).unwrap(), "cs_1");

        let query = QueryParams::default();
        assert_eq!(
            resolve_reference(&query, "invoice", &fallback).unwrap(),
            "inv-fallback"
        );
    }

    #[test]
    fn missing_reference_names_the_resource() {
        let result = resolve_reference(&QueryParams::default(), "charge", &Some(String::new()));
        assert!(matches!(result, Err(Error::MissingReference("charge"))));
    }

    #[test]
    fn present_amount_needs_a_currency() {
        let amount = Some(Amount::from("5.00"));
        assert!(matches!(
            optional_amount(&amount, &None),
            Err(Error::MissingParameter("currency"))
        ));
        assert_eq!(
            optional_amount(&amount, &Some("DKK".to_string())).unwrap(),
            Some(MinorUnit(500))
        );
        assert_eq!(optional_amount(&Some(Amount::from("")), &None).unwrap(), None);
    }
}
