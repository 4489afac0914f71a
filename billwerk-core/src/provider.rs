use crate::transport::{
    Charge, ChargeCancelRequest, ChargeCreateRequest, ChargeLookup, ChargeSessionRequest,
    ChargeSettleRequest, Customer, CustomerLookup, CustomerRequest, Invoice, InvoiceLookup,
    PaymentMethod, PaymentMethodInactivateRequest, RecurringSessionRequest, Refund,
    RefundCreateRequest, Session, Subscription, SubscriptionCancelRequest,
    SubscriptionCreateRequest, Transaction, TransactionLookup,
};

/// Error raised by a [`Provider`] call.
pub trait ProviderError: std::error::Error {
    /// Provider specific error code, if the provider reported one.
    fn code(&self) -> Option<String> {
        None
    }
}

/// A failed provider call, as seen by gateway responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    pub message: String,
    pub code: Option<String>,
}

impl ProviderFailure {
    pub fn from_error<E: ProviderError>(error: &E) -> Self {
        ProviderFailure {
            message: error.to_string(),
            code: error.code(),
        }
    }
}

/// Result of exactly one provider call: either the resource or the failure, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    Failed(ProviderFailure),
}

impl<T> Outcome<T> {
    pub fn from_result<E: ProviderError>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(err) => Outcome::Failed(ProviderFailure::from_error(&err)),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn success(value: T) -> Self {
        Outcome::Success(value)
    }

    pub fn failed(message: impl Into<String>, code: Option<String>) -> Self {
        Outcome::Failed(ProviderFailure {
            message: message.into(),
            code,
        })
    }

    pub fn as_success(&self) -> Option<&T> {
        match self {
            Outcome::Success(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_failed(&self) -> Option<&ProviderFailure> {
        match self {
            Outcome::Failed(v) => Some(v),
            _ => None,
        }
    }
}

/// Billwerk provider interface.
///
/// One method per provider call the gateway makes. Implementations perform a
/// single attempt and report failures through [`Self::Error`].
pub trait Provider {
    type Error: ProviderError;

    fn charge_session(
        &self,
        request: ChargeSessionRequest,
    ) -> impl Future<Output = Result<Session, Self::Error>>;

    fn recurring_session(
        &self,
        request: RecurringSessionRequest,
    ) -> impl Future<Output = Result<Session, Self::Error>>;

    fn create_charge(
        &self,
        request: ChargeCreateRequest,
    ) -> impl Future<Output = Result<Charge, Self::Error>>;

    fn get_charge(&self, request: ChargeLookup)
    -> impl Future<Output = Result<Charge, Self::Error>>;

    fn settle_charge(
        &self,
        request: ChargeSettleRequest,
    ) -> impl Future<Output = Result<Charge, Self::Error>>;

    fn cancel_charge(
        &self,
        request: ChargeCancelRequest,
    ) -> impl Future<Output = Result<Charge, Self::Error>>;

    fn get_invoice(
        &self,
        request: InvoiceLookup,
    ) -> impl Future<Output = Result<Invoice, Self::Error>>;

    fn create_refund(
        &self,
        request: RefundCreateRequest,
    ) -> impl Future<Output = Result<Refund, Self::Error>>;

    fn inactivate_payment_method(
        &self,
        request: PaymentMethodInactivateRequest,
    ) -> impl Future<Output = Result<PaymentMethod, Self::Error>>;

    fn get_transaction(
        &self,
        request: TransactionLookup,
    ) -> impl Future<Output = Result<Transaction, Self::Error>>;

    fn create_customer(
        &self,
        request: CustomerRequest,
    ) -> impl Future<Output = Result<Customer, Self::Error>>;

    fn update_customer(
        &self,
        request: CustomerRequest,
    ) -> impl Future<Output = Result<Customer, Self::Error>>;

    fn get_customer(
        &self,
        request: CustomerLookup,
    ) -> impl Future<Output = Result<Customer, Self::Error>>;

    fn create_subscription(
        &self,
        request: SubscriptionCreateRequest,
    ) -> impl Future<Output = Result<Subscription, Self::Error>>;

    fn cancel_subscription(
        &self,
        request: SubscriptionCancelRequest,
    ) -> impl Future<Output = Result<Subscription, Self::Error>>;
}
