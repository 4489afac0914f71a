#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use billwerk_gateway::{
    provider::{Provider, ProviderError},
    transport::{
        Charge, ChargeCancelRequest, ChargeCreateRequest, ChargeLookup, ChargeSessionRequest,
        ChargeSettleRequest, Customer, CustomerLookup, CustomerRequest, Invoice, InvoiceLookup,
        PaymentMethod, PaymentMethodInactivateRequest, RecurringSessionRequest, Refund,
        RefundCreateRequest, Session, Subscription, SubscriptionCancelRequest,
        SubscriptionCreateRequest, Transaction, TransactionLookup,
    },
    types::AnyJson,
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct MockError {
    pub message: String,
    pub code: Option<String>,
}

impl ProviderError for MockError {
    fn code(&self) -> Option<String> {
        self.code.clone()
    }
}

/// Canned resources returned by [`MockProvider`].
#[derive(Debug, Clone, Default)]
pub struct Canned {
    pub session: Session,
    pub charge: Charge,
    pub invoice: Invoice,
    pub refund: Refund,
    pub payment_method: PaymentMethod,
    pub transaction: Transaction,
    pub customer: Customer,
    pub subscription: Subscription,
    /// When set, every call fails with this message and code.
    pub failure: Option<(String, Option<String>)>,
}

/// An in-memory provider recording every call as `(method, payload)`.
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    pub canned: Canned,
    calls: Arc<Mutex<Vec<(&'static str, AnyJson)>>>,
}

impl MockProvider {
    pub fn new(canned: Canned) -> Self {
        MockProvider {
            canned,
            calls: Arc::default(),
        }
    }

    pub fn failing(message: &str, code: Option<&str>) -> Self {
        MockProvider::new(Canned {
            failure: Some((message.to_string(), code.map(str::to_string))),
            ..Default::default()
        })
    }

    pub fn calls(&self) -> Vec<(&'static str, AnyJson)> {
        self.calls.lock().unwrap().clone()
    }

    fn respond<T: Clone>(
        &self,
        method: &'static str,
        payload: &impl Serialize,
        resource: &T,
    ) -> Result<T, MockError> {
        self.calls
            .lock()
            .unwrap()
            .push((method, serde_json::to_value(payload).unwrap()));

        match &self.canned.failure {
            Some((message, code)) => Err(MockError {
                message: message.clone(),
                code: code.clone(),
            }),
            None => Ok(resource.clone()),
        }
    }
}

impl Provider for MockProvider {
    type Error = MockError;

    async fn charge_session(&self, request: ChargeSessionRequest) -> Result<Session, MockError> {
        self.respond("charge_session", &request, &self.canned.session)
    }

    async fn recurring_session(
        &self,
        request: RecurringSessionRequest,
    ) -> Result<Session, MockError> {
        self.respond("recurring_session", &request, &self.canned.session)
    }

    async fn create_charge(&self, request: ChargeCreateRequest) -> Result<Charge, MockError> {
        self.respond("create_charge", &request, &self.canned.charge)
    }

    async fn get_charge(&self, request: ChargeLookup) -> Result<Charge, MockError> {
        self.respond("get_charge", &request, &self.canned.charge)
    }

    async fn settle_charge(&self, request: ChargeSettleRequest) -> Result<Charge, MockError> {
        self.respond("settle_charge", &request, &self.canned.charge)
    }

    async fn cancel_charge(&self, request: ChargeCancelRequest) -> Result<Charge, MockError> {
        self.respond("cancel_charge", &request, &self.canned.charge)
    }

    async fn get_invoice(&self, request: InvoiceLookup) -> Result<Invoice, MockError> {
        self.respond("get_invoice", &request, &self.canned.invoice)
    }

    async fn create_refund(&self, request: RefundCreateRequest) -> Result<Refund, MockError> {
        self.respond("create_refund", &request, &self.canned.refund)
    }

    async fn inactivate_payment_method(
        &self,
        request: PaymentMethodInactivateRequest,
    ) -> Result<PaymentMethod, MockError> {
        self.respond(
            "inactivate_payment_method",
            &request,
            &self.canned.payment_method,
        )
    }

    async fn get_transaction(&self, request: TransactionLookup) -> Result<Transaction, MockError> {
        self.respond("get_transaction", &request, &self.canned.transaction)
    }

    async fn create_customer(&self, request: CustomerRequest) -> Result<Customer, MockError> {
        self.respond("create_customer", &request, &self.canned.customer)
    }

    async fn update_customer(&self, request: CustomerRequest) -> Result<Customer, MockError> {
        self.respond("update_customer", &request, &self.canned.customer)
    }

    async fn get_customer(&self, request: CustomerLookup) -> Result<Customer, MockError> {
        self.respond("get_customer", &request, &self.canned.customer)
    }

    async fn create_subscription(
        &self,
        request: SubscriptionCreateRequest,
    ) -> Result<Subscription, MockError> {
        self.respond("create_subscription", &request, &self.canned.subscription)
    }

    async fn cancel_subscription(
        &self,
        request: SubscriptionCancelRequest,
    ) -> Result<Subscription, MockError> {
        self.respond("cancel_subscription", &request, &self.canned.subscription)
    }
}
