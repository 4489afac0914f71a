//! Request payloads sent to, and resource objects returned by, the Billwerk API.
//!
//! Payload structs only carry the fields an operation actually sets. Absent
//! values are skipped instead of being sent as `null`.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::{Currency, Handle, MinorUnit};

/// Checkout session for a one-off charge, created by `purchase`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChargeSessionRequest {
    pub order: SessionOrder,
    /// Settle the charge as soon as it is authorized.
    pub settle: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_url: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<Url>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionOrder {
    pub handle: Handle,
    pub amount: MinorUnit,
    pub currency: Currency,
    pub customer: SessionCustomer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_lines: Option<Vec<OrderLine>>,
}

/// The customer a checkout session order is created for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionCustomer {
    pub handle: Handle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl SessionCustomer {
    /// A customer known only by its handle.
    pub fn handle_only(handle: Handle) -> Self {
        SessionCustomer {
            handle,
            email: None,
            first_name: None,
            last_name: None,
            phone: None,
            address: None,
            address2: None,
            city: None,
            postal_code: None,
            country: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    pub ordertext: String,
    pub amount: MinorUnit,
    pub quantity: u32,
}

/// Checkout session that saves a payment method for a customer, created by `create_card`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecurringSessionRequest {
    pub customer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_url: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<Url>,
}

/// Server-side charge, created unsettled by `authorize`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChargeCreateRequest {
    pub handle: Handle,
    pub customer: String,
    pub amount: MinorUnit,
    pub currency: Currency,
    pub settle: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordertext: Option<String>,
    /// Saved payment method to charge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChargeLookup {
    pub charge: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChargeSettleRequest {
    pub handle: String,
    /// Partial settle amount. The full authorized amount when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<MinorUnit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChargeCancelRequest {
    pub handle: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceLookup {
    pub invoice: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefundCreateRequest {
    pub invoice: String,
    /// Partial refund amount. The full settled amount when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<MinorUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentMethodInactivateRequest {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionLookup {
    pub id: String,
}

/// Customer body used for both create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerRequest {
    pub handle: Handle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerLookup {
    pub handle: String,
}

/// Subscription (agreement) of a customer to a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionCreateRequest {
    pub handle: Handle,
    pub customer: String,
    pub plan: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionCancelRequest {
    pub handle: String,
}

/// A hosted checkout session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub id: Option<String>,
    /// Checkout page the customer is redirected to.
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charge {
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub amount: Option<MinorUnit>,
    #[serde(default)]
    pub currency: Option<String>,
    /// Authorization timestamp.
    #[serde(default)]
    pub authorized: Option<String>,
    /// Settle timestamp.
    #[serde(default)]
    pub settled: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub amount: Option<MinorUnit>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub settled: Option<String>,
    #[serde(default)]
    pub authorized: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refund {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub invoice: Option<String>,
    #[serde(default)]
    pub amount: Option<MinorUnit>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub invoice: Option<String>,
    /// `settle`, `refund`, `authorization`, ...
    #[serde(default, rename = "type")]
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub amount: Option<MinorUnit>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
}
