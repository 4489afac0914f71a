use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A webhook delivery as posted by Billwerk.
///
/// Resource fields hold handles or ids and are only present when the event
/// concerns that kind of resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Webhook delivery id, part of the signed message.
    pub id: String,
    /// Id of the event, shared by retried deliveries.
    #[serde(default)]
    pub event_id: String,
    pub event_type: EventType,
    /// Creation time as sent by Billwerk, part of the signed message.
    pub timestamp: String,
    /// Hex encoded HMAC-SHA256 of `timestamp + id`.
    #[serde(default)]
    pub signature: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventType {
    InvoiceSettled,
    InvoiceAuthorized,
    InvoiceFailed,
    InvoiceRefund,
    InvoiceCancelled,
    SubscriptionCreated,
    SubscriptionCancelled,
    CustomerCreated,
    CustomerPaymentMethodAdded,
    Other(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::InvoiceSettled => "invoice_settled",
            EventType::InvoiceAuthorized => "invoice_authorized",
            EventType::InvoiceFailed => "invoice_failed",
            EventType::InvoiceRefund => "invoice_refund",
            EventType::InvoiceCancelled => "invoice_cancelled",
            EventType::SubscriptionCreated => "subscription_created",
            EventType::SubscriptionCancelled => "subscription_cancelled",
            EventType::CustomerCreated => "customer_created",
            EventType::CustomerPaymentMethodAdded => "customer_payment_method_added",
            EventType::Other(s) => s,
        }
    }
}

impl From<&str> for EventType {
    fn from(s: &str) -> Self {
        match s {
            "invoice_settled" => EventType::InvoiceSettled,
            "invoice_authorized" => EventType::InvoiceAuthorized,
            "invoice_failed" => EventType::InvoiceFailed,
            "invoice_refund" => EventType::InvoiceRefund,
            "invoice_cancelled" => EventType::InvoiceCancelled,
            "subscription_created" => EventType::SubscriptionCreated,
            "subscription_cancelled" => EventType::SubscriptionCancelled,
            "customer_created" => EventType::CustomerCreated,
            "customer_payment_method_added" => EventType::CustomerPaymentMethodAdded,
            other => EventType::Other(other.to_string()),
        }
    }
}

impl Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EventType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(EventType::from(s.as_str()))
    }
}
