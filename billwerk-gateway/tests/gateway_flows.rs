mod common;

use billwerk_gateway::{
    config::GatewayConfig,
    errors::Error,
    gateway::Gateway,
    message::{
        AuthorizeParams, CancelSubscriptionParams, CaptureParams, CompleteAuthorizeParams,
        CompletePurchaseParams, CreateCardParams, CreateCustomerParams, CreateSubscriptionParams,
        DeleteCardParams, FetchCustomerParams, FetchTransactionParams, PurchaseParams,
        RefundParams, Request, Response, UpdateCustomerParams, VoidParams,
    },
    transport::{
        Charge, Customer, Invoice, PaymentMethod, Refund, Session, Subscription, Transaction,
    },
    types::{MinorUnit, QueryParams},
};
use common::{Canned, MockProvider};
use serde_json::json;

fn gateway(provider: MockProvider) -> Gateway<MockProvider> {
    Gateway::new(
        provider,
        GatewayConfig::builder().api_key("priv_test").build(),
    )
}

fn some(value: &str) -> Option<String> {
    Some(value.to_string())
}

#[test]
fn gateway_identity() {
    let gateway = gateway(MockProvider::default());

    assert_eq!(gateway.name(), "Billwerk");
    assert_eq!(gateway.short_name(), "Billwerk");
    assert_eq!(gateway.api_key(), "priv_test");
    assert!(gateway.test_mode());
}

#[tokio::test]
async fn purchase_creates_checkout_session() {
    let provider = MockProvider::new(Canned {
        session: Session {
            id: some("cs_47"),
            url: some("https://checkout.reepay.com/#/cs_47"),
        },
        ..Default::default()
    });
    let gateway = gateway(provider.clone());

    let response = gateway
        .purchase(
            PurchaseParams::builder()
                .amount("10.00")
                .currency("EUR")
                .transaction_id("order-42")
                .customer_reference("cust-1")
                .build(),
        )
        .send()
        .await
        .unwrap();

    assert!(!response.is_successful());
    assert!(response.is_redirect());
    assert_eq!(
        response.redirect_url(),
        Some("https://checkout.reepay.com/#/cs_47")
    );
    assert_eq!(response.transaction_reference(), Some("cs_47"));

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "charge_session");
    assert_eq!(calls[0].1["order"]["amount"], json!(1000));
    assert_eq!(calls[0].1["order"]["currency"], json!("EUR"));
    assert_eq!(calls[0].1["settle"], json!(true));
}

#[tokio::test]
async fn invalid_parameters_fail_before_any_call() {
    let provider = MockProvider::default();
    let gateway = gateway(provider.clone());

    let result = gateway
        .purchase(PurchaseParams::builder().currency("EUR").build())
        .send()
        .await;
    assert!(matches!(result, Err(Error::MissingParameter("amount"))));

    let result = gateway
        .complete_purchase(CompletePurchaseParams::default())
        .send()
        .await;
    assert!(matches!(result, Err(Error::MissingReference("invoice"))));

    let result = gateway
        .authorize(
            AuthorizeParams::builder()
                .amount("1.5")
                .currency("JPY")
                .customer_reference("cust-1")
                .build(),
        )
        .send()
        .await;
    assert!(matches!(result, Err(Error::InvalidAmount(_))));

    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn provider_failure_is_captured_in_the_response() {
    let provider = MockProvider::failing("Invalid API key", Some("unauthorized"));
    let gateway = gateway(provider.clone());

    let response = gateway
        .authorize(
            AuthorizeParams::builder()
                .amount("10")
                .currency("EUR")
                .customer_reference("cust-1")
                .build(),
        )
        .send()
        .await
        .unwrap();

    assert!(!response.is_successful());
    assert_eq!(response.message(), Some("Invalid API key"));
    assert_eq!(response.code(), Some("unauthorized"));
    assert_eq!(response.transaction_reference(), None);
    assert_eq!(provider.calls().len(), 1);
}

#[tokio::test]
async fn authorize_then_capture() {
    let provider = MockProvider::new(Canned {
        charge: Charge {
            handle: some("charge-1"),
            state: some("authorized"),
            amount: Some(MinorUnit(5000)),
            authorized: some("2026-10-19T10:00:00.000+00:00"),
            ..Default::default()
        },
        ..Default::default()
    });
    let gateway = gateway(provider.clone());

    let authorized = gateway
        .authorize(
            AuthorizeParams::builder()
                .amount("50")
                .currency("DKK")
                .customer_reference("cust-1")
                .transaction_id("charge-1")
                .build(),
        )
        .send()
        .await
        .unwrap();

    assert!(authorized.is_successful());
    assert!(authorized.is_authorized());
    assert_eq!(authorized.state(), Some("authorized"));

    let reference = authorized.transaction_reference().unwrap().to_string();
    let captured = gateway
        .capture(
            CaptureParams::builder()
                .transaction_reference(reference)
                .build(),
        )
        .send()
        .await
        .unwrap();

    // The canned charge is still authorized, so the settle did not go through.
    assert!(!captured.is_successful());
    assert_eq!(
        provider.calls()[1],
        ("settle_charge", json!({ "handle": "charge-1" }))
    );
}

#[tokio::test]
async fn complete_purchase_uses_query_over_reference() {
    let provider = MockProvider::new(Canned {
        invoice: Invoice {
            id: some("inv-1"),
            state: some("processing"),
            ..Default::default()
        },
        ..Default::default()
    });
    let gateway = gateway(provider.clone());

    let response = gateway
        .complete_purchase(
            CompletePurchaseParams::builder()
                .query(QueryParams::parse("?invoice=order-42&id=cs_1"))
                .transaction_reference("order-fallback")
                .build(),
        )
        .send()
        .await
        .unwrap();

    assert!(!response.is_successful());
    assert!(response.is_pending());
    assert_eq!(
        provider.calls(),
        vec![("get_invoice", json!({ "invoice": "order-42" }))]
    );
}

#[tokio::test]
async fn complete_authorize_falls_back_to_reference() {
    let provider = MockProvider::new(Canned {
        charge: Charge {
            handle: some("charge-7"),
            state: some("authorized"),
            ..Default::default()
        },
        ..Default::default()
    });
    let gateway = gateway(provider.clone());

    let response = gateway
        .complete_authorize(
            CompleteAuthorizeParams::builder()
                .transaction_reference("charge-7")
                .build(),
        )
        .send()
        .await
        .unwrap();

    assert!(response.is_successful());
    assert_eq!(
        provider.calls(),
        vec![("get_charge", json!({ "charge": "charge-7" }))]
    );
}

#[tokio::test]
async fn refund_and_void() {
    let provider = MockProvider::new(Canned {
        refund: Refund {
            id: some("rf_1"),
            state: some("refunded"),
            ..Default::default()
        },
        charge: Charge {
            handle: some("charge-2"),
            state: some("cancelled"),
            ..Default::default()
        },
        ..Default::default()
    });
    let gateway = gateway(provider.clone());

    let refund = gateway
        .refund(
            RefundParams::builder()
                .transaction_reference("inv-1")
                .amount("1.25")
                .currency("EUR")
                .build(),
        )
        .send()
        .await
        .unwrap();
    assert!(refund.is_successful());
    assert_eq!(refund.transaction_reference(), Some("rf_1"));

    let void = gateway
        .void(VoidParams::builder().transaction_reference("charge-2").build())
        .send()
        .await
        .unwrap();
    assert!(void.is_successful());
    assert!(void.is_cancelled());

    assert_eq!(
        provider.calls(),
        vec![
            ("create_refund", json!({ "invoice": "inv-1", "amount": 125 })),
            ("cancel_charge", json!({ "handle": "charge-2" })),
        ]
    );
}

#[tokio::test]
async fn card_lifecycle() {
    let provider = MockProvider::new(Canned {
        session: Session {
            id: some("cs_rec"),
            url: some("https://checkout.reepay.com/#/cs_rec"),
        },
        payment_method: PaymentMethod {
            id: some("ca_1"),
            state: some("inactivated"),
            ..Default::default()
        },
        ..Default::default()
    });
    let gateway = gateway(provider.clone());

    let created = gateway
        .create_card(
            CreateCardParams::builder()
                .customer_reference("cust-1")
                .build(),
        )
        .send()
        .await
        .unwrap();
    assert!(created.is_redirect());
    assert!(!created.is_successful());

    let deleted = gateway
        .delete_card(DeleteCardParams::builder().card_reference("ca_1").build())
        .send()
        .await
        .unwrap();
    assert!(deleted.is_successful());
    assert!(deleted.is_deleted());

    assert_eq!(
        provider.calls(),
        vec![
            ("recurring_session", json!({ "customer": "cust-1" })),
            ("inactivate_payment_method", json!({ "id": "ca_1" })),
        ]
    );
}

#[tokio::test]
async fn fetch_transaction() {
    let provider = MockProvider::new(Canned {
        transaction: Transaction {
            id: some("trx_1"),
            state: some("settled"),
            transaction_type: some("settle"),
            ..Default::default()
        },
        ..Default::default()
    });
    let gateway = gateway(provider);

    let response = gateway
        .fetch_transaction(
            FetchTransactionParams::builder()
                .transaction_reference("trx_1")
                .build(),
        )
        .send()
        .await
        .unwrap();

    assert!(response.is_successful());
    assert_eq!(response.transaction_type(), Some("settle"));
    assert_eq!(response.state(), Some("settled"));
}

#[tokio::test]
async fn customer_operations() {
    let provider = MockProvider::new(Canned {
        customer: Customer {
            handle: some("cust-9"),
            email: some("ada@example.com"),
            ..Default::default()
        },
        ..Default::default()
    });
    let gateway = gateway(provider.clone());

    let created = gateway
        .create_customer(
            CreateCustomerParams::builder()
                .customer_reference("cust-9")
                .build(),
        )
        .send()
        .await
        .unwrap();
    assert!(created.is_successful());
    assert_eq!(created.customer_reference(), Some("cust-9"));

    let updated = gateway
        .update_customer(
            UpdateCustomerParams::builder()
                .customer_reference("cust-9")
                .build(),
        )
        .send()
        .await
        .unwrap();
    assert!(updated.is_successful());

    let fetched = gateway
        .fetch_customer(
            FetchCustomerParams::builder()
                .customer_reference("cust-9")
                .build(),
        )
        .send()
        .await
        .unwrap();
    assert_eq!(
        fetched.resource().and_then(|c| c.email.as_deref()),
        Some("ada@example.com")
    );

    let methods: Vec<_> = provider.calls().into_iter().map(|(m, _)| m).collect();
    assert_eq!(
        methods,
        vec!["create_customer", "update_customer", "get_customer"]
    );
}

#[tokio::test]
async fn subscription_lifecycle() {
    let provider = MockProvider::new(Canned {
        subscription: Subscription {
            handle: some("sub-1"),
            state: some("cancelled"),
            ..Default::default()
        },
        ..Default::default()
    });
    let gateway = gateway(provider.clone());

    let created = gateway
        .create_subscription(
            CreateSubscriptionParams::builder()
                .customer_reference("cust-1")
                .plan("gold")
                .subscription_reference("sub-1")
                .build(),
        )
        .send()
        .await
        .unwrap();
    assert!(created.is_successful());
    assert_eq!(created.subscription_reference(), Some("sub-1"));

    let cancelled = gateway
        .cancel_subscription(
            CancelSubscriptionParams::builder()
                .subscription_reference("sub-1")
                .build(),
        )
        .send()
        .await
        .unwrap();
    assert!(cancelled.is_successful());
    assert!(cancelled.is_cancelled());

    assert_eq!(
        provider.calls()[1],
        ("cancel_subscription", json!({ "handle": "sub-1" }))
    );
}

#[test]
fn identical_parameters_give_identical_payloads() {
    let gateway = gateway(MockProvider::default());
    let params = PurchaseParams::builder()
        .amount("19.99")
        .currency("EUR")
        .description("T-shirt")
        .build();

    let first = gateway.purchase(params.clone()).data().unwrap();
    let second = gateway.purchase(params).data().unwrap();

    // Handles were generated, everything else must match.
    assert!(first.order.handle.is_generated());
    assert_ne!(first.order.handle, second.order.handle);
    assert_eq!(first.order.amount, second.order.amount);
    assert_eq!(first.order.currency, second.order.currency);
    assert_eq!(first.order.order_lines, second.order.order_lines);
    assert_eq!(first.settle, second.settle);
}

#[test]
fn supplied_handles_give_byte_identical_payloads() {
    let gateway = gateway(MockProvider::default());
    let params = PurchaseParams::builder()
        .amount("19.99")
        .currency("EUR")
        .transaction_id("order-7")
        .customer_reference("cust-7")
        .description("T-shirt")
        .customer(
            billwerk_gateway::core::CustomerDetails::builder()
                .email("jane@example.com")
                .city("Aarhus")
                .build(),
        )
        .return_url(url_macro::url!("https://shop.example.com/accept"))
        .cancel_url(url_macro::url!("https://shop.example.com/cancel"))
        .build();

    let first = serde_json::to_string(&gateway.purchase(params.clone()).data().unwrap()).unwrap();
    let second = serde_json::to_string(&gateway.purchase(params).data().unwrap()).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn inspected_payload_is_sent_unchanged() {
    let provider = MockProvider::default();
    let gateway = gateway(provider.clone());
    let request = gateway.purchase(
        PurchaseParams::builder()
            .amount("5.00")
            .currency("EUR")
            .build(),
    );

    let payload = request.data().unwrap();
    let inspected = serde_json::to_value(&payload).unwrap();
    request.send_data(payload).await;

    assert_eq!(provider.calls(), vec![("charge_session", inspected)]);
}
