//! Hosted checkout with the HTTP provider.
//!
//! Run with `BILLWERK_API_KEY=priv_... cargo run --example checkout_flow` and open
//! `http://localhost:3000/checkout/order-1`.

use axum::{
    Router,
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::get,
};
use billwerk_gateway::{
    config::GatewayConfig,
    core::CustomerDetails,
    gateway::Gateway,
    message::{CompletePurchaseParams, PurchaseParams, Request, Response},
    provider_client::HttpProvider,
};
use url_macro::url;

type AppGateway = Gateway<HttpProvider>;

async fn checkout(
    State(gateway): State<AppGateway>,
    Path(order): Path<String>,
) -> Result<Redirect, (StatusCode, String)> {
    let response = gateway
        .purchase(
            PurchaseParams::builder()
                .amount("149.95")
                .currency("DKK")
                .transaction_id(order)
                .description("Annual plan")
                .customer(
                    CustomerDetails::builder()
                        .email("jane@example.com")
                        .first_name("Jane")
                        .build(),
                )
                .build(),
        )
        .send()
        .await
        .map_err(|err| (StatusCode::BAD_REQUEST, err.to_string()))?;

    match response.redirect_url() {
        Some(url) => Ok(Redirect::to(url)),
        None => Err((
            StatusCode::BAD_GATEWAY,
            response.message().unwrap_or("Checkout unavailable").to_string(),
        )),
    }
}

async fn accept(State(gateway): State<AppGateway>, RawQuery(query): RawQuery) -> impl IntoResponse {
    let params = CompletePurchaseParams::builder()
        .query(query.as_deref().unwrap_or_default())
        .build();

    match gateway.complete_purchase(params).send().await {
        Ok(response) if response.is_successful() => {
            tracing::info!(invoice = ?response.transaction_reference(), "Payment completed");
            (StatusCode::OK, "Thank you for your order".to_string())
        }
        Ok(response) if response.is_pending() => {
            (StatusCode::ACCEPTED, "Payment is being processed".to_string())
        }
        Ok(response) => (
            StatusCode::PAYMENT_REQUIRED,
            response.message().unwrap_or("Payment failed").to_string(),
        ),
        Err(err) => (StatusCode::BAD_REQUEST, err.to_string()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut config = GatewayConfig::from_env()?;
    config.return_url = Some(url!("http://localhost:3000/accept"));
    config.cancel_url = Some(url!("http://localhost:3000/"));

    let gateway = Gateway::http(config)?;

    let app = Router::new()
        .route("/checkout/{order}", get(checkout))
        .route("/accept", get(accept))
        .with_state(gateway);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
