use bon::Builder;
use url::Url;

use crate::{
    config::GatewayConfig,
    core::CustomerDetails,
    errors::Result,
    message::{
        Operation, PendingRequest, Response, optional, required_amount, required_currency,
        resolve_reference, state_in,
    },
    provider::{Outcome, Provider},
    transport::{
        ChargeSessionRequest, Invoice, InvoiceLookup, OrderLine, Session, SessionCustomer,
        SessionOrder,
    },
    types::{Amount, Handle, MinorUnit, QueryParams},
};

/// Hosted checkout for a one-off charge that settles immediately.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct PurchaseParams {
    /// Decimal amount in major units, e.g. `"10.00"`.
    #[builder(into)]
    pub amount: Option<Amount>,
    #[builder(into)]
    pub currency: Option<String>,
    /// Order handle. Generated when absent.
    #[builder(into)]
    pub transaction_id: Option<String>,
    /// Customer handle. Generated when absent.
    #[builder(into)]
    pub customer_reference: Option<String>,
    /// Sent as the single order line.
    #[builder(into)]
    pub description: Option<String>,
    pub customer: Option<CustomerDetails>,
    pub return_url: Option<Url>,
    pub cancel_url: Option<Url>,
}

pub type PurchaseRequest<P> = PendingRequest<P, PurchaseParams>;

impl Operation for PurchaseParams {
    const NAME: &'static str = "purchase";

    type Payload = ChargeSessionRequest;
    type Resource = Session;
    type Response = PurchaseResponse;

    fn to_payload(&self, config: &GatewayConfig) -> Result<ChargeSessionRequest> {
        let currency = required_currency(&self.currency)?;
        let amount = required_amount(&self.amount, &currency)?;

        let handle = Handle::supplied_or_generate(self.transaction_id.as_deref(), "order");
        let customer_handle =
            Handle::supplied_or_generate(self.customer_reference.as_deref(), "customer");

        let order_lines = optional(&self.description).map(|ordertext| {
            vec![OrderLine {
                ordertext,
                amount,
                quantity: 1,
            }]
        });

        Ok(ChargeSessionRequest {
            order: SessionOrder {
                handle,
                amount,
                currency,
                customer: session_customer(customer_handle, self.customer.as_ref()),
                order_lines,
            },
            settle: true,
            accept_url: self.return_url.clone().or_else(|| config.return_url.clone()),
            cancel_url: self.cancel_url.clone().or_else(|| config.cancel_url.clone()),
        })
    }

    fn call<P: Provider>(
        provider: &P,
        payload: ChargeSessionRequest,
    ) -> impl Future<Output = std::result::Result<Session, P::Error>> {
        provider.charge_session(payload)
    }
}

/// Contact details are only passed to checkout together with an email address.
fn session_customer(handle: Handle, details: Option<&CustomerDetails>) -> SessionCustomer {
    let Some(details) = details.filter(|d| d.email().is_some()) else {
        return SessionCustomer::handle_only(handle);
    };

    SessionCustomer {
        handle,
        email: details.email().map(str::to_string),
        first_name: details.first_name().map(str::to_string),
        last_name: details.last_name().map(str::to_string),
        phone: details.phone().map(str::to_string),
        address: details.address1().map(str::to_string),
        address2: details.address2().map(str::to_string),
        city: details.city().map(str::to_string),
        postal_code: details.postcode().map(str::to_string),
        country: details.country().map(str::to_string),
    }
}

outcome_response!(
    /// A checkout session. Never successful by itself, the customer has to be redirected.
    PurchaseResponse,
    Session
);

impl Response for PurchaseResponse {
    type Resource = Session;

    fn outcome(&self) -> &Outcome<Session> {
        &self.outcome
    }

    fn is_successful(&self) -> bool {
        false
    }

    fn transaction_reference(&self) -> Option<&str> {
        self.outcome.as_success()?.id.as_deref()
    }

    fn is_redirect(&self) -> bool {
        self.redirect_url().is_some()
    }

    fn redirect_url(&self) -> Option<&str> {
        self.outcome.as_success()?.url.as_deref()
    }
}

/// Look up the invoice of a checkout after the customer returned.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletePurchaseParams {
    /// Query of the accept URL request. `invoice` or `id` are used when present.
    #[builder(into, default)]
    pub query: QueryParams,
    /// Invoice id used when the query carries none.
    #[builder(into)]
    pub transaction_reference: Option<String>,
}

pub type CompletePurchaseRequest<P> = PendingRequest<P, CompletePurchaseParams>;

impl Operation for CompletePurchaseParams {
    const NAME: &'static str = "complete_purchase";

    type Payload = InvoiceLookup;
    type Resource = Invoice;
    type Response = CompletePurchaseResponse;

    fn to_payload(&self, _config: &GatewayConfig) -> Result<InvoiceLookup> {
        let invoice = resolve_reference(&self.query, "invoice", &self.transaction_reference)?;
        Ok(InvoiceLookup { invoice })
    }

    fn call<P: Provider>(
        provider: &P,
        payload: InvoiceLookup,
    ) -> impl Future<Output = std::result::Result<Invoice, P::Error>> {
        provider.get_invoice(payload)
    }
}

outcome_response!(CompletePurchaseResponse, Invoice);

impl CompletePurchaseResponse {
    pub fn amount(&self) -> Option<MinorUnit> {
        self.outcome.as_success()?.amount
    }

    pub fn currency(&self) -> Option<&str> {
        self.outcome.as_success()?.currency.as_deref()
    }

    pub fn is_settled(&self) -> bool {
        self.outcome
            .as_success()
            .is_some_and(|invoice| invoice.settled.is_some())
    }

    pub fn is_authorized(&self) -> bool {
        self.outcome
            .as_success()
            .is_some_and(|invoice| invoice.authorized.is_some())
    }
}

impl Response for CompletePurchaseResponse {
    type Resource = Invoice;

    fn outcome(&self) -> &Outcome<Invoice> {
        &self.outcome
    }

    fn is_successful(&self) -> bool {
        self.outcome
            .as_success()
            .is_some_and(|invoice| state_in(&invoice.state, &["authorized", "settled", "paid"]))
    }

    fn transaction_reference(&self) -> Option<&str> {
        self.outcome.as_success()?.id.as_deref()
    }

    fn state(&self) -> Option<&str> {
        self.outcome.as_success()?.state.as_deref()
    }

    fn is_pending(&self) -> bool {
        self.outcome
            .as_success()
            .is_some_and(|invoice| state_in(&invoice.state, &["pending", "processing"]))
    }
}
