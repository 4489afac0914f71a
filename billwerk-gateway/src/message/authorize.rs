use bon::Builder;

use crate::{
    config::GatewayConfig,
    errors::Result,
    message::{
        Operation, PendingRequest, Response, optional, optional_amount, required,
        required_amount, required_currency, resolve_reference, state_in,
    },
    provider::{Outcome, Provider},
    transport::{
        Charge, ChargeCancelRequest, ChargeCreateRequest, ChargeLookup, ChargeSettleRequest,
    },
    types::{Amount, Handle, QueryParams},
};

/// Authorize a charge on a saved payment method without settling it.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizeParams {
    #[builder(into)]
    pub amount: Option<Amount>,
    #[builder(into)]
    pub currency: Option<String>,
    /// Handle of the customer to charge.
    #[builder(into)]
    pub customer_reference: Option<String>,
    /// Charge handle. Generated when absent.
    #[builder(into)]
    pub transaction_id: Option<String>,
    /// Saved payment method, e.g. `ca_...`.
    #[builder(into)]
    pub card_reference: Option<String>,
    #[builder(into)]
    pub description: Option<String>,
}

pub type AuthorizeRequest<P> = PendingRequest<P, AuthorizeParams>;

impl Operation for AuthorizeParams {
    const NAME: &'static str = "authorize";

    type Payload = ChargeCreateRequest;
    type Resource = Charge;
    type Response = AuthorizeResponse;

    fn to_payload(&self, _config: &GatewayConfig) -> Result<ChargeCreateRequest> {
        let currency = required_currency(&self.currency)?;
        let amount = required_amount(&self.amount, &currency)?;
        let customer = required(&self.customer_reference, "customer_reference")?.to_string();

        Ok(ChargeCreateRequest {
            handle: Handle::supplied_or_generate(self.transaction_id.as_deref(), "charge"),
            customer,
            amount,
            currency,
            settle: false,
            ordertext: optional(&self.description),
            source: optional(&self.card_reference),
        })
    }

    fn call<P: Provider>(
        provider: &P,
        payload: ChargeCreateRequest,
    ) -> impl Future<Output = std::result::Result<Charge, P::Error>> {
        provider.create_charge(payload)
    }
}

outcome_response!(AuthorizeResponse, Charge);

impl AuthorizeResponse {
    /// Whether Billwerk reported an authorization time for the charge.
    pub fn is_authorized(&self) -> bool {
        charge_authorized(&self.outcome)
    }
}

impl Response for AuthorizeResponse {
    type Resource = Charge;

    fn outcome(&self) -> &Outcome<Charge> {
        &self.outcome
    }

    fn is_successful(&self) -> bool {
        charge_in_state(&self.outcome, "authorized")
    }

    fn transaction_reference(&self) -> Option<&str> {
        charge_handle(&self.outcome)
    }

    fn state(&self) -> Option<&str> {
        charge_state(&self.outcome)
    }
}

/// Look up a charge after the customer returned from an authorization flow.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct CompleteAuthorizeParams {
    /// Query of the accept URL request. `charge` or `id` are used when present.
    #[builder(into, default)]
    pub query: QueryParams,
    /// Charge handle used when the query carries none.
    #[builder(into)]
    pub transaction_reference: Option<String>,
}

pub type CompleteAuthorizeRequest<P> = PendingRequest<P, CompleteAuthorizeParams>;

impl Operation for CompleteAuthorizeParams {
    const NAME: &'static str = "complete_authorize";

    type Payload = ChargeLookup;
    type Resource = Charge;
    type Response = CompleteAuthorizeResponse;

    fn to_payload(&self, _config: &GatewayConfig) -> Result<ChargeLookup> {
        let charge = resolve_reference(&self.query, "charge", &self.transaction_reference)?;
        Ok(ChargeLookup { charge })
    }

    fn call<P: Provider>(
        provider: &P,
        payload: ChargeLookup,
    ) -> impl Future<Output = std::result::Result<Charge, P::Error>> {
        provider.get_charge(payload)
    }
}

outcome_response!(CompleteAuthorizeResponse, Charge);

impl CompleteAuthorizeResponse {
    pub fn is_authorized(&self) -> bool {
        charge_authorized(&self.outcome)
    }
}

impl Response for CompleteAuthorizeResponse {
    type Resource = Charge;

    fn outcome(&self) -> &Outcome<Charge> {
        &self.outcome
    }

    fn is_successful(&self) -> bool {
        charge_in_state(&self.outcome, "authorized")
    }

    fn transaction_reference(&self) -> Option<&str> {
        charge_handle(&self.outcome)
    }

    fn state(&self) -> Option<&str> {
        charge_state(&self.outcome)
    }
}

/// Settle an authorized charge, fully or partially.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureParams {
    /// Charge handle.
    #[builder(into)]
    pub transaction_reference: Option<String>,
    /// Partial amount. Settles the authorized amount when absent.
    #[builder(into)]
    pub amount: Option<Amount>,
    /// Needed to convert `amount`.
    #[builder(into)]
    pub currency: Option<String>,
}

pub type CaptureRequest<P> = PendingRequest<P, CaptureParams>;

impl Operation for CaptureParams {
    const NAME: &'static str = "capture";

    type Payload = ChargeSettleRequest;
    type Resource = Charge;
    type Response = CaptureResponse;

    fn to_payload(&self, _config: &GatewayConfig) -> Result<ChargeSettleRequest> {
        let handle = required(&self.transaction_reference, "transaction_reference")?.to_string();
        let amount = optional_amount(&self.amount, &self.currency)?;
        Ok(ChargeSettleRequest { handle, amount })
    }

    fn call<P: Provider>(
        provider: &P,
        payload: ChargeSettleRequest,
    ) -> impl Future<Output = std::result::Result<Charge, P::Error>> {
        provider.settle_charge(payload)
    }
}

outcome_response!(CaptureResponse, Charge);

impl CaptureResponse {
    /// Whether Billwerk reported a settle time for the charge.
    pub fn is_settled(&self) -> bool {
        self.outcome
            .as_success()
            .is_some_and(|charge| charge.settled.is_some())
    }
}

impl Response for CaptureResponse {
    type Resource = Charge;

    fn outcome(&self) -> &Outcome<Charge> {
        &self.outcome
    }

    fn is_successful(&self) -> bool {
        charge_in_state(&self.outcome, "settled")
    }

    fn transaction_reference(&self) -> Option<&str> {
        charge_handle(&self.outcome)
    }

    fn state(&self) -> Option<&str> {
        charge_state(&self.outcome)
    }
}

/// Cancel an authorized, unsettled charge.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct VoidParams {
    /// Charge handle.
    #[builder(into)]
    pub transaction_reference: Option<String>,
}

pub type VoidRequest<P> = PendingRequest<P, VoidParams>;

impl Operation for VoidParams {
    const NAME: &'static str = "void";

    type Payload = ChargeCancelRequest;
    type Resource = Charge;
    type Response = VoidResponse;

    fn to_payload(&self, _config: &GatewayConfig) -> Result<ChargeCancelRequest> {
        let handle = required(&self.transaction_reference, "transaction_reference")?.to_string();
        Ok(ChargeCancelRequest { handle })
    }

    fn call<P: Provider>(
        provider: &P,
        payload: ChargeCancelRequest,
    ) -> impl Future<Output = std::result::Result<Charge, P::Error>> {
        provider.cancel_charge(payload)
    }
}

outcome_response!(VoidResponse, Charge);

impl VoidResponse {
    /// Whether Billwerk accepted the cancel call.
    pub fn is_cancelled(&self) -> bool {
        self.outcome.is_success()
    }
}

impl Response for VoidResponse {
    type Resource = Charge;

    fn outcome(&self) -> &Outcome<Charge> {
        &self.outcome
    }

    fn is_successful(&self) -> bool {
        charge_in_state(&self.outcome, "cancelled")
    }

    fn transaction_reference(&self) -> Option<&str> {
        charge_handle(&self.outcome)
    }

    fn state(&self) -> Option<&str> {
        charge_state(&self.outcome)
    }
}

fn charge_in_state(outcome: &Outcome<Charge>, state: &str) -> bool {
    outcome
        .as_success()
        .is_some_and(|charge| state_in(&charge.state, &[state]))
}

fn charge_handle(outcome: &Outcome<Charge>) -> Option<&str> {
    outcome.as_success()?.handle.as_deref()
}

fn charge_state(outcome: &Outcome<Charge>) -> Option<&str> {
    outcome.as_success()?.state.as_deref()
}

fn charge_authorized(outcome: &Outcome<Charge>) -> bool {
    outcome
        .as_success()
        .is_some_and(|charge| charge.authorized.is_some())
}
