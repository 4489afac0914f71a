use bon::Builder;

use crate::{
    config::GatewayConfig,
    errors::Result,
    message::{Operation, PendingRequest, Response, optional, optional_amount, required, state_in},
    provider::{Outcome, Provider},
    transport::{Refund, RefundCreateRequest},
    types::Amount,
};

/// Refund a settled invoice, fully or partially.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct RefundParams {
    /// Invoice handle or id.
    #[builder(into)]
    pub transaction_reference: Option<String>,
    /// Partial amount. Refunds the settled amount when absent.
    #[builder(into)]
    pub amount: Option<Amount>,
    /// Needed to convert `amount`.
    #[builder(into)]
    pub currency: Option<String>,
    /// Refund text shown to the customer.
    #[builder(into)]
    pub description: Option<String>,
}

pub type RefundRequest<P> = PendingRequest<P, RefundParams>;

impl Operation for RefundParams {
    const NAME: &'static str = "refund";

    type Payload = RefundCreateRequest;
    type Resource = Refund;
    type Response = RefundResponse;

    fn to_payload(&self, _config: &GatewayConfig) -> Result<RefundCreateRequest> {
        let invoice = required(&self.transaction_reference, "transaction_reference")?.to_string();

        Ok(RefundCreateRequest {
            invoice,
            amount: optional_amount(&self.amount, &self.currency)?,
            text: optional(&self.description),
        })
    }

    fn call<P: Provider>(
        provider: &P,
        payload: RefundCreateRequest,
    ) -> impl Future<Output = std::result::Result<Refund, P::Error>> {
        provider.create_refund(payload)
    }
}

outcome_response!(RefundResponse, Refund);

impl Response for RefundResponse {
    type Resource = Refund;

    fn outcome(&self) -> &Outcome<Refund> {
        &self.outcome
    }

    /// Refunds still `processing` are accepted by Billwerk and count as successful.
    fn is_successful(&self) -> bool {
        self.outcome
            .as_success()
            .is_some_and(|refund| state_in(&refund.state, &["refunded", "processing"]))
    }

    fn transaction_reference(&self) -> Option<&str> {
        self.outcome.as_success()?.id.as_deref()
    }

    fn state(&self) -> Option<&str> {
        self.outcome.as_success()?.state.as_deref()
    }
}
