use bon::Builder;

use crate::{
    config::GatewayConfig,
    errors::Result,
    message::{Operation, PendingRequest, Response, optional, required, state_in},
    provider::{Outcome, Provider},
    transport::{Subscription, SubscriptionCancelRequest, SubscriptionCreateRequest},
    types::Handle,
};

/// Subscribe a customer to a plan.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateSubscriptionParams {
    #[builder(into)]
    pub customer_reference: Option<String>,
    /// Plan handle.
    #[builder(into)]
    pub plan: Option<String>,
    /// Subscription handle. Generated when absent.
    #[builder(into)]
    pub subscription_reference: Option<String>,
    /// Start date, `YYYY-MM-DD`. Billwerk starts immediately when absent.
    #[builder(into)]
    pub start_date: Option<String>,
    #[builder(into)]
    pub description: Option<String>,
    /// Saved payment method to charge.
    #[builder(into)]
    pub card_reference: Option<String>,
}

pub type CreateSubscriptionRequest<P> = PendingRequest<P, CreateSubscriptionParams>;

impl Operation for CreateSubscriptionParams {
    const NAME: &'static str = "create_subscription";

    type Payload = SubscriptionCreateRequest;
    type Resource = Subscription;
    type Response = CreateSubscriptionResponse;

    fn to_payload(&self, _config: &GatewayConfig) -> Result<SubscriptionCreateRequest> {
        let customer = required(&self.customer_reference, "customer_reference")?.to_string();
        let plan = required(&self.plan, "plan")?.to_string();

        Ok(SubscriptionCreateRequest {
            handle: Handle::supplied_or_generate(self.subscription_reference.as_deref(), "sub"),
            customer,
            plan,
            start_date: optional(&self.start_date),
            description: optional(&self.description),
            source: optional(&self.card_reference),
        })
    }

    fn call<P: Provider>(
        provider: &P,
        payload: SubscriptionCreateRequest,
    ) -> impl Future<Output = std::result::Result<Subscription, P::Error>> {
        provider.create_subscription(payload)
    }
}

outcome_response!(CreateSubscriptionResponse, Subscription);

impl CreateSubscriptionResponse {
    pub fn subscription_reference(&self) -> Option<&str> {
        self.outcome.as_success()?.handle.as_deref()
    }
}

impl Response for CreateSubscriptionResponse {
    type Resource = Subscription;

    fn outcome(&self) -> &Outcome<Subscription> {
        &self.outcome
    }

    fn is_successful(&self) -> bool {
        self.subscription_reference().is_some()
    }

    fn transaction_reference(&self) -> Option<&str> {
        self.subscription_reference()
    }

    fn state(&self) -> Option<&str> {
        self.outcome.as_success()?.state.as_deref()
    }
}

#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct CancelSubscriptionParams {
    #[builder(into)]
    pub subscription_reference: Option<String>,
}

pub type CancelSubscriptionRequest<P> = PendingRequest<P, CancelSubscriptionParams>;

impl Operation for CancelSubscriptionParams {
    const NAME: &'static str = "cancel_subscription";

    type Payload = SubscriptionCancelRequest;
    type Resource = Subscription;
    type Response = CancelSubscriptionResponse;

    fn to_payload(&self, _config: &GatewayConfig) -> Result<SubscriptionCancelRequest> {
        let handle = required(&self.subscription_reference, "subscription_reference")?.to_string();
        Ok(SubscriptionCancelRequest { handle })
    }

    fn call<P: Provider>(
        provider: &P,
        payload: SubscriptionCancelRequest,
    ) -> impl Future<Output = std::result::Result<Subscription, P::Error>> {
        provider.cancel_subscription(payload)
    }
}

outcome_response!(CancelSubscriptionResponse, Subscription);

impl CancelSubscriptionResponse {
    /// Whether Billwerk accepted the cancel call.
    pub fn is_cancelled(&self) -> bool {
        self.outcome.is_success()
    }

    pub fn subscription_reference(&self) -> Option<&str> {
        self.outcome.as_success()?.handle.as_deref()
    }
}

impl Response for CancelSubscriptionResponse {
    type Resource = Subscription;

    fn outcome(&self) -> &Outcome<Subscription> {
        &self.outcome
    }

    fn is_successful(&self) -> bool {
        self.outcome
            .as_success()
            .is_some_and(|sub| state_in(&sub.state, &["cancelled"]))
    }

    fn transaction_reference(&self) -> Option<&str> {
        self.subscription_reference()
    }

    fn state(&self) -> Option<&str> {
        self.outcome.as_success()?.state.as_deref()
    }
}
