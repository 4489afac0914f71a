use bon::Builder;
use url::Url;

use crate::{
    config::GatewayConfig,
    errors::Result,
    message::{Operation, PendingRequest, Response, required, state_in},
    provider::{Outcome, Provider},
    transport::{PaymentMethod, PaymentMethodInactivateRequest, RecurringSessionRequest, Session},
};

/// Hosted checkout that saves a payment method on a customer.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateCardParams {
    #[builder(into)]
    pub customer_reference: Option<String>,
    pub return_url: Option<Url>,
    pub cancel_url: Option<Url>,
}

pub type CreateCardRequest<P> = PendingRequest<P, CreateCardParams>;

impl Operation for CreateCardParams {
    const NAME: &'static str = "create_card";

    type Payload = RecurringSessionRequest;
    type Resource = Session;
    type Response = CreateCardResponse;

    fn to_payload(&self, config: &GatewayConfig) -> Result<RecurringSessionRequest> {
        let customer = required(&self.customer_reference, "customer_reference")?.to_string();

        Ok(RecurringSessionRequest {
            customer,
            accept_url: self.return_url.clone().or_else(|| config.return_url.clone()),
            cancel_url: self.cancel_url.clone().or_else(|| config.cancel_url.clone()),
        })
    }

    fn call<P: Provider>(
        provider: &P,
        payload: RecurringSessionRequest,
    ) -> impl Future<Output = std::result::Result<Session, P::Error>> {
        provider.recurring_session(payload)
    }
}

outcome_response!(CreateCardResponse, Session);

impl Response for CreateCardResponse {
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

/// Inactivate a saved payment method.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteCardParams {
    /// Payment method id, e.g. `ca_...`.
    #[builder(into)]
    pub card_reference: Option<String>,
}

pub type DeleteCardRequest<P> = PendingRequest<P, DeleteCardParams>;

impl Operation for DeleteCardParams {
    const NAME: &'static str = "delete_card";

    type Payload = PaymentMethodInactivateRequest;
    type Resource = PaymentMethod;
    type Response = DeleteCardResponse;

    fn to_payload(&self, _config: &GatewayConfig) -> Result<PaymentMethodInactivateRequest> {
        let id = required(&self.card_reference, "card_reference")?.to_string();
        Ok(PaymentMethodInactivateRequest { id })
    }

    fn call<P: Provider>(
        provider: &P,
        payload: PaymentMethodInactivateRequest,
    ) -> impl Future<Output = std::result::Result<PaymentMethod, P::Error>> {
        provider.inactivate_payment_method(payload)
    }
}

outcome_response!(DeleteCardResponse, PaymentMethod);

impl DeleteCardResponse {
    /// Whether Billwerk accepted the inactivate call.
    pub fn is_deleted(&self) -> bool {
        self.outcome.is_success()
    }
}

impl Response for DeleteCardResponse {
    type Resource = PaymentMethod;

    fn outcome(&self) -> &Outcome<PaymentMethod> {
        &self.outcome
    }

    fn is_successful(&self) -> bool {
        self.outcome
            .as_success()
            .is_some_and(|method| state_in(&method.state, &["inactivated"]))
    }

    fn transaction_reference(&self) -> Option<&str> {
        self.outcome.as_success()?.id.as_deref()
    }

    fn state(&self) -> Option<&str> {
        self.outcome.as_success()?.state.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::errors::Error;

    #[test]
    fn create_card_uses_customer_and_urls() {
        let config = GatewayConfig::builder()
            .return_url(Url::parse("https://shop.example.com/cards/saved").unwrap())
            .build();
        let params = CreateCardParams::builder()
            .customer_reference("cust-1")
            .build();

        assert_eq!(
            serde_json::to_value(params.to_payload(&config).unwrap()).unwrap(),
            json!({
                "customer": "cust-1",
                "accept_url": "https://shop.example.com/cards/saved"
            })
        );
    }

    #[test]
    fn create_card_requires_customer() {
        assert!(matches!(
            CreateCardParams::default().to_payload(&GatewayConfig::default()),
            Err(Error::MissingParameter("customer_reference"))
        ));
    }

    #[test]
    fn create_card_redirects() {
        let response = CreateCardResponse::new(Outcome::success(Session {
            id: Some("cs_rec_1".to_string()),
            url: Some("https://checkout.reepay.com/#/cs_rec_1".to_string()),
        }));

        assert!(!response.is_successful());
        assert!(response.is_redirect());
        assert_eq!(
            response.redirect_url(),
            Some("https://checkout.reepay.com/#/cs_rec_1")
        );
    }

    #[test]
    fn delete_card_states() {
        let inactivated = DeleteCardResponse::new(Outcome::success(PaymentMethod {
            id: Some("ca_1".to_string()),
            state: Some("inactivated".to_string()),
            ..Default::default()
        }));
        assert!(inactivated.is_successful());
        assert!(inactivated.is_deleted());
        assert_eq!(inactivated.transaction_reference(), Some("ca_1"));

        let failed = DeleteCardResponse::new(Outcome::failed("Payment method not found", None));
        assert!(!failed.is_successful());
        assert!(!failed.is_deleted());
    }
}
