use bon::Builder;

use crate::{
    config::GatewayConfig,
    errors::Result,
    message::{Operation, PendingRequest, Response, required},
    provider::{Outcome, Provider},
    transport::{Transaction, TransactionLookup},
};

#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchTransactionParams {
    /// Transaction id.
    #[builder(into)]
    pub transaction_reference: Option<String>,
}

pub type FetchTransactionRequest<P> = PendingRequest<P, FetchTransactionParams>;

impl Operation for FetchTransactionParams {
    const NAME: &'static str = "fetch_transaction";

    type Payload = TransactionLookup;
    type Resource = Transaction;
    type Response = FetchTransactionResponse;

    fn to_payload(&self, _config: &GatewayConfig) -> Result<TransactionLookup> {
        let id = required(&self.transaction_reference, "transaction_reference")?.to_string();
        Ok(TransactionLookup { id })
    }

    fn call<P: Provider>(
        provider: &P,
        payload: TransactionLookup,
    ) -> impl Future<Output = std::result::Result<Transaction, P::Error>> {
        provider.get_transaction(payload)
    }
}

outcome_response!(FetchTransactionResponse, Transaction);

impl FetchTransactionResponse {
    /// Billwerk transaction type, e.g. `settle` or `refund`.
    pub fn transaction_type(&self) -> Option<&str> {
        self.outcome.as_success()?.transaction_type.as_deref()
    }
}

impl Response for FetchTransactionResponse {
    type Resource = Transaction;

    fn outcome(&self) -> &Outcome<Transaction> {
        &self.outcome
    }

    fn is_successful(&self) -> bool {
        self.transaction_reference().is_some()
    }

    fn transaction_reference(&self) -> Option<&str> {
        self.outcome.as_success()?.id.as_deref()
    }

    fn state(&self) -> Option<&str> {
        self.outcome.as_success()?.state.as_deref()
    }
}
