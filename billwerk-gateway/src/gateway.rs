use std::sync::Arc;

use crate::{
    config::GatewayConfig,
    message::{
        AuthorizeParams, AuthorizeRequest, CancelSubscriptionParams, CancelSubscriptionRequest,
        CaptureParams, CaptureRequest, CompleteAuthorizeParams, CompleteAuthorizeRequest,
        CompletePurchaseParams, CompletePurchaseRequest, CreateCardParams, CreateCardRequest,
        CreateCustomerParams, CreateCustomerRequest, CreateSubscriptionParams,
        CreateSubscriptionRequest, DeleteCardParams, DeleteCardRequest, FetchCustomerParams,
        FetchCustomerRequest, FetchTransactionParams, FetchTransactionRequest, PendingRequest,
        PurchaseParams, PurchaseRequest, RefundParams, RefundRequest, UpdateCustomerParams,
        UpdateCustomerRequest, VoidParams, VoidRequest,
    },
    provider::Provider,
};

/// Entry point of the Billwerk gateway.
///
/// Every operation returns a pending request. Nothing is sent before
/// [`Request::send`](crate::message::Request::send) is awaited.
#[derive(Debug, Clone)]
pub struct Gateway<P: Provider + Clone> {
    provider: P,
    config: Arc<GatewayConfig>,
}

#[cfg(feature = "http-client")]
impl Gateway<crate::provider_client::HttpProvider> {
    /// A gateway calling the Billwerk REST API over HTTP.
    pub fn http(
        config: GatewayConfig,
    ) -> Result<Self, crate::provider_client::HttpProviderError> {
        let provider = crate::provider_client::HttpProvider::new(&config)?;
        Ok(Gateway::new(provider, config))
    }
}

impl<P: Provider + Clone> Gateway<P> {
    pub fn new(provider: P, config: GatewayConfig) -> Self {
        Gateway {
            provider,
            config: Arc::new(config),
        }
    }

    pub fn name(&self) -> &'static str {
        "Billwerk"
    }

    pub fn short_name(&self) -> &'static str {
        "Billwerk"
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn api_key(&self) -> &str {
        &self.config.api_key
    }

    pub fn test_mode(&self) -> bool {
        self.config.test_mode
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn request<O>(&self, params: O) -> PendingRequest<P, O> {
        PendingRequest::new(self.provider.clone(), self.config.clone(), params)
    }

    /// Create a hosted checkout session for a one-off, immediately settled charge.
    pub fn purchase(&self, params: PurchaseParams) -> PurchaseRequest<P> {
        self.request(params)
    }

    /// Look up the invoice of a checkout after the customer returned.
    pub fn complete_purchase(&self, params: CompletePurchaseParams) -> CompletePurchaseRequest<P> {
        self.request(params)
    }

    /// Create an unsettled charge on a customer's saved payment method.
    pub fn authorize(&self, params: AuthorizeParams) -> AuthorizeRequest<P> {
        self.request(params)
    }

    pub fn complete_authorize(
        &self,
        params: CompleteAuthorizeParams,
    ) -> CompleteAuthorizeRequest<P> {
        self.request(params)
    }

    /// Settle an authorized charge.
    pub fn capture(&self, params: CaptureParams) -> CaptureRequest<P> {
        self.request(params)
    }

    pub fn refund(&self, params: RefundParams) -> RefundRequest<P> {
        self.request(params)
    }

    /// Cancel an authorized charge.
    pub fn void(&self, params: VoidParams) -> VoidRequest<P> {
        self.request(params)
    }

    /// Create a hosted checkout session that saves a payment method.
    pub fn create_card(&self, params: CreateCardParams) -> CreateCardRequest<P> {
        self.request(params)
    }

    pub fn delete_card(&self, params: DeleteCardParams) -> DeleteCardRequest<P> {
        self.request(params)
    }

    pub fn fetch_transaction(&self, params: FetchTransactionParams) -> FetchTransactionRequest<P> {
        self.request(params)
    }

    pub fn create_customer(&self, params: CreateCustomerParams) -> CreateCustomerRequest<P> {
        self.request(params)
    }

    pub fn update_customer(&self, params: UpdateCustomerParams) -> UpdateCustomerRequest<P> {
        self.request(params)
    }

    pub fn fetch_customer(&self, params: FetchCustomerParams) -> FetchCustomerRequest<P> {
        self.request(params)
    }

    pub fn create_subscription(
        &self,
        params: CreateSubscriptionParams,
    ) -> CreateSubscriptionRequest<P> {
        self.request(params)
    }

    pub fn cancel_subscription(
        &self,
        params: CancelSubscriptionParams,
    ) -> CancelSubscriptionRequest<P> {
        self.request(params)
    }
}
