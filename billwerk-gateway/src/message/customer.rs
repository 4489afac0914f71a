use bon::Builder;

use crate::{
    config::GatewayConfig,
    core::CustomerDetails,
    errors::Result,
    message::{Operation, PendingRequest, Response, required},
    provider::{Outcome, Provider},
    transport::{Customer, CustomerLookup, CustomerRequest},
    types::Handle,
};

#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateCustomerParams {
    /// Customer handle. Generated when absent.
    #[builder(into)]
    pub customer_reference: Option<String>,
    pub customer: Option<CustomerDetails>,
}

pub type CreateCustomerRequest<P> = PendingRequest<P, CreateCustomerParams>;

impl Operation for CreateCustomerParams {
    const NAME: &'static str = "create_customer";

    type Payload = CustomerRequest;
    type Resource = Customer;
    type Response = CustomerResponse;

    fn to_payload(&self, _config: &GatewayConfig) -> Result<CustomerRequest> {
        let handle = Handle::supplied_or_generate(self.customer_reference.as_deref(), "customer");
        Ok(customer_request(handle, self.customer.as_ref()))
    }

    fn call<P: Provider>(
        provider: &P,
        payload: CustomerRequest,
    ) -> impl Future<Output = std::result::Result<Customer, P::Error>> {
        provider.create_customer(payload)
    }
}

#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateCustomerParams {
    #[builder(into)]
    pub customer_reference: Option<String>,
    /// Only the fields set here are changed.
    pub customer: Option<CustomerDetails>,
}

pub type UpdateCustomerRequest<P> = PendingRequest<P, UpdateCustomerParams>;

impl Operation for UpdateCustomerParams {
    const NAME: &'static str = "update_customer";

    type Payload = CustomerRequest;
    type Resource = Customer;
    type Response = CustomerResponse;

    fn to_payload(&self, _config: &GatewayConfig) -> Result<CustomerRequest> {
        let handle = required(&self.customer_reference, "customer_reference")?;
        Ok(customer_request(
            Handle::Supplied(handle.to_string()),
            self.customer.as_ref(),
        ))
    }

    fn call<P: Provider>(
        provider: &P,
        payload: CustomerRequest,
    ) -> impl Future<Output = std::result::Result<Customer, P::Error>> {
        provider.update_customer(payload)
    }
}

#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchCustomerParams {
    #[builder(into)]
    pub customer_reference: Option<String>,
}

pub type FetchCustomerRequest<P> = PendingRequest<P, FetchCustomerParams>;

impl Operation for FetchCustomerParams {
    const NAME: &'static str = "fetch_customer";

    type Payload = CustomerLookup;
    type Resource = Customer;
    type Response = CustomerResponse;

    fn to_payload(&self, _config: &GatewayConfig) -> Result<CustomerLookup> {
        let handle = required(&self.customer_reference, "customer_reference")?.to_string();
        Ok(CustomerLookup { handle })
    }

    fn call<P: Provider>(
        provider: &P,
        payload: CustomerLookup,
    ) -> impl Future<Output = std::result::Result<Customer, P::Error>> {
        provider.get_customer(payload)
    }
}

fn customer_request(handle: Handle, details: Option<&CustomerDetails>) -> CustomerRequest {
    let field = |get: fn(&CustomerDetails) -> Option<&str>| {
        details.and_then(get).map(str::to_string)
    };

    CustomerRequest {
        handle,
        email: field(CustomerDetails::email),
        first_name: field(CustomerDetails::first_name),
        last_name: field(CustomerDetails::last_name),
        phone: field(CustomerDetails::phone),
        company: field(CustomerDetails::company),
        address: field(CustomerDetails::address1),
        address2: field(CustomerDetails::address2),
        city: field(CustomerDetails::city),
        postal_code: field(CustomerDetails::postcode),
        country: field(CustomerDetails::country),
    }
}

outcome_response!(
    /// Response of the create, update and fetch customer operations.
    CustomerResponse,
    Customer
);

impl CustomerResponse {
    pub fn customer_reference(&self) -> Option<&str> {
        self.outcome.as_success()?.handle.as_deref()
    }
}

impl Response for CustomerResponse {
    type Resource = Customer;

    fn outcome(&self) -> &Outcome<Customer> {
        &self.outcome
    }

    fn is_successful(&self) -> bool {
        self.customer_reference().is_some()
    }

    fn transaction_reference(&self) -> Option<&str> {
        self.customer_reference()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::errors::Error;

    #[test]
    fn create_customer_copies_all_details() {
        let params = CreateCustomerParams::builder()
            .customer_reference("cust-1")
            .customer(
                CustomerDetails::builder()
                    .email("ada@example.com")
                    .first_name("Ada")
                    .last_name("Lovelace")
                    .company("Analytical Engines Ltd")
                    .address1("Main St 1")
                    .address2("Floor 2")
                    .city("London")
                    .postcode("N1")
                    .country("GB")
                    .build(),
            )
            .build();

        assert_eq!(
            serde_json::to_value(params.to_payload(&GatewayConfig::default()).unwrap()).unwrap(),
            json!({
                "handle": "cust-1",
                "email": "ada@example.com",
                "first_name": "Ada",
                "last_name": "Lovelace",
                "company": "Analytical Engines Ltd",
                "address": "Main St 1",
                "address2": "Floor 2",
                "city": "London",
                "postal_code": "N1",
                "country": "GB"
            })
        );
    }

    #[test]
    fn create_customer_without_details_sends_only_a_handle() {
        let payload = CreateCustomerParams::default()
            .to_payload(&GatewayConfig::default())
            .unwrap();

        assert!(payload.handle.is_generated());
        assert!(payload.handle.as_str().starts_with("customer_"));
        assert_eq!(payload.email, None);
    }

    #[test]
    fn update_and_fetch_require_customer_reference() {
        let config = GatewayConfig::default();
        assert!(matches!(
            UpdateCustomerParams::default().to_payload(&config),
            Err(Error::MissingParameter("customer_reference"))
        ));
        assert!(matches!(
            FetchCustomerParams::default().to_payload(&config),
            Err(Error::MissingParameter("customer_reference"))
        ));
    }

    #[test]
    fn update_customer_sends_only_changed_fields() {
        let params = UpdateCustomerParams::builder()
            .customer_reference("cust-1")
            .customer(CustomerDetails::builder().phone("+4512345678").build())
            .build();

        assert_eq!(
            serde_json::to_value(params.to_payload(&GatewayConfig::default()).unwrap()).unwrap(),
            json!({ "handle": "cust-1", "phone": "+4512345678" })
        );
    }

    #[test]
    fn customer_response_reference() {
        let response = CustomerResponse::new(Outcome::success(Customer {
            handle: Some("cust-1".to_string()),
            ..Default::default()
        }));
        assert!(response.is_successful());
        assert_eq!(response.customer_reference(), Some("cust-1"));
        assert_eq!(response.transaction_reference(), Some("cust-1"));

        let failed = CustomerResponse::new(Outcome::failed("Duplicate handle", None));
        assert!(!failed.is_successful());
        assert_eq!(failed.customer_reference(), None);
    }

    #[test]
    fn create_customer_minimal_payload() {
        let params = CreateCustomerParams::builder()
            .customer_reference("cust-1")
            .build();

        assert_eq!(
            serde_json::to_value(params.to_payload(&GatewayConfig::default()).unwrap()).unwrap(),
            json!({ "handle": "cust-1" })
        );
    }

    #[test]
    fn fetch_customer_minimal_payload() {
        let params = FetchCustomerParams::builder()
            .customer_reference("cust-1")
            .build();

        assert_eq!(
            serde_json::to_value(params.to_payload(&GatewayConfig::default()).unwrap()).unwrap(),
            json!({ "handle": "cust-1" })
        );
    }
}
