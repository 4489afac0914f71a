//! Core types shared by the operation parameters of the Billwerk gateway.

use bon::Builder;

/// Contact and address details of a customer.
///
/// Used by `purchase` to seed the checkout customer, and by the customer
/// operations to create or update a Billwerk customer.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDetails {
    #[builder(into)]
    pub email: Option<String>,
    #[builder(into)]
    pub first_name: Option<String>,
    #[builder(into)]
    pub last_name: Option<String>,
    #[builder(into)]
    pub phone: Option<String>,
    #[builder(into)]
    pub company: Option<String>,
    /// First address line.
    #[builder(into)]
    pub address1: Option<String>,
    /// Second address line. Only sent alongside `address1`.
    #[builder(into)]
    pub address2: Option<String>,
    #[builder(into)]
    pub city: Option<String>,
    #[builder(into)]
    pub postcode: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    #[builder(into)]
    pub country: Option<String>,
}

impl CustomerDetails {
    pub fn email(&self) -> Option<&str> {
        non_empty(&self.email)
    }

    pub fn first_name(&self) -> Option<&str> {
        non_empty(&self.first_name)
    }

    pub fn last_name(&self) -> Option<&str> {
        non_empty(&self.last_name)
    }

    pub fn phone(&self) -> Option<&str> {
        non_empty(&self.phone)
    }

    pub fn company(&self) -> Option<&str> {
        non_empty(&self.company)
    }

    pub fn address1(&self) -> Option<&str> {
        non_empty(&self.address1)
    }

    /// The second address line, dropped when there is no first line.
    pub fn address2(&self) -> Option<&str> {
        self.address1().and(non_empty(&self.address2))
    }

    pub fn city(&self) -> Option<&str> {
        non_empty(&self.city)
    }

    pub fn postcode(&self) -> Option<&str> {
        non_empty(&self.postcode)
    }

    pub fn country(&self) -> Option<&str> {
        non_empty(&self.country)
    }
}

/// Treat empty or whitespace-only strings as absent.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
