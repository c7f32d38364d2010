use serde::{Deserialize, Serialize};

use super::address::Address;
use super::domain::ValidationError;

/// Partial update for the address owned by a rental.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AddressPatch {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

impl AddressPatch {
    pub fn is_empty(&self) -> bool {
        self.street.is_none() && self.city.is_none() && self.state.is_none() && self.zip.is_none()
    }

    /// Apply to `address`, stopping at the first rejected field.
    ///
    /// Callers that need all-or-nothing semantics apply to a copy first.
    pub(crate) fn apply_to(&self, address: &mut Address) -> Result<(), ValidationError> {
        if let Some(state) = &self.state {
            address.set_state(state.as_str())?;
        }
        if let Some(zip) = &self.zip {
            address.set_zip(zip.as_str())?;
        }
        if let Some(street) = &self.street {
            address.street = street.clone();
        }
        if let Some(city) = &self.city {
            address.city = city.clone();
        }
        Ok(())
    }
}

/// Partial update for a rental. Fields left as `None` are not touched.
///
/// Field names are camelCase on the wire so a form layer can post a patch as JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RentalPatch {
    pub name: Option<String>,
    pub address: Option<AddressPatch>,
    pub tenant_name: Option<String>,
    pub tenant_phone_number: Option<String>,
    pub rent_per_month: Option<f64>,
    #[serde(alias = "moragagePerMonth")]
    pub mortgage_per_month: Option<f64>,
    #[serde(alias = "maintencePerMonth")]
    pub maintenance_per_month: Option<f64>,
    pub misc_per_month: Option<f64>,
}

impl RentalPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn address(mut self, address: AddressPatch) -> Self {
        self.address = Some(address);
        self
    }

    pub fn tenant_name(mut self, name: impl Into<String>) -> Self {
        self.tenant_name = Some(name.into());
        self
    }

    pub fn tenant_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.tenant_phone_number = Some(phone_number.into());
        self
    }

    pub fn rent_per_month(mut self, rent: f64) -> Self {
        self.rent_per_month = Some(rent);
        self
    }

    pub fn mortgage_per_month(mut self, cost: f64) -> Self {
        self.mortgage_per_month = Some(cost);
        self
    }

    pub fn maintenance_per_month(mut self, cost: f64) -> Self {
        self.maintenance_per_month = Some(cost);
        self
    }

    pub fn misc_per_month(mut self, cost: f64) -> Self {
        self.misc_per_month = Some(cost);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.as_ref().map_or(true, AddressPatch::is_empty)
            && self.tenant_name.is_none()
            && self.tenant_phone_number.is_none()
            && self.rent_per_month.is_none()
            && self.mortgage_per_month.is_none()
            && self.maintenance_per_month.is_none()
            && self.misc_per_month.is_none()
    }

    /// True when the patch can change the `(name, address)` identity.
    pub fn touches_identity(&self) -> bool {
        self.name.is_some() || self.address.as_ref().is_some_and(|patch| !patch.is_empty())
    }
}
