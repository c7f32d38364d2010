use serde::{Deserialize, Serialize};
use std::fmt;

use super::address::{Address, AddressRecord};
use super::domain::ValidationError;
use super::listeners::{ListenerId, Listeners};
use super::patch::RentalPatch;
use super::tenant::Tenant;

/// Recurring monthly costs of a rental.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RentalCosts {
    pub mortgage_per_month: f64,
    pub maintenance_per_month: f64,
    pub misc_per_month: f64,
}

impl RentalCosts {
    pub fn new(mortgage_per_month: f64, maintenance_per_month: f64, misc_per_month: f64) -> Self {
        Self {
            mortgage_per_month,
            maintenance_per_month,
            misc_per_month,
        }
    }

    pub fn total(&self) -> f64 {
        self.mortgage_per_month + self.maintenance_per_month + self.misc_per_month
    }
}

/// Positional persistence form of a rental.
///
/// Serialises as a JSON array:
/// `[name, {street, city, state, zip}, tenantName, tenantPhoneNumber, rent, mortgage, maintenance, misc]`.
/// Readers rebuild fields by position, so the field order here is part of the
/// stored format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalRecord(
    pub String,
    pub AddressRecord,
    pub String,
    pub String,
    pub f64,
    pub f64,
    pub f64,
    pub f64,
);

/// One rental property with its tenant and monthly finances.
///
/// The rental owns its [`Address`] and [`Tenant`] outright. Listeners added
/// with [`Rental::add_listener`] fire once per [`Rental::edit`] call; plain
/// setters and field writes do not notify.
pub struct Rental {
    pub name: String,
    pub address: Address,
    pub rent_per_month: f64,
    pub costs: RentalCosts,
    tenant: Tenant,
    listeners: Listeners<()>,
}

impl Rental {
    pub fn new(name: impl Into<String>, address: Address, tenant: Tenant) -> Self {
        Self {
            name: name.into(),
            address,
            rent_per_month: 0.0,
            costs: RentalCosts::default(),
            tenant,
            listeners: Listeners::new(),
        }
    }

    pub fn with_rent(mut self, rent_per_month: f64) -> Self {
        self.rent_per_month = rent_per_month;
        self
    }

    pub fn with_costs(mut self, costs: RentalCosts) -> Self {
        self.costs = costs;
        self
    }

    pub fn tenant_name(&self) -> &str {
        self.tenant.name()
    }

    pub fn tenant_phone_number(&self) -> &str {
        self.tenant.phone_number()
    }

    pub fn set_tenant_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        self.tenant.set_name(name)
    }

    pub fn set_tenant_phone_number(
        &mut self,
        phone_number: impl Into<String>,
    ) -> Result<(), ValidationError> {
        self.tenant.set_phone_number(phone_number)
    }

    pub fn mortgage_per_month(&self) -> f64 {
        self.costs.mortgage_per_month
    }

    pub fn maintenance_per_month(&self) -> f64 {
        self.costs.maintenance_per_month
    }

    pub fn misc_per_month(&self) -> f64 {
        self.costs.misc_per_month
    }

    pub fn total_monthly_cost(&self) -> f64 {
        self.costs.total()
    }

    pub fn monthly_revenue(&self) -> f64 {
        self.rent_per_month - self.total_monthly_cost()
    }

    /// The `(name, address)` pair that must be unique within a collection.
    pub fn identity(&self) -> (String, String) {
        (self.name.clone(), self.address.to_string())
    }

    pub fn same_identity(&self, other: &Rental) -> bool {
        self.name == other.name && self.address.to_string() == other.address.to_string()
    }

    /// Apply `patch` and notify listeners once.
    ///
    /// The patch is validated as a whole before anything is written; on error
    /// the rental is unchanged and no listener fires.
    pub fn edit(&mut self, patch: &RentalPatch) -> Result<(), ValidationError> {
        self.apply(patch)?;
        self.emit();
        Ok(())
    }

    /// All-or-nothing application of `patch` without notifying.
    pub(crate) fn apply(&mut self, patch: &RentalPatch) -> Result<(), ValidationError> {
        let mut address = self.address.clone();
        if let Some(address_patch) = &patch.address {
            address_patch.apply_to(&mut address)?;
        }

        let mut tenant = self.tenant.clone();
        if let Some(name) = &patch.tenant_name {
            tenant.set_name(name.as_str())?;
        }
        if let Some(phone_number) = &patch.tenant_phone_number {
            tenant.set_phone_number(phone_number.as_str())?;
        }

        let mut rent_per_month = self.rent_per_month;
        if let Some(rent) = patch.rent_per_month {
            rent_per_month = finite_amount("rent_per_month", rent)?;
        }
        let mut costs = self.costs;
        if let Some(cost) = patch.mortgage_per_month {
            costs.mortgage_per_month = finite_amount("mortgage_per_month", cost)?;
        }
        if let Some(cost) = patch.maintenance_per_month {
            costs.maintenance_per_month = finite_amount("maintenance_per_month", cost)?;
        }
        if let Some(cost) = patch.misc_per_month {
            costs.misc_per_month = finite_amount("misc_per_month", cost)?;
        }

        self.address = address;
        self.tenant = tenant;
        self.rent_per_month = rent_per_month;
        self.costs = costs;
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }

        Ok(())
    }

    /// Every amount must be a finite number to survive a save and load.
    pub fn check_amounts(&self) -> Result<(), ValidationError> {
        finite_amount("rent_per_month", self.rent_per_month)?;
        finite_amount("mortgage_per_month", self.costs.mortgage_per_month)?;
        finite_amount("maintenance_per_month", self.costs.maintenance_per_month)?;
        finite_amount("misc_per_month", self.costs.misc_per_month)?;
        Ok(())
    }

    pub fn add_listener(&mut self, mut callback: impl FnMut() + 'static) -> ListenerId {
        self.listeners.subscribe(move |_: &()| callback())
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub(crate) fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Invoke every listener synchronously, in registration order.
    pub fn emit(&mut self) {
        self.listeners.emit(&());
    }

    pub fn to_record(&self) -> RentalRecord {
        RentalRecord(
            self.name.clone(),
            self.address.to_record(),
            self.tenant.name().to_string(),
            self.tenant.phone_number().to_string(),
            self.rent_per_month,
            self.costs.mortgage_per_month,
            self.costs.maintenance_per_month,
            self.costs.misc_per_month,
        )
    }

    pub fn from_record(record: RentalRecord) -> Result<Self, ValidationError> {
        let RentalRecord(
            name,
            address,
            tenant_name,
            tenant_phone_number,
            rent_per_month,
            mortgage_per_month,
            maintenance_per_month,
            misc_per_month,
        ) = record;

        let address = Address::from_record(address)?;
        let tenant = Tenant::new(tenant_name, tenant_phone_number)?;

        Ok(Self::new(name, address, tenant)
            .with_rent(rent_per_month)
            .with_costs(RentalCosts::new(
                mortgage_per_month,
                maintenance_per_month,
                misc_per_month,
            )))
    }
}

fn finite_amount(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NonFiniteAmount(field))
    }
}

/// Deep copy. The copy starts with no listeners.
impl Clone for Rental {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            address: self.address.clone(),
            rent_per_month: self.rent_per_month,
            costs: self.costs,
            tenant: self.tenant.clone(),
            listeners: Listeners::new(),
        }
    }
}

/// Compares observable fields only; listeners are ignored.
impl PartialEq for Rental {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.address == other.address
            && self.rent_per_month == other.rent_per_month
            && self.costs == other.costs
            && self.tenant == other.tenant
    }
}

impl fmt::Debug for Rental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rental")
            .field("name", &self.name)
            .field("address", &self.address)
            .field("rent_per_month", &self.rent_per_month)
            .field("costs", &self.costs)
            .field("tenant", &self.tenant)
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl fmt::Display for Rental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, Address: {}, Rent Per Month: {}, Tenant: [{}], Monthly Cost: {}, Monthly Revenue: {}",
            self.name,
            self.address,
            self.rent_per_month,
            self.tenant,
            self.total_monthly_cost(),
            self.monthly_revenue()
        )
    }
}
