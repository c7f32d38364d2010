use serde::Serialize;

use super::rental::Rental;

/// Aggregate monthly figures across a collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub rentals: usize,
    pub total_rent: f64,
    pub total_cost: f64,
    pub total_revenue: f64,
}

impl PortfolioSummary {
    pub fn from_rentals(rentals: &[Rental]) -> Self {
        rentals.iter().fold(Self::default(), |mut summary, rental| {
            summary.rentals += 1;
            summary.total_rent += rental.rent_per_month;
            summary.total_cost += rental.total_monthly_cost();
            summary.total_revenue += rental.monthly_revenue();
            summary
        })
    }

    pub fn is_profitable(&self) -> bool {
        self.total_revenue > 0.0
    }
}

/// Flattened table row for a rental, with derived columns filled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentalView {
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub tenant_name: String,
    pub tenant_phone_number: String,
    pub rent_per_month: f64,
    pub total_monthly_cost: f64,
    pub monthly_revenue: f64,
}

impl RentalView {
    pub fn display_address(&self) -> String {
        format!("{},\n{}, {} {}", self.street, self.city, self.state, self.zip)
    }
}

impl From<&Rental> for RentalView {
    fn from(rental: &Rental) -> Self {
        Self {
            name: rental.name.clone(),
            street: rental.address.street.clone(),
            city: rental.address.city.clone(),
            state: rental.address.state().to_string(),
            zip: rental.address.zip().to_string(),
            tenant_name: rental.tenant_name().to_string(),
            tenant_phone_number: rental.tenant_phone_number().to_string(),
            rent_per_month: rental.rent_per_month,
            total_monthly_cost: rental.total_monthly_cost(),
            monthly_revenue: rental.monthly_revenue(),
        }
    }
}
