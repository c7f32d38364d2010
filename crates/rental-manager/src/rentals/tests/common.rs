use std::cell::RefCell;
use std::rc::Rc;

use crate::rentals::{Address, Rental, RentalCosts, RentalManager, Tenant};

pub(super) fn rental(name: &str, street: &str, rent: f64, costs: RentalCosts) -> Rental {
    let address = Address::new(street, "Springfield", "WA", "98001").expect("valid address");
    let tenant = Tenant::new("J Smith", "555-1234").expect("valid tenant");
    Rental::new(name, address, tenant)
        .with_rent(rent)
        .with_costs(costs)
}

pub(super) fn oak_house() -> Rental {
    rental(
        "Oak House",
        "1 Oak St",
        1500.0,
        RentalCosts::new(600.0, 100.0, 50.0),
    )
}

pub(super) fn elm_cottage() -> Rental {
    rental(
        "Elm Cottage",
        "22 Elm St",
        1100.0,
        RentalCosts::new(700.0, 150.0, 50.0),
    )
}

pub(super) fn birch_flat() -> Rental {
    rental(
        "Birch Flat",
        "5 Birch Ave",
        2000.0,
        RentalCosts::new(900.0, 50.0, 25.0),
    )
}

pub(super) fn names(rentals: &[Rental]) -> Vec<String> {
    rentals.iter().map(|rental| rental.name.clone()).collect()
}

/// Every notification's rental names, in delivery order.
pub(super) type Notifications = Rc<RefCell<Vec<Vec<String>>>>;

pub(super) fn record_notifications(manager: &mut RentalManager) -> Notifications {
    let seen: Notifications = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    manager.subscribe(move |rentals| sink.borrow_mut().push(names(rentals)));
    seen
}

pub(super) fn populated_manager() -> RentalManager {
    RentalManager::with_rentals([oak_house(), elm_cottage(), birch_flat()])
        .expect("distinct rentals")
}
