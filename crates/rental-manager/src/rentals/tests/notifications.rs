use std::cell::Cell;
use std::rc::Rc;

use super::common::*;
use crate::rentals::{AddressPatch, LookupKey, RentalManager, RentalPatch, SortKey};

#[test]
fn every_mutation_broadcasts_the_full_sequence() {
    let mut manager = RentalManager::new();
    let seen = record_notifications(&mut manager);

    manager.add(oak_house()).expect("add oak");
    manager.add(elm_cottage()).expect("add elm");
    manager.sort(SortKey::Name);
    manager
        .edit(
            "Oak House",
            &RentalPatch::new().rent_per_month(1600.0),
            LookupKey::Name,
        )
        .expect("edit oak");
    manager
        .delete("Elm Cottage", LookupKey::Name)
        .expect("delete elm");

    assert_eq!(
        *seen.borrow(),
        vec![
            vec!["Oak House".to_string()],
            vec!["Oak House".to_string(), "Elm Cottage".to_string()],
            vec!["Elm Cottage".to_string(), "Oak House".to_string()],
            vec!["Elm Cottage".to_string(), "Oak House".to_string()],
            vec!["Oak House".to_string()],
        ]
    );
}

#[test]
fn edit_broadcasts_exactly_once_with_updated_values() {
    let mut manager = populated_manager();
    let revenues = Rc::new(std::cell::RefCell::new(Vec::new()));
    let sink = Rc::clone(&revenues);
    manager.subscribe(move |rentals| {
        let oak = rentals
            .iter()
            .find(|rental| rental.name == "Oak House")
            .map(|rental| rental.monthly_revenue());
        sink.borrow_mut().push(oak);
    });

    let patch = RentalPatch::new()
        .rent_per_month(1600.0)
        .tenant_name("A Jones")
        .address(AddressPatch {
            zip: Some("98002".to_string()),
            ..AddressPatch::default()
        });
    manager
        .edit("Oak House", &patch, LookupKey::Name)
        .expect("edit");

    assert_eq!(*revenues.borrow(), vec![Some(850.0)]);
}

#[test]
fn failed_operations_do_not_broadcast() {
    let mut manager = populated_manager();
    let seen = record_notifications(&mut manager);

    assert!(manager.add(oak_house()).is_err());
    assert!(manager.delete("Nope", LookupKey::Name).is_err());
    assert!(manager
        .edit("Nope", &RentalPatch::new(), LookupKey::Name)
        .is_err());
    assert!(manager
        .edit(
            "Oak House",
            &RentalPatch::new().tenant_phone_number("call me"),
            LookupKey::Name
        )
        .is_err());

    assert!(seen.borrow().is_empty());
}

#[test]
fn search_does_not_broadcast() {
    let mut manager = populated_manager();
    let seen = record_notifications(&mut manager);

    assert_eq!(manager.search("Oak", LookupKey::Name).count(), 1);
    assert!(seen.borrow().is_empty());
}

#[test]
fn subscribers_are_independent_and_unsubscribable() {
    let mut manager = RentalManager::new();
    let first = Rc::new(Cell::new(0));
    let second = Rc::new(Cell::new(0));

    let hits = Rc::clone(&first);
    let first_id = manager.subscribe(move |_| hits.set(hits.get() + 1));
    let hits = Rc::clone(&second);
    manager.subscribe(move |_| hits.set(hits.get() + 1));

    manager.add(oak_house()).expect("add");
    assert!(manager.unsubscribe(first_id));
    manager.sort(SortKey::Revenue);

    assert_eq!(first.get(), 1);
    assert_eq!(second.get(), 2);
    assert!(!manager.unsubscribe(first_id));
}

#[test]
fn subscribers_run_in_registration_order() {
    let mut manager = RentalManager::new();
    let order = Rc::new(std::cell::RefCell::new(Vec::new()));
    for tag in ["view", "storage", "audit"] {
        let order = Rc::clone(&order);
        manager.subscribe(move |_| order.borrow_mut().push(tag));
    }

    manager.add(oak_house()).expect("add");
    assert_eq!(*order.borrow(), vec!["view", "storage", "audit"]);
}

#[test]
fn deleted_rental_no_longer_reaches_the_manager() {
    let mut manager = populated_manager();
    let mut removed = manager
        .delete("Oak House", LookupKey::Name)
        .expect("delete");
    let seen = record_notifications(&mut manager);

    assert_eq!(removed.listener_count(), 0);
    removed
        .edit(&RentalPatch::new().rent_per_month(1.0))
        .expect("edit detached rental");

    assert!(seen.borrow().is_empty());
    assert_eq!(
        manager.find("Oak House", LookupKey::Name),
        None,
        "detached rental stays out of the collection"
    );
}
