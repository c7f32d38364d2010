use std::io;
use std::path::PathBuf;

use super::common::*;
use crate::rentals::{
    CollectionError, KeyValueStore, LookupKey, MemoryStore, Rental, RentalPatch, RentalService,
    RentalServiceError, RentalStorage, SortKey, StorageError, StoreError, ValidationError,
    DEFAULT_STORAGE_KEY,
};

fn stored_names(storage: &RentalStorage<MemoryStore>) -> Vec<String> {
    names(&storage.load().expect("load stored rentals"))
}

fn seeded_storage(rentals: &[Rental]) -> RentalStorage<MemoryStore> {
    let mut storage = RentalStorage::new(MemoryStore::new());
    storage.save(rentals).expect("seed");
    storage
}

/// Store that refuses its next `failing_writes` writes.
#[derive(Debug, Default)]
struct FlakyStore {
    inner: MemoryStore,
    failing_writes: usize,
}

impl FlakyStore {
    fn read_only(inner: MemoryStore) -> Self {
        Self {
            inner,
            failing_writes: usize::MAX,
        }
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        if self.failing_writes > 0 {
            self.failing_writes -= 1;
            return Err(StoreError::Io {
                path: PathBuf::from("flaky"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read only"),
            });
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.inner.remove(key)
    }
}

#[test]
fn open_on_empty_store_starts_empty() {
    let service = RentalService::open(RentalStorage::new(MemoryStore::new())).expect("open");
    assert!(service.manager().is_empty());
    assert_eq!(service.summary().rentals, 0);
}

#[test]
fn open_hydrates_sorted_by_name() {
    let storage = seeded_storage(&[oak_house(), birch_flat(), elm_cottage()]);
    let service = RentalService::open(storage).expect("open");

    assert_eq!(
        names(&service.rentals()),
        vec!["Birch Flat", "Elm Cottage", "Oak House"]
    );
}

#[test]
fn open_rejects_duplicates_in_the_stored_blob() {
    let storage = seeded_storage(&[oak_house(), oak_house()]);
    let error = RentalService::open(storage).expect_err("duplicate");
    assert!(matches!(
        error,
        RentalServiceError::Collection(CollectionError::Duplicate { .. })
    ));
}

#[test]
fn open_surfaces_malformed_storage() {
    let mut store = MemoryStore::new();
    store
        .set(DEFAULT_STORAGE_KEY, "[1, 2".to_string())
        .expect("seed");

    let error = RentalService::open(RentalStorage::new(store)).expect_err("malformed");
    assert!(matches!(
        error,
        RentalServiceError::Storage(StorageError::Serialization(_))
    ));
}

#[test]
fn every_mutation_is_persisted() {
    let mut service = RentalService::open(RentalStorage::new(MemoryStore::new())).expect("open");

    service.add(oak_house()).expect("add oak");
    service.add(birch_flat()).expect("add birch");
    service.add(elm_cottage()).expect("add elm");
    let storage = service.close();
    assert_eq!(
        stored_names(&storage),
        vec!["Oak House", "Birch Flat", "Elm Cottage"]
    );

    let mut service = RentalService::open(storage).expect("reopen");
    service.sort(SortKey::Revenue).expect("sort");
    service
        .edit(
            "Elm Cottage",
            &RentalPatch::new().rent_per_month(1300.0),
            LookupKey::Name,
        )
        .expect("edit");
    let removed = service
        .delete("5 Birch Ave", LookupKey::AddressStreet)
        .expect("delete");
    assert_eq!(removed.name, "Birch Flat");

    let storage = service.close();
    let stored = storage.load().expect("load");
    assert_eq!(names(&stored), vec!["Elm Cottage", "Oak House"]);
    assert_eq!(stored[0].rent_per_month, 1300.0);
}

#[test]
fn non_finite_amounts_never_reach_the_store() {
    let storage = seeded_storage(&[oak_house()]);
    let mut service = RentalService::open(storage).expect("open");

    let error = service
        .edit(
            "Oak House",
            &RentalPatch::new().misc_per_month(f64::NAN),
            LookupKey::Name,
        )
        .expect_err("NaN cost");
    assert!(matches!(
        error,
        RentalServiceError::Collection(CollectionError::Validation(
            ValidationError::NonFiniteAmount("misc_per_month")
        ))
    ));

    let mut unbounded = elm_cottage();
    unbounded.rent_per_month = f64::INFINITY;
    assert!(service.add(unbounded).is_err());

    let storage = service.close();
    let reopened = RentalService::open(storage).expect("store stays readable");
    assert_eq!(names(&reopened.rentals()), vec!["Oak House"]);
    assert_eq!(reopened.rentals()[0].misc_per_month(), 50.0);
}

#[test]
fn failed_operations_leave_the_blob_untouched() {
    let storage = seeded_storage(&[oak_house()]);
    let before = storage
        .store()
        .get(DEFAULT_STORAGE_KEY)
        .expect("get")
        .expect("seeded");
    let mut service = RentalService::open(storage).expect("open");

    assert!(service.add(oak_house()).is_err());
    assert!(service.delete("Nope", LookupKey::Name).is_err());
    assert!(service
        .edit(
            "Oak House",
            &RentalPatch::new().tenant_name("R2-D2"),
            LookupKey::Name
        )
        .is_err());

    let storage = service.close();
    let after = storage
        .store()
        .get(DEFAULT_STORAGE_KEY)
        .expect("get")
        .expect("still present");
    assert_eq!(after, before);
}

#[test]
fn write_failures_reach_the_caller() {
    let store = FlakyStore::read_only(MemoryStore::new());
    let mut service = RentalService::open(RentalStorage::new(store)).expect("open");

    let error = service.add(oak_house()).expect_err("store refuses writes");
    assert!(matches!(
        error,
        RentalServiceError::Storage(StorageError::Store(StoreError::Io { .. }))
    ));
}

#[test]
fn failed_write_rolls_the_collection_back() {
    let store = FlakyStore::read_only(seeded_storage(&[oak_house(), elm_cottage()]).into_store());
    let mut service = RentalService::open(RentalStorage::new(store)).expect("open");
    let before = service.rentals();
    let seen = record_service_notifications(&mut service);

    assert!(service.add(birch_flat()).is_err());
    assert!(service
        .edit(
            "Oak House",
            &RentalPatch::new().rent_per_month(1.0),
            LookupKey::Name
        )
        .is_err());
    assert!(service.delete("Elm Cottage", LookupKey::Name).is_err());
    assert!(service.sort(SortKey::Revenue).is_err());

    assert_eq!(service.rentals(), before);
    assert_eq!(
        seen.borrow().last().cloned(),
        Some(vec!["Elm Cottage".to_string(), "Oak House".to_string()])
    );
}

#[test]
fn retry_after_failed_write_succeeds() {
    let store = FlakyStore {
        inner: seeded_storage(&[oak_house()]).into_store(),
        failing_writes: 1,
    };
    let mut service = RentalService::open(RentalStorage::new(store)).expect("open");

    let error = service.add(birch_flat()).expect_err("first write refused");
    assert!(matches!(error, RentalServiceError::Storage(_)));
    service.add(birch_flat()).expect("retry is not a duplicate");

    let seen = record_service_notifications(&mut service);
    service
        .edit(
            "Oak House",
            &RentalPatch::new().rent_per_month(1600.0),
            LookupKey::Name,
        )
        .expect("restored rental still edits");
    assert_eq!(seen.borrow().len(), 1);

    let stored = service.close().load().expect("load");
    assert_eq!(names(&stored), vec!["Oak House", "Birch Flat"]);
    assert_eq!(stored[0].rent_per_month, 1600.0);
}

fn record_service_notifications<S: KeyValueStore>(
    service: &mut RentalService<S>,
) -> Notifications {
    let seen: Notifications = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let sink = std::rc::Rc::clone(&seen);
    service.subscribe(move |rentals| sink.borrow_mut().push(names(rentals)));
    seen
}

#[test]
fn subscribers_see_service_mutations() {
    let mut service = RentalService::open(RentalStorage::new(MemoryStore::new())).expect("open");
    let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let sink = std::rc::Rc::clone(&seen);
    let id = service.subscribe(move |rentals| sink.borrow_mut().push(names(rentals)));

    service.add(oak_house()).expect("add");
    assert!(service.unsubscribe(id));
    service.add(elm_cottage()).expect("add");

    assert_eq!(*seen.borrow(), vec![vec!["Oak House".to_string()]]);
}

#[test]
fn reads_pass_through_to_the_collection() {
    let storage = seeded_storage(&[oak_house(), elm_cottage()]);
    let service = RentalService::open(storage).expect("open");

    assert_eq!(
        service
            .find("22 Elm St", LookupKey::AddressStreet)
            .map(|rental| rental.name.as_str()),
        Some("Elm Cottage")
    );
    assert_eq!(service.search("House", LookupKey::Name).count(), 1);
}

#[test]
fn close_hands_back_the_storage_port() {
    let storage = RentalStorage::with_key(MemoryStore::new(), "portfolio");
    let mut service = RentalService::open(storage).expect("open");
    service.add(oak_house()).expect("add");

    let storage = service.close();
    assert_eq!(storage.key(), "portfolio");
    assert!(storage
        .into_store()
        .get("portfolio")
        .expect("get")
        .is_some());
}
