use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, info, warn};

use super::domain::{CollectionError, LookupKey, SortKey};
use super::listeners::{ListenerId, Listeners};
use super::patch::RentalPatch;
use super::rental::{Rental, RentalRecord};
use super::report::PortfolioSummary;

/// In-memory authority over the ordered rental collection.
///
/// Every mutation (add, delete, sort, and edits that reach a rental) ends with
/// one collection-changed notification carrying the full current sequence.
/// Subscribers only get a shared slice, so they cannot mutate the manager
/// from inside a notification.
#[derive(Debug, Default)]
pub struct RentalManager {
    rentals: Vec<Rental>,
    subscribers: Listeners<[Rental]>,
    // Set by rental listeners; drained into a broadcast once the rental borrow ends.
    pending: Rc<Cell<bool>>,
}

impl RentalManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a manager from existing rentals, rejecting duplicate identities.
    /// The result is sorted by name.
    pub fn with_rentals(
        rentals: impl IntoIterator<Item = Rental>,
    ) -> Result<Self, CollectionError> {
        let mut manager = Self::new();
        for rental in rentals {
            manager.add(rental)?;
        }
        manager.sort(SortKey::Name);
        Ok(manager)
    }

    /// Copy of the current sequence. Mutating the copy never affects the manager.
    pub fn rentals(&self) -> Vec<Rental> {
        self.rentals.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rental> {
        self.rentals.iter()
    }

    pub fn len(&self) -> usize {
        self.rentals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rentals.is_empty()
    }

    pub fn find(&self, key: &str, field: LookupKey) -> Option<&Rental> {
        self.rentals
            .iter()
            .find(|rental| lookup_value(rental, field) == key)
    }

    pub fn add(&mut self, mut rental: Rental) -> Result<(), CollectionError> {
        if self.rentals.iter().any(|existing| existing.same_identity(&rental)) {
            warn!(rental = %rental.name, "rejecting duplicate rental");
            let (name, address) = rental.identity();
            return Err(CollectionError::Duplicate { name, address });
        }
        rental.check_amounts()?;

        self.watch(&mut rental);
        info!(rental = %rental.name, street = %rental.address.street, "rental added");
        self.rentals.push(rental);
        self.notify();
        Ok(())
    }

    /// Remove the first rental whose `field` equals `key` and return it,
    /// detached from every listener.
    pub fn delete(&mut self, key: &str, field: LookupKey) -> Result<Rental, CollectionError> {
        let index = self.position(key, field)?;
        let mut removed = self.rentals.remove(index);
        removed.clear_listeners();

        info!(rental = %removed.name, by = field.label(), "rental deleted");
        self.notify();
        Ok(removed)
    }

    /// Rentals whose `field` contains `term` (case-sensitive). An empty term matches all.
    pub fn search<'a>(
        &'a self,
        term: &'a str,
        field: LookupKey,
    ) -> impl Iterator<Item = &'a Rental> + 'a {
        debug!(term, by = field.label(), "searching rentals");
        self.rentals
            .iter()
            .filter(move |rental| lookup_value(rental, field).contains(term))
    }

    /// Stable in-place reorder.
    pub fn sort(&mut self, key: SortKey) {
        match key {
            SortKey::Name => self.rentals.sort_by(|a, b| a.name.cmp(&b.name)),
            SortKey::AddressStreet => self
                .rentals
                .sort_by(|a, b| a.address.street.cmp(&b.address.street)),
            SortKey::Revenue => self
                .rentals
                .sort_by(|a, b| a.monthly_revenue().total_cmp(&b.monthly_revenue())),
        }

        info!(by = key.label(), "rentals sorted");
        self.notify();
    }

    /// Forward `patch` to the rental whose `field` equals `key`.
    ///
    /// A patch that would give the rental the identity of another entry is
    /// rejected before anything is written.
    pub fn edit(
        &mut self,
        key: &str,
        patch: &RentalPatch,
        field: LookupKey,
    ) -> Result<(), CollectionError> {
        let index = self.position(key, field)?;

        if patch.touches_identity() {
            let mut staged = self.rentals[index].clone();
            staged.apply(patch)?;
            let collides = self
                .rentals
                .iter()
                .enumerate()
                .any(|(other, rental)| other != index && rental.same_identity(&staged));
            if collides {
                warn!(rental = %staged.name, "edit would duplicate an existing rental");
                let (name, address) = staged.identity();
                return Err(CollectionError::Duplicate { name, address });
            }
        }

        self.rentals[index].edit(patch)?;
        info!(rental = %self.rentals[index].name, "rental edited");
        self.flush_pending();
        Ok(())
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&[Rental]) + 'static) -> ListenerId {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Broadcast the current sequence to every subscriber.
    pub fn notify(&mut self) {
        self.pending.set(false);
        self.subscribers.emit(&self.rentals);
    }

    /// Drop all rentals and subscribers. The manager stays usable as an empty one.
    pub fn teardown(&mut self) {
        debug!(
            rentals = self.rentals.len(),
            subscribers = self.subscribers.len(),
            "tearing down rental manager"
        );
        self.rentals.clear();
        self.subscribers.clear();
        self.pending.set(false);
    }

    pub fn summary(&self) -> PortfolioSummary {
        PortfolioSummary::from_rentals(&self.rentals)
    }

    pub fn to_records(&self) -> Vec<RentalRecord> {
        self.rentals.iter().map(Rental::to_record).collect()
    }

    fn position(&self, key: &str, field: LookupKey) -> Result<usize, CollectionError> {
        self.rentals
            .iter()
            .position(|rental| lookup_value(rental, field) == key)
            .ok_or_else(|| {
                warn!(key, by = field.label(), "rental not found");
                CollectionError::NotFound {
                    key: key.to_owned(),
                    field,
                }
            })
    }

    /// Replace the whole sequence, for rolling back a change that could not
    /// be persisted. Subscribers are kept and told about the restored state.
    pub(crate) fn restore(&mut self, rentals: Vec<Rental>) {
        self.rentals.clear();
        for mut rental in rentals {
            self.watch(&mut rental);
            self.rentals.push(rental);
        }
        self.notify();
    }

    fn watch(&self, rental: &mut Rental) {
        let pending = Rc::clone(&self.pending);
        rental.add_listener(move || pending.set(true));
    }

    fn flush_pending(&mut self) {
        if self.pending.get() {
            self.notify();
        }
    }
}

fn lookup_value(rental: &Rental, field: LookupKey) -> &str {
    match field {
        LookupKey::Name => &rental.name,
        LookupKey::AddressStreet => &rental.address.street,
    }
}
