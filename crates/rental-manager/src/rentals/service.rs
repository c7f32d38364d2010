use tracing::{info, warn};

use super::domain::{CollectionError, LookupKey, SortKey};
use super::listeners::ListenerId;
use super::manager::RentalManager;
use super::patch::RentalPatch;
use super::rental::Rental;
use super::report::PortfolioSummary;
use super::storage::{KeyValueStore, RentalStorage, StorageError};

/// Service pairing the collection manager with its persistence port.
///
/// Opening hydrates the manager from storage; every mutation is written back
/// before the call returns. When that write fails the in-memory collection is
/// rolled back to its state before the call and the error reaches the caller.
#[derive(Debug)]
pub struct RentalService<S> {
    manager: RentalManager,
    storage: RentalStorage<S>,
}

impl<S: KeyValueStore> RentalService<S> {
    pub fn open(storage: RentalStorage<S>) -> Result<Self, RentalServiceError> {
        let stored = storage.load()?;
        let manager = RentalManager::with_rentals(stored)?;

        info!(key = storage.key(), rentals = manager.len(), "rental service opened");
        Ok(Self { manager, storage })
    }

    pub fn manager(&self) -> &RentalManager {
        &self.manager
    }

    pub fn rentals(&self) -> Vec<Rental> {
        self.manager.rentals()
    }

    pub fn find(&self, key: &str, field: LookupKey) -> Option<&Rental> {
        self.manager.find(key, field)
    }

    pub fn search<'a>(
        &'a self,
        term: &'a str,
        field: LookupKey,
    ) -> impl Iterator<Item = &'a Rental> + 'a {
        self.manager.search(term, field)
    }

    pub fn summary(&self) -> PortfolioSummary {
        self.manager.summary()
    }

    pub fn add(&mut self, rental: Rental) -> Result<(), RentalServiceError> {
        let snapshot = self.manager.rentals();
        self.manager.add(rental)?;
        self.persist(snapshot)
    }

    pub fn delete(&mut self, key: &str, field: LookupKey) -> Result<Rental, RentalServiceError> {
        let snapshot = self.manager.rentals();
        let removed = self.manager.delete(key, field)?;
        self.persist(snapshot)?;
        Ok(removed)
    }

    pub fn edit(
        &mut self,
        key: &str,
        patch: &RentalPatch,
        field: LookupKey,
    ) -> Result<(), RentalServiceError> {
        let snapshot = self.manager.rentals();
        self.manager.edit(key, patch, field)?;
        self.persist(snapshot)
    }

    pub fn sort(&mut self, key: SortKey) -> Result<(), RentalServiceError> {
        let snapshot = self.manager.rentals();
        self.manager.sort(key);
        self.persist(snapshot)
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&[Rental]) + 'static) -> ListenerId {
        self.manager.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.manager.unsubscribe(id)
    }

    /// Tear the manager down and hand back the storage port.
    pub fn close(mut self) -> RentalStorage<S> {
        self.manager.teardown();
        self.storage
    }

    /// Write the collection back, restoring `snapshot` if the write fails.
    fn persist(&mut self, snapshot: Vec<Rental>) -> Result<(), RentalServiceError> {
        if let Err(err) = self.storage.save(self.manager.iter()) {
            warn!(key = self.storage.key(), error = %err, "save failed, rolling back");
            self.manager.restore(snapshot);
            return Err(err.into());
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RentalServiceError {
    #[error(transparent)]
    Collection(#[from] CollectionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
