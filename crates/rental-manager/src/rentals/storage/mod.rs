//! Persistence of the rental collection through a string-keyed store.
//!
//! The whole collection lives under one key as a JSON array of positional
//! [`RentalRecord`]s. No business rules are applied here beyond rebuilding
//! each rental through its validating constructor.

mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};

use tracing::{debug, info};

use super::domain::ValidationError;
use super::rental::{Rental, RentalRecord};

pub const DEFAULT_STORAGE_KEY: &str = "rentals";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("stored rentals are malformed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("rental record #{index} is invalid: {source}")]
    InvalidRecord {
        index: usize,
        source: ValidationError,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug)]
pub struct RentalStorage<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> RentalStorage<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Store the whole collection. A rental with a non-finite amount is
    /// rejected before anything is written.
    pub fn save<'a>(
        &mut self,
        rentals: impl IntoIterator<Item = &'a Rental>,
    ) -> Result<(), StorageError> {
        let records = rentals
            .into_iter()
            .enumerate()
            .map(|(index, rental)| {
                rental
                    .check_amounts()
                    .map(|()| rental.to_record())
                    .map_err(|source| StorageError::InvalidRecord { index, source })
            })
            .collect::<Result<Vec<RentalRecord>, _>>()?;
        let blob = serde_json::to_string(&records)?;
        self.store.set(&self.key, blob)?;

        info!(key = %self.key, rentals = records.len(), "rentals saved");
        Ok(())
    }

    /// Rebuild the stored collection. An absent key yields an empty list.
    pub fn load(&self) -> Result<Vec<Rental>, StorageError> {
        let Some(blob) = self.store.get(&self.key)? else {
            debug!(key = %self.key, "no stored rentals");
            return Ok(Vec::new());
        };

        let records: Vec<RentalRecord> = serde_json::from_str(&blob)?;
        let rentals = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                Rental::from_record(record)
                    .map_err(|source| StorageError::InvalidRecord { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(key = %self.key, rentals = rentals.len(), "rentals loaded");
        Ok(rentals)
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.store.remove(&self.key)?;
        Ok(())
    }
}
