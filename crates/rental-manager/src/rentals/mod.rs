//! Rental bookkeeping core: validated entities, the in-memory collection
//! manager with change notification, and the persistence adapter.

pub mod address;
pub mod domain;
pub mod export;
pub mod listeners;
mod manager;
pub mod patch;
mod rental;
pub mod report;
mod service;
pub mod storage;
mod tenant;

#[cfg(test)]
mod tests;

pub use address::{Address, AddressRecord, STATE_CODES};
pub use domain::{CollectionError, LookupKey, SortKey, ValidationError};
pub use export::ExportError;
pub use listeners::ListenerId;
pub use manager::RentalManager;
pub use patch::{AddressPatch, RentalPatch};
pub use rental::{Rental, RentalCosts, RentalRecord};
pub use report::{PortfolioSummary, RentalView};
pub use service::{RentalService, RentalServiceError};
pub use storage::{
    FileStore, KeyValueStore, MemoryStore, RentalStorage, StorageError, StoreError,
    DEFAULT_STORAGE_KEY,
};
pub use tenant::Tenant;
