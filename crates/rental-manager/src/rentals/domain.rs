use serde::{Deserialize, Serialize};

/// Field used to locate a rental for delete, edit, and search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupKey {
    #[default]
    Name,
    AddressStreet,
}

impl LookupKey {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::AddressStreet => "address street",
        }
    }
}

/// Ordering applied by [`RentalManager::sort`](super::RentalManager::sort).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Name,
    AddressStreet,
    Revenue,
}

impl SortKey {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::AddressStreet => "address street",
            Self::Revenue => "monthly revenue",
        }
    }
}

/// A write rejected by an entity setter. The entity is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid state code '{0}'")]
    InvalidStateCode(String),
    #[error("invalid zip code '{0}': expected exactly 5 digits")]
    InvalidZip(String),
    #[error("invalid tenant name '{0}': only letters, spaces, apostrophes and dashes are allowed")]
    InvalidTenantName(String),
    #[error(
        "invalid phone number '{0}': only digits, dashes, parentheses, spaces and plus signs are allowed"
    )]
    InvalidPhoneNumber(String),
    #[error("{0} must be a finite number")]
    NonFiniteAmount(&'static str),
}

/// Failures raised by collection-level operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CollectionError {
    #[error("a rental named '{name}' already exists at {address}")]
    Duplicate { name: String, address: String },
    #[error("no rental with {} '{key}'", .field.label())]
    NotFound { key: String, field: LookupKey },
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
