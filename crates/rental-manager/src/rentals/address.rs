use serde::{Deserialize, Serialize};
use std::fmt;

use super::domain::ValidationError;

/// Two-letter postal codes accepted for [`Address::state`].
pub const STATE_CODES: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DC", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM",
    "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA",
    "WV", "WI", "WY",
];

pub fn is_state_code(value: &str) -> bool {
    STATE_CODES.contains(&value)
}

pub fn is_zip(value: &str) -> bool {
    value.len() == 5 && value.bytes().all(|byte| byte.is_ascii_digit())
}

/// Postal address owned by exactly one rental.
///
/// `state` and `zip` are only reachable through validating setters, so a
/// constructed `Address` always carries a known state code and a five digit zip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub city: String,
    state: String,
    zip: String,
}

impl Address {
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let state = validate_state(state.into())?;
        let zip = validate_zip(zip.into())?;

        Ok(Self {
            street: street.into(),
            city: city.into(),
            state,
            zip,
        })
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }

    /// Replace the state code. The previous value is kept when validation fails.
    pub fn set_state(&mut self, state: impl Into<String>) -> Result<(), ValidationError> {
        self.state = validate_state(state.into())?;
        Ok(())
    }

    /// Replace the zip code. The previous value is kept when validation fails.
    pub fn set_zip(&mut self, zip: impl Into<String>) -> Result<(), ValidationError> {
        self.zip = validate_zip(zip.into())?;
        Ok(())
    }

    pub fn to_record(&self) -> AddressRecord {
        AddressRecord {
            street: self.street.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip: self.zip.clone(),
        }
    }

    pub fn from_record(record: AddressRecord) -> Result<Self, ValidationError> {
        Self::new(record.street, record.city, record.state, record.zip)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},\n{}, {} {}",
            self.street, self.city, self.state, self.zip
        )
    }
}

/// Named-field address shape embedded in the positional rental record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

fn validate_state(state: String) -> Result<String, ValidationError> {
    if is_state_code(&state) {
        Ok(state)
    } else {
        Err(ValidationError::InvalidStateCode(state))
    }
}

fn validate_zip(zip: String) -> Result<String, ValidationError> {
    if is_zip(&zip) {
        Ok(zip)
    } else {
        Err(ValidationError::InvalidZip(zip))
    }
}
