use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use super::domain::ValidationError;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L} '\-]+$").expect("tenant name pattern compiles"));

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9()+ \-]+$").expect("phone pattern compiles"));

/// Occupant of a rental. Both fields are validated on every write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tenant {
    name: String,
    phone_number: String,
}

impl Tenant {
    pub fn new(
        name: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: validate_name(name.into())?,
            phone_number: validate_phone_number(phone_number.into())?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        self.name = validate_name(name.into())?;
        Ok(())
    }

    pub fn set_phone_number(&mut self, phone_number: impl Into<String>) -> Result<(), ValidationError> {
        self.phone_number = validate_phone_number(phone_number.into())?;
        Ok(())
    }
}

impl fmt::Display for Tenant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name: {}, Phone Number: {}", self.name, self.phone_number)
    }
}

pub(crate) fn validate_name(name: String) -> Result<String, ValidationError> {
    if NAME_PATTERN.is_match(&name) {
        Ok(name)
    } else {
        Err(ValidationError::InvalidTenantName(name))
    }
}

pub(crate) fn validate_phone_number(phone_number: String) -> Result<String, ValidationError> {
    if PHONE_PATTERN.is_match(&phone_number) {
        Ok(phone_number)
    } else {
        Err(ValidationError::InvalidPhoneNumber(phone_number))
    }
}
