pub mod customer;
pub mod hotel;
pub mod reservation;

pub use customer::*;
pub use hotel::*;
pub use reservation::*;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{HotelbookError, Result};

/// An entity stored as one element of a JSON collection file.
///
/// Fields are addressed by their JSON key through `Self::Field`, so callers
/// can edit or search on any column without the repository knowing the
/// concrete struct layout.
pub trait Record: Serialize + DeserializeOwned + Clone + fmt::Debug {
    type Field: Copy + fmt::Display + FromStr<Err = HotelbookError>;

    /// Singular entity name used in logs and errors ("customer", "hotel"...).
    const ENTITY: &'static str;

    /// JSON keys in serialization order. All of them are required.
    const FIELDS: &'static [&'static str];

    fn id(&self) -> u64;

    /// Render a field the way it is compared by `search_by`/`delete_by`.
    fn get(&self, field: Self::Field) -> String;

    /// Parse `value` into the field's type and assign it.
    fn set(&mut self, field: Self::Field, value: &str) -> Result<()>;

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Build an entity from a fully populated JSON object.
    fn from_value(value: serde_json::Value) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| {
            HotelbookError::Validation(format!("{} record must be a JSON object", Self::ENTITY))
        })?;
        if let Some(missing) = Self::FIELDS.iter().find(|f| !obj.contains_key(**f)) {
            return Err(HotelbookError::MissingField((*missing).to_string()));
        }

        let record: Self = serde_json::from_value(value)
            .map_err(|e| HotelbookError::Validation(format!("{}: {e}", Self::ENTITY)))?;
        record.validate()?;
        Ok(record)
    }

    /// Whether `field` renders exactly as `value`.
    fn matches(&self, field: Self::Field, value: &str) -> bool {
        self.get(field) == value
    }
}

pub(crate) fn parse_value<T: FromStr>(field: impl fmt::Display, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| HotelbookError::Validation(format!("invalid value for {field}: {value:?}")))
}

pub(crate) fn unknown_field(entity: &'static str, field: &str) -> HotelbookError {
    HotelbookError::UnknownField {
        entity,
        field: field.to_string(),
    }
}
