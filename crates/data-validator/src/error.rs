//! Validation Error Types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Validated form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Date,
    TemperatureC,
    Summary,
}

impl Field {
    /// Human-readable label used in messages
    pub fn label(self) -> &'static str {
        match self {
            Field::Date => "Date",
            Field::TemperatureC => "Temperature",
            Field::Summary => "Summary",
        }
    }
}

/// A single field failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Field left empty
    #[error("{} is required", .0.label())]
    MissingField(Field),

    /// Temperature did not parse as a number
    #[error("Temperature must be a number")]
    NotANumber,

    /// Date did not parse as YYYY-MM-DD
    #[error("Date must be a valid date (YYYY-MM-DD)")]
    InvalidDate,
}

/// Field name to message map; empty means the input is valid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Record a failure for a field, replacing any earlier message
    pub fn add(&mut self, field: Field, error: ValidationError) {
        self.0.insert(field, error.to_string());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Drop the message for one field
    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.values().map(String::as_str).collect();
        write!(f, "{}", messages.join("; "))
    }
}
