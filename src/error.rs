// src/error.rs

use crate::units::UnitType;
use thiserror::Error;

/// Core error types for Rpmdepot
#[derive(Error, Debug)]
pub enum Error {
    /// A required unit-key field was absent from an input field mapping
    #[error("Missing required key field '{field}' for {unit_type} unit")]
    MissingKeyField {
        unit_type: UnitType,
        field: &'static str,
    },

    /// A unit-key field held a value that cannot form part of an identity
    #[error("Invalid value for key field '{field}': expected a string")]
    InvalidKeyField { field: &'static str },

    /// A metadata field required by an operation was absent
    #[error("Missing required metadata field '{field}' for {unit_type} unit")]
    MissingMetadataField {
        unit_type: UnitType,
        field: &'static str,
    },

    /// A type tag did not name any known content unit variant
    #[error("Unknown content type tag: {0}")]
    UnknownTypeTag(String),

    /// A typed key tuple carried the wrong number of values for its tag
    #[error("Typed unit key for {unit_type} has {actual} values, expected {expected}")]
    KeyTupleArity {
        unit_type: UnitType,
        expected: usize,
        actual: usize,
    },

    /// A version field could not be given an order-preserving encoding
    #[error("Failed to encode version field: {0}")]
    VersionEncode(String),
}

/// Result type alias using Rpmdepot's Error type
pub type Result<T> = std::result::Result<T, Error>;
