// src/units/traits.rs

//! Common traits for content unit variants
//!
//! Every unit kind declares a fixed, ordered unit-key schema. The key
//! fields identify the unit; everything else rides along as free-form
//! metadata. `ContentUnit` covers that split, `Versioned` adds RPM-style
//! version ordering for the kinds that carry (epoch, version, release).

use crate::error::{Error, Result};
use crate::units::UnitType;
use crate::version;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

/// Free-form descriptive fields that are not part of a unit's identity.
pub type Metadata = serde_json::Map<String, Value>;

/// Key fields that carry version information, in comparison order.
const EVR_FIELDS: [&str; 3] = ["epoch", "version", "release"];

/// Key fields excluded when grouping units that differ only by version.
const VERSION_RELATED_FIELDS: [&str; 5] =
    ["epoch", "version", "release", "checksum", "checksumtype"];

/// Compact identity of a content unit: its type tag followed by the key
/// field values in declared order.
///
/// This is the form to hold when large numbers of unit identities must sit
/// in memory at once, for example while diffing a remote repository against
/// the local store. It avoids the per-unit cost of a full struct plus
/// metadata map, and it hashes and orders cheaply.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypedUnitKey {
    pub unit_type: UnitType,
    pub values: Vec<String>,
}

/// Common interface for all content unit variants
pub trait ContentUnit {
    /// Fixed type tag for this variant.
    const TYPE: UnitType;

    /// Unit-key field names in their fixed, declared order.
    const KEY_FIELDS: &'static [&'static str];

    /// Unit-key field values, ordered to match `KEY_FIELDS`.
    fn key_values(&self) -> Vec<&str>;

    /// Descriptive fields that are not part of the unit key.
    fn metadata(&self) -> &Metadata;

    /// Construct a unit from a raw field-name → value mapping.
    ///
    /// Entries named by `KEY_FIELDS` become the unit key; every remaining
    /// entry lands in metadata. Fails if a required key field is absent.
    fn from_fields(fields: Metadata) -> Result<Self>
    where
        Self: Sized;

    /// Snapshot of the unit key as ordered (field name, value) pairs.
    fn unit_key(&self) -> Vec<(&'static str, &str)> {
        Self::KEY_FIELDS
            .iter()
            .copied()
            .zip(self.key_values())
            .collect()
    }

    /// Value of a single key field, if this variant declares it.
    fn key_value(&self, name: &str) -> Option<&str> {
        Self::KEY_FIELDS
            .iter()
            .position(|field| *field == name)
            .and_then(|index| self.key_values().get(index).copied())
    }

    /// The compact typed identity form of this unit.
    fn typed_unit_key(&self) -> TypedUnitKey {
        TypedUnitKey {
            unit_type: Self::TYPE,
            values: self.key_values().into_iter().map(str::to_owned).collect(),
        }
    }

    /// Human-readable rendering: `"<type tag>: <dash-joined key values>"`.
    fn display_string(&self) -> String {
        format!("{}: {}", Self::TYPE, self.key_values().join("-"))
    }
}

/// Version ordering for unit kinds keyed by (epoch, version, release)
pub trait Versioned: ContentUnit {
    /// Values of whichever of (epoch, version, release) appear in the
    /// unit key, in that order.
    fn complete_version(&self) -> Vec<&str> {
        EVR_FIELDS
            .iter()
            .copied()
            .filter_map(|name| self.key_value(name))
            .collect()
    }

    /// The complete version with each component in its order-preserving
    /// encoded form, suitable for storage in sort indexes.
    fn complete_version_serialized(&self) -> Result<Vec<String>> {
        self.complete_version()
            .into_iter()
            .map(version::encode)
            .collect()
    }

    /// Compare two units of the same kind by version alone.
    ///
    /// Units with equal (epoch, version, release) compare equal here no
    /// matter how the rest of their keys or metadata differ.
    fn cmp_version(&self, other: &Self) -> Result<Ordering> {
        Ok(self
            .complete_version_serialized()?
            .cmp(&other.complete_version_serialized()?))
    }

    /// Dash-joined key values excluding every version-related field, with
    /// the type tag appended. Units that differ only by version share this
    /// string, which makes it the grouping key for "newest version of each
    /// package" queries.
    fn key_string_without_version(&self) -> String {
        let mut parts = Vec::new();
        for (name, value) in Self::KEY_FIELDS.iter().copied().zip(self.key_values()) {
            if !VERSION_RELATED_FIELDS.contains(&name) {
                parts.push(value);
            }
        }
        parts.push(Self::TYPE.as_str());
        parts.join("-")
    }
}

/// Remove a required key field from a raw field mapping.
///
/// Strings pass through unchanged; numbers are rendered as strings so
/// mappings that carry a numeric epoch still construct cleanly.
pub(crate) fn take_key_field(
    fields: &mut Metadata,
    unit_type: UnitType,
    name: &'static str,
) -> Result<String> {
    match fields.remove(name) {
        Some(Value::String(value)) => Ok(value),
        Some(Value::Number(value)) => Ok(value.to_string()),
        Some(_) => Err(Error::InvalidKeyField { field: name }),
        None => Err(Error::MissingKeyField {
            unit_type,
            field: name,
        }),
    }
}
