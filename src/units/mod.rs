// src/units/mod.rs

//! Content unit variants and the type registry
//!
//! Six unit kinds exist, each with a fixed unit-key schema and type tag:
//! RPM and DRPM packages, errata, package groups and categories, and
//! kickstart distribution trees. `AnyUnit` is the registry over those
//! kinds; persistence and retrieval layers use it to rebuild a unit from
//! a tagged key tuple without knowing the concrete kind up front.

pub mod distribution;
pub mod drpm;
pub mod errata;
pub mod group;
pub mod rpm;
pub mod traits;

pub use distribution::{Distribution, DownloadReport};
pub use drpm::Drpm;
pub use errata::Errata;
pub use group::{PackageCategory, PackageGroup};
pub use rpm::Rpm;
pub use traits::{ContentUnit, Metadata, TypedUnitKey, Versioned};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Type tag identifying a content unit variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    Rpm,
    Drpm,
    Erratum,
    PackageGroup,
    PackageCategory,
    Distribution,
}

impl UnitType {
    /// All known unit types.
    pub const ALL: [UnitType; 6] = [
        UnitType::Rpm,
        UnitType::Drpm,
        UnitType::Erratum,
        UnitType::PackageGroup,
        UnitType::PackageCategory,
        UnitType::Distribution,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitType::Rpm => "rpm",
            UnitType::Drpm => "drpm",
            UnitType::Erratum => "erratum",
            UnitType::PackageGroup => "package_group",
            UnitType::PackageCategory => "package_category",
            UnitType::Distribution => "distribution",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "rpm" => Ok(UnitType::Rpm),
            "drpm" => Ok(UnitType::Drpm),
            "erratum" => Ok(UnitType::Erratum),
            "package_group" => Ok(UnitType::PackageGroup),
            "package_category" => Ok(UnitType::PackageCategory),
            "distribution" => Ok(UnitType::Distribution),
            _ => Err(Error::UnknownTypeTag(s.to_string())),
        }
    }
}

/// A content unit of any variant
///
/// This enum is the type registry: exactly one arm per known unit kind,
/// selected by explicit tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnyUnit {
    Rpm(Rpm),
    Drpm(Drpm),
    Erratum(Errata),
    PackageGroup(PackageGroup),
    PackageCategory(PackageCategory),
    Distribution(Distribution),
}

impl AnyUnit {
    /// Construct a unit of the tagged kind from a raw field mapping.
    pub fn from_fields(unit_type: UnitType, fields: Metadata) -> Result<Self> {
        match unit_type {
            UnitType::Rpm => Ok(AnyUnit::Rpm(Rpm::from_fields(fields)?)),
            UnitType::Drpm => Ok(AnyUnit::Drpm(Drpm::from_fields(fields)?)),
            UnitType::Erratum => Ok(AnyUnit::Erratum(Errata::from_fields(fields)?)),
            UnitType::PackageGroup => {
                Ok(AnyUnit::PackageGroup(PackageGroup::from_fields(fields)?))
            }
            UnitType::PackageCategory => {
                Ok(AnyUnit::PackageCategory(PackageCategory::from_fields(fields)?))
            }
            UnitType::Distribution => {
                Ok(AnyUnit::Distribution(Distribution::from_fields(fields)?))
            }
        }
    }

    /// Rebuild a unit from its compact typed identity, with empty metadata.
    ///
    /// Fails if the value count does not match the tagged kind's key schema.
    pub fn from_typed_unit_key(key: &TypedUnitKey) -> Result<Self> {
        match key.unit_type {
            UnitType::Rpm => Ok(AnyUnit::Rpm(rebuild::<Rpm>(&key.values)?)),
            UnitType::Drpm => Ok(AnyUnit::Drpm(rebuild::<Drpm>(&key.values)?)),
            UnitType::Erratum => Ok(AnyUnit::Erratum(rebuild::<Errata>(&key.values)?)),
            UnitType::PackageGroup => {
                Ok(AnyUnit::PackageGroup(rebuild::<PackageGroup>(&key.values)?))
            }
            UnitType::PackageCategory => Ok(AnyUnit::PackageCategory(rebuild::<PackageCategory>(
                &key.values,
            )?)),
            UnitType::Distribution => {
                Ok(AnyUnit::Distribution(rebuild::<Distribution>(&key.values)?))
            }
        }
    }

    /// The type tag of the wrapped unit.
    pub fn unit_type(&self) -> UnitType {
        match self {
            AnyUnit::Rpm(_) => UnitType::Rpm,
            AnyUnit::Drpm(_) => UnitType::Drpm,
            AnyUnit::Erratum(_) => UnitType::Erratum,
            AnyUnit::PackageGroup(_) => UnitType::PackageGroup,
            AnyUnit::PackageCategory(_) => UnitType::PackageCategory,
            AnyUnit::Distribution(_) => UnitType::Distribution,
        }
    }

    /// Ordered (field name, value) snapshot of the wrapped unit's key.
    pub fn unit_key(&self) -> Vec<(&'static str, &str)> {
        match self {
            AnyUnit::Rpm(unit) => unit.unit_key(),
            AnyUnit::Drpm(unit) => unit.unit_key(),
            AnyUnit::Erratum(unit) => unit.unit_key(),
            AnyUnit::PackageGroup(unit) => unit.unit_key(),
            AnyUnit::PackageCategory(unit) => unit.unit_key(),
            AnyUnit::Distribution(unit) => unit.unit_key(),
        }
    }

    /// The compact typed identity of the wrapped unit.
    pub fn typed_unit_key(&self) -> TypedUnitKey {
        match self {
            AnyUnit::Rpm(unit) => unit.typed_unit_key(),
            AnyUnit::Drpm(unit) => unit.typed_unit_key(),
            AnyUnit::Erratum(unit) => unit.typed_unit_key(),
            AnyUnit::PackageGroup(unit) => unit.typed_unit_key(),
            AnyUnit::PackageCategory(unit) => unit.typed_unit_key(),
            AnyUnit::Distribution(unit) => unit.typed_unit_key(),
        }
    }

    /// Metadata of the wrapped unit.
    pub fn metadata(&self) -> &Metadata {
        match self {
            AnyUnit::Rpm(unit) => unit.metadata(),
            AnyUnit::Drpm(unit) => unit.metadata(),
            AnyUnit::Erratum(unit) => unit.metadata(),
            AnyUnit::PackageGroup(unit) => unit.metadata(),
            AnyUnit::PackageCategory(unit) => unit.metadata(),
            AnyUnit::Distribution(unit) => unit.metadata(),
        }
    }
}

impl fmt::Display for AnyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyUnit::Rpm(unit) => fmt::Display::fmt(unit, f),
            AnyUnit::Drpm(unit) => fmt::Display::fmt(unit, f),
            AnyUnit::Erratum(unit) => fmt::Display::fmt(unit, f),
            AnyUnit::PackageGroup(unit) => fmt::Display::fmt(unit, f),
            AnyUnit::PackageCategory(unit) => fmt::Display::fmt(unit, f),
            AnyUnit::Distribution(unit) => fmt::Display::fmt(unit, f),
        }
    }
}

/// Rebuild one concrete unit kind from bare key values.
fn rebuild<T: ContentUnit>(values: &[String]) -> Result<T> {
    if values.len() != T::KEY_FIELDS.len() {
        return Err(Error::KeyTupleArity {
            unit_type: T::TYPE,
            expected: T::KEY_FIELDS.len(),
            actual: values.len(),
        });
    }

    let mut fields = Metadata::new();
    for (name, value) in T::KEY_FIELDS.iter().zip(values) {
        fields.insert((*name).to_string(), Value::String(value.clone()));
    }

    T::from_fields(fields)
}
