// src/units/errata.rs

//! Erratum (advisory) unit

use crate::error::Result;
use crate::units::UnitType;
use crate::units::traits::{ContentUnit, Metadata, take_key_field};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An erratum, identified solely by its advisory id (e.g. "RHBA-2014:0101").
///
/// Everything else an advisory carries (title, description, severity,
/// issued date, package list) is metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Errata {
    pub id: String,
    pub metadata: Metadata,
}

impl Errata {
    pub fn new(id: String, metadata: Metadata) -> Self {
        Self { id, metadata }
    }
}

impl ContentUnit for Errata {
    const TYPE: UnitType = UnitType::Erratum;
    const KEY_FIELDS: &'static [&'static str] = &["id"];

    fn key_values(&self) -> Vec<&str> {
        vec![&self.id]
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn from_fields(mut fields: Metadata) -> Result<Self> {
        let id = take_key_field(&mut fields, Self::TYPE, "id")?;

        // Unlike the other kinds, errata keep an incoming `type` field:
        // advisories have their own type (security, bugfix, enhancement)
        // that happens to share the name of the content type tag.

        Ok(Self {
            id,
            metadata: fields,
        })
    }
}

impl fmt::Display for Errata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_string())
    }
}
