// src/units/group.rs

//! Package group and category units
//!
//! Groups and categories come from a repository's comps data and only make
//! sense inside the repository that defined them, so `repo_id` is part of
//! the unit key: the same group id in two repositories is two units.

use crate::error::Result;
use crate::units::UnitType;
use crate::units::traits::{ContentUnit, Metadata, take_key_field};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named group of packages within one repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageGroup {
    pub id: String,
    pub repo_id: String,
    pub metadata: Metadata,
}

impl PackageGroup {
    pub fn new(id: String, repo_id: String, metadata: Metadata) -> Self {
        Self {
            id,
            repo_id,
            metadata,
        }
    }
}

impl ContentUnit for PackageGroup {
    const TYPE: UnitType = UnitType::PackageGroup;
    const KEY_FIELDS: &'static [&'static str] = &["id", "repo_id"];

    fn key_values(&self) -> Vec<&str> {
        vec![&self.id, &self.repo_id]
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn from_fields(mut fields: Metadata) -> Result<Self> {
        let id = take_key_field(&mut fields, Self::TYPE, "id")?;
        let repo_id = take_key_field(&mut fields, Self::TYPE, "repo_id")?;

        fields.remove("type");

        Ok(Self {
            id,
            repo_id,
            metadata: fields,
        })
    }
}

impl fmt::Display for PackageGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_string())
    }
}

/// A named collection of package groups within one repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageCategory {
    pub id: String,
    pub repo_id: String,
    pub metadata: Metadata,
}

impl PackageCategory {
    pub fn new(id: String, repo_id: String, metadata: Metadata) -> Self {
        Self {
            id,
            repo_id,
            metadata,
        }
    }
}

impl ContentUnit for PackageCategory {
    const TYPE: UnitType = UnitType::PackageCategory;
    const KEY_FIELDS: &'static [&'static str] = &["id", "repo_id"];

    fn key_values(&self) -> Vec<&str> {
        vec![&self.id, &self.repo_id]
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn from_fields(mut fields: Metadata) -> Result<Self> {
        let id = take_key_field(&mut fields, Self::TYPE, "id")?;
        let repo_id = take_key_field(&mut fields, Self::TYPE, "repo_id")?;

        fields.remove("type");

        Ok(Self {
            id,
            repo_id,
            metadata: fields,
        })
    }
}

impl fmt::Display for PackageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_string())
    }
}
