// src/units/drpm.rs

//! Delta RPM package unit

use crate::error::Result;
use crate::units::UnitType;
use crate::units::traits::{ContentUnit, Metadata, Versioned, take_key_field};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A delta RPM, identified by the version it patches to plus its filename
/// and checksum. Delta RPMs carry no package name of their own; the
/// filename encodes the old and new NEVRA.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drpm {
    pub epoch: String,
    pub version: String,
    pub release: String,
    pub filename: String,
    pub checksumtype: String,
    pub checksum: String,
    pub metadata: Metadata,
}

impl Drpm {
    pub fn new(
        epoch: String,
        version: String,
        release: String,
        filename: String,
        checksumtype: String,
        checksum: String,
        metadata: Metadata,
    ) -> Self {
        Self {
            epoch,
            version,
            release,
            filename,
            checksumtype,
            checksum,
            metadata,
        }
    }

    /// Relative path of the delta file under the content store.
    pub fn relative_path(&self) -> &str {
        &self.filename
    }
}

impl ContentUnit for Drpm {
    const TYPE: UnitType = UnitType::Drpm;
    const KEY_FIELDS: &'static [&'static str] = &[
        "epoch",
        "version",
        "release",
        "filename",
        "checksumtype",
        "checksum",
    ];

    fn key_values(&self) -> Vec<&str> {
        vec![
            &self.epoch,
            &self.version,
            &self.release,
            &self.filename,
            &self.checksumtype,
            &self.checksum,
        ]
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn from_fields(mut fields: Metadata) -> Result<Self> {
        let epoch = take_key_field(&mut fields, Self::TYPE, "epoch")?;
        let version = take_key_field(&mut fields, Self::TYPE, "version")?;
        let release = take_key_field(&mut fields, Self::TYPE, "release")?;
        let filename = take_key_field(&mut fields, Self::TYPE, "filename")?;
        let checksumtype = take_key_field(&mut fields, Self::TYPE, "checksumtype")?;
        let checksum = take_key_field(&mut fields, Self::TYPE, "checksum")?;

        fields.remove("type");

        Ok(Self {
            epoch,
            version,
            release,
            filename,
            checksumtype,
            checksum,
            metadata: fields,
        })
    }
}

impl Versioned for Drpm {}

impl fmt::Display for Drpm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_string())
    }
}
