// src/units/rpm.rs

//! RPM package unit

use crate::error::{Error, Result};
use crate::units::UnitType;
use crate::units::traits::{ContentUnit, Metadata, Versioned, take_key_field};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A binary RPM package
///
/// Identity is the full NEVRA plus checksum: two builds of the same
/// name-epoch-version-release-arch with different payloads are distinct
/// units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rpm {
    pub name: String,
    pub epoch: String,
    pub version: String,
    pub release: String,
    pub arch: String,
    pub checksumtype: String,
    pub checksum: String,
    pub metadata: Metadata,
}

impl Rpm {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        epoch: String,
        version: String,
        release: String,
        arch: String,
        checksumtype: String,
        checksum: String,
        metadata: Metadata,
    ) -> Self {
        Self {
            name,
            epoch,
            version,
            release,
            arch,
            checksumtype,
            checksum,
            metadata,
        }
    }

    /// Relative path of the package file under the content store:
    /// `<name>/<version>/<release>/<arch>/<checksum>/<relative_url_path>`.
    ///
    /// Requires the `relative_url_path` metadata field recorded when the
    /// package was first seen in repository metadata.
    pub fn relative_path(&self) -> Result<String> {
        let url_path = self
            .metadata
            .get("relative_url_path")
            .and_then(Value::as_str)
            .ok_or(Error::MissingMetadataField {
                unit_type: UnitType::Rpm,
                field: "relative_url_path",
            })?;

        Ok([
            self.name.as_str(),
            &self.version,
            &self.release,
            &self.arch,
            &self.checksum,
            url_path,
        ]
        .join("/"))
    }
}

impl ContentUnit for Rpm {
    const TYPE: UnitType = UnitType::Rpm;
    const KEY_FIELDS: &'static [&'static str] = &[
        "name",
        "epoch",
        "version",
        "release",
        "arch",
        "checksumtype",
        "checksum",
    ];

    fn key_values(&self) -> Vec<&str> {
        vec![
            &self.name,
            &self.epoch,
            &self.version,
            &self.release,
            &self.arch,
            &self.checksumtype,
            &self.checksum,
        ]
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn from_fields(mut fields: Metadata) -> Result<Self> {
        let name = take_key_field(&mut fields, Self::TYPE, "name")?;
        let epoch = take_key_field(&mut fields, Self::TYPE, "epoch")?;
        let version = take_key_field(&mut fields, Self::TYPE, "version")?;
        let release = take_key_field(&mut fields, Self::TYPE, "release")?;
        let arch = take_key_field(&mut fields, Self::TYPE, "arch")?;
        let checksumtype = take_key_field(&mut fields, Self::TYPE, "checksumtype")?;
        let checksum = take_key_field(&mut fields, Self::TYPE, "checksum")?;

        // Raw mappings from the retrieval layer carry the type tag along;
        // it is redundant with the unit kind and never kept as metadata.
        fields.remove("type");

        Ok(Self {
            name,
            epoch,
            version,
            release,
            arch,
            checksumtype,
            checksum,
            metadata: fields,
        })
    }
}

impl Versioned for Rpm {}

impl fmt::Display for Rpm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cmp::Ordering;

    fn sample(name: &str, epoch: &str, version: &str, release: &str) -> Rpm {
        Rpm::new(
            name.to_string(),
            epoch.to_string(),
            version.to_string(),
            release.to_string(),
            "x86_64".to_string(),
            "sha256".to_string(),
            format!("{name}-{epoch}-{version}-{release}-digest"),
            Metadata::new(),
        )
    }

    #[test]
    fn test_unit_key_fields_and_order() {
        let rpm = sample("bash", "0", "4.3", "1");
        assert_eq!(
            rpm.unit_key(),
            vec![
                ("name", "bash"),
                ("epoch", "0"),
                ("version", "4.3"),
                ("release", "1"),
                ("arch", "x86_64"),
                ("checksumtype", "sha256"),
                ("checksum", "bash-0-4.3-1-digest"),
            ]
        );
    }

    #[test]
    fn test_typed_unit_key_starts_with_tag() {
        let rpm = sample("bash", "0", "4.3", "1");
        let key = rpm.typed_unit_key();
        assert_eq!(key.unit_type, UnitType::Rpm);
        assert_eq!(key.values[0], "bash");
        assert_eq!(key.values.len(), Rpm::KEY_FIELDS.len());
    }

    #[test]
    fn test_from_fields_splits_key_and_metadata() {
        let mut fields = Metadata::new();
        fields.insert("name".to_string(), json!("bash"));
        fields.insert("epoch".to_string(), json!("0"));
        fields.insert("version".to_string(), json!("4.3"));
        fields.insert("release".to_string(), json!("1"));
        fields.insert("arch".to_string(), json!("x86_64"));
        fields.insert("checksumtype".to_string(), json!("sha256"));
        fields.insert("checksum".to_string(), json!("abc"));
        fields.insert("summary".to_string(), json!("The GNU Bourne Again shell"));
        fields.insert("type".to_string(), json!("rpm"));

        let rpm = Rpm::from_fields(fields).unwrap();
        assert_eq!(rpm.name, "bash");
        assert_eq!(rpm.checksum, "abc");
        // the stray type tag is dropped, everything else non-key survives
        assert!(!rpm.metadata.contains_key("type"));
        assert_eq!(
            rpm.metadata.get("summary").and_then(Value::as_str),
            Some("The GNU Bourne Again shell")
        );
    }

    #[test]
    fn test_from_fields_missing_key_field() {
        let mut fields = Metadata::new();
        fields.insert("name".to_string(), json!("bash"));
        let err = Rpm::from_fields(fields).unwrap_err();
        assert!(matches!(err, Error::MissingKeyField { field: "epoch", .. }));
    }

    #[test]
    fn test_complete_version() {
        let rpm = sample("bash", "0", "4.3", "1");
        assert_eq!(rpm.complete_version(), vec!["0", "4.3", "1"]);
    }

    #[test]
    fn test_version_ordering_is_numeric() {
        let older = sample("bash", "0", "1.2", "1");
        let newer = sample("bash", "0", "1.10", "1");
        assert_eq!(older.cmp_version(&newer).unwrap(), Ordering::Less);
        assert_eq!(newer.cmp_version(&older).unwrap(), Ordering::Greater);
    }

    #[test]
    fn test_equal_versions_compare_equal_across_packages() {
        // same (epoch, version, release), everything else different
        let a = sample("bash", "1", "4.3", "2");
        let b = sample("coreutils", "1", "4.3", "2");
        assert_eq!(a.cmp_version(&b).unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_epoch_dominates_version() {
        let low_epoch = sample("bash", "0", "9.9", "9");
        let high_epoch = sample("bash", "1", "1.0", "1");
        assert_eq!(
            low_epoch.cmp_version(&high_epoch).unwrap(),
            Ordering::Less
        );
    }

    #[test]
    fn test_key_string_without_version_groups_versions() {
        let a = sample("bash", "0", "4.3", "1");
        let b = sample("bash", "0", "4.4", "7");
        assert_eq!(a.key_string_without_version(), "bash-x86_64-rpm");
        assert_eq!(
            a.key_string_without_version(),
            b.key_string_without_version()
        );
    }

    #[test]
    fn test_relative_path_requires_relative_url_path() {
        let mut rpm = sample("bash", "0", "4.3", "1");
        assert!(matches!(
            rpm.relative_path().unwrap_err(),
            Error::MissingMetadataField {
                field: "relative_url_path",
                ..
            }
        ));

        rpm.metadata.insert(
            "relative_url_path".to_string(),
            json!("bash-4.3-1.x86_64.rpm"),
        );
        assert_eq!(
            rpm.relative_path().unwrap(),
            "bash/4.3/1/x86_64/bash-0-4.3-1-digest/bash-4.3-1.x86_64.rpm"
        );
    }

    #[test]
    fn test_display() {
        let rpm = sample("bash", "0", "4.3", "1");
        assert_eq!(
            rpm.to_string(),
            "rpm: bash-0-4.3-1-x86_64-sha256-bash-0-4.3-1-digest"
        );
    }
}
