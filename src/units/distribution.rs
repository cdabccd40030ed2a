// src/units/distribution.rs

//! Kickstart distribution tree unit

use crate::constants::DISTRIBUTION_STORAGE_PATH;
use crate::error::{Error, Result};
use crate::units::UnitType;
use crate::units::traits::{ContentUnit, Metadata, take_key_field};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Outcome of one successful file download, as handed over by the
/// download subsystem once a distribution tree has been fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadReport {
    pub checksum: String,
    pub checksum_type: String,
    /// Source URL the file was fetched from.
    pub url: String,
    /// Absolute path the file was written to.
    pub destination: String,
    /// Path of the file relative to the distribution tree root.
    pub relative_path: String,
    pub total_bytes: u64,
}

/// A kickstart distribution tree (installer images plus tree metadata)
///
/// Unlike the one-file unit kinds, a distribution owns a whole directory
/// of files, so its relative path is a directory and the per-file detail
/// accumulates in `metadata["files"]` after download.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub id: String,
    pub family: String,
    pub variant: String,
    pub version: String,
    pub arch: String,
    pub metadata: Metadata,
}

impl Distribution {
    pub fn new(family: String, variant: String, version: String, arch: String) -> Self {
        let id = kickstart_id(&family, &variant, &version, &arch);
        Self {
            id,
            family,
            variant,
            version,
            arch,
            metadata: Metadata::new(),
        }
    }

    /// Relative path of the distribution under the content store.
    ///
    /// This is a directory in which all of the tree's files get stored,
    /// not a path to a single file.
    pub fn relative_path(&self) -> &str {
        &self.id
    }

    /// Record one file descriptor per successful download report in
    /// `metadata["files"]`.
    ///
    /// Must be called after the download stage completes and before the
    /// unit is persisted. Not idempotent: calling it again with the same
    /// reports appends duplicate entries.
    pub fn process_download_reports(&mut self, reports: &[DownloadReport]) {
        debug!(
            "recording {} downloaded files for distribution {}",
            reports.len(),
            self.id
        );

        let entry = self
            .metadata
            .entry("files")
            .or_insert_with(|| Value::Array(Vec::new()));
        if !entry.is_array() {
            *entry = Value::Array(Vec::new());
        }

        if let Value::Array(files) = entry {
            for report in reports {
                files.push(file_descriptor(&self.id, report));
            }
        }
    }
}

/// Distributions are identified by a synthetic `ks-` id derived from the
/// rest of the key, matching the layout the tree importer has always used.
fn kickstart_id(family: &str, variant: &str, version: &str, arch: &str) -> String {
    ["ks", family, variant, version, arch].join("-")
}

/// Build the stored descriptor for one downloaded file.
fn file_descriptor(distribution_id: &str, report: &DownloadReport) -> Value {
    let relative = Path::new(&report.relative_path);
    let filename = relative
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    // package root = storage root / unit id / directory part of the
    // relative path
    let mut package_root = PathBuf::from(DISTRIBUTION_STORAGE_PATH);
    package_root.push(distribution_id);
    if let Some(parent) = relative.parent() {
        if !parent.as_os_str().is_empty() {
            package_root.push(parent);
        }
    }

    json!({
        "checksum": report.checksum,
        "checksumtype": report.checksum_type,
        "downloadurl": report.url,
        // both spellings exist in stored units; keep writing both so
        // consumers reading either keep working
        "filename": filename,
        "fileName": filename,
        "item_type": UnitType::Distribution.as_str(),
        "pkgpath": package_root.to_string_lossy(),
        "relativepath": report.relative_path,
        "savepath": report.destination,
        "size": report.total_bytes,
    })
}

impl ContentUnit for Distribution {
    const TYPE: UnitType = UnitType::Distribution;
    const KEY_FIELDS: &'static [&'static str] = &["id", "family", "variant", "version", "arch"];

    fn key_values(&self) -> Vec<&str> {
        vec![
            &self.id,
            &self.family,
            &self.variant,
            &self.version,
            &self.arch,
        ]
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn from_fields(mut fields: Metadata) -> Result<Self> {
        // The id is derivable from the rest of the key, so mappings may
        // omit it; an explicit id wins when present.
        let id = match fields.remove("id") {
            Some(Value::String(id)) => Some(id),
            Some(_) => return Err(Error::InvalidKeyField { field: "id" }),
            None => None,
        };
        let family = take_key_field(&mut fields, Self::TYPE, "family")?;
        let variant = take_key_field(&mut fields, Self::TYPE, "variant")?;
        let version = take_key_field(&mut fields, Self::TYPE, "version")?;
        let arch = take_key_field(&mut fields, Self::TYPE, "arch")?;

        fields.remove("type");

        let id = id.unwrap_or_else(|| kickstart_id(&family, &variant, &version, &arch));

        Ok(Self {
            id,
            family,
            variant,
            version,
            arch,
            metadata: fields,
        })
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Distribution {
        Distribution::new(
            "f20".to_string(),
            "server".to_string(),
            "1".to_string(),
            "x86_64".to_string(),
        )
    }

    fn sample_report() -> DownloadReport {
        DownloadReport {
            checksum: "abc123".to_string(),
            checksum_type: "sha256".to_string(),
            url: "https://mirror.example.com/f20/images/boot.iso".to_string(),
            destination: "/var/cache/rpmdepot/working/boot.iso".to_string(),
            relative_path: "images/boot.iso".to_string(),
            total_bytes: 1024,
        }
    }

    #[test]
    fn test_id_is_derived() {
        let dist = sample();
        assert_eq!(dist.id, "ks-f20-server-1-x86_64");
        assert_eq!(dist.relative_path(), "ks-f20-server-1-x86_64");
    }

    #[test]
    fn test_unit_key_fields_and_order() {
        let dist = sample();
        assert_eq!(
            dist.unit_key(),
            vec![
                ("id", "ks-f20-server-1-x86_64"),
                ("family", "f20"),
                ("variant", "server"),
                ("version", "1"),
                ("arch", "x86_64"),
            ]
        );
        assert_eq!(dist.typed_unit_key().unit_type, UnitType::Distribution);
    }

    #[test]
    fn test_from_fields_derives_missing_id() {
        let mut fields = Metadata::new();
        fields.insert("family".to_string(), json!("f20"));
        fields.insert("variant".to_string(), json!("server"));
        fields.insert("version".to_string(), json!("1"));
        fields.insert("arch".to_string(), json!("x86_64"));

        let dist = Distribution::from_fields(fields).unwrap();
        assert_eq!(dist.id, "ks-f20-server-1-x86_64");
    }

    #[test]
    fn test_from_fields_keeps_explicit_id() {
        let mut fields = Metadata::new();
        fields.insert("id".to_string(), json!("ks-custom"));
        fields.insert("family".to_string(), json!("f20"));
        fields.insert("variant".to_string(), json!("server"));
        fields.insert("version".to_string(), json!("1"));
        fields.insert("arch".to_string(), json!("x86_64"));

        let dist = Distribution::from_fields(fields).unwrap();
        assert_eq!(dist.id, "ks-custom");
    }

    #[test]
    fn test_process_download_reports_records_descriptors() {
        let mut dist = sample();
        dist.process_download_reports(&[sample_report()]);

        let files = dist.metadata["files"].as_array().unwrap();
        assert_eq!(files.len(), 1);

        let file = &files[0];
        assert_eq!(file["checksum"], "abc123");
        assert_eq!(file["checksumtype"], "sha256");
        assert_eq!(
            file["downloadurl"],
            "https://mirror.example.com/f20/images/boot.iso"
        );
        assert_eq!(file["filename"], "boot.iso");
        assert_eq!(file["fileName"], "boot.iso");
        assert_eq!(file["item_type"], "distribution");
        assert_eq!(
            file["pkgpath"],
            "/var/lib/rpmdepot/content/distribution/ks-f20-server-1-x86_64/images"
        );
        assert_eq!(file["relativepath"], "images/boot.iso");
        assert_eq!(file["savepath"], "/var/cache/rpmdepot/working/boot.iso");
        assert_eq!(file["size"], 1024);
    }

    #[test]
    fn test_process_download_reports_is_not_idempotent() {
        let mut dist = sample();
        let reports = [sample_report()];
        dist.process_download_reports(&reports);
        dist.process_download_reports(&reports);

        // duplicate entries document that callers must only invoke this
        // once per download stage
        let files = dist.metadata["files"].as_array().unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0], files[1]);
    }

    #[test]
    fn test_file_at_tree_root_has_no_directory_part() {
        let mut dist = sample();
        let report = DownloadReport {
            relative_path: "treeinfo".to_string(),
            ..sample_report()
        };
        dist.process_download_reports(&[report]);

        let file = &dist.metadata["files"].as_array().unwrap()[0];
        assert_eq!(file["filename"], "treeinfo");
        assert_eq!(
            file["pkgpath"],
            "/var/lib/rpmdepot/content/distribution/ks-f20-server-1-x86_64"
        );
    }
}
