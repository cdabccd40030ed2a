// src/constants.rs

//! Storage-layout constants shared with the download and persistence layers.

/// Root directory under which distribution trees are laid out on disk.
///
/// Each distribution unit stores its files under
/// `<DISTRIBUTION_STORAGE_PATH>/<unit id>/`.
pub const DISTRIBUTION_STORAGE_PATH: &str = "/var/lib/rpmdepot/content/distribution";
