// src/lib.rs

//! Rpmdepot content unit models
//!
//! Data model for the content units handled by an RPM repository
//! management service: packages (RPM, DRPM), errata, package groups and
//! categories, and kickstart distribution trees.
//!
//! # Architecture
//!
//! - Unit keys: each variant declares a fixed, ordered set of key fields
//!   that uniquely identify a unit; everything else is free-form metadata
//! - Typed key tuples: a compact identity form for holding millions of
//!   unit identities in memory at once
//! - Version ordering: RPM-style (epoch, version, release) comparison via
//!   an order-preserving segment encoding
//! - Storage layout: each variant knows its relative path under the
//!   content store
//!
//! This crate performs no I/O. Downloading, persistence, and the web API
//! live in the surrounding service and consume these types.

pub mod constants;
mod error;
pub mod units;
pub mod version;

pub use error::{Error, Result};
