//! Concourse resource operations
//!
//! Each operation reads a JSON request from stdin and writes a JSON response
//! to stdout. Logs go to stderr.
//!
//! # Modules
//!
//! - [`check`]: Report new Spring Boot versions since a checkpoint
//! - [`get`]: Download a generated project for one version (`in`)
//! - [`put`]: Rejects `out`, the resource is read-only

pub mod check;
pub mod get;
pub mod put;

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{data_dir, request_path};
use crate::error::ResourceError;

/// A `name`/`value` entry shown next to a fetched version in the Concourse UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataPair {
    pub name: String,
    pub value: String,
}

impl MetadataPair {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Decode the raw stdin payload of an operation
pub fn decode_request<T: DeserializeOwned>(raw: &[u8]) -> Result<T, ResourceError> {
    Ok(serde_json::from_slice(raw)?)
}

/// Keep a copy of the raw request of `operation` in the data directory.
///
/// Failing to save is logged and otherwise ignored.
pub fn save_request(operation: &str, raw: &[u8]) {
    let dir = data_dir();
    if let Err(e) = std::fs::create_dir_all(&dir) {
        warn!(
            "Could not create {:?} to keep the request, continuing anyway: {}",
            dir, e
        );
        return;
    }

    save_request_to(&request_path(operation), raw);
}

fn save_request_to(path: &Path, raw: &[u8]) {
    match std::fs::write(path, raw) {
        Ok(()) => debug!("Saved request to {:?}", path),
        Err(e) => warn!(
            "Could not save request to {:?}, continuing anyway: {}",
            path, e
        ),
    }
}
