//! Common types shared by the catalogue and the resource protocol

use serde::{Deserialize, Serialize};

/// A Spring Boot version as listed in the Initializr catalogue.
///
/// The same shape is exchanged with Concourse as the resource version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

impl Version {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Version known only by its identifier
    pub fn from_id(id: impl Into<String>) -> Self {
        Self::new(id, "")
    }
}
