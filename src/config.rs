use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use regex::Regex;
use reqwest::Url;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

use crate::error::ResourceError;

// =============================================================================
// Constants
// =============================================================================

/// Initializr instance used when the source omits `url`
pub const DEFAULT_URL: &str = "https://start.spring.io";

/// Timeout for each HTTP request in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// User agent sent with every request
pub const USER_AGENT: &str = "initializr-resource";

/// The `source` block of a resource definition, validated
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawSource")]
pub struct Source {
    pub url: Url,
    pub skip_tls_validation: bool,
    /// PEM encoded certificates trusted in addition to the system roots
    pub ca_certs: Vec<String>,
    pub product_version: Option<Regex>,
    pub include_snapshots: bool,
    pub http_proxy: Option<String>,
    pub https_proxy: Option<String>,
    pub no_proxy: Option<String>,
}

impl Source {
    /// Source pointing at `url` with every other option at its default
    pub fn with_url(url: Url) -> Self {
        Self {
            url,
            skip_tls_validation: false,
            ca_certs: Vec::new(),
            product_version: None,
            include_snapshots: false,
            http_proxy: None,
            https_proxy: None,
            no_proxy: None,
        }
    }
}

/// The `source` block as it appears on the wire
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawSource {
    url: String,
    #[serde(deserialize_with = "flag")]
    skip_tls_validation: bool,
    ca_certs: Vec<String>,
    product_version: Option<String>,
    #[serde(deserialize_with = "flag")]
    include_snapshots: bool,
    http_proxy: Option<String>,
    https_proxy: Option<String>,
    no_proxy: Option<String>,
    /// Anything else, rejected during validation
    #[serde(flatten)]
    unknown: BTreeMap<String, serde_json::Value>,
}

impl Default for RawSource {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            skip_tls_validation: false,
            ca_certs: Vec::new(),
            product_version: None,
            include_snapshots: false,
            http_proxy: None,
            https_proxy: None,
            no_proxy: None,
            unknown: BTreeMap::new(),
        }
    }
}

impl TryFrom<RawSource> for Source {
    type Error = ResourceError;

    fn try_from(raw: RawSource) -> Result<Self, Self::Error> {
        if let Some(field) = raw.unknown.keys().next() {
            return Err(ResourceError::Config(format!(
                "unknown field `{field}`, it may belong under `params`"
            )));
        }

        let url = Url::parse(&raw.url)
            .map_err(|e| ResourceError::Config(format!("url {:?}: {}", raw.url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ResourceError::Config(format!(
                "url {:?}: scheme must be http or https",
                raw.url
            )));
        }

        let product_version = raw
            .product_version
            .map(|pattern| {
                Regex::new(&pattern)
                    .map_err(|e| ResourceError::Config(format!("product_version: {}", e)))
            })
            .transpose()?;

        Ok(Self {
            url,
            skip_tls_validation: raw.skip_tls_validation,
            ca_certs: raw.ca_certs,
            product_version,
            include_snapshots: raw.include_snapshots,
            http_proxy: non_blank(raw.http_proxy),
            https_proxy: non_blank(raw.https_proxy),
            no_proxy: non_blank(raw.no_proxy),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Deserialize a boolean that may also be written as a string ("true", "0", ...)
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    struct FlagVisitor;

    impl Visitor<'_> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean or a boolean string")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
            match v {
                "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
                "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
                _ => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
            }
        }

        fn visit_unit<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }

        fn visit_none<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }
    }

    deserializer.deserialize_any(FlagVisitor)
}

/// Returns the path to the data directory for initializr-resource.
/// Uses $XDG_DATA_HOME/initializr-resource if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/initializr-resource,
/// or ./initializr-resource if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("initializr-resource.log")
}

/// Returns the path where the raw request of `operation` is kept for diagnostics.
pub fn request_path(operation: &str) -> PathBuf {
    data_dir().join(format!("{operation}-request.json"))
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("initializr-resource")
}
