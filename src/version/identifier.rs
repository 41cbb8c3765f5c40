//! Parsing of Initializr version identifiers
//!
//! Identifiers look like `2.0.2.RELEASE` or `2.1.0.BUILD-SNAPSHOT`: a numeric
//! `major.minor.patch` triple followed by a release type. Only the triple takes
//! part in ordering.

use std::cmp::Ordering;

use crate::error::ResourceError;
use crate::version::types::Version;

/// Release type of a stable Spring Boot version
pub const RELEASE_TYPE: &str = "RELEASE";

/// A parsed `<major>.<minor>.<patch>.<releaseType>` identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionIdentifier {
    build: semver::Version,
    release_type: String,
}

impl VersionIdentifier {
    /// Parse an identifier string.
    ///
    /// The string is split into at most four segments, so a release type may
    /// itself contain dots or dashes. The first three segments must form a plain
    /// numeric version.
    pub fn parse(id: &str) -> Result<Self, ResourceError> {
        let parts: Vec<&str> = id.splitn(4, '.').collect();
        let [major, minor, patch, release_type] = parts.as_slice() else {
            return Err(ResourceError::parse(
                id,
                format!("expected 4 dot-separated segments, found {}", parts.len()),
            ));
        };

        let build = semver::Version::parse(&format!("{major}.{minor}.{patch}"))
            .map_err(|e| ResourceError::parse(id, e.to_string()))?;

        // "1.2.3-rc.RELEASE" would otherwise sneak a pre-release into the triple
        if !build.pre.is_empty() || !build.build.is_empty() {
            return Err(ResourceError::parse(
                id,
                "major, minor and patch must be plain integers",
            ));
        }

        Ok(Self {
            build,
            release_type: release_type.to_string(),
        })
    }

    pub fn major(&self) -> u64 {
        self.build.major
    }

    pub fn minor(&self) -> u64 {
        self.build.minor
    }

    pub fn patch(&self) -> u64 {
        self.build.patch
    }

    pub fn release_type(&self) -> &str {
        &self.release_type
    }

    /// Whether the release type is `RELEASE`, ignoring case
    pub fn is_release(&self) -> bool {
        self.release_type.eq_ignore_ascii_case(RELEASE_TYPE)
    }

    /// Compare by numeric triple only, ignoring the release type
    pub fn cmp_numeric(&self, other: &Self) -> Ordering {
        self.build.cmp(&other.build)
    }
}

/// A catalogue entry paired with its parsed identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparableVersion {
    pub version: Version,
    pub identifier: VersionIdentifier,
}

impl ComparableVersion {
    pub fn parse(version: Version) -> Result<Self, ResourceError> {
        let identifier = VersionIdentifier::parse(&version.id)?;
        Ok(Self {
            version,
            identifier,
        })
    }

    pub fn into_version(self) -> Version {
        self.version
    }
}
