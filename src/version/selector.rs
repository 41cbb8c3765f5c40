//! Selection of new versions from the Initializr catalogue
//!
//! Given the raw catalogue and a [`SelectionPolicy`], [`select`] returns the
//! matching versions newest first, cut off at the checkpoint when one is set.

use std::cmp::Ordering;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::ResourceError;
use crate::version::identifier::{ComparableVersion, VersionIdentifier};
use crate::version::types::Version;

/// Which catalogue entries a check reports
#[derive(Debug, Clone, Default)]
pub struct SelectionPolicy {
    /// Keep non-`RELEASE` entries such as `BUILD-SNAPSHOT` or milestones
    pub include_snapshots: bool,
    /// Unanchored pattern the full identifier must match
    pub product_version: Option<Regex>,
    /// Last version seen by the pipeline; only strictly newer versions are kept
    pub checkpoint: Option<Version>,
}

/// Select matching versions, newest first.
///
/// Every entry is parsed before any filtering, so a single malformed
/// identifier fails the whole call. Entries with the same numeric triple keep
/// their catalogue order.
pub fn select(
    raw_versions: &[Version],
    policy: &SelectionPolicy,
) -> Result<Vec<Version>, ResourceError> {
    let parsed = raw_versions
        .iter()
        .cloned()
        .map(ComparableVersion::parse)
        .collect::<Result<Vec<_>, _>>()?;

    let mut candidates: Vec<ComparableVersion> = parsed
        .into_iter()
        .filter(|v| policy.include_snapshots || v.identifier.is_release())
        .filter(|v| {
            policy
                .product_version
                .as_ref()
                .is_none_or(|pattern| pattern.is_match(&v.version.id))
        })
        .collect();

    // sort_by is stable, which keeps ties deterministic
    candidates.sort_by(|a, b| b.identifier.cmp_numeric(&a.identifier));

    debug!(
        "{} of {} catalogue entries match the selection policy",
        candidates.len(),
        raw_versions.len()
    );

    let Some(checkpoint) = policy.checkpoint.as_ref().and_then(parse_checkpoint) else {
        return Ok(candidates
            .into_iter()
            .map(ComparableVersion::into_version)
            .collect());
    };

    Ok(candidates
        .into_iter()
        .take_while(|v| v.identifier.cmp_numeric(&checkpoint) == Ordering::Greater)
        .map(ComparableVersion::into_version)
        .collect())
}

/// Parse the checkpoint, treating a malformed one as absent.
fn parse_checkpoint(checkpoint: &Version) -> Option<VersionIdentifier> {
    VersionIdentifier::parse(&checkpoint.id)
        .inspect_err(|e| {
            warn!(
                "Ignoring unparseable checkpoint {}, reporting all matching versions: {}",
                checkpoint.id, e
            )
        })
        .ok()
}
