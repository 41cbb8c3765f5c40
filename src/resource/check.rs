//! The check operation: report versions published since the last check

use serde::Deserialize;
use tracing::info;

use crate::config::Source;
use crate::error::ResourceError;
use crate::initializr::{HttpFetcher, InitializrClient};
use crate::version::selector::{SelectionPolicy, select};
use crate::version::types::Version;

/// Input of the check operation
#[derive(Debug, Clone, Deserialize)]
pub struct CheckRequest {
    pub source: Source,
    /// Last version reported to the pipeline, absent on the first check
    #[serde(default)]
    pub version: Option<Version>,
}

impl CheckRequest {
    pub fn selection_policy(&self) -> SelectionPolicy {
        SelectionPolicy {
            include_snapshots: self.source.include_snapshots,
            product_version: self.source.product_version.clone(),
            checkpoint: self.version.clone(),
        }
    }
}

/// Versions newer than the checkpoint, newest first
pub type CheckResponse = Vec<Version>;

/// Run the check operation against `client`
pub async fn run_check<F: HttpFetcher>(
    client: &InitializrClient<F>,
    request: &CheckRequest,
) -> Result<CheckResponse, ResourceError> {
    let catalogue = client.fetch_boot_versions().await?;
    let versions = select(&catalogue, &request.selection_policy())?;

    info!(
        "Found {} new versions since {}",
        versions.len(),
        request
            .version
            .as_ref()
            .map_or("the first check", |v| v.id.as_str())
    );

    Ok(versions)
}
