//! The get (in) operation: download a generated project for one version
//!
//! Files written to the destination directory, in order:
//!
//! 1. the artifact, named after its endpoint (`starter.zip`, `pom.xml` or `build.gradle`)
//! 2. `version`: the Spring Boot version id
//! 3. `url`: the exact URL the artifact was generated from
//! 4. `available-dependencies`: JSON array of dependency and BOM names
//!
//! Each step runs only if the previous one succeeded. Files already written
//! are left in place when a later step fails.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Source;
use crate::error::ResourceError;
use crate::initializr::{HttpFetcher, InitializrClient, Params};
use crate::resource::MetadataPair;
use crate::version::types::Version;

pub const VERSION_FILE: &str = "version";
pub const URL_FILE: &str = "url";
pub const AVAILABLE_DEPENDENCIES_FILE: &str = "available-dependencies";

/// Input of the get operation
#[derive(Debug, Clone, Deserialize)]
pub struct GetRequest {
    pub source: Source,
    pub version: Version,
    #[serde(default)]
    pub params: Params,
}

/// Output of the get operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetResponse {
    pub version: Version,
    pub metadata: Vec<MetadataPair>,
}

/// Run the get operation, writing into `destination`
pub async fn run_get<F: HttpFetcher>(
    client: &InitializrClient<F>,
    destination: &Path,
    request: &GetRequest,
) -> Result<GetResponse, ResourceError> {
    tokio::fs::create_dir_all(destination)
        .await
        .map_err(|e| ResourceError::filesystem(destination, e))?;

    let url = client.artifact_url(&request.version, &request.params);
    let file_name = request.params.project_type.endpoint();

    info!("Downloading {} for Spring Boot {}", file_name, request.version.id);
    let artifact = client.download(&url).await?;

    write_file(destination, file_name, &artifact).await?;
    write_file(destination, VERSION_FILE, request.version.id.as_bytes()).await?;
    write_file(destination, URL_FILE, url.as_str().as_bytes()).await?;

    let dependencies = client.fetch_dependency_names(&request.version).await?;
    let encoded = serde_json::to_vec(&dependencies)
        .map_err(|e| ResourceError::InvalidResponse(e.to_string()))?;
    write_file(destination, AVAILABLE_DEPENDENCIES_FILE, &encoded).await?;

    info!(
        "Wrote {} ({} bytes) and {} available dependencies to {}",
        file_name,
        artifact.len(),
        dependencies.len(),
        destination.display()
    );

    Ok(GetResponse {
        version: request.version.clone(),
        metadata: vec![
            MetadataPair::new("file", file_name),
            MetadataPair::new("version", &request.version.id),
            MetadataPair::new("url", url.as_str()),
        ],
    })
}

async fn write_file(dir: &Path, name: &str, contents: &[u8]) -> Result<(), ResourceError> {
    let path = dir.join(name);
    tokio::fs::write(&path, contents)
        .await
        .map_err(|e| ResourceError::filesystem(path, e))
}
