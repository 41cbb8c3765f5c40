//! Spring Initializr API client

use std::collections::BTreeMap;

use reqwest::Url;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Source;
use crate::error::ResourceError;
use crate::initializr::fetcher::{HttpFetcher, ReqwestFetcher, TransportConfig};
use crate::initializr::project::Params;
use crate::version::types::Version;

/// Media type of the Initializr metadata API
pub const ACCEPT_HEADER: &str = "application/vnd.initializr.v2.1+json";

/// Endpoint listing the dependencies available for a Spring Boot version
const DEPENDENCIES_ENDPOINT: &str = "dependencies";

/// Catalogue served at the root of an Initializr instance
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogueResponse {
    boot_version: BootVersion,
}

#[derive(Debug, Deserialize)]
struct BootVersion {
    #[serde(default)]
    default: Option<String>,
    values: Vec<Version>,
}

/// Response from the dependencies endpoint; only the keys are used
#[derive(Debug, Deserialize)]
struct DependenciesResponse {
    #[serde(default)]
    dependencies: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    boms: BTreeMap<String, serde_json::Value>,
}

pub struct InitializrClient<F: HttpFetcher> {
    fetcher: F,
    base_url: Url,
}

impl InitializrClient<ReqwestFetcher> {
    /// Creates a client for the instance and transport described by `source`
    pub fn from_source(source: &Source) -> Result<Self, ResourceError> {
        let fetcher = ReqwestFetcher::new(TransportConfig::from(source))?;
        Ok(Self::new(source.url.clone(), fetcher))
    }
}

impl<F: HttpFetcher> InitializrClient<F> {
    pub fn new(base_url: Url, fetcher: F) -> Self {
        Self { fetcher, base_url }
    }

    /// Fetches every Spring Boot version the instance offers, in catalogue order
    pub async fn fetch_boot_versions(&self) -> Result<Vec<Version>, ResourceError> {
        let body = self.fetcher.fetch(&self.base_url, ACCEPT_HEADER).await?;
        let catalogue: CatalogueResponse = decode(&body)?;

        debug!(
            "Catalogue lists {} boot versions (default {:?})",
            catalogue.boot_version.values.len(),
            catalogue.boot_version.default
        );

        Ok(catalogue.boot_version.values)
    }

    /// URL generating the artifact described by `params` for `version`
    pub fn artifact_url(&self, version: &Version, params: &Params) -> Url {
        let mut url = self.endpoint_url(params.project_type.endpoint());
        url.query_pairs_mut()
            .extend_pairs(params.query(&version.id));
        url
    }

    /// Downloads the bytes at `url`, typically one built by [`Self::artifact_url`]
    pub async fn download(&self, url: &Url) -> Result<Vec<u8>, ResourceError> {
        self.fetcher.fetch(url, ACCEPT_HEADER).await
    }

    /// Names of the dependencies and BOMs available for `version`.
    ///
    /// Dependencies come first, then BOMs, each in name order.
    pub async fn fetch_dependency_names(
        &self,
        version: &Version,
    ) -> Result<Vec<String>, ResourceError> {
        let mut url = self.endpoint_url(DEPENDENCIES_ENDPOINT);
        url.query_pairs_mut()
            .append_pair("bootVersion", &version.id);

        let body = self.fetcher.fetch(&url, ACCEPT_HEADER).await?;
        let response: DependenciesResponse = decode(&body)?;

        Ok(response
            .dependencies
            .into_keys()
            .chain(response.boms.into_keys())
            .collect())
    }

    /// `endpoint` appended to the base URL path, without query or fragment
    fn endpoint_url(&self, endpoint: &str) -> Url {
        let mut url = self.base_url.clone();
        let path = format!("{}/{}", url.path().trim_end_matches('/'), endpoint);
        url.set_path(&path);
        url.set_query(None);
        url.set_fragment(None);
        url
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ResourceError> {
    serde_json::from_slice(body).map_err(|e| ResourceError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initializr::fetcher::MockHttpFetcher;
    use crate::initializr::project::ProjectType;
    use rstest::rstest;

    fn client(base_url: &str, fetcher: MockHttpFetcher) -> InitializrClient<MockHttpFetcher> {
        InitializrClient::new(Url::parse(base_url).unwrap(), fetcher)
    }

    fn params(project_type: ProjectType) -> Params {
        Params {
            project_type,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn fetch_boot_versions_returns_catalogue_values_in_order() {
        let mut fetcher = MockHttpFetcher::new();
        fetcher
            .expect_fetch()
            .withf(|url, accept| {
                url.as_str() == "https://start.spring.io/" && accept.to_string() == ACCEPT_HEADER
            })
            .times(1)
            .returning(|_, _| {
                Ok(br#"{
                    "bootVersion": {
                        "type": "single-select",
                        "default": "2.0.2.RELEASE",
                        "values": [
                            {"id": "2.1.0.BUILD-SNAPSHOT", "name": "2.1.0 (SNAPSHOT)"},
                            {"id": "2.0.2.RELEASE", "name": "2.0.2"}
                        ]
                    }
                }"#
                .to_vec())
            });

        let versions = client("https://start.spring.io", fetcher)
            .fetch_boot_versions()
            .await
            .unwrap();

        assert_eq!(
            versions,
            vec![
                Version::new("2.1.0.BUILD-SNAPSHOT", "2.1.0 (SNAPSHOT)"),
                Version::new("2.0.2.RELEASE", "2.0.2"),
            ]
        );
    }

    #[rstest]
    #[case(br#"not json"#.as_slice())]
    #[case(br#"{"dependencies": {}}"#.as_slice())]
    #[case(br#"{"bootVersion": {"values": [{"name": "no id"}]}}"#.as_slice())]
    #[tokio::test]
    async fn fetch_boot_versions_rejects_unexpected_bodies(#[case] body: &'static [u8]) {
        let mut fetcher = MockHttpFetcher::new();
        fetcher
            .expect_fetch()
            .returning(move |_, _| Ok(body.to_vec()));

        let result = client("https://start.spring.io", fetcher)
            .fetch_boot_versions()
            .await;

        assert!(matches!(result, Err(ResourceError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn fetch_boot_versions_propagates_upstream_errors() {
        let mut fetcher = MockHttpFetcher::new();
        fetcher.expect_fetch().returning(|_, _| {
            Err(ResourceError::Upstream {
                status: 500,
                status_text: "Internal Server Error".to_string(),
                body: "boom".to_string(),
            })
        });

        let result = client("https://start.spring.io", fetcher)
            .fetch_boot_versions()
            .await;

        assert!(matches!(
            result,
            Err(ResourceError::Upstream { status: 500, .. })
        ));
    }

    #[rstest]
    #[case(
        "https://start.spring.io",
        ProjectType::MavenBuild,
        "https://start.spring.io/pom.xml?bootVersion=2.0.2.RELEASE&type=maven-build"
    )]
    #[case(
        "https://start.spring.io/",
        ProjectType::GradleBuild,
        "https://start.spring.io/build.gradle?bootVersion=2.0.2.RELEASE&type=gradle-build"
    )]
    #[case(
        "https://start.spring.io",
        ProjectType::MavenProject,
        "https://start.spring.io/starter.zip?bootVersion=2.0.2.RELEASE&type=maven-project"
    )]
    #[case(
        "https://internal.example.com/initializr/?ignored=1",
        ProjectType::GradleProject,
        "https://internal.example.com/initializr/starter.zip?bootVersion=2.0.2.RELEASE&type=gradle-project"
    )]
    fn artifact_url_joins_endpoint_onto_base_path(
        #[case] base_url: &str,
        #[case] project_type: ProjectType,
        #[case] expected: &str,
    ) {
        let client = client(base_url, MockHttpFetcher::new());

        let url = client.artifact_url(&Version::from_id("2.0.2.RELEASE"), &params(project_type));

        assert_eq!(url.as_str(), expected);
    }

    #[test]
    fn artifact_url_encodes_free_text_params() {
        let client = client("https://start.spring.io", MockHttpFetcher::new());
        let params = Params {
            project_type: ProjectType::MavenBuild,
            description: Some("Demo project for Spring Boot".to_string()),
            dependencies: Some("web,data-jpa".to_string()),
            ..Default::default()
        };

        let url = client.artifact_url(&Version::from_id("2.0.2.RELEASE"), &params);

        assert_eq!(
            url.query(),
            Some(
                "bootVersion=2.0.2.RELEASE&dependencies=web%2Cdata-jpa&description=Demo+project+for+Spring+Boot&type=maven-build"
            )
        );
    }

    #[tokio::test]
    async fn fetch_dependency_names_lists_dependencies_then_boms() {
        let mut fetcher = MockHttpFetcher::new();
        fetcher
            .expect_fetch()
            .withf(|url, _| {
                url.as_str() == "https://start.spring.io/dependencies?bootVersion=2.0.2.RELEASE"
            })
            .times(1)
            .returning(|_, _| {
                Ok(br#"{
                    "bootVersion": "2.0.2.RELEASE",
                    "dependencies": {
                        "web": {"groupId": "org.springframework.boot"},
                        "actuator": {"groupId": "org.springframework.boot"}
                    },
                    "repositories": {"spring-milestones": {}},
                    "boms": {
                        "spring-cloud": {"groupId": "org.springframework.cloud"}
                    }
                }"#
                .to_vec())
            });

        let names = client("https://start.spring.io", fetcher)
            .fetch_dependency_names(&Version::from_id("2.0.2.RELEASE"))
            .await
            .unwrap();

        assert_eq!(names, vec!["actuator", "web", "spring-cloud"]);
    }

    #[tokio::test]
    async fn fetch_dependency_names_tolerates_missing_sections() {
        let mut fetcher = MockHttpFetcher::new();
        fetcher
            .expect_fetch()
            .returning(|_, _| Ok(br#"{"bootVersion": "2.0.2.RELEASE"}"#.to_vec()));

        let names = client("https://start.spring.io", fetcher)
            .fetch_dependency_names(&Version::from_id("2.0.2.RELEASE"))
            .await
            .unwrap();

        assert!(names.is_empty());
    }
}
