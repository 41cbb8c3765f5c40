//! Fake Initializr server backed by mockito

use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{Value, json};

use initializr_resource::initializr::ACCEPT_HEADER;

pub const CATALOGUE: &str = include_str!("../testdata/initializr.json");
pub const DEPENDENCIES: &str = include_str!("../testdata/dependencies.json");
pub const POM: &str = include_str!("../testdata/pom.xml");
pub const BUILD_GRADLE: &str = "plugins {\n\tid 'org.springframework.boot' version '2.0.2.RELEASE'\n}\n";
pub const STARTER_ZIP: &[u8] = b"PK\x03\x04demo/pom.xml";

/// Names listed in `testdata/dependencies.json`: dependencies, then BOMs
pub const DEPENDENCY_NAMES: [&str; 10] = [
    "actuator",
    "cloud-config-client",
    "data-jpa",
    "devtools",
    "lombok",
    "security",
    "vaadin",
    "web",
    "spring-cloud",
    "vaadin",
];

/// A mockito server answering like an Initializr instance
pub struct FakeInitializr {
    pub server: ServerGuard,
    // Kept alive for the duration of the test
    mocks: Vec<Mock>,
}

impl FakeInitializr {
    /// Server without any endpoint configured
    pub async fn empty() -> Self {
        Self {
            server: Server::new_async().await,
            mocks: Vec::new(),
        }
    }

    /// Server serving the catalogue, every artifact type and the dependencies
    pub async fn start() -> Self {
        let mut fake = Self::empty().await;
        fake.serve("/", CATALOGUE.as_bytes()).await;
        fake.serve("/pom.xml", POM.as_bytes()).await;
        fake.serve("/build.gradle", BUILD_GRADLE.as_bytes()).await;
        fake.serve("/starter.zip", STARTER_ZIP).await;
        fake.serve("/dependencies", DEPENDENCIES.as_bytes()).await;
        fake
    }

    /// Answer GET `path` (any query) with `body`
    pub async fn serve(&mut self, path: &str, body: &[u8]) {
        let mock = self
            .server
            .mock("GET", path)
            .match_query(Matcher::Any)
            .match_header("accept", ACCEPT_HEADER)
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;
        self.mocks.push(mock);
    }

    /// Answer GET `path` (any query) with an error status
    pub async fn fail(&mut self, path: &str, status: usize, body: &str) {
        let mock = self
            .server
            .mock("GET", path)
            .match_query(Matcher::Any)
            .with_status(status)
            .with_body(body)
            .create_async()
            .await;
        self.mocks.push(mock);
    }

    pub fn url(&self) -> String {
        self.server.url()
    }

    /// `source` block pointing at this server, merged with `extra`
    pub fn source(&self, extra: Value) -> Value {
        let mut source = json!({ "url": self.url() });
        if let (Some(source), Value::Object(extra)) = (source.as_object_mut(), extra) {
            source.extend(extra);
        }
        source
    }
}
