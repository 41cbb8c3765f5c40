//! Project generation options understood by Initializr

use std::collections::BTreeMap;

use serde::Deserialize;

/// Kind of artifact to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    /// Zipped Maven project
    #[default]
    MavenProject,
    /// Zipped Gradle project
    GradleProject,
    /// Maven `pom.xml` only
    MavenBuild,
    /// Gradle `build.gradle` only
    GradleBuild,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::MavenProject => "maven-project",
            ProjectType::GradleProject => "gradle-project",
            ProjectType::MavenBuild => "maven-build",
            ProjectType::GradleBuild => "gradle-build",
        }
    }

    /// Endpoint serving this type, which is also the downloaded file name
    pub fn endpoint(&self) -> &'static str {
        match self {
            ProjectType::MavenProject | ProjectType::GradleProject => "starter.zip",
            ProjectType::MavenBuild => "pom.xml",
            ProjectType::GradleBuild => "build.gradle",
        }
    }
}

/// `params` of a get step. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    /// Comma separated dependency ids, e.g. `web,actuator`
    pub dependencies: Option<String>,
    pub packaging: Option<String>,
    pub jdk_version: Option<String>,
    pub language: Option<String>,
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    /// Version of the generated project, not the Spring Boot version
    pub version: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub package_name: Option<String>,
}

impl Params {
    /// Query parameters for generating a project against `boot_version`.
    ///
    /// Blank values are left out. Keys are sorted so the resulting URL is stable.
    pub fn query(&self, boot_version: &str) -> BTreeMap<&'static str, String> {
        let optional = [
            ("artifactId", &self.artifact_id),
            ("dependencies", &self.dependencies),
            ("description", &self.description),
            ("groupId", &self.group_id),
            ("javaVersion", &self.jdk_version),
            ("language", &self.language),
            ("name", &self.name),
            ("packageName", &self.package_name),
            ("packaging", &self.packaging),
            ("version", &self.version),
        ];

        let mut query: BTreeMap<&'static str, String> = optional
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .as_deref()
                    .filter(|v| !v.trim().is_empty())
                    .map(|v| (key, v.to_string()))
            })
            .collect();

        query.insert("type", self.project_type.as_str().to_string());
        if !boot_version.trim().is_empty() {
            query.insert("bootVersion", boot_version.to_string());
        }

        query
    }
}
