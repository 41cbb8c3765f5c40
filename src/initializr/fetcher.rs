//! HTTP transport used to talk to an Initializr instance

use std::time::Duration;

#[cfg(test)]
use mockall::automock;

use reqwest::{Certificate, Client, NoProxy, Proxy, Url};
use tracing::{debug, warn};

use crate::config::{FETCH_TIMEOUT_MS, Source, USER_AGENT};
use crate::error::ResourceError;

/// Trait for issuing a single GET and returning the body of a 200 response
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait HttpFetcher: Send + Sync {
    /// Fetch `url` with the given `Accept` header
    ///
    /// # Returns
    /// * `Ok(Vec<u8>)` - Response body of a `200 OK`
    /// * `Err(ResourceError::Upstream)` - Any other status, with the body for diagnostics
    /// * `Err(ResourceError::Transport)` - If the server could not be reached
    async fn fetch(&self, url: &Url, accept: &str) -> Result<Vec<u8>, ResourceError>;
}

/// TLS and proxy settings for the HTTP client
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransportConfig {
    pub skip_tls_validation: bool,
    pub ca_certs: Vec<String>,
    pub http_proxy: Option<String>,
    pub https_proxy: Option<String>,
    pub no_proxy: Option<String>,
}

impl From<&Source> for TransportConfig {
    fn from(source: &Source) -> Self {
        Self {
            skip_tls_validation: source.skip_tls_validation,
            ca_certs: source.ca_certs.clone(),
            http_proxy: source.http_proxy.clone(),
            https_proxy: source.https_proxy.clone(),
            no_proxy: source.no_proxy.clone(),
        }
    }
}

/// Proxy settings in effect once source values are merged with the environment
#[derive(Debug, Clone, Default, PartialEq)]
struct ProxySettings {
    http: Option<String>,
    https: Option<String>,
    no_proxy: Option<String>,
}

impl ProxySettings {
    /// Each source value wins over its environment variable, upper case
    /// names are looked up before lower case ones. Blank values count as unset.
    fn resolve(config: &TransportConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |names: [&str; 2]| {
            names
                .into_iter()
                .find_map(|name| env(name).filter(|value| !value.trim().is_empty()))
        };

        Self {
            http: config
                .http_proxy
                .clone()
                .or_else(|| lookup(["HTTP_PROXY", "http_proxy"])),
            https: config
                .https_proxy
                .clone()
                .or_else(|| lookup(["HTTPS_PROXY", "https_proxy"])),
            no_proxy: config
                .no_proxy
                .clone()
                .or_else(|| lookup(["NO_PROXY", "no_proxy"])),
        }
    }
}

/// [`HttpFetcher`] backed by a `reqwest` client
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    /// Build a client from `config`, falling back to the proxy variables of
    /// the process environment for settings the source leaves out.
    pub fn new(config: TransportConfig) -> Result<Self, ResourceError> {
        Self::with_env(config, |name| std::env::var(name).ok())
    }

    fn with_env(
        config: TransportConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ResourceError> {
        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_millis(FETCH_TIMEOUT_MS));

        if config.skip_tls_validation {
            warn!("TLS certificate validation is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        for (index, pem) in config.ca_certs.iter().enumerate() {
            if !pem.contains("-----BEGIN CERTIFICATE-----") {
                return Err(ResourceError::Config(format!(
                    "ca_certs[{index}]: not a PEM encoded certificate"
                )));
            }
            let cert = Certificate::from_pem(pem.as_bytes())
                .map_err(|e| ResourceError::Config(format!("ca_certs[{index}]: {e}")))?;
            builder = builder.add_root_certificate(cert);
        }

        // Only the resolved settings below may route requests through a proxy
        builder = builder.no_proxy();

        let proxies = ProxySettings::resolve(&config, env);
        let no_proxy = proxies.no_proxy.as_deref().and_then(NoProxy::from_string);

        if let Some(http_proxy) = &proxies.http {
            debug!("Using proxy {} for http requests", http_proxy);
            let proxy = Proxy::http(http_proxy)
                .map_err(|e| ResourceError::Config(format!("http_proxy: {e}")))?;
            builder = builder.proxy(proxy.no_proxy(no_proxy.clone()));
        }

        if let Some(https_proxy) = &proxies.https {
            debug!("Using proxy {} for https requests", https_proxy);
            let proxy = Proxy::https(https_proxy)
                .map_err(|e| ResourceError::Config(format!("https_proxy: {e}")))?;
            builder = builder.proxy(proxy.no_proxy(no_proxy));
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait::async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn fetch(&self, url: &Url, accept: &str) -> Result<Vec<u8>, ResourceError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, accept)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if status != reqwest::StatusCode::OK {
            warn!("Initializr returned status {}: {}", status, url);
            return Err(ResourceError::Upstream {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(body.to_vec())
    }
}
