//! Access to a Spring Initializr instance
//!
//! # Modules
//!
//! - [`fetcher`]: HTTP transport trait and its `reqwest` implementation
//! - [`client`]: Catalogue, artifact and dependency endpoints
//! - [`project`]: Project generation options (`params` of a get step)

pub mod client;
pub mod fetcher;
pub mod project;

pub use client::{ACCEPT_HEADER, InitializrClient};
pub use fetcher::{HttpFetcher, ReqwestFetcher, TransportConfig};
pub use project::{Params, ProjectType};
