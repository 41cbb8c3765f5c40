//! Concourse resource tracking the Spring Boot versions offered by a Spring
//! Initializr instance.

pub mod config;
pub mod error;
pub mod initializr;
pub mod logging;
pub mod resource;
pub mod version;
