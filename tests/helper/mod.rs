//! Shared test utilities

#![allow(dead_code)]

pub mod initializr;

pub use initializr::*;
