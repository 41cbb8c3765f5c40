//! Version identifiers and new-version selection
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │  Catalogue  │────▶│  Identifier  │────▶│  Selector   │
//! │ (id, name)  │     │   (parse)    │     │ (filter,    │
//! └─────────────┘     └──────────────┘     │  sort, cut) │
//!                                          └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`identifier`]: Parsing `2.0.2.RELEASE`-style identifiers into an ordered triple
//! - [`selector`]: Filtering by release type and pattern, newest-first ordering, checkpoint cut-off
//! - [`types`]: The catalogue `Version` entry

pub mod identifier;
pub mod selector;
pub mod types;
