//! # GraphQL Test Utilities
//!
//! Shared test infrastructure for the codegen crates.

// Test utilities are less strict than production code
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::needless_raw_string_hashes)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
//!
//! ## Quick Start
//!
//! ```ignore
//! use graphql_test_utils::{fixtures::BASIC_SCHEMA, parse_document, parse_schema};
//!
//! #[test]
//! fn test_user_query() {
//!     let schema = parse_schema(BASIC_SCHEMA);
//!     let document = parse_document("query GetUser { user(id: 1) { id } }");
//!     // ... run codegen and assert
//! }
//! ```
//!
//! ## Modules
//!
//! - [`fixtures`] - Common schema and document fixtures
//! - [`graphql`] - Panicking parse helpers for inline fixtures
//! - [`project`] - Temporary on-disk projects for config and CLI tests
//! - [`assertions`] - Formatting helpers for snapshot tests

pub mod assertions;
pub mod fixtures;
pub mod graphql;
pub mod project;

pub use graphql::{parse_document, parse_schema};
pub use project::{TestProject, TestProjectBuilder};

// Re-export insta for snapshot testing
pub use insta;
