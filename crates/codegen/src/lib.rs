//! Result type synthesis for GraphQL operations and fragments.
//!
//! Given a schema and a set of executable documents, [`synthesize`] walks every
//! fragment and operation selection set and produces a flat, ordered list of
//! named [`SynthesizedType`] declarations. Nested selections become their own
//! declarations and are referred to by name, fragment spreads become
//! intersections with the fragment's single declaration, and inline fragments
//! become unions of per-type-condition branches.
//!
//! Declarations are printed by a [`render::Renderer`]; TypeScript and Flow
//! are provided.
//!
//! ```
//! use graphql_codegen::{generate, parse_documents, parse_schema, OutputConfig, SourceFile};
//!
//! let schema = parse_schema(&[SourceFile::new(
//!     "schema.graphql",
//!     "type Query { user: User } type User { id: ID! name: String }",
//! )])
//! .unwrap();
//! let documents = parse_documents(&[SourceFile::new(
//!     "query.graphql",
//!     "query GetUser { user { id } }",
//! )])
//! .unwrap();
//! let output: OutputConfig =
//!     serde_json::from_str(r#"{ "plugins": ["typescript-operations"] }"#).unwrap();
//!
//! let text = generate(&schema, &documents, &output).unwrap();
//! assert!(text.contains("export type GetUserQuery = "));
//! ```

mod builder;
pub mod classify;
mod collect;
mod compose;
mod context;
pub mod declaration;
mod error;
pub mod fragments;
pub mod names;
pub mod options;
pub mod output;
pub mod render;
pub mod schema;
pub mod sources;

pub use builder::synthesize;
pub use declaration::{DeclarationKind, SynthesizedType, TypeExpr};
pub use error::{CodegenError, Result};
pub use options::{CodegenOptions, NamingConvention};
pub use output::{generate, render_output, OutputConfig, OutputPlan, Plugin};
pub use render::{Dialect, Renderer};
pub use sources::{parse_documents, parse_schema, SourceFile};
