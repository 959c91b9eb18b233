//! `.graphqlrc` discovery and parsing.
//!
//! Supports the graphql-config file layout: a single project or a `projects`
//! map, schema paths or globs, document globs and tool `extensions`.

mod config;
mod error;
mod loader;

pub use config::{
    expand_braces, DocumentsConfig, GraphQLConfig, IntrospectionSchemaConfig, ProjectConfig,
    SchemaConfig, DEFAULT_PROJECT,
};
pub use error::{ConfigError, Result};
pub use loader::{find_config, load_config, load_config_from_str};
