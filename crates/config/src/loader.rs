//! Locating and reading config files.
//!
//! Loading fails early on anything that would stop `graphql codegen` later:
//! projects without schema sources, empty document globs, and an
//! `extensions.codegen` block without outputs or plugins.

use crate::{ConfigError, GraphQLConfig, ProjectConfig, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// File names checked in each directory, most preferred first
const CONFIG_FILE_NAMES: [&str; 7] = [
    ".graphqlrc.yml",
    ".graphqlrc.yaml",
    ".graphqlrc.json",
    ".graphqlrc",
    "graphql.config.yml",
    "graphql.config.yaml",
    "graphql.config.json",
];

/// Syntax of a config file, decided by its name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Json,
    /// Bare `.graphqlrc`: YAML, falling back to JSON
    Untyped,
}

impl Format {
    fn of(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yml" | "yaml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            None if path.file_name().is_some_and(|name| name == ".graphqlrc") => {
                Ok(Self::Untyped)
            }
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    fn parse(self, contents: &str, path: &Path) -> Result<GraphQLConfig> {
        let invalid = |message: String| ConfigError::Invalid {
            path: path.to_path_buf(),
            message,
        };
        let yaml = || -> Result<GraphQLConfig> {
            serde_saphyr::from_str(contents).map_err(|e| invalid(format!("YAML parse error: {e}")))
        };
        let json = || -> Result<GraphQLConfig> {
            serde_json::from_str(contents).map_err(|e| invalid(format!("JSON parse error: {e}")))
        };

        match self {
            Self::Yaml => yaml(),
            Self::Json => json(),
            Self::Untyped => yaml().or_else(|_| json()),
        }
    }
}

/// Walk up from `start_dir` to the first directory holding a config file.
#[tracing::instrument(fields(start = %start_dir.display()))]
#[must_use]
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let found = start_dir.ancestors().find_map(|dir| {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    });
    match &found {
        Some(path) => tracing::debug!(path = %path.display(), "Found config file"),
        None => tracing::debug!("No config file found"),
    }
    found
}

/// Read and validate the config at `path`.
///
/// Relative schema and document paths resolve against the directory holding
/// the file.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<GraphQLConfig> {
    let contents = fs::read_to_string(path)?;
    load_config_from_str(&contents, path)
}

/// Parse and validate config text; `path` picks the format and labels errors.
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<GraphQLConfig> {
    let config = Format::of(path)?.parse(contents, path)?;
    for (name, project) in config.projects() {
        validate_project(name, project, path)?;
    }
    tracing::debug!(projects = config.project_count(), "Config loaded");
    Ok(config)
}

fn validate_project(name: &str, project: &ProjectConfig, path: &Path) -> Result<()> {
    let invalid = |message: String| ConfigError::Invalid {
        path: path.to_path_buf(),
        message,
    };

    // Remote schemas are rejected by the command, which knows the project name
    if !project.schema.is_introspection() {
        let schema_paths = project.schema.paths();
        if schema_paths.is_empty() || schema_paths.iter().any(|p| p.trim().is_empty()) {
            return Err(invalid(format!("Project '{name}' has an empty schema path")));
        }
    }

    if let Some(documents) = &project.documents {
        let patterns = documents.patterns();
        if patterns.is_empty() || patterns.iter().any(|p| p.trim().is_empty()) {
            return Err(invalid(format!(
                "Project '{name}' has an empty documents pattern"
            )));
        }
    }

    if let Some(codegen) = project.codegen() {
        validate_codegen(codegen).map_err(|message| ConfigError::InvalidCodegen {
            path: path.to_path_buf(),
            project: name.to_string(),
            message,
        })?;
    }
    Ok(())
}

/// Structural checks on `extensions.codegen`.
///
/// Plugin names and output options are checked when the command deserializes
/// the block.
fn validate_codegen(codegen: &Value) -> std::result::Result<(), String> {
    let Value::Object(codegen) = codegen else {
        return Err("'extensions.codegen' must be a mapping".to_string());
    };
    let generates = match codegen.get("generates") {
        Some(Value::Object(generates)) => generates,
        Some(_) => return Err("'generates' must map output paths to plugins".to_string()),
        None => return Err("'generates' is required".to_string()),
    };
    if generates.is_empty() {
        return Err("'generates' must list at least one output file".to_string());
    }

    for (output, entry) in generates {
        if output.trim().is_empty() {
            return Err("output paths in 'generates' must not be empty".to_string());
        }
        match entry.get("plugins") {
            Some(Value::Array(plugins)) if !plugins.is_empty() => {}
            Some(Value::Array(_)) | None => {
                return Err(format!("output '{output}' must list at least one plugin"));
            }
            Some(_) => return Err(format!("'plugins' of output '{output}' must be a list")),
        }
    }
    Ok(())
}
