use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config in {path}: {message}")]
    Invalid { path: PathBuf, message: String },

    #[error("Invalid codegen config for project '{project}' in {path}: {message}")]
    InvalidCodegen {
        path: PathBuf,
        project: String,
        message: String,
    },

    #[error("Unsupported config file format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("No GraphQL config file found in {0} or any parent directory")]
    NotFound(PathBuf),

    #[error(
        "Project '{name}' not found (available: {available}){}",
        did_you_mean(.suggestion.as_deref())
    )]
    UnknownProject {
        name: String,
        available: String,
        suggestion: Option<String>,
    },
}

fn did_you_mean(suggestion: Option<&str>) -> String {
    suggestion.map_or_else(String::new, |s| format!(". Did you mean '{s}'?"))
}
