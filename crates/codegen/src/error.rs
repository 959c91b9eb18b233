use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that abort a synthesis run.
///
/// Every variant is fatal: a run either produces the complete declaration set
/// or fails as a unit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    #[error("Cannot query field \"{field}\" on type \"{type_name}\"")]
    UnknownField { type_name: String, field: String },

    #[error("Unknown type \"{0}\"")]
    UnknownType(String),

    #[error("Unknown fragment \"{0}\"")]
    UnresolvedFragment(String),

    #[error("Cannot spread fragments within themselves: {}", .0.join(" -> "))]
    FragmentCycle(Vec<String>),

    #[error("Schema does not define a {0} root type")]
    MissingRootType(&'static str),

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Invalid output configuration: {0}")]
    InvalidOutput(String),
}
