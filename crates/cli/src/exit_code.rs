//! Exit codes for the GraphQL CLI.
//!
//! Distinct codes let scripts and CI systems tell a broken config apart from
//! a broken schema or an operation that does not type-check.

use graphql_codegen::CodegenError;

/// Exit codes used by the CLI.
///
/// These follow standard Unix conventions where 0 indicates success
/// and non-zero values indicate different types of failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - every output generated (or up to date with `--check`)
    Success = 0,
    /// Synthesis failed, or `--check` found stale outputs
    GenerationError = 1,
    /// Configuration error (missing or invalid config file, unknown project)
    ConfigError = 2,
    /// Schema load error (no schema files, invalid SDL)
    SchemaError = 3,
    /// I/O error (file read/write failure, failed hook)
    IoError = 4,
    /// Parse error (invalid GraphQL syntax in a document)
    ParseError = 5,
}

impl ExitCode {
    /// Exit the process with this exit code.
    pub fn exit(self) -> ! {
        std::process::exit(self.code())
    }

    /// Get the numeric value of this exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Pick the exit code for a failed command from the first error in its
    /// chain that we know how to classify.
    #[must_use]
    pub fn for_error(error: &anyhow::Error) -> Self {
        for cause in error.chain() {
            if let Some(codegen) = cause.downcast_ref::<CodegenError>() {
                return Self::for_codegen_error(codegen);
            }
            if cause.is::<graphql_config::ConfigError>() {
                return Self::ConfigError;
            }
            if cause.is::<std::io::Error>() {
                return Self::IoError;
            }
        }
        Self::GenerationError
    }

    const fn for_codegen_error(error: &CodegenError) -> Self {
        match error {
            CodegenError::Parse { .. } => Self::ParseError,
            CodegenError::InvalidSchema(_) | CodegenError::MissingRootType(_) => Self::SchemaError,
            CodegenError::InvalidOutput(_) => Self::ConfigError,
            CodegenError::UnknownField { .. }
            | CodegenError::UnknownType(_)
            | CodegenError::UnresolvedFragment(_)
            | CodegenError::FragmentCycle(_) => Self::GenerationError,
        }
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::GenerationError => write!(f, "generation error"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::SchemaError => write!(f, "schema load error"),
            Self::IoError => write!(f, "I/O error"),
            Self::ParseError => write!(f, "parse error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use std::path::PathBuf;

    #[test]
    fn test_codes_are_distinct() {
        let codes = [
            ExitCode::Success,
            ExitCode::GenerationError,
            ExitCode::ConfigError,
            ExitCode::SchemaError,
            ExitCode::IoError,
            ExitCode::ParseError,
        ]
        .map(ExitCode::code);
        assert_eq!(codes, [0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_codegen_errors_through_context() {
        let error = Err::<(), _>(CodegenError::Parse {
            path: "query.graphql".to_string(),
            message: "syntax error".to_string(),
        })
        .context("Failed to generate src/types.ts")
        .unwrap_err();
        assert_eq!(ExitCode::for_error(&error), ExitCode::ParseError);

        let error = anyhow::Error::new(CodegenError::InvalidSchema("empty".to_string()));
        assert_eq!(ExitCode::for_error(&error), ExitCode::SchemaError);

        let error = anyhow::Error::new(CodegenError::UnknownType("Nope".to_string()));
        assert_eq!(ExitCode::for_error(&error), ExitCode::GenerationError);
    }

    #[test]
    fn test_config_and_io_errors() {
        let error = anyhow::Error::new(graphql_config::ConfigError::NotFound(PathBuf::from(".")));
        assert_eq!(ExitCode::for_error(&error), ExitCode::ConfigError);

        let error = Err::<(), _>(std::io::Error::other("disk full"))
            .context("Failed to write src/types.ts")
            .unwrap_err();
        assert_eq!(ExitCode::for_error(&error), ExitCode::IoError);
    }

    #[test]
    fn test_unclassified_error_is_generation_error() {
        let error = anyhow::anyhow!("hook failed");
        assert_eq!(ExitCode::for_error(&error), ExitCode::GenerationError);
        assert_eq!(ExitCode::GenerationError.to_string(), "generation error");
    }
}
