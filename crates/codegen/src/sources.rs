//! Schema and document loading from source text.

use crate::{CodegenError, Result};
use apollo_compiler::ast;
use apollo_compiler::parser::Parser;
use apollo_compiler::schema::SchemaBuilder;
use apollo_compiler::Schema;

/// One GraphQL source file: its path (for diagnostics) and its text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: String,
    pub text: String,
}

impl SourceFile {
    #[must_use]
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

/// Merge all schema files into a single `Schema`.
///
/// Build errors (syntax errors, conflicting definitions) fail the load.
/// Validation errors are logged and the partially valid schema is kept, so a
/// schema with minor issues can still be used for generation.
#[tracing::instrument(skip_all, fields(files = sources.len()))]
pub fn parse_schema(sources: &[SourceFile]) -> Result<Schema> {
    if sources.is_empty() {
        return Err(CodegenError::InvalidSchema(
            "no schema files were provided".to_string(),
        ));
    }

    let mut builder = SchemaBuilder::new();
    let mut parser = Parser::new();
    for source in sources {
        tracing::debug!(path = %source.path, "Adding schema file to merge");
        parser.parse_into_schema_builder(&source.text, &source.path, &mut builder);
    }

    let schema = builder
        .build()
        .map_err(|with_errors| CodegenError::InvalidSchema(with_errors.errors.to_string()))?;

    match schema.validate() {
        Ok(valid) => {
            tracing::debug!(type_count = valid.types.len(), "Merged and validated schema");
            Ok(valid.into_inner())
        }
        Err(with_errors) => {
            tracing::warn!(
                error_count = with_errors.errors.len(),
                "Schema validation errors found (schema still usable for generation)"
            );
            Ok(with_errors.partial)
        }
    }
}

/// Parse every document file separately, in the order given
#[tracing::instrument(skip_all, fields(files = sources.len()))]
pub fn parse_documents(sources: &[SourceFile]) -> Result<Vec<ast::Document>> {
    sources
        .iter()
        .map(|source| {
            ast::Document::parse(source.text.as_str(), source.path.as_str()).map_err(
                |with_errors| CodegenError::Parse {
                    path: source.path.clone(),
                    message: with_errors.errors.to_string(),
                },
            )
        })
        .collect()
}
