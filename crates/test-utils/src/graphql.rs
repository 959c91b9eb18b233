//! Parse helpers that panic with the compiler's diagnostics on failure.

use apollo_compiler::ast::Document;
use apollo_compiler::Schema;

/// Parse and validate a schema fixture.
pub fn parse_schema(sdl: &str) -> Schema {
    match Schema::parse_and_validate(sdl, "schema.graphql") {
        Ok(schema) => schema.into_inner(),
        Err(with_errors) => panic!("invalid schema fixture:\n{}", with_errors.errors),
    }
}

/// Parse an executable document fixture without validating it.
pub fn parse_document(source: &str) -> Document {
    parse_document_at(source, "query.graphql")
}

/// Parse an executable document fixture under a given file name.
pub fn parse_document_at(source: &str, path: &str) -> Document {
    match Document::parse(source, path) {
        Ok(document) => document,
        Err(with_errors) => panic!("invalid document fixture {path}:\n{}", with_errors.errors),
    }
}
