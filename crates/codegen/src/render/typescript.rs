use super::{Dialect, Renderer};
use crate::options::CodegenOptions;

/// `Pick<>`, `Maybe<>`, optional (`?`) and `readonly` members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypeScriptRenderer {
    immutable: bool,
}

impl TypeScriptRenderer {
    #[must_use]
    pub const fn new(options: &CodegenOptions) -> Self {
        Self {
            immutable: options.immutable_types,
        }
    }
}

impl Renderer for TypeScriptRenderer {
    fn dialect(&self) -> Dialect {
        Dialect::TypeScript
    }

    fn object_delimiters(&self) -> (&'static str, &'static str) {
        ("{", "}")
    }

    fn block_terminator(&self) -> &'static str {
        ";"
    }

    fn field(&self, key: &str, value: &str, optional: bool) -> String {
        let readonly = if self.immutable { "readonly " } else { "" };
        let optional = if optional { "?" } else { "" };
        format!("{readonly}{key}{optional}: {value}")
    }

    fn pick(&self, parent: &str, fields: &[String]) -> String {
        let keys: Vec<String> = fields.iter().map(|field| self.string_literal(field)).collect();
        format!("Pick<{parent}, {}>", self.union(&keys))
    }

    fn field_type_of(&self, parent: &str, field: &str) -> String {
        format!("{parent}['{field}']")
    }

    fn maybe(&self, inner: &str) -> String {
        format!("Maybe<{inner}>")
    }

    fn list(&self, inner: &str) -> String {
        if self.immutable {
            format!("ReadonlyArray<{inner}>")
        } else {
            format!("Array<{inner}>")
        }
    }

    fn scalar_ref(&self, scalar: &str) -> String {
        format!("Scalars['{scalar}']")
    }

    fn maybe_declaration(&self) -> String {
        "export type Maybe<T> = T | null;".to_string()
    }

    fn empty_variables(&self) -> String {
        "{ [key: string]: never }".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immutable_fields_and_lists() {
        let renderer = TypeScriptRenderer::new(&CodegenOptions {
            immutable_types: true,
            ..CodegenOptions::default()
        });
        assert_eq!(renderer.field("id", "string", false), "readonly id: string");
        assert_eq!(renderer.field("name", "string", true), "readonly name?: string");
        assert_eq!(renderer.list("X"), "ReadonlyArray<X>");
    }

    #[test]
    fn test_block_uses_semicolons() {
        let renderer = TypeScriptRenderer::default();
        assert_eq!(
            renderer.block(&["id: string".to_string(), "name?: Maybe<string>".to_string()]),
            "{\n  id: string;\n  name?: Maybe<string>;\n}"
        );
        assert_eq!(renderer.block(&[]), "{}");
    }
}
