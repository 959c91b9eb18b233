use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Casing transform applied to every generated type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NamingConvention {
    /// `getUser_query` becomes `GetUser_Query`. Underscores are preserved as
    /// segment separators.
    #[default]
    PascalCase,
    /// Names are used exactly as written in the schema and documents.
    Keep,
}

/// Settings that shape synthesized declarations.
///
/// Deserialized from the `config` block of a codegen output entry:
/// ```yaml
/// config:
///   typesPrefix: Gql
///   skipTypename: true
///   scalars:
///     DateTime: string
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodegenOptions {
    pub naming_convention: NamingConvention,

    /// Prepended to every generated and schema type name
    pub types_prefix: String,

    /// Appended to fragment declaration names
    pub fragment_suffix: String,

    /// Drop the `Query`/`Mutation`/`Subscription` suffix from operation names
    pub omit_operation_suffix: bool,

    /// Disable implicit `__typename` injection
    pub skip_typename: bool,

    /// Implicitly injected `__typename` fields are required instead of optional
    pub non_optional_typename: bool,

    /// Emit read-only fields and arrays
    pub immutable_types: bool,

    /// Flow only: emit exact object types (`{| |}`)
    pub use_exact_objects: bool,

    /// Custom scalar name to target type expression. Names listed here are
    /// always treated as leaves.
    pub scalars: IndexMap<String, String>,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            naming_convention: NamingConvention::default(),
            types_prefix: String::new(),
            fragment_suffix: "Fragment".to_string(),
            omit_operation_suffix: false,
            skip_typename: false,
            non_optional_typename: false,
            immutable_types: false,
            use_exact_objects: true,
            scalars: IndexMap::new(),
        }
    }
}

impl CodegenOptions {
    /// Whether `__typename` is injected into every selection set
    #[must_use]
    pub const fn injects_typename(&self) -> bool {
        !self.skip_typename
    }

    /// Whether `name` is configured as a custom scalar
    #[must_use]
    pub fn is_custom_scalar(&self, name: &str) -> bool {
        self.scalars.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CodegenOptions::default();
        assert_eq!(options.fragment_suffix, "Fragment");
        assert!(options.injects_typename());
        assert!(options.use_exact_objects);
        assert_eq!(options.naming_convention, NamingConvention::PascalCase);
    }

    #[test]
    fn test_deserialize_partial_camel_case() {
        let json = serde_json::json!({
            "typesPrefix": "Gql",
            "skipTypename": true,
            "namingConvention": "keep",
            "scalars": { "DateTime": "string", "JSON": "unknown" }
        });

        let options: CodegenOptions = serde_json::from_value(json).unwrap();
        assert_eq!(options.types_prefix, "Gql");
        assert!(!options.injects_typename());
        assert_eq!(options.naming_convention, NamingConvention::Keep);
        assert_eq!(options.fragment_suffix, "Fragment");
        assert!(options.is_custom_scalar("DateTime"));
        assert_eq!(
            options.scalars.keys().collect::<Vec<_>>(),
            vec!["DateTime", "JSON"]
        );
    }
}
