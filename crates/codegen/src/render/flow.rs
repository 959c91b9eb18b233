use super::{Dialect, Renderer};
use crate::options::CodegenOptions;

/// Projection helper used by `$Pick<Type, { field: * }>`
const PICK_HELPER: &str =
    "type $Pick<Origin: Object, Keys: Object> = $ObjMapi<Keys, <Key>(k: Key) => $ElementType<Origin, Key>>;";

/// Exact objects (`{| |}`), covariant (`+`) members, `$Pick<>` and `?T`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowRenderer {
    immutable: bool,
    exact: bool,
}

impl FlowRenderer {
    #[must_use]
    pub const fn new(options: &CodegenOptions) -> Self {
        Self {
            immutable: options.immutable_types,
            exact: options.use_exact_objects,
        }
    }
}

impl Renderer for FlowRenderer {
    fn dialect(&self) -> Dialect {
        Dialect::Flow
    }

    fn header(&self) -> Option<&'static str> {
        Some("// @flow")
    }

    fn object_delimiters(&self) -> (&'static str, &'static str) {
        if self.exact {
            ("{|", "|}")
        } else {
            ("{", "}")
        }
    }

    fn block_terminator(&self) -> &'static str {
        ","
    }

    fn field(&self, key: &str, value: &str, optional: bool) -> String {
        let variance = if self.immutable { "+" } else { "" };
        let optional = if optional { "?" } else { "" };
        format!("{variance}{key}{optional}: {value}")
    }

    fn pick(&self, parent: &str, fields: &[String]) -> String {
        let keys: Vec<String> = fields.iter().map(|field| format!("{field}: *")).collect();
        format!("$Pick<{parent}, {{ {} }}>", keys.join(", "))
    }

    fn field_type_of(&self, parent: &str, field: &str) -> String {
        format!("$ElementType<{parent}, '{field}'>")
    }

    fn maybe(&self, inner: &str) -> String {
        if inner.contains(" & ") || inner.contains(" | ") {
            format!("?({inner})")
        } else {
            format!("?{inner}")
        }
    }

    fn list(&self, inner: &str) -> String {
        if self.immutable {
            format!("$ReadOnlyArray<{inner}>")
        } else {
            format!("Array<{inner}>")
        }
    }

    fn scalar_ref(&self, scalar: &str) -> String {
        format!("$ElementType<Scalars, '{scalar}'>")
    }

    fn maybe_declaration(&self) -> String {
        "export type Maybe<T> = ?T;".to_string()
    }

    fn operations_preamble(&self) -> Option<&'static str> {
        Some(PICK_HELPER)
    }

    /// Exact objects with different keys have no common value, so parts are
    /// spread into one object instead of intersected.
    fn intersection(&self, parts: &[String]) -> String {
        match parts {
            [single] => single.clone(),
            _ => {
                let spreads: Vec<String> = parts.iter().map(|part| format!("...{part}")).collect();
                format!("{{ {} }}", spreads.join(", "))
            }
        }
    }
}
