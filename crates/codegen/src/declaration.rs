//! The synthesized output model.
//!
//! Every declaration is named and flat: nested selections become their own
//! declarations and are referred to by name, so the declaration list forms a
//! DAG whose edges are name references.

use crate::classify::Wrapping;

/// Where a declaration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// Result type of an operation
    Operation,
    /// Variables type of an operation
    Variables,
    /// Standalone type of a fragment definition
    Fragment,
    /// Sub-selection of a link field
    Selection,
    /// Type-conditional branch of an inline fragment
    Branch,
}

/// One named, immutable unit of output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedType {
    pub name: String,
    pub kind: DeclarationKind,
    pub body: TypeExpr,
}

/// `alias: Parent['field']`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasedField {
    pub alias: String,
    pub field: String,
    pub required: bool,
}

/// A field pointing at one or more synthesized sub-declarations.
///
/// Several targets appear when the same response key is selected more than
/// once; they combine by intersection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkField {
    pub key: String,
    pub field: String,
    pub base_type: String,
    pub targets: Vec<String>,
    pub wrapping: Wrapping,
}

/// `__typename` (or an alias of it) mapped to string literal type names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypenameField {
    pub key: String,
    pub possible_types: Vec<String>,
    pub required: bool,
}

/// The named type of a variable before wrapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableType {
    /// Looked up in the scalars map
    Scalar(String),
    /// An enum or input object, referenced by its generated name
    Named(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableField {
    pub name: String,
    pub ty: VariableType,
    pub wrapping: Wrapping,
}

/// Structural body of a declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Typename(TypenameField),
    /// Projection of leaf fields from a schema type
    Pick { parent: String, fields: Vec<String> },
    /// Renamed leaf fields, typed by the original field on `parent`
    Aliased {
        parent: String,
        fields: Vec<AliasedField>,
    },
    Links(Vec<LinkField>),
    /// Named reference to another declaration
    Reference(String),
    Variables(Vec<VariableField>),
    Union(Vec<TypeExpr>),
    Intersection(Vec<TypeExpr>),
    /// Object type with no fields
    Empty,
}

impl TypeExpr {
    /// Intersection of `parts`, flattened.
    ///
    /// Returns `None` for no parts and the part itself for a single part.
    #[must_use]
    pub fn intersection(parts: Vec<TypeExpr>) -> Option<TypeExpr> {
        let mut flat = Vec::with_capacity(parts.len());
        for part in parts {
            match part {
                TypeExpr::Intersection(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => None,
            1 => flat.pop(),
            _ => Some(TypeExpr::Intersection(flat)),
        }
    }

    /// Union of `members`; a single member is returned as-is
    #[must_use]
    pub fn union(mut members: Vec<TypeExpr>) -> Option<TypeExpr> {
        match members.len() {
            0 => None,
            1 => members.pop(),
            _ => Some(TypeExpr::Union(members)),
        }
    }

    /// Names of declarations this expression refers to, in order
    #[must_use]
    pub fn references(&self) -> Vec<&str> {
        let mut refs = Vec::new();
        self.collect_references(&mut refs);
        refs
    }

    fn collect_references<'a>(&'a self, refs: &mut Vec<&'a str>) {
        match self {
            TypeExpr::Reference(name) => refs.push(name),
            TypeExpr::Links(links) => {
                refs.extend(links.iter().flat_map(|link| link.targets.iter().map(String::as_str)));
            }
            TypeExpr::Union(parts) | TypeExpr::Intersection(parts) => {
                for part in parts {
                    part.collect_references(refs);
                }
            }
            TypeExpr::Typename(_)
            | TypeExpr::Pick { .. }
            | TypeExpr::Aliased { .. }
            | TypeExpr::Variables(_)
            | TypeExpr::Empty => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(name: &str) -> TypeExpr {
        TypeExpr::Reference(name.to_string())
    }

    #[test]
    fn test_intersection_flattens_and_collapses() {
        assert_eq!(TypeExpr::intersection(vec![]), None);
        assert_eq!(
            TypeExpr::intersection(vec![reference("A")]),
            Some(reference("A"))
        );
        assert_eq!(
            TypeExpr::intersection(vec![
                reference("A"),
                TypeExpr::Intersection(vec![reference("B"), reference("C")]),
            ]),
            Some(TypeExpr::Intersection(vec![
                reference("A"),
                reference("B"),
                reference("C"),
            ]))
        );
    }

    #[test]
    fn test_references_walks_nested_parts() {
        let expr = TypeExpr::Intersection(vec![
            TypeExpr::Links(vec![LinkField {
                key: "user".to_string(),
                field: "user".to_string(),
                base_type: "User".to_string(),
                targets: vec!["Q_User".to_string()],
                wrapping: Wrapping::default(),
            }]),
            TypeExpr::Union(vec![reference("Q_Cat"), reference("Q_Dog")]),
        ]);
        assert_eq!(expr.references(), vec!["Q_User", "Q_Cat", "Q_Dog"]);
    }
}
