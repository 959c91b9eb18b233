//! Schema lookup used by the synthesis traversal.
//!
//! Wraps an `apollo_compiler::Schema` and answers the three questions the
//! collector asks: what kind of type is this, which definition does this field
//! resolve to, and which type roots an operation.

use crate::{CodegenError, Result};
use apollo_compiler::ast::{self, OperationType};
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::Schema;
use std::borrow::Cow;

/// Coarse classification of a named schema type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Scalar,
    Enum,
    Object,
    Interface,
    Union,
    InputObject,
}

impl TypeKind {
    /// Interfaces and unions stand for a set of possible object types
    #[must_use]
    pub const fn is_abstract(self) -> bool {
        matches!(self, Self::Interface | Self::Union)
    }

    #[must_use]
    pub const fn is_leaf(self) -> bool {
        matches!(self, Self::Scalar | Self::Enum)
    }
}

impl From<&ExtendedType> for TypeKind {
    fn from(ty: &ExtendedType) -> Self {
        match ty {
            ExtendedType::Scalar(_) => Self::Scalar,
            ExtendedType::Enum(_) => Self::Enum,
            ExtendedType::Object(_) => Self::Object,
            ExtendedType::Interface(_) => Self::Interface,
            ExtendedType::Union(_) => Self::Union,
            ExtendedType::InputObject(_) => Self::InputObject,
        }
    }
}

/// A resolved field definition: the field's name and its declared type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef<'a> {
    pub name: &'a str,
    pub ty: Cow<'a, ast::Type>,
}

/// Read-only lookup over a parsed schema
#[derive(Debug, Clone, Copy)]
pub struct SchemaView<'a> {
    schema: &'a Schema,
}

impl<'a> SchemaView<'a> {
    #[must_use]
    pub const fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    #[must_use]
    pub const fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub fn get_type(&self, name: &str) -> Result<&'a ExtendedType> {
        self.schema
            .types
            .get(name)
            .ok_or_else(|| CodegenError::UnknownType(name.to_string()))
    }

    pub fn kind(&self, name: &str) -> Result<TypeKind> {
        self.get_type(name).map(TypeKind::from)
    }

    /// Resolve `field_name` on `type_name`.
    ///
    /// The query root additionally exposes the `__schema` and `__type`
    /// introspection meta-fields.
    pub fn field_def(&self, type_name: &str, field_name: &str) -> Result<FieldDef<'a>> {
        let fields = match self.get_type(type_name)? {
            ExtendedType::Object(object) => &object.fields,
            ExtendedType::Interface(interface) => &interface.fields,
            _ => return Err(unknown_field(type_name, field_name)),
        };

        if let Some((name, field)) = fields.get_key_value(field_name) {
            return Ok(FieldDef {
                name: name.as_str(),
                ty: Cow::Borrowed(&field.ty),
            });
        }

        if self.is_query_root(type_name) {
            if let Some(meta) = meta_field(field_name) {
                return Ok(meta);
            }
        }

        Err(unknown_field(type_name, field_name))
    }

    /// The root type name for an operation type
    pub fn root_type(&self, operation_type: OperationType) -> Result<&'a str> {
        self.schema
            .root_operation(operation_type)
            .map(|name| name.as_str())
            .ok_or(CodegenError::MissingRootType(operation_type_name(
                operation_type,
            )))
    }

    /// Object types a value of `name` may have at runtime, in schema order.
    ///
    /// For an object type this is the type itself.
    #[must_use]
    pub fn possible_types(&self, name: &str) -> Vec<&'a str> {
        match self.schema.types.get(name) {
            Some(ExtendedType::Object(object)) => vec![object.name.as_str()],
            Some(ExtendedType::Union(union_type)) => union_type
                .members
                .iter()
                .map(|member| member.name.as_str())
                .collect(),
            Some(ExtendedType::Interface(_)) => self
                .schema
                .types
                .values()
                .filter_map(|ty| match ty {
                    ExtendedType::Object(object)
                        if object
                            .implements_interfaces
                            .iter()
                            .any(|implemented| implemented.name.as_str() == name) =>
                    {
                        Some(object.name.as_str())
                    }
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    fn is_query_root(&self, type_name: &str) -> bool {
        self.schema.root_operation(OperationType::Query).map(|name| name.as_str())
            == Some(type_name)
    }
}

#[must_use]
pub const fn operation_type_name(operation_type: OperationType) -> &'static str {
    match operation_type {
        OperationType::Query => "Query",
        OperationType::Mutation => "Mutation",
        OperationType::Subscription => "Subscription",
    }
}

fn meta_field(field_name: &str) -> Option<FieldDef<'static>> {
    let (name, ty) = match field_name {
        "__schema" => (
            "__schema",
            ast::Type::NonNullNamed(apollo_compiler::name!("__Schema")),
        ),
        "__type" => ("__type", ast::Type::Named(apollo_compiler::name!("__Type"))),
        _ => return None,
    };
    Some(FieldDef {
        name,
        ty: Cow::Owned(ty),
    })
}

fn unknown_field(type_name: &str, field_name: &str) -> CodegenError {
    CodegenError::UnknownField {
        type_name: type_name.to_string(),
        field: field_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SDL: &str = r#"
type Query { node(id: ID!): Node search: [SearchResult!]! }
interface Node { id: ID! }
type User implements Node { id: ID! name: String }
type Post implements Node { id: ID! title: String! }
type Tag { label: String! }
union SearchResult = Post | Tag
"#;

    fn schema() -> Schema {
        Schema::parse_and_validate(SDL, "schema.graphql")
            .unwrap()
            .into_inner()
    }

    #[test]
    fn test_field_def_on_object_and_interface() {
        let schema = schema();
        let view = SchemaView::new(&schema);
        assert_eq!(view.field_def("User", "name").unwrap().ty.to_string(), "String");
        assert_eq!(view.field_def("Node", "id").unwrap().ty.to_string(), "ID!");
    }

    #[test]
    fn test_unknown_field() {
        let schema = schema();
        let view = SchemaView::new(&schema);
        assert_eq!(
            view.field_def("User", "email"),
            Err(CodegenError::UnknownField {
                type_name: "User".to_string(),
                field: "email".to_string(),
            })
        );
    }

    #[test]
    fn test_meta_fields_only_on_query_root() {
        let schema = schema();
        let view = SchemaView::new(&schema);
        assert_eq!(
            view.field_def("Query", "__schema").unwrap().ty.to_string(),
            "__Schema!"
        );
        assert_eq!(view.field_def("Query", "__type").unwrap().ty.to_string(), "__Type");
        assert!(view.field_def("User", "__schema").is_err());
    }

    #[test]
    fn test_possible_types() {
        let schema = schema();
        let view = SchemaView::new(&schema);
        assert_eq!(view.possible_types("Node"), vec!["User", "Post"]);
        assert_eq!(view.possible_types("SearchResult"), vec!["Post", "Tag"]);
        assert_eq!(view.possible_types("Tag"), vec!["Tag"]);
        assert!(view.possible_types("String").is_empty());
    }

    #[test]
    fn test_root_types() {
        let schema = schema();
        let view = SchemaView::new(&schema);
        assert_eq!(view.root_type(OperationType::Query), Ok("Query"));
        assert_eq!(
            view.root_type(OperationType::Mutation),
            Err(CodegenError::MissingRootType("Mutation"))
        );
    }
}
