//! Leaf/composite classification of field types.

use crate::options::CodegenOptions;
use crate::schema::{SchemaView, TypeKind};
use crate::Result;
use apollo_compiler::ast;

/// One layer of a GraphQL type reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wrapper {
    NonNull,
    List,
}

/// The wrapper chain of a type reference, outermost first.
///
/// `[Item!]!` is `[NonNull, List, NonNull]`; `[Item]` is `[List]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Wrapping(Vec<Wrapper>);

impl Wrapping {
    #[must_use]
    pub fn of(ty: &ast::Type) -> Self {
        let mut wrappers = Vec::new();
        let mut current = ty;
        loop {
            match current {
                ast::Type::Named(_) => break,
                ast::Type::NonNullNamed(_) => {
                    wrappers.push(Wrapper::NonNull);
                    break;
                }
                ast::Type::List(inner) => {
                    wrappers.push(Wrapper::List);
                    current = inner;
                }
                ast::Type::NonNullList(inner) => {
                    wrappers.push(Wrapper::NonNull);
                    wrappers.push(Wrapper::List);
                    current = inner;
                }
            }
        }
        Self(wrappers)
    }

    #[must_use]
    pub fn wrappers(&self) -> &[Wrapper] {
        &self.0
    }

    /// Whether the outermost layer is non-null
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.0.first() == Some(&Wrapper::NonNull)
    }

    #[must_use]
    pub fn is_list(&self) -> bool {
        self.0.contains(&Wrapper::List)
    }
}

/// Result of classifying a field's declared type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub is_leaf: bool,
    pub base_type: String,
    pub kind: TypeKind,
    pub wrapping: Wrapping,
}

impl Classification {
    #[must_use]
    pub fn is_list(&self) -> bool {
        self.wrapping.is_list()
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.wrapping.is_required()
    }
}

/// Classify a declared field type.
///
/// Scalars, enums and configured custom scalars are leaves; everything else
/// needs its own synthesized declaration.
pub fn classify(
    schema: &SchemaView<'_>,
    ty: &ast::Type,
    options: &CodegenOptions,
) -> Result<Classification> {
    let base_type = ty.inner_named_type().as_str();
    let kind = schema.kind(base_type)?;
    Ok(Classification {
        is_leaf: kind.is_leaf() || options.is_custom_scalar(base_type),
        base_type: base_type.to_string(),
        kind,
        wrapping: Wrapping::of(ty),
    })
}
