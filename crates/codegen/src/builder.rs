//! Declaration set construction over a whole document set.

use crate::classify::Wrapping;
use crate::collect::{synthesize_body, synthesize_selection_set};
use crate::context::SynthesisContext;
use crate::declaration::{
    DeclarationKind, SynthesizedType, TypeExpr, VariableField, VariableType,
};
use crate::fragments::FragmentRegistry;
use crate::names::{NameAllocator, NamingPolicy, RESERVED_HELPER_NAMES};
use crate::options::CodegenOptions;
use crate::schema::{SchemaView, TypeKind};
use crate::Result;
use apollo_compiler::ast;
use apollo_compiler::Schema;

/// Synthesize result types for every fragment and operation in `documents`.
///
/// Fragments come first, each after the fragments it spreads; operations
/// follow in document order, each preceded by its nested declarations and
/// followed by its variables type. Any error aborts the whole run.
#[tracing::instrument(skip_all, fields(documents = documents.len()))]
pub fn synthesize(
    schema: &Schema,
    documents: &[ast::Document],
    options: &CodegenOptions,
) -> Result<Vec<SynthesizedType>> {
    let view = SchemaView::new(schema);
    let policy = NamingPolicy::from_options(options);

    // Generated names must never shadow the schema types they pick from.
    let reserved: Vec<String> = schema
        .types
        .keys()
        .filter(|name| !is_built_in(name))
        .map(|name| policy.type_ref(name))
        .collect();
    let mut names = NameAllocator::new(policy);
    names.reserve(RESERVED_HELPER_NAMES.iter().copied());
    names.reserve(reserved);

    let mut fragments = FragmentRegistry::collect(documents);
    fragments.assign_names(&mut names);
    let ordered = fragments.dependency_order()?;

    let mut cx = SynthesisContext::new(view, options, &fragments, names);

    for fragment in ordered {
        synthesize_fragment(&mut cx, fragment)?;
    }

    let mut anonymous = 0;
    for document in documents {
        for definition in &document.definitions {
            if let ast::Definition::OperationDefinition(operation) = definition {
                synthesize_operation(&mut cx, operation, &mut anonymous)?;
            }
        }
    }

    let declarations = cx.into_declarations();
    tracing::debug!(count = declarations.len(), "Synthesized declarations");
    Ok(declarations)
}

fn synthesize_fragment(
    cx: &mut SynthesisContext<'_>,
    fragment: &ast::FragmentDefinition,
) -> Result<()> {
    let type_name = fragment.type_condition.as_str();
    cx.schema.get_type(type_name)?;

    let name = cx.fragments.record_spread(&fragment.name)?;
    let candidate = cx.names.policy().fragment_candidate(&fragment.name);
    // A fragment is always declared, even if empty, so spreads can refer to it.
    let body = synthesize_body(cx, type_name, &candidate, &fragment.selection_set)?
        .unwrap_or(TypeExpr::Empty);

    tracing::debug!(fragment = %fragment.name, declaration = %name, "Synthesized fragment");
    cx.push(SynthesizedType {
        name,
        kind: DeclarationKind::Fragment,
        body,
    });
    Ok(())
}

fn synthesize_operation(
    cx: &mut SynthesisContext<'_>,
    operation: &ast::OperationDefinition,
    anonymous: &mut usize,
) -> Result<()> {
    let root = cx.schema.root_type(operation.operation_type)?;
    let operation_name = if let Some(name) = &operation.name {
        name.to_string()
    } else {
        *anonymous += 1;
        format!("Unnamed{anonymous}")
    };
    let candidate = cx
        .names
        .policy()
        .operation_candidate(&operation_name, operation.operation_type);

    let Some(name) = synthesize_selection_set(
        cx,
        root,
        &candidate,
        DeclarationKind::Operation,
        &operation.selection_set,
    )?
    else {
        tracing::debug!(operation = %operation_name, "Operation selects nothing; skipped");
        return Ok(());
    };

    let body = variables_body(cx, operation)?;
    let variables_name = cx.names.allocate(&format!("{candidate}Variables"));
    cx.push(SynthesizedType {
        name: variables_name,
        kind: DeclarationKind::Variables,
        body,
    });

    tracing::debug!(operation = %operation_name, declaration = %name, "Synthesized operation");
    Ok(())
}

fn variables_body(
    cx: &SynthesisContext<'_>,
    operation: &ast::OperationDefinition,
) -> Result<TypeExpr> {
    let fields = operation
        .variables
        .iter()
        .map(|variable| {
            let base = variable.ty.inner_named_type().as_str();
            let kind = cx.schema.kind(base)?;
            let ty = if kind == TypeKind::Scalar || cx.options.is_custom_scalar(base) {
                VariableType::Scalar(base.to_string())
            } else {
                VariableType::Named(cx.names.policy().type_ref(base))
            };
            Ok(VariableField {
                name: variable.name.to_string(),
                ty,
                wrapping: Wrapping::of(&variable.ty),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(TypeExpr::Variables(fields))
}

/// Built-in scalars and introspection types are never emitted as declarations
pub(crate) fn is_built_in(name: &str) -> bool {
    name.starts_with("__") || matches!(name, "ID" | "String" | "Boolean" | "Int" | "Float")
}
