//! Schema types that synthesized declarations pick from.

use super::{wrap, Renderer};
use crate::builder::is_built_in;
use crate::classify::Wrapping;
use crate::names::NamingPolicy;
use crate::options::CodegenOptions;
use apollo_compiler::ast;
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::Schema;

const BUILT_IN_SCALARS: &[(&str, &str)] = &[
    ("ID", "string"),
    ("String", "string"),
    ("Boolean", "boolean"),
    ("Int", "number"),
    ("Float", "number"),
];

/// Target type of a custom scalar without a configured mapping
const DEFAULT_CUSTOM_SCALAR: &str = "any";

/// Render the `Maybe` helper, the scalars map and one declaration per
/// user-defined schema type, in schema order.
#[tracing::instrument(skip_all)]
pub fn render_base_types(
    renderer: &dyn Renderer,
    schema: &Schema,
    options: &CodegenOptions,
) -> Vec<String> {
    let policy = NamingPolicy::from_options(options);
    let mut out = vec![renderer.maybe_declaration(), scalars_map(renderer, schema, options)];

    for (name, ty) in &schema.types {
        if is_built_in(name) {
            continue;
        }
        let type_ref = policy.type_ref(name);
        let body = match ty {
            ExtendedType::Scalar(_) => continue,
            ExtendedType::Enum(enum_type) => {
                let values: Vec<String> = enum_type
                    .values
                    .keys()
                    .map(|value| renderer.string_literal(value))
                    .collect();
                renderer.union(&values)
            }
            ExtendedType::Object(object) => {
                let mut fields = vec![renderer.field(
                    "__typename",
                    &renderer.string_literal(name),
                    true,
                )];
                fields.extend(object.fields.values().map(|field| {
                    member(renderer, schema, &policy, &field.name, &field.ty)
                }));
                renderer.block(&fields)
            }
            ExtendedType::Interface(interface) => {
                let fields: Vec<String> = interface
                    .fields
                    .values()
                    .map(|field| member(renderer, schema, &policy, &field.name, &field.ty))
                    .collect();
                renderer.block(&fields)
            }
            ExtendedType::Union(union_type) => {
                let members: Vec<String> = union_type
                    .members
                    .iter()
                    .map(|member| policy.type_ref(&member.name))
                    .collect();
                renderer.union(&members)
            }
            ExtendedType::InputObject(input) => {
                let fields: Vec<String> = input
                    .fields
                    .values()
                    .map(|field| member(renderer, schema, &policy, &field.name, &field.ty))
                    .collect();
                renderer.block(&fields)
            }
        };
        out.push(renderer.declaration(&type_ref, &body));
    }

    tracing::debug!(count = out.len(), "Rendered base types");
    out
}

fn scalars_map(renderer: &dyn Renderer, schema: &Schema, options: &CodegenOptions) -> String {
    let mut fields: Vec<String> = BUILT_IN_SCALARS
        .iter()
        .map(|(name, default)| {
            let target = options.scalars.get(*name).map_or(*default, String::as_str);
            renderer.field(name, target, false)
        })
        .collect();
    fields.extend(
        schema
            .types
            .iter()
            .filter(|(name, ty)| matches!(ty, ExtendedType::Scalar(_)) && !is_built_in(name))
            .map(|(name, _)| {
                let target = options
                    .scalars
                    .get(name.as_str())
                    .map_or(DEFAULT_CUSTOM_SCALAR, String::as_str);
                renderer.field(name, target, false)
            }),
    );
    renderer.declaration("Scalars", &renderer.block(&fields))
}

/// One field of an object, interface or input object; nullable fields are optional
fn member(
    renderer: &dyn Renderer,
    schema: &Schema,
    policy: &NamingPolicy,
    name: &str,
    ty: &ast::Type,
) -> String {
    let named = ty.inner_named_type();
    let named = if matches!(schema.types.get(named), Some(ExtendedType::Scalar(_))) {
        renderer.scalar_ref(named)
    } else {
        policy.type_ref(named)
    };
    let wrapping = Wrapping::of(ty);
    renderer.field(
        name,
        &wrap(renderer, wrapping.wrappers(), &named),
        !wrapping.is_required(),
    )
}
