//! Printing synthesized declarations as TypeScript or Flow.
//!
//! The printer walks a [`TypeExpr`] and asks a [`Renderer`] for every piece of
//! surface syntax. The two dialects differ only in their `Renderer`
//! implementation; nothing in the walk branches on which one is active.

mod base;
mod flow;
mod typescript;

pub use base::render_base_types;
pub use flow::FlowRenderer;
pub use typescript::TypeScriptRenderer;

use crate::classify::Wrapper;
use crate::declaration::{SynthesizedType, TypeExpr, VariableType};
use crate::options::CodegenOptions;

/// Target type language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    TypeScript,
    Flow,
}

impl Dialect {
    #[must_use]
    pub fn renderer(self, options: &CodegenOptions) -> Box<dyn Renderer> {
        match self {
            Self::TypeScript => Box::new(TypeScriptRenderer::new(options)),
            Self::Flow => Box::new(FlowRenderer::new(options)),
        }
    }
}

/// Surface syntax of one target dialect
pub trait Renderer {
    fn dialect(&self) -> Dialect;

    /// First line(s) of a generated file, if the dialect needs any
    fn header(&self) -> Option<&'static str> {
        None
    }

    /// Opening and closing braces of an object type
    fn object_delimiters(&self) -> (&'static str, &'static str);

    /// Terminator of a field in a multi-line object type
    fn block_terminator(&self) -> &'static str;

    /// One `key: value` member, with optional and read-only modifiers applied
    fn field(&self, key: &str, value: &str, optional: bool) -> String;

    /// Projection of leaf `fields` from the schema type `parent`
    fn pick(&self, parent: &str, fields: &[String]) -> String;

    /// The declared type of `field` on the schema type `parent`
    fn field_type_of(&self, parent: &str, field: &str) -> String;

    fn maybe(&self, inner: &str) -> String;

    fn list(&self, inner: &str) -> String;

    /// Reference to an entry of the scalars map
    fn scalar_ref(&self, scalar: &str) -> String;

    fn maybe_declaration(&self) -> String;

    /// Helper declarations that operation types depend on
    fn operations_preamble(&self) -> Option<&'static str> {
        None
    }

    fn string_literal(&self, value: &str) -> String {
        format!("'{value}'")
    }

    fn object(&self, fields: &[String]) -> String {
        let (open, close) = self.object_delimiters();
        if fields.is_empty() {
            format!("{open}{close}")
        } else {
            format!("{open} {} {close}", fields.join(", "))
        }
    }

    /// Object type with one member per line
    fn block(&self, fields: &[String]) -> String {
        if fields.is_empty() {
            return self.object(fields);
        }
        let (open, close) = self.object_delimiters();
        let terminator = self.block_terminator();
        let mut out = format!("{open}\n");
        for field in fields {
            out.push_str("  ");
            out.push_str(field);
            out.push_str(terminator);
            out.push('\n');
        }
        out.push_str(close);
        out
    }

    /// Variables type of an operation without variables
    fn empty_variables(&self) -> String {
        self.object(&[])
    }

    fn union(&self, members: &[String]) -> String {
        members.join(" | ")
    }

    fn intersection(&self, parts: &[String]) -> String {
        parts.join(" & ")
    }

    fn declaration(&self, name: &str, body: &str) -> String {
        format!("export type {name} = {body};")
    }
}

/// Render one declaration as a complete `export type` statement
#[must_use]
pub fn render_declaration(renderer: &dyn Renderer, declaration: &SynthesizedType) -> String {
    renderer.declaration(&declaration.name, &render_type(renderer, &declaration.body))
}

/// Render a type expression in place
#[must_use]
pub fn render_type(renderer: &dyn Renderer, expr: &TypeExpr) -> String {
    match expr {
        TypeExpr::Typename(typename) => {
            let literals: Vec<String> = typename
                .possible_types
                .iter()
                .map(|name| renderer.string_literal(name))
                .collect();
            let field = renderer.field(
                &typename.key,
                &renderer.union(&literals),
                !typename.required,
            );
            renderer.object(&[field])
        }
        TypeExpr::Pick { parent, fields } => renderer.pick(parent, fields),
        TypeExpr::Aliased { parent, fields } => {
            let fields: Vec<String> = fields
                .iter()
                .map(|aliased| {
                    renderer.field(
                        &aliased.alias,
                        &renderer.field_type_of(parent, &aliased.field),
                        !aliased.required,
                    )
                })
                .collect();
            renderer.object(&fields)
        }
        TypeExpr::Links(links) => {
            let fields: Vec<String> = links
                .iter()
                .map(|link| {
                    let target = if link.targets.is_empty() {
                        renderer.object(&[])
                    } else {
                        renderer.intersection(&link.targets)
                    };
                    renderer.field(
                        &link.key,
                        &wrap(renderer, link.wrapping.wrappers(), &target),
                        !link.wrapping.is_required(),
                    )
                })
                .collect();
            renderer.object(&fields)
        }
        TypeExpr::Reference(name) => name.clone(),
        TypeExpr::Variables(variables) => {
            if variables.is_empty() {
                return renderer.empty_variables();
            }
            let fields: Vec<String> = variables
                .iter()
                .map(|variable| {
                    let named = match &variable.ty {
                        VariableType::Scalar(scalar) => renderer.scalar_ref(scalar),
                        VariableType::Named(name) => name.clone(),
                    };
                    renderer.field(
                        &variable.name,
                        &wrap(renderer, variable.wrapping.wrappers(), &named),
                        !variable.wrapping.is_required(),
                    )
                })
                .collect();
            renderer.object(&fields)
        }
        TypeExpr::Union(members) => {
            let members: Vec<String> = members
                .iter()
                .map(|member| render_type(renderer, member))
                .collect();
            renderer.union(&members)
        }
        TypeExpr::Intersection(parts) => {
            let parts: Vec<String> = parts
                .iter()
                .map(|part| match part {
                    TypeExpr::Union(_) => format!("({})", render_type(renderer, part)),
                    _ => render_type(renderer, part),
                })
                .collect();
            renderer.intersection(&parts)
        }
        TypeExpr::Empty => renderer.object(&[]),
    }
}

/// Apply a wrapper chain (outermost first) to a named type.
///
/// A layer without a `NonNull` in front of it is nullable.
#[must_use]
pub fn wrap(renderer: &dyn Renderer, wrappers: &[Wrapper], named: &str) -> String {
    match wrappers.split_first() {
        None => renderer.maybe(named),
        Some((Wrapper::NonNull, rest)) => wrap_non_null(renderer, rest, named),
        Some((Wrapper::List, rest)) => renderer.maybe(&renderer.list(&wrap(renderer, rest, named))),
    }
}

fn wrap_non_null(renderer: &dyn Renderer, wrappers: &[Wrapper], named: &str) -> String {
    match wrappers.split_first() {
        None => named.to_string(),
        Some((Wrapper::List, rest)) => renderer.list(&wrap(renderer, rest, named)),
        Some((Wrapper::NonNull, rest)) => wrap_non_null(renderer, rest, named),
    }
}
