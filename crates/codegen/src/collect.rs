//! Per-selection-set traversal.
//!
//! [`collect`] walks one selection set against one schema type and sorts every
//! selection into a bucket. Link fields and inline fragments recurse through
//! [`synthesize_selection_set`], which pushes the nested declaration and hands
//! back its name.

use crate::classify::classify;
use crate::compose::compose;
use crate::context::SynthesisContext;
use crate::declaration::{AliasedField, DeclarationKind, LinkField, SynthesizedType, TypeExpr};
use crate::names::NamingPolicy;
use crate::Result;
use apollo_compiler::ast;
use indexmap::IndexMap;

pub(crate) const TYPENAME: &str = "__typename";

/// Everything selected on one type, sorted into buckets
#[derive(Debug, Default)]
pub(crate) struct CollectedSelections {
    pub typename_selected: bool,
    /// Response keys of aliased `__typename` selections
    pub typename_aliases: Vec<String>,
    pub leaf_fields: Vec<String>,
    pub aliased_leaves: Vec<AliasedField>,
    pub link_fields: Vec<LinkField>,
    /// Type condition to branch declaration names, in first-seen order
    pub branches: IndexMap<String, Vec<String>>,
    pub fragment_refs: Vec<String>,
}

/// Synthesize `selections` on `type_name` into a named declaration.
///
/// Returns `None` when the selection set is empty.
pub(crate) fn synthesize_selection_set(
    cx: &mut SynthesisContext<'_>,
    type_name: &str,
    candidate: &str,
    kind: DeclarationKind,
    selections: &[ast::Selection],
) -> Result<Option<String>> {
    let Some(body) = synthesize_body(cx, type_name, candidate, selections)? else {
        return Ok(None);
    };
    let name = cx.names.allocate(candidate);
    cx.push(SynthesizedType {
        name: name.clone(),
        kind,
        body,
    });
    Ok(Some(name))
}

/// Collect and compose `selections` without naming the result
pub(crate) fn synthesize_body(
    cx: &mut SynthesisContext<'_>,
    type_name: &str,
    candidate: &str,
    selections: &[ast::Selection],
) -> Result<Option<TypeExpr>> {
    if selections.is_empty() {
        return Ok(None);
    }
    let collected = collect(cx, type_name, candidate, selections)?;
    compose(cx, type_name, collected)
}

pub(crate) fn collect(
    cx: &mut SynthesisContext<'_>,
    type_name: &str,
    candidate: &str,
    selections: &[ast::Selection],
) -> Result<CollectedSelections> {
    let mut collected = CollectedSelections::default();

    for selection in selections {
        match selection {
            ast::Selection::Field(field) => {
                collect_field(cx, type_name, candidate, field, &mut collected)?;
            }
            ast::Selection::FragmentSpread(spread) => {
                let reference = cx.fragments.record_spread(&spread.fragment_name)?;
                if !collected.fragment_refs.contains(&reference) {
                    collected.fragment_refs.push(reference);
                }
            }
            ast::Selection::InlineFragment(inline) => {
                let condition = inline
                    .type_condition
                    .as_ref()
                    .map_or(type_name, |condition| condition.as_str());
                cx.fragments.resolve_inline(&cx.schema, condition)?;

                let branch_candidate = NamingPolicy::child_candidate(candidate, condition);
                if let Some(branch) = synthesize_selection_set(
                    cx,
                    condition,
                    &branch_candidate,
                    DeclarationKind::Branch,
                    &inline.selection_set,
                )? {
                    collected
                        .branches
                        .entry(condition.to_string())
                        .or_default()
                        .push(branch);
                }
            }
        }
    }

    Ok(collected)
}

fn collect_field(
    cx: &mut SynthesisContext<'_>,
    type_name: &str,
    candidate: &str,
    field: &ast::Field,
    collected: &mut CollectedSelections,
) -> Result<()> {
    let field_name = field.name.as_str();
    let alias = field
        .alias
        .as_ref()
        .map(|alias| alias.as_str())
        .filter(|alias| *alias != field_name);

    if field_name == TYPENAME {
        match alias {
            Some(alias) => {
                if !collected.typename_aliases.iter().any(|key| key == alias) {
                    collected.typename_aliases.push(alias.to_string());
                }
            }
            None => collected.typename_selected = true,
        }
        return Ok(());
    }

    let definition = cx.schema.field_def(type_name, field_name)?;
    let classification = classify(&cx.schema, &definition.ty, cx.options)?;

    if classification.is_leaf {
        match alias {
            Some(alias) => {
                if !collected.aliased_leaves.iter().any(|f| f.alias == alias) {
                    collected.aliased_leaves.push(AliasedField {
                        alias: alias.to_string(),
                        field: field_name.to_string(),
                        required: classification.is_required(),
                    });
                }
            }
            None => {
                if !collected.leaf_fields.iter().any(|f| f == field_name) {
                    collected.leaf_fields.push(field_name.to_string());
                }
            }
        }
        return Ok(());
    }

    let key = alias.unwrap_or(field_name);
    let child_candidate = NamingPolicy::child_candidate(candidate, key);
    let target = synthesize_selection_set(
        cx,
        &classification.base_type,
        &child_candidate,
        DeclarationKind::Selection,
        &field.selection_set,
    )?;

    if let Some(existing) = collected.link_fields.iter_mut().find(|link| link.key == key) {
        existing.targets.extend(target);
    } else {
        collected.link_fields.push(LinkField {
            key: key.to_string(),
            field: field_name.to_string(),
            base_type: classification.base_type,
            targets: target.into_iter().collect(),
            wrapping: classification.wrapping,
        });
    }
    Ok(())
}
