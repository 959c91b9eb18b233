//! Folding collected selections into one structural body.
//!
//! Parts are produced in a fixed order: typename record, leaf projection,
//! aliased record, link record, fragment references, inline-fragment union.
//! The non-empty parts are then intersected.

use crate::collect::{CollectedSelections, TYPENAME};
use crate::context::SynthesisContext;
use crate::declaration::{TypeExpr, TypenameField};
use crate::Result;

pub(crate) fn compose(
    cx: &SynthesisContext<'_>,
    type_name: &str,
    collected: CollectedSelections,
) -> Result<Option<TypeExpr>> {
    let kind = cx.schema.kind(type_name)?;
    let parent = cx.names.policy().type_ref(type_name);

    // A literal record only makes sense for a concrete type. An abstract type
    // lists its possible types, and only when __typename was asked for.
    let literal_types = |explicit: bool| -> Vec<String> {
        if !kind.is_abstract() {
            vec![type_name.to_string()]
        } else if explicit {
            cx.schema
                .possible_types(type_name)
                .into_iter()
                .map(ToString::to_string)
                .collect()
        } else {
            Vec::new()
        }
    };

    let mut parts = Vec::new();

    if collected.typename_selected || cx.options.injects_typename() {
        let possible_types = literal_types(collected.typename_selected);
        if !possible_types.is_empty() {
            parts.push(TypeExpr::Typename(TypenameField {
                key: TYPENAME.to_string(),
                possible_types,
                required: collected.typename_selected || cx.options.non_optional_typename,
            }));
        }
    }
    for key in collected.typename_aliases {
        let possible_types = literal_types(true);
        if !possible_types.is_empty() {
            parts.push(TypeExpr::Typename(TypenameField {
                key,
                possible_types,
                required: true,
            }));
        }
    }

    if !collected.leaf_fields.is_empty() {
        parts.push(TypeExpr::Pick {
            parent: parent.clone(),
            fields: collected.leaf_fields,
        });
    }

    if !collected.aliased_leaves.is_empty() {
        parts.push(TypeExpr::Aliased {
            parent,
            fields: collected.aliased_leaves,
        });
    }

    if !collected.link_fields.is_empty() {
        parts.push(TypeExpr::Links(collected.link_fields));
    }

    if let Some(fragments) = TypeExpr::intersection(
        collected
            .fragment_refs
            .into_iter()
            .map(TypeExpr::Reference)
            .collect(),
    ) {
        parts.push(fragments);
    }

    let covered: Vec<&str> = collected
        .branches
        .keys()
        .flat_map(|condition| cx.schema.possible_types(condition))
        .collect();
    let mut branches: Vec<TypeExpr> = collected
        .branches
        .values()
        .filter_map(|names| {
            TypeExpr::intersection(names.iter().cloned().map(TypeExpr::Reference).collect())
        })
        .collect();
    // One member per possible type that no branch covers
    if kind.is_abstract() && !branches.is_empty() {
        let typename_wanted = collected.typename_selected || cx.options.injects_typename();
        for uncovered in cx
            .schema
            .possible_types(type_name)
            .into_iter()
            .filter(|possible| !covered.contains(possible))
        {
            branches.push(if typename_wanted {
                TypeExpr::Typename(TypenameField {
                    key: TYPENAME.to_string(),
                    possible_types: vec![uncovered.to_string()],
                    required: collected.typename_selected || cx.options.non_optional_typename,
                })
            } else {
                TypeExpr::Empty
            });
        }
    }
    if let Some(union) = TypeExpr::union(branches) {
        parts.push(union);
    }

    Ok(TypeExpr::intersection(parts))
}
