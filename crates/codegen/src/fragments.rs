//! Fragment lookup and ordering.

use crate::names::NameAllocator;
use crate::schema::SchemaView;
use crate::{CodegenError, Result};
use apollo_compiler::ast;
use apollo_compiler::schema::ExtendedType;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

/// All fragment definitions of a document set, with their declaration names.
///
/// A fragment is synthesized once as its own declaration; spread sites only
/// ever refer to it by name.
#[derive(Debug, Default)]
pub struct FragmentRegistry<'a> {
    definitions: IndexMap<&'a str, &'a ast::FragmentDefinition>,
    declaration_names: HashMap<&'a str, String>,
}

impl<'a> FragmentRegistry<'a> {
    /// Collect fragment definitions in document order.
    ///
    /// When a name is defined twice the first definition wins.
    #[must_use]
    pub fn collect(documents: &'a [ast::Document]) -> Self {
        let mut definitions = IndexMap::new();
        for document in documents {
            for definition in &document.definitions {
                let ast::Definition::FragmentDefinition(fragment) = definition else {
                    continue;
                };
                if definitions.contains_key(fragment.name.as_str()) {
                    tracing::warn!(fragment = %fragment.name, "Duplicate fragment definition ignored");
                    continue;
                }
                definitions.insert(fragment.name.as_str(), &**fragment);
            }
        }
        tracing::debug!(count = definitions.len(), "Collected fragment definitions");
        Self {
            definitions,
            declaration_names: HashMap::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a ast::FragmentDefinition> {
        self.definitions.get(name).copied()
    }

    /// Allocate every fragment's declaration name, in document order
    pub fn assign_names(&mut self, names: &mut NameAllocator) {
        for name in self.definitions.keys() {
            let candidate = names.policy().fragment_candidate(name);
            let allocated = names.allocate(&candidate);
            self.declaration_names.insert(*name, allocated);
        }
    }

    /// Record a spread of `fragment_name`, returning the declaration name the
    /// spreading declaration intersects with
    pub fn record_spread(&self, fragment_name: &str) -> Result<String> {
        self.declaration_names
            .get(fragment_name)
            .cloned()
            .ok_or_else(|| CodegenError::UnresolvedFragment(fragment_name.to_string()))
    }

    /// Resolve an inline fragment's type condition
    pub fn resolve_inline<'s>(
        &self,
        schema: &SchemaView<'s>,
        type_condition: &str,
    ) -> Result<&'s ExtendedType> {
        schema.get_type(type_condition)
    }

    /// Fragment definitions ordered so that every fragment comes after the
    /// fragments it spreads. Ties keep document order.
    pub fn dependency_order(&self) -> Result<Vec<&'a ast::FragmentDefinition>> {
        let mut order = Vec::with_capacity(self.definitions.len());
        let mut done = HashSet::new();
        let mut stack = Vec::new();
        for name in self.definitions.keys() {
            self.visit(*name, &mut stack, &mut done, &mut order)?;
        }
        Ok(order)
    }

    fn visit(
        &self,
        name: &'a str,
        stack: &mut Vec<&'a str>,
        done: &mut HashSet<&'a str>,
        order: &mut Vec<&'a ast::FragmentDefinition>,
    ) -> Result<()> {
        if done.contains(name) {
            return Ok(());
        }
        if let Some(start) = stack.iter().position(|entry| *entry == name) {
            let mut cycle: Vec<String> = stack[start..].iter().map(ToString::to_string).collect();
            cycle.push(name.to_string());
            return Err(CodegenError::FragmentCycle(cycle));
        }
        let definition = self
            .get(name)
            .ok_or_else(|| CodegenError::UnresolvedFragment(name.to_string()))?;

        stack.push(name);
        let mut spreads = Vec::new();
        spreads_in(&definition.selection_set, &mut spreads);
        for spread in spreads {
            self.visit(spread, stack, done, order)?;
        }
        stack.pop();

        done.insert(name);
        order.push(definition);
        Ok(())
    }
}

/// Names of all fragments spread anywhere inside `selections`
fn spreads_in<'a>(selections: &'a [ast::Selection], out: &mut Vec<&'a str>) {
    for selection in selections {
        match selection {
            ast::Selection::Field(field) => spreads_in(&field.selection_set, out),
            ast::Selection::FragmentSpread(spread) => out.push(spread.fragment_name.as_str()),
            ast::Selection::InlineFragment(inline) => spreads_in(&inline.selection_set, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::NamingPolicy;
    use crate::options::CodegenOptions;

    fn parse(source: &str) -> Vec<ast::Document> {
        vec![ast::Document::parse(source, "documents.graphql").unwrap()]
    }

    fn names(order: &[&ast::FragmentDefinition]) -> Vec<String> {
        order.iter().map(|fragment| fragment.name.to_string()).collect()
    }

    #[test]
    fn test_dependency_order_puts_spread_fragments_first() {
        let documents = parse(
            r"
fragment Outer on User { ...Inner friends { ...Leaf } }
fragment Inner on User { id }
fragment Leaf on User { name }
",
        );
        let registry = FragmentRegistry::collect(&documents);
        let order = registry.dependency_order().unwrap();
        assert_eq!(names(&order), vec!["Inner", "Leaf", "Outer"]);
    }

    #[test]
    fn test_cycle_is_reported() {
        let documents = parse(
            r"
fragment A on User { ...B }
fragment B on User { ... on User { ...A } }
",
        );
        let registry = FragmentRegistry::collect(&documents);
        assert_eq!(
            registry.dependency_order(),
            Err(CodegenError::FragmentCycle(vec![
                "A".to_string(),
                "B".to_string(),
                "A".to_string(),
            ]))
        );
    }

    #[test]
    fn test_record_spread_returns_declaration_name() {
        let documents = parse("fragment userFields on User { id }");
        let mut registry = FragmentRegistry::collect(&documents);
        let mut allocator =
            NameAllocator::new(NamingPolicy::from_options(&CodegenOptions::default()));
        registry.assign_names(&mut allocator);

        assert_eq!(
            registry.record_spread("userFields").unwrap(),
            "UserFieldsFragment"
        );
        assert_eq!(
            registry.record_spread("Missing"),
            Err(CodegenError::UnresolvedFragment("Missing".to_string()))
        );
    }

    #[test]
    fn test_first_definition_wins() {
        let documents = vec![
            ast::Document::parse("fragment F on User { id }", "a.graphql").unwrap(),
            ast::Document::parse("fragment F on Post { id }", "b.graphql").unwrap(),
        ];
        let registry = FragmentRegistry::collect(&documents);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("F").unwrap().type_condition.as_str(), "User");
    }
}
