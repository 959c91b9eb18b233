//! Declaration naming.
//!
//! A [`NamingPolicy`] turns schema, operation and fragment names into type
//! names. A [`NameAllocator`] owns the names already handed out in one run and
//! guarantees each allocation is unique by appending `2`, `3`, ... on clashes.

use crate::options::{CodegenOptions, NamingConvention};
use apollo_compiler::ast::OperationType;
use heck::ToUpperCamelCase;
use std::collections::HashSet;

/// Helper names emitted alongside declarations; never handed out.
pub const RESERVED_HELPER_NAMES: &[&str] = &["Maybe", "Scalars"];

/// Casing, prefix and suffix rules for generated names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingPolicy {
    convention: NamingConvention,
    prefix: String,
    fragment_suffix: String,
    omit_operation_suffix: bool,
}

impl NamingPolicy {
    #[must_use]
    pub fn from_options(options: &CodegenOptions) -> Self {
        Self {
            convention: options.naming_convention,
            prefix: options.types_prefix.clone(),
            fragment_suffix: options.fragment_suffix.clone(),
            omit_operation_suffix: options.omit_operation_suffix,
        }
    }

    /// Apply the casing transform.
    ///
    /// Underscore-separated segments are cased independently so that nested
    /// declaration names keep their path structure.
    #[must_use]
    pub fn convert(&self, name: &str) -> String {
        match self.convention {
            NamingConvention::Keep => name.to_string(),
            NamingConvention::PascalCase => name
                .split('_')
                .map(|segment| segment.to_upper_camel_case())
                .collect::<Vec<_>>()
                .join("_"),
        }
    }

    /// Final name of a candidate: prefix plus cased candidate
    #[must_use]
    pub fn format(&self, candidate: &str) -> String {
        format!("{}{}", self.prefix, self.convert(candidate))
    }

    /// How a schema type is referred to from generated code
    #[must_use]
    pub fn type_ref(&self, schema_type: &str) -> String {
        self.format(schema_type)
    }

    /// Candidate for a fragment's standalone declaration
    #[must_use]
    pub fn fragment_candidate(&self, fragment_name: &str) -> String {
        format!("{fragment_name}{}", self.fragment_suffix)
    }

    /// Candidate for an operation's result declaration
    #[must_use]
    pub fn operation_candidate(&self, operation_name: &str, kind: OperationType) -> String {
        if self.omit_operation_suffix {
            operation_name.to_string()
        } else {
            format!(
                "{operation_name}{}",
                crate::schema::operation_type_name(kind)
            )
        }
    }

    /// Candidate for a declaration nested under `parent`
    #[must_use]
    pub fn child_candidate(parent: &str, segment: &str) -> String {
        format!("{parent}_{segment}")
    }
}

/// Run-scoped store of allocated names
#[derive(Debug, Clone)]
pub struct NameAllocator {
    policy: NamingPolicy,
    seen: HashSet<String>,
}

impl NameAllocator {
    #[must_use]
    pub fn new(policy: NamingPolicy) -> Self {
        Self {
            policy,
            seen: HashSet::new(),
        }
    }

    /// Mark final names as taken without allocating them
    pub fn reserve<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.seen.extend(names.into_iter().map(Into::into));
    }

    #[must_use]
    pub const fn policy(&self) -> &NamingPolicy {
        &self.policy
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    /// Format `candidate` and make it unique within this run
    pub fn allocate(&mut self, candidate: &str) -> String {
        let base = self.policy.format(candidate);
        let mut name = base.clone();
        let mut counter = 2;
        while self.seen.contains(&name) {
            name = format!("{base}{counter}");
            counter += 1;
        }
        tracing::trace!(candidate, name = %name, "Allocated declaration name");
        self.seen.insert(name.clone());
        name
    }
}
