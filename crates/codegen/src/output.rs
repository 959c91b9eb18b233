//! Assembling one generated file from its plugin list.

use crate::builder::synthesize;
use crate::declaration::SynthesizedType;
use crate::options::CodegenOptions;
use crate::render::{render_base_types, render_declaration, Dialect};
use crate::{CodegenError, Result};
use apollo_compiler::ast;
use apollo_compiler::Schema;
use serde::{Deserialize, Serialize};

/// Banner placed at the top of every generated file
pub const GENERATED_BANNER: &str =
    "/* This file was generated by `graphql codegen`. Do not edit it by hand. */";

/// A generator contributing to one output file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Plugin {
    /// Base schema types in TypeScript
    #[serde(rename = "typescript")]
    TypeScript,
    /// Operation and fragment result types in TypeScript
    #[serde(rename = "typescript-operations")]
    TypeScriptOperations,
    /// Base schema types in Flow
    #[serde(rename = "flow")]
    Flow,
    /// Operation and fragment result types in Flow
    #[serde(rename = "flow-operations")]
    FlowOperations,
}

impl Plugin {
    #[must_use]
    pub const fn dialect(self) -> Dialect {
        match self {
            Self::TypeScript | Self::TypeScriptOperations => Dialect::TypeScript,
            Self::Flow | Self::FlowOperations => Dialect::Flow,
        }
    }

    #[must_use]
    pub const fn is_operations(self) -> bool {
        matches!(self, Self::TypeScriptOperations | Self::FlowOperations)
    }
}

/// One entry of `generates`: the plugins writing a file and their settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub plugins: Vec<Plugin>,
    #[serde(default)]
    pub config: CodegenOptions,
}

/// What an output file contains, decided from its plugins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputPlan {
    pub dialect: Dialect,
    pub base_types: bool,
    pub operations: bool,
}

impl OutputConfig {
    /// Decide the dialect and sections of this output.
    ///
    /// All plugins of one output must share a dialect.
    pub fn plan(&self) -> Result<OutputPlan> {
        let Some(first) = self.plugins.first() else {
            return Err(CodegenError::InvalidOutput(
                "at least one plugin is required".to_string(),
            ));
        };
        let dialect = first.dialect();
        if let Some(mixed) = self.plugins.iter().find(|plugin| plugin.dialect() != dialect) {
            return Err(CodegenError::InvalidOutput(format!(
                "plugin {mixed:?} cannot be combined with {first:?} in one output"
            )));
        }
        Ok(OutputPlan {
            dialect,
            base_types: self.plugins.iter().any(|plugin| !plugin.is_operations()),
            operations: self.plugins.iter().any(|plugin| plugin.is_operations()),
        })
    }
}

/// Render a complete output file.
///
/// The dialect header (if any) comes first, then the banner, base types when
/// planned, and finally any dialect helpers followed by every declaration in
/// order.
#[must_use]
pub fn render_output(
    schema: &Schema,
    declarations: &[SynthesizedType],
    plan: &OutputPlan,
    options: &CodegenOptions,
) -> String {
    let renderer = plan.dialect.renderer(options);
    let mut sections = Vec::new();
    if let Some(header) = renderer.header() {
        sections.push(header.to_string());
    }
    sections.push(GENERATED_BANNER.to_string());
    if plan.base_types {
        sections.extend(render_base_types(&*renderer, schema, options));
    }
    if plan.operations {
        sections.extend(renderer.operations_preamble().map(ToString::to_string));
        sections.extend(
            declarations
                .iter()
                .map(|declaration| render_declaration(&*renderer, declaration)),
        );
    }

    let mut out = sections.join("\n\n");
    out.push('\n');
    out
}

/// Synthesize and render one output file
#[tracing::instrument(skip_all, fields(plugins = ?output.plugins))]
pub fn generate(
    schema: &Schema,
    documents: &[ast::Document],
    output: &OutputConfig,
) -> Result<String> {
    let plan = output.plan()?;
    let declarations = if plan.operations {
        synthesize(schema, documents, &output.config)?
    } else {
        Vec::new()
    };
    Ok(render_output(schema, &declarations, &plan, &output.config))
}
