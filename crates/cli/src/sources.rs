//! Reading a project's schema and document files from disk.

use anyhow::{Context, Result};
use graphql_codegen::SourceFile;
use graphql_config::{expand_braces, ProjectConfig};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The GraphQL sources of one project, in path order
#[derive(Debug)]
pub struct ProjectSources {
    pub schema: Vec<SourceFile>,
    pub documents: Vec<SourceFile>,
}

impl ProjectSources {
    /// Load every file matched by the project's schema and document patterns.
    ///
    /// Paths are resolved against `base_dir` and reported relative to it.
    /// Excluded paths and anything under `node_modules` are skipped.
    #[tracing::instrument(skip_all, fields(base_dir = %base_dir.display()))]
    pub fn load(project: &ProjectConfig, base_dir: &Path) -> Result<Self> {
        let schema = load_files(&project.schema.paths(), project, base_dir)?;
        let documents = load_files(&project.document_patterns(), project, base_dir)?;
        tracing::debug!(
            schema_files = schema.len(),
            document_files = documents.len(),
            "Loaded project sources"
        );
        Ok(Self { schema, documents })
    }
}

fn load_files(patterns: &[&str], project: &ProjectConfig, base_dir: &Path) -> Result<Vec<SourceFile>> {
    // Keyed by relative path so output order never depends on glob order
    let mut paths: BTreeMap<PathBuf, PathBuf> = BTreeMap::new();

    for pattern in patterns {
        for expanded in expand_braces(pattern) {
            let full_pattern = base_dir.join(&expanded).display().to_string();

            for entry in glob::glob(&full_pattern)
                .with_context(|| format!("Invalid glob pattern: {full_pattern}"))?
            {
                let path = entry.context("Failed to read matched path")?;
                if !path.is_file() || path.components().any(|c| c.as_os_str() == "node_modules") {
                    continue;
                }
                let relative = path.strip_prefix(base_dir).unwrap_or(&path).to_path_buf();
                if !project.matches(&relative) {
                    tracing::trace!(path = %relative.display(), "Skipping excluded file");
                    continue;
                }
                paths.insert(relative, path);
            }
        }
    }

    paths
        .into_iter()
        .map(|(relative, path)| {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            Ok(SourceFile::new(relative.display().to_string(), text))
        })
        .collect()
}
