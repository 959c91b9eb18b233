use crate::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Name of the implicit project of a single-project configuration
pub const DEFAULT_PROJECT: &str = "default";

/// Top-level GraphQL configuration.
/// Either a single project or multiple named projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GraphQLConfig {
    /// Multi-project configuration
    Multi {
        projects: HashMap<String, ProjectConfig>,
    },
    /// Single project configuration (boxed to reduce enum size)
    Single(Box<ProjectConfig>),
}

impl GraphQLConfig {
    /// Get all projects as an iterator.
    /// For single project configs, yields a single item with name "default".
    #[must_use]
    pub fn projects(&self) -> Box<dyn Iterator<Item = (&str, &ProjectConfig)> + '_> {
        match self {
            Self::Single(config) => Box::new(std::iter::once((DEFAULT_PROJECT, config.as_ref()))),
            Self::Multi { projects, .. } => Box::new(
                projects
                    .iter()
                    .map(|(name, config)| (name.as_str(), config)),
            ),
        }
    }

    /// Project names, sorted
    #[must_use]
    pub fn project_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.projects().map(|(name, _)| name).collect();
        names.sort_unstable();
        names
    }

    /// Get a specific project by name.
    /// For single project configs, returns the project if name is "default".
    #[must_use]
    pub fn get_project(&self, name: &str) -> Option<&ProjectConfig> {
        match self {
            Self::Single(config) if name == DEFAULT_PROJECT => Some(config.as_ref()),
            Self::Single(_) => None,
            Self::Multi { projects, .. } => projects.get(name),
        }
    }

    /// Resolve the project a command should run against.
    ///
    /// Without a name, a single-project config yields its only project and a
    /// multi-project config yields its `default` project if it has one. An
    /// unknown name is an error carrying the closest known project name.
    pub fn select_project(&self, name: Option<&str>) -> Result<(&str, &ProjectConfig)> {
        let requested = name.unwrap_or(DEFAULT_PROJECT);
        match self {
            Self::Single(config) if requested == DEFAULT_PROJECT => {
                return Ok((DEFAULT_PROJECT, config.as_ref()));
            }
            Self::Single(_) => {}
            Self::Multi { projects } => {
                if let Some((name, project)) = projects.get_key_value(requested) {
                    return Ok((name.as_str(), project));
                }
                if name.is_none() && projects.len() == 1 {
                    if let Some((name, project)) = projects.iter().next() {
                        return Ok((name.as_str(), project));
                    }
                }
            }
        }

        Err(ConfigError::UnknownProject {
            name: requested.to_string(),
            available: self.project_names().join(", "),
            suggestion: self.suggest_project(requested).map(ToString::to_string),
        })
    }

    /// Closest project name to `name`, if any is reasonably close
    #[must_use]
    pub fn suggest_project(&self, name: &str) -> Option<&str> {
        self.project_names()
            .into_iter()
            .map(|candidate| (candidate, strsim::jaro_winkler(name, candidate)))
            .filter(|(_, score)| *score >= 0.8)
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(candidate, _)| candidate)
    }

    /// Check if this is a multi-project configuration
    #[must_use]
    pub const fn is_multi_project(&self) -> bool {
        matches!(self, Self::Multi { .. })
    }

    /// Get the number of projects
    #[must_use]
    pub fn project_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Multi { projects } => projects.len(),
        }
    }
}

/// Configuration for a single GraphQL project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Schema source(s)
    pub schema: SchemaConfig,

    /// Document patterns (queries, mutations, fragments)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<DocumentsConfig>,

    /// File patterns to exclude from schema and document matching
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,

    /// Tool-specific extensions (includes codegen configuration)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<HashMap<String, serde_json::Value>>,
}

impl ProjectConfig {
    /// Get the codegen configuration from extensions.
    ///
    /// Codegen configuration should be specified under `extensions.codegen`:
    /// ```yaml
    /// extensions:
    ///   codegen:
    ///     generates:
    ///       src/generated/graphql.ts:
    ///         plugins: [typescript, typescript-operations]
    /// ```
    #[must_use]
    pub fn codegen(&self) -> Option<&serde_json::Value> {
        self.extensions.as_ref().and_then(|ext| ext.get("codegen"))
    }

    /// Document patterns, or an empty list when the project has none
    #[must_use]
    pub fn document_patterns(&self) -> Vec<&str> {
        self.documents
            .as_ref()
            .map_or_else(Vec::new, DocumentsConfig::patterns)
    }

    /// Check whether a path relative to the project root is one of its schema
    /// or document files.
    #[must_use]
    pub fn matches(&self, relative_path: &Path) -> bool {
        let path = relative_path.to_string_lossy();
        let matches_any = |patterns: &[&str]| {
            patterns.iter().any(|pattern| {
                expand_braces(pattern).iter().any(|expanded| {
                    glob::Pattern::new(expanded).is_ok_and(|glob| glob.matches(&path))
                })
            })
        };

        if let Some(excludes) = &self.exclude {
            let excludes: Vec<&str> = excludes.iter().map(String::as_str).collect();
            if matches_any(&excludes) {
                tracing::trace!(path = %path, "Path excluded");
                return false;
            }
        }

        matches_any(&self.schema.paths()) || matches_any(&self.document_patterns())
    }
}

/// Schema source configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaConfig {
    /// Single file path or glob pattern
    Path(String),
    /// Multiple file paths or glob patterns
    Paths(Vec<String>),
    /// Introspection configuration for remote schemas
    Introspection(IntrospectionSchemaConfig),
}

/// Configuration for introspecting a remote GraphQL endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionSchemaConfig {
    /// The GraphQL endpoint URL to introspect
    pub url: String,

    /// HTTP headers to include in the introspection request (e.g., for authentication)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
}

impl SchemaConfig {
    /// Get all schema paths/patterns
    /// For introspection configs, returns an empty vec
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        match self {
            Self::Path(path) => vec![path.as_str()],
            Self::Paths(paths) => paths.iter().map(String::as_str).collect(),
            Self::Introspection(_) => vec![],
        }
    }

    /// Check if this schema config contains URLs (HTTP/HTTPS) or is an introspection config
    #[must_use]
    pub fn has_remote_schema(&self) -> bool {
        match self {
            Self::Introspection(_) => true,
            _ => self
                .paths()
                .iter()
                .any(|p| p.starts_with("http://") || p.starts_with("https://")),
        }
    }

    /// Check if this is an introspection configuration
    #[must_use]
    pub const fn is_introspection(&self) -> bool {
        matches!(self, Self::Introspection(_))
    }
}

/// Documents source configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentsConfig {
    /// Single pattern
    Pattern(String),
    /// Multiple patterns
    Patterns(Vec<String>),
}

impl DocumentsConfig {
    /// Get all document patterns
    #[must_use]
    pub fn patterns(&self) -> Vec<&str> {
        match self {
            Self::Pattern(pattern) => vec![pattern.as_str()],
            Self::Patterns(patterns) => patterns.iter().map(String::as_str).collect(),
        }
    }
}

/// Normalize a glob pattern for consistent matching
///
/// Handles:
/// - Leading "./" prefix (removes it)
/// - Leading "/" prefix (removes it - patterns are relative to the project root)
/// - Consecutive slashes (collapses to single slash)
fn normalize_pattern(pattern: &str) -> String {
    let mut normalized = pattern.trim_start_matches("./").trim_start_matches('/').to_string();
    while normalized.contains("//") {
        normalized = normalized.replace("//", "/");
    }
    normalized
}

/// Expand brace patterns like "src/**/*.{graphql,gql}" into separate patterns.
/// Also normalizes patterns for consistent matching.
#[must_use]
pub fn expand_braces(pattern: &str) -> Vec<String> {
    let normalized = normalize_pattern(pattern);

    // Simple brace expansion - handles a single brace group
    if let (Some(start), Some(end)) = (normalized.find('{'), normalized.find('}')) {
        if start < end {
            let before = &normalized[..start];
            let after = &normalized[end + 1..];
            return normalized[start + 1..end]
                .split(',')
                .map(|option| format!("{before}{}{after}", option.trim()))
                .collect();
        }
    }

    vec![normalized]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(schema: &str, documents: Option<&str>) -> ProjectConfig {
        ProjectConfig {
            schema: SchemaConfig::Path(schema.to_string()),
            documents: documents.map(|d| DocumentsConfig::Pattern(d.to_string())),
            exclude: None,
            extensions: None,
        }
    }

    fn multi(names: &[&str]) -> GraphQLConfig {
        GraphQLConfig::Multi {
            projects: names
                .iter()
                .map(|name| {
                    (
                        (*name).to_string(),
                        project(&format!("{name}/schema.graphql"), None),
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn test_single_project_config() {
        let config = GraphQLConfig::Single(Box::new(project(
            "schema.graphql",
            Some("**/*.graphql"),
        )));

        assert!(!config.is_multi_project());
        assert_eq!(config.project_count(), 1);
        assert!(config.get_project("default").is_some());
        assert!(config.get_project("other").is_none());
        assert_eq!(config.select_project(None).unwrap().0, "default");
    }

    #[test]
    fn test_multi_project_selection() {
        let config = multi(&["frontend", "backend"]);

        assert!(config.is_multi_project());
        assert_eq!(config.project_names(), vec!["backend", "frontend"]);
        assert_eq!(config.select_project(Some("backend")).unwrap().0, "backend");
        assert!(matches!(
            config.select_project(None),
            Err(ConfigError::UnknownProject { .. })
        ));
    }

    #[test]
    fn test_only_project_is_selected_without_name() {
        let config = multi(&["web"]);
        assert_eq!(config.select_project(None).unwrap().0, "web");
    }

    #[test]
    fn test_unknown_project_suggests_closest_name() {
        let config = multi(&["frontend", "backend"]);
        match config.select_project(Some("fronted")) {
            Err(ConfigError::UnknownProject {
                name, suggestion, ..
            }) => {
                assert_eq!(name, "fronted");
                assert_eq!(suggestion.as_deref(), Some("frontend"));
            }
            other => panic!("expected unknown project, got {other:?}"),
        }
        assert_eq!(config.suggest_project("zzz"), None);
    }

    #[test]
    fn test_schema_config_paths() {
        let single = SchemaConfig::Path("schema.graphql".to_string());
        assert_eq!(single.paths(), vec!["schema.graphql"]);

        let multiple = SchemaConfig::Paths(vec![
            "schema1.graphql".to_string(),
            "schema2.graphql".to_string(),
        ]);
        assert_eq!(multiple.paths(), vec!["schema1.graphql", "schema2.graphql"]);
    }

    #[test]
    fn test_remote_schema_detection() {
        let local = SchemaConfig::Path("schema.graphql".to_string());
        assert!(!local.has_remote_schema());

        let remote = SchemaConfig::Path("https://api.example.com/graphql".to_string());
        assert!(remote.has_remote_schema());

        let introspection = SchemaConfig::Introspection(IntrospectionSchemaConfig {
            url: "https://api.example.com/graphql".to_string(),
            headers: None,
        });
        assert!(introspection.has_remote_schema());
        assert!(introspection.paths().is_empty());
    }

    #[test]
    fn test_codegen_extension() {
        let mut extensions = HashMap::new();
        extensions.insert(
            "codegen".to_string(),
            serde_json::json!({ "generates": {} }),
        );
        let config = ProjectConfig {
            extensions: Some(extensions),
            ..project("schema.graphql", None)
        };

        assert_eq!(
            config.codegen(),
            Some(&serde_json::json!({ "generates": {} }))
        );
        assert!(project("schema.graphql", None).codegen().is_none());
    }

    #[test]
    fn test_expand_braces() {
        assert_eq!(
            expand_braces("./src/**/*.{graphql, gql}"),
            vec!["src/**/*.graphql", "src/**/*.gql"]
        );
        assert_eq!(expand_braces("/schema//a.graphql"), vec!["schema/a.graphql"]);
    }

    #[test]
    fn test_matches_schema_and_documents() {
        let mut config = project("schema/*.graphql", Some("src/**/*.{graphql,gql}"));
        config.exclude = Some(vec!["src/generated/**".to_string()]);

        assert!(config.matches(Path::new("schema/types.graphql")));
        assert!(config.matches(Path::new("src/queries/user.gql")));
        assert!(!config.matches(Path::new("src/generated/ops.graphql")));
        assert!(!config.matches(Path::new("README.md")));
    }
}
