use anyhow::{Context, Result};
use graphql_config::{find_config, load_config, ConfigError, GraphQLConfig, ProjectConfig};
use std::path::{Path, PathBuf};

/// Common context for CLI commands that require config and project selection
pub struct CommandContext {
    pub config: GraphQLConfig,
    pub config_path: PathBuf,
    /// Directory the config file lives in; all patterns resolve against it
    pub base_dir: PathBuf,
}

impl CommandContext {
    /// Load the config given with `--config`, or discover one by walking up
    /// from the current directory.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let config_path = if let Some(path) = config_path {
            path
        } else {
            let current_dir = std::env::current_dir()?;
            find_config(&current_dir).ok_or(ConfigError::NotFound(current_dir))?
        };

        let config = load_config(&config_path).context("Failed to load config")?;
        let base_dir = match config_path.parent() {
            Some(parent) if parent != Path::new("") => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        tracing::debug!(
            config = %config_path.display(),
            projects = config.project_count(),
            "Loaded GraphQL config"
        );

        Ok(Self {
            config,
            config_path,
            base_dir,
        })
    }

    /// Select the project named by `--project`.
    ///
    /// Without a name, single-project configs and multi-project configs with
    /// exactly one (or a "default") project resolve on their own.
    pub fn project(&self, name: Option<&str>) -> Result<(&str, &ProjectConfig)> {
        Ok(self.config.select_project(name)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_test_utils::TestProjectBuilder;

    #[test]
    fn test_load_explicit_config_uses_its_directory() {
        let project = TestProjectBuilder::new()
            .with_file("web/.graphqlrc.yaml", "schema: schema.graphql\n")
            .build();

        let ctx = CommandContext::load(Some(project.path("web/.graphqlrc.yaml"))).unwrap();
        assert_eq!(ctx.base_dir, project.path("web"));

        let (name, selected) = ctx.project(None).unwrap();
        assert_eq!(name, "default");
        assert_eq!(selected.schema.paths(), ["schema.graphql"]);
    }

    #[test]
    fn test_unknown_project_is_config_error() {
        let project = TestProjectBuilder::new()
            .with_config(
                "projects:\n  web:\n    schema: web.graphql\n  mobile:\n    schema: mobile.graphql\n",
            )
            .build();

        let ctx = CommandContext::load(Some(project.path(".graphqlrc.yaml"))).unwrap();
        let error = ctx.project(Some("webb")).unwrap_err();
        assert!(error.downcast_ref::<ConfigError>().is_some());
        assert!(error.to_string().contains("Did you mean 'web'?"));
    }

    #[test]
    fn test_missing_config_file_fails() {
        let project = TestProjectBuilder::new().build();
        assert!(CommandContext::load(Some(project.path(".graphqlrc.yaml"))).is_err());
    }
}
