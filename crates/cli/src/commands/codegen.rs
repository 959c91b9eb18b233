use crate::commands::common::CommandContext;
use crate::sources::ProjectSources;
use crate::watch::{FileWatcher, WatchConfig};
use crate::{ExitCode, OutputOptions};
use anyhow::{Context, Result};
use colored::Colorize;
use graphql_codegen::{generate, parse_documents, parse_schema, OutputConfig};
use graphql_config::{ConfigError, ProjectConfig};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

const EXAMPLE_CONFIG: &str = "Example configuration:

extensions:
  codegen:
    generates:
      src/generated/types.ts:
        plugins:
          - typescript
          - typescript-operations";

/// Configuration structure for the codegen extension
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodegenConfig {
    /// Output files, keyed by path relative to the config file
    pub generates: IndexMap<String, OutputConfig>,

    /// Replace existing output files (defaults to true)
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,

    #[serde(default)]
    pub hooks: CodegenHooks,
}

/// Commands run after generation.
///
/// A hook is split on whitespace into a program and its arguments and run
/// without a shell, so quoting is not interpreted: `prettier --write 'a b'`
/// passes `'a` and `b'` as two arguments.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodegenHooks {
    /// Run once after all files are written, with the written paths appended
    #[serde(default)]
    pub after_all_file_write: Vec<String>,
}

const fn default_overwrite() -> bool {
    true
}

impl CodegenConfig {
    /// Read `extensions.codegen` from a project.
    pub fn from_project(project: &ProjectConfig, config_path: &Path) -> Result<Self> {
        let invalid = |message: String| ConfigError::Invalid {
            path: config_path.to_path_buf(),
            message,
        };

        let value = project.codegen().ok_or_else(|| {
            invalid(format!(
                "No codegen configuration found. Add 'extensions.codegen' to your GraphQL config.\n\n{EXAMPLE_CONFIG}"
            ))
        })?;
        let codegen: Self = serde_json::from_value(value.clone())
            .map_err(|e| invalid(format!("Invalid codegen configuration: {e}")))?;
        if codegen.generates.is_empty() {
            return Err(invalid("'generates' must list at least one output file".to_string()).into());
        }
        Ok(codegen)
    }
}

/// One rendered output file, not yet written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path as written in `generates`
    pub name: String,
    /// `name` resolved against the config directory
    pub path: PathBuf,
    pub contents: String,
}

impl GeneratedFile {
    /// Whether the file on disk is missing or differs from `contents`
    pub fn is_stale(&self) -> bool {
        !fs::read_to_string(&self.path).is_ok_and(|existing| existing == self.contents)
    }

    /// Whether a run with this `overwrite` setting would write the file
    pub fn needs_write(&self, overwrite: bool) -> bool {
        if !overwrite && self.path.exists() {
            return false;
        }
        self.is_stale()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
    /// The file exists and `overwrite` is off
    Skipped,
}

/// Load the project's sources and render every configured output
#[tracing::instrument(skip_all, fields(outputs = codegen.generates.len()))]
pub fn generate_project(
    project: &ProjectConfig,
    codegen: &CodegenConfig,
    base_dir: &Path,
) -> Result<Vec<GeneratedFile>> {
    let sources = ProjectSources::load(project, base_dir)?;
    let schema = parse_schema(&sources.schema)?;
    let documents = parse_documents(&sources.documents)?;

    codegen
        .generates
        .iter()
        .map(|(name, output)| {
            let contents = generate(&schema, &documents, output)
                .with_context(|| format!("Failed to generate {name}"))?;
            Ok(GeneratedFile {
                name: name.clone(),
                path: base_dir.join(name),
                contents,
            })
        })
        .collect()
}

/// Write one output, leaving identical files untouched
pub fn write_file(file: &GeneratedFile, overwrite: bool) -> Result<WriteOutcome> {
    if file.path.exists() {
        if !overwrite {
            return Ok(WriteOutcome::Skipped);
        }
        if !file.is_stale() {
            return Ok(WriteOutcome::Unchanged);
        }
    }

    if let Some(parent) = file.path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(&file.path, &file.contents)
        .with_context(|| format!("Failed to write file: {}", file.path.display()))?;
    Ok(WriteOutcome::Written)
}

/// Run every `afterAllFileWrite` hook with the written files appended.
///
/// Hooks run from the config directory and only when something was written.
pub fn run_hooks(hooks: &CodegenHooks, written: &[String], base_dir: &Path) -> Result<()> {
    if written.is_empty() {
        return Ok(());
    }

    for hook in &hooks.after_all_file_write {
        let mut parts = hook.split_whitespace();
        let Some(program) = parts.next() else {
            continue;
        };
        tracing::debug!(hook = %hook, files = written.len(), "Running afterAllFileWrite hook");

        let status = Command::new(program)
            .args(parts)
            .args(written)
            .current_dir(base_dir)
            .status()
            .with_context(|| format!("Failed to run hook '{hook}'"))?;
        if !status.success() {
            anyhow::bail!("Hook '{hook}' failed ({status})");
        }
    }
    Ok(())
}

/// Generate, write and run hooks. Returns the names of the files written.
pub fn generate_and_write(
    project: &ProjectConfig,
    codegen: &CodegenConfig,
    base_dir: &Path,
    output_opts: OutputOptions,
) -> Result<Vec<String>> {
    let files = generate_project(project, codegen, base_dir)?;

    let mut written = Vec::new();
    for file in &files {
        let outcome = write_file(file, codegen.overwrite)?;
        if output_opts.show_info {
            match outcome {
                WriteOutcome::Written => println!("  {} {}", "✓".green(), file.name),
                WriteOutcome::Unchanged => {
                    println!("  {} {} {}", "·".dimmed(), file.name, "(unchanged)".dimmed());
                }
                WriteOutcome::Skipped => println!(
                    "  {} {} {}",
                    "-".yellow(),
                    file.name,
                    "(exists, overwrite is off)".dimmed()
                ),
            }
        }
        if outcome == WriteOutcome::Written {
            written.push(file.name.clone());
        }
    }

    run_hooks(&codegen.hooks, &written, base_dir)?;
    Ok(written)
}

/// Run the codegen command
#[tracing::instrument(skip(config_path, output_opts), fields(project = ?project_name))]
pub fn run(
    config_path: Option<PathBuf>,
    project_name: Option<&str>,
    watch: bool,
    check: bool,
    output_opts: OutputOptions,
) -> Result<()> {
    match execute(config_path, project_name, watch, check, output_opts) {
        Ok(ExitCode::Success) => Ok(()),
        Ok(code) => code.exit(),
        Err(error) => {
            let code = ExitCode::for_error(&error);
            eprintln!(
                "{} {error:#}",
                format!("✗ Code generation failed ({code}):").red()
            );
            code.exit()
        }
    }
}

fn execute(
    config_path: Option<PathBuf>,
    project_name: Option<&str>,
    watch: bool,
    check: bool,
    output_opts: OutputOptions,
) -> Result<ExitCode> {
    let start_time = Instant::now();
    let ctx = CommandContext::load(config_path)?;
    let (name, project) = ctx.project(project_name)?;

    if project.schema.has_remote_schema() {
        return Err(ConfigError::Invalid {
            path: ctx.config_path.clone(),
            message: format!(
                "Project '{name}' uses a remote schema. Codegen reads local SDL files only; point 'schema' at your schema files."
            ),
        }
        .into());
    }

    let codegen = CodegenConfig::from_project(project, &ctx.config_path)?;
    tracing::debug!(project = name, outputs = codegen.generates.len(), "Loaded codegen configuration");

    if watch {
        let mut watcher = FileWatcher::new(WatchConfig {
            project_config: project.clone(),
            codegen,
            base_dir: ctx.base_dir.clone(),
            output_opts,
        })?;
        watcher.start()?;
        watcher.run();
        return Ok(ExitCode::Success);
    }

    if check {
        let files = with_spinner(output_opts, "Checking generated files...", || {
            generate_project(project, &codegen, &ctx.base_dir)
        })?;
        return Ok(report_check(&files, codegen.overwrite, output_opts));
    }

    if output_opts.show_info {
        println!("{}", "Generating types...".cyan());
    }
    let written = generate_and_write(project, &codegen, &ctx.base_dir, output_opts)?;

    if output_opts.show_info {
        println!(
            "\n{}",
            format!(
                "✓ Code generation completed ({} of {} file(s) written)",
                written.len(),
                codegen.generates.len()
            )
            .green()
            .bold()
        );
        println!(
            "  {} total: {:.2}s",
            "⏱".dimmed(),
            start_time.elapsed().as_secs_f64()
        );
    }
    Ok(ExitCode::Success)
}

fn with_spinner<T>(output_opts: OutputOptions, message: &str, f: impl FnOnce() -> T) -> T {
    let spinner = output_opts
        .show_progress
        .then(|| crate::progress::spinner(message));
    let result = f();
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    result
}

fn report_check(files: &[GeneratedFile], overwrite: bool, output_opts: OutputOptions) -> ExitCode {
    let stale: Vec<&GeneratedFile> = files
        .iter()
        .filter(|file| file.needs_write(overwrite))
        .collect();
    if stale.is_empty() {
        if output_opts.show_info {
            println!("{}", "✓ All generated files are up to date".green().bold());
        }
        return ExitCode::Success;
    }

    for file in &stale {
        eprintln!("{} {} is out of date", "✗".red().bold(), file.name);
    }
    eprintln!(
        "\n{}",
        "Run 'graphql codegen' to regenerate them.".dimmed()
    );
    ExitCode::GenerationError
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_config::{load_config, DocumentsConfig, SchemaConfig};
    use graphql_test_utils::fixtures::{BASIC_QUERY, BASIC_SCHEMA};
    use graphql_test_utils::{TestProject, TestProjectBuilder};

    const CONFIG: &str = "schema: schema.graphql
documents: 'src/**/*.graphql'
extensions:
  codegen:
    generates:
      src/generated/types.ts:
        plugins: [typescript, typescript-operations]
      src/generated/operations.ts:
        plugins: [typescript-operations]
        config:
          skipTypename: true
";

    const QUIET: OutputOptions = OutputOptions {
        show_progress: false,
        show_info: false,
    };

    fn setup(config: &str) -> (TestProject, ProjectConfig, CodegenConfig) {
        let test_project = TestProjectBuilder::new()
            .with_config(config)
            .with_file("schema.graphql", BASIC_SCHEMA)
            .with_file("src/user.graphql", BASIC_QUERY)
            .build();
        let config_path = test_project.path(".graphqlrc.yaml");
        let config = load_config(&config_path).unwrap();
        let project = config.get_project("default").unwrap().clone();
        let codegen = CodegenConfig::from_project(&project, &config_path).unwrap();
        (test_project, project, codegen)
    }

    #[test]
    fn test_codegen_config_deserialization() {
        let json = serde_json::json!({
            "generates": {
                "src/generated/types.ts": {
                    "plugins": ["typescript", "typescript-operations"]
                }
            }
        });

        let config: CodegenConfig = serde_json::from_value(json).unwrap();
        assert!(config.overwrite);
        assert!(config.hooks.after_all_file_write.is_empty());
        assert_eq!(config.generates.len(), 1);
    }

    #[test]
    fn test_codegen_config_with_all_fields() {
        let json = serde_json::json!({
            "generates": {
                "b.ts": { "plugins": ["flow-operations"] },
                "a.ts": { "plugins": ["typescript"], "config": { "typesPrefix": "Gql" } }
            },
            "overwrite": false,
            "hooks": {
                "afterAllFileWrite": ["prettier --write"]
            }
        });

        let config: CodegenConfig = serde_json::from_value(json).unwrap();
        assert!(!config.overwrite);
        assert_eq!(config.hooks.after_all_file_write, ["prettier --write"]);
        // Outputs keep their configured order
        assert_eq!(config.generates.keys().collect::<Vec<_>>(), ["b.ts", "a.ts"]);
        assert_eq!(config.generates["a.ts"].config.types_prefix, "Gql");
    }

    #[test]
    fn test_missing_codegen_extension_is_config_error() {
        let project = ProjectConfig {
            schema: SchemaConfig::Path("schema.graphql".to_string()),
            documents: Some(DocumentsConfig::Pattern("**/*.graphql".to_string())),
            exclude: None,
            extensions: None,
        };
        let error = CodegenConfig::from_project(&project, Path::new(".graphqlrc.yaml")).unwrap_err();
        assert_eq!(ExitCode::for_error(&error), ExitCode::ConfigError);
        assert!(error.to_string().contains("extensions.codegen"));
    }

    #[test]
    fn test_generate_and_write_creates_outputs() {
        let (test_project, project, codegen) = setup(CONFIG);

        let written = generate_and_write(&project, &codegen, test_project.root(), QUIET).unwrap();
        assert_eq!(written, ["src/generated/types.ts", "src/generated/operations.ts"]);

        let types = test_project.read("src/generated/types.ts");
        assert!(types.contains("export type User = {"));
        assert!(types.contains("export type GetUserQuery = "));

        let operations = test_project.read("src/generated/operations.ts");
        assert!(!operations.contains("export type User = {"));
        assert!(operations.contains("export type GetUserQuery_User = Pick<User, 'id' | 'name' | 'email'>;"));
    }

    #[test]
    fn test_second_run_leaves_files_unchanged() {
        let (test_project, project, codegen) = setup(CONFIG);
        generate_and_write(&project, &codegen, test_project.root(), QUIET).unwrap();

        let written = generate_and_write(&project, &codegen, test_project.root(), QUIET).unwrap();
        assert!(written.is_empty());
    }

    #[test]
    fn test_overwrite_false_skips_existing_files() {
        let config = CONFIG.replace("    generates:", "    overwrite: false\n    generates:");
        let (test_project, project, codegen) = setup(&config);
        test_project.write("src/generated/types.ts", "// hand edited\n");

        let written = generate_and_write(&project, &codegen, test_project.root(), QUIET).unwrap();
        assert_eq!(written, ["src/generated/operations.ts"]);
        assert_eq!(test_project.read("src/generated/types.ts"), "// hand edited\n");
    }

    #[test]
    fn test_check_respects_overwrite_false() {
        let config = CONFIG.replace("    generates:", "    overwrite: false\n    generates:");
        let (test_project, project, codegen) = setup(&config);
        test_project.write("src/generated/types.ts", "// hand edited\n");

        let files = generate_project(&project, &codegen, test_project.root()).unwrap();
        assert!(files[0].is_stale());
        assert!(!files[0].needs_write(false));
        assert!(files[1].needs_write(false));
        assert_eq!(
            report_check(&files, codegen.overwrite, QUIET),
            ExitCode::GenerationError
        );

        generate_and_write(&project, &codegen, test_project.root(), QUIET).unwrap();
        let files = generate_project(&project, &codegen, test_project.root()).unwrap();
        assert_eq!(report_check(&files, codegen.overwrite, QUIET), ExitCode::Success);
    }

    #[test]
    fn test_stale_detection() {
        let (test_project, project, codegen) = setup(CONFIG);
        let files = generate_project(&project, &codegen, test_project.root()).unwrap();
        assert!(files.iter().all(GeneratedFile::is_stale));
        assert_eq!(report_check(&files, true, QUIET), ExitCode::GenerationError);

        for file in &files {
            write_file(file, true).unwrap();
        }
        assert!(!files.iter().any(GeneratedFile::is_stale));
        assert_eq!(report_check(&files, true, QUIET), ExitCode::Success);

        test_project.write("src/generated/types.ts", "outdated");
        assert!(files[0].is_stale());
    }

    #[test]
    fn test_synthesis_errors_carry_output_name() {
        let (test_project, project, codegen) = setup(CONFIG);
        test_project.write("src/broken.graphql", "query Broken { nope }");

        let error = generate_project(&project, &codegen, test_project.root()).unwrap_err();
        assert!(error.to_string().contains("src/generated/types.ts"));
        assert_eq!(ExitCode::for_error(&error), ExitCode::GenerationError);
    }

    #[test]
    fn test_document_syntax_error_is_parse_error() {
        let (test_project, project, codegen) = setup(CONFIG);
        test_project.write("src/broken.graphql", "query Broken {");

        let error = generate_project(&project, &codegen, test_project.root()).unwrap_err();
        assert_eq!(ExitCode::for_error(&error), ExitCode::ParseError);
    }

    #[test]
    fn test_hooks_skip_when_nothing_written() {
        let hooks = CodegenHooks {
            after_all_file_write: vec!["definitely-not-a-real-command".to_string()],
        };
        assert!(run_hooks(&hooks, &[], Path::new(".")).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_hooks_receive_written_paths() {
        let test_project = TestProjectBuilder::new().with_file("a.ts", "").build();
        let hooks = CodegenHooks {
            after_all_file_write: vec!["cp".to_string()],
        };

        run_hooks(
            &hooks,
            &["a.ts".to_string(), "b.ts".to_string()],
            test_project.root(),
        )
        .unwrap();
        assert!(test_project.exists("b.ts"));
    }

    #[cfg(unix)]
    #[test]
    fn test_hook_quotes_are_not_interpreted() {
        let test_project = TestProjectBuilder::new().build();
        let hooks = CodegenHooks {
            after_all_file_write: vec!["touch 'a b'".to_string()],
        };

        run_hooks(&hooks, &["c.ts".to_string()], test_project.root()).unwrap();
        assert!(test_project.exists("'a"));
        assert!(test_project.exists("b'"));
        assert!(!test_project.exists("a b"));
        assert!(test_project.exists("c.ts"));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_hook_is_an_error() {
        let test_project = TestProjectBuilder::new().build();
        let hooks = CodegenHooks {
            after_all_file_write: vec!["false".to_string()],
        };
        let result = run_hooks(&hooks, &["a.ts".to_string()], test_project.root());
        assert!(result.is_err());
    }
}
