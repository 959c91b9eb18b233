//! Watch mode for `graphql codegen`.
//!
//! Uses the `notify` crate for cross-platform file system events and
//! debounces them so a burst of saves triggers a single regeneration.

use crate::commands::codegen::{generate_and_write, CodegenConfig};
use crate::OutputOptions;
use anyhow::{Context, Result};
use colored::Colorize;
use graphql_config::{expand_braces, ProjectConfig};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

/// Debounce duration for file changes (milliseconds)
const DEBOUNCE_MS: u64 = 100;

/// Watch configuration
pub struct WatchConfig {
    pub project_config: ProjectConfig,
    pub codegen: CodegenConfig,
    pub base_dir: PathBuf,
    pub output_opts: OutputOptions,
}

/// File watcher that regenerates outputs on schema and document changes
pub struct FileWatcher {
    config: WatchConfig,
    /// `base_dir` canonicalized, to compare with event paths
    root: PathBuf,
    watcher: RecommendedWatcher,
    rx: Receiver<Result<Event, notify::Error>>,
    watch_paths: BTreeSet<PathBuf>,
}

impl FileWatcher {
    /// Create a new file watcher
    pub fn new(config: WatchConfig) -> Result<Self> {
        let root = config
            .base_dir
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", config.base_dir.display()))?;
        let watch_paths = collect_watch_paths(&config.project_config, &root);

        let (tx, rx) = mpsc::channel();
        let watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })
        .context("Failed to create file watcher")?;

        Ok(Self {
            config,
            root,
            watcher,
            rx,
            watch_paths,
        })
    }

    /// Start watching for file changes
    pub fn start(&mut self) -> Result<()> {
        for path in &self.watch_paths {
            tracing::debug!(path = %path.display(), "Watching");
            self.watcher
                .watch(path, RecursiveMode::Recursive)
                .with_context(|| format!("Failed to watch path: {}", path.display()))?;
        }
        Ok(())
    }

    /// Run the watch loop until the event channel closes
    pub fn run(&mut self) {
        self.print_header();
        self.regenerate(&[]);

        let mut pending_changes: BTreeSet<PathBuf> = BTreeSet::new();
        let mut last_change_time: Option<Instant> = None;
        let debounce = Duration::from_millis(DEBOUNCE_MS);

        loop {
            let timeout = if last_change_time.is_some() {
                debounce
            } else {
                Duration::from_secs(60)
            };

            match self.rx.recv_timeout(timeout) {
                Ok(Ok(event)) => {
                    for path in event.paths {
                        if is_relevant_change(
                            &self.config.project_config,
                            &self.config.codegen,
                            &self.root,
                            &path,
                        ) {
                            pending_changes.insert(path);
                            last_change_time = Some(Instant::now());
                        }
                    }
                }
                Ok(Err(e)) => {
                    eprintln!("{} {}", "Watch error:".red(), e);
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    if last_change_time.is_some_and(|last| last.elapsed() >= debounce)
                        && !pending_changes.is_empty()
                    {
                        let changed: Vec<PathBuf> = std::mem::take(&mut pending_changes)
                            .into_iter()
                            .collect();
                        last_change_time = None;
                        self.regenerate(&changed);
                    }
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    break;
                }
            }
        }
    }

    fn regenerate(&self, changed_files: &[PathBuf]) {
        let start = Instant::now();
        self.print_changes(changed_files);
        let result = generate_and_write(
            &self.config.project_config,
            &self.config.codegen,
            &self.config.base_dir,
            self.config.output_opts,
        );
        self.print_result(&result, start.elapsed());
    }

    fn print_header(&self) {
        if !self.config.output_opts.show_info {
            return;
        }
        println!();
        println!(
            "{} Watching for changes... (press {} to stop)",
            "●".cyan(),
            "Ctrl+C".bold()
        );
        println!(
            "  Regenerating {} output file(s) on schema and document changes",
            self.config.codegen.generates.len().to_string().cyan()
        );
        println!();
    }

    fn print_changes(&self, changed_files: &[PathBuf]) {
        if !self.config.output_opts.show_info || changed_files.is_empty() {
            return;
        }
        let timestamp = format!("[{}]", chrono_now()).dimmed();
        println!();
        for file in changed_files {
            let shown = file
                .strip_prefix(&self.root)
                .unwrap_or(file)
                .display()
                .to_string();
            println!("{timestamp} {} changed", shown.cyan());
        }
    }

    fn print_result(&self, result: &Result<Vec<String>>, duration: Duration) {
        let timestamp = format!("[{}]", chrono_now()).dimmed();
        match result {
            Ok(written) if self.config.output_opts.show_info => {
                if written.is_empty() {
                    println!("{timestamp} {}", "✓ Generated files are up to date".green().bold());
                } else {
                    println!(
                        "{timestamp} {}",
                        format!("✓ Wrote {} file(s)", written.len()).green().bold()
                    );
                }
                println!("  {} {:.2}s", "⏱".dimmed(), duration.as_secs_f64());
            }
            Ok(_) => {}
            Err(error) => {
                eprintln!("{timestamp} {}", format!("✗ {error:#}").red());
            }
        }
    }
}

/// Whether a changed path should trigger regeneration.
///
/// Generated outputs never do, even when they match a document pattern.
fn is_relevant_change(
    project_config: &ProjectConfig,
    codegen: &CodegenConfig,
    root: &Path,
    path: &Path,
) -> bool {
    let Ok(relative) = path.strip_prefix(root) else {
        return false;
    };
    if codegen
        .generates
        .keys()
        .any(|output| Path::new(output.trim_start_matches("./")) == relative)
    {
        return false;
    }
    project_config.matches(relative)
}

/// Directories to watch: the deepest existing directory above each schema
/// path and document pattern, with nested directories folded into their
/// ancestors.
fn collect_watch_paths(project_config: &ProjectConfig, root: &Path) -> BTreeSet<PathBuf> {
    let mut paths = BTreeSet::new();

    let patterns = project_config
        .schema
        .paths()
        .into_iter()
        .chain(project_config.document_patterns());
    for pattern in patterns {
        for expanded in expand_braces(pattern) {
            let static_prefix: PathBuf = Path::new(&expanded)
                .components()
                .take_while(|component| match component {
                    Component::Normal(part) => !part
                        .to_string_lossy()
                        .contains(['*', '?', '[', ']']),
                    _ => true,
                })
                .collect();

            let mut dir = root.join(static_prefix);
            while !dir.is_dir() {
                match dir.parent() {
                    Some(parent) => dir = parent.to_path_buf(),
                    None => break,
                }
            }
            if dir.starts_with(root) {
                paths.insert(dir);
            }
        }
    }

    if paths.is_empty() {
        paths.insert(root.to_path_buf());
    }

    let all = paths.clone();
    paths.retain(|path| !all.iter().any(|other| other != path && path.starts_with(other)));
    paths
}

/// Get current time as string
fn chrono_now() -> String {
    use std::time::SystemTime;
    let secs = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let hours = (secs / 3600) % 24;
    let minutes = (secs / 60) % 60;
    let seconds = secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
