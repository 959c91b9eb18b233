//! Temporary on-disk projects.
//!
//! Config and CLI tests need real files: a `.graphqlrc.yaml`, schema files
//! and documents under one root. The builder writes them into a temporary
//! directory that is removed when the [`TestProject`] is dropped.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Builder for on-disk test projects.
///
/// # Example
///
/// ```ignore
/// use graphql_test_utils::TestProjectBuilder;
///
/// let project = TestProjectBuilder::new()
///     .with_config("schema: schema.graphql\ndocuments: \"src/**/*.graphql\"\n")
///     .with_file("schema.graphql", "type Query { hello: String }")
///     .with_file("src/hello.graphql", "query Hello { hello }")
///     .build();
/// ```
#[derive(Default)]
pub struct TestProjectBuilder {
    files: Vec<(String, String)>,
}

impl TestProjectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `.graphqlrc.yaml` at the project root.
    pub fn with_config(self, yaml: &str) -> Self {
        self.with_file(".graphqlrc.yaml", yaml)
    }

    /// Add a file at `relative_path`, creating parent directories as needed.
    pub fn with_file(mut self, relative_path: &str, content: &str) -> Self {
        self.files
            .push((relative_path.to_string(), content.to_string()));
        self
    }

    /// Write every file and return the project.
    pub fn build(self) -> TestProject {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        for (relative_path, content) in &self.files {
            let path = dir.path().join(relative_path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("failed to create parent dir");
            }
            fs::write(&path, content).expect("failed to write test file");
        }
        TestProject { dir }
    }
}

/// A project rooted in a temporary directory
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative_path: &str) -> PathBuf {
        self.dir.path().join(relative_path)
    }

    pub fn exists(&self, relative_path: &str) -> bool {
        self.path(relative_path).exists()
    }

    /// Read a file of the project, panicking if it is missing.
    pub fn read(&self, relative_path: &str) -> String {
        fs::read_to_string(self.path(relative_path))
            .unwrap_or_else(|e| panic!("failed to read {relative_path}: {e}"))
    }

    /// Overwrite (or create) a file of the project.
    pub fn write(&self, relative_path: &str, content: &str) {
        let path = self.path(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        fs::write(path, content).expect("failed to write test file");
    }
}
