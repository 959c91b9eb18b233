//! End-to-end runs of the `graphql codegen` binary.

use graphql_test_utils::fixtures::{BASIC_QUERY, BASIC_SCHEMA};
use graphql_test_utils::{TestProject, TestProjectBuilder};
use std::process::{Command, Output};

const CONFIG: &str = "schema: schema.graphql
documents: 'src/**/*.graphql'
extensions:
  codegen:
    generates:
      src/generated/graphql.ts:
        plugins: [typescript, typescript-operations]
";

fn project(config: &str) -> TestProject {
    TestProjectBuilder::new()
        .with_config(config)
        .with_file("schema.graphql", BASIC_SCHEMA)
        .with_file("src/user.graphql", BASIC_QUERY)
        .build()
}

fn graphql(project: &TestProject, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_graphql"))
        .arg("--config")
        .arg(project.path(".graphqlrc.yaml"))
        .args(["--quiet", "--no-color"])
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_codegen_writes_output() {
    let project = project(CONFIG);

    let output = graphql(&project, &["codegen"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let generated = project.read("src/generated/graphql.ts");
    assert!(generated.starts_with("/* This file was generated by `graphql codegen`."));
    assert!(generated.contains("export type GetUserQueryVariables = { id: Scalars['ID'] };"));
}

#[test]
fn test_check_reports_stale_then_clean() {
    let project = project(CONFIG);

    let output = graphql(&project, &["codegen", "--check"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("src/generated/graphql.ts is out of date"));
    assert!(!project.exists("src/generated/graphql.ts"));

    assert!(graphql(&project, &["codegen"]).status.success());
    assert!(graphql(&project, &["codegen", "--check"]).status.success());
}

#[test]
fn test_unknown_field_exits_with_generation_error() {
    let project = project(CONFIG);
    project.write("src/broken.graphql", "query Broken { nope }");

    let output = graphql(&project, &["codegen"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Cannot query field \"nope\" on type \"Query\""));
}

#[test]
fn test_missing_codegen_section_exits_with_config_error() {
    let project = project("schema: schema.graphql\n");

    let output = graphql(&project, &["codegen"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("extensions.codegen"));
}

#[test]
fn test_remote_schema_exits_with_config_error() {
    let project = project(&CONFIG.replace(
        "schema: schema.graphql",
        "schema:\n  url: https://example.com/graphql",
    ));

    let output = graphql(&project, &["codegen"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("remote schema"));
}

#[test]
fn test_invalid_schema_exits_with_schema_error() {
    let project = project(CONFIG);
    project.write("schema.graphql", "type Query {");

    let output = graphql(&project, &["codegen"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_document_syntax_error_exits_with_parse_error() {
    let project = project(CONFIG);
    project.write("src/broken.graphql", "query Broken {");

    let output = graphql(&project, &["codegen"]);
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn test_unknown_project_suggests_closest() {
    let project = TestProjectBuilder::new()
        .with_config("projects:\n  web:\n    schema: schema.graphql\n  mobile:\n    schema: schema.graphql\n")
        .build();

    let output = graphql(&project, &["--project", "webb", "codegen"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Did you mean 'web'?"));
}
