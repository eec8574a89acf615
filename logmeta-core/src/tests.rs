//! End-to-end tests for logmeta-core: fixture projects on disk, full runs.

use crate::ast::build::*;
use crate::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

fn setup_temp_project() -> PathBuf {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir()
        .join("logmeta_tests")
        .join(format!("{}_{}", timestamp, id));

    if dir.exists() {
        fs::remove_dir_all(&dir).ok();
    }
    fs::create_dir_all(dir.join("lib")).unwrap();
    dir
}

fn write_ast(file: &Path, ast: &Ast) {
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(file, serde_json::to_string_pretty(ast).unwrap()).unwrap();
}

fn write_file(file: &Path, content: &str) {
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(file, content).unwrap();
}

fn worker(body: Vec<Ast>) -> Ast {
    defmodule("MyApp.Worker", 1, vec![def("perform", 2, body)])
}

fn lines(report: &FileReport) -> Vec<Option<u32>> {
    report.diagnostics.iter().map(|d| d.line).collect()
}

fn allowed_run(root: &Path) -> AnalysisResult {
    MetadataCheck::new(root)
        .metadata_keys(["error_code", "file"])
        .analyze()
        .unwrap()
}

// Scenario 1: allowed key only
#[test]
fn test_allowed_metadata_produces_nothing() {
    let root = setup_temp_project();
    write_ast(
        &root.join("lib/worker.ex.ast.json"),
        &worker(vec![qualified_call(
            "Logger",
            "error",
            3,
            vec![string("x"), keyword(vec![("error_code", atom("a"))])],
        )]),
    );

    let result = allowed_run(&root);
    assert_eq!(result.files.len(), 1);
    assert_eq!(result.issue_count(), 0);
}

// Scenario 2: one unknown key
#[test]
fn test_unknown_metadata_key_reported_once() {
    let root = setup_temp_project();
    write_ast(
        &root.join("lib/worker.ex.ast.json"),
        &worker(vec![qualified_call(
            "Logger",
            "error",
            3,
            vec![
                string("x"),
                keyword(vec![("error_code", atom("a")), ("user_id", int(7))]),
            ],
        )]),
    );

    let result = allowed_run(&root);
    assert_eq!(lines(&result.files[0]), vec![Some(3)]);
    assert_eq!(
        result.files[0].diagnostics[0].message,
        "Logger metadata will be ignored in production"
    );
}

// Scenario 3: Logger.metadata against default and extended allow-lists
#[test]
fn test_logger_metadata_allow_list() {
    let root = setup_temp_project();
    write_ast(
        &root.join("lib/plug.ex.ast.json"),
        &worker(vec![qualified_call(
            "Logger",
            "metadata",
            3,
            vec![keyword(vec![("request_id", string("abc"))])],
        )]),
    );

    let default_run = MetadataCheck::new(&root).analyze().unwrap();
    assert_eq!(default_run.issue_count(), 1);

    let extended = MetadataCheck::new(&root)
        .metadata_keys(["request_id"])
        .analyze()
        .unwrap();
    assert_eq!(extended.issue_count(), 0);
}

// Scenario 4: import gating
#[test]
fn test_import_gates_unqualified_calls() {
    let root = setup_temp_project();
    let bad_call = || call("error", 4, vec![string("x"), keyword(vec![("user", int(1))])]);
    write_ast(
        &root.join("lib/with_import.ex.ast.json"),
        &worker(vec![import("Logger", 3), bad_call()]),
    );
    write_ast(
        &root.join("lib/without_import.ex.ast.json"),
        &worker(vec![bad_call()]),
    );
    write_ast(
        &root.join("lib/clean_import.ex.ast.json"),
        &worker(vec![
            import("Logger", 3),
            call("error", 4, vec![string("x"), keyword(vec![("file", string("a.ex"))])]),
        ]),
    );

    let result = allowed_run(&root);
    let by_name = |name: &str| {
        result
            .files
            .iter()
            .find(|f| f.path.ends_with(name))
            .unwrap()
            .clone()
    };
    assert_eq!(lines(&by_name("with_import.ex.ast.json")), vec![Some(4)]);
    assert!(by_name("without_import.ex.ast.json").diagnostics.is_empty());
    assert!(by_name("clean_import.ex.ast.json").diagnostics.is_empty());
}

// Scenario 5: two-argument Logger.log is never analysed
#[test]
fn test_log_arity_two_is_skipped() {
    let root = setup_temp_project();
    write_ast(
        &root.join("lib/worker.ex.ast.json"),
        &worker(vec![qualified_call(
            "Logger",
            "log",
            3,
            vec![atom("info"), var("anything", 3)],
        )]),
    );
    assert_eq!(allowed_run(&root).issue_count(), 0);
}

#[test]
fn test_diagnostics_in_line_order_per_file() {
    let root = setup_temp_project();
    let bad = |line| qualified_call("Logger", "info", line, vec![string("x"), var("meta", line)]);
    write_ast(
        &root.join("lib/worker.ex.ast.json"),
        &worker(vec![bad(5), bad(9), bad(14)]),
    );
    let result = allowed_run(&root);
    assert_eq!(lines(&result.files[0]), vec![Some(5), Some(9), Some(14)]);
}

#[test]
fn test_files_sorted_by_path() {
    let root = setup_temp_project();
    for name in ["c", "a", "b"] {
        write_ast(
            &root.join(format!("lib/{}.ex.ast.json", name)),
            &worker(vec![]),
        );
    }
    let result = allowed_run(&root);
    let names: Vec<_> = result
        .files
        .iter()
        .map(|f| f.path.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["a.ex.ast.json", "b.ex.ast.json", "c.ex.ast.json"]);
}

#[test]
fn test_config_file_supplies_defaults() {
    let root = setup_temp_project();
    write_file(
        &root.join("logmeta.toml"),
        r#"
[logger]
metadata = ["request_id"]

[rule]
ignore_functions = ["debug"]
"#,
    );
    write_ast(
        &root.join("lib/worker.ex.ast.json"),
        &worker(vec![
            qualified_call(
                "Logger",
                "info",
                3,
                vec![string("x"), keyword(vec![("request_id", int(1))])],
            ),
            qualified_call("Logger", "debug", 4, vec![string("x"), var("meta", 4)]),
            qualified_call("Logger", "warning", 5, vec![string("x"), var("meta", 5)]),
        ]),
    );

    let result = MetadataCheck::new(&root).analyze().unwrap();
    assert_eq!(lines(&result.files[0]), vec![Some(5)]);
}

#[test]
fn test_builder_overrides_config_file_keys() {
    let root = setup_temp_project();
    write_file(&root.join("logmeta.toml"), "[logger]\nmetadata = [\"request_id\"]\n");
    write_ast(
        &root.join("lib/worker.ex.ast.json"),
        &worker(vec![qualified_call(
            "Logger",
            "info",
            3,
            vec![string("x"), keyword(vec![("request_id", int(1))])],
        )]),
    );

    let result = MetadataCheck::new(&root)
        .metadata_keys(["file"])
        .analyze()
        .unwrap();
    assert_eq!(result.issue_count(), 1);
}

#[test]
fn test_all_metadata_accepts_any_keyword() {
    let root = setup_temp_project();
    write_file(&root.join("logmeta.toml"), "[logger]\nmetadata = \"all\"\n");
    write_ast(
        &root.join("lib/worker.ex.ast.json"),
        &worker(vec![
            qualified_call(
                "Logger",
                "info",
                3,
                vec![string("x"), keyword(vec![("anything", int(1))])],
            ),
            qualified_call("Logger", "info", 4, vec![string("x"), var("meta", 4)]),
        ]),
    );

    let result = MetadataCheck::new(&root).analyze().unwrap();
    assert_eq!(lines(&result.files[0]), vec![Some(4)]);
}

#[test]
fn test_invalid_config_is_an_error() {
    let root = setup_temp_project();
    write_file(&root.join("logmeta.toml"), "[logger\nmetadata = 3");
    let err = MetadataCheck::new(&root).analyze().unwrap_err();
    assert!(matches!(err, LogmetaError::Config { .. }));
}

#[test]
fn test_undecodable_file_is_skipped() {
    let root = setup_temp_project();
    write_file(&root.join("lib/broken.ex.ast.json"), "{ not json");
    write_ast(
        &root.join("lib/ok.ex.ast.json"),
        &worker(vec![qualified_call(
            "Logger",
            "info",
            3,
            vec![string("x"), var("meta", 3)],
        )]),
    );

    let result = allowed_run(&root);
    assert_eq!(result.files.len(), 1);
    assert_eq!(result.skipped.len(), 1);
    assert!(result.skipped[0].path.ends_with("broken.ex.ast.json"));
    assert_eq!(result.issue_count(), 1);
}

#[test]
fn test_build_and_deps_are_not_checked() {
    let root = setup_temp_project();
    let bad = worker(vec![qualified_call(
        "Logger",
        "info",
        3,
        vec![string("x"), var("meta", 3)],
    )]);
    write_ast(&root.join("deps/plug/lib/plug.ex.ast.json"), &bad);
    write_ast(&root.join("_build/dev/lib/gen.ex.ast.json"), &bad);
    write_ast(&root.join("lib/app.ex.ast.json"), &worker(vec![]));

    let result = allowed_run(&root);
    assert_eq!(result.files.len(), 1);
    assert_eq!(result.issue_count(), 0);
}

#[test]
fn test_check_file_matches_check_ast() {
    let root = setup_temp_project();
    let tree = worker(vec![
        import("Logger", 3),
        call("warn", 4, vec![string("x"), var("meta", 4)]),
    ]);
    let path = root.join("lib/worker.ex.ast.json");
    write_ast(&path, &tree);

    let config = CheckConfig::default();
    let report = check_file(&path, &config).unwrap();
    assert_eq!(report.diagnostics, check_ast(&tree, &config));
    assert_eq!(lines(&report), vec![Some(4)]);
}

#[test]
fn test_custom_logger_module_from_config() {
    let root = setup_temp_project();
    write_file(&root.join("logmeta.toml"), "logger_module = \"MyApp.Log\"\n");
    write_ast(
        &root.join("lib/worker.ex.ast.json"),
        &worker(vec![
            qualified_call("MyApp.Log", "info", 3, vec![string("x"), var("meta", 3)]),
            qualified_call("Logger", "info", 4, vec![string("x"), var("meta", 4)]),
        ]),
    );

    let result = MetadataCheck::new(&root).analyze().unwrap();
    assert_eq!(lines(&result.files[0]), vec![Some(3)]);
}
