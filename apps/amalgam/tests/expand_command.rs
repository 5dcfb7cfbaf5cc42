//! Integration tests for `amalgam expand`.

use amalgam_core::fixture::{self, EXPECTED_PARTIAL_OUTPUT, FixtureTree};
use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

/// Runs the binary with a private HOME so no user config leaks in.
fn amalgam_cmd(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("amalgam");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("AMALGAM_INCLUDE_PATH")
        .env_remove("AMALGAM_MAX_DEPTH")
        .env_remove("AMALGAM_LOG_LEVEL");
    cmd
}

fn fixture_tree(temp: &TempDir) -> FixtureTree {
    fixture::write_fixture_tree(&temp.path().join("sources")).unwrap()
}

fn expand_args(tree: &FixtureTree, output: &Path) -> Vec<String> {
    let mut args = vec![
        "expand".to_string(),
        tree.entry.display().to_string(),
        "-o".to_string(),
        output.display().to_string(),
    ];
    for dir in tree.search_path.iter() {
        args.push("-I".to_string());
        args.push(dir.display().to_string());
    }
    args
}

#[test]
fn test_reference_tree_fails_at_dummy_include() {
    let temp = TempDir::new().unwrap();
    let tree = fixture_tree(&temp);
    let output = temp.path().join("out.cpp");

    amalgam_cmd(temp.path())
        .args(expand_args(&tree, &output))
        .assert()
        .code(1)
        .stdout(format!(
            "unknown include file dummy.txt at file {} at line 8\n",
            tree.entry.display()
        ))
        .stderr(predicate::str::is_empty());

    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        EXPECTED_PARTIAL_OUTPUT
    );
}

#[test]
fn test_reference_tree_without_dummy_succeeds() {
    let temp = TempDir::new().unwrap();
    let tree = fixture_tree(&temp);
    let entry = std::fs::read_to_string(&tree.entry).unwrap();
    std::fs::write(&tree.entry, entry.replace("#   include<dummy.txt>\n", "")).unwrap();
    let output = temp.path().join("out.cpp");

    amalgam_cmd(temp.path())
        .args(expand_args(&tree, &output))
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("OK"))
        .stderr(predicate::str::contains("6 files"));

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.starts_with(EXPECTED_PARTIAL_OUTPUT));
    assert!(written.ends_with("}\n"));
}

#[test]
fn test_quiet_suppresses_summary() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("a.c");
    std::fs::write(&input, "int main;\n").unwrap();

    amalgam_cmd(temp.path())
        .args(["expand", "--quiet", "-o"])
        .arg(temp.path().join("out.c"))
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_missing_input_is_setup_failure() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("out.c");

    amalgam_cmd(temp.path())
        .arg("expand")
        .arg(temp.path().join("missing.c"))
        .arg("-o")
        .arg(&output)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("cannot open input file"));

    assert!(!output.exists());
}

#[test]
fn test_verbose_prints_include_chain() {
    let temp = TempDir::new().unwrap();
    let tree = fixture_tree(&temp);
    let output = temp.path().join("out.cpp");

    // Only the first search dir: lib/std2.h is unresolved inside dir1/d.h.
    amalgam_cmd(temp.path())
        .args([
            "expand",
            "-v",
            &tree.entry.display().to_string(),
            "-o",
            &output.display().to_string(),
            "-I",
            &tree.search_path.as_slice()[0].display().to_string(),
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "unknown include file std2.h at file",
        ))
        .stdout(predicate::str::contains("d.h at line 2"))
        .stderr(predicate::str::contains(format!(
            "included from {}:4",
            tree.entry.display()
        )));
}

#[test]
fn test_configured_search_paths_are_used() {
    let temp = TempDir::new().unwrap();
    let tree = fixture_tree(&temp);
    let output = temp.path().join("out.cpp");
    let project = temp.path().join("project");
    std::fs::create_dir_all(&project).unwrap();
    let config = serde_json::json!({
        "include": { "search_paths": tree.search_path.as_slice() }
    });
    std::fs::write(project.join("amalgam.json"), config.to_string()).unwrap();

    amalgam_cmd(temp.path())
        .arg("expand")
        .arg(&tree.entry)
        .arg("-o")
        .arg(&output)
        .arg("--path")
        .arg(&project)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("unknown include file dummy.txt"));

    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        EXPECTED_PARTIAL_OUTPUT
    );
}

#[test]
fn test_include_dir_flag_precedes_config() {
    let temp = TempDir::new().unwrap();
    let first = temp.path().join("first");
    let second = temp.path().join("second");
    std::fs::create_dir_all(&first).unwrap();
    std::fs::create_dir_all(&second).unwrap();
    std::fs::write(first.join("x.h"), "from first\n").unwrap();
    std::fs::write(second.join("x.h"), "from second\n").unwrap();
    let input = temp.path().join("a.c");
    std::fs::write(&input, "#include <x.h>\n").unwrap();
    let config = serde_json::json!({ "include": { "search_paths": [second] } });
    std::fs::write(temp.path().join("amalgam.json"), config.to_string()).unwrap();
    let output = temp.path().join("out.c");

    amalgam_cmd(temp.path())
        .current_dir(temp.path())
        .arg("expand")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("-I")
        .arg(&first)
        .assert()
        .success();

    assert_eq!(std::fs::read_to_string(&output).unwrap(), "from first\n");
}

#[test]
fn test_cycle_hits_depth_limit() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("a.h"), "#include \"b.h\"\n").unwrap();
    std::fs::write(temp.path().join("b.h"), "#include \"a.h\"\n").unwrap();
    let output = temp.path().join("out.c");

    amalgam_cmd(temp.path())
        .arg("expand")
        .arg(temp.path().join("a.h"))
        .arg("-o")
        .arg(&output)
        .args(["--max-depth", "8"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("include depth limit of 8 exceeded"));
}

#[test]
fn test_env_max_depth_is_honored() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("b.h"), "#include \"c.h\"\n").unwrap();
    std::fs::write(temp.path().join("c.h"), "c\n").unwrap();
    let input = temp.path().join("a.c");
    std::fs::write(&input, "#include \"b.h\"\n").unwrap();

    amalgam_cmd(temp.path())
        .env("AMALGAM_MAX_DEPTH", "1")
        .arg("expand")
        .arg(&input)
        .arg("-o")
        .arg(temp.path().join("out.c"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("include depth limit of 1 exceeded by c.h"));
}

#[test]
fn test_max_depth_flag_overrides_env() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("b.h"), "#include \"c.h\"\n").unwrap();
    std::fs::write(temp.path().join("c.h"), "c\n").unwrap();
    let input = temp.path().join("a.c");
    std::fs::write(&input, "#include \"b.h\"\n").unwrap();
    let output = temp.path().join("out.c");

    amalgam_cmd(temp.path())
        .env("AMALGAM_MAX_DEPTH", "1")
        .arg("expand")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--max-depth", "2"])
        .assert()
        .success();

    assert_eq!(std::fs::read_to_string(&output).unwrap(), "c\n");
}

#[test]
fn test_unresolved_include_is_reported_once() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("a.c");
    std::fs::write(&input, "x\n#include <missing.h>\n").unwrap();

    amalgam_cmd(temp.path())
        .arg("expand")
        .arg(&input)
        .arg("-o")
        .arg(temp.path().join("out.c"))
        .assert()
        .code(1)
        .stdout(format!(
            "unknown include file missing.h at file {} at line 2\n",
            input.display()
        ))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_huge_configured_depth_on_cycle_fails_cleanly() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("b.h");
    std::fs::write(&input, "#include \"b.h\"\n").unwrap();
    std::fs::write(
        temp.path().join("amalgam.json"),
        r#"{"include": {"max_depth": 10000000}}"#,
    )
    .unwrap();

    amalgam_cmd(temp.path())
        .current_dir(temp.path())
        .arg("expand")
        .arg(&input)
        .arg("-o")
        .arg(temp.path().join("out.c"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "include depth limit of 10000 exceeded by b.h",
        ))
        .stderr(predicate::str::contains("include.max_depth.too_large"));
}

#[test]
fn test_max_depth_flag_at_ceiling_on_cycle_fails_cleanly() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("b.h");
    std::fs::write(&input, "#include \"b.h\"\n").unwrap();

    amalgam_cmd(temp.path())
        .arg("expand")
        .arg(&input)
        .arg("-o")
        .arg(temp.path().join("out.c"))
        .args(["--max-depth", "10000"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("include depth limit of 10000 exceeded"));
}

#[test]
fn test_max_depth_flag_above_ceiling_is_rejected() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("a.c");
    std::fs::write(&input, "x\n").unwrap();

    amalgam_cmd(temp.path())
        .arg("expand")
        .arg(&input)
        .arg("-o")
        .arg(temp.path().join("out.c"))
        .args(["--max-depth", "20000"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--max-depth"));
}
