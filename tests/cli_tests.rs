use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

const BINARY_NAME: &str = "mustache";

fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new("cargo")
        .args(["run", "--bin", BINARY_NAME, "--"])
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn run_cli_with_stdin(args: &[&str], stdin_input: &str) -> std::process::Output {
    let mut cmd = Command::new("cargo")
        .args(["run", "--bin", BINARY_NAME, "--"])
        .args(args)
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");

    if let Some(stdin) = cmd.stdin.as_mut() {
        stdin
            .write_all(stdin_input.as_bytes())
            .expect("Failed to write to stdin");
    }

    cmd.wait_with_output().expect("Failed to read stdout")
}

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

#[test]
fn test_renders_template_against_json_file() {
    let json = write_temp(r#"{"name":"Jo"}"#);
    let template = write_temp("Hello {{name}}!");

    let output = run_cli(&[
        json.path().to_str().unwrap(),
        template.path().to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Hello Jo!");
}

#[test]
fn test_reads_json_from_stdin() {
    let template = write_temp("Hello {{name}}!");
    let output = run_cli_with_stdin(
        &["-", template.path().to_str().unwrap()],
        r#"{"name":"Remote"}"#,
    );
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Hello Remote!");
}

#[test]
fn test_renders_multiple_templates_in_order() {
    let json = write_temp(r#"{"name":"A"}"#);
    let t1 = write_temp("1:{{name}} ");
    let t2 = write_temp("2:{{name}}");

    let output = run_cli(&[
        json.path().to_str().unwrap(),
        t1.path().to_str().unwrap(),
        t2.path().to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1:A 2:A");
}

#[test]
fn test_missing_name_fails_by_default() {
    let json = write_temp("{}");
    let template = write_temp("Hello {{name}}!");

    let output = run_cli(&[
        json.path().to_str().unwrap(),
        template.path().to_str().unwrap(),
    ]);
    assert!(!output.status.success());
}

#[test]
fn test_lenient_flag_renders_empty_for_missing_name() {
    let json = write_temp("{}");
    let template = write_temp("Hello {{name}}!");

    let output = run_cli(&[
        "--lenient",
        json.path().to_str().unwrap(),
        template.path().to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Hello !");
}

#[test]
fn test_partials_dir_resolves_partial() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("inner.mustache"), "[{{v}}]").unwrap();

    let json = write_temp(r#"{"v":42}"#);
    let template = write_temp("{{>inner}}");

    let output = run_cli(&[
        "--partials-dir",
        dir.path().to_str().unwrap(),
        json.path().to_str().unwrap(),
        template.path().to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "[42]");
}

#[test]
fn test_invalid_json_fails_with_diagnostic() {
    let json = write_temp("not json");
    let template = write_temp("Hello {{name}}!");

    let output = run_cli(&[
        json.path().to_str().unwrap(),
        template.path().to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(!output.stderr.is_empty());
}
