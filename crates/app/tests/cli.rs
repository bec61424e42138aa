use assert_cmd::Command;

fn portfolio() -> Command {
    Command::cargo_bin("portfolio").unwrap()
}

#[test]
fn check_passes_without_geometry() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");

    let output = portfolio()
        .args(["check", "--geometry"])
        .arg(&missing)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("dataset: 52 records for 52 districts"));
    assert!(stdout.contains("geometry: unavailable"));
}

#[test]
fn serve_rejects_port_zero_before_binding() {
    let output = portfolio()
        .args(["serve", "--port", "0"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("--port"));
}

#[test]
fn subcommand_is_required() {
    let output = portfolio().output().unwrap();
    assert!(!output.status.success());
}
