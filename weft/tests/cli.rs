//! Command-line driver tests.

use std::path::Path;
use std::process::{Command, Output};

const SNAPSHOT: &str = r#"<snapshot>
    <declaration name="Card" namespace="App" partial="true">
        <member kind="field" name="_title" type="string">
            <annotation name="Observable"/>
        </member>
    </declaration>
</snapshot>"#;

fn weft(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_weft"))
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run weft")
}

#[test]
fn test_generate_then_check() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("snapshot.xml"), SNAPSHOT).expect("Failed to write snapshot");

    let check = weft(&["generate", "snapshot.xml", "--out", "gen", "--check"], dir.path());
    assert!(!check.status.success());

    let output = weft(&["generate", "snapshot.xml", "--out", "gen"], dir.path());
    assert!(output.status.success());
    let text = std::fs::read_to_string(dir.path().join("gen").join("App.Card.g.cs"))
        .expect("Failed to read unit");
    assert!(text.contains("OnPropertyChanged(\"Title\");"));

    let check = weft(&["generate", "snapshot.xml", "--out", "gen", "--check"], dir.path());
    assert!(check.status.success());
}

#[test]
fn test_generate_with_config() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("snapshot.xml"), SNAPSHOT).expect("Failed to write snapshot");
    std::fs::write(
        dir.path().join("weft.toml"),
        "runtime-namespace = \"Acme.Runtime\"\n",
    )
    .expect("Failed to write config");

    let output = weft(
        &["generate", "snapshot.xml", "--out", "gen", "--config", "weft.toml"],
        dir.path(),
    );
    assert!(output.status.success());
    let text = std::fs::read_to_string(dir.path().join("gen").join("App.Card.g.cs"))
        .expect("Failed to read unit");
    assert!(text.contains("using Acme.Runtime;"));
}

#[test]
fn test_inspect_prints_flags() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("snapshot.xml"), SNAPSHOT).expect("Failed to write snapshot");

    let output = weft(&["inspect", "snapshot.xml"], dir.path());
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("App.Card\n  flags: observable-model\n"));
}

#[test]
fn test_missing_snapshot_fails() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = weft(&["inspect", "missing.xml"], dir.path());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read snapshot"));
}

#[test]
fn test_name_collision_fails_generate() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let snapshot = SNAPSHOT.replace(
        "</declaration>",
        r#"    <member kind="field" name="title" type="string">
            <annotation name="Observable"/>
        </member>
    </declaration>"#,
    );
    std::fs::write(dir.path().join("snapshot.xml"), snapshot).expect("Failed to write snapshot");

    let output = weft(&["generate", "snapshot.xml", "--out", "gen"], dir.path());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("error[WEFT002]"));
    assert!(dir.path().join("gen").join("App.Card.g.cs").exists());
}
