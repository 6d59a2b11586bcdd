use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn fixture_path(file: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join(file)
}

fn temp_file(name: &str, body: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("blockdoc_validate_{}_{name}", std::process::id()));
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn validate_ok_exit_0() {
    let input = fixture_path("document.json");

    let mut cmd = cargo_bin_cmd!("blockdoc");
    cmd.args(["validate", input.to_str().unwrap()]);
    cmd.assert().success().code(0).stdout("OK\n");
}

#[test]
fn validate_schema_violation_exit_2() {
    let input = fixture_path("schema-invalid.json");

    let mut cmd = cargo_bin_cmd!("blockdoc");
    cmd.args(["validate", input.to_str().unwrap()]);
    cmd.assert()
        .failure()
        .code(2)
        .stdout("")
        .stderr(predicate::str::is_empty().not());
}

#[test]
fn validate_variant_editor_cannot_open_exit_3() {
    // Schema-valid, but horizontalRule has no editor counterpart.
    let input = fixture_path("unsupported-variant.json");

    let mut cmd = cargo_bin_cmd!("blockdoc");
    cmd.args(["validate", input.to_str().unwrap()]);
    cmd.assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("horizontalRule"));
}

#[test]
fn validate_missing_file_exit_1() {
    let input = fixture_path("does-not-exist.json");

    let mut cmd = cargo_bin_cmd!("blockdoc");
    cmd.args(["validate", input.to_str().unwrap()]);
    cmd.assert().failure().code(1);
}

#[test]
fn validate_malformed_json_exit_1() {
    let input = temp_file("garbage.json", "[{\"type\": ");

    let mut cmd = cargo_bin_cmd!("blockdoc");
    cmd.args(["validate", input.to_str().unwrap()]);
    cmd.assert().failure().code(1);

    let _ = std::fs::remove_file(&input);
}

#[test]
fn validate_accepts_content_record_and_null() {
    let record = temp_file(
        "record.json",
        r#"{"title":"Draft","blocks":[{"type":"paragraph","content":[{"type":"text","text":"hi"}]}]}"#,
    );
    let null = temp_file("null.json", "null");

    for input in [&record, &null] {
        let mut cmd = cargo_bin_cmd!("blockdoc");
        cmd.args(["validate", input.to_str().unwrap()]);
        cmd.assert().success().stdout("OK\n");
    }

    let _ = std::fs::remove_file(&record);
    let _ = std::fs::remove_file(&null);
}
