use std::fs;

use assert_cmd::Command;
use test_support::alice;

fn fwdctl() -> Command {
    Command::cargo_bin("fwdctl").expect("fwdctl binary")
}

#[test]
fn help_runs() {
    fwdctl().arg("--help").assert().success();
}

#[test]
fn verify_accepts_signed_hex_payload() {
    let payload = hex::encode(alice().sign("topsecret"));
    let output = fwdctl()
        .args(["verify", "--secret", "topsecret", "--json", "--hex", &payload])
        .output()
        .expect("run");
    assert!(output.status.success());

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(body["verified"], true);
    assert_eq!(body["username"], "Alice");
    assert_eq!(body["uuid"], "01020304-0506-0708-090a-0b0c0d0e0f10");
    assert_eq!(body["remote_address"], "203.0.113.5");
}

#[test]
fn verify_rejects_wrong_secret_with_exit_code_two() {
    let payload = hex::encode(alice().sign("topsecret"));
    let output = fwdctl()
        .args(["verify", "--secret", "wrong", "--hex", &payload])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stdout).contains("signature does not match"));
}

#[test]
fn verify_reads_secret_from_config_and_payload_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("forwarding.toml");
    let payload = dir.path().join("payload.bin");
    fs::write(&config, "secret = \"from-file\"\n").expect("write config");
    fs::write(&payload, alice().sign("from-file")).expect("write payload");

    fwdctl()
        .arg("verify")
        .arg("--config")
        .arg(&config)
        .arg("--file")
        .arg(&payload)
        .assert()
        .success();
}

#[test]
fn verify_with_config_secret_rejects_other_signers() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("forwarding.toml");
    fs::write(&config, "secret = \"from-file\"\n").expect("write config");
    let payload = hex::encode(alice().sign("someone-else"));

    let output = fwdctl()
        .arg("verify")
        .arg("--config")
        .arg(&config)
        .args(["--hex", &payload])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn verify_refuses_placeholder_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("forwarding.toml");
    fs::write(&config, "secret = \"CHANGE_ME\"\n").expect("write config");
    let payload = hex::encode(alice().sign("CHANGE_ME"));

    fwdctl()
        .arg("verify")
        .arg("--config")
        .arg(&config)
        .args(["--hex", &payload])
        .assert()
        .failure();
}

#[test]
fn init_config_writes_defaults_once() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config").join("modern-forwarding.toml");

    fwdctl().arg("init-config").arg("--path").arg(&path).assert().success();
    assert!(fs::read_to_string(&path).expect("read").contains("CHANGE_ME"));

    fwdctl().arg("init-config").arg("--path").arg(&path).assert().failure();
}

#[test]
fn uuid_record_then_lookup() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db = dir.path().join("uuid-mappings.db");

    fwdctl()
        .args(["uuid", "record", "--username", "Notch"])
        .args(["--uuid", "069a79f4-44e9-4726-a5be-fca90e38aaf5"])
        .arg("--db")
        .arg(&db)
        .assert()
        .success();

    let output = fwdctl()
        .args(["uuid", "lookup", "--username", "NOTCH", "--db"])
        .arg(&db)
        .output()
        .expect("run");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "069a79f4-44e9-4726-a5be-fca90e38aaf5");

    fwdctl().args(["uuid", "lookup", "--username", "jeb_", "--db"]).arg(&db).assert().failure();
}
