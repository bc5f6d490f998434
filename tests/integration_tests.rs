use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const WINDOWS_VM: &str = r#"{
  "NanaBox": {
    "Type": "VirtualMachine",
    "Version": 1,
    "GuestType": "Windows",
    "Name": "Windows 11",
    "ProcessorCount": 4,
    "MemorySize": 8192,
    "NetworkAdapters": [
      { "Enabled": true, "Connected": true, "MacAddress": "" },
      { "Enabled": true, "Connected": true, "MacAddress": "00:15:5D:AA:BB:CC" }
    ],
    "ScsiDevices": [
      { "Enabled": true, "Type": "VirtualDisk", "Path": "Windows 11.vhdx" },
      { "Enabled": true, "Type": "VirtualImage", "Path": "" }
    ],
    "Tpm": true
  }
}"#;

fn write_config(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_help_command() {
    let mut cmd = Command::cargo_bin("nanabox-config").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("NanaBox virtual machine configuration tool"));
}

#[test]
fn test_completions_command() {
    let mut cmd = Command::cargo_bin("nanabox-config").unwrap();
    cmd.args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nanabox-config"));
}

#[test]
fn test_man_page_command() {
    let mut cmd = Command::cargo_bin("nanabox-config").unwrap();
    cmd.arg("man-page")
        .assert()
        .success()
        .stdout(predicate::str::contains(".TH"));
}

#[test]
fn test_check_reports_summary_and_dropped_entries() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "vm.json", WINDOWS_VM);

    let mut cmd = Command::cargo_bin("nanabox-config").unwrap();
    cmd.arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Windows 11"))
        .stdout(predicate::str::contains("Network:         1"))
        .stdout(predicate::str::contains("SCSI devices:    2"))
        .stdout(predicate::str::contains("\"NetworkAdapters\"[0] dropped"));
}

#[test]
fn test_check_strict_fails_on_degradation() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "vm.json", WINDOWS_VM);

    let mut cmd = Command::cargo_bin("nanabox-config").unwrap();
    cmd.args(["check", "--strict"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("ignored or defaulted"));
}

#[test]
fn test_check_rejects_wrong_document_type() {
    let temp = TempDir::new().unwrap();
    let path = write_config(
        &temp,
        "disk.json",
        r#"{ "NanaBox": { "Type": "Disk", "GuestType": "Linux", "Name": "x", "ProcessorCount": 1, "MemorySize": 1 } }"#,
    );

    let mut cmd = Command::cargo_bin("nanabox-config").unwrap();
    cmd.arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid Virtual Machine Configuration"));
}

#[test]
fn test_check_rejects_unsupported_version() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "vm.json", &WINDOWS_VM.replace("\"Version\": 1", "\"Version\": 2"));

    let mut cmd = Command::cargo_bin("nanabox-config").unwrap();
    cmd.arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported configuration version 2"));
}

#[test]
fn test_fmt_write_is_canonical_and_stable() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "vm.json", WINDOWS_VM);

    let mut cmd = Command::cargo_bin("nanabox-config").unwrap();
    cmd.args(["fmt", "--write"]).arg(&path).assert().success();

    let first = fs::read_to_string(&path).unwrap();
    assert!(!first.contains("\"MacAddress\": \"\""));
    assert!(first.find("\"Gpu\"").unwrap() < first.find("\"NetworkAdapters\"").unwrap());

    let mut cmd = Command::cargo_bin("nanabox-config").unwrap();
    cmd.args(["fmt", "--write"]).arg(&path).assert().success();
    assert_eq!(fs::read_to_string(&path).unwrap(), first);
}

#[test]
fn test_new_then_check() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("vms").join("debian.json");

    let mut cmd = Command::cargo_bin("nanabox-config").unwrap();
    cmd.arg("new")
        .arg(&path)
        .args(["--name", "Debian", "--guest-type", "Linux", "--cpus", "2", "--memory", "2048", "--tpm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created VM configuration 'Debian'"));
    assert!(path.exists());

    let mut cmd = Command::cargo_bin("nanabox-config").unwrap();
    cmd.args(["check", "--strict"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Guest type:      Linux"))
        .stdout(predicate::str::contains("TPM:             true"));

    // refuses to clobber without --force
    let mut cmd = Command::cargo_bin("nanabox-config").unwrap();
    cmd.arg("new")
        .arg(&path)
        .args(["--name", "Other"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_check_reports_each_degradation_once() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "vm.json", WINDOWS_VM);

    let mut cmd = Command::cargo_bin("nanabox-config").unwrap();
    cmd.arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("warning: ").count(1))
        .stderr(predicate::str::contains("ignored or defaulted").not());
}

#[test]
fn test_new_rejects_unmapped_guest_type() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("vm.json");

    let mut cmd = Command::cargo_bin("nanabox-config").unwrap();
    cmd.arg("new")
        .arg(&path)
        .args(["--name", "x", "--guest-type", "Unknown"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected one of: Windows, Linux"));
    assert!(!path.exists());
}
