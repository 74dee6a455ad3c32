//! ESPHome subprocess tests
//!
//! A shell script stands in for the `esphome` executable so the real
//! process handling (working directory, output streaming, exit status)
//! is exercised.

#![cfg(unix)]

use ewt_gen::compiler::{EsphomeCompiler, FirmwareCompiler, find_firmware};
use ewt_gen::config::CompilerConfig;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn compiler_with(esphome: &Path) -> EsphomeCompiler {
    EsphomeCompiler::new(
        CompilerConfig {
            esphome_command: esphome.to_string_lossy().into_owned(),
            uvx_command: "/nonexistent/uvx".to_string(),
        },
        false,
    )
}

#[tokio::test]
async fn test_runs_in_yaml_directory() {
    let tools = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let script = write_script(
        tools.path(),
        "esphome",
        r#"[ "$1" = "compile" ] || exit 64
echo "INFO Reading configuration $2..."
mkdir -p .esphome/build/office/.pioenvs/office
printf 'FW' > .esphome/build/office/.pioenvs/office/firmware.bin"#,
    );
    let yaml = project.path().join("office.yaml");
    fs::write(&yaml, "esphome:\n  name: office\n").unwrap();

    let compiler = compiler_with(&script);
    compiler.compile(&yaml).await.expect("compile should succeed");

    let firmware = find_firmware(&yaml, "office").expect("firmware should be built");
    assert_eq!(fs::read(firmware).unwrap(), b"FW");
}

#[tokio::test]
async fn test_non_zero_exit_is_an_error() {
    let tools = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let script = write_script(tools.path(), "esphome", "echo 'ERROR boom' >&2\nexit 3");
    let yaml = project.path().join("office.yaml");
    fs::write(&yaml, "esphome:\n  name: office\n").unwrap();

    let err = compiler_with(&script).compile(&yaml).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "ESPHome compilation failed with exit code 3"
    );
}

#[tokio::test]
async fn test_pre_release_without_uvx_fails_before_running() {
    let tools = TempDir::new().unwrap();
    let marker = tools.path().join("ran");
    let script = write_script(
        tools.path(),
        "esphome",
        &format!("touch {}", marker.display()),
    );

    let compiler = EsphomeCompiler::new(
        CompilerConfig {
            esphome_command: script.to_string_lossy().into_owned(),
            uvx_command: "/nonexistent/uvx".to_string(),
        },
        true,
    );
    let err = compiler
        .compile(&tools.path().join("office.yaml"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("--pre-release"));
    assert!(!marker.exists());
}

#[tokio::test]
async fn test_non_utf8_output_does_not_stop_the_build() {
    let tools = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    // Enough output after the bad byte to overflow the pipe buffer if nobody reads it
    let script = write_script(
        tools.path(),
        "esphome",
        r#"printf 'Compiling caf\351\n'
i=0
while [ $i -lt 20000 ]; do
  echo "INFO Linking object $i"
  i=$((i + 1))
done
exit 0"#,
    );
    let yaml = project.path().join("office.yaml");
    fs::write(&yaml, "esphome:\n  name: office\n").unwrap();

    compiler_with(&script)
        .compile(&yaml)
        .await
        .expect("non-UTF-8 output should be logged, not fatal");
}

#[tokio::test]
async fn test_killed_compiler_reports_signal() {
    let tools = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let script = write_script(tools.path(), "esphome", "kill -9 $$");
    let yaml = project.path().join("office.yaml");
    fs::write(&yaml, "esphome:\n  name: office\n").unwrap();

    let err = compiler_with(&script).compile(&yaml).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "ESPHome compilation failed with signal 9"
    );
}
