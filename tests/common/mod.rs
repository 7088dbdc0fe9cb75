#![allow(dead_code)]

use assert_cmd::cargo::CommandCargoExt;
use std::{
    ffi::OsStr,
    fs,
    path::Path,
    process::{Command, Output, Stdio},
};

/// Runtime the generated function links against.
pub const RUNTIME: &str = r#"#include <inttypes.h>
#include <stdio.h>

void basic_main(void);

void print_int(int64_t value) {
    printf("%" PRId64 "\n", value);
}

int main(void) {
    basic_main();
    return 0;
}
"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunLog {
    pub stdout: String,
    pub status: i32,
}

pub fn to_runlog(out: Output) -> RunLog {
    RunLog {
        stdout: String::from_utf8_lossy(&out.stdout).to_string(),
        status: out.status.code().unwrap_or(-1),
    }
}

pub fn ensure_success(tag: &str, target: &Path, out: &Output) {
    assert!(
        out.status.success(),
        "[{}] {} failed (status: {:?})\n--- stdout ---\n{}\n--- stderr ---\n{}",
        target.display(),
        tag,
        out.status.code(),
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr),
    );
}

/// Generated code is x86-64 System V assembly; elsewhere the end-to-end runs are skipped.
pub fn native_toolchain_available() -> bool {
    cfg!(all(target_arch = "x86_64", target_os = "linux"))
        && Command::new("cc")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
}

pub fn tbc(args: &[&OsStr]) -> Output {
    Command::cargo_bin(env!("CARGO_PKG_NAME"))
        .expect("missing binary under test")
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("failed to execute tbc")
}

/// Compiles `src` to assembly, links it with [`RUNTIME`] and runs it.
pub fn compile_and_run(src: &Path, workdir: &Path) -> RunLog {
    let asm_path = workdir.join("program.s");
    let runtime_path = workdir.join("runtime.c");
    let exe_path = workdir.join("program");

    let codegen = tbc(&[OsStr::new("-S"), src.as_os_str()]);
    ensure_success("-S", src, &codegen);
    fs::write(&asm_path, &codegen.stdout).expect("failed to write assembly");
    fs::write(&runtime_path, RUNTIME).expect("failed to write runtime");

    let link = Command::new("cc")
        .arg("-o")
        .arg(&exe_path)
        .arg(&asm_path)
        .arg(&runtime_path)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("failed to run cc");
    ensure_success("cc", &asm_path, &link);

    let run = Command::new(&exe_path)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("failed to run compiled program");
    to_runlog(run)
}

pub fn interpret(src: &Path) -> RunLog {
    let out = tbc(&[OsStr::new("--interpret"), src.as_os_str()]);
    ensure_success("--interpret", src, &out);
    to_runlog(out)
}
