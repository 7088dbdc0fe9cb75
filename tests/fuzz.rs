mod common;

use std::{ffi::OsStr, fs};

use common::{compile_and_run, ensure_success, interpret, native_toolchain_available, tbc};
use tempfile::tempdir;

#[test]
fn fuzz_codegen_matches_interpreter() {
    if !native_toolchain_available() {
        eprintln!("skipped: no x86-64 Linux toolchain");
        return;
    }

    let tmp = tempdir().expect("failed to create temp dir");
    for round in 0..8 {
        let fuzzed = tbc(&[OsStr::new("--fuzz")]);
        ensure_success("--fuzz", tmp.path(), &fuzzed);

        let src_path = tmp.path().join(format!("fuzz{round}.bas"));
        fs::write(&src_path, &fuzzed.stdout).expect("failed to write fuzz source");

        let mine = compile_and_run(&src_path, tmp.path());
        let reference = interpret(&src_path);
        assert_eq!(
            mine,
            reference,
            "mismatch for\n{}",
            String::from_utf8_lossy(&fuzzed.stdout)
        );
    }
}
