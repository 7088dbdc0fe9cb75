mod common;

use std::path::Path;

use common::{compile_and_run, interpret, native_toolchain_available};

fn run_case(path: &Path) -> datatest_stable::Result<()> {
    if !native_toolchain_available() {
        eprintln!("[{}] skipped: no x86-64 Linux toolchain", path.display());
        return Ok(());
    }

    let tmp = tempfile::tempdir()?;
    let mine = compile_and_run(path, tmp.path());
    let reference = interpret(path);

    if mine != reference {
        return Err(format!(
            "[{}] compiled program disagrees with interpreter\n--- compiled ({}) ---\n{}\n--- interpreted ({}) ---\n{}",
            path.display(),
            mine.status,
            mine.stdout,
            reference.status,
            reference.stdout
        )
        .into());
    }
    Ok(())
}

datatest_stable::harness! {
    { test = run_case, root = "./tests/programs", pattern = r"\.bas$" },
}
