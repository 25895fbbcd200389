//! Runs the layer boundary lint over the gateway crate of this workspace.

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let gateway_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../gateway");
    match architecture_lint::lint_gateway_sources(&gateway_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let _ = writeln!(io::stderr().lock(), "{error}");
            ExitCode::FAILURE
        }
    }
}
