//! Lints the real gateway sources so boundary regressions fail `cargo test`.

use std::path::Path;

use architecture_lint::lint_gateway_sources;

#[test]
fn gateway_respects_layer_boundaries() {
    let gateway_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../gateway");
    if let Err(error) = lint_gateway_sources(&gateway_dir) {
        panic!("{error}");
    }
}
