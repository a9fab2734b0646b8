//! Generates the C header for the exported API into `$OUT_DIR/simbridge.h`.

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src");

    let crate_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => dir,
        Err(_) => return,
    };
    let out_dir = match env::var("OUT_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => return,
    };

    let result = cbindgen::Builder::new()
        .with_crate(crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("SIMBRIDGE_H")
        .with_parse_deps(false)
        .generate();

    match result {
        Ok(bindings) => {
            bindings.write_to_file(out_dir.join("simbridge.h"));
        }
        Err(e) => println!("cargo:warning=failed to generate C header: {e}"),
    }
}
