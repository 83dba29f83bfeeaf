use std::env;
use std::fs;
use std::path::Path;

/// Files placed next to the binary when present at the workspace root
const RUNTIME_FILES: &[&str] = &["config.toml", "stock_upload.csv"];

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let profile = env::var("PROFILE").unwrap();

    // OUT_DIR is target/<profile>/build/<crate>-<hash>/out
    let target_dir = Path::new(&out_dir)
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .expect("Could not find target profile directory");

    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("Could not find workspace root");

    for name in RUNTIME_FILES {
        println!("cargo:rerun-if-changed=../../{}", name);

        let source = workspace_root.join(name);
        if !source.exists() {
            continue;
        }
        let dest = target_dir.join(name);
        fs::copy(&source, &dest)
            .unwrap_or_else(|e| panic!("Failed to copy {}: {}", name, e));
    }
}
