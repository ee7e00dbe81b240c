use std::path::PathBuf;

fn main() {
    let crate_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string()));
    let include_dir = crate_dir.join("include");

    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=src/types.rs");

    let bindings = cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("IP2C_H")
        .generate();

    match bindings {
        Ok(bindings) => {
            if let Err(e) = std::fs::create_dir_all(&include_dir) {
                println!("cargo:warning=could not create {}: {e}", include_dir.display());
                return;
            }
            let _ = bindings.write_to_file(include_dir.join("ip2c.h"));
        }
        Err(e) => println!("cargo:warning=header generation skipped: {e}"),
    }
}
