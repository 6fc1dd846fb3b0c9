//! Build script for the storefront crate.
//!
//! Fingerprints the stylesheet so templates can link an immutable,
//! content-addressed copy of it.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// Hex digits of the SHA-256 kept in the fingerprinted filename.
const FINGERPRINT_LEN: usize = 8;

fn main() {
    let manifest_dir = PathBuf::from(
        env::var_os("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo"),
    );
    let css_dir = manifest_dir.join("static/css");

    println!("cargo:rerun-if-changed={}", css_dir.join("main.css").display());

    let hash = match fingerprint(&css_dir, "main", "css") {
        Ok(hash) => hash,
        Err(e) => {
            println!("cargo:warning=Could not fingerprint main.css: {e}");
            String::new()
        }
    };
    println!("cargo:rustc-env=CSS_HASH={hash}");
}

/// Copy `{dir}/{stem}.{ext}` to `{dir}/derived/{stem}.{hash}.{ext}` and
/// return the hash. Older fingerprinted copies of the same asset are removed.
fn fingerprint(dir: &Path, stem: &str, ext: &str) -> io::Result<String> {
    let source = dir.join(format!("{stem}.{ext}"));
    let digest = Sha256::digest(fs::read(&source)?);
    let hash: String = format!("{digest:x}").chars().take(FINGERPRINT_LEN).collect();

    let derived_dir = dir.join("derived");
    fs::create_dir_all(&derived_dir)?;

    let current = format!("{stem}.{hash}.{ext}");
    for entry in fs::read_dir(&derived_dir)? {
        let name = entry?.file_name();
        let name = name.to_string_lossy();
        let is_stale = name != current
            && name.starts_with(&format!("{stem}."))
            && name.ends_with(&format!(".{ext}"));
        if is_stale {
            fs::remove_file(derived_dir.join(&*name))?;
        }
    }

    fs::copy(&source, derived_dir.join(&current))?;
    Ok(hash)
}
