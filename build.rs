//! Build script for tabrecon - links a system DuckDB when not bundled

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=DUCKDB_LIB_PATH");

    // Features reach build scripts as CARGO_FEATURE_* variables
    if env::var_os("CARGO_FEATURE_BUNDLED").is_some() {
        return;
    }

    if env::var_os("SKIP_DUCKDB_DETECTION").is_some() {
        println!("cargo:rustc-link-lib=duckdb");
        return;
    }

    match find_duckdb_library() {
        Some(lib_path) => {
            println!("cargo:rustc-link-search=native={}", lib_path.display());
            println!("cargo:rustc-link-lib=duckdb");
        }
        None => {
            eprintln!("❌ DuckDB library not found!");
            eprintln!();
            eprintln!("Build with the bundled engine (default feature):");
            eprintln!("  cargo build --features bundled");
            eprintln!("Or point to an installed library:");
            eprintln!("  export DUCKDB_LIB_PATH=/path/to/duckdb/lib");
            panic!("DuckDB library not found");
        }
    }
}

fn find_duckdb_library() -> Option<PathBuf> {
    if let Some(path) = env::var_os("DUCKDB_LIB_PATH").map(PathBuf::from) {
        if has_library(&path) {
            return Some(path);
        }
    }

    pkg_config_dirs()
        .into_iter()
        .chain(standard_dirs())
        .find(|dir| has_library(dir))
}

fn pkg_config_dirs() -> Vec<PathBuf> {
    if cfg!(target_os = "windows") {
        return Vec::new();
    }

    match Command::new("pkg-config")
        .args(["--libs-only-L", "duckdb"])
        .output()
    {
        Ok(output) if output.status.success() => String::from_utf8_lossy(&output.stdout)
            .split_whitespace()
            .filter_map(|flag| flag.strip_prefix("-L"))
            .map(PathBuf::from)
            .collect(),
        _ => Vec::new(),
    }
}

fn standard_dirs() -> Vec<PathBuf> {
    let dirs: &[&str] = if cfg!(target_os = "macos") {
        &["/opt/homebrew/lib", "/usr/local/lib", "/opt/local/lib"]
    } else if cfg!(target_os = "windows") {
        &["C:\\Program Files\\DuckDB\\lib", "C:\\duckdb\\lib"]
    } else {
        &[
            "/usr/lib",
            "/usr/local/lib",
            "/usr/lib/x86_64-linux-gnu",
            "/usr/lib64",
        ]
    };
    dirs.iter().map(PathBuf::from).collect()
}

fn has_library(dir: &Path) -> bool {
    let names: &[&str] = if cfg!(target_os = "windows") {
        &["duckdb.dll", "duckdb.lib"]
    } else if cfg!(target_os = "macos") {
        &["libduckdb.dylib", "libduckdb.a"]
    } else {
        &["libduckdb.so", "libduckdb.so.1", "libduckdb.a"]
    };
    names.iter().any(|name| dir.join(name).exists())
}
