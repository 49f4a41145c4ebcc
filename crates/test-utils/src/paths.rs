//! Path utilities for locating configuration and creating temporary
//! configuration directories.

use std::path::PathBuf;

/// Returns the workspace root directory.
///
/// This is determined by walking up from the current crate's manifest directory
/// until we find the workspace Cargo.toml.
pub fn workspace_root() -> PathBuf {
    // Start from the test-utils crate manifest dir
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// Returns the directory of resource configuration shipped with the workspace.
pub fn resource_config_dir() -> PathBuf {
    workspace_root().join("config").join("resources")
}

/// Creates a temporary configuration directory holding the given files.
///
/// The directory is automatically cleaned up when the returned `TempDir` is dropped.
///
/// # Arguments
///
/// * `files` - `(file name, contents)` pairs, e.g. `("sample.yaml", "...")`
pub fn temp_config_dir(files: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::Builder::new()
        .prefix("conneg_config_")
        .tempdir()
        .expect("Failed to create temporary config directory");
    for (name, contents) in files {
        std::fs::write(dir.path().join(name), contents).expect("Failed to write config file");
    }
    dir
}
