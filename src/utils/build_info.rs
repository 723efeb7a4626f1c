//! Compile-time build information (see build.rs).

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version string for `--version`.
pub fn version_line() -> String {
    format!("flappy {} ({})", BUILD_DATE, BUILD_COMMIT)
}
