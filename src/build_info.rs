/// Crate version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Short git commit SHA stamped by build.rs, if the build ran inside a checkout.
pub fn git_sha() -> Option<&'static str> {
    option_env!("TASKLIST_BUILD_GIT_SHA")
}

/// One-line description of this build for diagnostics.
pub fn describe() -> String {
    match git_sha() {
        Some(sha) => format!("tasklist {VERSION} ({sha})"),
        None => format!("tasklist {VERSION}"),
    }
}
