//! Build metadata shared by the CLI and the HTTP dispatcher.
//! The generated version.rs from the build script is included here so there is
//! a single source of truth.

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Route of the apps proxy call endpoint, relative to the server URL
pub fn apps_call_route() -> &'static str {
    APPS_CALL_ROUTE
}

/// Build time string from the build script (UTC)
pub fn build_time() -> &'static str {
    BUILD_TIME
}

/// Short git hash captured by the build script
pub fn git_hash() -> &'static str {
    GIT_HASH
}

/// Long version string shown by `--version`
pub fn long_version() -> String {
    format!(
        "{} (built {}, git {})",
        env!("CARGO_PKG_VERSION"),
        build_time(),
        git_hash()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_route_is_absolute() {
        assert!(apps_call_route().starts_with('/'));
    }

    #[test]
    fn test_long_version_contains_package_version() {
        assert!(long_version().starts_with(env!("CARGO_PKG_VERSION")));
    }
}
