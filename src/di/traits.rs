//! Trait definitions for dependency injection

use crate::plugin::Descriptor;
use std::path::PathBuf;

/// Trait for configuration access
///
/// Provides read-only access to application configuration.
/// Implementations should be thread-safe (Send + Sync).
pub trait ConfigProvider: Send + Sync {
    /// Lock file analyzed when none is given on the command line
    fn sum_file(&self) -> PathBuf;

    /// Runtime version of the host binary
    fn host_go_version(&self) -> &str;

    /// libc version of the host binary
    fn host_libc_version(&self) -> &str;

    /// `go version -m` dump describing the host binary, if configured
    fn build_info(&self) -> Option<PathBuf>;

    /// Whether to print fix commands by default
    fn suggest_commands(&self) -> bool;

    /// Whether to patch the manifest by default
    fn fix(&self) -> bool;
}

/// Describes the host binary plugins are checked against.
///
/// Implementations return the same descriptor on every call.
pub trait LocalDescriber: Send + Sync {
    fn describe(&self) -> Descriptor;
}
