//! Compatibility analysis between a host binary and a plugin.
//!
//! A [`Descriptor`] captures the runtime version, libc version and module
//! versions of one side. The host side comes from a
//! [`LocalDescriber`](crate::di::LocalDescriber), the plugin side from its
//! `go.sum` lock file.

pub mod build_info;
pub mod check;
pub mod descriptor;
pub mod patcher;
pub mod sumfile;

pub use build_info::{BuildInfo, DumpFileDescriber, EmbeddedDescriber, HostVersions};
pub use check::{check, CheckOptions};
pub use descriptor::{is_reserved, Descriptor, Diff, RUNTIME_NAME, SYSTEM_LIB_NAME};
pub use patcher::{apply_fixes, output_fixes};
pub use sumfile::{describe, describe_file};
