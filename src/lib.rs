//! plugcheck: dependency compatibility between a host binary and its plugins
//!
//! A plugin loaded into a host binary must be built with the same runtime,
//! the same libc and the same versions of every module the two share. This
//! crate compares the host's build metadata with a plugin's `go.sum`,
//! reports the mismatches and can patch the plugin's `go.mod` to fix them.

pub use plugcheck_core::{format_error_with_help, ErrorHelp, PlugcheckError, PlugcheckResult};

/// Core module re-exported from plugcheck-core.
pub mod core {
    pub use plugcheck_core::core::*;
}

/// Configuration management.
pub mod config;

/// Dependency injection infrastructure.
pub mod di;

/// `go.mod` document model.
pub mod modfile;

/// Host/plugin compatibility analysis.
pub mod plugin;
