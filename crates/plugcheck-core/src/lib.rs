//! Core utilities shared by the plugcheck binary and library: the error type,
//! user-facing error hints, semantic-version ordering and platform paths.

pub mod core;

pub use core::{format_error_with_help, ErrorHelp, PlugcheckError, PlugcheckResult};
