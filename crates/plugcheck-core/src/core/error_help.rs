//! Actionable hints attached to errors when they are shown to the user.

use crate::core::error::PlugcheckError;

/// Errors that can suggest a next step to the user.
pub trait ErrorHelp {
    /// A short hint explaining how to resolve the error, if one applies.
    fn help(&self) -> Option<String>;
}

impl ErrorHelp for PlugcheckError {
    fn help(&self) -> Option<String> {
        match self {
            PlugcheckError::NotFound { path, .. } => Some(format!(
                "Check that {} exists or point to it with --sum",
                path.display()
            )),
            PlugcheckError::ManifestRead { .. } => {
                Some("A go.mod file must sit next to the go.sum file being checked".to_string())
            }
            PlugcheckError::ManifestParse(_) => {
                Some("Run 'go mod tidy' in the plugin directory and try again".to_string())
            }
            PlugcheckError::ManifestWrite { .. } => {
                Some("Check write permissions on the plugin directory".to_string())
            }
            PlugcheckError::Incompatible(_) => Some(
                "Run with --format to print fix commands, or with --fix to update go.mod"
                    .to_string(),
            ),
            PlugcheckError::PartiallyFixed { .. } => Some(
                "The remaining incompatibilities (go, libc) must be fixed by rebuilding with the host toolchain"
                    .to_string(),
            ),
            PlugcheckError::Config(_) | PlugcheckError::Yaml(_) => Some(
                "Inspect the configuration with 'plugcheck config show'".to_string(),
            ),
            _ => None,
        }
    }
}

/// Format an error for display, appending a hint when one is available.
pub fn format_error_with_help(err: &PlugcheckError) -> String {
    match err.help() {
        Some(help) => format!("Error: {}\n\n  help: {}", err, help),
        None => format!("Error: {}", err),
    }
}
