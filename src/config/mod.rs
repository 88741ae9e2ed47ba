use crate::di::ConfigProvider;
use crate::plugin::build_info::BUILD_RUNTIME_VERSION;
use plugcheck_core::core::path::{config_file, ensure_dir, DEFAULT_SUM_FILE};
use plugcheck_core::{PlugcheckError, PlugcheckResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Lock file analyzed when `--sum` is not given
    #[serde(default = "default_sum_file")]
    pub sum_file: String,

    /// Runtime version of the host binary
    ///
    /// Defaults to the compiler version this binary was built with.
    #[serde(default = "default_host_go_version")]
    pub host_go_version: String,

    /// libc version of the host binary
    #[serde(default)]
    pub host_libc_version: String,

    /// `go version -m` dump describing the host binary
    ///
    /// When unset, the metadata embedded in this binary is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_info: Option<String>,

    /// Print fix commands instead of have/want pairs
    #[serde(default)]
    pub suggest_commands: bool,

    /// Patch the plugin manifest by default
    #[serde(default)]
    pub fix: bool,
}

fn default_sum_file() -> String {
    DEFAULT_SUM_FILE.to_string()
}

fn default_host_go_version() -> String {
    BUILD_RUNTIME_VERSION.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sum_file: default_sum_file(),
            host_go_version: default_host_go_version(),
            host_libc_version: String::new(),
            build_info: None,
            suggest_commands: false,
            fix: false,
        }
    }
}

impl Config {
    /// Load config from the platform-specific config directory, creating the default if it doesn't exist
    ///
    /// Config locations:
    /// - Windows: %APPDATA%\plugcheck\config.yaml
    /// - Linux: ~/.config/plugcheck/config.yaml
    /// - macOS: ~/Library/Application Support/plugcheck/config.yaml
    pub fn load() -> PlugcheckResult<Self> {
        Self::load_from(&config_file()?)
    }

    /// Load config from `path`, writing the default there if it doesn't exist.
    pub fn load_from(path: &Path) -> PlugcheckResult<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| PlugcheckError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save config to the platform-specific config directory
    pub fn save(&self) -> PlugcheckResult<()> {
        self.save_to(&config_file()?)
    }

    pub fn save_to(&self, path: &Path) -> PlugcheckResult<()> {
        let config_dir = path
            .parent()
            .ok_or_else(|| PlugcheckError::Path("Invalid config path".to_string()))?;
        ensure_dir(config_dir)?;

        fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    pub fn to_yaml(&self) -> PlugcheckResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| PlugcheckError::Config(format!("Failed to serialize config: {}", e)))
    }
}

impl ConfigProvider for Config {
    fn sum_file(&self) -> PathBuf {
        PathBuf::from(&self.sum_file)
    }

    fn host_go_version(&self) -> &str {
        &self.host_go_version
    }

    fn host_libc_version(&self) -> &str {
        &self.host_libc_version
    }

    fn build_info(&self) -> Option<PathBuf> {
        self.build_info.as_ref().map(PathBuf::from)
    }

    fn suggest_commands(&self) -> bool {
        self.suggest_commands
    }

    fn fix(&self) -> bool {
        self.fix
    }
}
