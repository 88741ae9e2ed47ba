//! Mock implementations of service traits for testing

use super::traits::{ConfigProvider, LocalDescriber};
use crate::plugin::Descriptor;
use std::path::PathBuf;

/// Mock configuration provider for testing
///
/// # Example
///
/// ```
/// use plugcheck::di::mocks::MockConfigProvider;
/// use plugcheck::di::ConfigProvider;
///
/// let mut config = MockConfigProvider::default();
/// config.fix = true;
///
/// assert!(config.fix());
/// ```
#[derive(Clone)]
pub struct MockConfigProvider {
    pub sum_file: PathBuf,
    pub host_go_version: String,
    pub host_libc_version: String,
    pub build_info: Option<PathBuf>,
    pub suggest_commands: bool,
    pub fix: bool,
}

impl Default for MockConfigProvider {
    fn default() -> Self {
        Self {
            sum_file: PathBuf::from("./go.sum"),
            host_go_version: "1.20.4".to_string(),
            host_libc_version: String::new(),
            build_info: None,
            suggest_commands: false,
            fix: false,
        }
    }
}

impl ConfigProvider for MockConfigProvider {
    fn sum_file(&self) -> PathBuf {
        self.sum_file.clone()
    }

    fn host_go_version(&self) -> &str {
        &self.host_go_version
    }

    fn host_libc_version(&self) -> &str {
        &self.host_libc_version
    }

    fn build_info(&self) -> Option<PathBuf> {
        self.build_info.clone()
    }

    fn suggest_commands(&self) -> bool {
        self.suggest_commands
    }

    fn fix(&self) -> bool {
        self.fix
    }
}

/// Describer returning a fixed descriptor.
///
/// # Example
///
/// ```
/// use plugcheck::di::mocks::FixedDescriber;
/// use plugcheck::di::LocalDescriber;
/// use plugcheck::plugin::Descriptor;
/// use std::collections::HashMap;
///
/// let describer = FixedDescriber::new(Descriptor::new("1.20", "", HashMap::new()));
/// assert_eq!(describer.describe().runtime_version, "1.20");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FixedDescriber {
    descriptor: Descriptor,
}

impl FixedDescriber {
    pub fn new(descriptor: Descriptor) -> Self {
        Self { descriptor }
    }
}

impl LocalDescriber for FixedDescriber {
    fn describe(&self) -> Descriptor {
        self.descriptor.clone()
    }
}
