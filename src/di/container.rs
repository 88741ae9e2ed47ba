//! Service container for dependency injection

use super::traits::{ConfigProvider, LocalDescriber};
use crate::config::Config;
use crate::plugin::{DumpFileDescriber, EmbeddedDescriber, HostVersions};
use plugcheck_core::PlugcheckResult;
use std::sync::Arc;

/// Service container for dependency injection
///
/// Holds the configuration and the host describer as trait objects so
/// either can be replaced in tests.
#[derive(Clone)]
pub struct ServiceContainer {
    pub config: Arc<dyn ConfigProvider>,
    pub describer: Arc<dyn LocalDescriber>,
}

impl ServiceContainer {
    /// Create a new service container with production implementations
    ///
    /// Loads the config from disk. The host is described from the configured
    /// `go version -m` dump when there is one, from this binary's embedded
    /// build metadata otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or created, or
    /// the configured dump file cannot be read.
    pub fn new() -> PlugcheckResult<Self> {
        let config = Config::load()?;
        Self::from_config(config)
    }

    /// Build production services from an already loaded config.
    pub fn from_config(config: Config) -> PlugcheckResult<Self> {
        let host = HostVersions::new(
            config.host_go_version.clone(),
            config.host_libc_version.clone(),
        );
        let describer: Arc<dyn LocalDescriber> = match config.build_info() {
            Some(path) => Arc::new(DumpFileDescriber::load(&path, host)?),
            None => Arc::new(EmbeddedDescriber::new(host)),
        };

        Ok(Self {
            config: Arc::new(config),
            describer,
        })
    }

    /// Create a service container with custom provider implementations
    pub fn with_providers(
        config: Arc<dyn ConfigProvider>,
        describer: Arc<dyn LocalDescriber>,
    ) -> Self {
        Self { config, describer }
    }

    /// Get the configuration provider
    pub fn config(&self) -> &dyn ConfigProvider {
        self.config.as_ref()
    }

    /// Get the host describer
    pub fn describer(&self) -> &dyn LocalDescriber {
        self.describer.as_ref()
    }
}
