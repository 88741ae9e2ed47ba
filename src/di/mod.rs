//! Dependency injection infrastructure for plugcheck
//!
//! The analyzer reaches its collaborators through traits so tests can swap
//! the host description and configuration without touching global state.
//!
//! # Example (Production)
//! ```no_run
//! use plugcheck::di::ServiceContainer;
//!
//! # fn example() -> plugcheck_core::PlugcheckResult<()> {
//! let container = ServiceContainer::new()?;
//! let host = container.describer().describe();
//! println!("host runtime: {}", host.runtime_version);
//! # Ok(())
//! # }
//! ```
//!
//! # Example (Testing)
//! ```
//! use plugcheck::di::{ServiceContainer, mocks::*};
//! use plugcheck::plugin::Descriptor;
//! use std::sync::Arc;
//!
//! let config = Arc::new(MockConfigProvider::default());
//! let describer = Arc::new(FixedDescriber::new(Descriptor::default()));
//!
//! let container = ServiceContainer::with_providers(config, describer);
//! assert!(container.describer().describe().dependencies.is_empty());
//! ```

pub mod container;
pub mod mocks;
pub mod traits;

// Re-export key types
pub use container::ServiceContainer;
pub use traits::{ConfigProvider, LocalDescriber};
