//! Configuration system for matprop.
//! TOML-based, layered resolution: overrides > env > project file > defaults.

pub mod batch_config;
pub mod defaults;
pub mod matprop_config;
pub mod research_config;
pub mod storage_config;
pub mod validation_config;

pub use batch_config::BatchConfig;
pub use matprop_config::{ConfigOverrides, MatpropConfig};
pub use research_config::ResearchConfig;
pub use storage_config::StorageConfig;
pub use validation_config::ValidationConfig;
