pub mod analysis;
pub mod config;
pub mod error;
pub mod index;
pub mod logging;

pub use analysis::Analyzer;
pub use config::{SigscopeConfig, load_config, resolve_config};
pub use error::{Result, SigscopeError};
