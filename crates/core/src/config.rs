//! Configuration file loading.
//!
//! A configuration file is JSON; every key is optional:
//!
//! ```json
//! {
//!   "inference": { "context_type": "io.jooby.Context" },
//!   "analysis": { "include_synthetic": false, "threads": 4 }
//! }
//! ```

use crate::error::{Result, SigscopeError};
use serde::{Deserialize, Serialize};
use sigscope_java::{Conventions, InferenceConfig};
use std::path::Path;
use tracing::info;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "SIGSCOPE_CONFIG";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SigscopeConfig {
    pub inference: InferenceConfig,
    pub analysis: AnalysisConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Report compiler-generated methods (lambda bodies, bridges).
    pub include_synthetic: bool,
    /// Report `<init>` and `<clinit>`.
    pub include_initializers: bool,
    /// Worker threads for batch analysis; `None` uses the global rayon pool.
    pub threads: Option<usize>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            include_synthetic: true,
            include_initializers: false,
            threads: None,
        }
    }
}

impl SigscopeConfig {
    /// Compile the inference conventions, validating accessor patterns.
    pub fn conventions(&self) -> Result<Conventions> {
        Ok(Conventions::from_config(&self.inference)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.analysis.threads == Some(0) {
            return Err(SigscopeError::Config(
                "analysis.threads must be at least 1".to_string(),
            ));
        }
        self.conventions().map(|_| ())
    }
}

pub fn load_config(path: &Path) -> Result<SigscopeConfig> {
    let text = std::fs::read_to_string(path)?;
    let config: SigscopeConfig = serde_json::from_str(&text)?;
    config.validate()?;
    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Configuration named by `SIGSCOPE_CONFIG`, or the defaults when unset.
pub fn resolve_config() -> Result<SigscopeConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) if !path.is_empty() => load_config(Path::new(&path)),
        _ => Ok(SigscopeConfig::default()),
    }
}
