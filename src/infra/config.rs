// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::infra::errors::DraftmillError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub orchestrator: OrchestratorConfig,

    #[serde(default)]
    pub optimizer: OptimizerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Bedrock model id used for all completion calls.
    pub model_id: String,
    /// AWS region hosting the Bedrock Runtime endpoint.
    pub region: String,
    /// Sampling temperature in [0, 1].
    pub temperature: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_id: "us.amazon.nova-lite-v1:0".into(),
            region: "us-west-2".into(),
            temperature: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Concurrent worker slots for fan-out dispatch.
    pub pool_size: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self { pool_size: 4 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Generate-evaluate-refine rounds per optimize run.
    pub iterations: usize,
    /// Candidates generated per round.
    pub options_per_iteration: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            iterations: 3,
            options_per_iteration: 5,
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults when no
    /// config file exists.
    pub fn load() -> Result<Self, DraftmillError> {
        let path = default_config_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, DraftmillError> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw)
            .map_err(|e| DraftmillError::Config(format!("{}: {}", path.display(), e)))
    }
}

/// `$DRAFTMILL_HOME/config.toml` when set, otherwise
/// `<platform config dir>/draftmill/config.toml`.
pub fn default_config_path() -> PathBuf {
    if let Some(home) = std::env::var_os("DRAFTMILL_HOME") {
        return PathBuf::from(home).join("config.toml");
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("draftmill")
        .join("config.toml")
}
