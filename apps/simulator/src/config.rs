use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::interview::catalog::DEFAULT_INTERVIEWER_MODEL;
use crate::interview::orchestrator::SimulationSettings;
use crate::llm_client::DEFAULT_BASE_URL;

/// Application configuration loaded from environment variables.
/// Fails at startup if the API key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub llm_base_url: String,
    pub interviewer_model: String,
    pub results_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            llm_base_url: env_or("LLM_BASE_URL", DEFAULT_BASE_URL),
            interviewer_model: env_or("INTERVIEWER_MODEL", DEFAULT_INTERVIEWER_MODEL),
            results_dir: PathBuf::from(env_or("RESULTS_DIR", ".")),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    /// Run defaults for this deployment: configured interviewer, stock pauses.
    pub fn simulation_settings(&self) -> SimulationSettings {
        SimulationSettings {
            interviewer_model: self.interviewer_model.clone(),
            ..SimulationSettings::default()
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    let value = std::env::var(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    anyhow::ensure!(
        !value.trim().is_empty(),
        "Required environment variable '{key}' is empty"
    );
    Ok(value)
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
