use std::fs;
use std::path::{Path, PathBuf};
use clap::Parser;
use serde::{Deserialize, Serialize};
use crate::error::ConfigError;
use crate::form::MAX_VARIABLE_COSTS;
use crate::ui::utils::parse_amount;

const CONFIG_DIR_NAME: &str = "cost-estimator";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Parser, Debug)]
#[command(name = "cost-estimator", version, about = "Mining project cost estimation calculator")]
pub struct Cli {
    #[arg(long, value_name = "AMOUNT", value_parser = amount_arg)]
    pub base: Option<f64>,
    #[arg(long, value_name = "AMOUNT", value_parser = amount_arg)]
    pub overhead: Option<f64>,
    #[arg(long, value_name = "AMOUNT", value_parser = amount_arg)]
    pub depreciation: Option<f64>,
    #[arg(long, value_name = "AMOUNT", value_parser = amount_arg)]
    pub environmental: Option<f64>,
    #[arg(long, value_name = "AMOUNT", value_parser = amount_arg)]
    pub transportation: Option<f64>,
    #[arg(long, value_name = "AMOUNT", value_parser = amount_arg)]
    pub labor: Option<f64>,
    #[arg(long, value_name = "AMOUNT", value_parser = amount_arg)]
    pub material: Option<f64>,
    #[arg(long, value_name = "AMOUNT", value_parser = amount_arg)]
    pub machinery: Option<f64>,
    #[arg(long, value_name = "AMOUNT", value_parser = amount_arg)]
    pub fuel: Option<f64>,
    #[arg(long, value_name = "AMOUNT", value_parser = amount_arg)]
    pub maintenance: Option<f64>,
    /// Amount of the next variable cost (repeatable)
    #[arg(long = "variable", value_name = "AMOUNT", value_parser = amount_arg)]
    pub variable: Vec<f64>,
    /// Number of variable cost fields (defaults to the number of --variable values)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u8).range(0..=MAX_VARIABLE_COSTS as i64))]
    pub variable_count: Option<u8>,
    /// Print the breakdown to stdout instead of opening the interactive form
    #[arg(long)]
    pub summary: bool,
    /// Currency label shown next to amounts
    #[arg(long)]
    pub currency: Option<String>,
    #[arg(long)]
    pub title: Option<String>,
    /// Run the guided preferences setup
    #[arg(long)]
    pub setup: bool,
    /// Remove saved preferences
    #[arg(long)]
    pub reset: bool,
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

fn amount_arg(input: &str) -> Result<f64, String> {
    match parse_amount(input) {
        Ok(Some(amount)) => Ok(amount),
        Ok(None) => Err("an amount is required".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

/// Display preferences remembered between runs. Cost inputs are never saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedConfig {
    pub currency: String,
    pub project_title: String,
}

impl Default for SavedConfig {
    fn default() -> Self {
        Self {
            currency: "INR".to_string(),
            project_title: "Mining Project Cost Estimation Calculator".to_string(),
        }
    }
}

impl SavedConfig {
    /// Apply command-line overrides on top of the saved values
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(currency) = &cli.currency {
            self.currency = currency.clone();
        }
        if let Some(title) = &cli.title {
            self.project_title = title.clone();
        }
        self
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load saved preferences, logging and ignoring anything unreadable
pub fn load_config() -> Option<SavedConfig> {
    let path = config_path()?;
    match load_config_from(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            None
        }
    }
}

pub fn load_config_from(path: &Path) -> Result<Option<SavedConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&data)?))
}

pub fn save_config(config: &SavedConfig) -> Result<(), ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_config_to(&path, config)
}

pub fn save_config_to(path: &Path, config: &SavedConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(config)?)?;
    tracing::info!(path = %path.display(), "saved config");
    Ok(())
}

/// Remove saved preferences. Returns whether a file was actually removed.
pub fn reset_config() -> Result<bool, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    reset_config_at(&path)
}

pub fn reset_config_at(path: &Path) -> Result<bool, ConfigError> {
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_file(path)?;
    Ok(true)
}
