use std::path::PathBuf;

use crate::error::GardenError;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
/// Fraction of the grid the generator aims to cover, and the scorer rewards.
pub const DEFAULT_TARGET_COVERAGE: f64 = 0.62;
/// Upper bound on placement attempts per generated layout.
pub const DEFAULT_MAX_ATTEMPTS: usize = 500;

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub catalog_path: Option<PathBuf>,
    pub target_coverage: f64,
    pub max_attempts: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            catalog_path: None,
            target_coverage: DEFAULT_TARGET_COVERAGE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, GardenError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, GardenError> {
        let defaults = Self::default();

        let bind_addr = lookup("GARDEN_BIND_ADDR").unwrap_or(defaults.bind_addr);
        let catalog_path = lookup("CATALOG_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let target_coverage = match lookup("GARDEN_TARGET_COVERAGE") {
            Some(raw) => raw.trim().parse::<f64>().map_err(|e| {
                GardenError::Config(format!("GARDEN_TARGET_COVERAGE '{raw}': {e}"))
            })?,
            None => defaults.target_coverage,
        };
        if !(0.0..=1.0).contains(&target_coverage) {
            return Err(GardenError::Config(format!(
                "GARDEN_TARGET_COVERAGE must lie in 0..=1 (got {target_coverage})"
            )));
        }

        let max_attempts = match lookup("GARDEN_MAX_ATTEMPTS") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| {
                GardenError::Config(format!("GARDEN_MAX_ATTEMPTS '{raw}': {e}"))
            })?,
            None => defaults.max_attempts,
        };
        if max_attempts == 0 {
            return Err(GardenError::Config(
                "GARDEN_MAX_ATTEMPTS must be greater than zero".into(),
            ));
        }

        Ok(Self {
            bind_addr,
            catalog_path,
            target_coverage,
            max_attempts,
        })
    }
}
