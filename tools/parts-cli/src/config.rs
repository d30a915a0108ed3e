//! CLI configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog snapshot location.
    #[serde(default)]
    pub data: DataConfig,

    /// Listing defaults.
    #[serde(default)]
    pub search: SearchConfig,

    /// Chassis validation settings.
    #[serde(default)]
    pub chassis: ChassisConfig,

    /// Reseller tenant settings.
    #[serde(default)]
    pub tenants: TenantsConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Snapshot directory settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding the catalog JSON files (default: data).
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
        }
    }
}

/// Listing defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Page size when none is given.
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

fn default_limit() -> usize {
    parts_catalog::search::DEFAULT_LIMIT
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

/// Chassis validation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChassisConfig {
    /// Lifetime of cached validation results, in seconds.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

fn default_cache_ttl() -> u64 {
    24 * 60 * 60
}

impl Default for ChassisConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

/// Reseller tenant settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TenantsConfig {
    /// Tenant registry file. Relative paths resolve against the working directory.
    #[serde(default)]
    pub file: Option<PathBuf>,
}
