//! CLI execution context.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context as _, Result};
use parts_catalog::catalog::Catalog;
use parts_catalog::fitment::{ChassisValidator, InMemoryChassisStore};
use parts_catalog::reseller::TenantRegistry;

use crate::config::CliConfig;
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_default()
        };

        Ok(Self { config, output, cwd })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let config_names = ["parts.toml", ".parts.toml", "parts.json"];

        let mut current = start.to_path_buf();
        loop {
            for name in &config_names {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Get the snapshot directory.
    pub fn data_dir(&self) -> PathBuf {
        self.cwd.join(&self.config.data.dir)
    }

    /// Load the catalog snapshot.
    pub fn catalog(&self) -> Result<Catalog> {
        let dir = self.data_dir();
        self.output.debug(&format!("Loading catalog from {}", dir.display()));
        Catalog::load(&dir).with_context(|| format!("Failed to load catalog from {}", dir.display()))
    }

    /// Load the tenant registry named in the config.
    pub fn tenants(&self) -> Result<TenantRegistry> {
        let file = self
            .config
            .tenants
            .file
            .as_ref()
            .context("No tenant file configured. Set [tenants] file in parts.toml")?;
        let path = self.cwd.join(file);
        TenantRegistry::load(&path)
            .with_context(|| format!("Failed to load tenants from {}", path.display()))
    }

    /// Build a chassis validator over the snapshot's chassis master.
    pub fn chassis_validator(&self, catalog: &Catalog) -> ChassisValidator<InMemoryChassisStore> {
        let store = InMemoryChassisStore::new(catalog.chassis().to_vec());
        let ttl = Duration::from_secs(self.config.chassis.cache_ttl_secs);
        ChassisValidator::with_ttl(store, ttl)
    }
}
