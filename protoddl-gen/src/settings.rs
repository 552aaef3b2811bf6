//! Generator configuration resolution shared by every subcommand

use crate::error::{GenError, Result};
use protoddl::GeneratorConfig;
use std::path::PathBuf;

/// Command line values layered over the configuration file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Configuration file; `config/protoddl.toml` when absent
    pub config_file: Option<PathBuf>,
    /// Plugin-style parameters, e.g. `database=shop,outdir=sql`
    pub param: Option<String>,
    pub outdir: Option<PathBuf>,
    pub database: Option<String>,
}

/// Configuration file and env first, then plugin parameters, then explicit flags
pub fn resolve_config(overrides: &ConfigOverrides) -> Result<GeneratorConfig> {
    let loaded = match &overrides.config_file {
        Some(path) => GeneratorConfig::load_from(path),
        None => GeneratorConfig::load(),
    };
    let mut config = loaded.map_err(|e| GenError::Config(e.to_string()))?;

    if let Some(param) = &overrides.param {
        config
            .apply_parameter(param)
            .map_err(|e| GenError::Config(e.to_string()))?;
    }
    if let Some(outdir) = &overrides.outdir {
        config.outdir = outdir.clone();
    }
    if let Some(database) = &overrides.database {
        config.database = database.clone();
    }

    log::debug!("generator configuration: {:?}", config);
    Ok(config)
}
