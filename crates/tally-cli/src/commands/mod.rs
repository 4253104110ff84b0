//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod detect;
pub mod scan;

use std::path::Path;

use tally_core::TallyConfig;

/// Load the config given on the command line, else the user config file, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<TallyConfig> {
    if let Some(path) = config_path {
        return Ok(TallyConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        Ok(TallyConfig::from_file(&default_path)?)
    } else {
        Ok(TallyConfig::default())
    }
}
