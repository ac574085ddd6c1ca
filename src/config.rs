use std::{
  collections::HashSet,
  path::{Path, PathBuf},
};

use derive_deref::{Deref, DerefMut};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
  error::Error,
  utils::{get_config_dir, get_data_dir},
};

const CONFIG: &str = include_str!("../.config/config.json5");

/// Branch names offered as radio options, in display order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deref, DerefMut, Deserialize)]
#[serde(transparent)]
pub struct SuggestedBranchNames(pub Vec<String>);

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AppConfig {
  #[serde(default)]
  pub _data_dir: PathBuf,
  #[serde(default)]
  pub _config_dir: PathBuf,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
  #[serde(default, flatten)]
  pub config: AppConfig,
  #[serde(default = "default_true")]
  pub default_branch_setting: bool,
  #[serde(default)]
  pub suggested_branch_names: SuggestedBranchNames,
}

fn default_true() -> bool {
  true
}

impl Config {
  pub fn new() -> Result<Self, Error> {
    Self::from_dirs(&get_config_dir(), &get_data_dir())
  }

  pub fn from_dirs(config_dir: &Path, data_dir: &Path) -> Result<Self, Error> {
    let default_config: Config = json5::from_str(CONFIG)
      .map_err(|e| Error::Config(config::ConfigError::Message(format!("Invalid embedded config: {e}"))))?;

    let mut builder = config::Config::builder()
      .set_default("_data_dir", data_dir.to_string_lossy().to_string())?
      .set_default("_config_dir", config_dir.to_string_lossy().to_string())?
      .set_default("default_branch_setting", default_config.default_branch_setting)?
      .set_default("suggested_branch_names", default_config.suggested_branch_names.0.clone())?;

    let config_files = [
      ("config.json5", config::FileFormat::Json5),
      ("config.json", config::FileFormat::Json),
      ("config.yaml", config::FileFormat::Yaml),
      ("config.toml", config::FileFormat::Toml),
      ("config.ini", config::FileFormat::Ini),
    ];
    let mut found_config = false;
    for (file, format) in &config_files {
      let path = config_dir.join(file);
      builder = builder.add_source(config::File::from(path.clone()).format(*format).required(false));
      if path.exists() {
        info!("Loading configuration from {}", path.display());
        found_config = true
      }
    }
    if !found_config {
      warn!("No configuration file found in {}, using defaults", config_dir.display());
    }

    let mut cfg: Self = builder.build()?.try_deserialize()?;
    if cfg.suggested_branch_names.is_empty() {
      warn!("suggested_branch_names is empty, falling back to the defaults");
      cfg.suggested_branch_names = default_config.suggested_branch_names;
    }
    let mut seen = HashSet::new();
    cfg.suggested_branch_names.retain(|name| seen.insert(name.clone()));

    Ok(cfg)
  }
}
