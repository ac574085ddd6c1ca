use std::path::PathBuf;

use async_trait::async_trait;
use directories::BaseDirs;
use git2::{Config, ErrorCode};
use tracing::{error, info};

use crate::{
  error::Error,
  git::types::{DEFAULT_BRANCH_NAME, GitConfigStore, GitPreferences, PreferenceChanges},
};

const USER_NAME: &str = "user.name";
const USER_EMAIL: &str = "user.email";
const INIT_DEFAULT_BRANCH: &str = "init.defaultBranch";

/// Reads the layered git configuration and writes to the global (per user) file.
pub struct Git2Config {
  path: Option<PathBuf>,
}

impl Git2Config {
  pub fn global() -> Git2Config {
    Git2Config { path: None }
  }

  /// Uses a single config file for both reading and writing.
  pub fn from_path(path: PathBuf) -> Git2Config {
    Git2Config { path: Some(path) }
  }

  fn open_for_read(&self) -> Result<Config, Error> {
    match &self.path {
      Some(path) => Ok(Config::open(path)?),
      None => Ok(Config::open_default()?),
    }
  }

  fn open_for_write(&self) -> Result<Config, Error> {
    if let Some(path) = &self.path {
      return Ok(Config::open(path)?);
    }
    match Config::find_global() {
      Ok(path) => Ok(Config::open(&path)?),
      Err(e) if e.code() == ErrorCode::NotFound => {
        let home = BaseDirs::new().ok_or_else(|| Error::Git("Unable to locate the home directory".to_string()))?;
        let path = home.home_dir().join(".gitconfig");
        info!("No global git config found, creating {}", path.display());
        Ok(Config::open(&path)?)
      },
      Err(e) => Err(e.into()),
    }
  }
}

fn read_string(config: &Config, key: &str) -> Result<Option<String>, Error> {
  match config.get_string(key) {
    Ok(value) => Ok(Some(value)),
    Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
    Err(e) => {
      error!("Failed to read {} from git config: {}", key, e);
      Err(e.into())
    },
  }
}

#[async_trait]
impl GitConfigStore for Git2Config {
  async fn load(&self) -> Result<GitPreferences, Error> {
    let config = self.open_for_read()?;
    let name = read_string(&config, USER_NAME)?.unwrap_or_default();
    let email = read_string(&config, USER_EMAIL)?.unwrap_or_default();
    let default_branch = read_string(&config, INIT_DEFAULT_BRANCH)?.unwrap_or_else(|| DEFAULT_BRANCH_NAME.to_string());
    info!("Loaded git preferences, default branch {}", default_branch);
    Ok(GitPreferences { name, email, default_branch })
  }

  async fn save(&self, changes: &PreferenceChanges) -> Result<(), Error> {
    let mut config = self.open_for_write()?;
    let writes =
      [(USER_NAME, &changes.name), (USER_EMAIL, &changes.email), (INIT_DEFAULT_BRANCH, &changes.default_branch)];
    for (key, value) in writes {
      if let Some(value) = value {
        info!("Setting {} in global git config", key);
        config.set_str(key, value)?;
      }
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[tokio::test]
  async fn test_load_missing_values() {
    let dir = tempfile::tempdir().unwrap();
    let store = Git2Config::from_path(dir.path().join("gitconfig"));

    let preferences = store.load().await.unwrap();

    assert_eq!(preferences, GitPreferences::new(String::new(), String::new(), "main".to_string()));
  }

  #[tokio::test]
  async fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gitconfig");
    let store = Git2Config::from_path(path.clone());
    let changes = PreferenceChanges {
      name: Some("Ryan".to_string()),
      email: Some("ryan@example.com".to_string()),
      default_branch: Some("trunk".to_string()),
    };

    store.save(&changes).await.unwrap();

    assert_eq!(
      store.load().await.unwrap(),
      GitPreferences::new("Ryan".to_string(), "ryan@example.com".to_string(), "trunk".to_string())
    );
    let written = std::fs::read_to_string(path).unwrap();
    assert!(written.contains("defaultBranch = trunk"));
  }

  #[tokio::test]
  async fn test_save_leaves_unchanged_keys_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gitconfig");
    std::fs::write(&path, "[user]\n\tname = Ryan\n").unwrap();
    let store = Git2Config::from_path(path.clone());

    let changes = PreferenceChanges { email: Some("ryan@example.com".to_string()), ..Default::default() };

    store.save(&changes).await.unwrap();

    let written = std::fs::read_to_string(path).unwrap();
    assert!(written.contains("name = Ryan"));
    assert!(written.contains("email = ryan@example.com"));
    assert!(!written.contains("defaultBranch"));
  }
}
