use std::sync::Mutex;

use async_trait::async_trait;

use super::{GitConfigStore, GitPreferences, PreferenceChanges};
use crate::error::Error;

/// In memory store, `save` fails when asked to write the name "should fail".
#[derive(Debug, Default)]
pub struct MockGitConfig {
  pub stored: Mutex<GitPreferences>,
  pub saves: Mutex<Vec<PreferenceChanges>>,
}

impl MockGitConfig {
  pub fn new(preferences: GitPreferences) -> Self {
    MockGitConfig { stored: Mutex::new(preferences), saves: Mutex::new(vec![]) }
  }

  pub fn stored(&self) -> GitPreferences {
    self.stored.lock().unwrap().clone()
  }

  pub fn saves(&self) -> Vec<PreferenceChanges> {
    self.saves.lock().unwrap().clone()
  }
}

#[async_trait]
impl GitConfigStore for MockGitConfig {
  async fn load(&self) -> Result<GitPreferences, Error> {
    Ok(self.stored())
  }

  async fn save(&self, changes: &PreferenceChanges) -> Result<(), Error> {
    if changes.name.as_deref() == Some("should fail") {
      return Err(Error::Git("Saving git config failed".to_string()));
    }
    changes.apply_to(&mut self.stored.lock().unwrap());
    self.saves.lock().unwrap().push(changes.clone());
    Ok(())
  }
}
