use async_trait::async_trait;

use crate::error::Error;

/// Fallback for `init.defaultBranch` when the global config does not set one.
pub const DEFAULT_BRANCH_NAME: &str = "main";

/// The values the preferences pane edits. Owned by the host, handed to the pane as props.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GitPreferences {
  pub name: String,
  pub email: String,
  pub default_branch: String,
}

impl GitPreferences {
  pub fn new(name: String, email: String, default_branch: String) -> Self {
    GitPreferences { name, email, default_branch }
  }
}

/// Values to write, `None` leaves the key in the config untouched.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PreferenceChanges {
  pub name: Option<String>,
  pub email: Option<String>,
  pub default_branch: Option<String>,
}

impl PreferenceChanges {
  pub fn between(saved: &GitPreferences, current: &GitPreferences) -> Self {
    let changed = |before: &String, after: &String| if before != after { Some(after.clone()) } else { None };
    PreferenceChanges {
      name: changed(&saved.name, &current.name),
      email: changed(&saved.email, &current.email),
      default_branch: changed(&saved.default_branch, &current.default_branch),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.name.is_none() && self.email.is_none() && self.default_branch.is_none()
  }

  pub fn apply_to(&self, preferences: &mut GitPreferences) {
    if let Some(name) = &self.name {
      preferences.name = name.clone();
    }
    if let Some(email) = &self.email {
      preferences.email = email.clone();
    }
    if let Some(default_branch) = &self.default_branch {
      preferences.default_branch = default_branch.clone();
    }
  }
}

#[async_trait]
pub trait GitConfigStore: Send + Sync {
  async fn load(&self) -> Result<GitPreferences, Error>;
  async fn save(&self, changes: &PreferenceChanges) -> Result<(), Error>;
}
