pub mod git2_config;
#[cfg(test)]
pub mod mock_git_config;
pub mod sanitize;
pub mod types;

pub use git2_config::Git2Config;
pub use sanitize::RefNameSanitizer;
pub use types::{DEFAULT_BRANCH_NAME, GitConfigStore, GitPreferences, PreferenceChanges};
