use git2::Branch;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use crate::components::preferences::Sanitizer;

lazy_static! {
  static ref REPEATED_SLASHES: Regex = Regex::new(r"/{2,}").unwrap();
  // Control characters, space, the characters git reserves for revision syntax, `@{`, `..`
  // and a leading or trailing dot.
  static ref INVALID_REF_CHARACTERS: Regex =
    Regex::new(r#"[\x00-\x20\x7F~^:?*\[\\|"<>]+|@\{|\.\.+|^\.|\.$"#).unwrap();
  // Only the dot is replaced so the slash hierarchy survives.
  static ref HIDDEN_COMPONENTS: Regex = Regex::new(r"/\.").unwrap();
  static ref LOCK_SUFFIXES: Regex = Regex::new(r"\.lock(/|$)").unwrap();
  static ref LEADING_SIGNS: Regex = Regex::new(r"^[-+]+").unwrap();
}

/// Turns free-form input into a name git will accept for a branch, or an empty string.
#[derive(Debug, Default, Clone, Copy)]
pub struct RefNameSanitizer;

impl Sanitizer for RefNameSanitizer {
  fn sanitize(&self, raw: &str) -> String {
    let collapsed = REPEATED_SLASHES.replace_all(raw.trim(), "/");
    let replaced = INVALID_REF_CHARACTERS.replace_all(collapsed.trim_matches('/'), "-");
    let replaced = HIDDEN_COMPONENTS.replace_all(&replaced, "/-");
    let replaced = LOCK_SUFFIXES.replace_all(&replaced, "-lock${1}");
    let sanitized = LEADING_SIGNS.replace(&replaced, "").into_owned();
    if sanitized.is_empty() {
      return sanitized;
    }

    match Branch::name_is_valid(&sanitized) {
      Ok(true) => sanitized,
      Ok(false) => {
        debug!("RefNameSanitizer: '{}' is still not a valid branch name", sanitized);
        String::new()
      },
      Err(e) => {
        warn!("RefNameSanitizer: Unable to validate '{}': {}", sanitized, e);
        String::new()
      },
    }
  }
}
