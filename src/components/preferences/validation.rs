use std::fmt;

/// Turns a raw candidate into a valid ref name, or into an empty string when nothing usable is left.
pub trait Sanitizer: Send + Sync {
  fn sanitize(&self, raw: &str) -> String;
}

impl<F> Sanitizer for F
where
  F: Fn(&str) -> String + Send + Sync,
{
  fn sanitize(&self, raw: &str) -> String {
    self(raw)
  }
}

/// Advisory outcome for a proposed branch name. Never blocks the user from submitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchNameValidation {
  /// Holds the raw input, sanitizing it left nothing.
  Invalid(String),
  /// Holds the sanitized name, which may equal the raw input.
  Valid(String),
}

impl BranchNameValidation {
  pub fn classify(raw: &str, sanitizer: &dyn Sanitizer) -> Self {
    let sanitized = sanitizer.sanitize(raw);
    if sanitized.is_empty() {
      BranchNameValidation::Invalid(raw.to_string())
    } else {
      BranchNameValidation::Valid(sanitized)
    }
  }

  pub fn is_valid(&self) -> bool {
    matches!(self, BranchNameValidation::Valid(_))
  }
}

impl fmt::Display for BranchNameValidation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BranchNameValidation::Invalid(proposed) => write!(f, "{} is an invalid branch name.", proposed),
      BranchNameValidation::Valid(sanitized) => write!(f, "Will be saved as {}.", sanitized),
    }
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  fn strip_bang(raw: &str) -> String {
    raw.replace('!', "")
  }

  fn strip_slashes(raw: &str) -> String {
    raw.trim_matches('/').to_string()
  }

  #[test]
  fn test_empty_sanitized_is_invalid_with_raw() {
    let validation = BranchNameValidation::classify("///", &strip_slashes);

    assert_eq!(validation, BranchNameValidation::Invalid("///".to_string()));
    assert!(!validation.is_valid());
    assert_eq!(validation.to_string(), "/// is an invalid branch name.");
  }

  #[test]
  fn test_rewritten_name_is_valid_with_sanitized() {
    let validation = BranchNameValidation::classify("feature/x!", &strip_bang);

    assert_eq!(validation, BranchNameValidation::Valid("feature/x".to_string()));
    assert!(validation.to_string().starts_with("Will be saved as feature/x"));
  }

  #[test]
  fn test_unchanged_name_still_reports_valid() {
    let validation = BranchNameValidation::classify("develop", &strip_bang);

    assert_eq!(validation, BranchNameValidation::Valid("develop".to_string()));
    assert_eq!(validation.to_string(), "Will be saved as develop.");
  }

  #[test]
  fn test_message_always_contains_its_subject() {
    let sanitizer = |raw: &str| if raw.contains(' ') { String::new() } else { raw.to_uppercase() };
    for raw in ["a b", "main", "x", " ", "feature/y"] {
      match BranchNameValidation::classify(raw, &sanitizer) {
        validation @ BranchNameValidation::Invalid(_) => {
          assert!(sanitizer(raw).is_empty());
          assert!(validation.to_string().contains(raw));
        },
        validation @ BranchNameValidation::Valid(_) => {
          assert!(validation.to_string().contains(&sanitizer(raw)));
        },
      }
    }
  }
}
