use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, Deserialize)]
pub enum Action {
  DefaultBranchChanged(String),
  EmailChanged(String),
  Error(String),
  ExitError,
  NameChanged(String),
  Quit,
  Render,
  Resize(u16, u16),
  Resume,
  Save,
  Saved,
  Suspend,
  Tick,
}
