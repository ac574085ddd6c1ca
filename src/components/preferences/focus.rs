use super::branch_choice::OTHER_NAME_FOR_DEFAULT_BRANCH;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusAction {
  None,
  FocusCustomInput,
}

/// Edge triggered: only a change *into* the custom sentinel asks for focus.
pub fn focus_action(previous: &str, current: &str) -> FocusAction {
  if previous != current && current == OTHER_NAME_FOR_DEFAULT_BRANCH {
    FocusAction::FocusCustomInput
  } else {
    FocusAction::None
  }
}
