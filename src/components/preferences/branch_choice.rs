use crate::components::common::RadioButton;

/// Value forwarded when "Other…" is picked, it pre-fills the custom input.
pub const OTHER_NAME_FOR_DEFAULT_BRANCH: &str = "";

pub const OTHER_LABEL: &str = "Other…";

pub fn is_custom(selected: &str, suggested: &[String]) -> bool {
  !suggested.iter().any(|name| name == selected)
}

/// One radio per suggested name, in order, followed by "Other…". At most one is checked.
pub fn radio_options(selected: &str, suggested: &[String]) -> Vec<RadioButton> {
  let mut options: Vec<RadioButton> =
    suggested.iter().map(|name| RadioButton::new(name, name, name == selected)).collect();
  options.push(RadioButton::new(OTHER_NAME_FOR_DEFAULT_BRANCH, OTHER_LABEL, is_custom(selected, suggested)));
  options
}
