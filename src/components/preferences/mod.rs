pub mod branch_choice;
pub mod focus;
pub mod pane;
pub mod validation;

pub use branch_choice::{OTHER_NAME_FOR_DEFAULT_BRANCH, is_custom, radio_options};
pub use focus::{FocusAction, focus_action};
pub use pane::{PaneOptions, PreferencesPane};
pub use validation::{BranchNameValidation, Sanitizer};
