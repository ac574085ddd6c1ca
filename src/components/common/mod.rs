pub mod instruction_footer;
pub mod radio_button;
pub mod ref_name_input;
pub mod text_input;

pub use instruction_footer::InstructionFooter;
pub use radio_button::RadioButton;
pub use ref_name_input::RefNameInput;
pub use text_input::TextInput;
