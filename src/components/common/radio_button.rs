use ratatui::{
  style::{Color, Modifier, Style},
  text::{Line, Span},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioButton {
  pub value: String,
  pub label: String,
  pub checked: bool,
}

impl RadioButton {
  pub fn new(value: &str, label: &str, checked: bool) -> Self {
    RadioButton { value: value.to_string(), label: label.to_string(), checked }
  }

  /// The value to forward when the user picks this option.
  pub fn on_selected(&self) -> String {
    self.value.clone()
  }

  pub fn render(&self, focused: bool) -> Line<'static> {
    let marker = if self.checked { "(*)" } else { "( )" };
    let prefix = if focused { "> " } else { "  " };
    let style = if focused {
      Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else if self.checked {
      Style::default().fg(Color::LightGreen)
    } else {
      Style::default().fg(Color::White)
    };
    Line::from(vec![Span::raw(prefix), Span::styled(format!("{} {}", marker, self.label), style)])
  }
}
