use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
  layout::Rect,
  prelude::Color,
  style::{Modifier, Style},
  widgets::{Block, Borders},
};
use tui_textarea::{CursorMove, Input, TextArea};

use crate::tui::Frame;

/// A labelled single line input whose value is owned by the caller.
///
/// Edits are reported back through [`TextInput::handle_key_event`], the caller decides what the
/// value becomes and pushes it back with [`TextInput::set_value`].
#[derive(Debug, Default)]
pub struct TextInput {
  label: String,
  text_input: TextArea<'static>,
  focused: bool,
}

impl TextInput {
  pub fn new(label: &str, value: &str) -> Self {
    let mut input = TextInput { label: label.to_string(), text_input: TextArea::default(), focused: false };
    input.replace_text(value);
    input
  }

  pub fn value(&self) -> String {
    self.text_input.lines().first().cloned().unwrap_or_default()
  }

  pub fn set_value(&mut self, value: &str) {
    if self.value() != value {
      self.replace_text(value);
    }
  }

  pub fn is_focused(&self) -> bool {
    self.focused
  }

  pub fn set_focused(&mut self, focused: bool) {
    self.focused = focused;
    self.init_style();
  }

  /// Returns the new value when the key changed the text.
  pub fn handle_key_event(&mut self, key_event: KeyEvent) -> Option<String> {
    match key_event {
      KeyEvent { code: KeyCode::Enter, .. } => None,
      KeyEvent { code: KeyCode::Char('m' | 'j'), modifiers: KeyModifiers::CONTROL, .. } => None,
      _ => {
        if self.text_input.input(Input::from(key_event)) { Some(self.value()) } else { None }
      },
    }
  }

  pub fn insert_str(&mut self, text: &str) -> Option<String> {
    let single_line: String = text.lines().collect();
    if self.text_input.insert_str(single_line) { Some(self.value()) } else { None }
  }

  pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
    f.render_widget(&self.text_input, area);
  }

  fn replace_text(&mut self, value: &str) {
    self.text_input = TextArea::new(vec![value.to_string()]);
    self.text_input.move_cursor(CursorMove::End);
    self.init_style();
  }

  fn init_style(&mut self) {
    let border_color = if self.focused { Color::Cyan } else { Color::White };
    self.text_input.set_style(Style::default().fg(Color::White));
    self.text_input.set_cursor_line_style(Style::default());
    self.text_input.set_cursor_style(if self.focused {
      Style::default().add_modifier(Modifier::REVERSED)
    } else {
      Style::default()
    });
    self.text_input.set_block(
      Block::default().borders(Borders::ALL).border_style(Style::default().fg(border_color)).title(self.label.clone()),
    );
  }
}
