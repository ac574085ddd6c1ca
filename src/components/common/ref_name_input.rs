use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
  layout::{Constraint, Direction, Layout, Rect},
  prelude::Color,
  style::{Modifier, Style},
  text::Line,
  widgets::{Block, Borders, Paragraph},
};
use tracing::info;
use tui_textarea::{CursorMove, Input, TextArea};

use crate::{
  components::preferences::{BranchNameValidation, Sanitizer},
  tui::Frame,
};

/// Free-form branch name entry with a live advisory message underneath.
#[derive(Debug, Default)]
pub struct RefNameInput {
  text_input: TextArea<'static>,
  focused: bool,
}

impl RefNameInput {
  pub fn new(initial_value: &str) -> Self {
    let mut text_input = TextArea::new(vec![initial_value.to_string()]);
    text_input.move_cursor(CursorMove::End);
    let mut input = RefNameInput { text_input, focused: false };
    input.init_style();
    input
  }

  pub fn value(&self) -> String {
    self.text_input.lines().first().cloned().unwrap_or_default()
  }

  /// Replaces the text when the host changed the value underneath the input.
  pub fn set_value(&mut self, value: &str) {
    if self.value() != value {
      self.text_input = TextArea::new(vec![value.to_string()]);
      self.text_input.move_cursor(CursorMove::End);
      self.init_style();
    }
  }

  pub fn focus(&mut self) {
    info!("RefNameInput: focused");
    self.focused = true;
    self.init_style();
  }

  /// Drops focus and hands back the raw text so the caller can forward it.
  pub fn blur(&mut self) -> String {
    info!("RefNameInput: blurred with value '{}'", self.value());
    self.focused = false;
    self.init_style();
    self.value()
  }

  pub fn is_focused(&self) -> bool {
    self.focused
  }

  pub fn validation(&self, sanitizer: &dyn Sanitizer) -> BranchNameValidation {
    BranchNameValidation::classify(&self.value(), sanitizer)
  }

  /// Returns true when the text changed. Enter is left to the caller.
  pub fn handle_key_event(&mut self, key_event: KeyEvent) -> bool {
    match key_event {
      KeyEvent { code: KeyCode::Enter, .. } => false,
      KeyEvent { code: KeyCode::Char('m' | 'j'), modifiers: KeyModifiers::CONTROL, .. } => false,
      _ => self.text_input.input(Input::from(key_event)),
    }
  }

  pub fn insert_str(&mut self, text: &str) -> bool {
    let single_line: String = text.lines().collect();
    self.text_input.insert_str(single_line)
  }

  pub fn render(&mut self, f: &mut Frame<'_>, area: Rect, sanitizer: &dyn Sanitizer) {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Length(3), Constraint::Length(1)])
      .split(area);

    let proposed = self.value();
    // Nothing typed yet is not flagged as invalid, the message line stays blank.
    let message = if proposed.is_empty() { None } else { Some(self.validation(sanitizer)) };
    let text_color = match &message {
      Some(validation) if validation.is_valid() => Color::LightGreen,
      Some(_) => Color::LightRed,
      None => Color::White,
    };
    self.text_input.set_style(Style::default().fg(text_color));
    f.render_widget(&self.text_input, chunks[0]);

    if let Some(validation) = message {
      let paragraph = Paragraph::new(Line::from(validation.to_string())).style(Style::default().fg(Color::Gray));
      f.render_widget(paragraph, chunks[1]);
    }
  }

  fn init_style(&mut self) {
    let border_color = if self.focused { Color::Cyan } else { Color::White };
    self.text_input.set_cursor_line_style(Style::default());
    self.text_input.set_cursor_style(if self.focused {
      Style::default().add_modifier(Modifier::REVERSED)
    } else {
      Style::default()
    });
    self.text_input.set_block(
      Block::default().borders(Borders::ALL).border_style(Style::default().fg(border_color)).title("Branch name"),
    );
  }
}
