use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
  prelude::*,
  widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::Component;
use crate::{action::Action, tui::Frame};

/// Overlay for failures the user should see, such as a rejected save.
#[derive(Debug, Default)]
pub struct ErrorView {
  message: Option<String>,
  scroll: u16,
  last_height: u16,
}

impl ErrorView {
  pub fn set_message(&mut self, message: String) {
    self.message = Some(message);
  }

  pub fn is_visible(&self) -> bool {
    self.message.is_some()
  }

  fn has_scrolled_to_bottom(&self) -> bool {
    match &self.message {
      Some(message) => {
        let total_lines = message.lines().count() as u16;
        self.scroll + self.last_height >= total_lines
      },
      None => false,
    }
  }

  fn clear(&mut self) {
    self.scroll = 0;
    self.message = None;
    self.last_height = 0;
  }
}

#[async_trait::async_trait]
impl Component for ErrorView {
  async fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<Action>> {
    let action = match key.code {
      KeyCode::Up => {
        if self.scroll > 0 {
          self.scroll -= 1;
        }
        None
      },
      KeyCode::Down => {
        if !self.has_scrolled_to_bottom() {
          self.scroll += 1;
        }
        None
      },
      _ => {
        self.clear();
        Some(Action::ExitError)
      },
    };
    Ok(action)
  }

  fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
    let Some(message) = self.message.clone() else {
      return Ok(());
    };
    let popup = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Percentage(30), Constraint::Percentage(40), Constraint::Percentage(30)])
      .split(area)[1];
    let popup = Layout::default()
      .direction(Direction::Horizontal)
      .constraints([Constraint::Percentage(15), Constraint::Percentage(70), Constraint::Percentage(15)])
      .split(popup)[1];

    self.last_height = popup.height.saturating_sub(2);
    let paragraph = Paragraph::new(message)
      .block(Block::default().title("Error").style(Style::default().fg(Color::Red)).borders(Borders::ALL))
      .wrap(Wrap { trim: false })
      .scroll((self.scroll, 0));

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
    Ok(())
  }
}
