use ratatui::{
  layout::Rect,
  style::{Color, Style},
  widgets::{Block, Borders, Paragraph},
};

use crate::tui::Frame;

#[derive(Debug, Default)]
pub struct InstructionFooter {}

impl InstructionFooter {
  pub fn render(&self, frame: &mut Frame<'_>, area: Rect, instructions: &[&'static str]) {
    if instructions.is_empty() {
      return;
    }

    let paragraph = Paragraph::new(instructions.join(" | "))
      .block(Block::default().borders(Borders::ALL))
      .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
  }
}
