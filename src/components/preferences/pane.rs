use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::Line,
  widgets::{Block, Borders, Paragraph},
};
use tracing::info;

use super::{
  FocusAction, Sanitizer,
  branch_choice::{is_custom, radio_options},
  focus_action,
};
use crate::{
  action::Action,
  components::{
    Component,
    common::{InstructionFooter, RadioButton, RefNameInput, TextInput},
  },
  git::GitPreferences,
  tui::{Event, Frame},
};

const DEFAULT_BRANCH_HEADING: &str = "Default branch for new repositories";
const GIT_SETTINGS_DESCRIPTION: &str = "These preferences will edit your global Git config.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneOptions {
  pub suggested_branch_names: Vec<String>,
  /// Feature gate for the whole default branch section.
  pub default_branch_setting: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneFocus {
  Name,
  Email,
  /// Index into the radio options, the last one is "Other…".
  Radio(usize),
  CustomInput,
}

/// Edits name, email and the default branch. Every edit is forwarded as an action, the values
/// themselves only change when the host hands new props back through [`PreferencesPane::set_props`].
pub struct PreferencesPane {
  props: GitPreferences,
  options: PaneOptions,
  sanitizer: Arc<dyn Sanitizer>,
  name_input: TextInput,
  email_input: TextInput,
  custom_input: Option<RefNameInput>,
  focus: PaneFocus,
  instruction_footer: InstructionFooter,
}

impl PreferencesPane {
  pub fn new(props: GitPreferences, options: PaneOptions, sanitizer: Arc<dyn Sanitizer>) -> Self {
    let mut pane = PreferencesPane {
      name_input: TextInput::new("Name", &props.name),
      email_input: TextInput::new("Email", &props.email),
      props,
      options,
      sanitizer,
      custom_input: None,
      focus: PaneFocus::Name,
      instruction_footer: InstructionFooter::default(),
    };
    pane.name_input.set_focused(true);
    pane.mount_custom_input();
    pane
  }

  pub fn props(&self) -> &GitPreferences {
    &self.props
  }

  pub fn focus(&self) -> PaneFocus {
    self.focus
  }

  pub fn custom_input(&self) -> Option<&RefNameInput> {
    self.custom_input.as_ref()
  }

  pub fn is_custom(&self) -> bool {
    self.options.default_branch_setting && is_custom(&self.props.default_branch, &self.options.suggested_branch_names)
  }

  pub fn radio_options(&self) -> Vec<RadioButton> {
    if !self.options.default_branch_setting {
      return vec![];
    }
    radio_options(&self.props.default_branch, &self.options.suggested_branch_names)
  }

  /// Takes the host's current values, re-renders the widgets from them and runs the focus rule.
  pub fn set_props(&mut self, props: GitPreferences) {
    let previous = std::mem::replace(&mut self.props, props);
    self.name_input.set_value(&self.props.name);
    self.email_input.set_value(&self.props.email);
    self.mount_custom_input();

    if !self.options.default_branch_setting {
      return;
    }
    if previous.default_branch != self.props.default_branch
      && let Some(custom_input) = self.custom_input.as_mut()
    {
      custom_input.set_value(&self.props.default_branch);
    }
    if focus_action(&previous.default_branch, &self.props.default_branch) == FocusAction::FocusCustomInput
      && let Some(custom_input) = self.custom_input.as_mut()
    {
      info!("PreferencesPane: switched to a custom default branch, focusing the input");
      custom_input.focus();
      self.name_input.set_focused(false);
      self.email_input.set_focused(false);
      self.focus = PaneFocus::CustomInput;
    }
  }

  /// The custom input exists exactly while the selection is custom.
  fn mount_custom_input(&mut self) {
    if self.is_custom() {
      if self.custom_input.is_none() {
        info!("PreferencesPane: mounting custom branch input with '{}'", self.props.default_branch);
        self.custom_input = Some(RefNameInput::new(&self.props.default_branch));
      }
      return;
    }

    if self.custom_input.take().is_some() {
      info!("PreferencesPane: unmounting custom branch input");
    }
    if self.focus == PaneFocus::CustomInput || !self.focus_order().contains(&self.focus) {
      self.focus = self.selected_radio_focus();
    }
  }

  fn selected_radio_focus(&self) -> PaneFocus {
    match self.radio_options().iter().position(|radio| radio.checked) {
      Some(index) => PaneFocus::Radio(index),
      None => PaneFocus::Name,
    }
  }

  fn focus_order(&self) -> Vec<PaneFocus> {
    let mut order = vec![PaneFocus::Name, PaneFocus::Email];
    order.extend((0..self.radio_options().len()).map(PaneFocus::Radio));
    if self.custom_input.is_some() {
      order.push(PaneFocus::CustomInput);
    }
    order
  }

  /// Moves focus one place, wrapping around. Leaving the custom input is a blur and forwards its text.
  fn move_focus(&mut self, forward: bool) -> Option<Action> {
    let order = self.focus_order();
    let current = order.iter().position(|focus| *focus == self.focus).unwrap_or(0);
    let next = if forward { (current + 1) % order.len() } else { (current + order.len() - 1) % order.len() };
    self.set_focus(order[next])
  }

  fn set_focus(&mut self, focus: PaneFocus) -> Option<Action> {
    let previous = self.focus;
    self.focus = focus;
    self.name_input.set_focused(focus == PaneFocus::Name);
    self.email_input.set_focused(focus == PaneFocus::Email);

    match (previous, focus) {
      (PaneFocus::CustomInput, PaneFocus::CustomInput) => None,
      (PaneFocus::CustomInput, _) => {
        let value = self.custom_input.as_mut()?.blur();
        Some(Action::DefaultBranchChanged(value))
      },
      (_, PaneFocus::CustomInput) => {
        if let Some(custom_input) = self.custom_input.as_mut() {
          custom_input.focus();
        }
        None
      },
      _ => None,
    }
  }

  pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
    match key {
      KeyEvent { code: KeyCode::Tab | KeyCode::Down, .. } => return self.move_focus(true),
      KeyEvent { code: KeyCode::BackTab | KeyCode::Up, .. } => return self.move_focus(false),
      KeyEvent { code: KeyCode::Char('s' | 'c' | 'z'), modifiers: KeyModifiers::CONTROL, .. } => return None,
      _ => {},
    }

    match self.focus {
      PaneFocus::Name => self.name_input.handle_key_event(key).map(Action::NameChanged),
      PaneFocus::Email => self.email_input.handle_key_event(key).map(Action::EmailChanged),
      PaneFocus::Radio(index) => {
        match key.code {
          KeyCode::Char(' ') | KeyCode::Enter => {
            let radio = self.radio_options().into_iter().nth(index)?;
            info!("PreferencesPane: selected default branch option '{}'", radio.label);
            Some(Action::DefaultBranchChanged(radio.on_selected()))
          },
          _ => None,
        }
      },
      PaneFocus::CustomInput => {
        match key.code {
          KeyCode::Enter => self.move_focus(true),
          _ => {
            self.custom_input.as_mut()?.handle_key_event(key);
            None
          },
        }
      },
    }
  }

  pub fn handle_paste(&mut self, text: &str) -> Option<Action> {
    match self.focus {
      PaneFocus::Name => self.name_input.insert_str(text).map(Action::NameChanged),
      PaneFocus::Email => self.email_input.insert_str(text).map(Action::EmailChanged),
      PaneFocus::CustomInput => {
        self.custom_input.as_mut()?.insert_str(text);
        None
      },
      PaneFocus::Radio(_) => None,
    }
  }

  /// The custom input's text while it still has focus and differs from the props. Saving commits it like a blur.
  pub fn commit_pending(&self) -> Option<Action> {
    if self.focus != PaneFocus::CustomInput {
      return None;
    }
    let value = self.custom_input.as_ref()?.value();
    (value != self.props.default_branch).then_some(Action::DefaultBranchChanged(value))
  }

  fn instructions(&self) -> Vec<&'static str> {
    let mut instructions = vec!["tab/↓: Next", "shift+tab/↑: Previous"];
    if let PaneFocus::Radio(_) = self.focus {
      instructions.push("space: Select");
    }
    if self.focus == PaneFocus::CustomInput {
      instructions.push("enter: Done");
    }
    instructions.push("ctrl+s: Save");
    instructions.push("esc: Quit");
    instructions
  }

  fn render_default_branch_setting(&mut self, f: &mut Frame<'_>, area: Rect) {
    let radios = self.radio_options();
    let custom_height = if self.custom_input.is_some() { 4 } else { 0 };
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([
        Constraint::Length(2),
        Constraint::Length(radios.len() as u16),
        Constraint::Length(custom_height),
        Constraint::Length(2),
      ])
      .split(area);

    let heading = Paragraph::new(Line::from(DEFAULT_BRANCH_HEADING))
      .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
    f.render_widget(heading, chunks[0]);

    let lines: Vec<Line<'static>> = radios
      .iter()
      .enumerate()
      .map(|(index, radio)| radio.render(self.focus == PaneFocus::Radio(index)))
      .collect();
    f.render_widget(Paragraph::new(lines), chunks[1]);

    if let Some(custom_input) = self.custom_input.as_mut() {
      custom_input.render(f, chunks[2], self.sanitizer.as_ref());
    }

    let description = Paragraph::new(Line::from(GIT_SETTINGS_DESCRIPTION)).style(Style::default().fg(Color::Gray));
    f.render_widget(description, chunks[3]);
  }
}

#[async_trait::async_trait]
impl Component for PreferencesPane {
  async fn handle_events(&mut self, event: Option<Event>) -> Result<Option<Action>> {
    match event {
      Some(Event::Key(key)) => self.handle_key_events(key).await,
      Some(Event::Paste(text)) => Ok(self.handle_paste(&text)),
      _ => Ok(None),
    }
  }

  async fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<Action>> {
    Ok(self.handle_key_event(key))
  }

  fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
    let block = Block::default().title("Git").borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
      .split(inner);

    self.name_input.render(f, chunks[0]);
    self.email_input.render(f, chunks[1]);
    if self.options.default_branch_setting {
      self.render_default_branch_setting(f, chunks[2]);
    }
    self.instruction_footer.render(f, chunks[3], &self.instructions());
    Ok(())
  }
}
