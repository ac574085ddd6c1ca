use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::Rect;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{error, info};

use crate::{
  action::Action,
  cli::Cli,
  components::{
    Component,
    error_view::ErrorView,
    preferences::{BranchNameValidation, PaneOptions, PreferencesPane, Sanitizer},
  },
  config::Config,
  git::{Git2Config, GitConfigStore, GitPreferences, PreferenceChanges, RefNameSanitizer},
  tui::{self, Tui},
};

/// Hosts the preferences pane. Owns the canonical values and is the only place they change.
pub struct App {
  pub preferences: GitPreferences,
  pub saved: GitPreferences,
  pub pane: PreferencesPane,
  pub error_view: ErrorView,
  pub store: Arc<dyn GitConfigStore>,
  pub sanitizer: Arc<dyn Sanitizer>,
  pub default_branch_setting: bool,
  pub should_quit: bool,
  pub should_suspend: bool,
  pub tick_rate: f64,
  pub frame_rate: f64,
}

impl App {
  pub async fn new(cli: &Cli) -> Result<Self> {
    let config = Config::new()?;
    let mut app = Self::with_store(
      config,
      cli.disable_default_branch_setting,
      Arc::new(Git2Config::global()),
      Arc::new(RefNameSanitizer),
    )
    .await?;
    app.tick_rate = cli.tick_rate;
    app.frame_rate = cli.frame_rate;
    Ok(app)
  }

  pub async fn with_store(
    config: Config,
    disable_default_branch_setting: bool,
    store: Arc<dyn GitConfigStore>,
    sanitizer: Arc<dyn Sanitizer>,
  ) -> Result<Self> {
    let preferences = store.load().await?;
    let default_branch_setting = config.default_branch_setting && !disable_default_branch_setting;
    info!("Default branch setting enabled: {}", default_branch_setting);
    let options =
      PaneOptions { suggested_branch_names: config.suggested_branch_names.0.clone(), default_branch_setting };
    let pane = PreferencesPane::new(preferences.clone(), options, sanitizer.clone());
    Ok(Self {
      saved: preferences.clone(),
      preferences,
      pane,
      error_view: ErrorView::default(),
      store,
      sanitizer,
      default_branch_setting,
      should_quit: false,
      should_suspend: false,
      tick_rate: 4.0,
      frame_rate: 30.0,
    })
  }

  /// Keys the host handles before the pane sees them.
  pub fn global_key_action(&self, key: KeyEvent) -> Option<Action> {
    match key {
      KeyEvent { code: KeyCode::Char('c' | 'C'), modifiers: KeyModifiers::CONTROL, .. } => Some(Action::Quit),
      KeyEvent { code: KeyCode::Char('s' | 'S'), modifiers: KeyModifiers::CONTROL, .. } => Some(Action::Save),
      KeyEvent { code: KeyCode::Char('z' | 'Z'), modifiers: KeyModifiers::CONTROL, .. } => Some(Action::Suspend),
      KeyEvent { code: KeyCode::Esc, .. } if !self.error_view.is_visible() => Some(Action::Quit),
      _ => None,
    }
  }

  pub async fn handle_event(&mut self, event: tui::Event) -> Result<Option<Action>> {
    if self.error_view.is_visible() {
      return self.error_view.handle_events(Some(event)).await;
    }
    if let tui::Event::Key(key) = event
      && self.global_key_action(key).is_some()
    {
      return Ok(None);
    }
    self.pane.handle_events(Some(event)).await
  }

  pub async fn handle_action(&mut self, action: Action) -> Result<Option<Action>> {
    match action {
      Action::NameChanged(name) => {
        self.preferences.name = name;
        self.pane.set_props(self.preferences.clone());
      },
      Action::EmailChanged(email) => {
        self.preferences.email = email;
        self.pane.set_props(self.preferences.clone());
      },
      Action::DefaultBranchChanged(default_branch) => self.set_default_branch(default_branch),
      Action::Save => {
        if let Some(Action::DefaultBranchChanged(default_branch)) = self.pane.commit_pending() {
          self.set_default_branch(default_branch);
        }
        return match self.save().await {
          Ok(()) => Ok(Some(Action::Saved)),
          Err(message) => Ok(Some(Action::Error(message))),
        };
      },
      Action::Saved => info!("Git preferences saved"),
      Action::Error(message) => {
        error!("{}", message);
        self.error_view.set_message(message);
      },
      Action::Quit => self.should_quit = true,
      Action::Suspend => self.should_suspend = true,
      Action::Resume => self.should_suspend = false,
      _ => {},
    }
    Ok(None)
  }

  fn set_default_branch(&mut self, default_branch: String) {
    info!("Default branch changed to '{}'", default_branch);
    self.preferences.default_branch = default_branch;
    self.pane.set_props(self.preferences.clone());
  }

  /// Writes whatever differs from the last save. The default branch is sanitized again first.
  async fn save(&mut self) -> Result<(), String> {
    let mut target = self.preferences.clone();
    if self.default_branch_setting {
      if target.default_branch.is_empty() {
        return Err("Enter a name for the default branch before saving.".to_string());
      }
      match BranchNameValidation::classify(&target.default_branch, self.sanitizer.as_ref()) {
        BranchNameValidation::Valid(sanitized) => target.default_branch = sanitized,
        invalid @ BranchNameValidation::Invalid(_) => return Err(invalid.to_string()),
      }
    } else {
      target.default_branch = self.saved.default_branch.clone();
    }

    let changes = PreferenceChanges::between(&self.saved, &target);
    if changes.is_empty() {
      info!("Nothing to save");
      return Ok(());
    }
    self.store.save(&changes).await.map_err(|e| format!("Failed to save git config: {}", e))?;

    self.saved = target.clone();
    if target != self.preferences {
      self.preferences = target;
      self.pane.set_props(self.preferences.clone());
    }
    Ok(())
  }

  fn draw(&mut self, tui: &mut Tui, action_tx: &UnboundedSender<Action>) -> Result<()> {
    let mut draw_result = Ok(());
    tui.draw(|f| {
      draw_result = self.pane.draw(f, f.area()).and_then(|_| self.error_view.draw(f, f.area()));
    })?;
    if let Err(e) = draw_result {
      action_tx.send(Action::Error(format!("Failed to draw: {:?}", e)))?;
    }
    Ok(())
  }

  pub async fn run(&mut self) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel();

    let mut tui = Tui::new()?.tick_rate(self.tick_rate).frame_rate(self.frame_rate);
    tui.enter()?;

    loop {
      if let Some(e) = tui.next().await {
        match e {
          tui::Event::Quit => action_tx.send(Action::Quit)?,
          tui::Event::Tick => action_tx.send(Action::Tick)?,
          tui::Event::Render => action_tx.send(Action::Render)?,
          tui::Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
          tui::Event::Key(key) => {
            if let Some(action) = self.global_key_action(key) {
              action_tx.send(action)?;
            }
          },
          _ => {},
        }

        if let Some(action) = self.handle_event(e).await? {
          action_tx.send(action)?;
        }
      }

      while let Ok(action) = action_rx.try_recv() {
        if action != Action::Tick && action != Action::Render {
          log::debug!("{action:?}");
        }

        match action {
          Action::Resize(w, h) => {
            tui.resize(Rect::new(0, 0, w, h))?;
            self.draw(&mut tui, &action_tx)?;
          },
          Action::Render => self.draw(&mut tui, &action_tx)?,
          _ => {},
        }
        if let Some(action) = self.handle_action(action).await? {
          action_tx.send(action)?
        };
      }

      if self.should_suspend {
        tui.suspend()?;
        action_tx.send(Action::Resume)?;
        tui = Tui::new()?.tick_rate(self.tick_rate).frame_rate(self.frame_rate);
        tui.enter()?;
      } else if self.should_quit {
        tui.stop()?;
        break;
      }
    }
    tui.exit()?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::{
    components::preferences::pane::PaneFocus,
    config::{AppConfig, SuggestedBranchNames},
    git::mock_git_config::MockGitConfig,
  };

  fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
      code,
      modifiers,
      kind: crossterm::event::KeyEventKind::Press,
      state: crossterm::event::KeyEventState::NONE,
    }
  }

  fn config(default_branch_setting: bool) -> Config {
    Config {
      config: AppConfig::default(),
      default_branch_setting,
      suggested_branch_names: SuggestedBranchNames(vec!["main".to_string(), "master".to_string()]),
    }
  }

  fn strip_invalid(raw: &str) -> String {
    raw.replace('!', "").trim_matches('/').to_string()
  }

  async fn app(store: Arc<MockGitConfig>, default_branch_setting: bool) -> App {
    App::with_store(config(default_branch_setting), false, store, Arc::new(strip_invalid)).await.unwrap()
  }

  fn stored() -> GitPreferences {
    GitPreferences::new("Ryan".to_string(), "ryan@example.com".to_string(), "main".to_string())
  }

  #[tokio::test]
  async fn test_loads_preferences_from_store() {
    let app = app(Arc::new(MockGitConfig::new(stored())), true).await;

    assert_eq!(app.preferences, stored());
    assert_eq!(app.pane.props(), &stored());
  }

  #[tokio::test]
  async fn test_cli_flag_disables_default_branch_setting() {
    let store = Arc::new(MockGitConfig::new(stored()));
    let app = App::with_store(config(true), true, store, Arc::new(strip_invalid)).await.unwrap();

    assert!(!app.default_branch_setting);
    assert!(app.pane.radio_options().is_empty());
  }

  #[tokio::test]
  async fn test_changes_flow_back_into_pane() {
    let mut app = app(Arc::new(MockGitConfig::new(stored())), true).await;

    app.handle_action(Action::NameChanged("Someone".to_string())).await.unwrap();
    app.handle_action(Action::DefaultBranchChanged(String::new())).await.unwrap();

    assert_eq!(app.preferences.name, "Someone");
    assert_eq!(app.pane.props(), &app.preferences);
    assert_eq!(app.pane.focus(), PaneFocus::CustomInput);
  }

  #[tokio::test]
  async fn test_pane_keys_reach_host() {
    let mut app = app(Arc::new(MockGitConfig::new(stored())), true).await;

    let action = app.handle_event(tui::Event::Key(key(KeyCode::Char('!'), KeyModifiers::NONE))).await.unwrap();
    assert_eq!(action, Some(Action::NameChanged("Ryan!".to_string())));
    app.handle_action(action.unwrap()).await.unwrap();

    assert_eq!(app.preferences.name, "Ryan!");
  }

  #[tokio::test]
  async fn test_global_keys() {
    let app = app(Arc::new(MockGitConfig::new(stored())), true).await;

    assert_eq!(app.global_key_action(key(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(Action::Quit));
    assert_eq!(app.global_key_action(key(KeyCode::Char('s'), KeyModifiers::CONTROL)), Some(Action::Save));
    assert_eq!(app.global_key_action(key(KeyCode::Char('z'), KeyModifiers::CONTROL)), Some(Action::Suspend));
    assert_eq!(app.global_key_action(key(KeyCode::Esc, KeyModifiers::NONE)), Some(Action::Quit));
    assert_eq!(app.global_key_action(key(KeyCode::Char('s'), KeyModifiers::NONE)), None);
  }

  #[tokio::test]
  async fn test_global_keys_are_not_typed() {
    let mut app = app(Arc::new(MockGitConfig::new(stored())), true).await;

    let action = app.handle_event(tui::Event::Key(key(KeyCode::Char('s'), KeyModifiers::CONTROL))).await.unwrap();

    assert_eq!(action, None);
    assert_eq!(app.pane.props().name, "Ryan");
  }

  #[tokio::test]
  async fn test_save_writes_only_changes() {
    let store = Arc::new(MockGitConfig::new(stored()));
    let mut app = app(store.clone(), true).await;
    app.handle_action(Action::EmailChanged("other@example.com".to_string())).await.unwrap();

    let action = app.handle_action(Action::Save).await.unwrap();

    assert_eq!(action, Some(Action::Saved));
    assert_eq!(
      store.saves(),
      vec![PreferenceChanges { email: Some("other@example.com".to_string()), ..Default::default() }]
    );
    assert_eq!(store.stored().email, "other@example.com");
  }

  #[tokio::test]
  async fn test_save_without_changes_skips_store() {
    let store = Arc::new(MockGitConfig::new(stored()));
    let mut app = app(store.clone(), true).await;

    let action = app.handle_action(Action::Save).await.unwrap();

    assert_eq!(action, Some(Action::Saved));
    assert!(store.saves().is_empty());
  }

  #[tokio::test]
  async fn test_save_sanitizes_default_branch() {
    let store = Arc::new(MockGitConfig::new(stored()));
    let mut app = app(store.clone(), true).await;
    app.handle_action(Action::DefaultBranchChanged("feature/x!".to_string())).await.unwrap();

    app.handle_action(Action::Save).await.unwrap();

    assert_eq!(store.stored().default_branch, "feature/x");
    assert_eq!(app.preferences.default_branch, "feature/x");
    assert_eq!(app.pane.props().default_branch, "feature/x");
  }

  async fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
      let action = app.handle_event(tui::Event::Key(key(KeyCode::Char(c), KeyModifiers::NONE))).await.unwrap();
      assert_eq!(action, None);
    }
  }

  async fn press_save(app: &mut App) -> Option<Action> {
    let ctrl_s = key(KeyCode::Char('s'), KeyModifiers::CONTROL);
    assert_eq!(app.global_key_action(ctrl_s), Some(Action::Save));
    assert_eq!(app.handle_event(tui::Event::Key(ctrl_s)).await.unwrap(), None);
    app.handle_action(Action::Save).await.unwrap()
  }

  #[tokio::test]
  async fn test_save_commits_focused_custom_input() {
    let store = Arc::new(MockGitConfig::new(stored()));
    let mut app = app(store.clone(), true).await;
    app.handle_action(Action::DefaultBranchChanged(String::new())).await.unwrap();
    assert_eq!(app.pane.focus(), PaneFocus::CustomInput);
    type_text(&mut app, "trunk2").await;

    let action = press_save(&mut app).await;

    assert_eq!(action, Some(Action::Saved));
    assert_eq!(store.stored().default_branch, "trunk2");
    assert_eq!(app.preferences.default_branch, "trunk2");
    assert_eq!(app.pane.focus(), PaneFocus::CustomInput);
  }

  #[tokio::test]
  async fn test_save_commits_edits_to_prefilled_custom_input() {
    let store = Arc::new(MockGitConfig::new(GitPreferences::new(
      "Ryan".to_string(),
      "ryan@example.com".to_string(),
      "develop".to_string(),
    )));
    let mut app = app(store.clone(), true).await;
    // Name, Email, main, master, Other…, then the custom input.
    for _ in 0..5 {
      app.handle_event(tui::Event::Key(key(KeyCode::Tab, KeyModifiers::NONE))).await.unwrap();
    }
    assert_eq!(app.pane.focus(), PaneFocus::CustomInput);
    type_text(&mut app, "2").await;

    let action = press_save(&mut app).await;

    assert_eq!(action, Some(Action::Saved));
    assert_eq!(
      store.saves(),
      vec![PreferenceChanges { default_branch: Some("develop2".to_string()), ..Default::default() }]
    );
  }

  #[tokio::test]
  async fn test_save_rejects_invalid_default_branch() {
    let store = Arc::new(MockGitConfig::new(stored()));
    let mut app = app(store.clone(), true).await;
    app.handle_action(Action::DefaultBranchChanged("///".to_string())).await.unwrap();

    let action = app.handle_action(Action::Save).await.unwrap();

    assert_eq!(action, Some(Action::Error("/// is an invalid branch name.".to_string())));
    assert!(store.saves().is_empty());
  }

  #[tokio::test]
  async fn test_save_rejects_empty_default_branch() {
    let store = Arc::new(MockGitConfig::new(stored()));
    let mut app = app(store.clone(), true).await;
    app.handle_action(Action::DefaultBranchChanged(String::new())).await.unwrap();

    let action = app.handle_action(Action::Save).await.unwrap();

    assert!(matches!(action, Some(Action::Error(_))));
    assert!(store.saves().is_empty());
  }

  #[tokio::test]
  async fn test_save_with_gate_off_keeps_default_branch() {
    let store = Arc::new(MockGitConfig::new(stored()));
    let mut app = app(store.clone(), false).await;
    app.handle_action(Action::DefaultBranchChanged("develop".to_string())).await.unwrap();
    app.handle_action(Action::NameChanged("Someone".to_string())).await.unwrap();

    app.handle_action(Action::Save).await.unwrap();

    assert_eq!(store.saves(), vec![PreferenceChanges { name: Some("Someone".to_string()), ..Default::default() }]);
  }

  #[tokio::test]
  async fn test_failed_save_shows_error_view() {
    let store = Arc::new(MockGitConfig::new(stored()));
    let mut app = app(store.clone(), true).await;
    app.handle_action(Action::NameChanged("should fail".to_string())).await.unwrap();

    let action = app.handle_action(Action::Save).await.unwrap();
    assert!(matches!(&action, Some(Action::Error(message)) if message.contains("Saving git config failed")));
    app.handle_action(action.unwrap()).await.unwrap();
    assert!(app.error_view.is_visible());

    let action = app.handle_event(tui::Event::Key(key(KeyCode::Esc, KeyModifiers::NONE))).await.unwrap();
    assert_eq!(action, Some(Action::ExitError));
    assert!(!app.error_view.is_visible());
    assert!(!app.should_quit);
  }

  #[tokio::test]
  async fn test_quit_and_suspend() {
    let mut app = app(Arc::new(MockGitConfig::new(stored())), true).await;

    app.handle_action(Action::Suspend).await.unwrap();
    assert!(app.should_suspend);
    app.handle_action(Action::Resume).await.unwrap();
    assert!(!app.should_suspend);
    app.handle_action(Action::Quit).await.unwrap();
    assert!(app.should_quit);
  }
}
