//! Terminal tuning panel.
//!
//! `tunespec tune <SPEC>` opens a spec in a two-pane view: the control panel
//! on the left and a live preview on the right. The preview is a maintainer
//! client of the spec, so every adjustment made in the panel shows up there
//! through the same fan-out a running program would see. Hiding the controls
//! leaves only the preview.

pub mod component;
pub mod control_panel;
pub mod preview;
pub mod status_bar;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::cell::Cell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use crate::config::Config;
use crate::controls::ControlPanel;
use crate::export;
use crate::spec::TunableSpec;

pub use component::{Component, PanelEvent};
pub use control_panel::ControlPanelView;
pub use preview::Preview;
pub use status_bar::{StatusBar, StatusKind};
pub use theme::Theme;

/// State of one tuning session.
pub struct TuneApp {
    spec: Rc<TunableSpec>,
    view: ControlPanelView,
    preview: Rc<Preview>,
    controls_shown: Rc<Cell<bool>>,
    status: StatusBar,
    theme: Theme,
    export_dir: PathBuf,
    should_quit: bool,
}

impl TuneApp {
    /// Builds a session over `spec` using the configured UI settings.
    pub fn new(spec: Rc<TunableSpec>, config: &Config) -> Result<Self> {
        let panel = ControlPanel::new(Rc::clone(&spec)).with_slider_steps(config.ui.slider_steps);
        let preview = Preview::attach(&spec).context("Failed to attach live preview")?;

        spec.set_controls_visible(config.ui.show_controls_on_startup);
        let controls_shown = Rc::new(Cell::new(false));
        spec.with_controls_visibility(&controls_shown, |shown: &Cell<bool>, visible| {
            shown.set(visible);
        });

        let status = StatusBar::new(format!("Tuning {} ({} entries)", spec.name(), spec.len()));

        Ok(Self {
            view: ControlPanelView::new(panel),
            preview,
            controls_shown,
            status,
            theme: Theme::from_mode(config.ui.theme_mode),
            export_dir: config.export.output_dir.clone(),
            should_quit: false,
            spec,
        })
    }

    /// Whether the session has ended.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Current status bar state.
    #[must_use]
    pub const fn status(&self) -> &StatusBar {
        &self.status
    }

    /// The live preview.
    #[must_use]
    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    /// Whether the control pane is laid out.
    #[must_use]
    pub fn controls_shown(&self) -> bool {
        self.controls_shown.get()
    }

    /// Handles one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Char('t') => {
                let visible = self.view.panel().toggle_visibility();
                let text = if visible { "Controls shown" } else { "Controls hidden" };
                self.status.set(StatusKind::Info, text);
            }
            KeyCode::Char('r') => {
                let changed = self.view.panel().revert();
                self.status.set(
                    StatusKind::Info,
                    format!("Reverted {} value(s) to the loaded file", changed.len()),
                );
            }
            KeyCode::Char('w') => self.save(),
            KeyCode::Char('s') => self.export(),
            KeyCode::Char('y') => self.copy(),
            _ if self.controls_shown.get() => {
                if let Some(event) = self.view.handle_input(key) {
                    self.apply(event);
                }
            }
            _ => {}
        }
    }

    /// Draws the whole screen.
    pub fn draw(&self, f: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(3)])
            .split(f.area());

        if self.controls_shown.get() {
            let panes = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
                .split(rows[0]);
            self.view.render(f, panes[0], &self.theme);
            self.preview.render(f, panes[1], &self.theme);
        } else {
            self.preview.render(f, rows[0], &self.theme);
        }

        self.status.render(f, rows[1], self.controls_shown.get(), &self.theme);
    }

    fn apply(&mut self, event: PanelEvent) {
        match event {
            PanelEvent::Changed(key) => {
                let value = self
                    .spec
                    .value_for_key(&key)
                    .map(|v| crate::cli::common::describe_value(&v))
                    .unwrap_or_default();
                self.status.set(StatusKind::Info, format!("{key} = {value}"));
            }
            PanelEvent::ChannelChanged(key) => {
                let channel = self.view.panel().active_channel(&key);
                self.status
                    .set(StatusKind::Info, format!("{key}: editing {channel:?} channel"));
            }
            PanelEvent::Failed(message) => self.status.set(StatusKind::Error, message),
        }
    }

    fn save(&mut self) {
        match self.spec.save() {
            Ok(path) => self
                .status
                .set(StatusKind::Success, format!("Saved {}", path.display())),
            Err(err) => self.status.set(StatusKind::Error, format!("Save failed: {err}")),
        }
    }

    fn export(&mut self) {
        let path = export::default_export_path(&self.export_dir, self.spec.name());
        match self.spec.export_to(&path) {
            Ok(()) => self
                .status
                .set(StatusKind::Success, format!("Exported to {}", path.display())),
            Err(err) => self.status.set(StatusKind::Error, format!("Export failed: {err}")),
        }
    }

    fn copy(&mut self) {
        let result = self
            .view
            .panel()
            .share()
            .map_err(anyhow::Error::from)
            .and_then(|text| export::copy_to_clipboard(&text));
        match result {
            Ok(()) => self
                .status
                .set(StatusKind::Success, "Copied spec JSON to the clipboard"),
            Err(err) => self
                .status
                .set(StatusKind::Error, format!("Copy failed: {err:#}")),
        }
    }
}

/// Setup terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(app: &mut TuneApp, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    while !app.should_quit() {
        terminal.draw(|f| app.draw(f))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }
    Ok(())
}

/// Opens the tuning panel on `spec` and blocks until the user quits.
pub fn run(spec: Rc<TunableSpec>, config: &Config) -> Result<()> {
    let mut app = TuneApp::new(spec, config)?;
    let mut terminal = setup_terminal()?;
    let result = run_tui(&mut app, &mut terminal);
    restore_terminal(terminal)?;
    result
}
