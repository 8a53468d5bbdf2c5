//! Status bar: the last message plus key hints.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Theme;

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Neutral information
    Info,
    /// Something worked
    Success,
    /// Something failed
    Error,
}

/// Status bar state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBar {
    message: String,
    kind: StatusKind,
}

const HINTS_VISIBLE: &str =
    "↑↓ select  ←→ adjust (⇧ coarse)  ⏎ toggle/channel  Tab hide  r revert  w save  s export  y copy  q quit";
const HINTS_HIDDEN: &str = "Tab show controls  r revert  s export  y copy  q quit";

impl StatusBar {
    /// A status bar showing `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Info,
        }
    }

    /// Replaces the message.
    pub fn set(&mut self, kind: StatusKind, message: impl Into<String>) {
        self.kind = kind;
        self.message = message.into();
    }

    /// Current message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Current severity.
    #[must_use]
    pub const fn kind(&self) -> StatusKind {
        self.kind
    }

    /// Draws the bar. Hints depend on whether the controls are shown.
    pub fn render(&self, f: &mut Frame, area: Rect, controls_visible: bool, theme: &Theme) {
        let color = match self.kind {
            StatusKind::Info => theme.text,
            StatusKind::Success => theme.success,
            StatusKind::Error => theme.error,
        };
        let hints = if controls_visible {
            HINTS_VISIBLE
        } else {
            HINTS_HIDDEN
        };

        let lines = vec![
            Line::from(Span::styled(
                self.message.clone(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(hints, Style::default().fg(theme.text_muted))),
        ];

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(theme.primary)),
        );
        f.render_widget(paragraph, area);
    }
}
