//! Component trait for panel widgets.

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::tui::Theme;

/// A widget that handles its own keys and draws itself.
pub trait Component {
    /// What the component reports to the app
    type Event;

    /// Handles a key. Returns an event when the app needs to act on it.
    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event>;

    /// Draws the component inside `area`.
    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme);
}

/// Events the tuning panel raises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    /// A value changed
    Changed(String),
    /// The key was valid but changing the value failed
    Failed(String),
    /// The color well now edits another channel
    ChannelChanged(String),
}
