//! Terminal rendering and key handling for the control panel.
//!
//! Sliders draw as a bar with the value and range, switches as `[on]`/`[off]`,
//! and color wells as a swatch followed by their channels with the active one
//! highlighted.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::cli::common::format_number;
use crate::controls::{Control, ControlPanel, ControlState};
use crate::error::TunableResult;
use crate::models::{ColorChannel, ValueKind};
use crate::tui::component::{Component, PanelEvent};
use crate::tui::Theme;

/// Nudges applied by a coarse (shifted) arrow key.
const COARSE_STEPS: i32 = 10;

/// Width of the slider bar in cells.
const BAR_WIDTH: usize = 24;

/// Panel widget wrapping the headless control model.
#[derive(Debug)]
pub struct ControlPanelView {
    panel: ControlPanel,
}

impl ControlPanelView {
    /// Wraps a control model.
    #[must_use]
    pub const fn new(panel: ControlPanel) -> Self {
        Self { panel }
    }

    /// The underlying model.
    #[must_use]
    pub const fn panel(&self) -> &ControlPanel {
        &self.panel
    }

    fn selected_key(&self) -> Option<String> {
        self.panel.selected().map(|c| c.key.clone())
    }

    fn report(&self, result: TunableResult<bool>) -> Option<PanelEvent> {
        let key = self.selected_key()?;
        match result {
            Ok(true) => Some(PanelEvent::Changed(key)),
            Ok(false) => None,
            Err(err) => Some(PanelEvent::Failed(format!("{key}: {err}"))),
        }
    }

    fn row(&self, index: usize, control: &Control, theme: &Theme) -> ListItem<'static> {
        let modified = self
            .panel
            .spec()
            .modified_keys()
            .iter()
            .any(|k| k == &control.key);
        let label_style = if modified {
            Style::default().fg(theme.modified)
        } else {
            Style::default().fg(theme.text)
        };

        let mut spans = vec![
            Span::styled(format!("{:<20} ", control.label), label_style),
        ];

        match self.panel.state(index) {
            Some(Ok(state)) => spans.extend(state_spans(state, theme)),
            Some(Err(err)) => spans.push(Span::styled(err.to_string(), Style::default().fg(theme.error))),
            None => {}
        }

        ListItem::new(Line::from(spans))
    }
}

impl Component for ControlPanelView {
    type Event = PanelEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<PanelEvent> {
        let coarse = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.panel.select_previous();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.panel.select_next();
                None
            }
            KeyCode::Left | KeyCode::Char('h') => {
                let steps = if coarse { -COARSE_STEPS } else { -1 };
                let result = self.panel.nudge(steps);
                self.report(result)
            }
            KeyCode::Right | KeyCode::Char('l') => {
                let steps = if coarse { COARSE_STEPS } else { 1 };
                let result = self.panel.nudge(steps);
                self.report(result)
            }
            KeyCode::Char('H') => {
                let result = self.panel.nudge(-COARSE_STEPS);
                self.report(result)
            }
            KeyCode::Char('L') => {
                let result = self.panel.nudge(COARSE_STEPS);
                self.report(result)
            }
            KeyCode::Home => {
                let result = self.panel.set_fraction(0.0);
                self.report(result)
            }
            KeyCode::End => {
                let result = self.panel.set_fraction(1.0);
                self.report(result)
            }
            KeyCode::Enter | KeyCode::Char(' ' | 'c') => {
                let is_color = self
                    .panel
                    .selected()
                    .is_some_and(|c| c.kind == ValueKind::Color);
                let result = self.panel.activate();
                if is_color && result.is_ok() {
                    self.selected_key().map(PanelEvent::ChannelChanged)
                } else {
                    self.report(result)
                }
            }
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let items: Vec<ListItem> = self
            .panel
            .controls()
            .iter()
            .enumerate()
            .map(|(index, control)| self.row(index, control, theme))
            .collect();

        let title = format!(" {} ", self.panel.spec().name());
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(title, theme.title()))
                    .border_style(Style::default().fg(theme.primary)),
            )
            .highlight_style(theme.selected())
            .highlight_symbol("▶ ");

        let mut state = ListState::default();
        if !self.panel.is_empty() {
            state.select(Some(self.panel.selected_index()));
        }
        f.render_stateful_widget(list, area, &mut state);
    }
}

fn state_spans(state: ControlState, theme: &Theme) -> Vec<Span<'static>> {
    match state {
        ControlState::Slider(slider) => {
            let (filled, empty) = slider_bar(slider.fraction(), BAR_WIDTH);
            vec![
                Span::styled(filled, Style::default().fg(theme.gauge_filled)),
                Span::styled(empty, Style::default().fg(theme.gauge_empty)),
                Span::styled(
                    format!(" {:>8}", format_number(slider.value)),
                    Style::default().fg(theme.text),
                ),
                Span::styled(
                    format!("  {} .. {}", format_number(slider.min), format_number(slider.max)),
                    Style::default().fg(theme.text_muted),
                ),
            ]
        }
        ControlState::Switch(flag) => {
            let (text, color) = if flag {
                ("[on] ", theme.success)
            } else {
                ("[off]", theme.text_muted)
            };
            vec![Span::styled(
                text.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]
        }
        ControlState::Color { color, channel } => {
            let mut spans = vec![
                Span::styled("    ", Style::default().bg(color.to_ratatui_color())),
                Span::styled(format!(" {} ", color.to_hex()), Style::default().fg(theme.text)),
            ];
            for ch in ColorChannel::ALL {
                let text = format!(" {}:{:>3}", ch.letter(), color.channel(ch));
                let style = if ch == channel {
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.text_secondary)
                };
                spans.push(Span::styled(text, style));
            }
            spans
        }
    }
}

/// Filled and empty halves of a text slider bar.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn slider_bar(fraction: f64, width: usize) -> (String, String) {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    ("█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::TunableSpec;
    use ratatui::{backend::TestBackend, Terminal};
    use std::rc::Rc;

    fn view() -> ControlPanelView {
        let spec = TunableSpec::from_json_str(
            "Demo",
            r##"[
                { "key": "Speed", "sliderValue": 5, "sliderMinValue": 0, "sliderMaxValue": 10 },
                { "key": "Sound", "switchValue": false },
                { "key": "Tint", "colorValue": "#FF0000" }
            ]"##,
        )
        .unwrap();
        ControlPanelView::new(ControlPanel::new(Rc::new(spec)).with_slider_steps(10))
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_slider_bar_fill() {
        assert_eq!(slider_bar(0.5, 4), ("██".to_string(), "░░".to_string()));
        assert_eq!(slider_bar(2.0, 4).0.chars().count(), 4);
        assert_eq!(slider_bar(0.0, 4).1.chars().count(), 4);
    }

    #[test]
    fn test_arrow_keys_nudge_slider() {
        let mut view = view();
        assert_eq!(
            view.handle_input(press(KeyCode::Right)),
            Some(PanelEvent::Changed("Speed".to_string()))
        );
        assert_eq!(view.panel().spec().double_for_key("Speed").unwrap(), 6.0);

        let shifted = KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT);
        view.handle_input(shifted);
        assert_eq!(view.panel().spec().double_for_key("Speed").unwrap(), 0.0);
        assert_eq!(view.handle_input(press(KeyCode::Left)), None);
    }

    #[test]
    fn test_enter_toggles_switch_and_cycles_channel() {
        let mut view = view();
        view.handle_input(press(KeyCode::Down));
        assert_eq!(
            view.handle_input(press(KeyCode::Enter)),
            Some(PanelEvent::Changed("Sound".to_string()))
        );
        assert!(view.panel().spec().bool_for_key("Sound").unwrap());

        view.handle_input(press(KeyCode::Down));
        assert_eq!(
            view.handle_input(press(KeyCode::Char('c'))),
            Some(PanelEvent::ChannelChanged("Tint".to_string()))
        );
        assert_eq!(view.panel().active_channel("Tint"), ColorChannel::Green);
    }

    #[test]
    fn test_render_lists_every_control() {
        let view = view();
        let mut terminal = Terminal::new(TestBackend::new(80, 8)).unwrap();
        terminal
            .draw(|f| view.render(f, f.area(), &Theme::dark()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Speed"));
        assert!(text.contains("[off]"));
        assert!(text.contains("#FF0000"));
    }
}
