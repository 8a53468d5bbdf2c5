//! Live preview fed entirely by maintainers.
//!
//! The preview never reads the spec while drawing. It subscribes to every key
//! when attached and redraws from what the maintainers last delivered, the way
//! a client view of the spec would.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::cli::common::describe_value;
use crate::error::TunableResult;
use crate::models::TunableValue;
use crate::spec::TunableSpec;
use crate::tui::Theme;

/// Values mirrored from a spec through maintainers.
#[derive(Debug, Default)]
pub struct Preview {
    order: Vec<String>,
    values: RefCell<HashMap<String, TunableValue>>,
    updates: Cell<usize>,
}

impl Preview {
    /// Subscribes a new preview to every key of `spec`.
    ///
    /// The returned `Rc` owns the subscriptions: dropping it retires them.
    pub fn attach(spec: &TunableSpec) -> TunableResult<Rc<Self>> {
        let preview = Rc::new(Self {
            order: spec.keys(),
            ..Self::default()
        });

        for key in &preview.order {
            let key_name = key.clone();
            spec.with_value_for_key(key, &preview, move |preview: &Self, value| {
                preview.values.borrow_mut().insert(key_name.clone(), value);
                preview.updates.set(preview.updates.get() + 1);
            })?;
        }
        Ok(preview)
    }

    /// Last value delivered for `key`.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<TunableValue> {
        self.values.borrow().get(key).copied()
    }

    /// Maintainer calls received, including the initial one per key.
    #[must_use]
    pub fn updates(&self) -> usize {
        self.updates.get()
    }

    /// Draws the mirrored values.
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let values = self.values.borrow();
        let width = self.order.iter().map(String::len).max().unwrap_or(0);

        let mut lines: Vec<Line> = self
            .order
            .iter()
            .filter_map(|key| values.get(key).map(|value| (key, value)))
            .map(|(key, value)| {
                let mut spans = vec![
                    Span::styled(format!("{key:<width$} "), Style::default().fg(theme.text_secondary)),
                    Span::styled(describe_value(value), Style::default().fg(theme.text)),
                ];
                if let TunableValue::Color(color) = value {
                    spans.push(Span::raw(" "));
                    spans.push(Span::styled("  ", Style::default().bg(color.to_ratatui_color())));
                }
                Line::from(spans)
            })
            .collect();

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("{} updates received", self.updates()),
            Style::default().fg(theme.text_muted),
        )));

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(" Live values ", theme.title()))
                    .border_style(Style::default().fg(theme.primary)),
            );
        f.render_widget(paragraph, area);
    }
}
