//! Headless editing surface.
//!
//! A [`ControlPanel`] lays a spec out as a list of controls (one slider,
//! switch or color well per entry, in file order) and translates front-end
//! gestures into spec changes. Every change goes through the spec's setters,
//! so maintainers fire exactly as they would for programmatic tuning.
//!
//! The panel draws nothing. The terminal front end in `tui` renders it, and
//! any other front end can drive the same model.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::trace;

use crate::error::TunableResult;
use crate::models::{ColorChannel, RgbaColor, SliderValue, TunableEntry, ValueKind};
use crate::spec::TunableSpec;

/// Default number of nudges across a slider's full range.
pub const DEFAULT_SLIDER_STEPS: u32 = 100;

/// One row of the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    /// Entry key
    pub key: String,
    /// Label shown next to the control
    pub label: String,
    /// Which widget tunes it
    pub kind: ValueKind,
}

impl From<&TunableEntry> for Control {
    fn from(entry: &TunableEntry) -> Self {
        Self {
            key: entry.key.clone(),
            label: entry.display_label().to_string(),
            kind: entry.kind(),
        }
    }
}

/// What a control currently shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlState {
    /// Slider position and range
    Slider(SliderValue),
    /// Switch position
    Switch(bool),
    /// Color well swatch and the channel being edited
    Color {
        /// Current color
        color: RgbaColor,
        /// Channel nudges apply to
        channel: ColorChannel,
    },
}

/// Editing model over one spec.
#[derive(Debug)]
pub struct ControlPanel {
    spec: Rc<TunableSpec>,
    controls: Vec<Control>,
    selected: usize,
    slider_steps: u32,
    channels: HashMap<String, ColorChannel>,
}

impl ControlPanel {
    /// Builds controls for every entry of `spec`.
    pub fn new(spec: Rc<TunableSpec>) -> Self {
        let controls = spec.entries().iter().map(Control::from).collect();
        Self {
            spec,
            controls,
            selected: 0,
            slider_steps: DEFAULT_SLIDER_STEPS,
            channels: HashMap::new(),
        }
    }

    /// Sets how many nudges cross a slider's range (at least 1).
    pub fn with_slider_steps(mut self, steps: u32) -> Self {
        self.slider_steps = steps.max(1);
        self
    }

    /// The spec being edited.
    #[must_use]
    pub fn spec(&self) -> &Rc<TunableSpec> {
        &self.spec
    }

    /// Controls in layout order.
    #[must_use]
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// Number of controls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Whether there is nothing to tune.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Index of the selected control.
    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The selected control, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&Control> {
        self.controls.get(self.selected)
    }

    /// Selects a control by index, clamped to the list.
    pub fn select(&mut self, index: usize) {
        self.selected = index.min(self.controls.len().saturating_sub(1));
    }

    /// Selects the control for `key`. Returns whether it exists.
    pub fn select_key(&mut self, key: &str) -> bool {
        match self.controls.iter().position(|c| c.key == key) {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }

    /// Moves selection down, wrapping to the top.
    pub fn select_next(&mut self) {
        if !self.controls.is_empty() {
            self.selected = (self.selected + 1) % self.controls.len();
        }
    }

    /// Moves selection up, wrapping to the bottom.
    pub fn select_previous(&mut self) {
        if !self.controls.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.controls.len() - 1);
        }
    }

    /// Current state of the control at `index`.
    pub fn state(&self, index: usize) -> Option<TunableResult<ControlState>> {
        self.controls.get(index).map(|control| self.state_of(control))
    }

    /// Current state of the selected control.
    pub fn selected_state(&self) -> Option<TunableResult<ControlState>> {
        self.state(self.selected)
    }

    /// Channel nudges apply to on the color control for `key`.
    #[must_use]
    pub fn active_channel(&self, key: &str) -> ColorChannel {
        self.channels.get(key).copied().unwrap_or(ColorChannel::Red)
    }

    /// Moves the selected control by `steps`.
    ///
    /// Sliders move by `steps` nudges and stay inside their range; switches
    /// flip on any non-zero nudge; color wells shift the active channel by
    /// `steps`. Returns whether the value changed.
    pub fn nudge(&mut self, steps: i32) -> TunableResult<bool> {
        let Some(control) = self.controls.get(self.selected) else {
            return Ok(false);
        };
        if steps == 0 {
            return Ok(false);
        }

        let key = control.key.as_str();
        let changed = match control.kind {
            ValueKind::Double => {
                let slider = self.spec.slider_for_key(key)?;
                let step = slider.span() / f64::from(self.slider_steps);
                let target = slider.clamp(slider.value + f64::from(steps) * step);
                self.spec.set_double(key, target)?
            }
            ValueKind::Bool => {
                let flag = self.spec.bool_for_key(key)?;
                self.spec.set_bool(key, !flag)?
            }
            ValueKind::Color => {
                let color = self.spec.color_for_key(key)?;
                let channel = self.active_channel(key);
                self.spec.set_color(key, color.adjusted(channel, steps))?
            }
        };

        trace!(key, steps, changed, "nudged control");
        Ok(changed)
    }

    /// Primary action on the selected control.
    ///
    /// Flips a switch or cycles a color well's channel. Sliders ignore it.
    /// Returns whether a value changed.
    pub fn activate(&mut self) -> TunableResult<bool> {
        let Some(control) = self.controls.get(self.selected) else {
            return Ok(false);
        };

        match control.kind {
            ValueKind::Bool => {
                let key = control.key.clone();
                let flag = self.spec.bool_for_key(&key)?;
                self.spec.set_bool(&key, !flag)
            }
            ValueKind::Color => {
                let key = control.key.clone();
                let next = self.active_channel(&key).next();
                self.channels.insert(key, next);
                Ok(false)
            }
            ValueKind::Double => Ok(false),
        }
    }

    /// Positions the selected slider at `fraction` of its range (clamped to 0..=1).
    ///
    /// Does nothing for other controls. Returns whether the value changed.
    pub fn set_fraction(&mut self, fraction: f64) -> TunableResult<bool> {
        let Some(control) = self.controls.get(self.selected) else {
            return Ok(false);
        };
        if control.kind != ValueKind::Double || !fraction.is_finite() {
            return Ok(false);
        }

        let slider = self.spec.slider_for_key(&control.key)?;
        let target = slider.min + fraction.clamp(0.0, 1.0) * slider.span();
        self.spec.set_double(&control.key, target)
    }

    /// Whether the panel should be on screen.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.spec.controls_visible()
    }

    /// Shows or hides the panel.
    pub fn set_visible(&self, visible: bool) {
        self.spec.set_controls_visible(visible);
    }

    /// Flips visibility. Returns the new state.
    pub fn toggle_visibility(&self) -> bool {
        self.spec.toggle_controls()
    }

    /// The share action: the tuned spec as file text.
    pub fn share(&self) -> TunableResult<String> {
        self.spec.to_json_string()
    }

    /// The revert action. Returns the keys that changed.
    pub fn revert(&self) -> Vec<String> {
        self.spec.revert()
    }

    fn state_of(&self, control: &Control) -> TunableResult<ControlState> {
        let key = control.key.as_str();
        Ok(match control.kind {
            ValueKind::Double => ControlState::Slider(self.spec.slider_for_key(key)?),
            ValueKind::Bool => ControlState::Switch(self.spec.bool_for_key(key)?),
            ValueKind::Color => ControlState::Color {
                color: self.spec.color_for_key(key)?,
                channel: self.active_channel(key),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> ControlPanel {
        let spec = TunableSpec::from_json_str(
            "Panel",
            r##"[
                { "key": "Spacing", "label": "Spacing", "sliderValue": 50, "sliderMinValue": 0, "sliderMaxValue": 100 },
                { "key": "Sound", "switchValue": true },
                { "key": "Tint", "colorValue": "#808080" }
            ]"##,
        )
        .unwrap();
        ControlPanel::new(Rc::new(spec)).with_slider_steps(10)
    }

    #[test]
    fn test_controls_follow_file_order() {
        let panel = panel();
        let kinds: Vec<ValueKind> = panel.controls().iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![ValueKind::Double, ValueKind::Bool, ValueKind::Color]);
        assert_eq!(panel.controls()[1].label, "Sound");
    }

    #[test]
    fn test_selection_wraps() {
        let mut panel = panel();
        panel.select_previous();
        assert_eq!(panel.selected_index(), 2);
        panel.select_next();
        assert_eq!(panel.selected_index(), 0);
        panel.select(99);
        assert_eq!(panel.selected_index(), 2);
        assert!(panel.select_key("Sound"));
        assert_eq!(panel.selected_index(), 1);
        assert!(!panel.select_key("Missing"));
    }

    #[test]
    fn test_slider_nudge_clamps_to_range() {
        let mut panel = panel();
        assert!(panel.nudge(2).unwrap());
        assert_eq!(panel.spec().double_for_key("Spacing").unwrap(), 70.0);

        assert!(panel.nudge(100).unwrap());
        assert_eq!(panel.spec().double_for_key("Spacing").unwrap(), 100.0);
        assert!(!panel.nudge(1).unwrap());

        assert!(panel.nudge(-1000).unwrap());
        assert_eq!(panel.spec().double_for_key("Spacing").unwrap(), 0.0);
    }

    #[test]
    fn test_set_fraction() {
        let mut panel = panel();
        assert!(panel.set_fraction(0.25).unwrap());
        assert_eq!(panel.spec().double_for_key("Spacing").unwrap(), 25.0);
        panel.set_fraction(7.0).unwrap();
        assert_eq!(panel.spec().double_for_key("Spacing").unwrap(), 100.0);

        panel.select_next();
        assert!(!panel.set_fraction(0.5).unwrap());
    }

    #[test]
    fn test_switch_toggles_on_nudge_and_activate() {
        let mut panel = panel();
        panel.select_key("Sound");
        assert!(panel.activate().unwrap());
        assert!(!panel.spec().bool_for_key("Sound").unwrap());
        assert!(panel.nudge(-1).unwrap());
        assert!(panel.spec().bool_for_key("Sound").unwrap());
        assert!(!panel.nudge(0).unwrap());
    }

    #[test]
    fn test_color_channel_editing() {
        let mut panel = panel();
        panel.select_key("Tint");

        panel.nudge(16).unwrap();
        assert_eq!(
            panel.spec().color_for_key("Tint").unwrap(),
            RgbaColor::new(0x90, 0x80, 0x80)
        );

        assert!(!panel.activate().unwrap());
        assert_eq!(panel.active_channel("Tint"), ColorChannel::Green);
        panel.nudge(-200).unwrap();
        assert_eq!(panel.spec().color_for_key("Tint").unwrap().g, 0);

        match panel.selected_state().unwrap().unwrap() {
            ControlState::Color { channel, .. } => assert_eq!(channel, ColorChannel::Green),
            other => panic!("expected color state, got {other:?}"),
        }
    }

    #[test]
    fn test_panel_changes_reach_maintainers() {
        let mut panel = panel();
        let owner = Rc::new(std::cell::RefCell::new(Vec::new()));
        panel
            .spec()
            .with_double_for_key("Spacing", &owner, |seen, v| seen.borrow_mut().push(v))
            .unwrap();

        panel.nudge(1).unwrap();
        panel.revert();
        assert_eq!(*owner.borrow(), vec![50.0, 60.0, 50.0]);
    }

    #[test]
    fn test_visibility_and_share() {
        let panel = panel();
        assert!(!panel.is_visible());
        assert!(panel.toggle_visibility());
        assert!(panel.spec().controls_visible());
        panel.set_visible(false);
        assert!(!panel.is_visible());

        let text = panel.share().unwrap();
        assert!(text.contains("\"colorValue\": \"#808080\""));
    }

    #[test]
    fn test_empty_panel_is_inert() {
        let spec = TunableSpec::from_json_str("Empty", "[]").unwrap();
        let mut panel = ControlPanel::new(Rc::new(spec));
        assert!(panel.is_empty());
        panel.select_next();
        panel.select_previous();
        assert_eq!(panel.selected_index(), 0);
        assert!(!panel.nudge(1).unwrap());
        assert!(!panel.activate().unwrap());
        assert!(panel.selected_state().is_none());
    }
}
