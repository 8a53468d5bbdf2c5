//! The tunable spec store.
//!
//! A [`TunableSpec`] holds the entries of one spec file as a keyed mapping for
//! lookup plus an ordered sequence for layout. Values are read through typed
//! getters, changed through setters, and followed through maintainers: a
//! maintainer runs once immediately and then on every change, for as long as
//! its weakly held owner is alive.
//!
//! Specs are single-threaded and meant to be shared through `Rc`:
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use tunespec::TunableSpec;
//!
//! let spec = TunableSpec::from_json_str(
//!     "MainSpec",
//!     r#"[{ "key": "GridSpacing", "sliderValue": 175, "sliderMinValue": 10, "sliderMaxValue": 300 }]"#,
//! )
//! .unwrap();
//!
//! let label = Rc::new(Cell::new(0.0));
//! spec.with_double_for_key("GridSpacing", &label, |label, spacing| label.set(spacing))
//!     .unwrap();
//! assert_eq!(label.get(), 175.0);
//!
//! spec.set_double("GridSpacing", 40.0).unwrap();
//! assert_eq!(label.get(), 40.0);
//! ```

pub(crate) mod maintain;

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::{debug, info};

use crate::error::{TunableError, TunableResult};
use crate::models::{EntryValue, RgbaColor, SliderValue, TunableEntry, TunableValue, ValueKind};
use crate::parser;

use maintain::{Maintainer, MaintainerRegistry, Slot};

/// A named collection of tunable values backed by a JSON file.
pub struct TunableSpec {
    name: String,
    source: Option<PathBuf>,
    entries: RefCell<Vec<TunableEntry>>,
    index: HashMap<String, usize>,
    loaded: Vec<EntryValue>,
    disabled_reason: Option<String>,
    controls_visible: Cell<bool>,
    maintainers: MaintainerRegistry,
}

impl std::fmt::Debug for TunableSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TunableSpec")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("entries", &self.entries.borrow().len())
            .field("disabled_reason", &self.disabled_reason)
            .field("controls_visible", &self.controls_visible.get())
            .finish_non_exhaustive()
    }
}

impl TunableSpec {
    /// Builds a spec from already parsed entries.
    ///
    /// # Errors
    ///
    /// Returns [`TunableError::Malformed`] for a slider whose minimum is above
    /// its maximum, and [`TunableError::DuplicateKey`] if two entries share a key.
    pub fn from_entries(name: impl Into<String>, entries: Vec<TunableEntry>) -> TunableResult<Self> {
        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if let EntryValue::Slider(slider) = entry.value {
                if !slider.is_well_formed() {
                    return Err(TunableError::Malformed {
                        index: position,
                        reason: format!(
                            "'{}' has slider range {} .. {} around {}",
                            entry.key, slider.min, slider.max, slider.value
                        ),
                    });
                }
            }
            if index.insert(entry.key.clone(), position).is_some() {
                return Err(TunableError::DuplicateKey(entry.key.clone()));
            }
        }
        let loaded = entries.iter().map(|entry| entry.value).collect();

        Ok(Self {
            name: name.into(),
            source: None,
            entries: RefCell::new(entries),
            index,
            loaded,
            disabled_reason: None,
            controls_visible: Cell::new(false),
            maintainers: MaintainerRegistry::default(),
        })
    }

    /// Parses a spec from JSON text.
    pub fn from_json_str(name: impl Into<String>, text: &str) -> TunableResult<Self> {
        let entries = parser::parse_spec_json(text)?;
        Self::from_entries(name, entries)
    }

    /// Loads a spec from a file, remembering the path for [`TunableSpec::save`].
    pub fn load(name: impl Into<String>, path: &Path) -> TunableResult<Self> {
        let entries = parser::parse_spec_file(path)?;
        let mut spec = Self::from_entries(name, entries)?;
        spec.source = Some(path.to_path_buf());
        debug!(
            spec = %spec.name,
            path = %path.display(),
            entries = spec.len(),
            "loaded tunable spec"
        );
        Ok(spec)
    }

    /// A spec with no entries, used when the backing file is missing or malformed.
    ///
    /// Every lookup on a disabled spec fails with [`TunableError::Disabled`].
    pub fn disabled(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: None,
            entries: RefCell::new(Vec::new()),
            index: HashMap::new(),
            loaded: Vec::new(),
            disabled_reason: Some(reason.into()),
            controls_visible: Cell::new(false),
            maintainers: MaintainerRegistry::default(),
        }
    }

    /// Spec name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File the spec was loaded from, if any.
    #[must_use]
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Whether the spec loaded successfully and can be tuned.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.disabled_reason.is_none()
    }

    /// Why the spec is disabled, if it is.
    #[must_use]
    pub fn disabled_reason(&self) -> Option<&str> {
        self.disabled_reason.as_deref()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the spec has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Keys in layout order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .map(|entry| entry.key.clone())
            .collect()
    }

    /// Snapshot of all entries in layout order.
    #[must_use]
    pub fn entries(&self) -> Vec<TunableEntry> {
        self.entries.borrow().clone()
    }

    /// Snapshot of one entry.
    pub fn entry(&self, key: &str) -> TunableResult<TunableEntry> {
        let position = self.position(key)?;
        Ok(self.entries.borrow()[position].clone())
    }

    /// The kind of value stored under `key`.
    pub fn kind_of(&self, key: &str) -> TunableResult<ValueKind> {
        let position = self.position(key)?;
        Ok(self.loaded[position].kind())
    }

    /// Current value of any kind.
    pub fn value_for_key(&self, key: &str) -> TunableResult<TunableValue> {
        let position = self.position(key)?;
        Ok(self.entries.borrow()[position].value.current())
    }

    /// Current double value.
    pub fn double_for_key(&self, key: &str) -> TunableResult<f64> {
        Ok(self.slider_for_key(key)?.value)
    }

    /// Current double value together with its slider range.
    pub fn slider_for_key(&self, key: &str) -> TunableResult<SliderValue> {
        let position = self.position(key)?;
        match self.entries.borrow()[position].value {
            EntryValue::Slider(slider) => Ok(slider),
            other => Err(mismatch(key, ValueKind::Double, other.kind())),
        }
    }

    /// Current boolean value.
    pub fn bool_for_key(&self, key: &str) -> TunableResult<bool> {
        let position = self.position(key)?;
        match self.entries.borrow()[position].value {
            EntryValue::Switch(flag) => Ok(flag),
            other => Err(mismatch(key, ValueKind::Bool, other.kind())),
        }
    }

    /// Current color value.
    pub fn color_for_key(&self, key: &str) -> TunableResult<RgbaColor> {
        let position = self.position(key)?;
        match self.entries.borrow()[position].value {
            EntryValue::Color(color) => Ok(color),
            other => Err(mismatch(key, ValueKind::Color, other.kind())),
        }
    }

    /// Keeps something in sync with a double value.
    ///
    /// `maintain` runs right away with the current value and then after every
    /// change, receiving the owner each time. The owner is held weakly: once
    /// it is dropped, `maintain` is dropped too and never runs again. Capture
    /// the things you update through the owner rather than strongly, or they
    /// will keep each other alive.
    pub fn with_double_for_key<O, F>(&self, key: &str, owner: &Rc<O>, mut maintain: F) -> TunableResult<()>
    where
        O: 'static,
        F: FnMut(&O, f64) + 'static,
    {
        let initial = self.double_for_key(key)?;
        maintain(owner.as_ref(), initial);
        self.register(key, owner, move |owner, value| {
            if let Some(v) = value.as_double() {
                maintain(owner, v);
            }
        });
        Ok(())
    }

    /// Keeps something in sync with a boolean value. See [`TunableSpec::with_double_for_key`].
    pub fn with_bool_for_key<O, F>(&self, key: &str, owner: &Rc<O>, mut maintain: F) -> TunableResult<()>
    where
        O: 'static,
        F: FnMut(&O, bool) + 'static,
    {
        let initial = self.bool_for_key(key)?;
        maintain(owner.as_ref(), initial);
        self.register(key, owner, move |owner, value| {
            if let Some(flag) = value.as_bool() {
                maintain(owner, flag);
            }
        });
        Ok(())
    }

    /// Keeps something in sync with a color value. See [`TunableSpec::with_double_for_key`].
    pub fn with_color_for_key<O, F>(&self, key: &str, owner: &Rc<O>, mut maintain: F) -> TunableResult<()>
    where
        O: 'static,
        F: FnMut(&O, RgbaColor) + 'static,
    {
        let initial = self.color_for_key(key)?;
        maintain(owner.as_ref(), initial);
        self.register(key, owner, move |owner, value| {
            if let Some(color) = value.as_color() {
                maintain(owner, color);
            }
        });
        Ok(())
    }

    /// Keeps something in sync with a value of any kind.
    pub fn with_value_for_key<O, F>(&self, key: &str, owner: &Rc<O>, mut maintain: F) -> TunableResult<()>
    where
        O: 'static,
        F: FnMut(&O, TunableValue) + 'static,
    {
        let initial = self.value_for_key(key)?;
        maintain(owner.as_ref(), initial);
        self.register(key, owner, move |owner, value| maintain(owner, *value));
        Ok(())
    }

    /// Number of maintainers on `key` whose owner is still alive.
    ///
    /// Includes maintainers that are running right now, so a maintainer
    /// asking from inside its own call counts itself.
    #[must_use]
    pub fn maintainer_count(&self, key: &str) -> usize {
        self.maintainers.live_count(&Slot::Key(key.to_string()))
    }

    /// Sets a double value. Returns whether the value changed.
    ///
    /// The value is stored as given, even outside the slider range; the
    /// control model clamps before calling this.
    pub fn set_double(&self, key: &str, value: f64) -> TunableResult<bool> {
        if !value.is_finite() {
            return Err(TunableError::InvalidValue {
                key: key.to_string(),
                reason: "double values must be finite",
            });
        }
        self.set_value(key, TunableValue::Double(value))
    }

    /// Sets a boolean value. Returns whether the value changed.
    pub fn set_bool(&self, key: &str, flag: bool) -> TunableResult<bool> {
        self.set_value(key, TunableValue::Bool(flag))
    }

    /// Sets a color value. Returns whether the value changed.
    pub fn set_color(&self, key: &str, color: RgbaColor) -> TunableResult<bool> {
        self.set_value(key, TunableValue::Color(color))
    }

    /// Sets a value of the entry's kind, notifying maintainers if it changed.
    pub fn set_value(&self, key: &str, value: TunableValue) -> TunableResult<bool> {
        let position = self.position(key)?;
        let changed = {
            let mut entries = self.entries.borrow_mut();
            match (&mut entries[position].value, value) {
                (EntryValue::Slider(slider), TunableValue::Double(v)) => {
                    let changed = slider.value != v;
                    slider.value = v;
                    changed
                }
                (EntryValue::Switch(flag), TunableValue::Bool(v)) => {
                    let changed = *flag != v;
                    *flag = v;
                    changed
                }
                (EntryValue::Color(color), TunableValue::Color(v)) => {
                    let changed = *color != v;
                    *color = v;
                    changed
                }
                (current, _) => return Err(mismatch(key, value.kind(), current.kind())),
            }
        };

        if changed {
            debug!(spec = %self.name, key, %value, "tuned value");
            self.notify(key);
        }
        Ok(changed)
    }

    /// Restores every value to what was loaded. Returns the keys that changed.
    pub fn revert(&self) -> Vec<String> {
        let changed: Vec<String> = {
            let mut entries = self.entries.borrow_mut();
            entries
                .iter_mut()
                .zip(&self.loaded)
                .filter(|(entry, loaded)| entry.value != **loaded)
                .map(|(entry, loaded)| {
                    entry.value = *loaded;
                    entry.key.clone()
                })
                .collect()
        };

        if !changed.is_empty() {
            info!(spec = %self.name, count = changed.len(), "reverted tuned values");
        }
        for key in &changed {
            self.notify(key);
        }
        changed
    }

    /// Keys whose value differs from what was loaded, in layout order.
    #[must_use]
    pub fn modified_keys(&self) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .zip(&self.loaded)
            .filter(|(entry, loaded)| entry.value != **loaded)
            .map(|(entry, _)| entry.key.clone())
            .collect()
    }

    /// Whether any value differs from what was loaded.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.entries
            .borrow()
            .iter()
            .zip(&self.loaded)
            .any(|(entry, loaded)| entry.value != *loaded)
    }

    /// Current values keyed by entry key, e.g. as a metrics table for layout code.
    #[must_use]
    pub fn dictionary_representation(&self) -> BTreeMap<String, TunableValue> {
        self.entries
            .borrow()
            .iter()
            .map(|entry| (entry.key.clone(), entry.value.current()))
            .collect()
    }

    /// Whether the editing surface should be shown.
    #[must_use]
    pub fn controls_visible(&self) -> bool {
        self.controls_visible.get()
    }

    /// Shows or hides the editing surface, notifying visibility maintainers on change.
    pub fn set_controls_visible(&self, visible: bool) {
        if self.controls_visible.replace(visible) == visible {
            return;
        }
        debug!(spec = %self.name, visible, "controls visibility changed");
        let flag = self.controls_visible.get();
        self.maintainers
            .notify(&Slot::ControlsVisibility, || Some(TunableValue::Bool(flag)));
    }

    /// Flips controls visibility. Returns the new state.
    pub fn toggle_controls(&self) -> bool {
        let visible = !self.controls_visible();
        self.set_controls_visible(visible);
        visible
    }

    /// Follows controls visibility, the way a front end shows or hides its panel.
    ///
    /// Runs right away with the current state, then on each change.
    pub fn with_controls_visibility<O, F>(&self, owner: &Rc<O>, mut maintain: F)
    where
        O: 'static,
        F: FnMut(&O, bool) + 'static,
    {
        maintain(owner.as_ref(), self.controls_visible());
        self.maintainers.register(
            Slot::ControlsVisibility,
            Maintainer::new(owner, move |owner, value: &TunableValue| {
                if let Some(visible) = value.as_bool() {
                    maintain(owner, visible);
                }
            }),
        );
    }

    /// Serializes the current values in the spec file format.
    pub fn to_json_string(&self) -> TunableResult<String> {
        self.ensure_enabled()?;
        parser::spec_to_json(&self.entries.borrow())
    }

    /// Writes the current values to `path`, replacing it atomically.
    pub fn export_to(&self, path: &Path) -> TunableResult<()> {
        let text = self.to_json_string()?;
        crate::export::write_atomic(path, &text)?;
        info!(spec = %self.name, path = %path.display(), "exported spec");
        Ok(())
    }

    /// Writes the current values back to the file the spec was loaded from.
    ///
    /// Returns the path written.
    pub fn save(&self) -> TunableResult<PathBuf> {
        self.ensure_enabled()?;
        let path = self.source.clone().ok_or_else(|| TunableError::Disabled {
            name: self.name.clone(),
            reason: "spec was not loaded from a file".to_string(),
        })?;
        self.export_to(&path)?;
        Ok(path)
    }

    fn ensure_enabled(&self) -> TunableResult<()> {
        match &self.disabled_reason {
            Some(reason) => Err(TunableError::Disabled {
                name: self.name.clone(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    fn position(&self, key: &str) -> TunableResult<usize> {
        self.ensure_enabled()?;
        self.index
            .get(key)
            .copied()
            .ok_or_else(|| TunableError::UnknownKey(key.to_string()))
    }

    fn register<O, F>(&self, key: &str, owner: &Rc<O>, maintain: F)
    where
        O: 'static,
        F: FnMut(&O, &TunableValue) + 'static,
    {
        self.maintainers
            .register(Slot::Key(key.to_string()), Maintainer::new(owner, maintain));
    }

    fn notify(&self, key: &str) {
        let Some(&position) = self.index.get(key) else {
            return;
        };
        self.maintainers.notify(&Slot::Key(key.to_string()), || {
            Some(self.entries.borrow()[position].value.current())
        });
    }
}

fn mismatch(key: &str, requested: ValueKind, actual: ValueKind) -> TunableError {
    TunableError::KindMismatch {
        key: key.to_string(),
        requested,
        actual,
    }
}
