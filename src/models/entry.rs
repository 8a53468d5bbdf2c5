//! Tunable entries: a key, an optional label, and one kind of value.

use serde::Serialize;
use std::fmt;

use super::RgbaColor;

/// The kind of value an entry holds. Fixed when the spec is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// A double with a slider range
    Double,
    /// A boolean switch
    Bool,
    /// An RGBA color
    Color,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Double => "double",
            Self::Bool => "bool",
            Self::Color => "color",
        };
        f.write_str(name)
    }
}

/// A double value together with the range its slider covers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SliderValue {
    /// Current value
    pub value: f64,
    /// Lower end of the slider
    pub min: f64,
    /// Upper end of the slider
    pub max: f64,
}

impl SliderValue {
    /// Creates a slider value, filling in a missing range.
    ///
    /// A missing minimum becomes `min(0, value)`. A missing maximum becomes
    /// twice the value for positive values, and at least `min + 1` otherwise,
    /// so a bare `"sliderValue": 175` tunes across `0..=350`.
    #[must_use]
    pub fn with_defaults(value: f64, min: Option<f64>, max: Option<f64>) -> Self {
        let min = min.unwrap_or_else(|| value.min(0.0));
        let max = max.unwrap_or_else(|| {
            let doubled = if value > 0.0 { value * 2.0 } else { value };
            doubled.max(min + 1.0)
        });
        Self { value, min, max }
    }

    /// Whether the range is ordered and the value is a number.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.min <= self.max && !self.value.is_nan()
    }

    /// Width of the slider range.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Clamps a candidate value into the slider range.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Position of the current value within the range, 0.0 to 1.0.
    ///
    /// Out-of-range values report the nearest end; an empty range reports 0.0.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        let span = self.span();
        if span <= 0.0 {
            return 0.0;
        }
        ((self.value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// The value half of an entry, including any UI range metadata.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryValue {
    /// Tuned with a slider
    Slider(SliderValue),
    /// Tuned with a switch
    Switch(bool),
    /// Tuned with a color well
    Color(RgbaColor),
}

impl EntryValue {
    /// The kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Slider(_) => ValueKind::Double,
            Self::Switch(_) => ValueKind::Bool,
            Self::Color(_) => ValueKind::Color,
        }
    }

    /// The current value without UI metadata.
    #[must_use]
    pub const fn current(&self) -> TunableValue {
        match self {
            Self::Slider(slider) => TunableValue::Double(slider.value),
            Self::Switch(flag) => TunableValue::Bool(*flag),
            Self::Color(color) => TunableValue::Color(*color),
        }
    }
}

/// A current value as handed to callers and maintainers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TunableValue {
    /// Double value
    Double(f64),
    /// Boolean value
    Bool(bool),
    /// Color value
    Color(RgbaColor),
}

impl TunableValue {
    /// The kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Double(_) => ValueKind::Double,
            Self::Bool(_) => ValueKind::Bool,
            Self::Color(_) => ValueKind::Color,
        }
    }

    /// The double, if this is one.
    #[must_use]
    pub const fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// The boolean, if this is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// The color, if this is one.
    #[must_use]
    pub const fn as_color(&self) -> Option<RgbaColor> {
        match self {
            Self::Color(v) => Some(*v),
            _ => None,
        }
    }

    /// Parses user text as a value of the given kind.
    ///
    /// Booleans accept `true/false`, `yes/no`, `on/off` and `1/0`.
    #[must_use]
    pub fn parse_as(kind: ValueKind, text: &str) -> Option<Self> {
        let text = text.trim();
        match kind {
            ValueKind::Double => text
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Self::Double),
            ValueKind::Bool => match text.to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Some(Self::Bool(true)),
                "false" | "no" | "off" | "0" => Some(Self::Bool(false)),
                _ => None,
            },
            ValueKind::Color => RgbaColor::from_hex(text).ok().map(Self::Color),
        }
    }
}

impl fmt::Display for TunableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Double(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Color(c) => write!(f, "{c}"),
        }
    }
}

/// One tunable setting.
#[derive(Debug, Clone, PartialEq)]
pub struct TunableEntry {
    /// Unique key within the spec
    pub key: String,
    /// Optional display label
    pub label: Option<String>,
    /// Value and UI metadata
    pub value: EntryValue,
}

impl TunableEntry {
    /// Creates an entry.
    pub fn new(key: impl Into<String>, label: Option<String>, value: EntryValue) -> Self {
        Self {
            key: key.into(),
            label,
            value,
        }
    }

    /// Label to show in UI, falling back to the key.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.key)
    }

    /// The kind of value this entry holds.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        self.value.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_defaults_for_positive_value() {
        let slider = SliderValue::with_defaults(175.0, None, None);
        assert_eq!(slider.min, 0.0);
        assert_eq!(slider.max, 350.0);
    }

    #[test]
    fn test_slider_defaults_for_zero_and_negative_values() {
        let zero = SliderValue::with_defaults(0.0, None, None);
        assert_eq!((zero.min, zero.max), (0.0, 1.0));

        let negative = SliderValue::with_defaults(-4.0, None, None);
        assert_eq!((negative.min, negative.max), (-4.0, -3.0));
    }

    #[test]
    fn test_slider_defaults_respect_explicit_min() {
        let slider = SliderValue::with_defaults(10.0, Some(5.0), None);
        assert_eq!(slider.min, 5.0);
        assert_eq!(slider.max, 20.0);

        let slider = SliderValue::with_defaults(1.0, Some(5.0), None);
        assert_eq!(slider.max, 6.0);
    }

    #[test]
    fn test_fraction() {
        let slider = SliderValue {
            value: 175.0,
            min: 10.0,
            max: 300.0,
        };
        assert!((slider.fraction() - 165.0 / 290.0).abs() < 1e-9);

        let outside = SliderValue {
            value: 400.0,
            ..slider
        };
        assert_eq!(outside.fraction(), 1.0);

        let empty = SliderValue {
            value: 3.0,
            min: 3.0,
            max: 3.0,
        };
        assert_eq!(empty.fraction(), 0.0);
    }

    #[test]
    fn test_parse_as() {
        assert_eq!(
            TunableValue::parse_as(ValueKind::Double, " 12.5 "),
            Some(TunableValue::Double(12.5))
        );
        assert_eq!(TunableValue::parse_as(ValueKind::Double, "NaN"), None);
        assert_eq!(
            TunableValue::parse_as(ValueKind::Bool, "On"),
            Some(TunableValue::Bool(true))
        );
        assert_eq!(
            TunableValue::parse_as(ValueKind::Bool, "0"),
            Some(TunableValue::Bool(false))
        );
        assert_eq!(TunableValue::parse_as(ValueKind::Bool, "maybe"), None);
        assert_eq!(
            TunableValue::parse_as(ValueKind::Color, "#336699"),
            Some(TunableValue::Color(RgbaColor::new(0x33, 0x66, 0x99)))
        );
    }

    #[test]
    fn test_display_label_falls_back_to_key() {
        let entry = TunableEntry::new("GridSpacing", None, EntryValue::Switch(true));
        assert_eq!(entry.display_label(), "GridSpacing");

        let entry = TunableEntry::new(
            "GridSpacing",
            Some("Grid Spacing".to_string()),
            EntryValue::Switch(true),
        );
        assert_eq!(entry.display_label(), "Grid Spacing");
    }
}
