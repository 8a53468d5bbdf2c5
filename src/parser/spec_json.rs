//! Spec file parser and writer.
//!
//! A spec file is a JSON array of flat objects. Each object carries a `key`,
//! an optional `label`, and the fields of exactly one value kind:
//!
//! - `sliderValue` with optional `sliderMinValue` / `sliderMaxValue`
//! - `switchValue`
//! - `colorValue` (`"#RRGGBB"` or `"#RRGGBBAA"`)
//!
//! Unknown fields are ignored when reading. Writing emits the same format,
//! in array order, with slider ranges always spelled out.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{TunableError, TunableResult};
use crate::models::{EntryValue, RgbaColor, SliderValue, TunableEntry};

/// One object of the spec array as it appears on disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpecFileEntry {
    key: Option<String>,
    label: Option<String>,
    slider_value: Option<f64>,
    slider_min_value: Option<f64>,
    slider_max_value: Option<f64>,
    switch_value: Option<bool>,
    color_value: Option<String>,
}

/// Output shape; field order here is the order written to disk.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpecFileEntryOut<'a> {
    key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    slider_value: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    slider_min_value: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    slider_max_value: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    switch_value: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color_value: Option<String>,
}

/// Parses spec JSON text into entries, in file order.
///
/// # Errors
///
/// Returns [`TunableError::Json`] when the text is not a JSON array, and
/// [`TunableError::Malformed`] / [`TunableError::DuplicateKey`] when an
/// object does not describe exactly one uniquely keyed value.
pub fn parse_spec_json(text: &str) -> TunableResult<Vec<TunableEntry>> {
    let raw: Vec<Value> = serde_json::from_str(text)?;
    let mut seen = HashSet::with_capacity(raw.len());
    let mut entries = Vec::with_capacity(raw.len());

    for (index, value) in raw.into_iter().enumerate() {
        if !value.is_object() {
            return Err(malformed(index, "expected a JSON object"));
        }
        let file_entry: SpecFileEntry =
            serde_json::from_value(value).map_err(|e| malformed(index, e.to_string()))?;
        let entry = entry_from_file(index, file_entry)?;

        if !seen.insert(entry.key.clone()) {
            return Err(TunableError::DuplicateKey(entry.key));
        }
        entries.push(entry);
    }

    Ok(entries)
}

/// Reads and parses a spec file.
pub fn parse_spec_file(path: &Path) -> TunableResult<Vec<TunableEntry>> {
    let content = fs::read_to_string(path).map_err(|source| TunableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_spec_json(&content)
}

/// Serializes entries back into the spec file format.
///
/// The output is pretty-printed and ends with a newline. Integral doubles are
/// written as JSON integers so an untouched `175` stays `175`.
pub fn spec_to_json(entries: &[TunableEntry]) -> TunableResult<String> {
    let out: Vec<SpecFileEntryOut<'_>> = entries.iter().map(entry_to_file).collect();
    let mut text = serde_json::to_string_pretty(&out)?;
    text.push('\n');
    Ok(text)
}

fn malformed(index: usize, reason: impl Into<String>) -> TunableError {
    TunableError::Malformed {
        index,
        reason: reason.into(),
    }
}

fn entry_from_file(index: usize, file: SpecFileEntry) -> TunableResult<TunableEntry> {
    let key = match file.key {
        Some(key) if !key.trim().is_empty() => key,
        Some(_) => return Err(malformed(index, "empty key")),
        None => return Err(malformed(index, "missing key")),
    };

    let has_range = file.slider_min_value.is_some() || file.slider_max_value.is_some();
    let kinds = [
        file.slider_value.is_some(),
        file.switch_value.is_some(),
        file.color_value.is_some(),
    ]
    .iter()
    .filter(|present| **present)
    .count();

    if kinds > 1 {
        return Err(malformed(
            index,
            format!("'{key}' has more than one of sliderValue, switchValue, colorValue"),
        ));
    }

    let value = if let Some(value) = file.slider_value {
        let slider = SliderValue::with_defaults(value, file.slider_min_value, file.slider_max_value);
        if !slider.is_well_formed() {
            return Err(malformed(
                index,
                format!(
                    "'{key}' has sliderMinValue {} above sliderMaxValue {}",
                    slider.min, slider.max
                ),
            ));
        }
        EntryValue::Slider(slider)
    } else if has_range {
        return Err(malformed(
            index,
            format!("'{key}' has a slider range but no sliderValue"),
        ));
    } else if let Some(flag) = file.switch_value {
        EntryValue::Switch(flag)
    } else if let Some(color) = file.color_value {
        EntryValue::Color(
            RgbaColor::from_hex(&color).map_err(|err| malformed(index, err.to_string()))?,
        )
    } else {
        return Err(malformed(
            index,
            format!("'{key}' has no sliderValue, switchValue or colorValue"),
        ));
    };

    Ok(TunableEntry {
        key,
        label: file.label,
        value,
    })
}

fn entry_to_file(entry: &TunableEntry) -> SpecFileEntryOut<'_> {
    let mut out = SpecFileEntryOut {
        key: &entry.key,
        label: entry.label.as_deref(),
        slider_value: None,
        slider_min_value: None,
        slider_max_value: None,
        switch_value: None,
        color_value: None,
    };

    match &entry.value {
        EntryValue::Slider(slider) => {
            out.slider_value = json_number(slider.value);
            out.slider_min_value = json_number(slider.min);
            out.slider_max_value = json_number(slider.max);
        }
        EntryValue::Switch(flag) => out.switch_value = Some(*flag),
        EntryValue::Color(color) => out.color_value = Some(color.to_hex()),
    }

    out
}

/// Largest magnitude below which every integer is exactly representable in f64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

#[allow(clippy::cast_possible_truncation)]
fn json_number(value: f64) -> Option<Number> {
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        Some(Number::from(value as i64))
    } else {
        Number::from_f64(value)
    }
}
