//! Show command: lists every entry of a spec.

use crate::cli::common::{describe_value, format_number, print_json, CliResult, SpecArg};
use crate::models::{EntryValue, TunableEntry, TunableValue, ValueKind};
use crate::spec::TunableSpec;
use clap::Args;
use serde::Serialize;

/// Display the entries of a spec
#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub(crate) spec: SpecArg,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON view of one entry
#[derive(Serialize, Debug)]
pub(crate) struct EntryOutput {
    key: String,
    label: String,
    kind: ValueKind,
    value: TunableValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<f64>,
}

impl From<&TunableEntry> for EntryOutput {
    fn from(entry: &TunableEntry) -> Self {
        let (min, max) = match entry.value {
            EntryValue::Slider(slider) => (Some(slider.min), Some(slider.max)),
            _ => (None, None),
        };
        Self {
            key: entry.key.clone(),
            label: entry.display_label().to_string(),
            kind: entry.kind(),
            value: entry.value.current(),
            min,
            max,
        }
    }
}

#[derive(Serialize, Debug)]
struct ShowOutput {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    entries: Vec<EntryOutput>,
}

impl ShowArgs {
    /// Execute the show command
    pub fn execute(&self) -> CliResult<()> {
        let spec = self.spec.load()?;

        if self.json {
            print_json(&ShowOutput {
                name: spec.name().to_string(),
                source: spec.source_path().map(|p| p.display().to_string()),
                entries: spec.entries().iter().map(EntryOutput::from).collect(),
            })
        } else {
            print_table(&spec);
            Ok(())
        }
    }
}

fn print_table(spec: &TunableSpec) {
    println!("{} ({} entries)", spec.name(), spec.len());
    if spec.is_empty() {
        return;
    }

    let entries = spec.entries();
    let width = entries.iter().map(|e| e.key.len()).max().unwrap_or(0);

    println!();
    for entry in &entries {
        let range = match entry.value {
            EntryValue::Slider(slider) => format!(
                "  [{} .. {}]",
                format_number(slider.min),
                format_number(slider.max)
            ),
            _ => String::new(),
        };
        let label = match &entry.label {
            Some(label) if label != &entry.key => format!("  \"{label}\""),
            _ => String::new(),
        };
        println!(
            "  {:<width$}  {:<6}  {}{}{}",
            entry.key,
            entry.kind().to_string(),
            describe_value(&entry.value.current()),
            range,
            label,
        );
    }
}
