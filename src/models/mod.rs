//! Data models for tunable specs.
//!
//! These types are independent of loading, observation and UI. The spec
//! store, the control model and the terminal panel all build on them.

pub mod entry;
pub mod rgb;

pub use entry::{EntryValue, SliderValue, TunableEntry, TunableValue, ValueKind};
pub use rgb::{ColorChannel, RgbaColor};
