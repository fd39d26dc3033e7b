//! Pure helpers between validated responses and the cards.
//!
//! ## Submodules
//!
//! - [`format`]: thousands separators, currency, percentages and durations
//! - [`health`]: chip status derivation and value tones
//! - [`history`]: CPU history for sparklines
//! - [`money`]: net worth and equity
//! - [`units`]: byte, bit and temperature conversions

pub mod format;
pub mod health;
pub mod history;
pub mod money;
pub mod units;

pub use health::Tone;
pub use history::CpuHistory;
