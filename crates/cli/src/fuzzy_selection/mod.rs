//! Interactive fuzzy selection of a subscription.
//!
//! A small terminal UI used when `azcx` is run without a target. It knows
//! nothing about profiles; it takes a list of names and returns the chosen
//! one (or an empty string if the user backed out).
//!
//! # User Interface
//!
//! The interface supports:
//! - Typing to filter (fuzzy subsequence match, best match first)
//! - Arrow keys or Ctrl+P/Ctrl+N to move the highlight
//! - Enter to select the highlighted subscription
//! - Escape or Ctrl+C to cancel

pub mod colors;
pub mod input;
pub mod types;
pub mod ui;

// Re-exports for convenience
pub use colors::SelectorTheme;
pub use types::{filter_candidates, update, SelectorEvent, SelectorState, Step};
pub use ui::fuzzy_select;
