//! Calendar logic for the store operating-hours engine.
//!
//! This module contains the validators that guard the configuration
//! invariants, the resolver that turns a configuration and a holiday list into
//! the effective status of each date, the editing operations on weekly rules
//! and per-date overrides, and the propagation of a configuration to other
//! stores.

mod override_editor;
mod propagation;
mod resolver;
mod slots;
mod validation;
mod weekly_editor;

pub use propagation::{CopyFailure, CopyReport, copy_config};
pub use resolver::{DayResolution, DayStatus, resolve, resolve_range};
pub use validation::{validate_config, validate_override, validate_rule, validate_slots};
