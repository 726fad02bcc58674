//! Configuration loading for the store calendar service.
//!
//! This module provides the holiday tables, loaded from YAML files with a
//! built-in Italian fallback, and the server settings read from the
//! environment.
//!
//! # Example
//!
//! ```no_run
//! use store_calendar::config::HolidayCalendar;
//!
//! let calendar = HolidayCalendar::load("./config/holidays").unwrap();
//! println!("{} holidays", calendar.holidays_for("default", 2026).len());
//! ```

mod loader;
mod server;
mod types;

pub use loader::{DEFAULT_TABLE_NAME, HolidayCalendar, HolidaySource};
pub use server::{DEFAULT_HOST, DEFAULT_PORT, ServerConfig};
pub use types::{HolidayRule, HolidayTable, easter_sunday};
