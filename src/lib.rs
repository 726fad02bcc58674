//! Store operating-hours engine.
//!
//! This crate decides, for any store and date, whether the store is open and
//! during which time windows. It combines a weekly recurring schedule, a
//! holiday calendar with per-store auto-close policies, and per-date manual
//! overrides into one effective answer, and provides the editing operations
//! that keep a store's configuration consistent.

#![warn(missing_docs)]

pub mod api;
pub mod calendar;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
