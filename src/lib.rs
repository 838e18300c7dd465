//! Meetup calendar and crew pay engine for a regional filmmaking community.
//!
//! This crate expands the organization directory's recurring meetups into
//! dated calendar instances in a fixed timezone, exports them as iCalendar
//! files and web calendar links, and calculates day-rate crew pay with
//! overtime for invoices.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod calendar;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
