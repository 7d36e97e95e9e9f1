//! Core of the finance tracker.
//!
//! Everything here works on one fetched snapshot per call: the [`Tracker`] asks its
//! [`Store`] for the data it needs, runs the pure reductions in [`balance`] and
//! [`report`], and returns fresh values. Nothing is cached between calls.

pub use balance::calculate_balance;
pub use commands::{OperationDraft, category_payload};
pub use error::{CATEGORY_IN_USE_MESSAGE, EngineError, GatewayError};
pub use filter::{CategoryFilter, Filter, SortBy, SortDirection, TypeFilter, parse_kind};
pub use money::parse_amount;
pub use report::{UNCATEGORIZED, build_report, category_names, month_display_name, month_key};
pub use store::{GatewayResult, Store};
pub use tracker::{Tracker, TrackerBuilder};

pub mod balance;
mod commands;
mod error;
mod filter;
mod money;
pub mod report;
mod store;
mod tracker;
mod util;

pub type ResultEngine<T> = Result<T, EngineError>;
