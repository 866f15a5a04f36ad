// src/models/mod.rs

//! Domain models for the rate explorer.
//!
//! This module contains all data structures used throughout the library,
//! organized by their primary purpose.

mod column;
mod config;
mod filter;
mod rates;
mod schedule;

// Re-export all public types
pub use column::Column;
pub use config::{ApiConfig, Config, ExplorerConfig};
pub use filter::{
    BusinessSize, ContractYear, EducationLevel, FilterState, QueryType, Site, Sort, SortColumn,
    normalize_education,
};
pub use rates::{RatesResponse, RawResultRow, RowId, format_price};
pub use schedule::{ScheduleMetadata, find_schedule};
