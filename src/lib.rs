// src/lib.rs

//! Rate Explorer Library
//!
//! Filter state, query composition and row exclusion for browsing
//! schedule labor rates through the rates API.

pub mod api;
pub mod error;
pub mod explorer;
pub mod models;
pub mod query;
pub mod store;
pub mod utils;
pub mod view;
