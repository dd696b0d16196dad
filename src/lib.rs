//! # CPT Standings
//!
//! Capcom Pro Tour rating standings and per-player statistics, built from
//! tab-separated season exports.
//!
//! ## Architecture
//!
//! - **table**: Delimited text decoding into header-keyed rows
//! - **mapping**: Row-to-record mappers and export schema adapters
//! - **models**: Core data structures (ratings, players, placements, matches)
//! - **calculate**: Ranking, trajectory, battle record and summary aggregation
//! - **view**: Country filtering and the country list
//! - **fetch**: Asset sources (local directory or HTTP)
//! - **loader**: Concurrent per-view loading
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod fetch;
pub mod loader;
pub mod mapping;
pub mod models;
pub mod table;
pub mod view;

pub use models::*;
