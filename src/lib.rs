//! # county-report
//!
//! Runs a script of reporting operations over county demographic records:
//! filtering by state or by a numeric field, printing per-county reports,
//! and computing population-weighted statistics.
//!
//! ```text
//! data::loader ──► CountyDataset ──► app::ReportApp ──► stdout
//!                                      │   ▲
//!                       operation::parse   state::SessionState (current view)
//! ```
//!
//! Script lines look like `opcode[:arg1[:arg2]]`:
//!
//! ```text
//! filter-state:CA
//! filter-gt:Education.Bachelor's Degree or Higher:40
//! display
//! percent-of:Ethnicities.Asian Alone
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod operation;
pub mod report;
pub mod state;
