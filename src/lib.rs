//! Payroll engine for daily-rate workforces
//!
//! This crate provides payroll record keeping for construction-style daily
//! payrolls: validated single-entry composition, CSV batch ingestion with
//! all-or-nothing commits, per-employee-per-day uniqueness, and exact
//! decimal summary aggregation.

#![warn(missing_docs)]

pub mod aggregate;
pub mod compose;
pub mod error;
pub mod ingest;
pub mod models;
pub mod service;
pub mod store;
pub mod validation;
