//! Payroll Engine for the Dominican Republic
//!
//! This crate computes monthly payroll (TSS social-security contributions
//! and ISR income tax withholding) and the severance owed on termination
//! (preaviso, cesantía, prorated vacation and Christmas salary), driven by
//! versioned statutory rate tables loaded from configuration.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
