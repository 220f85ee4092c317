//! Core data models for the payroll engine.
//!
//! This module contains the employee input model and the results produced
//! by the calculators.

mod audit;
mod employee;
mod payroll_result;
mod severance_result;

pub use audit::AuditStep;
pub use employee::{Employee, MAX_MONTHLY_SALARY, TerminationCause};
pub use payroll_result::{MonthlyPayrollResult, PayrollRun, PayrollRunTotals};
pub use severance_result::{SeveranceResult, Tenure, TenureBand};
