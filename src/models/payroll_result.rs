//! Monthly payroll result models.
//!
//! This module contains the [`MonthlyPayrollResult`] produced for one
//! employee and the [`PayrollRun`] aggregating a whole payroll period.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AuditStep;

/// The monthly payroll breakdown for one employee.
///
/// All amounts are rounded to cents. Totals and net salary are built from
/// the rounded components, so
/// `net_salary + total_employee_deductions == gross_salary` holds exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPayrollResult {
    /// The ID of the employee the calculation is for.
    pub employee_id: String,
    /// The employee's full name.
    pub employee_name: String,
    /// Gross monthly salary.
    pub gross_salary: Decimal,
    /// Employee health insurance (SFS) deduction.
    pub employee_social_health: Decimal,
    /// Employee pension (AFP) deduction.
    pub employee_pension: Decimal,
    /// Income tax (ISR) withheld this month.
    pub income_tax: Decimal,
    /// Sum of all employee deductions.
    pub total_employee_deductions: Decimal,
    /// Employer health insurance (SFS) contribution.
    pub employer_social_health: Decimal,
    /// Employer labor-risk (SRL) contribution.
    pub employer_labor_risk: Decimal,
    /// Employer pension (AFP) contribution.
    pub employer_pension: Decimal,
    /// Employer vocational training (INFOTEP) contribution.
    pub employer_vocational_training: Decimal,
    /// Sum of all employer contributions.
    pub total_employer_contributions: Decimal,
    /// Salary paid to the employee.
    pub net_salary: Decimal,
    /// Version of the rate table used.
    pub rate_table_version: String,
    /// Steps taken to reach the result.
    pub audit_steps: Vec<AuditStep>,
}

/// Aggregated totals of a payroll run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRunTotals {
    /// Number of employees paid.
    pub employee_count: usize,
    /// Sum of gross salaries.
    pub gross_salary: Decimal,
    /// Sum of employee social-security deductions (SFS + AFP).
    pub employee_social_security: Decimal,
    /// Sum of income tax withheld.
    pub income_tax: Decimal,
    /// Sum of all employee deductions.
    pub total_employee_deductions: Decimal,
    /// Sum of all employer contributions.
    pub total_employer_contributions: Decimal,
    /// Sum of net salaries.
    pub net_salary: Decimal,
}

impl PayrollRunTotals {
    /// Adds one employee's line to the totals.
    pub fn add(&mut self, line: &MonthlyPayrollResult) {
        self.employee_count += 1;
        self.gross_salary += line.gross_salary;
        self.employee_social_security += line.employee_social_health + line.employee_pension;
        self.income_tax += line.income_tax;
        self.total_employee_deductions += line.total_employee_deductions;
        self.total_employer_contributions += line.total_employer_contributions;
        self.net_salary += line.net_salary;
    }
}

/// The payroll of every active employee for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRun {
    /// The period the run pays (any date within the month).
    pub period: NaiveDate,
    /// Version of the rate table used.
    pub rate_table_version: String,
    /// One line per active employee, in input order.
    pub lines: Vec<MonthlyPayrollResult>,
    /// IDs of inactive employees left out of the run.
    pub skipped_employee_ids: Vec<String>,
    /// Aggregated totals over `lines`.
    pub totals: PayrollRunTotals,
}
