//! Monthly payroll calculation.
//!
//! This module combines the TSS and ISR steps into the full monthly
//! breakdown for one employee: deductions, employer contributions and net
//! salary.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::StatutoryRateTable;
use crate::error::EngineResult;
use crate::models::{AuditStep, Employee, MonthlyPayrollResult};

use super::income_tax::calculate_income_tax;
use super::rounding::round_currency;
use super::social_security::{calculate_employee_contributions, calculate_employer_contributions};

/// Calculates one month of payroll for an employee.
///
/// Steps:
/// 1. Employee TSS deductions on the capped bases.
/// 2. ISR withholding on the annualized salary net of TSS.
/// 3. Employer contributions.
/// 4. Net salary.
///
/// Every component is computed at full precision and rounded to cents once.
/// Totals and net salary are derived from the rounded components so that
/// `net_salary + total_employee_deductions == gross_salary` to the cent.
///
/// # Errors
///
/// Returns `InvalidInput` for a negative salary and `InvalidRateTable` if
/// the table cannot place the income in a bracket.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::calculate_monthly_payroll;
/// use nomina_engine::config::StatutoryRateTable;
/// use nomina_engine::models::Employee;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     full_name: "Ana Pérez".to_string(),
///     national_id: "001-0000000-1".to_string(),
///     hire_date: NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
///     monthly_salary: Decimal::from_str("50000.00").unwrap(),
///     is_active: true,
///     job_title: None,
/// };
/// let table = StatutoryRateTable::dominican_republic_2024();
///
/// let result = calculate_monthly_payroll(&employee, &table).unwrap();
/// assert_eq!(result.income_tax, Decimal::from_str("1854.00").unwrap());
/// assert_eq!(result.net_salary, Decimal::from_str("45191.00").unwrap());
/// ```
pub fn calculate_monthly_payroll(
    employee: &Employee,
    table: &StatutoryRateTable,
) -> EngineResult<MonthlyPayrollResult> {
    employee.validate()?;

    let gross = employee.monthly_salary;
    let mut audit_steps: Vec<AuditStep> = Vec::with_capacity(4);

    let employee_contributions = calculate_employee_contributions(gross, table, 1);
    audit_steps.push(employee_contributions.audit_step);

    let income_tax = calculate_income_tax(
        gross,
        employee_contributions.social_health,
        employee_contributions.pension,
        table,
        2,
    )?;
    audit_steps.push(income_tax.audit_step);

    let employer_contributions = calculate_employer_contributions(gross, table, 3);
    audit_steps.push(employer_contributions.audit_step);

    let gross_salary = round_currency(gross);
    let employee_social_health = round_currency(employee_contributions.social_health);
    let employee_pension = round_currency(employee_contributions.pension);
    let income_tax_withheld = round_currency(income_tax.monthly_withholding);
    let total_employee_deductions = employee_social_health + employee_pension + income_tax_withheld;
    let net_salary = gross_salary - total_employee_deductions;

    let employer_social_health = round_currency(employer_contributions.social_health);
    let employer_labor_risk = round_currency(employer_contributions.labor_risk);
    let employer_pension = round_currency(employer_contributions.pension);
    let employer_vocational_training = round_currency(employer_contributions.vocational_training);
    let total_employer_contributions = employer_social_health
        + employer_labor_risk
        + employer_pension
        + employer_vocational_training;

    audit_steps.push(AuditStep {
        step_number: 4,
        rule_id: "net_salary".to_string(),
        rule_name: "Net Salary".to_string(),
        legal_ref: "Código de Trabajo art. 192".to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.to_string(),
            "employee_social_health": employee_social_health.to_string(),
            "employee_pension": employee_pension.to_string(),
            "income_tax": income_tax_withheld.to_string()
        }),
        output: serde_json::json!({
            "total_employee_deductions": total_employee_deductions.to_string(),
            "net_salary": net_salary.to_string()
        }),
        reasoning: format!(
            "{} - {} - {} - {} = {}",
            gross_salary, employee_social_health, employee_pension, income_tax_withheld, net_salary
        ),
    });

    debug!(
        employee_id = %employee.id,
        gross_salary = %gross_salary,
        net_salary = %net_salary,
        bracket_index = income_tax.bracket_index,
        "Monthly payroll calculated"
    );

    Ok(MonthlyPayrollResult {
        employee_id: employee.id.clone(),
        employee_name: employee.full_name.clone(),
        gross_salary,
        employee_social_health,
        employee_pension,
        income_tax: income_tax_withheld,
        total_employee_deductions,
        employer_social_health,
        employer_labor_risk,
        employer_pension,
        employer_vocational_training,
        total_employer_contributions,
        net_salary,
        rate_table_version: table.version.clone(),
        audit_steps,
    })
}

/// Returns true if the result satisfies the conservation law
/// `net + deductions == gross`.
pub fn is_balanced(result: &MonthlyPayrollResult) -> bool {
    result.net_salary
        + result.employee_social_health
        + result.employee_pension
        + result.income_tax
        == result.gross_salary
        && result.total_employee_deductions
            == result.employee_social_health + result.employee_pension + result.income_tax
        && result.total_employer_contributions
            == result.employer_social_health
                + result.employer_labor_risk
                + result.employer_pension
                + result.employer_vocational_training
        && result.net_salary <= result.gross_salary
        && result.gross_salary >= Decimal::ZERO
}
