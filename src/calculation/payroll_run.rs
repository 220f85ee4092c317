//! Payroll run functionality.
//!
//! A payroll run applies the monthly calculation to every active employee
//! of a period and aggregates the totals that get posted and paid.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::StatutoryRateTable;
use crate::error::EngineResult;
use crate::models::{Employee, PayrollRun, PayrollRunTotals};

use super::monthly_payroll::calculate_monthly_payroll;

/// Calculates the payroll of every active employee for a period.
///
/// Inactive employees are skipped and listed in
/// [`PayrollRun::skipped_employee_ids`]. The first invalid employee aborts
/// the whole run, so no partial run is ever returned.
pub fn calculate_payroll_run(
    employees: &[Employee],
    period: NaiveDate,
    table: &StatutoryRateTable,
) -> EngineResult<PayrollRun> {
    let mut lines = Vec::with_capacity(employees.len());
    let mut skipped_employee_ids = Vec::new();
    let mut totals = PayrollRunTotals::default();

    for employee in employees {
        if !employee.is_active {
            debug!(employee_id = %employee.id, "Skipping inactive employee");
            skipped_employee_ids.push(employee.id.clone());
            continue;
        }

        let line = calculate_monthly_payroll(employee, table)?;
        totals.add(&line);
        lines.push(line);
    }

    info!(
        period = %period,
        rate_table = %table.version,
        employees = totals.employee_count,
        skipped = skipped_employee_ids.len(),
        net_salary = %totals.net_salary,
        "Payroll run calculated"
    );

    Ok(PayrollRun {
        period,
        rate_table_version: table.version.clone(),
        lines,
        skipped_employee_ids,
        totals,
    })
}
