//! Severance (prestaciones laborales) calculation.
//!
//! On termination the employee is owed, depending on cause and tenure,
//! notice pay (preaviso, Código de Trabajo art. 76), severance pay
//! (cesantía, art. 80), the vacation days accrued in the current year
//! (arts. 177 and 182) and the prorated Christmas salary (art. 219).

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{SeveranceEntitlements, StatutoryRateTable, VacationEntitlement};
use crate::error::EngineResult;
use crate::models::{AuditStep, Employee, SeveranceResult, TerminationCause, Tenure, TenureBand};

use super::rounding::round_currency;
use super::tenure::{calculate_tenure, daily_wage, tenure_band};

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Notice and severance pay for a termination.
#[derive(Debug, Clone)]
pub struct NoticeAndSeveranceResult {
    /// Notice pay (preaviso), full precision.
    pub notice_pay: Decimal,
    /// Severance pay (cesantía), full precision.
    pub severance_pay: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates notice pay and severance pay.
///
/// Only [`TerminationCause::EmployerNoticeTermination`] owes them; every
/// other cause yields zero for both, whatever the tenure.
///
/// Day counts come from `entitlements`. With the 2024 table:
///
/// | band | notice | severance |
/// |---|---|---|
/// | < 3 months | 0 | 0 |
/// | 3 to < 6 months | 7 days | 6 days |
/// | 6 to < 12 months | 14 days | 13 days |
/// | 1 to < 5 years | 28 days | 21 days per year worked |
/// | 5 years or more | 28 days | 23 days per year worked |
pub fn calculate_notice_and_severance(
    cause: TerminationCause,
    tenure: &Tenure,
    band: TenureBand,
    daily_wage: Decimal,
    entitlements: &SeveranceEntitlements,
    step_number: u32,
) -> NoticeAndSeveranceResult {
    let (notice_days, severance_days) = if cause.owes_notice_and_severance() {
        match band {
            TenureBand::UnderThreeMonths => (Decimal::ZERO, Decimal::ZERO),
            TenureBand::ThreeToSixMonths => {
                let days = entitlements.three_to_six_months;
                (days.notice_days, days.severance_days)
            }
            TenureBand::SixToTwelveMonths => {
                let days = entitlements.six_to_twelve_months;
                (days.notice_days, days.severance_days)
            }
            TenureBand::OneToFiveYears => {
                let days = entitlements.one_to_five_years;
                (days.notice_days, days.severance_days * tenure.years)
            }
            TenureBand::FiveYearsOrMore => {
                let days = entitlements.five_years_or_more;
                (days.notice_days, days.severance_days * tenure.years)
            }
        }
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    let notice_pay = notice_days * daily_wage;
    let severance_pay = severance_days * daily_wage;

    let reasoning = if cause.owes_notice_and_severance() {
        format!(
            "{} with band {:?}: notice {} days, severance {} days at daily wage {}",
            cause,
            band,
            notice_days.normalize(),
            severance_days.normalize(),
            daily_wage.normalize()
        )
    } else {
        format!("No notice or severance owed - cause is {}", cause)
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "notice_and_severance".to_string(),
        rule_name: "Notice and Severance Pay".to_string(),
        legal_ref: "Código de Trabajo arts. 76, 80".to_string(),
        input: serde_json::json!({
            "cause": cause,
            "tenure_band": band,
            "years_worked": tenure.years.normalize().to_string(),
            "daily_wage": daily_wage.normalize().to_string()
        }),
        output: serde_json::json!({
            "notice_days": notice_days.normalize().to_string(),
            "severance_days": severance_days.normalize().to_string(),
            "notice_pay": notice_pay.normalize().to_string(),
            "severance_pay": severance_pay.normalize().to_string()
        }),
        reasoning,
    };

    NoticeAndSeveranceResult {
        notice_pay,
        severance_pay,
        audit_step,
    }
}

/// Prorated vacation for the current partial year.
#[derive(Debug, Clone)]
pub struct VacationPayResult {
    /// Vacation days accrued in the current partial year.
    pub prorated_days: Decimal,
    /// Vacation pay, full precision.
    pub vacation_pay: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the vacation accrued in the current partial year of service.
///
/// Vacation taken in earlier years is assumed fully consumed, so only the
/// months since the last service anniversary are prorated. Nothing accrues
/// below `entitlement.minimum_months` of service.
pub fn calculate_vacation_pay(
    tenure: &Tenure,
    band: TenureBand,
    daily_wage: Decimal,
    entitlement: &VacationEntitlement,
    step_number: u32,
) -> VacationPayResult {
    let eligible = tenure.months >= entitlement.minimum_months;

    let annual_days = if band == TenureBand::FiveYearsOrMore {
        entitlement.days_from_five_years
    } else {
        entitlement.days_under_five_years
    };
    let months_in_current_year = tenure.months % MONTHS_PER_YEAR;

    let prorated_days = if eligible {
        annual_days / MONTHS_PER_YEAR * months_in_current_year
    } else {
        Decimal::ZERO
    };
    let vacation_pay = prorated_days * daily_wage;

    let reasoning = if eligible {
        format!(
            "{}/12 days x {} months = {} days at {}",
            annual_days.normalize(),
            months_in_current_year.round_dp(4),
            prorated_days.round_dp(4),
            daily_wage.round_dp(2)
        )
    } else {
        format!(
            "No vacation accrued - {} months is under the {} month minimum",
            tenure.months.round_dp(2),
            entitlement.minimum_months.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "prorated_vacation".to_string(),
        rule_name: "Prorated Vacation".to_string(),
        legal_ref: "Código de Trabajo arts. 177, 182".to_string(),
        input: serde_json::json!({
            "months_worked": tenure.months.normalize().to_string(),
            "daily_wage": daily_wage.normalize().to_string()
        }),
        output: serde_json::json!({
            "eligible": eligible,
            "annual_days": annual_days.normalize().to_string(),
            "prorated_days": prorated_days.normalize().to_string(),
            "vacation_pay": vacation_pay.normalize().to_string()
        }),
        reasoning,
    };

    VacationPayResult {
        prorated_days,
        vacation_pay,
        audit_step,
    }
}

/// Prorated Christmas salary.
#[derive(Debug, Clone)]
pub struct ChristmasBonusResult {
    /// The bonus, full precision.
    pub christmas_bonus: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the Christmas salary prorated to the termination month.
///
/// `monthly_salary * month / 12`, where `month` is the termination month
/// number (1 to 12). Owed for every cause and tenure.
pub fn calculate_christmas_bonus(
    monthly_salary: Decimal,
    termination_date: NaiveDate,
    step_number: u32,
) -> ChristmasBonusResult {
    let month = termination_date.month();
    let christmas_bonus = monthly_salary * Decimal::from(month) / MONTHS_PER_YEAR;

    let audit_step = AuditStep {
        step_number,
        rule_id: "christmas_bonus".to_string(),
        rule_name: "Christmas Salary".to_string(),
        legal_ref: "Código de Trabajo art. 219".to_string(),
        input: serde_json::json!({
            "monthly_salary": monthly_salary.to_string(),
            "termination_month": month
        }),
        output: serde_json::json!({
            "christmas_bonus": christmas_bonus.normalize().to_string()
        }),
        reasoning: format!(
            "{} x {}/12 = {}",
            monthly_salary,
            month,
            christmas_bonus.round_dp(2)
        ),
    };

    ChristmasBonusResult {
        christmas_bonus,
        audit_step,
    }
}

/// Calculates everything owed to an employee on termination.
///
/// Each component is rounded to cents and the total is their sum.
///
/// # Errors
///
/// Returns `InvalidInput` for a negative salary or a termination date
/// before the hire date.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::calculate_severance;
/// use nomina_engine::config::StatutoryRateTable;
/// use nomina_engine::models::{Employee, TerminationCause};
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
///
/// let result = calculate_severance(
///     &employee,
///     NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
///     TerminationCause::EmployeeResignation,
///     &StatutoryRateTable::dominican_republic_2024(),
/// )
/// .unwrap();
/// assert!(result.notice_pay.is_zero());
/// assert!(result.severance_pay.is_zero());
/// assert_eq!(result.christmas_bonus, Decimal::from_str("25000.00").unwrap());
/// ```
pub fn calculate_severance(
    employee: &Employee,
    termination_date: NaiveDate,
    cause: TerminationCause,
    table: &StatutoryRateTable,
) -> EngineResult<SeveranceResult> {
    employee.validate()?;

    let tenure = calculate_tenure(employee.hire_date, termination_date, &table.labor)?;
    let band = tenure_band(&tenure);
    let wage = daily_wage(employee.monthly_salary, &table.labor);

    let mut audit_steps: Vec<AuditStep> = Vec::with_capacity(4);

    let notice_and_severance = calculate_notice_and_severance(
        cause,
        &tenure,
        band,
        wage,
        &table.labor.severance,
        1,
    );
    audit_steps.push(notice_and_severance.audit_step);

    let vacation = calculate_vacation_pay(&tenure, band, wage, &table.labor.vacation, 2);
    audit_steps.push(vacation.audit_step);

    let bonus = calculate_christmas_bonus(employee.monthly_salary, termination_date, 3);
    audit_steps.push(bonus.audit_step);

    let notice_pay = round_currency(notice_and_severance.notice_pay);
    let severance_pay = round_currency(notice_and_severance.severance_pay);
    let vacation_pay = round_currency(vacation.vacation_pay);
    let christmas_bonus = round_currency(bonus.christmas_bonus);
    let total = notice_pay + severance_pay + vacation_pay + christmas_bonus;

    debug!(
        employee_id = %employee.id,
        cause = %cause,
        tenure_days = tenure.days,
        tenure_band = ?band,
        total = %total,
        "Severance calculated"
    );

    Ok(SeveranceResult {
        employee_id: employee.id.clone(),
        termination_date,
        cause,
        tenure,
        tenure_band: band,
        daily_wage: round_currency(wage),
        notice_pay,
        severance_pay,
        vacation_pay,
        christmas_bonus,
        total,
        rate_table_version: table.version.clone(),
        audit_steps,
    })
}
