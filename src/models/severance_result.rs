//! Severance (prestaciones laborales) result models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AuditStep, TerminationCause};

/// Tenure band that determines notice and severance entitlements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenureBand {
    /// Less than three months of service.
    UnderThreeMonths,
    /// From three to less than six months.
    ThreeToSixMonths,
    /// From six to less than twelve months.
    SixToTwelveMonths,
    /// From one to less than five years.
    OneToFiveYears,
    /// Five years or more.
    FiveYearsOrMore,
}

/// Length of service at termination.
///
/// `years` is `days / days_per_year` and `months` is `years * 12`, both at
/// full precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenure {
    /// Calendar days between hire and termination.
    pub days: i64,
    /// Years of service.
    pub years: Decimal,
    /// Months of service.
    pub months: Decimal,
}

/// The severance owed to an employee on termination.
///
/// Components are rounded to cents and `total` is their sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveranceResult {
    /// The ID of the terminated employee.
    pub employee_id: String,
    /// Last day of employment.
    pub termination_date: NaiveDate,
    /// Why the employment ended.
    pub cause: TerminationCause,
    /// Length of service.
    pub tenure: Tenure,
    /// Tenure band used for notice and severance.
    pub tenure_band: TenureBand,
    /// Daily wage (monthly salary / daily wage divisor).
    pub daily_wage: Decimal,
    /// Notice pay (preaviso).
    pub notice_pay: Decimal,
    /// Severance pay (cesantía).
    pub severance_pay: Decimal,
    /// Prorated vacation pay for the current partial year.
    pub vacation_pay: Decimal,
    /// Prorated Christmas salary (regalía pascual).
    pub christmas_bonus: Decimal,
    /// Sum of the four components.
    pub total: Decimal,
    /// Version of the rate table used.
    pub rate_table_version: String,
    /// Steps taken to reach the result.
    pub audit_steps: Vec<AuditStep>,
}
