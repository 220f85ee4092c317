//! Tenure and daily wage arithmetic for severance.
//!
//! Tenure is measured in calendar days and converted with a fixed
//! days-per-year constant (365.25 by default), without leap-year exactness.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::LaborCodeConstants;
use crate::error::{EngineError, EngineResult};
use crate::models::{Tenure, TenureBand};

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Measures the length of service between hire and termination.
///
/// # Errors
///
/// Returns `InvalidInput` if `termination_date` precedes `hire_date`.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::calculate_tenure;
/// use nomina_engine::config::LaborCodeConstants;
/// use chrono::NaiveDate;
///
/// let tenure = calculate_tenure(
///     NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
///     &LaborCodeConstants::default(),
/// )
/// .unwrap();
/// assert_eq!(tenure.days, 1992);
/// ```
pub fn calculate_tenure(
    hire_date: NaiveDate,
    termination_date: NaiveDate,
    labor: &LaborCodeConstants,
) -> EngineResult<Tenure> {
    if termination_date < hire_date {
        return Err(EngineError::invalid_input(
            "termination_date",
            format!(
                "termination date {} precedes hire date {}",
                termination_date, hire_date
            ),
        ));
    }

    let days = (termination_date - hire_date).num_days();
    let years = Decimal::from(days) / labor.days_per_year;
    let months = years * MONTHS_PER_YEAR;

    Ok(Tenure {
        days,
        years,
        months,
    })
}

/// Places a tenure in its notice/severance band.
///
/// Bands are checked in ascending order and are mutually exclusive.
pub fn tenure_band(tenure: &Tenure) -> TenureBand {
    if tenure.months < Decimal::from(3) {
        TenureBand::UnderThreeMonths
    } else if tenure.months < Decimal::from(6) {
        TenureBand::ThreeToSixMonths
    } else if tenure.months < MONTHS_PER_YEAR {
        TenureBand::SixToTwelveMonths
    } else if tenure.years < Decimal::from(5) {
        TenureBand::OneToFiveYears
    } else {
        TenureBand::FiveYearsOrMore
    }
}

/// Derives the daily wage from a monthly salary.
pub fn daily_wage(monthly_salary: Decimal, labor: &LaborCodeConstants) -> Decimal {
    monthly_salary / labor.daily_wage_divisor
}
