//! Calculation logic for the payroll engine.
//!
//! This module contains the pure calculation functions: TSS contributions on
//! capped bases, ISR withholding over the progressive bracket scale, the
//! monthly payroll that combines them, payroll runs over many employees,
//! tenure arithmetic and the severance components owed on termination.
//!
//! Every function takes the [`StatutoryRateTable`](crate::config::StatutoryRateTable)
//! explicitly and holds no state, so calls are safe to run concurrently.

mod income_tax;
mod monthly_payroll;
mod payroll_run;
mod rounding;
mod severance;
mod social_security;
mod tenure;

pub use income_tax::{
    IncomeTaxResult, calculate_annual_income_tax, calculate_income_tax, find_bracket,
};
pub use monthly_payroll::{calculate_monthly_payroll, is_balanced};
pub use payroll_run::calculate_payroll_run;
pub use rounding::round_currency;
pub use severance::{
    ChristmasBonusResult, NoticeAndSeveranceResult, VacationPayResult, calculate_christmas_bonus,
    calculate_notice_and_severance, calculate_severance, calculate_vacation_pay,
};
pub use social_security::{
    ContributionBases, EmployeeContributionsResult, EmployerContributionsResult,
    calculate_employee_contributions, calculate_employer_contributions, contribution_bases,
};
pub use tenure::{calculate_tenure, daily_wage, tenure_band};
