//! Configuration types for statutory payroll rules.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, plus the invariant
//! checks every [`StatutoryRateTable`] has to pass before use.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};

/// One cent, the gap between a bracket's upper limit and the next bracket's start.
pub const CENT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Metadata about the jurisdiction whose law the rate tables encode.
#[derive(Debug, Clone, Deserialize)]
pub struct JurisdictionMetadata {
    /// ISO country code (e.g., "DO").
    pub code: String,
    /// The human-readable name of the jurisdiction.
    pub name: String,
    /// ISO currency code of all monetary amounts.
    pub currency: String,
    /// URL of the income tax authority.
    pub tax_authority_url: String,
    /// URL of the social security treasury.
    pub social_security_url: String,
}

/// Per-tenant overrides of the statutory defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct TenantConfig {
    /// The tenant's display name.
    pub name: String,
    /// Labor-risk rate assigned to the tenant's industry, if it differs
    /// from the table average.
    #[serde(default)]
    pub labor_risk_rate: Option<Decimal>,
}

/// Tenants configuration file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TenantsConfig {
    /// Map of tenant id to its overrides.
    #[serde(default)]
    pub tenants: HashMap<String, TenantConfig>,
}

/// Social-security rates withheld from the employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRates {
    /// Family health insurance (SFS) rate.
    pub social_health: Decimal,
    /// Pension fund (AFP) rate.
    pub pension: Decimal,
}

/// Contribution rates paid by the employer on top of gross salary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployerRates {
    /// Family health insurance (SFS) rate.
    pub social_health: Decimal,
    /// Labor-risk insurance (SRL) rate. Varies by industry.
    pub labor_risk: Decimal,
    /// Pension fund (AFP) rate.
    pub pension: Decimal,
    /// Vocational training (INFOTEP) rate, applied to uncapped gross.
    pub vocational_training: Decimal,
}

/// Monthly salary ceilings for the capped contribution bases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionCaps {
    /// Ceiling for the health and labor-risk base.
    pub social_health: Decimal,
    /// Ceiling for the pension base.
    pub pension: Decimal,
}

/// An annual income tax bracket.
///
/// Brackets follow the published convention where each bracket starts one
/// cent above the previous bracket's upper limit. Tax in the bracket is
/// `(income - excess_base) * rate + fixed_amount`, where the excess is
/// measured from the previous upper limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Annual income at which the bracket begins (e.g., 416220.01).
    pub from: Decimal,
    /// Inclusive annual upper limit; `None` for the unbounded last bracket.
    #[serde(default)]
    pub to: Option<Decimal>,
    /// Marginal rate applied to the excess.
    pub rate: Decimal,
    /// Cumulative tax due at the start of the bracket.
    #[serde(default)]
    pub fixed_amount: Decimal,
}

impl TaxBracket {
    /// The income the excess is measured from: the previous bracket's
    /// upper limit, or zero for the first bracket.
    pub fn excess_base(&self) -> Decimal {
        if self.from.is_zero() {
            Decimal::ZERO
        } else {
            self.from - CENT
        }
    }

    /// Returns true if `annual_income` falls at or below this bracket's limit.
    pub fn covers(&self, annual_income: Decimal) -> bool {
        self.to.is_none_or(|limit| annual_income <= limit)
    }
}

fn default_daily_wage_divisor() -> Decimal {
    Decimal::new(2383, 2)
}

fn default_days_per_year() -> Decimal {
    Decimal::new(36525, 2)
}

/// Notice and severance days owed within one tenure band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandEntitlement {
    /// Days of notice pay (preaviso).
    pub notice_days: Decimal,
    /// Days of severance pay (cesantía). In the year-based bands this is
    /// days per year worked.
    pub severance_days: Decimal,
}

impl BandEntitlement {
    fn new(notice_days: i64, severance_days: i64) -> Self {
        Self {
            notice_days: Decimal::from(notice_days),
            severance_days: Decimal::from(severance_days),
        }
    }
}

/// Notice and severance days by tenure band (Código de Trabajo arts. 76, 80).
///
/// Tenure under three months owes nothing and has no entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeveranceEntitlements {
    /// Three to less than six months of service.
    pub three_to_six_months: BandEntitlement,
    /// Six to less than twelve months of service.
    pub six_to_twelve_months: BandEntitlement,
    /// One to less than five years; severance is per year worked.
    pub one_to_five_years: BandEntitlement,
    /// Five years or more; severance is per year worked.
    pub five_years_or_more: BandEntitlement,
}

impl Default for SeveranceEntitlements {
    fn default() -> Self {
        Self {
            three_to_six_months: BandEntitlement::new(7, 6),
            six_to_twelve_months: BandEntitlement::new(14, 13),
            one_to_five_years: BandEntitlement::new(28, 21),
            five_years_or_more: BandEntitlement::new(28, 23),
        }
    }
}

/// Annual vacation entitlement (Código de Trabajo arts. 177, 182).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacationEntitlement {
    /// Vacation days per year of service under five years.
    pub days_under_five_years: Decimal,
    /// Vacation days per year of service from five years on.
    pub days_from_five_years: Decimal,
    /// Months of service required before vacation accrues.
    pub minimum_months: Decimal,
}

impl Default for VacationEntitlement {
    fn default() -> Self {
        Self {
            days_under_five_years: Decimal::from(14),
            days_from_five_years: Decimal::from(18),
            minimum_months: Decimal::from(5),
        }
    }
}

/// Labor-code constants used for severance arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaborCodeConstants {
    /// Working days per month used to derive the daily wage.
    #[serde(default = "default_daily_wage_divisor")]
    pub daily_wage_divisor: Decimal,
    /// Days per year used to convert tenure in days to years.
    #[serde(default = "default_days_per_year")]
    pub days_per_year: Decimal,
    /// Notice and severance days by tenure band.
    #[serde(default)]
    pub severance: SeveranceEntitlements,
    /// Vacation days and accrual threshold.
    #[serde(default)]
    pub vacation: VacationEntitlement,
}

impl Default for LaborCodeConstants {
    fn default() -> Self {
        Self {
            daily_wage_divisor: default_daily_wage_divisor(),
            days_per_year: default_days_per_year(),
            severance: SeveranceEntitlements::default(),
            vacation: VacationEntitlement::default(),
        }
    }
}

/// The statutory numbers in force from a given date.
///
/// Tables are plain data passed explicitly to every calculation, so tables
/// for different fiscal years can coexist (e.g., when re-running a prior
/// period under the rates of that period).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatutoryRateTable {
    /// Version label (e.g., "DO-2024").
    pub version: String,
    /// The first date this table applies to.
    pub effective_date: NaiveDate,
    /// Employee-side social-security rates.
    pub employee: EmployeeRates,
    /// Employer-side contribution rates.
    pub employer: EmployerRates,
    /// Monthly contribution ceilings.
    pub caps: ContributionCaps,
    /// Annual income tax brackets, ascending.
    pub income_tax_brackets: Vec<TaxBracket>,
    /// Labor-code constants for severance.
    #[serde(default)]
    pub labor: LaborCodeConstants,
}

impl StatutoryRateTable {
    /// The Dominican Republic table in force from 2024-01-01.
    ///
    /// # Example
    ///
    /// ```
    /// use nomina_engine::config::StatutoryRateTable;
    ///
    /// let table = StatutoryRateTable::dominican_republic_2024();
    /// assert!(table.validate().is_ok());
    /// assert_eq!(table.income_tax_brackets.len(), 4);
    /// ```
    pub fn dominican_republic_2024() -> Self {
        Self {
            version: "DO-2024".to_string(),
            effective_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            employee: EmployeeRates {
                social_health: Decimal::new(304, 4),
                pension: Decimal::new(287, 4),
            },
            employer: EmployerRates {
                social_health: Decimal::new(709, 4),
                labor_risk: Decimal::new(120, 4),
                pension: Decimal::new(710, 4),
                vocational_training: Decimal::new(100, 4),
            },
            caps: ContributionCaps {
                social_health: Decimal::new(17_530_500, 2),
                pension: Decimal::new(35_061_000, 2),
            },
            income_tax_brackets: vec![
                TaxBracket {
                    from: Decimal::ZERO,
                    to: Some(Decimal::new(41_622_000, 2)),
                    rate: Decimal::ZERO,
                    fixed_amount: Decimal::ZERO,
                },
                TaxBracket {
                    from: Decimal::new(41_622_001, 2),
                    to: Some(Decimal::new(62_432_900, 2)),
                    rate: Decimal::new(15, 2),
                    fixed_amount: Decimal::ZERO,
                },
                TaxBracket {
                    from: Decimal::new(62_432_901, 2),
                    to: Some(Decimal::new(86_712_300, 2)),
                    rate: Decimal::new(20, 2),
                    fixed_amount: Decimal::new(3_121_600, 2),
                },
                TaxBracket {
                    from: Decimal::new(86_712_301, 2),
                    to: None,
                    rate: Decimal::new(25, 2),
                    fixed_amount: Decimal::new(7_977_600, 2),
                },
            ],
            labor: LaborCodeConstants::default(),
        }
    }

    /// Returns a copy of this table with a different employer labor-risk rate.
    pub fn with_labor_risk_rate(&self, rate: Decimal) -> Self {
        let mut table = self.clone();
        table.employer.labor_risk = rate;
        table
    }

    /// Checks the structural invariants of the table.
    ///
    /// Brackets must be non-empty, start at zero, be contiguous under the
    /// one-cent convention, ascend strictly and end with an unbounded
    /// bracket. Rates must lie in `[0, 1]` and caps and labor constants must
    /// be positive.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidRateTable {
            version: self.version.clone(),
            message,
        };

        let rates = [
            ("employee.social_health", self.employee.social_health),
            ("employee.pension", self.employee.pension),
            ("employer.social_health", self.employer.social_health),
            ("employer.labor_risk", self.employer.labor_risk),
            ("employer.pension", self.employer.pension),
            ("employer.vocational_training", self.employer.vocational_training),
        ];
        for (name, rate) in rates {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(invalid(format!("{} rate {} is outside [0, 1]", name, rate)));
            }
        }

        if self.caps.social_health <= Decimal::ZERO || self.caps.pension <= Decimal::ZERO {
            return Err(invalid("contribution caps must be positive".to_string()));
        }

        if self.labor.daily_wage_divisor <= Decimal::ZERO
            || self.labor.days_per_year <= Decimal::ZERO
        {
            return Err(invalid("labor-code constants must be positive".to_string()));
        }

        let severance = &self.labor.severance;
        let day_counts = [
            ("three_to_six_months", severance.three_to_six_months),
            ("six_to_twelve_months", severance.six_to_twelve_months),
            ("one_to_five_years", severance.one_to_five_years),
            ("five_years_or_more", severance.five_years_or_more),
        ];
        for (band, days) in day_counts {
            if days.notice_days < Decimal::ZERO || days.severance_days < Decimal::ZERO {
                return Err(invalid(format!(
                    "labor.severance.{} days must not be negative",
                    band
                )));
            }
        }

        let vacation = &self.labor.vacation;
        if vacation.days_under_five_years < Decimal::ZERO
            || vacation.days_from_five_years < Decimal::ZERO
            || vacation.minimum_months < Decimal::ZERO
        {
            return Err(invalid("labor.vacation values must not be negative".to_string()));
        }

        let first = self
            .income_tax_brackets
            .first()
            .ok_or_else(|| invalid("at least one income tax bracket is required".to_string()))?;
        if !first.from.is_zero() {
            return Err(invalid(format!(
                "first bracket must start at 0, found {}",
                first.from
            )));
        }

        for (index, pair) in self.income_tax_brackets.windows(2).enumerate() {
            let (lower, upper) = (&pair[0], &pair[1]);
            let limit = lower.to.ok_or_else(|| {
                invalid(format!("bracket {} is unbounded but is not the last", index))
            })?;
            if limit < lower.from {
                return Err(invalid(format!(
                    "bracket {} ends at {} before it starts at {}",
                    index, limit, lower.from
                )));
            }
            if upper.from != limit + CENT {
                return Err(invalid(format!(
                    "bracket {} starts at {} but previous bracket ends at {}",
                    index + 1,
                    upper.from,
                    limit
                )));
            }
        }

        for bracket in &self.income_tax_brackets {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(invalid(format!(
                    "bracket rate {} is outside [0, 1]",
                    bracket.rate
                )));
            }
        }

        if self
            .income_tax_brackets
            .last()
            .is_some_and(|last| last.to.is_some())
        {
            return Err(invalid("last bracket must be unbounded".to_string()));
        }

        Ok(())
    }
}

/// The complete jurisdiction configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct JurisdictionConfig {
    metadata: JurisdictionMetadata,
    /// Rate tables by effective date (sorted oldest first).
    rate_tables: Vec<StatutoryRateTable>,
    tenants: HashMap<String, TenantConfig>,
}

impl JurisdictionConfig {
    /// Creates a new JurisdictionConfig from its component parts.
    pub fn new(
        metadata: JurisdictionMetadata,
        rate_tables: Vec<StatutoryRateTable>,
        tenants: HashMap<String, TenantConfig>,
    ) -> Self {
        let mut sorted_tables = rate_tables;
        sorted_tables.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            rate_tables: sorted_tables,
            tenants,
        }
    }

    /// Returns the jurisdiction metadata.
    pub fn jurisdiction(&self) -> &JurisdictionMetadata {
        &self.metadata
    }

    /// Returns all rate tables, oldest first.
    pub fn rate_tables(&self) -> &[StatutoryRateTable] {
        &self.rate_tables
    }

    /// Returns all tenant overrides.
    pub fn tenants(&self) -> &HashMap<String, TenantConfig> {
        &self.tenants
    }
}
