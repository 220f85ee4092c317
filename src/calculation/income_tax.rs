//! Income tax (ISR) withholding functionality.
//!
//! Monthly salary net of TSS deductions is annualized, the annual tax is
//! taken from the progressive scale and one twelfth is withheld each month.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{StatutoryRateTable, TaxBracket};
use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

const ISR_LEGAL_REF: &str = "Ley 11-92 art. 296";
const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Finds the bracket an annual income falls in.
///
/// Brackets are searched in ascending order of their upper limit and the
/// first bracket whose limit is at or above the income wins, so an income
/// exactly at a limit belongs to the lower bracket. Returns `None` only for
/// tables without an unbounded last bracket.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::find_bracket;
/// use nomina_engine::config::StatutoryRateTable;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let table = StatutoryRateTable::dominican_republic_2024();
/// let brackets = &table.income_tax_brackets;
///
/// let (index, _) = find_bracket(Decimal::from_str("416220.00").unwrap(), brackets).unwrap();
/// assert_eq!(index, 0);
///
/// let (index, _) = find_bracket(Decimal::from_str("416220.01").unwrap(), brackets).unwrap();
/// assert_eq!(index, 1);
/// ```
pub fn find_bracket(
    annual_income: Decimal,
    brackets: &[TaxBracket],
) -> Option<(usize, &TaxBracket)> {
    let index = brackets.partition_point(|bracket| !bracket.covers(annual_income));
    brackets.get(index).map(|bracket| (index, bracket))
}

/// Calculates the annual income tax due on an annual taxable income.
///
/// Returns the index of the bracket used and the tax at full precision.
/// Income in the first bracket owes nothing.
pub fn calculate_annual_income_tax(
    annual_income: Decimal,
    table: &StatutoryRateTable,
) -> EngineResult<(usize, Decimal)> {
    let (index, bracket) =
        find_bracket(annual_income, &table.income_tax_brackets).ok_or_else(|| {
            EngineError::InvalidRateTable {
                version: table.version.clone(),
                message: format!("no income tax bracket covers {}", annual_income),
            }
        })?;

    if index == 0 {
        return Ok((index, Decimal::ZERO));
    }

    let tax = (annual_income - bracket.excess_base()) * bracket.rate + bracket.fixed_amount;
    Ok((index, tax))
}

/// The result of an income tax withholding calculation.
#[derive(Debug, Clone)]
pub struct IncomeTaxResult {
    /// Annualized income after TSS deductions.
    pub annual_taxable_income: Decimal,
    /// Index of the bracket the income fell in.
    pub bracket_index: usize,
    /// Tax due for the year, full precision.
    pub annual_tax: Decimal,
    /// One twelfth of the annual tax, full precision.
    pub monthly_withholding: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the monthly ISR withholding for a gross monthly salary.
///
/// Only the employee's TSS deductions reduce the taxable base.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::calculate_income_tax;
/// use nomina_engine::config::StatutoryRateTable;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let table = StatutoryRateTable::dominican_republic_2024();
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
///
/// let result = calculate_income_tax(dec("50000"), dec("1520"), dec("1435"), &table, 2).unwrap();
/// assert_eq!(result.annual_taxable_income, dec("564540"));
/// assert_eq!(result.monthly_withholding, dec("1854"));
/// ```
pub fn calculate_income_tax(
    gross_salary: Decimal,
    employee_social_health: Decimal,
    employee_pension: Decimal,
    table: &StatutoryRateTable,
    step_number: u32,
) -> EngineResult<IncomeTaxResult> {
    let annual_taxable_income =
        (gross_salary - employee_social_health - employee_pension) * MONTHS_PER_YEAR;
    let (bracket_index, annual_tax) = calculate_annual_income_tax(annual_taxable_income, table)?;
    let monthly_withholding = annual_tax / MONTHS_PER_YEAR;

    debug!(
        annual_taxable_income = %annual_taxable_income,
        bracket_index,
        annual_tax = %annual_tax,
        "Income tax bracket resolved"
    );

    let bracket = &table.income_tax_brackets[bracket_index];
    let reasoning = if bracket_index == 0 {
        format!(
            "Annual taxable income {} is within the exempt bracket (up to {})",
            annual_taxable_income.normalize(),
            bracket.to.map_or_else(|| "unbounded".to_string(), |to| to.to_string())
        )
    } else {
        format!(
            "({} - {}) x {} + {} = {} per year, {} per month",
            annual_taxable_income.normalize(),
            bracket.excess_base(),
            bracket.rate.normalize(),
            bracket.fixed_amount,
            annual_tax.normalize(),
            monthly_withholding.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "isr_withholding".to_string(),
        rule_name: "ISR Withholding".to_string(),
        legal_ref: ISR_LEGAL_REF.to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.to_string(),
            "employee_social_health": employee_social_health.normalize().to_string(),
            "employee_pension": employee_pension.normalize().to_string()
        }),
        output: serde_json::json!({
            "annual_taxable_income": annual_taxable_income.normalize().to_string(),
            "bracket_index": bracket_index,
            "annual_tax": annual_tax.normalize().to_string(),
            "monthly_withholding": monthly_withholding.normalize().to_string()
        }),
        reasoning,
    };

    Ok(IncomeTaxResult {
        annual_taxable_income,
        bracket_index,
        annual_tax,
        monthly_withholding,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn table() -> StatutoryRateTable {
        StatutoryRateTable::dominican_republic_2024()
    }

    fn annual_tax(income: &str) -> (usize, Decimal) {
        calculate_annual_income_tax(dec(income), &table()).unwrap()
    }

    #[test]
    fn test_zero_tax_at_exempt_limit() {
        assert_eq!(annual_tax("416220.00"), (0, Decimal::ZERO));
    }

    #[test]
    fn test_positive_tax_one_cent_above_exempt_limit() {
        let (index, tax) = annual_tax("416220.01");
        assert_eq!(index, 1);
        assert!(tax > Decimal::ZERO);
        assert_eq!(tax, dec("0.0015"));
    }

    #[test]
    fn test_second_bracket_limit_stays_in_second_bracket() {
        let (index, tax) = annual_tax("624329.00");
        assert_eq!(index, 1);
        assert_eq!(tax, dec("31216.35"));
    }

    #[test]
    fn test_third_bracket_adds_fixed_amount() {
        let (index, tax) = annual_tax("700000.00");
        assert_eq!(index, 2);
        // (700000 - 624329) x 0.20 + 31216
        assert_eq!(tax, dec("46350.20"));
    }

    #[test]
    fn test_top_bracket_is_unbounded() {
        let (index, tax) = annual_tax("2000000.00");
        assert_eq!(index, 3);
        // (2000000 - 867123) x 0.25 + 79776
        assert_eq!(tax, dec("362995.25"));
    }

    #[test]
    fn test_negative_income_owes_nothing() {
        assert_eq!(annual_tax("-100"), (0, Decimal::ZERO));
    }

    #[test]
    fn test_find_bracket_boundaries() {
        let table = table();
        let brackets = &table.income_tax_brackets;
        let index_of = |s: &str| find_bracket(dec(s), brackets).unwrap().0;

        assert_eq!(index_of("0"), 0);
        assert_eq!(index_of("624329.00"), 1);
        assert_eq!(index_of("624329.01"), 2);
        assert_eq!(index_of("867123.00"), 2);
        assert_eq!(index_of("867123.01"), 3);
    }

    #[test]
    fn test_find_bracket_without_unbounded_bracket() {
        let mut table = table();
        table.income_tax_brackets[3].to = Some(dec("1000000"));
        assert!(find_bracket(dec("1000000.01"), &table.income_tax_brackets).is_none());
        assert!(matches!(
            calculate_annual_income_tax(dec("1000000.01"), &table),
            Err(EngineError::InvalidRateTable { .. })
        ));
    }

    #[test]
    fn test_monthly_withholding_for_50000() {
        let result =
            calculate_income_tax(dec("50000"), dec("1520"), dec("1435"), &table(), 2).unwrap();
        assert_eq!(result.annual_taxable_income, dec("564540"));
        assert_eq!(result.bracket_index, 1);
        assert_eq!(result.annual_tax, dec("22248"));
        assert_eq!(result.monthly_withholding, dec("1854"));
        assert_eq!(result.audit_step.rule_id, "isr_withholding");
        assert_eq!(result.audit_step.output["bracket_index"], 1);
    }

    #[test]
    fn test_exempt_salary_withholds_nothing() {
        let result =
            calculate_income_tax(dec("25000"), dec("760"), dec("717.5"), &table(), 2).unwrap();
        assert_eq!(result.monthly_withholding, Decimal::ZERO);
        assert!(result.audit_step.reasoning.contains("exempt"));
    }

    #[test]
    fn test_withholding_keeps_full_precision() {
        // 80000 gross: annual taxable 903264, top bracket
        let result = calculate_income_tax(
            dec("80000"),
            dec("2432"),
            dec("2296"),
            &table(),
            2,
        )
        .unwrap();
        assert_eq!(result.bracket_index, 3);
        assert_eq!(result.annual_tax, dec("88811.25"));
        assert_eq!(result.monthly_withholding, dec("7400.9375"));
    }
}
