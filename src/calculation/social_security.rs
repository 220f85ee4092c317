//! Social security (TSS) contribution functionality.
//!
//! This module computes the capped contribution bases and the employee and
//! employer contributions to the health (SFS), pension (AFP), labor-risk
//! (SRL) and vocational training (INFOTEP) funds, as per Ley 87-01.

use rust_decimal::Decimal;

use crate::config::StatutoryRateTable;
use crate::models::AuditStep;

const TSS_LEGAL_REF: &str = "Ley 87-01";

/// The salary bases contributions are computed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContributionBases {
    /// Gross salary capped at the health ceiling.
    pub social_health: Decimal,
    /// Gross salary capped at the pension ceiling.
    pub pension: Decimal,
}

/// Caps a gross salary at the table's contribution ceilings.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::contribution_bases;
/// use nomina_engine::config::StatutoryRateTable;
/// use rust_decimal::Decimal;
///
/// let table = StatutoryRateTable::dominican_republic_2024();
/// let bases = contribution_bases(Decimal::from(200_000), &table);
/// assert_eq!(bases.social_health, Decimal::from(175_305));
/// assert_eq!(bases.pension, Decimal::from(200_000));
/// ```
pub fn contribution_bases(gross_salary: Decimal, table: &StatutoryRateTable) -> ContributionBases {
    ContributionBases {
        social_health: gross_salary.min(table.caps.social_health),
        pension: gross_salary.min(table.caps.pension),
    }
}

/// Employee-side contributions at full precision.
#[derive(Debug, Clone)]
pub struct EmployeeContributionsResult {
    /// Health insurance (SFS) deduction.
    pub social_health: Decimal,
    /// Pension (AFP) deduction.
    pub pension: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the social-security deductions withheld from the employee.
pub fn calculate_employee_contributions(
    gross_salary: Decimal,
    table: &StatutoryRateTable,
    step_number: u32,
) -> EmployeeContributionsResult {
    let bases = contribution_bases(gross_salary, table);
    let social_health = bases.social_health * table.employee.social_health;
    let pension = bases.pension * table.employee.pension;

    let audit_step = AuditStep {
        step_number,
        rule_id: "tss_employee".to_string(),
        rule_name: "TSS Employee Contributions".to_string(),
        legal_ref: TSS_LEGAL_REF.to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.to_string(),
            "social_health_cap": table.caps.social_health.to_string(),
            "pension_cap": table.caps.pension.to_string()
        }),
        output: serde_json::json!({
            "social_health_base": bases.social_health.to_string(),
            "pension_base": bases.pension.to_string(),
            "social_health": social_health.normalize().to_string(),
            "pension": pension.normalize().to_string()
        }),
        reasoning: format!(
            "SFS {} x {} = {}; AFP {} x {} = {}",
            bases.social_health,
            table.employee.social_health.normalize(),
            social_health.normalize(),
            bases.pension,
            table.employee.pension.normalize(),
            pension.normalize()
        ),
    };

    EmployeeContributionsResult {
        social_health,
        pension,
        audit_step,
    }
}

/// Employer-side contributions at full precision.
#[derive(Debug, Clone)]
pub struct EmployerContributionsResult {
    /// Health insurance (SFS) contribution.
    pub social_health: Decimal,
    /// Labor-risk (SRL) contribution.
    pub labor_risk: Decimal,
    /// Pension (AFP) contribution.
    pub pension: Decimal,
    /// Vocational training (INFOTEP) contribution.
    pub vocational_training: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the contributions the employer pays on top of gross salary.
///
/// Health and labor-risk use the health base, pension uses the pension
/// base, and vocational training is the one contribution on uncapped gross.
pub fn calculate_employer_contributions(
    gross_salary: Decimal,
    table: &StatutoryRateTable,
    step_number: u32,
) -> EmployerContributionsResult {
    let bases = contribution_bases(gross_salary, table);
    let rates = &table.employer;

    let social_health = bases.social_health * rates.social_health;
    let labor_risk = bases.social_health * rates.labor_risk;
    let pension = bases.pension * rates.pension;
    let vocational_training = gross_salary * rates.vocational_training;

    let audit_step = AuditStep {
        step_number,
        rule_id: "tss_employer".to_string(),
        rule_name: "TSS Employer Contributions".to_string(),
        legal_ref: format!("{}; Ley 116-80", TSS_LEGAL_REF),
        input: serde_json::json!({
            "gross_salary": gross_salary.to_string(),
            "social_health_base": bases.social_health.to_string(),
            "pension_base": bases.pension.to_string(),
            "labor_risk_rate": rates.labor_risk.normalize().to_string()
        }),
        output: serde_json::json!({
            "social_health": social_health.normalize().to_string(),
            "labor_risk": labor_risk.normalize().to_string(),
            "pension": pension.normalize().to_string(),
            "vocational_training": vocational_training.normalize().to_string()
        }),
        reasoning: format!(
            "SFS {} x {}, SRL {} x {}, AFP {} x {}, INFOTEP {} x {} (uncapped)",
            bases.social_health,
            rates.social_health.normalize(),
            bases.social_health,
            rates.labor_risk.normalize(),
            bases.pension,
            rates.pension.normalize(),
            gross_salary,
            rates.vocational_training.normalize()
        ),
    };

    EmployerContributionsResult {
        social_health,
        labor_risk,
        pension,
        vocational_training,
        audit_step,
    }
}
