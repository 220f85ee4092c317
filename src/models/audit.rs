//! Audit trail entries recorded by the calculators.

use serde::{Deserialize, Serialize};

/// A single step in the audit trail recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule
/// application, with a reference to the legal provision behind the rule.
///
/// # Example
///
/// ```
/// use nomina_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "tss_employee".to_string(),
///     rule_name: "TSS Employee Contributions".to_string(),
///     legal_ref: "Ley 87-01".to_string(),
///     input: serde_json::json!({"gross_salary": "50000.00"}),
///     output: serde_json::json!({"social_health": "1520.00"}),
///     reasoning: "SFS 50000.00 x 0.0304 = 1520.00".to_string(),
/// };
/// assert_eq!(step.rule_id, "tss_employee");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the law or article behind this rule.
    pub legal_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}
