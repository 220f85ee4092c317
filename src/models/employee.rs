//! Employee model and related types.
//!
//! This module defines the Employee struct and the TerminationCause enum
//! consumed by the payroll and severance calculators.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};

/// Why an employment relationship ended.
///
/// Serialized with the labor-code names used on payroll documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminationCause {
    /// Employer ends the contract without cause, with notice (desahucio).
    #[serde(rename = "desahucio")]
    EmployerNoticeTermination,
    /// Employer dismisses the employee for just cause (despido).
    #[serde(rename = "despido")]
    JustCauseDismissal,
    /// Employee ends the contract (dimisión).
    #[serde(rename = "dimision", alias = "dimisión")]
    EmployeeResignation,
    /// Fixed-term contract reached its end (fin de contrato).
    #[serde(rename = "fin_contrato")]
    ContractExpiration,
}

impl TerminationCause {
    /// Returns true if the cause owes notice pay (preaviso) and severance
    /// pay (cesantía). Only employer-initiated termination without cause does.
    pub fn owes_notice_and_severance(self) -> bool {
        self == TerminationCause::EmployerNoticeTermination
    }

    /// The labor-code name of the cause.
    pub fn as_str(self) -> &'static str {
        match self {
            TerminationCause::EmployerNoticeTermination => "desahucio",
            TerminationCause::JustCauseDismissal => "despido",
            TerminationCause::EmployeeResignation => "dimision",
            TerminationCause::ContractExpiration => "fin_contrato",
        }
    }
}

impl fmt::Display for TerminationCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TerminationCause {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "desahucio" => Ok(TerminationCause::EmployerNoticeTermination),
            "despido" => Ok(TerminationCause::JustCauseDismissal),
            "dimision" | "dimisión" => Ok(TerminationCause::EmployeeResignation),
            "fin_contrato" | "fin de contrato" => Ok(TerminationCause::ContractExpiration),
            other => Err(EngineError::invalid_input(
                "cause",
                format!("unrecognized termination cause '{}'", other),
            )),
        }
    }
}

fn default_active() -> bool {
    true
}

/// Largest monthly salary accepted: 1,000,000,000,000.00.
///
/// Keeps every product and sum the calculators form, including payroll-run
/// totals, well inside the range of [`Decimal`].
pub const MAX_MONTHLY_SALARY: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Represents an employee on the payroll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's full name.
    pub full_name: String,
    /// National identity document number (cédula).
    pub national_id: String,
    /// The date the employee was hired.
    pub hire_date: NaiveDate,
    /// Gross monthly salary.
    pub monthly_salary: Decimal,
    /// Whether the employee is currently on the payroll.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// The employee's job title.
    #[serde(default)]
    pub job_title: Option<String>,
}

impl Employee {
    /// Checks the employee record against the calculators' contract.
    ///
    /// The salary must lie in `[0, MAX_MONTHLY_SALARY]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use nomina_engine::models::Employee;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     full_name: "Ana Pérez".to_string(),
    ///     national_id: "001-0000000-1".to_string(),
    ///     hire_date: NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
    ///     monthly_salary: Decimal::new(-1, 0),
    ///     is_active: true,
    ///     job_title: None,
    /// };
    /// assert!(employee.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        if self.monthly_salary < Decimal::ZERO {
            return Err(EngineError::invalid_input(
                "monthly_salary",
                format!(
                    "salary {} for employee '{}' must not be negative",
                    self.monthly_salary, self.id
                ),
            ));
        }
        if self.monthly_salary > MAX_MONTHLY_SALARY {
            return Err(EngineError::invalid_input(
                "monthly_salary",
                format!(
                    "salary {} for employee '{}' exceeds the maximum of {}",
                    self.monthly_salary, self.id, MAX_MONTHLY_SALARY
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_employee(salary: Decimal) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            full_name: "Ana Pérez".to_string(),
            national_id: "001-0000000-1".to_string(),
            hire_date: NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
            monthly_salary: salary,
            is_active: true,
            job_title: Some("Contadora".to_string()),
        }
    }

    #[test]
    fn test_deserialize_employee_with_defaults() {
        let json = r#"{
            "id": "emp_001",
            "full_name": "Ana Pérez",
            "national_id": "001-0000000-1",
            "hire_date": "2019-01-01",
            "monthly_salary": "50000.00"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "emp_001");
        assert_eq!(
            employee.hire_date,
            NaiveDate::from_ymd_opt(2019, 1, 1).unwrap()
        );
        assert_eq!(employee.monthly_salary, Decimal::new(5_000_000, 2));
        assert!(employee.is_active);
        assert!(employee.job_title.is_none());
    }

    #[test]
    fn test_serialize_employee_round_trip() {
        let employee = create_test_employee(Decimal::new(4_500_050, 2));
        let json = serde_json::to_string(&employee).unwrap();
        let deserialized: Employee = serde_json::from_str(&json).unwrap();
        assert_eq!(employee, deserialized);
    }

    #[test]
    fn test_negative_salary_is_invalid() {
        let employee = create_test_employee(Decimal::new(-100, 2));
        match employee.validate() {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "monthly_salary");
                assert!(message.contains("emp_001"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_salary_is_valid() {
        assert!(create_test_employee(Decimal::ZERO).validate().is_ok());
    }

    #[test]
    fn test_salary_at_maximum_is_valid() {
        assert!(create_test_employee(MAX_MONTHLY_SALARY).validate().is_ok());
        assert_eq!(MAX_MONTHLY_SALARY, Decimal::new(1_000_000_000_000, 0));
    }

    #[test]
    fn test_salary_above_maximum_is_invalid() {
        for salary in [MAX_MONTHLY_SALARY + Decimal::new(1, 2), Decimal::MAX] {
            match create_test_employee(salary).validate() {
                Err(EngineError::InvalidInput { field, message }) => {
                    assert_eq!(field, "monthly_salary");
                    assert!(message.contains("exceeds the maximum"));
                }
                other => panic!("Expected InvalidInput, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_termination_cause_wire_names() {
        assert_eq!(
            serde_json::to_string(&TerminationCause::EmployerNoticeTermination).unwrap(),
            "\"desahucio\""
        );
        assert_eq!(
            serde_json::to_string(&TerminationCause::JustCauseDismissal).unwrap(),
            "\"despido\""
        );
        assert_eq!(
            serde_json::to_string(&TerminationCause::EmployeeResignation).unwrap(),
            "\"dimision\""
        );
        assert_eq!(
            serde_json::to_string(&TerminationCause::ContractExpiration).unwrap(),
            "\"fin_contrato\""
        );
    }

    #[test]
    fn test_termination_cause_accepts_accented_alias() {
        let cause: TerminationCause = serde_json::from_str("\"dimisión\"").unwrap();
        assert_eq!(cause, TerminationCause::EmployeeResignation);
    }

    #[test]
    fn test_termination_cause_from_str() {
        assert_eq!(
            "Desahucio".parse::<TerminationCause>().unwrap(),
            TerminationCause::EmployerNoticeTermination
        );
        assert_eq!(
            "fin de contrato".parse::<TerminationCause>().unwrap(),
            TerminationCause::ContractExpiration
        );
        assert_eq!(
            TerminationCause::EmployeeResignation
                .to_string()
                .parse::<TerminationCause>()
                .unwrap(),
            TerminationCause::EmployeeResignation
        );
    }

    #[test]
    fn test_unrecognized_termination_cause_is_invalid_input() {
        match "jubilacion".parse::<TerminationCause>() {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "cause");
                assert!(message.contains("jubilacion"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_only_desahucio_owes_notice_and_severance() {
        assert!(TerminationCause::EmployerNoticeTermination.owes_notice_and_severance());
        assert!(!TerminationCause::JustCauseDismissal.owes_notice_and_severance());
        assert!(!TerminationCause::EmployeeResignation.owes_notice_and_severance());
        assert!(!TerminationCause::ContractExpiration.owes_notice_and_severance());
    }
}
