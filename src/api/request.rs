//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structures for the `/payroll`
//! endpoints. Employees are carried as [`Employee`] records; the requests
//! add the period, tenant and termination details around them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Employee;

/// Request body for the `/payroll/monthly` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyPayrollRequest {
    /// The employee to pay.
    pub employee: Employee,
    /// Any date within the month being paid; selects the rate table.
    pub period: NaiveDate,
    /// Tenant whose overrides apply.
    #[serde(default)]
    pub tenant_id: Option<String>,
}

/// Request body for the `/payroll/severance` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeveranceRequest {
    /// The terminated employee.
    pub employee: Employee,
    /// Last day of employment; also selects the rate table.
    pub termination_date: NaiveDate,
    /// Termination cause (`desahucio`, `despido`, `dimision`, `fin_contrato`).
    ///
    /// Kept as text so unknown causes are reported as invalid input.
    pub cause: String,
    /// Tenant whose overrides apply.
    #[serde(default)]
    pub tenant_id: Option<String>,
}

/// Request body for the `/payroll/run` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRunRequest {
    /// Any date within the month being paid; selects the rate table.
    pub period: NaiveDate,
    /// Tenant whose overrides apply.
    #[serde(default)]
    pub tenant_id: Option<String>,
    /// All employees of the tenant, active or not.
    pub employees: Vec<Employee>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_deserialize_severance_request() {
        let json = r#"{
            "employee": {
                "id": "emp_001",
                "full_name": "Ana Pérez",
                "national_id": "001-0000000-1",
                "hire_date": "2019-01-01",
                "monthly_salary": "50000.00"
            },
            "termination_date": "2024-06-15",
            "cause": "desahucio"
        }"#;

        let request: SeveranceRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.cause, "desahucio");
        assert!(request.tenant_id.is_none());
        assert!(request.employee.is_active);

        assert_eq!(request.employee.monthly_salary, Decimal::new(5_000_000, 2));
        assert!(request.employee.job_title.is_none());
    }

    #[test]
    fn test_deserialize_payroll_run_request() {
        let json = r#"{
            "period": "2024-06-30",
            "tenant_id": "constructora_del_este",
            "employees": []
        }"#;

        let request: PayrollRunRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.tenant_id.as_deref(), Some("constructora_del_este"));
        assert!(request.employees.is_empty());
    }
}
