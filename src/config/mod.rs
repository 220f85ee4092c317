//! Configuration loading and management for the payroll engine.
//!
//! This module provides the statutory rate tables (contribution rates,
//! caps, income tax brackets, labor-code constants) and a loader that reads
//! them from YAML files together with per-tenant overrides.
//!
//! # Example
//!
//! ```no_run
//! use nomina_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/do").unwrap();
//! println!("Loaded jurisdiction: {}", config.jurisdiction().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BandEntitlement, CENT, ContributionCaps, EmployeeRates, EmployerRates, JurisdictionConfig,
    JurisdictionMetadata, LaborCodeConstants, SeveranceEntitlements, StatutoryRateTable,
    TaxBracket, TenantConfig, TenantsConfig, VacationEntitlement,
};
