//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading statutory
//! rate tables and tenant overrides from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{
    JurisdictionConfig, JurisdictionMetadata, StatutoryRateTable, TenantConfig, TenantsConfig,
};

/// Loads and provides access to jurisdiction configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// validates every rate table and answers "which table applies on this
/// date, for this tenant".
///
/// # Directory Structure
///
/// ```text
/// config/do/
/// ├── jurisdiction.yaml   # Jurisdiction metadata
/// ├── tenants.yaml        # Optional per-tenant overrides
/// └── rates/
///     └── 2024-01-01.yaml # Rate table effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use nomina_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/do").unwrap();
/// let date = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
/// let table = loader.rate_table_for(date).unwrap();
/// println!("Rate table: {}", table.version);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: JurisdictionConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `jurisdiction.yaml` or the `rates` directory is
    /// missing, if any file contains invalid YAML, or if any rate table
    /// fails [`StatutoryRateTable::validate`]. `tenants.yaml` is optional.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<JurisdictionMetadata>(&path.join("jurisdiction.yaml"))?;

        let tenants_path = path.join("tenants.yaml");
        let tenants = if tenants_path.exists() {
            Self::load_yaml::<TenantsConfig>(&tenants_path)?
        } else {
            TenantsConfig::default()
        };

        let rate_tables = Self::load_rate_tables(&path.join("rates"))?;

        info!(
            jurisdiction = %metadata.code,
            rate_tables = rate_tables.len(),
            tenants = tenants.tenants.len(),
            "Loaded statutory configuration"
        );

        Ok(Self {
            config: JurisdictionConfig::new(metadata, rate_tables, tenants.tenants),
        })
    }

    /// Builds a loader from tables constructed in code.
    pub fn from_parts(
        metadata: JurisdictionMetadata,
        rate_tables: Vec<StatutoryRateTable>,
        tenants: TenantsConfig,
    ) -> EngineResult<Self> {
        for table in &rate_tables {
            table.validate()?;
        }
        Ok(Self {
            config: JurisdictionConfig::new(metadata, rate_tables, tenants.tenants),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads and validates all rate tables from the rates directory.
    fn load_rate_tables(rates_dir: &Path) -> EngineResult<Vec<StatutoryRateTable>> {
        let rates_dir_str = rates_dir.display().to_string();

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut tables = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let table = Self::load_yaml::<StatutoryRateTable>(&path)?;
                table.validate()?;
                tables.push(table);
            }
        }

        if tables.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(tables)
    }

    /// Returns the underlying jurisdiction configuration.
    pub fn config(&self) -> &JurisdictionConfig {
        &self.config
    }

    /// Returns the jurisdiction metadata.
    pub fn jurisdiction(&self) -> &JurisdictionMetadata {
        self.config.jurisdiction()
    }

    /// Gets the rate table in effect on a given date.
    ///
    /// The most recent table whose effective date is on or before `date`
    /// wins, so payroll for a past period is computed with that period's law.
    pub fn rate_table_for(&self, date: NaiveDate) -> EngineResult<&StatutoryRateTable> {
        self.config
            .rate_tables()
            .iter()
            .rfind(|table| table.effective_date <= date)
            .ok_or(EngineError::RateTableNotFound { date })
    }

    /// Gets a tenant's overrides.
    pub fn tenant(&self, tenant_id: &str) -> EngineResult<&TenantConfig> {
        self.config
            .tenants()
            .get(tenant_id)
            .ok_or_else(|| {
                EngineError::invalid_input("tenant_id", format!("unknown tenant '{}'", tenant_id))
            })
    }

    /// Gets the rate table in effect on `date` with the tenant's labor-risk
    /// rate applied.
    ///
    /// Without a tenant, or for a tenant without an override, the table's
    /// average labor-risk rate is kept.
    pub fn rate_table_for_tenant(
        &self,
        tenant_id: Option<&str>,
        date: NaiveDate,
    ) -> EngineResult<StatutoryRateTable> {
        let table = self.rate_table_for(date)?;

        let Some(tenant_id) = tenant_id else {
            return Ok(table.clone());
        };

        match self.tenant(tenant_id)?.labor_risk_rate {
            Some(rate) => {
                let adjusted = table.with_labor_risk_rate(rate);
                adjusted.validate()?;
                Ok(adjusted)
            }
            None => Ok(table.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/do"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.jurisdiction().code, "DO");
        assert_eq!(loader.jurisdiction().currency, "DOP");
    }

    #[test]
    fn test_loaded_table_matches_builtin_table() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let table = loader.rate_table_for(date(2024, 6, 30)).unwrap();

        assert_eq!(table, &StatutoryRateTable::dominican_republic_2024());
    }

    #[test]
    fn test_rate_table_not_found_before_first_effective_date() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        match loader.rate_table_for(date(2020, 1, 1)) {
            Err(EngineError::RateTableNotFound { date: d }) => assert_eq!(d, date(2020, 1, 1)),
            other => panic!("Expected RateTableNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_rate_table_for_picks_most_recent_effective_table() {
        let current = StatutoryRateTable::dominican_republic_2024();
        let mut previous = current.clone();
        previous.version = "DO-2023".to_string();
        previous.effective_date = date(2023, 1, 1);
        previous.caps.social_health = dec("150000.00");

        let loader = ConfigLoader::from_parts(
            ConfigLoader::load(config_path()).unwrap().jurisdiction().clone(),
            vec![current, previous],
            TenantsConfig::default(),
        )
        .unwrap();

        assert_eq!(loader.rate_table_for(date(2023, 12, 31)).unwrap().version, "DO-2023");
        assert_eq!(loader.rate_table_for(date(2024, 1, 1)).unwrap().version, "DO-2024");
        assert_eq!(loader.rate_table_for(date(2030, 5, 1)).unwrap().version, "DO-2024");
    }

    #[test]
    fn test_tenant_override_applies_labor_risk_rate() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let table = loader
            .rate_table_for_tenant(Some("constructora_del_este"), date(2024, 6, 30))
            .unwrap();
        assert_eq!(table.employer.labor_risk, dec("0.016"));
    }

    #[test]
    fn test_tenant_without_override_keeps_average_rate() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let table = loader
            .rate_table_for_tenant(Some("consultores_santo_domingo"), date(2024, 6, 30))
            .unwrap();
        assert_eq!(table.employer.labor_risk, dec("0.012"));
    }

    #[test]
    fn test_no_tenant_keeps_average_rate() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let table = loader.rate_table_for_tenant(None, date(2024, 6, 30)).unwrap();
        assert_eq!(table.employer.labor_risk, dec("0.012"));
    }

    #[test]
    fn test_unknown_tenant_is_invalid_input() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        match loader.rate_table_for_tenant(Some("nobody"), date(2024, 6, 30)) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "tenant_id"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        match ConfigLoader::load("/nonexistent/path") {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("jurisdiction.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_parts_rejects_invalid_table() {
        let mut table = StatutoryRateTable::dominican_republic_2024();
        table.income_tax_brackets.pop();

        let result = ConfigLoader::from_parts(
            ConfigLoader::load(config_path()).unwrap().jurisdiction().clone(),
            vec![table],
            TenantsConfig::default(),
        );
        assert!(matches!(result, Err(EngineError::InvalidRateTable { .. })));
    }
}
