//! Application configuration management.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Vault seed configuration.
    #[serde(default)]
    pub vault: VaultConfig,
}

/// Seed configuration for the cash vault.
///
/// Lists every currency partition with its full denomination set and initial
/// note counts. The denomination sets are fixed for the lifetime of the
/// process; only counts change at runtime.
#[derive(Debug, Clone, Deserialize)]
pub struct VaultConfig {
    /// Configured currency partitions.
    #[serde(default = "default_currencies")]
    pub currencies: Vec<CurrencySeed>,
}

/// Seed for one currency partition.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencySeed {
    /// The currency this partition holds.
    pub currency: Currency,
    /// Denomination buckets for this partition.
    pub denominations: Vec<DenominationSeed>,
}

/// Seed for one denomination bucket.
#[derive(Debug, Clone, Deserialize)]
pub struct DenominationSeed {
    /// Note face value in whole currency units.
    pub face_value: u64,
    /// Initial number of notes available.
    #[serde(default)]
    pub count: u64,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            currencies: default_currencies(),
        }
    }
}

fn seed(currency: Currency, denominations: &[(u64, u64)]) -> CurrencySeed {
    CurrencySeed {
        currency,
        denominations: denominations
            .iter()
            .map(|&(face_value, count)| DenominationSeed { face_value, count })
            .collect(),
    }
}

fn default_currencies() -> Vec<CurrencySeed> {
    vec![
        seed(
            Currency::Rub,
            &[
                (5, 0),
                (10, 0),
                (50, 1),
                (100, 3),
                (200, 0),
                (500, 0),
                (1000, 0),
                (2000, 0),
                (5000, 0),
            ],
        ),
        seed(
            Currency::Eur,
            &[(5, 0), (10, 0), (20, 0), (50, 0), (100, 0), (200, 0), (500, 0)],
        ),
        seed(
            Currency::Usd,
            &[(1, 0), (2, 0), (5, 0), (10, 0), (50, 0), (100, 3)],
        ),
    ]
}

impl VaultConfig {
    /// Validates the seed before the inventory is built from it.
    ///
    /// Rejects duplicate currency partitions, duplicate face values within a
    /// partition, and zero face values.
    ///
    /// # Errors
    ///
    /// Returns a `config::ConfigError` describing the first offending entry.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        let mut currencies = BTreeSet::new();
        for partition in &self.currencies {
            if !currencies.insert(partition.currency) {
                return Err(config::ConfigError::Message(format!(
                    "duplicate currency partition: {}",
                    partition.currency
                )));
            }
            let mut face_values = BTreeSet::new();
            for denomination in &partition.denominations {
                if denomination.face_value == 0 {
                    return Err(config::ConfigError::Message(format!(
                        "zero face value in {} partition",
                        partition.currency
                    )));
                }
                if !face_values.insert(denomination.face_value) {
                    return Err(config::ConfigError::Message(format!(
                        "duplicate face value {} in {} partition",
                        denomination.face_value, partition.currency
                    )));
                }
            }
        }
        Ok(())
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources are layered: `config/default`, then `config/{RUN_MODE}`, then
    /// `TELLER`-prefixed environment variables. A `.env` file is honored if
    /// present.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or the vault seed
    /// is invalid.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TELLER").separator("__"))
            .build()?;

        let app: Self = config.try_deserialize()?;
        app.vault.validate()?;
        Ok(app)
    }
}
