//! Application configuration management.

use serde::Deserialize;

use crate::types::TenantId;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Tenant bootstrap configuration.
    #[serde(default)]
    pub tenant: TenantConfig,
    /// Posting rule configuration.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Logging configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Tenant bootstrap configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TenantConfig {
    /// Tenant to operate on; a fixed demo tenant is used when unset.
    #[serde(default)]
    pub id: Option<TenantId>,
    /// Display name of the company workspace.
    #[serde(default = "default_company_name")]
    pub company_name: String,
    /// Whether to seed the default chart of accounts when the tenant has none.
    #[serde(default = "default_true")]
    pub seed_default_chart: bool,
}

impl Default for TenantConfig {
    fn default() -> Self {
        Self {
            id: None,
            company_name: default_company_name(),
            seed_default_chart: true,
        }
    }
}

fn default_company_name() -> String {
    "Mizan Demo".to_string()
}

const fn default_true() -> bool {
    true
}

/// Which account a receipt voucher credits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptCreditTarget {
    /// Credit the customers (receivables) account.
    #[default]
    Receivables,
    /// Credit operating revenue directly.
    Revenue,
}

/// Posting rule configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LedgerConfig {
    /// Allow more than one depreciation run per asset per calendar year.
    #[serde(default)]
    pub allow_repeat_depreciation: bool,
    /// Credit side of the receipt voucher entry.
    #[serde(default)]
    pub receipt_credit_target: ReceiptCreditTarget,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

fn default_filter() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, lowest precedence first: `config/default`, `config/{RUN_MODE}`,
    /// then `MIZAN__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("MIZAN").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Parses configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed.
    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
