//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Default maximum number of entries allowed under one group key.
pub const DEFAULT_MAX_ENTRIES: usize = 950;

/// Default absolute tolerance between debit and credit totals of a group.
pub const DEFAULT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Batch validation defaults.
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Batch validation defaults.
///
/// Callers may still override any of these per validation run.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationConfig {
    /// Maximum entries sharing one group key.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    /// Absolute debit/credit tolerance per group.
    #[serde(default = "default_tolerance")]
    pub tolerance: Decimal,
    /// Whether the entry-limit check runs.
    #[serde(default = "default_enabled")]
    pub check_entry_limit: bool,
    /// Whether the balance check runs.
    #[serde(default = "default_enabled")]
    pub check_balance: bool,
    /// Whether the date-consistency check runs.
    #[serde(default = "default_enabled")]
    pub check_date_consistency: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            tolerance: default_tolerance(),
            check_entry_limit: true,
            check_balance: true,
            check_date_consistency: true,
        }
    }
}

fn default_max_entries() -> usize {
    DEFAULT_MAX_ENTRIES
}

fn default_tolerance() -> Decimal {
    DEFAULT_TOLERANCE
}

fn default_enabled() -> bool {
    true
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

fn default_filter() -> String {
    "ledgerline=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `LEDGERLINE_*` environment variables with `__` separating
    /// nested keys (e.g. `LEDGERLINE_VALIDATION__MAX_ENTRIES`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("LEDGERLINE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        config.try_deserialize()
    }
}
