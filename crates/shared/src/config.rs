//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Remote API configuration.
    #[serde(default)]
    pub api: ApiConfig,
    /// Billing configuration.
    #[serde(default)]
    pub billing: BillingConfig,
}

/// Remote API configuration.
///
/// The core crate performs no I/O itself; this section configures the
/// HTTP layer that fetches users, pricing rows, and balances.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the TaskFleet REST API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Billing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    /// How pricing lookups behave when no active row matches.
    #[serde(default)]
    pub missing_price_policy: MissingPricePolicy,
    /// Employee monthly fee charged when a company has no active pricing plan.
    #[serde(default = "default_employee_monthly_fee")]
    pub default_employee_monthly_fee: Decimal,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            missing_price_policy: MissingPricePolicy::default(),
            default_employee_monthly_fee: default_employee_monthly_fee(),
        }
    }
}

/// The documented business default: 300.00 per employee seat per cycle.
fn default_employee_monthly_fee() -> Decimal {
    Decimal::new(300_00, 2)
}

/// Behavior when a (company, platform, operation) pricing lookup has no
/// active row.
///
/// The historical system was inconsistent here, so the choice is an
/// explicit configuration knob rather than a hidden fallback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPricePolicy {
    /// Fail the lookup with a not-found error.
    #[default]
    Reject,
    /// Fall back to the platform-wide default price table; error if that
    /// also has no matching row.
    PlatformDefault,
    /// Treat the operation as free.
    Zero,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TASKFLEET").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
