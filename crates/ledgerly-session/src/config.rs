//! # Session Configuration
//!
//! Defaults applied when a document screen opens, plus currency display.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     LEDGERLY_AUTO_ROUND_OFF=false                                      │
//! │     LEDGERLY_DISCOUNT_TYPE=fixed                                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/ledgerly/ledgerly.toml (Linux)                           │
//! │     ~/Library/Application Support/com.ledgerly.ledgerly/... (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     round-off on, percentage discount, "None" tax, ₹ with 2 decimals   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [defaults]
//! auto_round_off = true
//! discount_type = "percentage"   # percentage | fixed
//! tax = "GST @ 18%"              # pre-selected tax for new lines
//!
//! [currency]
//! symbol = "₹"
//! decimals = 2
//!
//! [fields.quotation]              # which line inputs a screen uses
//! discount = false
//! tax = true
//! ```

use ledgerly_core::{DiscountType, DocumentKind, LineFields, TaxDescriptor};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{SessionError, SessionResult};

/// Highest number of decimals `format_currency` will render.
pub const MAX_CURRENCY_DECIMALS: u8 = 4;

// =============================================================================
// Sections
// =============================================================================

/// Starting values for a new document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentDefaults {
    #[serde(default = "default_true")]
    pub auto_round_off: bool,

    #[serde(default)]
    pub discount_type: DiscountType,

    /// Tax label pre-selected on new lines.
    #[serde(default = "default_tax")]
    pub tax: String,
}

fn default_true() -> bool {
    true
}

fn default_tax() -> String {
    TaxDescriptor::None.as_str().to_string()
}

impl Default for DocumentDefaults {
    fn default() -> Self {
        DocumentDefaults {
            auto_round_off: true,
            discount_type: DiscountType::Percentage,
            tax: default_tax(),
        }
    }
}

/// How amounts are rendered for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencySettings {
    #[serde(default = "default_symbol")]
    pub symbol: String,

    #[serde(default = "default_decimals")]
    pub decimals: u8,
}

fn default_symbol() -> String {
    "₹".to_string()
}

fn default_decimals() -> u8 {
    2
}

impl Default for CurrencySettings {
    fn default() -> Self {
        CurrencySettings {
            symbol: default_symbol(),
            decimals: default_decimals(),
        }
    }
}

impl CurrencySettings {
    /// Formats an amount with the configured symbol and precision.
    ///
    /// ## Example
    /// ```rust
    /// use ledgerly_session::config::CurrencySettings;
    ///
    /// let currency = CurrencySettings::default();
    /// assert_eq!(currency.format(1234.5), "₹1234.50");
    /// assert_eq!(currency.format(-400.0), "-₹400.00");
    /// ```
    pub fn format(&self, amount: f64) -> String {
        let decimals = self.decimals.min(MAX_CURRENCY_DECIMALS) as usize;
        let scale = 10_f64.powi(decimals as i32);
        let magnitude = (amount.abs() * scale).round() / scale;
        let sign = if amount < 0.0 && magnitude != 0.0 { "-" } else { "" };

        format!(
            "{}{}{:.prec$}",
            sign,
            self.symbol,
            magnitude,
            prec = decimals
        )
    }
}

/// Line inputs each document screen uses.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldSettings {
    #[serde(default)]
    pub invoice: LineFields,
    #[serde(default)]
    pub quotation: LineFields,
    #[serde(default)]
    pub debit_note: LineFields,
    #[serde(default)]
    pub sales_return: LineFields,
}

impl FieldSettings {
    pub fn for_kind(&self, kind: DocumentKind) -> LineFields {
        match kind {
            DocumentKind::Invoice => self.invoice,
            DocumentKind::Quotation => self.quotation,
            DocumentKind::DebitNote => self.debit_note,
            DocumentKind::SalesReturn => self.sales_return,
        }
    }
}

// =============================================================================
// Session Config
// =============================================================================

/// Complete session configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub defaults: DocumentDefaults,

    #[serde(default)]
    pub currency: CurrencySettings,

    #[serde(default)]
    pub fields: FieldSettings,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (ledgerly.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> SessionResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading session config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load session config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> SessionResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| SessionError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SessionError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| SessionError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Session config saved");
        Ok(())
    }

    pub fn validate(&self) -> SessionResult<()> {
        if self.currency.decimals > MAX_CURRENCY_DECIMALS {
            return Err(SessionError::InvalidConfig(format!(
                "currency.decimals must be at most {}, got {}",
                MAX_CURRENCY_DECIMALS, self.currency.decimals
            )));
        }

        // New lines must start from a label the dropdown can show.
        if self.defaults.tax.parse::<TaxDescriptor>().is_err() {
            return Err(SessionError::InvalidConfig(format!(
                "defaults.tax {:?} is not a known tax descriptor",
                self.defaults.tax
            )));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `LEDGERLY_*` overrides from any key lookup.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("LEDGERLY_AUTO_ROUND_OFF") {
            match value.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.defaults.auto_round_off = true,
                "0" | "false" | "no" | "off" => self.defaults.auto_round_off = false,
                _ => warn!(value = %value, "Unknown LEDGERLY_AUTO_ROUND_OFF value"),
            }
        }

        if let Some(value) = lookup("LEDGERLY_DISCOUNT_TYPE") {
            match value.parse::<DiscountType>() {
                Ok(parsed) => {
                    debug!(discount_type = %parsed, "Overriding discount type from environment");
                    self.defaults.discount_type = parsed;
                }
                Err(e) => warn!(error = %e, "Ignoring LEDGERLY_DISCOUNT_TYPE"),
            }
        }

        if let Some(tax) = lookup("LEDGERLY_DEFAULT_TAX") {
            debug!(tax = %tax, "Overriding default tax from environment");
            self.defaults.tax = tax;
        }

        if let Some(symbol) = lookup("LEDGERLY_CURRENCY_SYMBOL") {
            self.currency.symbol = symbol;
        }

        if let Some(decimals) = lookup("LEDGERLY_CURRENCY_DECIMALS") {
            if let Ok(d) = decimals.trim().parse::<u8>() {
                debug!(decimals = d, "Overriding currency decimals from environment");
                self.currency.decimals = d;
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "ledgerly", "ledgerly")
            .map(|dirs| dirs.config_dir().join("ledgerly.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn line_fields(&self, kind: DocumentKind) -> LineFields {
        self.fields.for_kind(kind)
    }

    pub fn format_currency(&self, amount: f64) -> String {
        self.currency.format(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert!(config.defaults.auto_round_off);
        assert_eq!(config.defaults.discount_type, DiscountType::Percentage);
        assert_eq!(config.defaults.tax, "None");
        assert_eq!(config.line_fields(DocumentKind::DebitNote), LineFields::ALL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = SessionConfig::default();

        config.currency.decimals = 9;
        assert!(config.validate().is_err());

        config.currency.decimals = 3;
        config.defaults.tax = "GST @ 19%".to_string();
        assert!(config.validate().is_err());

        config.defaults.tax = "GST @ 28% + Cess @ 5%".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config: SessionConfig = toml::from_str(
            r#"
            [defaults]
            discount_type = "fixed"

            [fields.quotation]
            discount = false
            "#,
        )
        .unwrap();

        assert!(config.defaults.auto_round_off);
        assert_eq!(config.defaults.discount_type, DiscountType::Fixed);
        assert_eq!(
            config.line_fields(DocumentKind::Quotation),
            LineFields {
                discount: false,
                tax: true
            }
        );
        assert_eq!(config.line_fields(DocumentKind::Invoice), LineFields::ALL);
        assert_eq!(config.currency.symbol, "₹");
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("LEDGERLY_AUTO_ROUND_OFF", "off"),
            ("LEDGERLY_DISCOUNT_TYPE", "fixed"),
            ("LEDGERLY_DEFAULT_TAX", "GST @ 5%"),
            ("LEDGERLY_CURRENCY_SYMBOL", "Rs. "),
            ("LEDGERLY_CURRENCY_DECIMALS", "0"),
        ]);

        let mut config = SessionConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert!(!config.defaults.auto_round_off);
        assert_eq!(config.defaults.discount_type, DiscountType::Fixed);
        assert_eq!(config.defaults.tax, "GST @ 5%");
        assert_eq!(config.format_currency(219.4), "Rs. 219");
    }

    #[test]
    fn test_bad_overrides_are_ignored() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("LEDGERLY_AUTO_ROUND_OFF", "maybe"),
            ("LEDGERLY_DISCOUNT_TYPE", "half"),
            ("LEDGERLY_CURRENCY_DECIMALS", "two"),
        ]);

        let mut config = SessionConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn test_format_currency() {
        let config = SessionConfig::default();
        assert_eq!(config.format_currency(0.0), "₹0.00");
        assert_eq!(config.format_currency(218.5), "₹218.50");
        assert_eq!(config.format_currency(-0.001), "₹0.00");
        assert_eq!(config.format_currency(1180.0), "₹1180.00");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ledgerly.toml");

        let mut config = SessionConfig::default();
        config.defaults.tax = "GST @ 12%".to_string();
        config.fields.sales_return = LineFields {
            discount: false,
            tax: true,
        };
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[defaults]"));
        assert!(contents.contains("[currency]"));

        let loaded: SessionConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledgerly.toml");
        std::fs::write(&path, "[currency]\ndecimals = 12\n").unwrap();

        let err = SessionConfig::load(Some(path.clone())).unwrap_err();
        assert!(err.is_config_error());

        assert_eq!(SessionConfig::load_or_default(Some(path)).currency.decimals, 2);
    }
}
