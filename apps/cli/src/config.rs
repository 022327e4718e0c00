//! # Configuration
//!
//! Settings for the script runner, loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line flags (`--pretty`)
//! 2. Environment variables (`SHOPCART_*`)
//! 3. Defaults (this file)

use serde::{Deserialize, Serialize};
use shopcart_core::Money;

/// Runner configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CliConfig {
    /// Currency symbol used when rendering totals for display.
    pub currency_symbol: String,

    /// Number of minor-unit digits shown after the decimal point.
    pub currency_decimals: u8,

    /// Indent the JSON output.
    pub pretty: bool,
}

impl Default for CliConfig {
    /// ## Default Values
    /// - Currency: `$` with 2 decimals
    /// - Output: compact JSON
    fn default() -> Self {
        CliConfig {
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            pretty: false,
        }
    }
}

impl CliConfig {
    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `SHOPCART_CURRENCY_SYMBOL`: display symbol, e.g. `€`
    /// - `SHOPCART_CURRENCY_DECIMALS`: digits after the point (0-4)
    /// - `SHOPCART_PRETTY`: `1` / `true` / `yes` for indented output
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`CliConfig::from_env`] with a custom variable source.
    ///
    /// Unparsable values are ignored and the default is kept.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = CliConfig::default();

        if let Some(symbol) = lookup("SHOPCART_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(decimals) = lookup("SHOPCART_CURRENCY_DECIMALS") {
            match decimals.trim().parse::<u8>() {
                Ok(decimals) if decimals <= 4 => config.currency_decimals = decimals,
                _ => tracing::warn!(value = %decimals, "ignoring SHOPCART_CURRENCY_DECIMALS"),
            }
        }

        if let Some(pretty) = lookup("SHOPCART_PRETTY") {
            config.pretty = matches!(
                pretty.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        config
    }

    /// Formats an amount for display.
    ///
    /// The amount is in cents; with fewer than two display decimals the
    /// extra digits are truncated, with more they are zero-padded.
    ///
    /// ## Example
    /// ```rust
    /// use shopcart_cli::config::CliConfig;
    /// use shopcart_core::Money;
    ///
    /// let config = CliConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let cents = amount.cents();
        let sign = if cents < 0 { "-" } else { "" };
        let whole = (cents / 100).unsigned_abs();
        let frac = (cents % 100).unsigned_abs();

        let frac = match self.currency_decimals {
            0 => return format!("{}{}{}", sign, self.currency_symbol, whole),
            1 => format!("{}", frac / 10),
            2 => format!("{:02}", frac),
            n => format!("{:02}{}", frac, "0".repeat(usize::from(n) - 2)),
        };

        format!("{}{}{}.{}", sign, self.currency_symbol, whole, frac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> CliConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CliConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_env() {
        assert_eq!(config_from(&[]), CliConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let config = config_from(&[
            ("SHOPCART_CURRENCY_SYMBOL", "€"),
            ("SHOPCART_CURRENCY_DECIMALS", "0"),
            ("SHOPCART_PRETTY", "true"),
        ]);

        assert_eq!(config.currency_symbol, "€");
        assert_eq!(config.currency_decimals, 0);
        assert!(config.pretty);
    }

    #[test]
    fn test_bad_decimals_keep_default() {
        assert_eq!(config_from(&[("SHOPCART_CURRENCY_DECIMALS", "two")]).currency_decimals, 2);
        assert_eq!(config_from(&[("SHOPCART_CURRENCY_DECIMALS", "9")]).currency_decimals, 2);
    }

    #[test]
    fn test_format_currency_positive() {
        let config = CliConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::from_cents(100)), "$1.00");
        assert_eq!(config.format_currency(Money::from_cents(1)), "$0.01");
        assert_eq!(config.format_currency(Money::zero()), "$0.00");
    }

    #[test]
    fn test_format_currency_negative() {
        let config = CliConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");
        assert_eq!(config.format_currency(Money::from_cents(-5)), "-$0.05");
    }

    #[test]
    fn test_format_currency_decimals() {
        let mut config = CliConfig::default();
        let amount = Money::from_cents(123456789);

        config.currency_decimals = 0;
        assert_eq!(config.format_currency(amount), "$1234567");
        config.currency_decimals = 1;
        assert_eq!(config.format_currency(amount), "$1234567.8");
        config.currency_decimals = 3;
        assert_eq!(config.format_currency(amount), "$1234567.890");
    }
}
