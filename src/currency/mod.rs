//! Display-only currency formatting. Amounts are stored and aggregated as
//! plain values; the code picked here is a label, never a conversion.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::book::money;

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Symbol for common codes, falling back to the code itself.
    pub fn symbol(&self) -> &str {
        match self.0.as_str() {
            "USD" | "CAD" | "AUD" => "$",
            "EUR" => "€",
            "GBP" => "£",
            "JPY" => "¥",
            "CHF" => "CHF",
            "SEK" | "NOK" | "DKK" => "kr",
            _ => self.as_str(),
        }
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Formats a cent value with the currency's symbol: `format_cents(1999, &usd)`
/// is `"$19.99"`.
pub fn format_cents(cents: i64, code: &CurrencyCode) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.abs();
    format!("{}{}{}.{:02}", sign, code.symbol(), abs / 100, abs % 100)
}

/// Formats a wire-format amount by rounding it to cents first.
pub fn format_amount(amount: f64, code: &CurrencyCode) -> String {
    format_cents(money::to_cents(amount), code)
}
