//! Type-safe price representation using decimal arithmetic.
//!
//! [`Price::display`] is the storefront's single currency formatter. It is
//! pure: the same amount and currency always produce the same string.
//!
//! ```
//! use rocketshoes_core::{CurrencyCode, Price};
//! use rust_decimal::Decimal;
//!
//! let price = Price::new(Decimal::new(123_450, 2), CurrencyCode::BRL);
//! assert_eq!(price.display(), "R$ 1.234,50");
//!
//! let price = Price::new(Decimal::new(123_450, 2), CurrencyCode::USD);
//! assert_eq!(price.display(), "$1,234.50");
//! ```

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., reais, not centavos).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Format for display (e.g., "R$ 19,99" or "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let digits = format!("{:.2}", rounded.abs());
        let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let style = self.currency_code.style();
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let space = if style.spaced { " " } else { "" };

        format!(
            "{sign}{symbol}{space}{whole}{decimal}{cents}",
            symbol = style.symbol,
            whole = group_thousands(whole, style.thousands),
            decimal = style.decimal,
        )
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Insert a separator every three digits, counting from the right.
fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// Error parsing a [`CurrencyCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported currency code: {0}")]
pub struct CurrencyCodeError(pub String);

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    BRL,
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

/// How a currency is written.
struct CurrencyStyle {
    symbol: &'static str,
    thousands: char,
    decimal: char,
    spaced: bool,
}

impl CurrencyCode {
    /// The currency symbol (e.g., "R$").
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        self.style().symbol
    }

    /// The ISO 4217 code (e.g., "BRL").
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::BRL => "BRL",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }

    const fn style(self) -> CurrencyStyle {
        match self {
            Self::BRL => CurrencyStyle {
                symbol: "R$",
                thousands: '.',
                decimal: ',',
                spaced: true,
            },
            Self::EUR => CurrencyStyle {
                symbol: "€",
                thousands: '.',
                decimal: ',',
                spaced: true,
            },
            Self::GBP => CurrencyStyle {
                symbol: "£",
                thousands: ',',
                decimal: '.',
                spaced: false,
            },
            Self::USD | Self::CAD | Self::AUD => CurrencyStyle {
                symbol: "$",
                thousands: ',',
                decimal: '.',
                spaced: false,
            },
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = CurrencyCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BRL" => Ok(Self::BRL),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(CurrencyCodeError(s.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn brl(amount: &str) -> String {
        Price::new(amount.parse().unwrap(), CurrencyCode::BRL).display()
    }

    #[test]
    fn test_display_brl() {
        assert_eq!(brl("200"), "R$ 200,00");
        assert_eq!(brl("179.9"), "R$ 179,90");
        assert_eq!(brl("0"), "R$ 0,00");
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(brl("1234.5"), "R$ 1.234,50");
        assert_eq!(brl("1234567.89"), "R$ 1.234.567,89");
        assert_eq!(brl("999.99"), "R$ 999,99");
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(brl("10.005"), "R$ 10,01");
        assert_eq!(brl("10.004"), "R$ 10,00");
        assert_eq!(brl("-10.005"), "-R$ 10,01");
    }

    #[test]
    fn test_display_negative() {
        assert_eq!(brl("-1500"), "-R$ 1.500,00");
        assert_eq!(brl("-0.001"), "R$ 0,00");
    }

    #[test]
    fn test_display_other_currencies() {
        let amount: Decimal = "1234.5".parse().unwrap();
        assert_eq!(Price::new(amount, CurrencyCode::USD).display(), "$1,234.50");
        assert_eq!(Price::new(amount, CurrencyCode::EUR).display(), "€ 1.234,50");
        assert_eq!(Price::new(amount, CurrencyCode::GBP).display(), "£1,234.50");
        assert_eq!(Price::new(amount, CurrencyCode::AUD).to_string(), "$1,234.50");
    }

    #[test]
    fn test_currency_code_from_str() {
        assert_eq!("brl".parse::<CurrencyCode>().unwrap(), CurrencyCode::BRL);
        assert_eq!(" USD ".parse::<CurrencyCode>().unwrap(), CurrencyCode::USD);
        assert!(matches!(
            "XYZ".parse::<CurrencyCode>(),
            Err(CurrencyCodeError(code)) if code == "XYZ"
        ));
    }

    #[test]
    fn test_currency_code_default_is_brl() {
        assert_eq!(CurrencyCode::default(), CurrencyCode::BRL);
        assert_eq!(CurrencyCode::default().symbol(), "R$");
    }
}
