//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are kept in the currency's standard unit (rand, not cents) as a
//! [`Decimal`], so totals never pick up binary floating point drift. The
//! directory only sells in South African rand today; [`CurrencyCode`] exists
//! so display formatting has a single place to change.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// South African VAT rate applied at checkout display (15%).
pub const VAT_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., rand, not cents).
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

    /// Create a price in the default currency.
    #[must_use]
    pub const fn zar(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::ZAR)
    }

    /// Format for display (e.g., "R99.00").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency_code.symbol(), self.amount.round_dp(2))
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    ZAR,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::ZAR => "R",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ZAR => "ZAR",
        }
    }
}

/// Subtotal, VAT and grand total for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Price,
    pub tax: Price,
    pub grand_total: Price,
}

impl Totals {
    /// Derive VAT and grand total from a VAT-exclusive subtotal. Both
    /// saturate at the `Decimal` bounds.
    #[must_use]
    pub fn from_subtotal(subtotal: Decimal) -> Self {
        let tax = subtotal.saturating_mul(VAT_RATE);
        Self {
            subtotal: Price::zar(subtotal),
            tax: Price::zar(tax),
            grand_total: Price::zar(subtotal.saturating_add(tax)),
        }
    }
}
