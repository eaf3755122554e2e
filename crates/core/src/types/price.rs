//! Euro prices using decimal arithmetic.
//!
//! Catalog prices arrive as localized text (`"2,50 €"`) and are displayed as
//! `"€2,50"`. Amounts are kept as [`Decimal`] so that line totals and cart
//! totals add up exactly.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Currency glyph used for parsing and display.
pub const CURRENCY_SYMBOL: char = '€';

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// Nothing left after stripping the currency glyph and whitespace.
    #[error("price text is empty")]
    Empty,
    /// The remainder is not a decimal number.
    #[error("malformed price text '{0}'")]
    Malformed(String),
    /// The amount is below zero.
    #[error("price '{0}' must not be negative")]
    Negative(String),
    /// The amount is above [`Price::MAX`].
    #[error("price '{0}' exceeds the maximum of {max}", max = Price::MAX)]
    TooLarge(String),
}

/// A non-negative euro amount.
///
/// Stored carts deserialize through [`Price::new`], so a blob cannot smuggle
/// in an amount the catalog would have rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Zero euros.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest accepted unit price, one hundred million euros.
    pub const MAX: Self = Self(Decimal::from_parts(100_000_000, 0, 0, false, 0));

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] for amounts below zero and
    /// [`PriceError::TooLarge`] for amounts above [`Price::MAX`].
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount.to_string()));
        }
        if amount > Self::MAX.0 {
            return Err(PriceError::TooLarge(amount.to_string()));
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of cents.
    ///
    /// Every `u32` cent amount is below [`Price::MAX`].
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// The underlying amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units, saturating at the largest decimal.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_price(*self))
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_price(s)
    }
}

/// Parse localized price text such as `"2,50 €"` or `"€ 3,00"`.
///
/// The currency glyph is removed, the first decimal comma becomes a decimal
/// point, and surrounding whitespace is trimmed before parsing.
///
/// # Errors
///
/// Returns an error when the text is empty, not a number, negative or above
/// [`Price::MAX`].
///
/// ```
/// use rust_decimal::Decimal;
/// use streuobst_core::parse_price;
///
/// assert_eq!(parse_price("2,50 €").unwrap().amount(), Decimal::new(25, 1));
/// assert!(parse_price("zwei Euro").is_err());
/// ```
pub fn parse_price(text: &str) -> Result<Price, PriceError> {
    let stripped: String = text.chars().filter(|&c| c != CURRENCY_SYMBOL).collect();
    let normalized = stripped.replacen(',', ".", 1);
    let trimmed = normalized.trim();

    if trimmed.is_empty() {
        return Err(PriceError::Empty);
    }

    let amount =
        Decimal::from_str(trimmed).map_err(|_| PriceError::Malformed(text.trim().to_owned()))?;

    Price::new(amount).map_err(|e| match e {
        PriceError::TooLarge(_) => PriceError::TooLarge(text.trim().to_owned()),
        _ => PriceError::Negative(text.trim().to_owned()),
    })
}

/// Render a price for display: currency glyph, two fraction digits, comma
/// as decimal separator.
///
/// ```
/// use rust_decimal::Decimal;
/// use streuobst_core::{Price, format_price};
///
/// let price = Price::new(Decimal::new(25, 1)).unwrap();
/// assert_eq!(format_price(price), "€2,50");
/// ```
#[must_use]
pub fn format_price(price: Price) -> String {
    let mut rounded = price
        .0
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    format!("{CURRENCY_SYMBOL}{}", rounded.to_string().replace('.', ","))
}
