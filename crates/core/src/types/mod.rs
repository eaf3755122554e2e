//! Core types for the Streuobst configurator.
//!
//! This module provides type-safe wrappers for product identifiers and prices.

pub mod id;
pub mod price;

pub use id::{IdError, ProductId, slugify};
pub use price::{CURRENCY_SYMBOL, Price, PriceError, format_price, parse_price};
