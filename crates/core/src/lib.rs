//! Streuobst Core - Cart, catalog and price rules.
//!
//! This crate provides the rules behind the Streuobst configurator:
//! - `storefront` - Server-rendered configurator page with an HTMX cart
//! - `cli` - Catalog validation and cart inspection tools
//!
//! # Architecture
//!
//! The core crate contains only types, rules and traits - no network, no
//! filesystem. Persistence is injected through [`cart::CartStorage`], so the
//! same cart logic runs against a browser session, a JSON file or memory.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product ids and prices
//! - [`catalog`] - Validated product catalog grouped into configurator tabs
//! - [`cart`] - Line items, store operations, persistence and projection
//! - [`ui`] - Tab, navigation and overlay state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod types;
pub mod ui;

pub use cart::{Cart, CartError, LineItem, ProductSnapshot};
pub use catalog::{Catalog, CatalogError};
pub use types::*;
