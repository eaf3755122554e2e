//! Business logic services for storefront.
//!
//! # Services
//!
//! - `cart` - Session-backed cart storage

pub mod cart;

pub use cart::SessionCartStorage;
