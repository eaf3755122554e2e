//! Product identifiers derived from display names.
//!
//! A [`ProductId`] is a slug: lowercase ASCII letters, digits and hyphens.
//! It keys cart line items and names DOM anchors such as `qty-<id>`, so it
//! must stay URL and attribute safe.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`ProductId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The input (or its slug) is empty.
    #[error("product id cannot be empty")]
    Empty,
    /// The input contains a character outside `[a-z0-9-]`.
    #[error("product id '{0}' may only contain lowercase letters, digits and hyphens")]
    InvalidCharacter(String),
}

/// Derive a slug from a display name.
///
/// Lowercases, replaces each run of whitespace with a single hyphen, then
/// drops every character outside `[a-z0-9-]`. Whitespace is collapsed before
/// stripping, so `"Saft , 1L"` becomes `"saft--1l"`.
///
/// ```
/// use streuobst_core::slugify;
///
/// assert_eq!(slugify("Bio Apfelsaft, 1L"), "bio-apfelsaft-1l");
/// assert_eq!(slugify("Birne   Quitte"), "birne-quitte");
/// ```
#[must_use]
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut in_whitespace = false;

    for c in lowered.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
                in_whitespace = true;
            }
            continue;
        }
        in_whitespace = false;
        if is_slug_char(c) {
            slug.push(c);
        }
    }

    slug
}

const fn is_slug_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'
}

/// Stable identifier of a catalog product and its cart line item.
///
/// Two display names that slugify to the same value produce the same id;
/// the catalog rejects such collisions when it loads.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Derive an id from a product display name.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Empty`] if nothing survives slugification.
    pub fn from_name(name: &str) -> Result<Self, IdError> {
        let slug = slugify(name.trim());
        if slug.is_empty() {
            return Err(IdError::Empty);
        }
        Ok(Self(slug))
    }

    /// Accept an explicit id, which must already be a valid slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or contains characters outside
    /// `[a-z0-9-]`.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        if s.is_empty() {
            return Err(IdError::Empty);
        }
        if !s.chars().all(is_slug_char) {
            return Err(IdError::InvalidCharacter(s.to_owned()));
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ProductId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ProductId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_product_name() {
        assert_eq!(slugify("Bio Apfelsaft, 1L"), "bio-apfelsaft-1l");
    }

    #[test]
    fn test_slugify_collapses_whitespace_runs() {
        assert_eq!(slugify("Apfel \t Birne\nSaft"), "apfel-birne-saft");
    }

    #[test]
    fn test_slugify_strips_umlauts_and_punctuation() {
        assert_eq!(slugify("Süße Äpfel!"), "se-pfel");
    }

    #[test]
    fn test_slugify_collapses_before_stripping() {
        assert_eq!(slugify("Saft , 1L"), "saft--1l");
    }

    #[test]
    fn test_slugify_keeps_existing_hyphens() {
        assert_eq!(slugify("Apfel-Mango 0,75l"), "apfel-mango-075l");
    }

    #[test]
    fn test_from_name_trims_surrounding_whitespace() {
        let id = ProductId::from_name("  Quittensaft  ").unwrap();
        assert_eq!(id.as_str(), "quittensaft");
    }

    #[test]
    fn test_from_name_empty_slug() {
        assert_eq!(ProductId::from_name("€ !!"), Err(IdError::Empty));
        assert_eq!(ProductId::from_name(""), Err(IdError::Empty));
    }

    #[test]
    fn test_parse_rejects_non_slug() {
        assert!(ProductId::parse("bio-apfelsaft-1l").is_ok());
        assert!(matches!(
            ProductId::parse("Bio Apfelsaft"),
            Err(IdError::InvalidCharacter(_))
        ));
        assert_eq!(ProductId::parse(""), Err(IdError::Empty));
    }

    #[test]
    fn test_serde_round_trip_validates() {
        let id: ProductId = serde_json::from_str("\"apfelsaft\"").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"apfelsaft\"");

        let bad: Result<ProductId, _> = serde_json::from_str("\"Apfel Saft\"");
        assert!(bad.is_err());
    }
}
