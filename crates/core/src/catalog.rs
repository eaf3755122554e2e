//! Product catalog grouped into configurator tabs.
//!
//! The catalog is read once (from YAML) and validated up front: every price
//! must parse, every product id must be a valid slug, and ids must be unique
//! across the whole catalog. A catalog that loads is safe to snapshot into a
//! cart without further checks.
//!
//! ```yaml
//! tabs:
//!   - key: saefte
//!     label: Säfte
//!     products:
//!       - name: Bio Apfelsaft, 1L
//!         price: "3,00 €"
//!         weight: 1 Liter
//!         image: /static/images/apfelsaft.webp
//! ```

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::cart::ProductSnapshot;
use crate::types::{IdError, Price, PriceError, ProductId, parse_price, slugify};

/// Errors raised while loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The document is not valid YAML or does not match the schema.
    #[error("catalog document is invalid: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The catalog has no tabs.
    #[error("catalog must contain at least one tab")]
    NoTabs,

    /// A tab key is empty or not slug-safe.
    #[error("tab key '{0}' must be a non-empty slug")]
    InvalidTabKey(String),

    /// Two tabs share a key.
    #[error("tab key '{0}' is used more than once")]
    DuplicateTab(String),

    /// A product has a blank name.
    #[error("product in tab '{tab}' has an empty name")]
    EmptyName {
        /// Tab the product belongs to.
        tab: String,
    },

    /// A product's price text does not parse.
    #[error("product '{product}' has an invalid price: {source}")]
    InvalidPrice {
        /// Display name of the product.
        product: String,
        /// Underlying parse failure.
        source: PriceError,
    },

    /// A product's id (explicit or derived) is invalid.
    #[error("product '{product}' has an invalid id: {source}")]
    InvalidId {
        /// Display name of the product.
        product: String,
        /// Underlying id failure.
        source: IdError,
    },

    /// Two products resolve to the same id.
    #[error("products '{first}' and '{second}' share the id '{id}'; give one an explicit id")]
    DuplicateId {
        /// The colliding id.
        id: ProductId,
        /// Product that claimed the id first.
        first: String,
        /// Product that collided with it.
        second: String,
    },
}

/// Raw catalog document as written by hand.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogDocument {
    pub tabs: Vec<TabDocument>,
}

/// Raw tab entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TabDocument {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub products: Vec<ProductDocument>,
}

/// Raw product entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductDocument {
    /// Explicit id; derived from `name` when absent.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    /// Localized price text, e.g. `"2,50 €"`.
    pub price: String,
    #[serde(default)]
    pub weight: Option<String>,
    pub image: String,
}

/// A validated product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub weight: String,
    pub image: String,
}

impl Product {
    /// Capture the fields a cart line item keeps from this product.
    #[must_use]
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
            weight: self.weight.clone(),
            image: self.image.clone(),
        }
    }
}

/// A validated configurator tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogTab {
    pub key: String,
    pub label: String,
    pub products: Vec<Product>,
}

/// A validated catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    tabs: Vec<CatalogTab>,
    index: HashMap<ProductId, (usize, usize)>,
}

impl Catalog {
    /// Parse and validate a YAML catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] describing the first problem found.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_yaml::from_str(yaml)?;
        Self::from_document(document)
    }

    /// Validate a parsed catalog document.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] describing the first problem found.
    pub fn from_document(document: CatalogDocument) -> Result<Self, CatalogError> {
        if document.tabs.is_empty() {
            return Err(CatalogError::NoTabs);
        }

        let mut tab_keys = HashSet::new();
        let mut owners: HashMap<ProductId, String> = HashMap::new();
        let mut index = HashMap::new();
        let mut tabs = Vec::with_capacity(document.tabs.len());

        for (tab_pos, tab) in document.tabs.into_iter().enumerate() {
            let key = tab.key.trim().to_owned();
            if key.is_empty() || slugify(&key) != key {
                return Err(CatalogError::InvalidTabKey(tab.key));
            }
            if !tab_keys.insert(key.clone()) {
                return Err(CatalogError::DuplicateTab(key));
            }

            let mut products = Vec::with_capacity(tab.products.len());
            for raw in tab.products {
                let product = validate_product(raw, &key)?;

                if let Some(first) = owners.get(&product.id) {
                    return Err(CatalogError::DuplicateId {
                        id: product.id,
                        first: first.clone(),
                        second: product.name,
                    });
                }
                owners.insert(product.id.clone(), product.name.clone());
                index.insert(product.id.clone(), (tab_pos, products.len()));
                products.push(product);
            }

            tabs.push(CatalogTab {
                key,
                label: tab.label.trim().to_owned(),
                products,
            });
        }

        tracing::debug!(tabs = tabs.len(), products = index.len(), "Catalog validated");

        Ok(Self { tabs, index })
    }

    /// Tabs in display order.
    #[must_use]
    pub fn tabs(&self) -> &[CatalogTab] {
        &self.tabs
    }

    /// Tab keys in display order.
    pub fn tab_keys(&self) -> impl Iterator<Item = &str> {
        self.tabs.iter().map(|tab| tab.key.as_str())
    }

    /// All products across every tab, in display order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.tabs.iter().flat_map(|tab| tab.products.iter())
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        let &(tab, pos) = self.index.get(id)?;
        self.tabs.get(tab)?.products.get(pos)
    }
}

fn validate_product(raw: ProductDocument, tab: &str) -> Result<Product, CatalogError> {
    let name = raw.name.trim().to_owned();
    if name.is_empty() {
        return Err(CatalogError::EmptyName {
            tab: tab.to_owned(),
        });
    }

    let price = parse_price(&raw.price).map_err(|source| CatalogError::InvalidPrice {
        product: name.clone(),
        source,
    })?;

    let id = match raw.id.as_deref() {
        Some(explicit) => ProductId::parse(explicit.trim()),
        None => ProductId::from_name(&name),
    }
    .map_err(|source| CatalogError::InvalidId {
        product: name.clone(),
        source,
    })?;

    Ok(Product {
        id,
        name,
        price,
        weight: raw.weight.map(|w| w.trim().to_owned()).unwrap_or_default(),
        image: raw.image.trim().to_owned(),
    })
}
