//! Delegated cart actions.
//!
//! Every cart control on the page (card buttons and cart-row buttons) submits
//! a single `op` token of the form `action:id`, so one endpoint can dispatch
//! all of them.

use core::fmt;
use std::str::FromStr;

use crate::types::{IdError, ProductId};

/// Errors raised while parsing a command token.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    /// The action name is not recognised.
    #[error("unknown cart action '{0}'")]
    UnknownAction(String),

    /// The action needs a product id and none was given.
    #[error("cart action '{0}' needs a product id")]
    MissingId(String),

    /// The product id is not a valid slug.
    #[error("invalid product id in cart action: {0}")]
    InvalidId(#[from] IdError),
}

/// A single cart mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCommand {
    /// Add one unit (card plus button or cart-row plus button).
    Add(ProductId),
    /// Remove one unit; fails when the product is not in the cart.
    Decrement(ProductId),
    /// Drop the whole line item.
    Remove(ProductId),
    /// Empty the cart.
    Clear,
}

impl CartCommand {
    /// Product the command targets, if any.
    #[must_use]
    pub const fn product_id(&self) -> Option<&ProductId> {
        match self {
            Self::Add(id) | Self::Decrement(id) | Self::Remove(id) => Some(id),
            Self::Clear => None,
        }
    }

    /// Short action name, as used in the token.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Decrement(_) => "decrement",
            Self::Remove(_) => "remove",
            Self::Clear => "clear",
        }
    }
}

impl FromStr for CartCommand {
    type Err = CommandError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (action, id) = match token.trim().split_once(':') {
            Some((action, id)) => (action, Some(id)),
            None => (token.trim(), None),
        };

        let product = |action: &str| -> Result<ProductId, CommandError> {
            let id = id
                .filter(|id| !id.is_empty())
                .ok_or_else(|| CommandError::MissingId(action.to_owned()))?;
            Ok(ProductId::parse(id)?)
        };

        match action {
            "add" | "increment" => Ok(Self::Add(product(action)?)),
            "decrement" => Ok(Self::Decrement(product(action)?)),
            "remove" => Ok(Self::Remove(product(action)?)),
            "clear" => Ok(Self::Clear),
            other => Err(CommandError::UnknownAction(other.to_owned())),
        }
    }
}

impl fmt::Display for CartCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.product_id() {
            Some(id) => write!(f, "{}:{id}", self.action()),
            None => f.write_str(self.action()),
        }
    }
}
