//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use streuobst_core::cart::{CartError, CommandError, StorageError};
use streuobst_core::ui::UiError;
use thiserror::Error;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// The submitted cart action could not be parsed.
    #[error("Invalid cart action: {0}")]
    Command(#[from] CommandError),

    /// UI state request referenced something that does not exist.
    #[error("UI error: {0}")]
    Ui(#[from] UiError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        Self::Cart(CartError::Storage(err))
    }
}

impl AppError {
    const fn is_server_error(&self) -> bool {
        matches!(self, Self::Internal(_) | Self::Cart(CartError::Storage(_)))
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::Cart(CartError::Storage(_)) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Cart(CartError::InvalidOperation { .. } | CartError::QuantityLimit { .. }) => {
                StatusCode::CONFLICT
            }
            Self::Cart(CartError::UnknownProduct { .. }) | Self::Ui(_) => StatusCode::NOT_FOUND,
            Self::Command(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, "Client error");
        }

        let status = self.status();

        // Don't expose internal error details to clients
        let message = if self.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for a cart action.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
pub fn add_cart_breadcrumb(action: &str, product_id: Option<&str>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some("cart".to_string()),
        message: Some(action.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(id) = product_id {
        breadcrumb.data.insert(
            "product_id".to_string(),
            serde_json::Value::String(id.to_string()),
        );
    }

    sentry::add_breadcrumb(breadcrumb);
}
