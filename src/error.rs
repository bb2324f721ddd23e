use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::models::OrderStatus;
use crate::response::{ApiResponse, Meta};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unknown user")]
    UnknownUser,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User is pending approval")]
    NotApproved,

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Forbidden")]
    Unauthorized,

    #[error("Not Found")]
    NotFound,

    #[error("Cart is empty")]
    EmptyCart,

    #[error("You cannot delete your own user")]
    SelfDeletion,

    #[error("Quantity must be greater than 0")]
    InvalidQuantity,

    #[error("Stock cannot be negative")]
    InvalidStock,

    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Username is already taken")]
    DuplicateUsername,

    #[error("Unknown product {0}")]
    UnknownProduct(String),

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UnknownUser
            | AppError::InvalidCredentials
            | AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::NotApproved | AppError::Unauthorized | AppError::SelfDeletion => {
                StatusCode::FORBIDDEN
            }
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::DuplicateUsername | AppError::InvalidTransition { .. } => {
                StatusCode::CONFLICT
            }
            AppError::EmptyCart
            | AppError::InvalidQuantity
            | AppError::InvalidStock
            | AppError::UnknownProduct(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let AppError::Internal(err) = &self {
            tracing::error!(error = %err, "internal error");
        }

        let body = ApiResponse {
            message: self.to_string(),
            data: Some(ErrorData {
                error: self.to_string(),
            }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
