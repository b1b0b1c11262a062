use std::collections::BTreeMap;

use axum::{
    Json,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("Not Found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("Too many requests")]
    RateLimited,

    #[error("Validation failed")]
    Validation(BTreeMap<String, String>),

    #[error("Database error")]
    DbError(#[from] sqlx::Error),

    #[error("ORM error")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

/// Uniform error envelope returned for every failed request.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorBody {
    pub timestamp: String,
    pub path: String,
    pub status: u16,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            AppError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            AppError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "TOO_MANY_REQUESTS"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
            AppError::DbError(err) if is_unique_violation_sqlx(err) => {
                (StatusCode::CONFLICT, "CONFLICT")
            }
            AppError::OrmError(err) if is_unique_violation_orm(err) => {
                (StatusCode::CONFLICT, "CONFLICT")
            }
            AppError::DbError(_) | AppError::OrmError(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR")
            }
        }
    }

    fn public_message(&self) -> String {
        match self {
            AppError::DbError(err) if is_unique_violation_sqlx(err) => {
                "Resource already exists".to_string()
            }
            AppError::OrmError(err) if is_unique_violation_orm(err) => {
                "Resource already exists".to_string()
            }
            // Never leak database internals to the caller.
            AppError::DbError(_) | AppError::OrmError(_) | AppError::Internal(_) => {
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::Validation(fields) => serde_json::to_value(fields).ok(),
            _ => None,
        }
    }
}

fn is_unique_violation_sqlx(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

fn is_unique_violation_orm(err: &sea_orm::DbErr) -> bool {
    matches!(err.sql_err(), Some(sea_orm::SqlErr::UniqueConstraintViolation(_)))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorBody {
            timestamp: Utc::now().to_rfc3339(),
            // Filled in by the error_envelope middleware, which knows the request.
            path: String::new(),
            status: status.as_u16(),
            code: code.to_string(),
            message: self.public_message(),
            details: self.details(),
        };

        let mut response = (status, Json(body.clone())).into_response();
        response.extensions_mut().insert(body);
        response
    }
}

/// Stamps the request path onto error envelopes produced below this layer.
pub async fn error_envelope(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_owned();
    let response = next.run(req).await;

    if let Some(body) = response.extensions().get::<ErrorBody>() {
        let mut body = body.clone();
        body.path = path;
        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, Json(body)).into_response();
    }

    response
}

pub type AppResult<T> = Result<T, AppError>;
