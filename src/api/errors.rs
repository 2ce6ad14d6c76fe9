// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::contracts::RegistryError;
use crate::diffusion::ImageGenError;
use crate::pipeline::PipelineError;
use crate::safety::ClassificationError;
use crate::storage::PinError;
use crate::wallet::WalletError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    NotFound(String),
    InvalidRequest(String),
    ValidationError {
        field: String,
        message: String,
    },
    UserRejected(String),
    WrongNetwork {
        expected: u64,
        actual: Option<u64>,
    },
    UpstreamError(String),
    ServiceUnavailable(String),
    InternalError(String),
    Timeout,
}

impl ApiError {
    pub fn to_response(&self) -> ErrorResponse {
        let (error_type, message, details) = match self {
            ApiError::NotFound(msg) => ("not_found", msg.clone(), None),
            ApiError::InvalidRequest(msg) => ("invalid_request", msg.clone(), None),
            ApiError::ValidationError { field, message } => {
                let mut details = HashMap::new();
                details.insert(
                    "field".to_string(),
                    serde_json::Value::String(field.clone()),
                );
                ("validation_error", message.clone(), Some(details))
            }
            ApiError::UserRejected(msg) => ("user_rejected", msg.clone(), None),
            ApiError::WrongNetwork { expected, actual } => {
                let mut details = HashMap::new();
                details.insert(
                    "expected_chain_id".to_string(),
                    serde_json::Value::Number((*expected).into()),
                );
                if let Some(actual) = actual {
                    details.insert(
                        "actual_chain_id".to_string(),
                        serde_json::Value::Number((*actual).into()),
                    );
                }
                (
                    "wrong_network",
                    "Wallet is connected to an unsupported network".to_string(),
                    Some(details),
                )
            }
            ApiError::UpstreamError(msg) => ("upstream_error", msg.clone(), None),
            ApiError::ServiceUnavailable(msg) => ("service_unavailable", msg.clone(), None),
            ApiError::InternalError(msg) => ("internal_error", msg.clone(), None),
            ApiError::Timeout => ("timeout", "Request timed out".to_string(), None),
        };

        ErrorResponse {
            success: false,
            error_type: error_type.to_string(),
            message,
            details,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::NotFound(_) => 404,
            ApiError::InvalidRequest(_) | ApiError::ValidationError { .. } => 400,
            ApiError::UserRejected(_) => 403,
            ApiError::WrongNetwork { .. } => 409,
            ApiError::UpstreamError(_) => 502,
            ApiError::ServiceUnavailable(_) => 503,
            ApiError::InternalError(_) => 500,
            ApiError::Timeout => 504,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ApiError::ValidationError { field, message } => {
                write!(f, "Validation error for {}: {}", field, message)
            }
            ApiError::UserRejected(msg) => write!(f, "User rejected: {}", msg),
            ApiError::WrongNetwork { expected, actual } => write!(
                f,
                "Wrong network: expected chain {}, wallet on {:?}",
                expected, actual
            ),
            ApiError::UpstreamError(msg) => write!(f, "Upstream error: {}", msg),
            ApiError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Timeout => write!(f, "Request timed out"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_response())).into_response()
    }
}

impl From<ClassificationError> for ApiError {
    fn from(err: ClassificationError) -> Self {
        match err {
            ClassificationError::EmptyPrompt => ApiError::ValidationError {
                field: "prompt".to_string(),
                message: "Prompt is required".to_string(),
            },
            ClassificationError::Timeout(_) => ApiError::Timeout,
            ClassificationError::Unavailable(msg) => {
                ApiError::UpstreamError(format!("Failed to analyze prompt: {}", msg))
            }
        }
    }
}

impl From<ImageGenError> for ApiError {
    fn from(err: ImageGenError) -> Self {
        match err {
            ImageGenError::Validation(msg) => ApiError::ValidationError {
                field: "prompt".to_string(),
                message: msg,
            },
            ImageGenError::InvalidRequest { message } => ApiError::InvalidRequest(message),
            ImageGenError::Timeout => ApiError::Timeout,
            other => ApiError::UpstreamError(other.to_string()),
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Validation(msg) => ApiError::ValidationError {
                field: "prompt".to_string(),
                message: msg,
            },
            PipelineError::ImageGeneration(e) => ApiError::from(e),
            PipelineError::Cancelled { step } => {
                ApiError::ServiceUnavailable(format!("Generation cancelled during {}", step))
            }
        }
    }
}

impl From<PinError> for ApiError {
    fn from(err: PinError) -> Self {
        match err {
            PinError::InvalidUrl(msg) => ApiError::ValidationError {
                field: "imageUrl".to_string(),
                message: msg,
            },
            PinError::NotConfigured => {
                ApiError::ServiceUnavailable("Pinata credentials not configured".to_string())
            }
            PinError::Timeout => ApiError::Timeout,
            other => ApiError::UpstreamError(format!("Failed to upload to Pinata: {}", other)),
        }
    }
}

impl From<WalletError> for ApiError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::UserRejected(msg) => ApiError::UserRejected(msg),
            WalletError::WrongNetwork { expected, actual } => {
                ApiError::WrongNetwork { expected, actual }
            }
            WalletError::NotConnected | WalletError::NoAccounts => {
                ApiError::InvalidRequest(err.to_string())
            }
            WalletError::Transport(msg) => ApiError::ServiceUnavailable(msg),
            other => ApiError::UpstreamError(other.to_string()),
        }
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Timeout => ApiError::Timeout,
            RegistryError::NotConfigured => {
                ApiError::ServiceUnavailable("Contract address not configured".to_string())
            }
            RegistryError::Connectivity(msg) => ApiError::ServiceUnavailable(msg),
            RegistryError::UserRejected(msg) => ApiError::UserRejected(msg),
            other => ApiError::UpstreamError(other.to_string()),
        }
    }
}
