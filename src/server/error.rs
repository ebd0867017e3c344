//! Error responses of the task API.
//!
//! Every failure is a JSON body `{ "error": ..., "details"?: ... }`.
//! Validation failures are 400 with a specific message and no details;
//! store failures are 500 with a generic per-route message, the underlying
//! error as `details`, and an error log line.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub const INVALID_JSON: &str = "Invalid JSON body";
pub const TITLE_REQUIRED: &str = "Title is required";
pub const TASK_ID_REQUIRED: &str = "Task ID is required";
pub const ACTION_REQUIRED: &str = "Action is required (status, title, or important)";
pub const INVALID_STATUS: &str = "Invalid status value";
pub const INVALID_TITLE: &str = "Title is required and must be a non-empty string";
pub const INVALID_IMPORTANT: &str = "Important must be a boolean";
pub const INVALID_ACTION: &str = "Invalid action. Use: status, title, or important";
pub const ORDER_NOT_ARRAYS: &str = "taskIds and orders must be arrays";
pub const ORDER_LENGTH_MISMATCH: &str = "taskIds and orders arrays must have the same length";
pub const ORDER_IDS_NOT_STRINGS: &str = "taskIds must contain only strings";
pub const ORDER_VALUES_NOT_INTEGERS: &str = "orders must contain only integers";

pub const GET_TASKS_FAILED: &str = "Failed to get tasks";
pub const CREATE_TASK_FAILED: &str = "Failed to create task";
pub const UPDATE_TASK_FAILED: &str = "Failed to update task";
pub const DELETE_TASK_FAILED: &str = "Failed to delete task";
pub const UPDATE_ORDER_FAILED: &str = "Failed to update task order";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiErrorResponse {
    pub fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                error: message.to_string(),
                details: None,
            },
        }
    }

    /// A 500 response; logs `cause` before hiding it behind `message`.
    pub fn internal(message: &str, cause: impl Display) -> Self {
        tracing::error!(error = %cause, "{}", message);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorBody {
                error: message.to_string(),
                details: Some(cause.to_string()),
            },
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
