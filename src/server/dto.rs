//! Request and response bodies.
//!
//! Request fields are kept as raw JSON values so each route can report the
//! exact problem with a field (missing, wrong type, empty) instead of a
//! generic deserialization error.

use super::error::*;
use crate::db::store::{OrderWrite, TaskField};
use crate::libs::task::{Task, TaskStatus};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parses a body that must be a JSON object.
pub fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiErrorResponse> {
    let value: Value = serde_json::from_slice(body).map_err(|_| ApiErrorResponse::bad_request(INVALID_JSON))?;
    if !value.is_object() {
        return Err(ApiErrorResponse::bad_request(INVALID_JSON));
    }
    serde_json::from_value(value).map_err(|_| ApiErrorResponse::bad_request(INVALID_JSON))
}

/// A non-empty trimmed string, if `value` is one.
fn non_empty_string(value: &Value) -> Option<String> {
    value.as_str().map(str::trim).filter(|text| !text.is_empty()).map(str::to_string)
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: Value,
}

impl CreateTaskRequest {
    /// The trimmed title.
    pub fn validate(&self) -> Result<String, ApiErrorResponse> {
        non_empty_string(&self.title).ok_or_else(|| ApiErrorResponse::bad_request(TITLE_REQUIRED))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub action: Value,
    #[serde(default)]
    pub value: Value,
}

impl UpdateTaskRequest {
    pub fn validate(&self) -> Result<TaskField, ApiErrorResponse> {
        let action = match &self.action {
            Value::Null | Value::Bool(false) => return Err(ApiErrorResponse::bad_request(ACTION_REQUIRED)),
            Value::String(action) if action.is_empty() => return Err(ApiErrorResponse::bad_request(ACTION_REQUIRED)),
            Value::Number(number) if number.as_f64() == Some(0.0) => {
                return Err(ApiErrorResponse::bad_request(ACTION_REQUIRED))
            }
            Value::String(action) => action.as_str(),
            _ => return Err(ApiErrorResponse::bad_request(INVALID_ACTION)),
        };

        match action {
            "status" => self
                .value
                .as_str()
                .and_then(|status| status.parse::<TaskStatus>().ok())
                .map(TaskField::Status)
                .ok_or_else(|| ApiErrorResponse::bad_request(INVALID_STATUS)),
            "title" => non_empty_string(&self.value)
                .map(TaskField::Title)
                .ok_or_else(|| ApiErrorResponse::bad_request(INVALID_TITLE)),
            "important" => self
                .value
                .as_bool()
                .map(TaskField::Important)
                .ok_or_else(|| ApiErrorResponse::bad_request(INVALID_IMPORTANT)),
            _ => Err(ApiErrorResponse::bad_request(INVALID_ACTION)),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    #[serde(default)]
    pub task_ids: Value,
    #[serde(default)]
    pub orders: Value,
}

impl ReorderRequest {
    pub fn validate(&self) -> Result<Vec<OrderWrite>, ApiErrorResponse> {
        let (Some(task_ids), Some(orders)) = (self.task_ids.as_array(), self.orders.as_array()) else {
            return Err(ApiErrorResponse::bad_request(ORDER_NOT_ARRAYS));
        };
        if task_ids.len() != orders.len() {
            return Err(ApiErrorResponse::bad_request(ORDER_LENGTH_MISMATCH));
        }

        task_ids
            .iter()
            .zip(orders)
            .map(|(id, order)| {
                let id = id.as_str().ok_or_else(|| ApiErrorResponse::bad_request(ORDER_IDS_NOT_STRINGS))?;
                let order = order
                    .as_i64()
                    .ok_or_else(|| ApiErrorResponse::bad_request(ORDER_VALUES_NOT_INTEGERS))?;
                Ok(OrderWrite {
                    id: id.to_string(),
                    order,
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
