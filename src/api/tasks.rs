//! Typed client for the taskboard HTTP API.
//!
//! One method per route. A non-success response becomes
//! [`ClientError::Rejected`] carrying the server's `error` text, or the
//! operation's fallback message when the body has none.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskboard::api::tasks::TasksApi;
//! use taskboard::libs::task::TaskStatus;
//!
//! # async fn demo() -> Result<(), taskboard::api::tasks::ClientError> {
//! let api = TasksApi::new("http://127.0.0.1:3000");
//! let id = api.create_task("Buy milk").await?;
//! api.update_task_status(&id, TaskStatus::Done).await?;
//! # Ok(())
//! # }
//! ```

use crate::libs::messages::Message;
use crate::libs::task::{ReorderPlan, Task, TaskStatus};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Could not reach the task server: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Rejected { status: u16, message: String },
}

#[derive(Debug, Deserialize)]
struct TaskList {
    tasks: Vec<Task>,
}

#[derive(Debug, Deserialize)]
struct Created {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TasksApi {
    client: Client,
    base_url: String,
}

impl TasksApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/tasks{}", self.base_url, path)
    }

    fn task_url(&self, id: &str) -> String {
        self.url(&format!("/{}", id))
    }

    /// Passes a success response through; anything else becomes `Rejected`.
    async fn check(response: Response, fallback: Message) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| fallback.to_string());
        Err(ClientError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        let response = self.client.get(self.url("")).send().await?;
        let list: TaskList = Self::check(response, Message::LoadTasksFailed).await?.json().await?;

        Ok(list.tasks)
    }

    /// Creates a task and returns its id.
    pub async fn create_task(&self, title: &str) -> Result<String, ClientError> {
        let response = self.client.post(self.url("")).json(&json!({ "title": title })).send().await?;
        let created: Created = Self::check(response, Message::CreateTaskFailed).await?.json().await?;

        Ok(created.id)
    }

    pub async fn delete_task(&self, id: &str) -> Result<(), ClientError> {
        let response = self.client.delete(self.task_url(id)).send().await?;
        Self::check(response, Message::DeleteTaskFailed).await?;

        Ok(())
    }

    pub async fn update_task_status(&self, id: &str, status: TaskStatus) -> Result<(), ClientError> {
        self.update(id, json!({ "action": "status", "value": status }), Message::UpdateStatusFailed)
            .await
    }

    pub async fn update_task_title(&self, id: &str, title: &str) -> Result<(), ClientError> {
        self.update(id, json!({ "action": "title", "value": title }), Message::UpdateTitleFailed)
            .await
    }

    /// Sets the importance flag to `important`.
    pub async fn toggle_task_importance(&self, id: &str, important: bool) -> Result<(), ClientError> {
        self.update(id, json!({ "action": "important", "value": important }), Message::ToggleImportanceFailed)
            .await
    }

    pub async fn update_task_order(&self, plan: &ReorderPlan) -> Result<(), ClientError> {
        let response = self.client.post(self.url("/order")).json(plan).send().await?;
        Self::check(response, Message::UpdateOrderFailed).await?;

        Ok(())
    }

    async fn update(&self, id: &str, body: serde_json::Value, fallback: Message) -> Result<(), ClientError> {
        let response = self.client.put(self.task_url(id)).json(&body).send().await?;
        Self::check(response, fallback).await?;

        Ok(())
    }
}
