//! Cloud Firestore backend over the REST API.
//!
//! Tasks live at `users/user-123/tasks/{id}` in the project's `(default)`
//! database. Each store operation is one REST call:
//!
//! | Operation | Request |
//! |---|---|
//! | list | `POST {parent}:runQuery`, ordered by `createdAt` descending |
//! | create | `POST {collection}` (Firestore assigns the id) |
//! | update | `PATCH {document}?updateMask.fieldPaths=..&currentDocument.exists=true` |
//! | delete | `DELETE {document}` |
//! | commit_orders | `POST {database}/documents:commit`, one update write per id |
//!
//! Requests carry the web API key as the `key` query parameter. With
//! `FIRESTORE_EMULATOR_HOST` set, requests go to the emulator over plain
//! http instead.
//!
//! Field values use Firestore's typed JSON encoding (`stringValue`,
//! `integerValue` as a decimal string, `timestampValue` as RFC 3339, ...).

use crate::db::store::{DocumentStore, NewTask, OrderWrite, StoreError, TaskDocument, TaskField, TASKS_COLLECTION, USER_ID};
use crate::libs::config::FirebaseConfig;
use crate::libs::task::TaskStatus;
use crate::libs::timestamp::Timestamp;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::watch;

pub const FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";

/// One typed Firestore value. Exactly one field is set; kinds this crate
/// does not use (maps, arrays, references) deserialize to an empty value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Value {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boolean_value: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integer_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_value: Option<String>,
}

impl Value {
    pub fn string(value: impl Into<String>) -> Self {
        Value {
            string_value: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn boolean(value: bool) -> Self {
        Value {
            boolean_value: Some(value),
            ..Default::default()
        }
    }

    pub fn integer(value: i64) -> Self {
        Value {
            integer_value: Some(value.to_string()),
            ..Default::default()
        }
    }

    pub fn timestamp(value: Timestamp) -> Self {
        Value {
            timestamp_value: Some(value.to_rfc3339()),
            ..Default::default()
        }
    }

    /// Integers, plus whole doubles as written by JavaScript clients.
    pub fn as_i64(&self) -> Option<i64> {
        if let Some(integer) = &self.integer_value {
            return integer.parse().ok();
        }
        self.double_value.filter(|double| double.fract() == 0.0).map(|double| double as i64)
    }
}

pub type Fields = BTreeMap<String, Value>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub fields: Fields,
}

impl Document {
    /// The last segment of the resource name.
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct QueryResult {
    document: Option<Document>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorStatus,
}

#[derive(Debug, Deserialize)]
struct ErrorStatus {
    message: String,
}

/// Fields written for a new task document.
pub fn encode_new_task(task: &NewTask) -> Fields {
    let mut fields = Fields::new();
    fields.insert("title".to_string(), Value::string(&task.title));
    fields.insert("status".to_string(), Value::string(task.status.as_str()));
    fields.insert("createdAt".to_string(), Value::timestamp(task.created_at));
    fields.insert("important".to_string(), Value::boolean(task.important));
    fields
}

pub fn encode_field(field: &TaskField) -> Value {
    match field {
        TaskField::Status(status) => Value::string(status.as_str()),
        TaskField::Title(title) => Value::string(title),
        TaskField::Important(important) => Value::boolean(*important),
    }
}

/// Reads a task out of a Firestore document.
///
/// `status` must be `todo` or `done`; a missing `title` reads as empty and
/// missing `createdAt`, `important` and `order` stay unset.
pub fn decode_document(document: &Document) -> Result<TaskDocument, StoreError> {
    let id = document.id().to_string();
    let field = |name: &str| document.fields.get(name);

    let status = field("status")
        .and_then(|value| value.string_value.as_deref())
        .ok_or_else(|| StoreError::Malformed {
            id: id.clone(),
            reason: "missing status".to_string(),
        })?
        .parse::<TaskStatus>()
        .map_err(|reason| StoreError::Malformed { id: id.clone(), reason })?;

    Ok(TaskDocument {
        title: field("title").and_then(|value| value.string_value.clone()).unwrap_or_default(),
        status,
        created_at: field("createdAt")
            .and_then(|value| value.timestamp_value.as_deref())
            .and_then(Timestamp::parse_rfc3339),
        important: field("important").and_then(|value| value.boolean_value),
        order: field("order").and_then(Value::as_i64),
        id,
    })
}

#[derive(Clone)]
pub struct FirestoreStore {
    client: Client,
    base_url: String,
    database: String,
    api_key: String,
    revision: Arc<watch::Sender<u64>>,
}

impl FirestoreStore {
    /// A store for the configured project, on the emulator when `emulator_host` is given.
    pub fn new(config: FirebaseConfig, emulator_host: Option<&str>) -> Result<Self, StoreError> {
        let base_url = match emulator_host {
            Some(host) => format!("http://{}/v1", host),
            None => FIRESTORE_URL.to_string(),
        };
        Self::with_base_url(config, base_url)
    }

    pub fn with_base_url(config: FirebaseConfig, base_url: impl Into<String>) -> Result<Self, StoreError> {
        let (revision, _) = watch::channel(0);
        Ok(FirestoreStore {
            client: Client::builder().build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            database: format!("projects/{}/databases/(default)", config.project_id),
            api_key: config.api_key,
            revision: Arc::new(revision),
        })
    }

    /// `projects/{p}/databases/(default)/documents/users/user-123`
    fn parent(&self) -> String {
        format!("{}/documents/users/{}", self.database, USER_ID)
    }

    fn document_name(&self, id: &str) -> String {
        format!("{}/{}/{}", self.parent(), TASKS_COLLECTION, id)
    }

    fn collection_url(&self) -> String {
        format!("{}/{}/{}", self.base_url, self.parent(), TASKS_COLLECTION)
    }

    fn document_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, self.document_name(id))
    }

    fn bump(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }

    async fn check(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => envelope.error.message,
            Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
        };
        Err(StoreError::Remote {
            status: status.as_u16(),
            message,
        })
    }
}

impl DocumentStore for FirestoreStore {
    async fn list(&self) -> Result<Vec<TaskDocument>, StoreError> {
        let url = format!("{}/{}:runQuery", self.base_url, self.parent());
        let query = json!({
            "structuredQuery": {
                "from": [{ "collectionId": TASKS_COLLECTION }],
                "orderBy": [{ "field": { "fieldPath": "createdAt" }, "direction": "DESCENDING" }],
            }
        });

        let response = self.client.post(&url).query(&[("key", &self.api_key)]).json(&query).send().await?;
        let results: Vec<QueryResult> = Self::check(response).await?.json().await?;

        results
            .iter()
            .filter_map(|result| result.document.as_ref())
            .map(decode_document)
            .collect()
    }

    async fn create(&self, task: NewTask) -> Result<String, StoreError> {
        let body = Document {
            name: String::new(),
            fields: encode_new_task(&task),
        };

        let response = self
            .client
            .post(self.collection_url())
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()
            .await?;
        let created: Document = Self::check(response).await?.json().await?;
        self.bump();

        Ok(created.id().to_string())
    }

    async fn update(&self, id: &str, field: TaskField) -> Result<(), StoreError> {
        let mut fields = Fields::new();
        fields.insert(field.path().to_string(), encode_field(&field));
        let body = Document {
            name: String::new(),
            fields,
        };

        let response = self
            .client
            .patch(self.document_url(id))
            .query(&[
                ("updateMask.fieldPaths", field.path()),
                ("currentDocument.exists", "true"),
                ("key", self.api_key.as_str()),
            ])
            .json(&body)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Self::check(response).await?;
        self.bump();

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.document_url(id))
            .query(&[("key", &self.api_key)])
            .send()
            .await?;
        Self::check(response).await?;
        self.bump();

        Ok(())
    }

    async fn commit_orders(&self, writes: &[OrderWrite]) -> Result<(), StoreError> {
        if writes.is_empty() {
            return Ok(());
        }

        let writes: Vec<serde_json::Value> = writes
            .iter()
            .map(|write| {
                json!({
                    "update": {
                        "name": self.document_name(&write.id),
                        "fields": { "order": Value::integer(write.order) },
                    },
                    "updateMask": { "fieldPaths": ["order"] },
                    "currentDocument": { "exists": true },
                })
            })
            .collect();
        let url = format!("{}/{}/documents:commit", self.base_url, self.database);

        let response = self
            .client
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(&json!({ "writes": writes }))
            .send()
            .await?;
        Self::check(response).await?;
        self.bump();

        Ok(())
    }

    fn changes(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_rest_document() {
        let document: Document = serde_json::from_value(json!({
            "name": "projects/demo/databases/(default)/documents/users/user-123/tasks/abc123",
            "fields": {
                "title": { "stringValue": "Write report" },
                "status": { "stringValue": "done" },
                "createdAt": { "timestampValue": "2024-01-15T15:45:00.250Z" },
                "important": { "booleanValue": true },
                "order": { "integerValue": "3" },
                "tags": { "arrayValue": {} }
            },
            "createTime": "2024-01-15T15:45:00.300Z"
        }))
        .unwrap();

        let task = decode_document(&document).unwrap();
        assert_eq!(task.id, "abc123");
        assert_eq!(task.title, "Write report");
        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(task.created_at, Some(Timestamp::new(1_705_333_500, 250_000_000)));
        assert_eq!(task.important, Some(true));
        assert_eq!(task.order, Some(3));
    }

    #[test]
    fn optional_fields_stay_unset() {
        let document: Document = serde_json::from_value(json!({
            "name": "projects/demo/databases/(default)/documents/users/user-123/tasks/x",
            "fields": { "title": { "stringValue": "Bare" }, "status": { "stringValue": "todo" } }
        }))
        .unwrap();

        let task = decode_document(&document).unwrap();
        assert_eq!(task.created_at, None);
        assert_eq!(task.important, None);
        assert_eq!(task.order, None);
    }

    #[test]
    fn invalid_status_is_malformed() {
        let document: Document = serde_json::from_value(json!({
            "name": "projects/demo/databases/(default)/documents/users/user-123/tasks/x",
            "fields": { "status": { "stringValue": "archived" } }
        }))
        .unwrap();

        assert!(matches!(decode_document(&document), Err(StoreError::Malformed { .. })));
    }

    #[test]
    fn new_task_uses_typed_values() {
        let task = NewTask {
            title: "Ship it".to_string(),
            status: TaskStatus::Todo,
            created_at: Timestamp::new(1_705_333_500, 0),
            important: false,
        };

        let json = serde_json::to_value(encode_new_task(&task)).unwrap();
        assert_eq!(
            json,
            json!({
                "createdAt": { "timestampValue": "2024-01-15T15:45:00.000000000Z" },
                "important": { "booleanValue": false },
                "status": { "stringValue": "todo" },
                "title": { "stringValue": "Ship it" }
            })
        );
        assert_eq!(serde_json::to_value(Value::integer(7)).unwrap(), json!({ "integerValue": "7" }));
    }

    #[test]
    fn whole_doubles_read_as_integers() {
        let value = Value {
            double_value: Some(2.0),
            ..Default::default()
        };
        assert_eq!(value.as_i64(), Some(2));
        assert_eq!(Value { double_value: Some(2.5), ..Default::default() }.as_i64(), None);
    }
}
