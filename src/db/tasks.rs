//! SQLite-backed document store.
//!
//! Each task document is one row scoped by `user_id`. Statements run on the
//! blocking pool behind a shared connection; clones of a [`LocalStore`] share
//! both the connection and the change revision.

use super::db::Db;
use super::store::{DocumentStore, NewTask, OrderWrite, StoreError, TaskDocument, TaskField, USER_ID};
use crate::libs::task::TaskStatus;
use crate::libs::timestamp::Timestamp;
use parking_lot::Mutex;
use rand::distr::Alphanumeric;
use rand::Rng;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::watch;

const ID_LENGTH: usize = 20;

const SELECT_TASKS: &str = "SELECT id, title, status, created_seconds, created_nanos, important, sort_order FROM tasks
    WHERE user_id = ?1 ORDER BY created_seconds DESC, created_nanos DESC";
const INSERT_TASK: &str = "INSERT INTO tasks (id, user_id, title, status, created_seconds, created_nanos, important, sort_order)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, NULL)";
const UPDATE_STATUS: &str = "UPDATE tasks SET status = ?1 WHERE user_id = ?2 AND id = ?3";
const UPDATE_TITLE: &str = "UPDATE tasks SET title = ?1 WHERE user_id = ?2 AND id = ?3";
const UPDATE_IMPORTANT: &str = "UPDATE tasks SET important = ?1 WHERE user_id = ?2 AND id = ?3";
const UPDATE_ORDER: &str = "UPDATE tasks SET sort_order = ?1 WHERE user_id = ?2 AND id = ?3";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE user_id = ?1 AND id = ?2";

/// A 20-character alphanumeric id, the same shape Firestore assigns.
pub fn generate_id() -> String {
    rand::rng().sample_iter(&Alphanumeric).take(ID_LENGTH).map(char::from).collect()
}

#[derive(Clone)]
pub struct LocalStore {
    conn: Arc<Mutex<Connection>>,
    revision: Arc<watch::Sender<u64>>,
}

impl LocalStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self::from_db(Db::open(path.as_ref())?))
    }

    /// A private database that lives as long as the store.
    pub fn in_memory() -> Result<Self, StoreError> {
        Ok(Self::from_db(Db::in_memory()?))
    }

    fn from_db(db: Db) -> Self {
        let (revision, _) = watch::channel(0);
        LocalStore {
            conn: Arc::new(Mutex::new(db.conn)),
            revision: Arc::new(revision),
        }
    }

    async fn run<T, F>(&self, job: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut conn = conn.lock();
            job(&mut conn)
        })
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?
    }

    fn bump(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }
}

struct Row {
    id: String,
    title: String,
    status: String,
    created_seconds: Option<i64>,
    created_nanos: Option<u32>,
    important: Option<bool>,
    order: Option<i64>,
}

impl Row {
    fn into_document(self) -> Result<TaskDocument, StoreError> {
        let status: TaskStatus = self.status.parse().map_err(|reason| StoreError::Malformed {
            id: self.id.clone(),
            reason,
        })?;
        let created_at = self
            .created_seconds
            .map(|seconds| Timestamp::new(seconds, self.created_nanos.unwrap_or(0)));

        Ok(TaskDocument {
            id: self.id,
            title: self.title,
            status,
            created_at,
            important: self.important,
            order: self.order,
        })
    }
}

fn select_tasks(conn: &Connection) -> Result<Vec<TaskDocument>, StoreError> {
    let mut stmt = conn.prepare(SELECT_TASKS)?;
    let rows = stmt.query_map(params![USER_ID], |row| {
        Ok(Row {
            id: row.get(0)?,
            title: row.get(1)?,
            status: row.get(2)?,
            created_seconds: row.get(3)?,
            created_nanos: row.get(4)?,
            important: row.get(5)?,
            order: row.get(6)?,
        })
    })?;

    let mut documents = Vec::new();
    for row in rows {
        documents.push(row?.into_document()?);
    }

    Ok(documents)
}

impl DocumentStore for LocalStore {
    async fn list(&self) -> Result<Vec<TaskDocument>, StoreError> {
        self.run(|conn| select_tasks(conn)).await
    }

    async fn create(&self, task: NewTask) -> Result<String, StoreError> {
        let id = generate_id();
        let row_id = id.clone();
        self.run(move |conn| {
            conn.execute(
                INSERT_TASK,
                params![
                    row_id,
                    USER_ID,
                    task.title,
                    task.status.as_str(),
                    task.created_at.seconds,
                    task.created_at.nanoseconds,
                    task.important
                ],
            )?;
            Ok(())
        })
        .await?;
        self.bump();

        Ok(id)
    }

    async fn update(&self, id: &str, field: TaskField) -> Result<(), StoreError> {
        let id = id.to_string();
        self.run(move |conn| {
            let changed = match &field {
                TaskField::Status(status) => conn.execute(UPDATE_STATUS, params![status.as_str(), USER_ID, id])?,
                TaskField::Title(title) => conn.execute(UPDATE_TITLE, params![title, USER_ID, id])?,
                TaskField::Important(important) => conn.execute(UPDATE_IMPORTANT, params![important, USER_ID, id])?,
            };
            if changed == 0 {
                return Err(StoreError::NotFound(id));
            }
            Ok(())
        })
        .await?;
        self.bump();

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let id = id.to_string();
        self.run(move |conn| {
            conn.execute(DELETE_TASK, params![USER_ID, id])?;
            Ok(())
        })
        .await?;
        self.bump();

        Ok(())
    }

    async fn commit_orders(&self, writes: &[OrderWrite]) -> Result<(), StoreError> {
        let writes = writes.to_vec();
        self.run(move |conn| {
            // Dropping the transaction on an early return rolls it back.
            let tx = conn.transaction()?;
            for write in &writes {
                if tx.execute(UPDATE_ORDER, params![write.order, USER_ID, write.id])? == 0 {
                    return Err(StoreError::NotFound(write.id.clone()));
                }
            }
            tx.commit()?;
            Ok(())
        })
        .await?;
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
    fn generated_ids_are_twenty_alphanumerics() {
        let id = generate_id();
        assert_eq!(id.len(), 20);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(id, generate_id());
    }

    #[tokio::test]
    async fn unknown_status_is_reported_as_malformed() {
        let store = LocalStore::in_memory().unwrap();
        store
            .run(|conn| {
                conn.execute(
                    "INSERT INTO tasks (id, user_id, title, status) VALUES ('x', ?1, 'Broken', 'archived')",
                    params![USER_ID],
                )?;
                Ok(())
            })
            .await
            .unwrap();

        let error = store.list().await.unwrap_err();
        assert!(matches!(error, StoreError::Malformed { ref id, .. } if id == "x"));
    }
}
