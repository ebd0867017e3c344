#[cfg(test)]
mod tests {
    use axum::body::Bytes;
    use axum::extract::State;
    use axum::http::{Method, StatusCode, Uri};
    use axum::{Json, Router};
    use parking_lot::Mutex;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use taskboard::api::firestore::FirestoreStore;
    use taskboard::db::database::Backend;
    use taskboard::db::store::{DocumentStore, NewTask, OrderWrite, StoreError, TaskField};
    use taskboard::libs::config::{FirebaseConfig, FirebaseSettings, Settings, StorageMode};
    use taskboard::libs::task::TaskStatus;
    use tokio::net::TcpListener;

    const DOCS: &str = "projects/demo/databases/(default)/documents/users/user-123";

    type Reply = dyn Fn(&Method, &str) -> (StatusCode, Value) + Send + Sync;

    #[derive(Debug, Clone)]
    struct Recorded {
        method: Method,
        path: String,
        query: String,
        body: Value,
    }

    #[derive(Clone)]
    struct Stub {
        requests: Arc<Mutex<Vec<Recorded>>>,
        reply: Arc<Reply>,
    }

    async fn record(State(stub): State<Stub>, method: Method, uri: Uri, body: Bytes) -> (StatusCode, Json<Value>) {
        let path = uri.path().to_string();
        let (status, reply) = (stub.reply)(&method, &path);
        stub.requests.lock().push(Recorded {
            method,
            path,
            query: uri.query().unwrap_or_default().to_string(),
            body: serde_json::from_slice(&body).unwrap_or(Value::Null),
        });
        (status, Json(reply))
    }

    /// A Firestore stand-in on an ephemeral port; returns its `host:port`.
    async fn stub<F>(reply: F) -> (String, Arc<Mutex<Vec<Recorded>>>)
    where
        F: Fn(&Method, &str) -> (StatusCode, Value) + Send + Sync + 'static,
    {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = Stub {
            requests: Arc::clone(&requests),
            reply: Arc::new(reply),
        };
        let app = Router::new().fallback(record).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (address.to_string(), requests)
    }

    fn config() -> FirebaseConfig {
        FirebaseConfig {
            api_key: "secret".to_string(),
            auth_domain: "demo.firebaseapp.com".to_string(),
            project_id: "demo".to_string(),
            storage_bucket: "demo.appspot.com".to_string(),
            messaging_sender_id: "1234".to_string(),
            app_id: "1:1234:web:abcd".to_string(),
        }
    }

    fn task_document(id: &str, title: &str, created_at: &str) -> Value {
        json!({
            "name": format!("{}/tasks/{}", DOCS, id),
            "fields": {
                "title": { "stringValue": title },
                "status": { "stringValue": "todo" },
                "createdAt": { "timestampValue": created_at },
                "important": { "booleanValue": false }
            },
            "createTime": created_at,
            "updateTime": created_at
        })
    }

    fn ok(_: &Method, _: &str) -> (StatusCode, Value) {
        (StatusCode::OK, json!({}))
    }

    fn last(requests: &Arc<Mutex<Vec<Recorded>>>) -> Recorded {
        requests.lock().last().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_list_runs_an_ordered_query() {
        let (host, requests) = stub(|_, _| {
            (
                StatusCode::OK,
                json!([
                    { "document": task_document("b", "Second", "2024-01-15T16:00:00Z"), "readTime": "2024-01-15T16:01:00Z" },
                    { "document": task_document("a", "First", "2024-01-15T15:00:00Z"), "readTime": "2024-01-15T16:01:00Z" },
                    { "readTime": "2024-01-15T16:01:00Z" }
                ]),
            )
        })
        .await;
        let store = FirestoreStore::new(config(), Some(&host)).unwrap();

        let tasks = store.list().await.unwrap();
        let ids: Vec<&str> = tasks.iter().map(|task| task.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(tasks[1].title, "First");

        let request = last(&requests);
        assert_eq!(request.method, Method::POST);
        assert!(request.path.starts_with("/v1/projects/demo/databases/"));
        assert!(request.path.ends_with("/documents/users/user-123:runQuery"));
        assert_eq!(request.query, "key=secret");
        assert_eq!(request.body["structuredQuery"]["from"][0]["collectionId"], "tasks");
        assert_eq!(request.body["structuredQuery"]["orderBy"][0]["field"]["fieldPath"], "createdAt");
        assert_eq!(request.body["structuredQuery"]["orderBy"][0]["direction"], "DESCENDING");
    }

    #[tokio::test]
    async fn test_create_posts_typed_fields() {
        let (host, requests) = stub(|_, _| (StatusCode::OK, task_document("generated", "Buy milk", "2024-01-15T15:45:00Z"))).await;
        let store = FirestoreStore::new(config(), Some(&host)).unwrap();
        let mut changes = store.changes();

        let id = store.create(NewTask::titled("Buy milk")).await.unwrap();
        assert_eq!(id, "generated");
        assert!(changes.has_changed().unwrap());
        changes.borrow_and_update();

        let request = last(&requests);
        assert_eq!(request.method, Method::POST);
        assert!(request.path.ends_with("/documents/users/user-123/tasks"));
        let fields = &request.body["fields"];
        assert_eq!(fields["title"], json!({ "stringValue": "Buy milk" }));
        assert_eq!(fields["status"], json!({ "stringValue": "todo" }));
        assert_eq!(fields["important"], json!({ "booleanValue": false }));
        assert!(fields["createdAt"]["timestampValue"].as_str().unwrap().ends_with('Z'));
        assert!(fields.get("order").is_none());
    }

    #[tokio::test]
    async fn test_update_patches_one_field_of_an_existing_document() {
        let (host, requests) = stub(ok).await;
        let store = FirestoreStore::new(config(), Some(&host)).unwrap();

        store.update("abc", TaskField::Status(TaskStatus::Done)).await.unwrap();

        let request = last(&requests);
        assert_eq!(request.method, Method::PATCH);
        assert!(request.path.ends_with("/users/user-123/tasks/abc"));
        assert!(request.query.contains("updateMask.fieldPaths=status"));
        assert!(request.query.contains("currentDocument.exists=true"));
        assert!(request.query.contains("key=secret"));
        assert_eq!(request.body, json!({ "fields": { "status": { "stringValue": "done" } } }));
    }

    #[tokio::test]
    async fn test_update_of_missing_document_is_not_found() {
        let (host, _) = stub(|_, _| {
            (
                StatusCode::NOT_FOUND,
                json!({ "error": { "code": 404, "message": "No document to update", "status": "NOT_FOUND" } }),
            )
        })
        .await;
        let store = FirestoreStore::new(config(), Some(&host)).unwrap();
        let changes = store.changes();

        let error = store.update("ghost", TaskField::Important(true)).await.unwrap_err();
        assert!(matches!(error, StoreError::NotFound(ref id) if id == "ghost"));
        assert!(!changes.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_delete() {
        let (host, requests) = stub(ok).await;
        let store = FirestoreStore::new(config(), Some(&host)).unwrap();

        store.delete("abc").await.unwrap();

        let request = last(&requests);
        assert_eq!(request.method, Method::DELETE);
        assert!(request.path.ends_with("/tasks/abc"));
    }

    #[tokio::test]
    async fn test_commit_orders_is_one_batch() {
        let (host, requests) = stub(ok).await;
        let store = FirestoreStore::new(config(), Some(&host)).unwrap();

        store
            .commit_orders(&[
                OrderWrite { id: "a".to_string(), order: 0 },
                OrderWrite { id: "b".to_string(), order: 1 },
            ])
            .await
            .unwrap();

        assert_eq!(requests.lock().len(), 1);
        let request = last(&requests);
        assert_eq!(request.method, Method::POST);
        assert!(request.path.ends_with("/documents:commit"));

        let writes = request.body["writes"].as_array().unwrap();
        assert_eq!(writes.len(), 2);
        assert!(writes[1]["update"]["name"].as_str().unwrap().ends_with("/users/user-123/tasks/b"));
        assert_eq!(writes[1]["update"]["fields"]["order"], json!({ "integerValue": "1" }));
        assert_eq!(writes[1]["updateMask"]["fieldPaths"], json!(["order"]));
        assert_eq!(writes[1]["currentDocument"]["exists"], true);
    }

    #[tokio::test]
    async fn test_empty_commit_sends_nothing() {
        let (host, requests) = stub(ok).await;
        let store = FirestoreStore::new(config(), Some(&host)).unwrap();

        store.commit_orders(&[]).await.unwrap();
        assert!(requests.lock().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_commit_reports_the_remote_message() {
        let (host, _) = stub(|_, _| {
            (
                StatusCode::NOT_FOUND,
                json!({ "error": { "code": 404, "message": "no entity to update: ghost", "status": "NOT_FOUND" } }),
            )
        })
        .await;
        let store = FirestoreStore::new(config(), Some(&host)).unwrap();

        let error = store
            .commit_orders(&[OrderWrite {
                id: "ghost".to_string(),
                order: 0,
            }])
            .await
            .unwrap_err();
        match error {
            StoreError::Remote { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "no entity to update: ghost");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_backend_connects_to_the_emulator() {
        let (host, requests) = stub(|_, _| (StatusCode::OK, json!([]))).await;
        let settings = Settings {
            storage: StorageMode::Firestore,
            emulator_host: Some(host),
            firebase: FirebaseSettings {
                api_key: Some("secret".to_string()),
                auth_domain: Some("demo.firebaseapp.com".to_string()),
                project_id: Some("demo".to_string()),
                storage_bucket: Some("demo.appspot.com".to_string()),
                messaging_sender_id: Some("1234".to_string()),
                app_id: Some("1:1234:web:abcd".to_string()),
            },
            ..Settings::default()
        };

        let backend = Backend::connect(&settings).await.unwrap();
        assert_eq!(backend.name(), "firestore");
        assert!(backend.list().await.unwrap().is_empty());
        assert_eq!(requests.lock().len(), 1);
    }
}
