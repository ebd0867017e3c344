#[cfg(test)]
mod tests {
    use std::time::Duration;
    use taskboard::db::database::{Backend, Database};
    use taskboard::db::store::{DocumentStore, NewTask, StoreError, TaskDocument, TaskField};
    use taskboard::db::tasks::LocalStore;
    use taskboard::libs::config::{ConfigError, Settings, StorageMode};
    use taskboard::libs::live::{LiveState, LiveTasks, TaskBoard};
    use taskboard::libs::task::{TaskFilter, TaskStatus};
    use taskboard::libs::timestamp::Timestamp;
    use tempfile::TempDir;
    use tokio::time::timeout;

    const WAIT: Duration = Duration::from_secs(5);

    fn document(id: &str, status: TaskStatus, seconds: i64) -> TaskDocument {
        TaskDocument {
            id: id.to_string(),
            title: id.to_string(),
            status,
            created_at: Some(Timestamp::new(seconds, 0)),
            important: None,
            order: None,
        }
    }

    fn firestore_settings() -> Settings {
        Settings {
            storage: StorageMode::Firestore,
            ..Settings::default()
        }
    }

    #[test]
    fn test_board_starts_loading() {
        let board = TaskBoard::new(TaskFilter::All);

        assert_eq!(board.state(), &LiveState::Loading);
        assert!(board.tasks().is_empty());
        assert_eq!(board.counts().all, 0);
    }

    #[test]
    fn test_board_applies_snapshots() {
        let mut board = TaskBoard::new(TaskFilter::Active);
        board.apply(Ok(vec![
            document("b", TaskStatus::Done, 200),
            document("a", TaskStatus::Todo, 100),
            document("c", TaskStatus::Todo, 300),
        ]));

        assert_eq!(board.state(), &LiveState::Ready);
        let counts = board.counts();
        assert_eq!((counts.all, counts.active, counts.completed), (3, 2, 1));
        let visible: Vec<String> = board.visible().into_iter().map(|task| task.id).collect();
        assert_eq!(visible, vec!["c", "a"]);
        assert_eq!(board.find("b").map(|task| task.created_at), Some(200_000));
        assert!(!board.find("a").unwrap().important);

        let completed = TaskBoard::with_tasks(board.tasks().to_vec(), TaskFilter::Completed);
        assert_eq!(completed.visible().len(), 1);

        // A later snapshot replaces the list wholesale.
        board.apply(Ok(vec![document("z", TaskStatus::Todo, 1)]));
        assert_eq!(board.tasks().len(), 1);
        assert!(board.find("a").is_none());
    }

    #[test]
    fn test_board_plan_move_uses_the_current_filter() {
        let mut board = TaskBoard::with_tasks(Vec::new(), TaskFilter::Active);
        board.apply(Ok(vec![
            document("a", TaskStatus::Todo, 300),
            document("b", TaskStatus::Done, 200),
            document("c", TaskStatus::Todo, 100),
        ]));

        let plan = board.plan_move("c", "a").unwrap();
        assert_eq!(plan.task_ids, vec!["c", "b", "a"]);
        assert_eq!(plan.orders, vec![0, 1, 2]);
        assert!(board.plan_move("b", "a").is_none());
    }

    #[test]
    fn test_board_error_messages() {
        let mut board = TaskBoard::new(TaskFilter::All);
        board.apply(Err(StoreError::Malformed {
            id: "x".to_string(),
            reason: "unknown task status 'archived'".to_string(),
        }));
        assert_eq!(board.state(), &LiveState::Failed("Failed to load tasks".to_string()));

        let board = TaskBoard::failed(TaskFilter::All, &StoreError::Config(ConfigError::Incomplete(vec!["FIREBASE_APP_ID"])));
        assert_eq!(board.state(), &LiveState::Failed("Failed to connect to database".to_string()));
    }

    #[tokio::test]
    async fn test_live_tasks_follow_the_store() {
        let store = LocalStore::in_memory().unwrap();
        store.create(NewTask::titled("first")).await.unwrap();
        let database = Database::with_backend(Backend::Local(store.clone()));

        let mut live = LiveTasks::connect(&database, TaskFilter::All, Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(live.board().state(), &LiveState::Loading);

        let board = timeout(WAIT, live.next()).await.unwrap().unwrap();
        assert_eq!(board.state(), &LiveState::Ready);
        assert_eq!(board.tasks().len(), 1);
        let id = board.tasks()[0].id.clone();

        store.update(&id, TaskField::Status(TaskStatus::Done)).await.unwrap();
        let board = timeout(WAIT, live.next()).await.unwrap().unwrap();
        assert_eq!(board.counts().completed, 1);
    }

    #[tokio::test]
    async fn test_live_tasks_connect_reports_config_errors() {
        let database = Database::new(firestore_settings());

        let error = LiveTasks::connect(&database, TaskFilter::All, Duration::from_secs(1))
            .await
            .err()
            .unwrap();
        assert!(matches!(error, StoreError::Config(ConfigError::Incomplete(ref missing)) if missing.len() == 6));
        assert_eq!(
            TaskBoard::failed(TaskFilter::All, &error).state(),
            &LiveState::Failed("Failed to connect to database".to_string())
        );
    }

    #[tokio::test]
    async fn test_database_connects_once() {
        let dir = TempDir::new().unwrap();
        let database = Database::new(Settings {
            db_path: Some(dir.path().join("tasks.db")),
            ..Settings::default()
        });

        let first = database.get().await.unwrap();
        let second = database.get().await.unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.name(), "local");
    }

    #[tokio::test]
    async fn test_database_failure_is_not_memoised() {
        let database = Database::new(firestore_settings());

        for _ in 0..2 {
            let error = database.get().await.err().unwrap();
            assert!(error.to_string().contains("FIREBASE_PROJECT_ID"));
        }
    }
}
