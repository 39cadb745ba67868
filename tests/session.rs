#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;
    use taskdeck::api::TaskStore;
    use taskdeck::libs::error::TaskError;
    use taskdeck::libs::task::{NewTask, Priority, Status, Task, TaskUpdate};
    use taskdeck::tui::controller::Mode;
    use taskdeck::tui::Session;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        List(u32, u32),
        Create(String),
        Update(i64, TaskUpdate),
        Delete(i64),
    }

    #[derive(Debug, Clone, Copy)]
    enum Failure {
        Rejected,
        Unavailable,
    }

    impl Failure {
        fn error(self) -> TaskError {
            match self {
                Failure::Rejected => TaskError::Validation("name is too long".to_string()),
                Failure::Unavailable => TaskError::UnexpectedStatus(500, "database is locked".to_string()),
            }
        }
    }

    /// In-memory store that records every call it receives.
    #[derive(Default)]
    struct FakeStore {
        tasks: Mutex<Vec<Task>>,
        calls: Mutex<Vec<Call>>,
        next_id: Mutex<i64>,
        fail_list: AtomicBool,
        mutation_failure: Mutex<Option<Failure>>,
    }

    impl FakeStore {
        fn with_tasks(tasks: Vec<Task>) -> Self {
            let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
            FakeStore {
                tasks: Mutex::new(tasks),
                next_id: Mutex::new(next_id),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn mutations(&self) -> Vec<Call> {
            self.calls().into_iter().filter(|c| !matches!(c, Call::List(..))).collect()
        }

        fn remove(&self, id: i64) {
            self.tasks.lock().unwrap().retain(|t| t.id != id);
        }

        fn set_list_failing(&self, failing: bool) {
            self.fail_list.store(failing, Ordering::SeqCst);
        }

        fn fail_mutations(&self, failure: Failure) {
            *self.mutation_failure.lock().unwrap() = Some(failure);
        }

        fn injected(&self) -> Result<(), TaskError> {
            match *self.mutation_failure.lock().unwrap() {
                Some(failure) => Err(failure.error()),
                None => Ok(()),
            }
        }
    }

    impl TaskStore for FakeStore {
        async fn list_tasks(&self, offset: u32, limit: u32) -> Result<Vec<Task>, TaskError> {
            self.calls.lock().unwrap().push(Call::List(offset, limit));
            if self.fail_list.load(Ordering::SeqCst) {
                return Err(TaskError::UnexpectedStatus(500, "database is locked".to_string()));
            }
            let tasks = self.tasks.lock().unwrap();
            Ok(tasks.iter().skip(offset as usize).take(limit as usize).cloned().collect())
        }

        async fn create_task(&self, task: &NewTask) -> Result<Task, TaskError> {
            self.calls.lock().unwrap().push(Call::Create(task.name.clone()));
            self.injected()?;
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let created = Task {
                id: *next_id,
                name: task.name.clone(),
                priority: task.priority,
                date: task.date.clone(),
                status: Status::New,
            };
            self.tasks.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn update_task(&self, id: i64, update: &TaskUpdate) -> Result<Task, TaskError> {
            self.calls.lock().unwrap().push(Call::Update(id, update.clone()));
            self.injected()?;
            let mut tasks = self.tasks.lock().unwrap();
            let task = tasks.iter_mut().find(|t| t.id == id).ok_or(TaskError::NotFound(id))?;
            update.apply(task);
            Ok(task.clone())
        }

        async fn delete_task(&self, id: i64) -> Result<(), TaskError> {
            self.calls.lock().unwrap().push(Call::Delete(id));
            self.injected()?;
            let mut tasks = self.tasks.lock().unwrap();
            let before = tasks.len();
            tasks.retain(|t| t.id != id);
            if tasks.len() == before {
                return Err(TaskError::NotFound(id));
            }
            Ok(())
        }
    }

    fn task(id: i64, name: &str, status: Status) -> Task {
        Task {
            id,
            name: name.to_string(),
            priority: Priority::Normal,
            date: "Mar 4".to_string(),
            status,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn type_text(session: &mut Session<FakeStore>, text: &str) {
        for c in text.chars() {
            assert!(!session.handle_key(key(KeyCode::Char(c))).await);
        }
    }

    #[tokio::test]
    async fn test_add_flow_creates_task() {
        let mut session = Session::new(FakeStore::default());
        session.sync().await;

        session.handle_key(key(KeyCode::Char('a'))).await;
        type_text(&mut session, "Buy milk").await;
        session.handle_key(key(KeyCode::Enter)).await;
        type_text(&mut session, "h").await;
        session.handle_key(key(KeyCode::Enter)).await;

        assert_eq!(session.store().mutations(), vec![Call::Create("Buy milk".to_string())]);
        assert_eq!(session.controller().status(), Some("Task 'Buy milk' created"));

        session.sync().await;
        let tasks = session.controller().tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].priority, Priority::High);
    }

    #[tokio::test]
    async fn test_complete_skips_completed_task() {
        let store = FakeStore::with_tasks(vec![task(1, "Open", Status::New), task(2, "Done", Status::Completed)]);
        let mut session = Session::new(store);
        session.sync().await;

        // Completing the first row moves the cursor onto the completed one
        session.handle_key(key(KeyCode::Char(' '))).await;
        assert_eq!(session.controller().cursor(), 1);
        session.handle_key(key(KeyCode::Char(' '))).await;

        assert_eq!(session.store().mutations(), vec![Call::Update(1, TaskUpdate::complete())]);
    }

    #[tokio::test]
    async fn test_delete_last_row_clamps_cursor() {
        let store = FakeStore::with_tasks(vec![task(1, "A", Status::New), task(2, "B", Status::New), task(3, "C", Status::New)]);
        let mut session = Session::new(store);
        session.controller_mut().set_viewport_height(10);
        session.sync().await;

        session.handle_key(key(KeyCode::Down)).await;
        session.handle_key(key(KeyCode::Down)).await;
        session.handle_key(key(KeyCode::Delete)).await;
        session.sync().await;

        assert_eq!(session.store().mutations(), vec![Call::Delete(3)]);
        assert_eq!(session.controller().tasks().len(), 2);
        assert_eq!(session.controller().cursor(), 1);
        assert_eq!(session.controller().selected().map(|t| t.id), Some(2));
    }

    #[tokio::test]
    async fn test_vanished_task_becomes_status() {
        let store = FakeStore::with_tasks(vec![task(7, "Ghost", Status::New)]);
        let mut session = Session::new(store);
        session.sync().await;

        // Deleted elsewhere between the fetch and the key press
        session.store().remove(7);
        let quit = session.handle_key(key(KeyCode::Char(' '))).await;

        assert!(!quit);
        assert_eq!(session.controller().status(), Some("Task not found"));
        session.sync().await;
        assert!(session.controller().tasks().is_empty());
        assert_eq!(session.controller().cursor(), 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_shows_empty_list() {
        let store = FakeStore::with_tasks(vec![task(1, "Hidden", Status::New)]);
        store.set_list_failing(true);
        let mut session = Session::new(store);
        session.sync().await;

        assert!(session.controller().tasks().is_empty());
        let status = session.controller().status().unwrap();
        assert!(status.starts_with("Could not load tasks"));
        assert!(status.contains("database is locked"));
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_cursor() {
        let store = FakeStore::with_tasks(vec![task(1, "A", Status::New), task(2, "B", Status::New), task(3, "C", Status::New)]);
        store.fail_mutations(Failure::Unavailable);
        let mut session = Session::new(store);
        session.controller_mut().set_viewport_height(10);
        session.sync().await;

        session.handle_key(key(KeyCode::Down)).await;
        session.handle_key(key(KeyCode::Down)).await;
        session.handle_key(key(KeyCode::Delete)).await;

        assert_eq!(session.store().mutations(), vec![Call::Delete(3)]);
        assert!(session.controller().status().unwrap().starts_with("Request failed"));

        session.sync().await;
        assert_eq!(session.controller().tasks().len(), 3);
        assert_eq!(session.controller().cursor(), 2);
        assert_eq!(session.controller().selected().map(|t| t.id), Some(3));
    }

    #[tokio::test]
    async fn test_rejected_create_becomes_status() {
        let store = FakeStore::default();
        store.fail_mutations(Failure::Rejected);
        let mut session = Session::new(store);
        session.sync().await;

        session.handle_key(key(KeyCode::Char('a'))).await;
        type_text(&mut session, "Buy milk").await;
        session.handle_key(key(KeyCode::Enter)).await;
        type_text(&mut session, "n").await;
        session.handle_key(key(KeyCode::Enter)).await;

        assert_eq!(session.store().mutations(), vec![Call::Create("Buy milk".to_string())]);
        assert_eq!(session.controller().status(), Some("Request failed: name is too long"));
        assert_eq!(session.controller().mode(), &Mode::Browsing);

        session.sync().await;
        assert!(session.controller().tasks().is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_update_becomes_status() {
        let store = FakeStore::with_tasks(vec![task(1, "Open", Status::New)]);
        store.fail_mutations(Failure::Unavailable);
        let mut session = Session::new(store);
        session.sync().await;

        let quit = session.handle_key(key(KeyCode::Char(' '))).await;

        assert!(!quit);
        assert_eq!(session.store().mutations(), vec![Call::Update(1, TaskUpdate::complete())]);
        let status = session.controller().status().unwrap();
        assert!(status.starts_with("Request failed"));
        assert!(status.contains("database is locked"));

        // The status line clears on the next key press
        session.handle_key(key(KeyCode::Up)).await;
        assert_eq!(session.controller().status(), None);
    }

    #[tokio::test]
    async fn test_fetch_outage_keeps_place() {
        let tasks: Vec<Task> = (1..=4).map(|id| task(id, &format!("Task {}", id), Status::New)).collect();
        let mut session = Session::new(FakeStore::with_tasks(tasks));
        session.controller_mut().set_viewport_height(10);
        session.sync().await;
        session.handle_key(key(KeyCode::Down)).await;
        session.handle_key(key(KeyCode::Down)).await;

        session.store().set_list_failing(true);
        session.sync().await;
        assert!(session.controller().tasks().is_empty());

        session.store().set_list_failing(false);
        session.sync().await;
        assert_eq!(session.controller().cursor(), 2);
        assert_eq!(session.controller().selected().map(|t| t.id), Some(3));
    }

    #[tokio::test]
    async fn test_edit_without_changes_sends_nothing() {
        let mut session = Session::new(FakeStore::with_tasks(vec![task(1, "Same", Status::New)]));
        session.sync().await;

        session.handle_key(key(KeyCode::Char('u'))).await;
        session.handle_key(key(KeyCode::Enter)).await;
        session.handle_key(key(KeyCode::Enter)).await;

        assert!(session.store().mutations().is_empty());
        assert_eq!(session.controller().status(), Some("No changes detected."));
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let mut session = Session::new(FakeStore::default());
        assert!(session.handle_key(key(KeyCode::Char('q'))).await);
        assert!(session.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)).await);
    }

    #[tokio::test]
    async fn test_fetch_all_pages_through_collection() {
        let tasks: Vec<Task> = (1..=250).map(|id| task(id, &format!("Task {}", id), Status::New)).collect();
        let store = FakeStore::with_tasks(tasks);

        let fetched = store.fetch_all().await.unwrap();

        assert_eq!(fetched.len(), 250);
        assert_eq!(fetched.last().map(|t| t.id), Some(250));
        assert_eq!(store.calls(), vec![Call::List(0, 100), Call::List(100, 100), Call::List(200, 100)]);
    }

    #[tokio::test]
    async fn test_fetch_all_exact_page_boundary() {
        let tasks: Vec<Task> = (1..=100).map(|id| task(id, "Task", Status::New)).collect();
        let store = FakeStore::with_tasks(tasks);

        assert_eq!(store.fetch_all().await.unwrap().len(), 100);
        assert_eq!(store.calls(), vec![Call::List(0, 100), Call::List(100, 100)]);
    }
}
