#[cfg(test)]
mod tests {
    use taskdeck::db::db::Db;
    use taskdeck::db::migrations::{get_db_version, needs_migration, MigrationManager};
    use taskdeck::libs::error::{ErrorKind, TaskError};
    use taskdeck::libs::task::{NewTask, Priority, Status, TaskUpdate};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct TaskTestContext {
        _temp_dir: TempDir,
        db: Db,
    }

    impl TestContext for TaskTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::new(temp_dir.path().join("task.db"));
            db.migrate().unwrap();
            TaskTestContext { _temp_dir: temp_dir, db }
        }
    }

    fn new_task(name: &str, priority: Priority) -> NewTask {
        NewTask {
            name: name.to_string(),
            priority,
            date: "Mar 4".to_string(),
        }
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_insert_then_list(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.db.tasks().unwrap();

        let created = tasks.insert(&new_task("Buy milk", Priority::Normal)).unwrap();
        assert!(created.id > 0);
        assert_eq!(created.status, Status::New);

        // A fresh connection sees the committed row
        let listed = ctx.db.tasks().unwrap().list(0, 100).unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_ids_are_never_reused(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.db.tasks().unwrap();

        let first = tasks.insert(&new_task("One", Priority::Normal)).unwrap();
        tasks.delete(first.id).unwrap();
        let second = tasks.insert(&new_task("Two", Priority::Normal)).unwrap();

        assert!(second.id > first.id);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_partial_update_keeps_other_fields(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.db.tasks().unwrap();
        let created = tasks.insert(&new_task("Buy milk", Priority::Normal)).unwrap();

        let update = TaskUpdate {
            priority: Some(Priority::High),
            ..Default::default()
        };
        let updated = tasks.update(created.id, &update).unwrap();

        assert_eq!(updated.name, "Buy milk");
        assert_eq!(updated.priority, Priority::High);
        assert_eq!(updated.date, "Mar 4");
        assert_eq!(updated.status, Status::New);
        assert_eq!(tasks.get(created.id).unwrap(), Some(updated));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_complete_then_reopen_is_rejected(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.db.tasks().unwrap();
        let created = tasks.insert(&new_task("Ship it", Priority::High)).unwrap();

        let completed = tasks.update(created.id, &TaskUpdate::complete()).unwrap();
        assert!(completed.is_completed());

        let reopen = TaskUpdate {
            status: Some(Status::New),
            ..Default::default()
        };
        let err = tasks.update(created.id, &reopen).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(tasks.get(created.id).unwrap().unwrap().is_completed());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_unknown_id(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.db.tasks().unwrap();

        let err = tasks.update(42, &TaskUpdate::complete()).unwrap_err();
        assert!(matches!(err, TaskError::NotFound(42)));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_delete_twice(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.db.tasks().unwrap();
        let created = tasks.insert(&new_task("Temp", Priority::Normal)).unwrap();

        tasks.delete(created.id).unwrap();
        let err = tasks.delete(created.id).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(tasks.list(0, 100).unwrap().is_empty());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_list_pagination(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.db.tasks().unwrap();
        for i in 1..=5 {
            tasks.insert(&new_task(&format!("Task {}", i), Priority::Normal)).unwrap();
        }

        let page = tasks.list(1, 2).unwrap();
        let names: Vec<&str> = page.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Task 2", "Task 3"]);

        assert!(tasks.list(10, 100).unwrap().is_empty());
        assert!(tasks.list(0, 0).unwrap().is_empty());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_list_limit_above_maximum(ctx: &mut TaskTestContext) {
        let tasks = ctx.db.tasks().unwrap();

        let err = tasks.list(0, 101).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(tasks.list(0, 100).is_ok());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_migrations_are_idempotent(ctx: &mut TaskTestContext) {
        ctx.db.migrate().unwrap();

        let conn = ctx.db.open().unwrap();
        assert_eq!(get_db_version(&conn).unwrap(), 1);
        assert!(!needs_migration(&conn).unwrap());
        assert!(MigrationManager::new().is_migration_applied(&conn, 1).unwrap());
    }

    #[test]
    fn test_fresh_database_needs_migration() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db = Db::new(temp_dir.path().join("fresh.db"));

        let conn = db.open().unwrap();
        assert_eq!(get_db_version(&conn).unwrap(), 0);
        assert!(needs_migration(&conn).unwrap());
    }
}
