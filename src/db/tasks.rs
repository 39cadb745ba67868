use crate::libs::error::TaskError;
use crate::libs::messages::Message;
use crate::libs::task::{NewTask, Priority, Status, Task, TaskUpdate};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Largest page `list` will return in one call.
pub const MAX_PAGE_SIZE: u32 = 100;

const SELECT_TASKS: &str = "SELECT id, name, priority, date, status FROM tasks ORDER BY id LIMIT ?1 OFFSET ?2";
const SELECT_TASK: &str = "SELECT id, name, priority, date, status FROM tasks WHERE id = ?1";
const INSERT_TASK: &str = "INSERT INTO tasks (name, priority, date, status) VALUES (?1, ?2, ?3, ?4)";
const UPDATE_TASK: &str = "UPDATE tasks SET name = ?1, priority = ?2, date = ?3, status = ?4 WHERE id = ?5";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";

impl ToSql for Priority {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Priority {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str()?.parse().map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

impl ToSql for Status {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Status {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str()?.parse().map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        name: row.get(1)?,
        priority: row.get(2)?,
        date: row.get(3)?,
        status: row.get(4)?,
    })
}

/// Task repository bound to a single connection.
///
/// Each mutating call runs in its own transaction and commits before
/// returning, so the next `list` on any connection observes it.
pub struct Tasks {
    conn: Connection,
}

impl Tasks {
    pub fn new(conn: Connection) -> Self {
        Tasks { conn }
    }

    /// Returns up to `limit` tasks in insertion order, skipping `offset`.
    ///
    /// An offset past the end yields an empty page. A `limit` above
    /// [`MAX_PAGE_SIZE`] is rejected.
    pub fn list(&self, offset: u32, limit: u32) -> Result<Vec<Task>, TaskError> {
        if limit > MAX_PAGE_SIZE {
            return Err(TaskError::Validation(Message::PageLimitExceeded(limit, MAX_PAGE_SIZE).to_string()));
        }

        let mut stmt = self.conn.prepare(SELECT_TASKS)?;
        let tasks = stmt.query_map(params![limit, offset], task_from_row)?.collect::<Result<Vec<_>, _>>()?;

        Ok(tasks)
    }

    pub fn get(&self, id: i64) -> Result<Option<Task>, TaskError> {
        Ok(self.conn.query_row(SELECT_TASK, params![id], task_from_row).optional()?)
    }

    /// Stores a new task and returns it with the assigned id.
    pub fn insert(&mut self, task: &NewTask) -> Result<Task, TaskError> {
        let tx = self.conn.transaction()?;
        tx.execute(INSERT_TASK, params![task.name, task.priority, task.date, Status::New])?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Task {
            id,
            name: task.name.clone(),
            priority: task.priority,
            date: task.date.clone(),
            status: Status::New,
        })
    }

    /// Applies the fields present in `update` and returns the stored record.
    pub fn update(&mut self, id: i64, update: &TaskUpdate) -> Result<Task, TaskError> {
        let tx = self.conn.transaction()?;
        let mut task = tx.query_row(SELECT_TASK, params![id], task_from_row).optional()?.ok_or(TaskError::NotFound(id))?;

        if task.is_completed() && update.status == Some(Status::New) {
            return Err(TaskError::Validation(Message::TaskCannotReopen(id).to_string()));
        }

        update.apply(&mut task);
        tx.execute(UPDATE_TASK, params![task.name, task.priority, task.date, task.status, task.id])?;
        tx.commit()?;

        Ok(task)
    }

    pub fn delete(&mut self, id: i64) -> Result<(), TaskError> {
        let tx = self.conn.transaction()?;
        let deleted = tx.execute(DELETE_TASK, params![id])?;
        if deleted == 0 {
            return Err(TaskError::NotFound(id));
        }
        tx.commit()?;

        Ok(())
    }
}
