//! Client access to the task store.
//!
//! [`TaskStore`] is the seam between the terminal session and the store:
//! [`client::TaskClient`] implements it over HTTP, and tests substitute an
//! in-memory fake.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskdeck::api::{client::TaskClient, TaskStore};
//!
//! # async fn demo() -> Result<(), taskdeck::libs::error::TaskError> {
//! let client = TaskClient::new("http://127.0.0.1:8000");
//! let tasks = client.fetch_all().await?;
//! println!("{} tasks", tasks.len());
//! # Ok(())
//! # }
//! ```

use crate::db::tasks::MAX_PAGE_SIZE;
use crate::libs::error::TaskError;
use crate::libs::task::{NewTask, Task, TaskUpdate};

pub mod client;

pub use client::TaskClient;

#[allow(async_fn_in_trait)]
pub trait TaskStore {
    /// One page of tasks in storage order.
    async fn list_tasks(&self, offset: u32, limit: u32) -> Result<Vec<Task>, TaskError>;

    async fn create_task(&self, task: &NewTask) -> Result<Task, TaskError>;

    /// Partial update; fails with [`TaskError::NotFound`] for unknown ids.
    async fn update_task(&self, id: i64, update: &TaskUpdate) -> Result<Task, TaskError>;

    async fn delete_task(&self, id: i64) -> Result<(), TaskError>;

    /// The whole collection, paged in chunks of [`MAX_PAGE_SIZE`].
    async fn fetch_all(&self) -> Result<Vec<Task>, TaskError> {
        let mut tasks = Vec::new();
        loop {
            let page = self.list_tasks(tasks.len() as u32, MAX_PAGE_SIZE).await?;
            let short = (page.len() as u32) < MAX_PAGE_SIZE;
            tasks.extend(page);
            if short {
                return Ok(tasks);
            }
        }
    }
}
