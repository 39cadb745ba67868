use super::TaskStore;
use crate::libs::error::TaskError;
use crate::libs::task::{NewTask, Task, TaskUpdate};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

const TASKS_URL: &str = "tasks/";

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// HTTP implementation of [`TaskStore`].
#[derive(Debug, Clone)]
pub struct TaskClient {
    client: Client,
    base_url: String,
}

impl TaskClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, TASKS_URL)
    }

    fn task_url(&self, id: i64) -> String {
        format!("{}/{}{}", self.base_url, TASKS_URL, id)
    }

    /// Maps non-success responses onto the error taxonomy.
    ///
    /// `id` names the task a 404 refers to; collection requests pass `None`.
    async fn check(response: Response, id: Option<i64>) -> Result<Response, TaskError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(ErrorBody {
                detail: serde_json::Value::String(text),
            }) => text,
            Ok(ErrorBody { detail }) => detail.to_string(),
            Err(_) => body,
        };

        match (status, id) {
            (StatusCode::NOT_FOUND, Some(id)) => Err(TaskError::NotFound(id)),
            (StatusCode::UNPROCESSABLE_ENTITY | StatusCode::BAD_REQUEST, _) => Err(TaskError::Validation(detail)),
            _ => Err(TaskError::UnexpectedStatus(status.as_u16(), detail)),
        }
    }
}

impl TaskStore for TaskClient {
    async fn list_tasks(&self, offset: u32, limit: u32) -> Result<Vec<Task>, TaskError> {
        debug!(offset, limit, "GET tasks");
        let response = self
            .client
            .get(self.collection_url())
            .query(&[("offset", offset), ("limit", limit)])
            .send()
            .await?;
        Ok(Self::check(response, None).await?.json().await?)
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task, TaskError> {
        debug!(name = %task.name, "POST task");
        let response = self.client.post(self.collection_url()).json(task).send().await?;
        Ok(Self::check(response, None).await?.json().await?)
    }

    async fn update_task(&self, id: i64, update: &TaskUpdate) -> Result<Task, TaskError> {
        debug!(id, "PUT task");
        let response = self.client.put(self.task_url(id)).json(update).send().await?;
        Ok(Self::check(response, Some(id)).await?.json().await?)
    }

    async fn delete_task(&self, id: i64) -> Result<(), TaskError> {
        debug!(id, "DELETE task");
        let response = self.client.delete(self.task_url(id)).send().await?;
        Self::check(response, Some(id)).await?;
        Ok(())
    }
}
