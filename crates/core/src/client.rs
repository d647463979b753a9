use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::ApiConfig;
use crate::model::{Task, TaskId};

#[derive(Debug, Serialize)]
struct CreateTask<'a> {
    text: &'a str,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct CompletionUpdate {
    completed: bool,
}

/// Thin async client for the remote task service.
///
/// Every failure collapses into one undifferentiated "operation failed"
/// error for the caller to report; there is no retry and no timeout here.
/// Timeouts, if any, belong to the transport stack.
#[derive(Debug, Clone)]
pub struct TaskApi {
    http: reqwest::Client,
    base_url: String,
}

impl TaskApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Fetch the full task collection.
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        let response = self
            .http
            .get(self.endpoint("tasks"))
            .send()
            .await
            .context("Failed to fetch tasks")?
            .error_for_status()
            .context("Task service rejected the list request")?;
        response.json().await.context("Failed to decode task list")
    }

    /// Create a task. The text goes over the wire exactly as given;
    /// callers are responsible for rejecting empty drafts beforehand.
    pub async fn create_task(&self, text: &str) -> Result<Task> {
        let response = self
            .http
            .post(self.endpoint("tasks"))
            .json(&CreateTask { text })
            .send()
            .await
            .context("Failed to create task")?
            .error_for_status()
            .context("Task service rejected the create request")?;
        response
            .json()
            .await
            .context("Failed to decode created task")
    }

    /// Set the completion flag; returns the full updated representation.
    pub async fn update_task(&self, id: &TaskId, completed: bool) -> Result<Task> {
        let response = self
            .http
            .put(self.endpoint(&format!("tasks/{}", id)))
            .json(&CompletionUpdate { completed })
            .send()
            .await
            .with_context(|| format!("Failed to update task {}", id))?
            .error_for_status()
            .context("Task service rejected the update request")?;
        response
            .json()
            .await
            .context("Failed to decode updated task")
    }

    /// Delete a task. The service responds with no body.
    pub async fn delete_task(&self, id: &TaskId) -> Result<()> {
        self.http
            .delete(self.endpoint(&format!("tasks/{}", id)))
            .send()
            .await
            .with_context(|| format!("Failed to delete task {}", id))?
            .error_for_status()
            .context("Task service rejected the delete request")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn api_for(server: &mockito::ServerGuard) -> TaskApi {
        let config = ApiConfig::from_base_url(server.url()).unwrap();
        TaskApi::new(&config).unwrap()
    }

    #[tokio::test]
    async fn list_tasks_decodes_the_collection() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/tasks")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"id":7,"text":"Buy milk","completed":false},
                    {"id":"a1b2","text":"Call bank","completed":true}]"#,
            )
            .create_async()
            .await;

        let tasks = api_for(&server).list_tasks().await.unwrap();

        mock.assert_async().await;
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, TaskId::from(7));
        assert_eq!(tasks[0].text, "Buy milk");
        assert!(tasks[1].completed);
    }

    #[tokio::test]
    async fn create_task_sends_the_text_untrimmed() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/tasks")
            .match_body(Matcher::Json(json!({ "text": "  Buy milk " })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":7,"text":"  Buy milk ","completed":false}"#)
            .create_async()
            .await;

        let task = api_for(&server).create_task("  Buy milk ").await.unwrap();

        mock.assert_async().await;
        assert_eq!(task.id, TaskId::from(7));
        assert_eq!(task.text, "  Buy milk ");
        assert!(!task.completed);
    }

    #[tokio::test]
    async fn update_task_puts_the_inverted_flag_to_the_id_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/tasks/7")
            .match_body(Matcher::Json(json!({ "completed": true })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":7,"text":"Buy milk","completed":true}"#)
            .create_async()
            .await;

        let task = api_for(&server)
            .update_task(&TaskId::from(7), true)
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(task.completed);
    }

    #[tokio::test]
    async fn delete_task_needs_no_response_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/tasks/7")
            .with_status(204)
            .create_async()
            .await;

        api_for(&server)
            .delete_task(&TaskId::from(7))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn service_errors_surface_as_failures() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/tasks")
            .with_status(500)
            .create_async()
            .await;

        assert!(api_for(&server).list_tasks().await.is_err());
    }

    #[tokio::test]
    async fn base_url_with_trailing_slash_still_reaches_the_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/tasks")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let config = ApiConfig::from_base_url(format!("{}/", server.url())).unwrap();
        let api = TaskApi::new(&config).unwrap();
        let tasks = api.list_tasks().await.unwrap();

        mock.assert_async().await;
        assert!(tasks.is_empty());
    }
}
