use std::fmt;
use std::io::Write;

use anyhow::{anyhow, bail, Context, Result};

use crate::cli::{AddArgs, CliCommand, DeleteArgs, ListArgs};
use crate::client::TaskApi;
use crate::config::ApiConfig;
use crate::model::TaskId;
use crate::view::TaskListView;

/// Run a one-shot command on an internally created runtime.
pub fn execute_blocking<W: Write>(
    config: &ApiConfig,
    command: CliCommand,
    writer: &mut W,
) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;
    let api = TaskApi::new(config)?;
    runtime.block_on(execute(&api, command, writer))
}

pub async fn execute<W: Write>(api: &TaskApi, command: CliCommand, writer: &mut W) -> Result<()> {
    match command {
        CliCommand::List(args) => handle_list(api, &args, writer).await,
        CliCommand::Add(args) => handle_add(api, &args, writer).await,
        CliCommand::Delete(args) => handle_delete(api, &args, writer).await,
        CliCommand::Tui => Err(anyhow!("launch interactive surfaces directly")),
    }
}

async fn handle_list<W: Write>(api: &TaskApi, args: &ListArgs, writer: &mut W) -> Result<()> {
    let mut view = TaskListView::new();
    view.replace_all(api.list_tasks().await?);
    view.set_filter(args.filter);

    for task in view.visible() {
        writeln!(
            writer,
            "[{}] {:>6}  {}",
            if task.completed { 'x' } else { ' ' },
            task.id,
            task.text
        )?;
    }

    let counts = view.counts();
    writeln!(
        writer,
        "{} total, {} completed, {} uncompleted",
        counts.total, counts.completed, counts.uncompleted
    )?;
    Ok(())
}

async fn handle_add<W: Write>(api: &TaskApi, args: &AddArgs, writer: &mut W) -> Result<()> {
    let text = args.text.join(" ");
    // Only the emptiness check trims; the text itself is sent as typed.
    if text.trim().is_empty() {
        bail!("Task cannot be empty!");
    }

    let task = api.create_task(&text).await?;
    writeln!(writer, "Added [{}] {}", task.id, task.text)?;
    Ok(())
}

async fn handle_delete<W: Write>(api: &TaskApi, args: &DeleteArgs, writer: &mut W) -> Result<()> {
    let mut summary = DeleteSummary::default();
    for id in &args.ids {
        let task_id = TaskId::from(id.as_str());
        match api.delete_task(&task_id).await {
            Ok(()) => summary.deleted += 1,
            Err(err) => {
                tracing::warn!(task = %task_id, error = %err, "failed to delete task");
                summary.failed.push(id.clone());
            }
        }
    }
    summary.write_to(writer)
}

#[derive(Default)]
struct DeleteSummary {
    deleted: usize,
    failed: Vec<String>,
}

impl DeleteSummary {
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "{}", SummaryLine::deleted(self.deleted))?;
        if !self.failed.is_empty() {
            writeln!(writer, "Not deleted: {}", self.failed.join(", "))?;
        }
        Ok(())
    }
}

enum SummaryLine {
    Deleted(usize),
    NoneDeleted,
}

impl SummaryLine {
    fn deleted(count: usize) -> Self {
        if count > 0 {
            SummaryLine::Deleted(count)
        } else {
            SummaryLine::NoneDeleted
        }
    }
}

impl fmt::Display for SummaryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryLine::Deleted(count) => {
                write!(
                    f,
                    "Deleted {} task{}",
                    count,
                    if *count == 1 { "" } else { "s" }
                )
            }
            SummaryLine::NoneDeleted => write!(f, "No tasks deleted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FilterMode;

    fn api_for(server: &mockito::ServerGuard) -> TaskApi {
        let config = ApiConfig::from_base_url(server.url()).unwrap();
        TaskApi::new(&config).unwrap()
    }

    #[tokio::test]
    async fn list_prints_the_filtered_view_with_full_counts() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/tasks")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"id":1,"text":"Buy milk","completed":false},
                    {"id":2,"text":"Call bank","completed":true},
                    {"id":3,"text":"Water plants","completed":false}]"#,
            )
            .create_async()
            .await;

        let api = api_for(&server);
        let mut output = Vec::new();
        execute(
            &api,
            CliCommand::List(ListArgs {
                filter: FilterMode::Completed,
            }),
            &mut output,
        )
        .await
        .unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.contains("Call bank"));
        assert!(!output.contains("Buy milk"));
        assert!(output.contains("3 total, 1 completed, 2 uncompleted"));
    }

    #[tokio::test]
    async fn add_rejects_blank_text_before_any_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/tasks")
            .expect(0)
            .create_async()
            .await;

        let api = api_for(&server);
        let mut output = Vec::new();
        let err = execute(
            &api,
            CliCommand::Add(AddArgs {
                text: vec!["   ".into()],
            }),
            &mut output,
        )
        .await
        .unwrap_err();

        mock.assert_async().await;
        assert!(err.to_string().contains("cannot be empty"));
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn add_reports_the_created_task() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/tasks")
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":7,"text":"Buy milk","completed":false}"#)
            .create_async()
            .await;

        let api = api_for(&server);
        let mut output = Vec::new();
        execute(
            &api,
            CliCommand::Add(AddArgs {
                text: vec!["Buy".into(), "milk".into()],
            }),
            &mut output,
        )
        .await
        .unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.contains("Added [7] Buy milk"));
    }

    #[tokio::test]
    async fn delete_reports_deleted_and_failed_ids() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/tasks/7")
            .with_status(204)
            .create_async()
            .await;
        server
            .mock("DELETE", "/tasks/missing")
            .with_status(404)
            .create_async()
            .await;

        let api = api_for(&server);
        let mut output = Vec::new();
        execute(
            &api,
            CliCommand::Delete(DeleteArgs {
                ids: vec!["7".into(), "missing".into()],
            }),
            &mut output,
        )
        .await
        .unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.contains("Deleted 1 task"));
        assert!(output.contains("Not deleted: missing"));
    }
}
