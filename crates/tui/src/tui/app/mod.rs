use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use ratatui::style::{Color, Style};
use ratatui::widgets::TableState;
use tokio::runtime::Handle;

use super::buffer::InputBuffer;
use super::constants::*;
use crate::client::TaskApi;
use crate::config::ApiConfig;
use crate::model::{FilterMode, Task, TaskId};
use crate::view::TaskListView;

mod input;
mod render;

/// A confirmed service response. Workers only ever send these; the draw
/// loop is the single owner that applies them to view state, strictly in
/// arrival order. Failed operations send nothing and are reported to the
/// tracing sink instead.
pub(crate) enum ApiResponse {
    Loaded(Vec<Task>),
    Created(Task),
    Updated(Task),
    Deleted(TaskId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Add,
    Help,
    ConfirmDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfirmChoice {
    Yes,
    No,
}

impl ConfirmChoice {
    fn toggle(self) -> Self {
        match self {
            ConfirmChoice::Yes => ConfirmChoice::No,
            ConfirmChoice::No => ConfirmChoice::Yes,
        }
    }
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    kind: StatusKind,
    created_at: Instant,
}

impl StatusMessage {
    fn new<T: Into<String>>(text: T, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
            created_at: Instant::now(),
        }
    }

    fn style(&self) -> Style {
        match self.kind {
            StatusKind::Info => Style::default().fg(Color::Cyan),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum StatusKind {
    Info,
    Error,
}

pub(crate) struct App {
    config: ApiConfig,
    api: TaskApi,
    runtime: Handle,
    responses_tx: Sender<ApiResponse>,
    responses_rx: Receiver<ApiResponse>,
    view: TaskListView,
    selected: usize,
    table_state: TableState,
    input_mode: InputMode,
    input: InputBuffer,
    status: Option<StatusMessage>,
    confirm_choice: ConfirmChoice,
    should_quit: bool,
}

impl App {
    pub(crate) fn new(config: ApiConfig, api: TaskApi, runtime: Handle) -> Self {
        let (responses_tx, responses_rx) = mpsc::channel();
        let mut app = Self {
            config,
            api,
            runtime,
            responses_tx,
            responses_rx,
            view: TaskListView::new(),
            selected: 0,
            table_state: TableState::default(),
            input_mode: InputMode::Normal,
            input: InputBuffer::new(),
            status: None,
            confirm_choice: ConfirmChoice::No,
            should_quit: false,
        };
        // The one automatic fetch; afterwards only 'r' reloads.
        app.fetch_all();
        app
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub(crate) fn on_tick(&mut self) {
        if let Some(status) = &self.status {
            if status.created_at.elapsed() > Duration::from_secs(5) {
                self.status = None;
            }
        }
    }

    /// Apply everything the workers have confirmed since the last frame,
    /// in arrival order. With racing requests the last response wins.
    pub(crate) fn drain_responses(&mut self) {
        while let Ok(response) = self.responses_rx.try_recv() {
            self.apply_response(response);
        }
    }

    fn apply_response(&mut self, response: ApiResponse) {
        match response {
            ApiResponse::Loaded(tasks) => {
                let count = tasks.len();
                self.view.replace_all(tasks);
                self.set_status_info(format!(
                    "Loaded {} task{}",
                    count,
                    if count == 1 { "" } else { "s" }
                ));
            }
            ApiResponse::Created(task) => {
                self.set_status_info(format!("Added '{}'", task.text));
                self.view.apply_created(task);
                self.input.clear();
            }
            ApiResponse::Updated(task) => {
                // Unknown ids are dropped by the view, matching a delete
                // that won the race against this update.
                self.view.apply_updated(task);
            }
            ApiResponse::Deleted(id) => {
                if self.view.apply_deleted(&id) {
                    self.set_status_info("Deleted task 🗑️");
                }
            }
        }
        self.sync_selection();
    }

    // Network operations. Each spawns one request on the runtime and
    // returns immediately; nothing below blocks the draw loop, nothing
    // cancels or sequences requests already in flight.

    fn fetch_all(&mut self) {
        let api = self.api.clone();
        let tx = self.responses_tx.clone();
        self.runtime.spawn(async move {
            match api.list_tasks().await {
                Ok(tasks) => {
                    let _ = tx.send(ApiResponse::Loaded(tasks));
                }
                Err(err) => tracing::warn!(error = %err, "failed to fetch tasks"),
            }
        });
    }

    pub(crate) fn submit_draft(&mut self) {
        // Only the emptiness check trims; the draft goes over the wire
        // exactly as typed.
        if self.input.as_str().trim().is_empty() {
            self.set_status_error(STATUS_EMPTY_DRAFT);
            return;
        }
        let text = self.input.as_str().to_string();

        let api = self.api.clone();
        let tx = self.responses_tx.clone();
        self.runtime.spawn(async move {
            match api.create_task(&text).await {
                Ok(task) => {
                    let _ = tx.send(ApiResponse::Created(task));
                }
                Err(err) => tracing::warn!(error = %err, "failed to add task"),
            }
        });
    }

    fn toggle_selected(&mut self) {
        let Some(task) = self.selected_task() else {
            self.set_status_info("Nothing to toggle");
            return;
        };
        let id = task.id.clone();
        let completed = task.completed;

        // No lock while the request is in flight: toggling again races the
        // first request and the last response to arrive wins.
        let api = self.api.clone();
        let tx = self.responses_tx.clone();
        self.runtime.spawn(async move {
            match api.update_task(&id, !completed).await {
                Ok(task) => {
                    let _ = tx.send(ApiResponse::Updated(task));
                }
                Err(err) => tracing::warn!(task = %id, error = %err, "failed to update task"),
            }
        });
    }

    fn perform_delete(&mut self) {
        let Some(task) = self.selected_task() else {
            self.set_status_info("Nothing to delete");
            return;
        };
        let id = task.id.clone();

        let api = self.api.clone();
        let tx = self.responses_tx.clone();
        self.runtime.spawn(async move {
            match api.delete_task(&id).await {
                Ok(()) => {
                    let _ = tx.send(ApiResponse::Deleted(id));
                }
                Err(err) => tracing::warn!(task = %id, error = %err, "failed to delete task"),
            }
        });
    }

    fn refresh(&mut self) {
        self.fetch_all();
        self.set_status_info(STATUS_REFRESHING);
    }

    // Selection and filter tabs. All purely local.

    fn selected_task(&self) -> Option<&Task> {
        self.view.visible().get(self.selected).copied()
    }

    fn sync_selection(&mut self) {
        let visible = self.view.visible().len();
        if visible == 0 {
            self.selected = 0;
            self.table_state.select(None);
        } else {
            if self.selected >= visible {
                self.selected = visible - 1;
            }
            self.table_state.select(Some(self.selected));
        }
    }

    fn select_next(&mut self) {
        let visible = self.view.visible().len();
        if visible == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(visible - 1);
        self.table_state.select(Some(self.selected));
    }

    fn select_prev(&mut self) {
        if self.view.visible().is_empty() {
            return;
        }
        if self.selected > 0 {
            self.selected -= 1;
        }
        self.table_state.select(Some(self.selected));
    }

    fn select_first(&mut self) {
        if !self.view.visible().is_empty() {
            self.selected = 0;
            self.table_state.select(Some(self.selected));
        }
    }

    fn select_last(&mut self) {
        let visible = self.view.visible().len();
        if visible > 0 {
            self.selected = visible - 1;
            self.table_state.select(Some(self.selected));
        }
    }

    fn tab_index(&self) -> usize {
        FilterMode::ALL
            .iter()
            .position(|mode| *mode == self.view.filter())
            .unwrap_or(0)
    }

    fn next_tab(&mut self) {
        let index = (self.tab_index() + 1) % FilterMode::ALL.len();
        self.view.set_filter(FilterMode::ALL[index]);
        self.sync_selection();
    }

    fn prev_tab(&mut self) {
        let index = self
            .tab_index()
            .checked_sub(1)
            .unwrap_or(FilterMode::ALL.len() - 1);
        self.view.set_filter(FilterMode::ALL[index]);
        self.sync_selection();
    }

    fn prompt_delete(&mut self) {
        if self.view.visible().is_empty() {
            self.set_status_info("Nothing to delete");
            return;
        }
        self.confirm_choice = ConfirmChoice::No;
        self.input_mode = InputMode::ConfirmDelete;
        self.set_status_info(STATUS_CONFIRM_DELETE);
    }

    fn show_help_overlay(&mut self) {
        self.input_mode = InputMode::Help;
        self.set_status_info(STATUS_HELP);
    }

    pub(crate) fn set_status_info<T: Into<String>>(&mut self, message: T) {
        let mut text = String::from("ℹ️  ");
        text.push_str(&message.into());
        self.status = Some(StatusMessage::new(text, StatusKind::Info));
    }

    pub(crate) fn set_status_error<T: Into<String>>(&mut self, message: T) {
        let mut text = String::from("⚠️  ");
        text.push_str(&message.into());
        self.status = Some(StatusMessage::new(text, StatusKind::Error));
    }
}
