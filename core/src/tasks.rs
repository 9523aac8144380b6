//! Task status mapping and task monitoring.
//!
//! Tasks and uploads report a status string from a fixed set. The console
//! maps it to one of a handful of displays (spinner, check, error, ban) and
//! keeps polling a task until it reaches a terminal state.

use chrono::{DateTime, Utc};

use crate::api::{ApiClient, Backend};
use crate::error::ApiError;
use crate::format::{format_counter, format_duration};
use crate::polling::{PollControl, LOGS_INTERVAL, TASK_INTERVAL};
use crate::types::{Task, TaskLogEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Running,
    Success,
    Failed,
    Canceled,
    Canceling,
    Pending,
    Paused,
    Uploading,
    Idle,
    Other(String),
}

impl TaskStatus {
    pub fn parse(status: &str) -> Self {
        match status {
            "RUNNING" => TaskStatus::Running,
            "SUCCESS" => TaskStatus::Success,
            "FAILED" => TaskStatus::Failed,
            "CANCELED" => TaskStatus::Canceled,
            "CANCELING" => TaskStatus::Canceling,
            "PENDING" => TaskStatus::Pending,
            "PAUSED" => TaskStatus::Paused,
            "UPLOADING" => TaskStatus::Uploading,
            "IDLE" => TaskStatus::Idle,
            other => TaskStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Running => "RUNNING",
            TaskStatus::Success => "SUCCESS",
            TaskStatus::Failed => "FAILED",
            TaskStatus::Canceled => "CANCELED",
            TaskStatus::Canceling => "CANCELING",
            TaskStatus::Pending => "PENDING",
            TaskStatus::Paused => "PAUSED",
            TaskStatus::Uploading => "UPLOADING",
            TaskStatus::Idle => "IDLE",
            TaskStatus::Other(s) => s,
        }
    }

    /// The backend will not change this status any more.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Success | TaskStatus::Failed | TaskStatus::Canceled)
    }

    /// Rendered with a spinner.
    pub fn is_in_progress(&self) -> bool {
        matches!(
            self,
            TaskStatus::Running | TaskStatus::Uploading | TaskStatus::Pending | TaskStatus::Canceling
        )
    }

    pub fn can_cancel(&self) -> bool {
        matches!(self, TaskStatus::Running | TaskStatus::Uploading | TaskStatus::Pending)
    }
}

/// How a status cell is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusDisplay {
    /// Spinner + label + elapsed time so far.
    InProgress { label: String, elapsed: String },
    /// Check icon + total elapsed time.
    Succeeded { elapsed: String },
    /// Error icon + message.
    Failed { message: String },
    /// Ban icon.
    Canceled,
    Plain(String),
}

impl StatusDisplay {
    pub fn for_status(
        status: &TaskStatus,
        start: Option<&str>,
        end: Option<&str>,
        error: Option<&str>,
        now: DateTime<Utc>,
    ) -> Self {
        match status {
            s if s.is_in_progress() => StatusDisplay::InProgress {
                label: title_case(s.as_str()),
                elapsed: format_duration(start, None, now),
            },
            TaskStatus::Success => StatusDisplay::Succeeded { elapsed: format_duration(start, end, now) },
            TaskStatus::Failed => StatusDisplay::Failed { message: error.unwrap_or("unknown error").to_string() },
            TaskStatus::Canceled => StatusDisplay::Canceled,
            other => StatusDisplay::Plain(title_case(other.as_str())),
        }
    }

    pub fn for_task(task: &Task, now: DateTime<Utc>) -> Self {
        Self::for_status(
            &TaskStatus::parse(&task.status),
            task.start_time.as_deref(),
            task.end_time.as_deref(),
            task.error_message.as_deref(),
            now,
        )
    }

    pub fn has_spinner(&self) -> bool {
        matches!(self, StatusDisplay::InProgress { .. })
    }

    /// Plain-text rendering, used for titles and tests.
    pub fn text(&self) -> String {
        match self {
            StatusDisplay::InProgress { label, elapsed } if elapsed.is_empty() => label.clone(),
            StatusDisplay::InProgress { label, elapsed } => format!("{} {}", label, elapsed),
            StatusDisplay::Succeeded { elapsed } if elapsed.is_empty() => "Finished".to_string(),
            StatusDisplay::Succeeded { elapsed } => format!("Finished in {}", elapsed),
            StatusDisplay::Failed { message } => format!("Error: {}", message),
            StatusDisplay::Canceled => "Canceled".to_string(),
            StatusDisplay::Plain(s) => s.clone(),
        }
    }
}

fn title_case(s: &str) -> String {
    let lower = s.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One line of the counters table on the task page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterRow {
    pub name: String,
    pub value: String,
    pub level: String,
}

fn level_rank(level: &str) -> u8 {
    match level {
        "error" => 0,
        "warning" => 1,
        "notice" => 2,
        _ => 3,
    }
}

/// Counters ordered by severity, then name.
pub fn counter_rows(task: &Task, base2: bool) -> Vec<CounterRow> {
    let mut rows: Vec<CounterRow> = task
        .counters
        .iter()
        .map(|(name, c)| CounterRow {
            name: name.clone(),
            value: format_counter(c.value, &c.units, base2),
            level: c.level.clone(),
        })
        .collect();
    rows.sort_by(|a, b| level_rank(&a.level).cmp(&level_rank(&b.level)).then_with(|| a.name.cmp(&b.name)));
    rows
}

/// CSS class of a log line for its numeric level (debug..error).
pub fn log_level_class(level: i32) -> &'static str {
    match level {
        l if l >= 3 => "log-error",
        2 => "log-warning",
        1 => "log-info",
        _ => "log-debug",
    }
}

/// Status filter of the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFilter {
    All,
    Running,
    Failed,
}

/// Applies the task list filters; `kind` and `search` are ignored when empty.
/// Newest tasks first.
pub fn filter_tasks<'a>(tasks: &'a [Task], filter: TaskFilter, kind: &str, search: &str) -> Vec<&'a Task> {
    let needle = search.trim().to_lowercase();
    let mut out: Vec<&Task> = tasks
        .iter()
        .filter(|t| match filter {
            TaskFilter::All => true,
            TaskFilter::Running => !TaskStatus::parse(&t.status).is_terminal(),
            TaskFilter::Failed => TaskStatus::parse(&t.status) == TaskStatus::Failed,
        })
        .filter(|t| kind.is_empty() || t.kind == kind)
        .filter(|t| needle.is_empty() || t.description.to_lowercase().contains(&needle))
        .collect();
    out.sort_by(|a, b| b.start_time.cmp(&a.start_time));
    out
}

/// Distinct task kinds, for the kind filter drop-down.
pub fn task_kinds(tasks: &[Task]) -> Vec<String> {
    let mut kinds: Vec<String> = tasks.iter().map(|t| t.kind.clone()).filter(|k| !k.is_empty()).collect();
    kinds.sort();
    kinds.dedup();
    kinds
}

// Logs are refreshed every LOGS_INTERVAL while the task itself is polled faster.
const TICKS_PER_LOG_REFRESH: usize = (LOGS_INTERVAL.as_millis() / TASK_INTERVAL.as_millis()) as usize;

/// Polls one task and its log until the task is terminal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskMonitor {
    pub task_id: String,
    pub task: Option<Task>,
    pub logs: Vec<TaskLogEntry>,
    pub error: Option<ApiError>,
    ticks: usize,
}

impl TaskMonitor {
    pub fn new(task_id: impl Into<String>) -> Self {
        Self { task_id: task_id.into(), ..Default::default() }
    }

    pub fn status(&self) -> Option<TaskStatus> {
        self.task.as_ref().map(|t| TaskStatus::parse(&t.status))
    }

    pub fn is_done(&self) -> bool {
        self.status().map(|s| s.is_terminal()).unwrap_or(false)
    }

    /// One poll step: refresh the task, and the log when due or when the task
    /// just finished. A not-connected error stops polling.
    pub async fn refresh<B: Backend>(&mut self, api: &ApiClient<B>) -> PollControl {
        match api.task(&self.task_id).await {
            Ok(task) => {
                self.task = Some(task);
                self.error = None;
            }
            Err(e) => {
                let stop = e.is_not_connected() || e.is_not_found();
                tracing::warn!(task = %self.task_id, "task refresh failed: {}", e);
                self.error = Some(e);
                if stop {
                    return PollControl::Stop;
                }
            }
        }

        let done = self.is_done();
        if done || self.ticks % TICKS_PER_LOG_REFRESH.max(1) == 0 {
            match api.task_logs(&self.task_id).await {
                Ok(resp) => self.logs = resp.logs,
                Err(e) => tracing::warn!(task = %self.task_id, "task log refresh failed: {}", e),
            }
        }
        self.ticks += 1;

        if done {
            PollControl::Stop
        } else {
            PollControl::Continue
        }
    }

    pub async fn cancel<B: Backend>(&self, api: &ApiClient<B>) -> Result<(), ApiError> {
        api.cancel_task(&self.task_id).await
    }
}
