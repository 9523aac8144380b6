//! Task-Liste mit Filtern und die Detailseite eines Tasks.

use dioxus::prelude::*;
use dioxus_router::prelude::*;
use kopia_console_core::format::{format_duration, format_timestamp};
use kopia_console_core::polling::{PollControl, TASKS_INTERVAL};
use kopia_console_core::table::SortKey;
use kopia_console_core::tasks::{filter_tasks, task_kinds, StatusDisplay, TaskFilter};
use kopia_console_core::types::Task;
use kopia_console_core::ApiError;

use crate::components::data_table::{use_table, Pager, SortHeader};
use crate::components::status::{ErrorBlock, Spinner, StatusCell};
use crate::components::task_view::TaskView;
use crate::hooks::{redirect_if_disconnected, use_polling};
use crate::ui_utils::now;
use crate::{api, Route};

fn task_key(column: usize, task: &Task) -> SortKey {
    match column {
        0 => task.start_time.clone().into(),
        1 => task.status.as_str().into(),
        2 => task.kind.as_str().into(),
        _ => task.description.as_str().into(),
    }
}

fn filter_value(filter: TaskFilter) -> &'static str {
    match filter {
        TaskFilter::All => "all",
        TaskFilter::Running => "running",
        TaskFilter::Failed => "failed",
    }
}

#[component]
pub fn Tasks() -> Element {
    let nav = use_navigator();
    let mut tasks = use_signal(|| None as Option<Vec<Task>>);
    let mut error = use_signal(|| None as Option<ApiError>);
    let mut filter = use_signal(|| TaskFilter::All);
    let mut kind = use_signal(String::new);
    let mut search = use_signal(String::new);
    let table = use_table();

    use_polling(TASKS_INTERVAL, move || async move {
        match api::client().tasks().await {
            Ok(resp) => {
                tasks.set(Some(resp.tasks));
                error.set(None);
                PollControl::Continue
            }
            Err(e) => {
                let stop = redirect_if_disconnected(nav, &e);
                error.set(Some(e));
                if stop { PollControl::Stop } else { PollControl::Continue }
            }
        }
    });

    let all = tasks.read().clone().unwrap_or_default();
    let loading = tasks.read().is_none() && error.read().is_none();
    let kinds = task_kinds(&all);
    let rows: Vec<Task> = filter_tasks(&all, *filter.read(), &kind.read(), &search.read()).into_iter().cloned().collect();
    let row_count = rows.len();
    let visible: Vec<Task> = table.read().visible_rows(&rows, task_key).into_iter().cloned().collect();
    let selected_filter = filter_value(*filter.read());
    let at = now();

    rsx! {
        section { class: "panel",
            h2 { "Tasks" }
            div { class: "toolbar",
                select {
                    value: "{selected_filter}",
                    oninput: move |e| {
                        filter.set(match e.value().as_str() {
                            "running" => TaskFilter::Running,
                            "failed" => TaskFilter::Failed,
                            _ => TaskFilter::All,
                        });
                    },
                    option { value: "all", "All Statuses" }
                    option { value: "running", "Running" }
                    option { value: "failed", "Failed" }
                }
                select {
                    value: "{kind}",
                    oninput: move |e| kind.set(e.value()),
                    option { value: "", "All Kinds" }
                    for k in kinds {
                        option { key: "{k}", value: "{k}", "{k}" }
                    }
                }
                input {
                    class: "input",
                    placeholder: "case-insensitive search description",
                    value: "{search}",
                    oninput: move |e| search.set(e.value()),
                }
                {loading.then(|| rsx!(Spinner {}))}
            }
            {error.read().clone().map(|e| rsx!(ErrorBlock { prefix: "Unable to load tasks", error: e }))}
            {(row_count == 0 && !loading).then(|| rsx!(p { class: "muted", "No tasks found" }))}
            table { class: "grid",
                thead { tr {
                    SortHeader { table, column: 0, label: "Start Time" }
                    SortHeader { table, column: 1, label: "Status" }
                    SortHeader { table, column: 2, label: "Kind" }
                    SortHeader { table, column: 3, label: "Description" }
                    th { "Duration" }
                } }
                tbody {
                    for task in visible {
                        tr { key: "{task.id}",
                            td {
                                Link { to: Route::TaskDetails { tid: task.id.clone() }, {format_timestamp(task.start_time.as_deref())} }
                            }
                            td { StatusCell { display: StatusDisplay::for_task(&task, at) } }
                            td { "{task.kind}" }
                            td { "{task.description}" }
                            td { {format_duration(task.start_time.as_deref(), task.end_time.as_deref(), at)} }
                        }
                    }
                }
            }
            Pager { table, row_count }
        }
    }
}

#[component]
pub fn TaskDetails(tid: String) -> Element {
    rsx! {
        section { class: "panel",
            div { class: "toolbar",
                Link { to: Route::Tasks {}, class: "btn", "Back to tasks" }
            }
            TaskView { key: "{tid}", task_id: tid.clone() }
        }
    }
}
