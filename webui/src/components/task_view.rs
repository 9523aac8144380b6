//! Status, Zähler und Log eines Hintergrund-Tasks.
//!
//! Wird von der Task-Detailseite und von der Schätzung genutzt. Abgefragt
//! wird bis zum Endzustand; beim Verlassen der Seite endet die Schleife.

use dioxus::prelude::*;
use dioxus_router::prelude::*;
use kopia_console_core::error::alert_text;
use kopia_console_core::format::{format_log_time, format_timestamp};
use kopia_console_core::polling::TASK_INTERVAL;
use kopia_console_core::tasks::{counter_rows, log_level_class, StatusDisplay, TaskMonitor};

use crate::components::status::{ErrorBlock, Spinner, StatusCell};
use crate::hooks::{redirect_if_disconnected, use_polling};
use crate::ui_utils::{alert, now};
use crate::{api, prefs};

/// Pollt einen Task, bis er abgeschlossen ist oder die Komponente verschwindet.
pub fn use_task_monitor(task_id: String) -> Signal<TaskMonitor> {
    let nav = use_navigator();
    let mut monitor = use_signal(|| TaskMonitor::new(task_id));
    use_polling(TASK_INTERVAL, move || async move {
        let mut m = monitor.peek().clone();
        let control = m.refresh(&api::client()).await;
        if let Some(e) = &m.error {
            redirect_if_disconnected(nav, e);
        }
        monitor.set(m);
        control
    });
    monitor
}

#[component]
pub fn TaskView(task_id: String, #[props(default = true)] show_logs: bool) -> Element {
    let store = prefs::use_prefs();
    let monitor = use_task_monitor(task_id);
    let base2 = prefs::base2(store);

    let m = monitor.read();
    let Some(task) = m.task.clone() else {
        return match m.error.clone() {
            Some(e) => rsx! { ErrorBlock { prefix: "Unable to load task", error: e } },
            None => rsx! { div { class: "muted", Spinner {} " Loading task..." } },
        };
    };
    let can_cancel = m.status().is_some_and(|s| s.can_cancel());
    let logs: Vec<(String, String, String)> = m
        .logs
        .iter()
        .map(|e| (log_level_class(e.level).to_string(), format_log_time(e.ts), e.msg.clone()))
        .collect();
    drop(m);

    let display = StatusDisplay::for_task(&task, now());
    let counters = counter_rows(&task, base2);
    let started = format_timestamp(task.start_time.as_deref());
    let finished = format_timestamp(task.end_time.as_deref());

    let on_cancel = move |_| {
        spawn(async move {
            let m = monitor.peek().clone();
            if let Err(e) = m.cancel(&api::client()).await {
                alert(&alert_text("Error canceling task", &e));
            }
        });
    };

    rsx! {
        div { class: "task-view",
            table { class: "kv",
                tbody {
                    tr { th { "ID" } td { code { "{task.id}" } } }
                    tr { th { "Kind" } td { "{task.kind}" } }
                    tr { th { "Description" } td { "{task.description}" } }
                    tr { th { "Status" } td { StatusCell { display } } }
                    tr { th { "Started" } td { "{started}" } }
                    tr { th { "Finished" } td { "{finished}" } }
                    {(!task.progress_info.is_empty()).then(|| rsx!(tr { th { "Progress" } td { "{task.progress_info}" } }))}
                }
            }
            {can_cancel.then(|| rsx!(button { class: "btn btn-danger", onclick: on_cancel, "Stop" }))}
            {(!counters.is_empty()).then(|| rsx!(
                h4 { "Counters" }
                table { class: "grid",
                    thead { tr { th { "Counter" } th { class: "num", "Value" } } }
                    tbody {
                        for c in counters {
                            tr { key: "{c.name}", class: "counter-{c.level}",
                                td { "{c.name}" }
                                td { class: "num", "{c.value}" }
                            }
                        }
                    }
                }
            ))}
            {show_logs.then(|| rsx!(
                h4 { "Logs" }
                div { class: "logs",
                    for (i, (class, time, msg)) in logs.into_iter().enumerate() {
                        div { key: "{i}", class: "log-line {class}",
                            span { class: "log-time", "{time}" }
                            " "
                            span { class: "log-msg", "{msg}" }
                        }
                    }
                }
            ))}
        }
    }
}
