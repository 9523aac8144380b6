#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use serde_json::json;

    use crate::api::{ApiClient, Method};
    use crate::format::parse_timestamp;
    use crate::polling::{poll_until, PollControl, TASK_INTERVAL};
    use crate::tasks::*;
    use crate::tests::MockBackend;
    use crate::types::Task;
    use tokio_util::sync::CancellationToken;

    fn task(id: &str, kind: &str, status: &str, start: &str, description: &str) -> Task {
        Task {
            id: id.into(),
            kind: kind.into(),
            status: status.into(),
            start_time: Some(start.into()),
            description: description.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_status_parse_and_classes() {
        for s in ["RUNNING", "UPLOADING", "PENDING", "CANCELING"] {
            assert!(TaskStatus::parse(s).is_in_progress(), "{}", s);
            assert!(!TaskStatus::parse(s).is_terminal(), "{}", s);
        }
        for s in ["SUCCESS", "FAILED", "CANCELED"] {
            assert!(TaskStatus::parse(s).is_terminal(), "{}", s);
        }
        assert_eq!(TaskStatus::parse("REMOTE"), TaskStatus::Other("REMOTE".into()));
        assert_eq!(TaskStatus::parse("PAUSED").as_str(), "PAUSED");
        assert!(!TaskStatus::parse("CANCELING").can_cancel());
    }

    #[test]
    fn test_status_display_mapping() {
        let now = parse_timestamp("2024-05-01T10:01:00Z").unwrap();
        let start = Some("2024-05-01T10:00:00Z");

        let running = StatusDisplay::for_status(&TaskStatus::Running, start, None, None, now);
        assert!(running.has_spinner());
        assert_eq!(running.text(), "Running 1m 0s");

        let done = StatusDisplay::for_status(&TaskStatus::Success, start, Some("2024-05-01T10:00:20Z"), None, now);
        assert!(!done.has_spinner());
        assert_eq!(done.text(), "Finished in 20s");

        let failed = StatusDisplay::for_status(&TaskStatus::Failed, start, None, Some("boom"), now);
        assert_eq!(failed, StatusDisplay::Failed { message: "boom".into() });
        assert_eq!(failed.text(), "Error: boom");

        assert_eq!(StatusDisplay::for_status(&TaskStatus::Canceled, start, None, None, now), StatusDisplay::Canceled);
        assert_eq!(
            StatusDisplay::for_status(&TaskStatus::Paused, start, None, None, now),
            StatusDisplay::Plain("Paused".into())
        );
    }

    #[test]
    fn test_counter_rows_sorted_by_level() {
        let t: Task = serde_json::from_value(json!({
            "id": "t1",
            "counters": {
                "Bytes": { "value": 2048, "units": "bytes", "level": "" },
                "Errors": { "value": 2, "level": "error" },
                "Files": { "value": 10, "units": "files", "level": "notice" },
                "Warnings": { "value": 1, "level": "warning" }
            }
        }))
        .unwrap();
        let rows = counter_rows(&t, true);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Errors", "Warnings", "Files", "Bytes"]);
        assert_eq!(rows[3].value, "2 KiB");
        assert_eq!(rows[2].value, "10 files");
    }

    #[test]
    fn test_filter_tasks() {
        let tasks = vec![
            task("1", "Snapshot", "SUCCESS", "2024-05-01T08:00:00Z", "Snapshot /home"),
            task("2", "Restore", "FAILED", "2024-05-01T09:00:00Z", "Restore to /tmp"),
            task("3", "Snapshot", "RUNNING", "2024-05-01T10:00:00Z", "Snapshot /etc"),
        ];

        let all: Vec<&str> = filter_tasks(&tasks, TaskFilter::All, "", "").into_iter().map(|t| t.id.as_str()).collect();
        assert_eq!(all, vec!["3", "2", "1"]);

        let running = filter_tasks(&tasks, TaskFilter::Running, "", "");
        assert_eq!(running.len(), 1);
        assert_eq!(running[0].id, "3");

        let failed = filter_tasks(&tasks, TaskFilter::Failed, "", "");
        assert_eq!(failed[0].id, "2");

        let snapshots = filter_tasks(&tasks, TaskFilter::All, "Snapshot", "HOME");
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].id, "1");

        assert_eq!(task_kinds(&tasks), vec!["Restore".to_string(), "Snapshot".to_string()]);
    }

    #[test]
    fn test_log_level_class() {
        assert_eq!(log_level_class(0), "log-debug");
        assert_eq!(log_level_class(2), "log-warning");
        assert_eq!(log_level_class(4), "log-error");
    }

    #[tokio::test]
    async fn test_monitor_polls_until_terminal() {
        let backend = MockBackend::new();
        let running = json!({ "id": "t1", "status": "RUNNING", "startTime": "2024-05-01T10:00:00Z" });
        backend.ok(Method::Get, "/tasks/t1", running.clone());
        backend.ok(Method::Get, "/tasks/t1", running);
        backend.ok(
            Method::Get,
            "/tasks/t1",
            json!({ "id": "t1", "status": "SUCCESS", "startTime": "2024-05-01T10:00:00Z", "endTime": "2024-05-01T10:00:02Z" }),
        );
        backend.ok(Method::Get, "/tasks/t1/logs", json!({ "logs": [ { "ts": 1714557600.0, "msg": "done", "level": 1, "mod": "upload" } ] }));
        let api = Rc::new(ApiClient::new(backend));
        let monitor = Rc::new(RefCell::new(TaskMonitor::new("t1")));

        let cancel = CancellationToken::new();
        let sleeps = Rc::new(RefCell::new(Vec::new()));
        let ticks = poll_until(
            TASK_INTERVAL,
            &cancel,
            || {
                let (api, monitor) = (api.clone(), monitor.clone());
                async move {
                    let control = monitor.borrow_mut().refresh(&api).await;
                    control
                }
            },
            |d: Duration| {
                sleeps.borrow_mut().push(d);
                async {}
            },
        )
        .await;

        assert_eq!(ticks, 3);
        assert_eq!(*sleeps.borrow(), vec![TASK_INTERVAL, TASK_INTERVAL]);
        let monitor = monitor.borrow();
        assert!(monitor.is_done());
        assert_eq!(monitor.status(), Some(TaskStatus::Success));
        assert_eq!(monitor.logs.len(), 1);
        assert_eq!(monitor.logs[0].module, "upload");
        // first tick and the terminal tick
        assert_eq!(api.backend().calls_to(Method::Get, "/tasks/t1/logs").len(), 2);
    }

    #[tokio::test]
    async fn test_monitor_stops_on_not_connected() {
        let backend = MockBackend::new();
        backend.respond(Method::Get, "/tasks/t9", Err(crate::tests::not_connected()));
        let api = ApiClient::new(backend);
        let mut monitor = TaskMonitor::new("t9");

        assert_eq!(monitor.refresh(&api).await, PollControl::Stop);
        assert!(monitor.error.as_ref().unwrap().is_not_connected());
    }

    #[tokio::test]
    async fn test_poll_loop_stops_when_cancelled() {
        let cancel = CancellationToken::new();
        let ticks = poll_until(
            Duration::from_secs(3),
            &cancel,
            || async { PollControl::Continue },
            |_| {
                cancel.cancel();
                async {}
            },
        )
        .await;
        assert_eq!(ticks, 1);
        assert!(cancel.is_cancelled());
    }

    #[tokio::test]
    async fn test_poll_loop_cancelled_before_start_runs_nothing() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let ticks = poll_until(
            TASK_INTERVAL,
            &cancel,
            || async { PollControl::Continue },
            |_| async {},
        )
        .await;
        assert_eq!(ticks, 0);
    }

    #[tokio::test]
    async fn test_cancel_task_posts_to_task() {
        let backend = MockBackend::new();
        backend.ok(Method::Post, "/tasks/t1/cancel", json!({}));
        let api = ApiClient::new(backend);
        TaskMonitor::new("t1").cancel(&api).await.unwrap();
        assert_eq!(api.backend().calls_to(Method::Post, "/tasks/t1/cancel").len(), 1);
    }
}
