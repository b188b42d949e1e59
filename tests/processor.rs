#[cfg(test)]
mod tests {
    use paymo_cli::api::Paymo;
    use paymo_cli::libs::backoff::RecordingSleeper;
    use paymo_cli::libs::config::{Config, ProjectMapping};
    use paymo_cli::libs::error::PaymoError;
    use paymo_cli::libs::processor::TimesheetProcessor;
    use paymo_cli::libs::timesheet::Timesheet;
    use std::time::Duration;

    fn config_with_mapping(matter: &str, project_id: i64, task_id: i64) -> Config {
        let mut config = Config::default();
        config.projects.insert(matter.to_string(), ProjectMapping { project_id, task_id });
        config
    }

    fn three_entry_timesheet() -> Timesheet {
        Timesheet::from_str(
            r#"
matter: Acme
rate: 100
entries:
  - date: 2024-01-15
    duration_hours: 1.0
    description: "Day one"
  - date: 2024-01-16
    duration_hours: 2.0
    description: "Day two"
  - date: 2024-01-17
    duration_hours: 0.5
    description: "Day three"
"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_resolve_prefers_config_mapping() {
        // Unroutable base URL proves no network call happens.
        let client = Paymo::with_base_url("key", "http://127.0.0.1:1");
        let config = config_with_mapping("Acme", 12, 34);
        let sleeper = RecordingSleeper::new();
        let processor = TimesheetProcessor::new(&client, &config, &sleeper);

        let (project_id, task_id) = processor.resolve_project_task("Acme").await.unwrap();
        assert_eq!((project_id, task_id), (12, 34));
    }

    #[tokio::test]
    async fn test_resolve_unique_remote_match() {
        let mut server = mockito::Server::new_async().await;
        let _projects = server
            .mock("GET", "/projects")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"projects":[{"id":5,"name":"Acme Corp"},{"id":6,"name":"Other"}]}"#)
            .create_async()
            .await;
        let _tasks = server
            .mock("GET", "/tasks")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"tasks":[{"id":50,"name":"Legal work","project_id":5}]}"#)
            .create_async()
            .await;

        let client = Paymo::with_base_url("key", &server.url());
        let config = Config::default();
        let sleeper = RecordingSleeper::new();
        let processor = TimesheetProcessor::new(&client, &config, &sleeper);

        let (project_id, task_id) = processor.resolve_project_task("acme").await.unwrap();
        assert_eq!((project_id, task_id), (5, 50));
    }

    #[tokio::test]
    async fn test_resolve_ambiguous_match_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _projects = server
            .mock("GET", "/projects")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"projects":[{"id":5,"name":"Acme Corp"},{"id":6,"name":"Acme Holdings"}]}"#)
            .create_async()
            .await;

        let client = Paymo::with_base_url("key", &server.url());
        let config = Config::default();
        let sleeper = RecordingSleeper::new();
        let processor = TimesheetProcessor::new(&client, &config, &sleeper);

        match processor.resolve_project_task("Acme").await.unwrap_err() {
            PaymoError::NotFound(message) => {
                assert!(message.contains("2 projects"));
                assert!(message.contains("Acme Corp"));
                assert!(message.contains("Acme Holdings"));
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_resolve_no_match_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _projects = server
            .mock("GET", "/projects")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"projects":[{"id":6,"name":"Other"}]}"#)
            .create_async()
            .await;

        let client = Paymo::with_base_url("key", &server.url());
        let config = Config::default();
        let sleeper = RecordingSleeper::new();
        let processor = TimesheetProcessor::new(&client, &config, &sleeper);

        assert!(matches!(
            processor.resolve_project_task("Acme").await.unwrap_err(),
            PaymoError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_resolve_multi_task_project_requires_mapping() {
        let mut server = mockito::Server::new_async().await;
        let _projects = server
            .mock("GET", "/projects")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"projects":[{"id":5,"name":"Acme Corp"}]}"#)
            .create_async()
            .await;
        let _tasks = server
            .mock("GET", "/tasks")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"tasks":[{"id":50,"name":"A"},{"id":51,"name":"B"}]}"#)
            .create_async()
            .await;

        let client = Paymo::with_base_url("key", &server.url());
        let config = Config::default();
        let sleeper = RecordingSleeper::new();
        let processor = TimesheetProcessor::new(&client, &config, &sleeper);

        match processor.resolve_project_task("Acme").await.unwrap_err() {
            PaymoError::NotFound(message) => assert!(message.contains("2 tasks")),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_preview_rows_totals() {
        let client = Paymo::with_base_url("key", "http://127.0.0.1:1");
        let config = config_with_mapping("Acme", 12, 34);
        let sleeper = RecordingSleeper::new();
        let processor = TimesheetProcessor::new(&client, &config, &sleeper);

        let (rows, total) = processor.preview_rows(&three_entry_timesheet()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(total, 3.5);
        assert_eq!(rows[0].date, "2024-01-15");
        assert_eq!(rows[0].time, "—");
        assert_eq!(rows[0].duration, "1:00");
        assert_eq!(rows[1].hours, 2.0);
    }

    #[tokio::test]
    async fn test_batch_success_returns_created_entries() {
        let mut server = mockito::Server::new_async().await;
        // Batch bodies are JSON arrays.
        let batch = server
            .mock("POST", "/entries")
            .match_body(mockito::Matcher::Regex(r"^\[".to_string()))
            .with_status(200)
            .with_body(r#"{"entries":[{"id":1},{"id":2},{"id":3}]}"#)
            .create_async()
            .await;

        let client = Paymo::with_base_url("key", &server.url());
        let config = config_with_mapping("Acme", 12, 34);
        let sleeper = RecordingSleeper::new();
        let processor = TimesheetProcessor::new(&client, &config, &sleeper);

        let created = processor.submit(&three_entry_timesheet(), false, true).await.unwrap();
        assert_eq!(created.len(), 3);
        batch.assert_async().await;
        // No fallback, no pacing sleeps.
        assert!(sleeper.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_batch_failure_falls_back_to_individual_calls() {
        let mut server = mockito::Server::new_async().await;
        let batch = server
            .mock("POST", "/entries")
            .match_body(mockito::Matcher::Regex(r"^\[".to_string()))
            .with_status(500)
            .with_body("batch rejected")
            .create_async()
            .await;
        let individual = server
            .mock("POST", "/entries")
            .match_body(mockito::Matcher::Regex(r"^\{".to_string()))
            .with_status(201)
            .with_body(r#"{"entries":[{"id":9}]}"#)
            .expect(3)
            .create_async()
            .await;

        let client = Paymo::with_base_url("key", &server.url());
        let config = config_with_mapping("Acme", 12, 34);
        let sleeper = RecordingSleeper::new();
        let processor = TimesheetProcessor::new(&client, &config, &sleeper);

        let created = processor.submit(&three_entry_timesheet(), false, true).await.unwrap();
        assert_eq!(created.len(), 3);
        batch.assert_async().await;
        individual.assert_async().await;

        // A 2-second gap between successive calls, none after the last.
        assert_eq!(sleeper.recorded(), vec![Duration::from_secs(2), Duration::from_secs(2)]);
    }

    #[tokio::test]
    async fn test_rate_limited_fallback_waits_and_retries_once() {
        let mut server = mockito::Server::new_async().await;
        let _batch = server
            .mock("POST", "/entries")
            .match_body(mockito::Matcher::Regex(r"^\[".to_string()))
            .with_status(500)
            .create_async()
            .await;
        // Every individual call is rate limited, so each entry gets exactly
        // one retry and is then skipped.
        let individual = server
            .mock("POST", "/entries")
            .match_body(mockito::Matcher::Regex(r"^\{".to_string()))
            .with_status(429)
            .with_header("Retry-After", "45")
            .expect(6)
            .create_async()
            .await;

        let client = Paymo::with_base_url("key", &server.url());
        let config = config_with_mapping("Acme", 12, 34);
        let sleeper = RecordingSleeper::new();
        let processor = TimesheetProcessor::new(&client, &config, &sleeper);

        let created = processor.submit(&three_entry_timesheet(), false, true).await.unwrap();
        assert!(created.is_empty());
        individual.assert_async().await;

        // Per entry: one 45s provider-mandated wait; inter-call gaps between
        // entries, no trailing gap.
        assert_eq!(
            sleeper.recorded(),
            vec![
                Duration::from_secs(45),
                Duration::from_secs(2),
                Duration::from_secs(45),
                Duration::from_secs(2),
                Duration::from_secs(45),
            ]
        );
    }

    #[tokio::test]
    async fn test_dry_run_creates_nothing() {
        let mut server = mockito::Server::new_async().await;
        let post = server
            .mock("POST", "/entries")
            .match_body(mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = Paymo::with_base_url("key", &server.url());
        let config = config_with_mapping("Acme", 12, 34);
        let sleeper = RecordingSleeper::new();
        let processor = TimesheetProcessor::new(&client, &config, &sleeper);

        let created = processor.submit(&three_entry_timesheet(), true, true).await.unwrap();
        assert!(created.is_empty());
        post.assert_async().await;
    }

    #[tokio::test]
    async fn test_invalid_entry_aborts_before_any_request() {
        let mut server = mockito::Server::new_async().await;
        let post = server
            .mock("POST", "/entries")
            .match_body(mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let timesheet = Timesheet::from_str(
            r#"
matter: Acme
entries:
  - date: 2024-01-15
    duration_hours: 1.0
  - date: 2024-01-16
    start_time: "09:00"
"#,
        )
        .unwrap();

        let client = Paymo::with_base_url("key", &server.url());
        let config = config_with_mapping("Acme", 12, 34);
        let sleeper = RecordingSleeper::new();
        let processor = TimesheetProcessor::new(&client, &config, &sleeper);

        assert!(processor.submit(&timesheet, false, true).await.is_err());
        post.assert_async().await;
    }
}
