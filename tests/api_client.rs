#[cfg(test)]
mod tests {
    use chrono::{Duration, Local, NaiveDate};
    use paymo_cli::api::{Entry, Paymo};
    use paymo_cli::libs::error::PaymoError;

    fn entry_with(duration: Option<i64>, start: Option<&str>, end: Option<&str>) -> Entry {
        Entry {
            id: 1,
            task_id: None,
            project_id: None,
            date: None,
            start_time: start.map(str::to_string),
            end_time: end.map(str::to_string),
            duration,
            description: None,
            billed: None,
            invoice_item_id: None,
            price: None,
        }
    }

    #[test]
    fn test_duration_seconds_prefers_explicit_field() {
        let entry = entry_with(Some(5400), Some("2024-01-15T15:00:00Z"), Some("2024-01-15T16:00:00Z"));
        assert_eq!(entry.duration_seconds(), 5400);
    }

    #[test]
    fn test_duration_seconds_from_time_range() {
        let entry = entry_with(None, Some("2024-01-15T15:00:00Z"), Some("2024-01-15T17:30:00Z"));
        assert_eq!(entry.duration_seconds(), 9000);
    }

    #[test]
    fn test_duration_seconds_unparseable_times_yield_zero() {
        let entry = entry_with(None, Some("bogus"), Some("2024-01-15T17:30:00Z"));
        assert_eq!(entry.duration_seconds(), 0);
        assert_eq!(entry_with(None, None, None).duration_seconds(), 0);
    }

    #[tokio::test]
    async fn test_get_projects_parses_envelope() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/projects")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"projects":[{"id":1,"name":"Acme Corp","client_name":"Acme","active":true}]}"#)
            .create_async()
            .await;

        let client = Paymo::with_base_url("key", &server.url());
        let projects = client.get_projects(true).await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].id, 1);
        assert_eq!(projects[0].name, "Acme Corp");
    }

    #[tokio::test]
    async fn test_rate_limited_carries_retry_after() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/projects")
            .match_query(mockito::Matcher::Any)
            .with_status(429)
            .with_header("Retry-After", "45")
            .create_async()
            .await;

        let client = Paymo::with_base_url("key", &server.url());
        let error = client.get_projects(true).await.unwrap_err();
        assert!(matches!(error, PaymoError::RateLimited(45)));
        assert_eq!(error.retry_after(), Some(45));
    }

    #[tokio::test]
    async fn test_rate_limited_defaults_to_sixty_seconds() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/entries")
            .match_query(mockito::Matcher::Any)
            .with_status(429)
            .create_async()
            .await;

        let client = Paymo::with_base_url("key", &server.url());
        let error = client.get_entries(None, None).await.unwrap_err();
        assert!(matches!(error, PaymoError::RateLimited(60)));
    }

    #[tokio::test]
    async fn test_api_error_preserves_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/tasks")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .with_body("something broke")
            .create_async()
            .await;

        let client = Paymo::with_base_url("key", &server.url());
        match client.get_tasks(None).await.unwrap_err() {
            PaymoError::Api { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "something broke");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_task_missing_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/tasks/7")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"tasks":[]}"#)
            .create_async()
            .await;

        let client = Paymo::with_base_url("key", &server.url());
        assert!(matches!(client.get_task(7).await.unwrap_err(), PaymoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_requests_use_basic_auth() {
        // key:X base64 -> a2V5Olg=
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/projects")
            .match_query(mockito::Matcher::Any)
            .match_header("authorization", "Basic a2V5Olg=")
            .with_status(200)
            .with_body(r#"{"projects":[]}"#)
            .create_async()
            .await;

        let client = Paymo::with_base_url("key", &server.url());
        client.get_projects(false).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_find_projects_by_name_substring_case_insensitive() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/projects")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"projects":[
                    {"id":1,"name":"Smith v. Jones"},
                    {"id":2,"name":"SMITH estate"},
                    {"id":3,"name":"Acme Corp"}
                ]}"#,
            )
            .create_async()
            .await;

        let client = Paymo::with_base_url("key", &server.url());
        let matches = client.find_projects_by_name("smith").await.unwrap();
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|p| p.name.to_lowercase().contains("smith")));
    }

    #[tokio::test]
    async fn test_outstanding_invoices_filters_status_and_age() {
        let today = Local::now().date_naive();
        let recent = (today - Duration::days(2)).format("%Y-%m-%d").to_string();
        let old = (today - Duration::days(20)).format("%Y-%m-%d").to_string();

        let body = format!(
            r##"{{"invoices":[
                {{"id":1,"number":"#101","status":"sent","date":"{recent}","total":100.0}},
                {{"id":2,"number":"#102","status":"sent","date":"{old}","total":200.0}},
                {{"id":3,"number":"#103","status":"paid","date":"{recent}","total":300.0}},
                {{"id":4,"number":"#104","status":"viewed","date":"{recent}","total":400.0}}
            ]}}"##
        );

        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/invoices")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let client = Paymo::with_base_url("key", &server.url());
        let outstanding = client.outstanding_invoices_last_week().await.unwrap();
        let ids: Vec<i64> = outstanding.iter().map(|invoice| invoice.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[tokio::test]
    async fn test_get_entries_sends_day_spanning_interval() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/entries")
            .match_query(mockito::Matcher::Regex("time_interval".to_string()))
            .with_status(200)
            .with_body(r#"{"entries":[]}"#)
            .create_async()
            .await;

        let client = Paymo::with_base_url("key", &server.url());
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        client.get_entries(Some(start), Some(end)).await.unwrap();
        mock.assert_async().await;
    }
}
