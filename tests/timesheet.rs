#[cfg(test)]
mod tests {
    use paymo_cli::libs::timesheet::Timesheet;

    const SAMPLE: &str = r#"
matter: "Smith v. Jones"
rate: 250
entries:
  - date: 2024-01-15
    start_time: "09:00"
    end_time: "11:30"
    description: "Draft motion"
  - date: 2024-01-16
    duration_hours: 1.5
    billed: false
    timezone: "America/New_York"
    task_id: 77
"#;

    #[test]
    fn test_parse_full_timesheet() {
        let timesheet = Timesheet::from_str(SAMPLE).unwrap();
        assert_eq!(timesheet.matter, "Smith v. Jones");
        assert_eq!(timesheet.rate, Some(250.0));
        assert_eq!(timesheet.entries.len(), 2);

        let first = &timesheet.entries[0];
        assert_eq!(first.start_time.as_deref(), Some("09:00"));
        assert_eq!(first.end_time.as_deref(), Some("11:30"));
        assert!(first.has_time_range());
        assert!(first.duration_hours.is_none());

        let second = &timesheet.entries[1];
        assert_eq!(second.duration_hours, Some(1.5));
        assert_eq!(second.billed, Some(false));
        assert_eq!(second.timezone.as_deref(), Some("America/New_York"));
        assert_eq!(second.task_id, Some(77));
        assert!(!second.has_time_range());
    }

    #[test]
    fn test_rate_is_optional() {
        let yaml = "matter: Acme\nentries:\n  - date: 2024-01-15\n    duration_hours: 1\n";
        let timesheet = Timesheet::from_str(yaml).unwrap();
        assert_eq!(timesheet.rate, None);
    }

    #[test]
    fn test_missing_entries_field_rejected() {
        assert!(Timesheet::from_str("matter: Acme\n").is_err());
    }

    #[test]
    fn test_empty_entries_rejected() {
        assert!(Timesheet::from_str("matter: Acme\nentries: []\n").is_err());
    }

    #[test]
    fn test_missing_matter_rejected() {
        let yaml = "entries:\n  - date: 2024-01-15\n    duration_hours: 1\n";
        assert!(Timesheet::from_str(yaml).is_err());
    }

    #[test]
    fn test_blank_matter_rejected() {
        let yaml = "matter: \"  \"\nentries:\n  - date: 2024-01-15\n    duration_hours: 1\n";
        assert!(Timesheet::from_str(yaml).is_err());
    }

    #[test]
    fn test_invalid_date_rejected() {
        let yaml = "matter: Acme\nentries:\n  - date: not-a-date\n    duration_hours: 1\n";
        assert!(Timesheet::from_str(yaml).is_err());
    }
}
