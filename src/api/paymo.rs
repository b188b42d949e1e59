use crate::libs::error::PaymoError;
use crate::libs::messages::Message;
use crate::libs::transform::ApiEntry;
use crate::{msg_error, msg_warning};
use chrono::{Duration, Local, NaiveDate};
use reqwest::{header, Client, Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DEFAULT_BASE_URL: &str = "https://app.paymoapp.com/api";

/// Remaining-request threshold below which a console warning is emitted.
const RATE_LIMIT_WARN_THRESHOLD: u64 = 5;

/// Wait applied when a 429 response carries no usable `Retry-After` header.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Invoice statuses considered outstanding for the last-week filter.
const OUTSTANDING_STATUSES: [&str; 2] = ["sent", "viewed"];

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Task {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub billable: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Entry {
    pub id: i64,
    #[serde(default)]
    pub task_id: Option<i64>,
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub billed: Option<bool>,
    #[serde(default)]
    pub invoice_item_id: Option<i64>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl Entry {
    /// Duration in seconds, from the explicit field when present, otherwise
    /// the start/end difference. Unparseable timestamps yield zero.
    pub fn duration_seconds(&self) -> i64 {
        if let Some(duration) = self.duration {
            return duration;
        }
        match (&self.start_time, &self.end_time) {
            (Some(start), Some(end)) => {
                let parse = |s: &str| chrono::DateTime::parse_from_rfc3339(s).ok();
                match (parse(start), parse(end)) {
                    (Some(start), Some(end)) => (end - start).num_seconds(),
                    _ => 0,
                }
            }
            _ => 0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct InvoiceItem {
    pub id: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Invoice {
    pub id: i64,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub invoiceitems: Option<Vec<InvoiceItem>>,
}

// Provider list responses are wrapped in an envelope keyed by entity name.
#[derive(Deserialize, Debug)]
struct ProjectsResponse {
    #[serde(default)]
    projects: Vec<Project>,
}

#[derive(Deserialize, Debug)]
struct TasksResponse {
    #[serde(default)]
    tasks: Vec<Task>,
}

#[derive(Deserialize, Debug)]
struct EntriesResponse {
    #[serde(default)]
    entries: Vec<Entry>,
}

#[derive(Deserialize, Debug)]
struct InvoicesResponse {
    #[serde(default)]
    invoices: Vec<Invoice>,
}

/// Client for the Paymo REST API.
///
/// Each operation issues exactly one HTTP call and returns parsed JSON or a
/// typed failure. Auth state is explicit: the key is held by the client
/// value, never by module globals.
pub struct Paymo {
    client: Client,
    base_url: String,
    api_key: String,
}

impl Paymo {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Constructor with an explicit base URL, used by tests against a mock
    /// server.
    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Issues one authenticated request and maps the response into the
    /// failure taxonomy. Rate-limit headers are inspected on every response;
    /// a 429 is returned as `RateLimited` with the provider's `Retry-After`
    /// (60s when absent). No retries happen here.
    async fn request(&self, method: Method, endpoint: &str, body: Option<&Value>) -> Result<Value, PaymoError> {
        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));

        let mut builder = self
            .client
            .request(method, &url)
            .basic_auth(&self.api_key, Some("X"))
            .header(header::ACCEPT, "application/json");
        if let Some(json) = body {
            builder = builder.json(json);
        }

        let response = builder.send().await?;
        self.check_rate_limit_headers(&response);

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            msg_error!(Message::RateLimitExceeded(retry_after));
            return Err(PaymoError::RateLimited(retry_after));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PaymoError::Api {
                status: status.as_u16(),
                body,
            });
        }

        // DELETE responses may be empty.
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| PaymoError::Api {
            status: status.as_u16(),
            body: format!("invalid JSON response: {} ({})", e, text),
        })
    }

    fn check_rate_limit_headers(&self, response: &reqwest::Response) {
        let header_value = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        if let Some(remaining) = header_value("x-ratelimit-remaining").and_then(|v| v.parse::<u64>().ok()) {
            if remaining < RATE_LIMIT_WARN_THRESHOLD {
                msg_warning!(Message::RateLimitLow {
                    remaining,
                    limit: header_value("x-ratelimit-limit").unwrap_or_default(),
                    decay: header_value("x-ratelimit-decay-period").unwrap_or_default(),
                });
            }
        }
    }

    pub async fn get_projects(&self, active_only: bool) -> Result<Vec<Project>, PaymoError> {
        let endpoint = if active_only { "projects?where=active=true" } else { "projects" };
        let value = self.request(Method::GET, endpoint, None).await?;
        let response: ProjectsResponse = parse(value)?;
        Ok(response.projects)
    }

    pub async fn get_tasks(&self, project_id: Option<i64>) -> Result<Vec<Task>, PaymoError> {
        let endpoint = match project_id {
            Some(id) => format!("tasks?where=project_id={}", id),
            None => "tasks".to_string(),
        };
        let value = self.request(Method::GET, &endpoint, None).await?;
        let response: TasksResponse = parse(value)?;
        Ok(response.tasks)
    }

    pub async fn get_task(&self, task_id: i64) -> Result<Task, PaymoError> {
        let value = self.request(Method::GET, &format!("tasks/{}", task_id), None).await?;
        let response: TasksResponse = parse(value)?;
        response
            .tasks
            .into_iter()
            .next()
            .ok_or_else(|| PaymoError::NotFound(format!("task {} not found", task_id)))
    }

    /// Lists time entries, optionally constrained to a date range. The
    /// provider expects a UTC interval spanning whole days.
    pub async fn get_entries(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Vec<Entry>, PaymoError> {
        let endpoint = match (start, end) {
            (Some(start), Some(end)) => format!(
                "entries?where=time_interval in (\"{}T00:00:00Z\",\"{}T23:59:59Z\")",
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            ),
            _ => "entries".to_string(),
        };
        let value = self.request(Method::GET, &endpoint, None).await?;
        let response: EntriesResponse = parse(value)?;
        Ok(response.entries)
    }

    pub async fn create_entry(&self, entry: &ApiEntry) -> Result<Value, PaymoError> {
        let body = serde_json::to_value(entry).map_err(|e| PaymoError::Validation(e.to_string()))?;
        self.request(Method::POST, "entries", Some(&body)).await
    }

    /// Creates multiple entries in a single API call by posting an array.
    pub async fn create_entries_batch(&self, entries: &[ApiEntry]) -> Result<Value, PaymoError> {
        let body = serde_json::to_value(entries).map_err(|e| PaymoError::Validation(e.to_string()))?;
        self.request(Method::POST, "entries", Some(&body)).await
    }

    pub async fn delete_entry(&self, entry_id: i64) -> Result<Value, PaymoError> {
        self.request(Method::DELETE, &format!("entries/{}", entry_id), None).await
    }

    pub async fn get_invoices(&self, client_id: Option<i64>, status: Option<&str>) -> Result<Vec<Invoice>, PaymoError> {
        let mut filters = Vec::new();
        if let Some(id) = client_id {
            filters.push(format!("client_id={}", id));
        }
        if let Some(status) = status {
            filters.push(format!("status={}", status));
        }
        let endpoint = if filters.is_empty() {
            "invoices".to_string()
        } else {
            format!("invoices?where={}", filters.join(" and "))
        };
        let value = self.request(Method::GET, &endpoint, None).await?;
        let response: InvoicesResponse = parse(value)?;
        Ok(response.invoices)
    }

    pub async fn get_invoice(&self, invoice_id: i64, include_items: bool) -> Result<Invoice, PaymoError> {
        let endpoint = if include_items {
            format!("invoices/{}?include=invoiceitems", invoice_id)
        } else {
            format!("invoices/{}", invoice_id)
        };
        let value = self.request(Method::GET, &endpoint, None).await?;
        let response: InvoicesResponse = parse(value)?;
        response
            .invoices
            .into_iter()
            .next()
            .ok_or_else(|| PaymoError::NotFound(format!("invoice {} not found", invoice_id)))
    }

    /// Outstanding (sent or viewed) invoices dated within the last 7 days.
    pub async fn outstanding_invoices_last_week(&self) -> Result<Vec<Invoice>, PaymoError> {
        let invoices = self.get_invoices(None, None).await?;
        let week_ago = Local::now().date_naive() - Duration::days(7);

        Ok(invoices
            .into_iter()
            .filter(|invoice| {
                let outstanding = invoice
                    .status
                    .as_deref()
                    .map(|s| OUTSTANDING_STATUSES.contains(&s.to_lowercase().as_str()))
                    .unwrap_or(false);
                let recent = invoice
                    .date
                    .as_deref()
                    .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
                    .map(|d| d >= week_ago)
                    .unwrap_or(false);
                outstanding && recent
            })
            .collect())
    }

    /// All active projects whose name contains `name`, case-insensitively.
    /// Callers decide what an ambiguous result means.
    pub async fn find_projects_by_name(&self, name: &str) -> Result<Vec<Project>, PaymoError> {
        let needle = name.to_lowercase();
        let projects = self.get_projects(true).await?;
        Ok(projects.into_iter().filter(|p| p.name.to_lowercase().contains(&needle)).collect())
    }
}

fn parse<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, PaymoError> {
    serde_json::from_value(value).map_err(|e| PaymoError::Api {
        status: 200,
        body: format!("unexpected response shape: {}", e),
    })
}
