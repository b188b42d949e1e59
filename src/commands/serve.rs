//! Tool-invocation surface for automated agent hosts.
//!
//! Speaks newline-delimited JSON-RPC 2.0 over stdio: `initialize`,
//! `tools/list`, and `tools/call`. Each tool mirrors a CLI operation but
//! returns structured JSON instead of rendered tables. stdout carries the
//! protocol exclusively; diagnostics go to tracing (stderr) via the debug
//! routing of the message macros.
//!
//! The server refuses to start without a configured API key — there is no
//! terminal to prompt on.

use super::parse_date;
use crate::api::Paymo;
use crate::libs::backoff::TokioSleeper;
use crate::libs::config::Config;
use crate::libs::export::{invoice_csv_filename, EntryExporter};
use crate::libs::messages::Message;
use crate::libs::processor::TimesheetProcessor;
use crate::libs::sanitize::clean_description;
use crate::libs::timesheet::Timesheet;
use crate::libs::transform::{to_api_entry, ApiEntry};
use crate::msg_error_anyhow;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Deserialize)]
struct RpcRequest {
    #[allow(dead_code)]
    jsonrpc: Option<String>,
    id: Option<Value>,
    method: String,
    params: Option<Value>,
}

#[derive(Debug, Serialize)]
struct RpcResponse<'a> {
    jsonrpc: &'a str,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<Value>,
}

fn respond_ok(id: Value, result: Value) -> RpcResponse<'static> {
    RpcResponse {
        jsonrpc: "2.0",
        id,
        result: Some(result),
        error: None,
    }
}

fn respond_err(id: Value, code: i64, message: &str) -> RpcResponse<'static> {
    RpcResponse {
        jsonrpc: "2.0",
        id,
        result: None,
        error: Some(json!({ "code": code, "message": message })),
    }
}

pub async fn cmd() -> Result<()> {
    // Route all message macros through tracing so stdout stays a clean
    // protocol channel.
    std::env::set_var("PAYMO_DEBUG", "1");

    let config = Config::read()?;
    let Some(api_key) = config.api_key.clone() else {
        return Err(msg_error_anyhow!(Message::ServerApiKeyMissing));
    };
    let client = Paymo::new(&api_key);

    tracing::info!("{}", Message::ServerStarted);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let request: RpcRequest = match serde_json::from_str(&line) {
            Ok(request) => request,
            Err(e) => {
                print_response(&respond_err(Value::Null, -32700, &format!("parse error: {}", e)));
                continue;
            }
        };

        // Notifications carry no id and expect no response.
        let Some(id) = request.id else { continue };

        let response = match request.method.as_str() {
            "initialize" => {
                let proto = request
                    .params
                    .as_ref()
                    .and_then(|p| p.get("protocolVersion"))
                    .and_then(|v| v.as_str())
                    .unwrap_or("unknown");
                respond_ok(
                    id,
                    json!({
                        "protocolVersion": proto,
                        "serverInfo": { "name": "paymo-cli", "version": env!("CARGO_PKG_VERSION") },
                        "capabilities": { "tools": {} }
                    }),
                )
            }
            "tools/list" => respond_ok(id, json!({ "tools": tool_descriptors() })),
            "tools/call" => {
                let params = request.params.unwrap_or(Value::Null);
                let name = params.get("name").and_then(Value::as_str).unwrap_or("").to_string();
                let arguments = params.get("arguments").cloned().unwrap_or(json!({}));
                match call_tool(&client, &config, &name, &arguments).await {
                    Ok(result) => respond_ok(
                        id,
                        json!({
                            "content": [{ "type": "text", "text": result.to_string() }]
                        }),
                    ),
                    Err(ToolError::UnknownTool) => respond_err(id, -32601, &format!("unknown tool '{}'", name)),
                    Err(ToolError::BadParams(message)) => respond_err(id, -32602, &message),
                    Err(ToolError::Failed(message)) => respond_err(id, -32000, &message),
                }
            }
            _ => respond_err(id, -32601, "Method not found"),
        };

        print_response(&response);
    }

    Ok(())
}

fn print_response(response: &RpcResponse<'_>) {
    match serde_json::to_string(response) {
        Ok(text) => println!("{}", text),
        Err(e) => tracing::error!("failed to serialize response: {}", e),
    }
}

enum ToolError {
    UnknownTool,
    BadParams(String),
    Failed(String),
}

fn required_str(args: &Value, key: &str) -> Result<String, ToolError> {
    args.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ToolError::BadParams(format!("missing required string parameter '{}'", key)))
}

fn required_i64(args: &Value, key: &str) -> Result<i64, ToolError> {
    args.get(key)
        .and_then(Value::as_i64)
        .ok_or_else(|| ToolError::BadParams(format!("missing required integer parameter '{}'", key)))
}

fn required_date(args: &Value, key: &str) -> Result<chrono::NaiveDate, ToolError> {
    let raw = required_str(args, key)?;
    parse_date(&raw).map_err(|_| ToolError::BadParams(format!("'{}' must be a YYYY-MM-DD date", key)))
}

fn failed(e: impl std::fmt::Display) -> ToolError {
    ToolError::Failed(e.to_string())
}

async fn call_tool(client: &Paymo, config: &Config, name: &str, args: &Value) -> Result<Value, ToolError> {
    let sleeper = TokioSleeper;

    match name {
        "list_projects" => {
            let projects = client.get_projects(true).await.map_err(failed)?;
            Ok(json!({ "projects": projects }))
        }
        "list_tasks" => {
            let project_id = required_i64(args, "project_id")?;
            let tasks = client.get_tasks(Some(project_id)).await.map_err(failed)?;
            Ok(json!({ "tasks": tasks }))
        }
        "list_entries" => {
            let start = required_date(args, "start_date")?;
            let end = required_date(args, "end_date")?;
            let project_id = args.get("project_id").and_then(Value::as_i64);
            let billed = args.get("billed").and_then(Value::as_bool);

            let mut entries = client.get_entries(Some(start), Some(end)).await.map_err(failed)?;
            if let Some(project_id) = project_id {
                entries.retain(|entry| entry.project_id == Some(project_id));
            }
            if let Some(billed) = billed {
                entries.retain(|entry| entry.billed.unwrap_or(false) == billed);
            }

            let exporter = EntryExporter::new(client, &sleeper);
            let task_names = exporter.task_names(&entries).await;

            let enriched: Vec<Value> = entries
                .iter()
                .map(|entry| {
                    json!({
                        "id": entry.id,
                        "project_id": entry.project_id,
                        "task_id": entry.task_id,
                        "task_name": entry.task_id.and_then(|id| task_names.get(&id).cloned()).unwrap_or_default(),
                        "date": entry.date.clone().unwrap_or_default(),
                        "start_time": entry.start_time.clone().unwrap_or_default(),
                        "end_time": entry.end_time.clone().unwrap_or_default(),
                        "duration_hours": (entry.duration_seconds() as f64 / 3600.0 * 100.0).round() / 100.0,
                        "description": entry.description.as_deref().map(clean_description).unwrap_or_default(),
                        "billed": entry.billed.unwrap_or(false),
                        "price": entry.price.unwrap_or(0.0),
                    })
                })
                .collect();
            Ok(json!({ "entries": enriched }))
        }
        "create_entry" => {
            let api_entry = ApiEntry {
                task_id: required_i64(args, "task_id")?,
                start_time: None,
                end_time: None,
                date: Some(required_date(args, "date")?.format("%Y-%m-%d").to_string()),
                duration: Some(
                    (args.get("duration_hours").and_then(Value::as_f64).ok_or_else(|| {
                        ToolError::BadParams("missing required number parameter 'duration_hours'".to_string())
                    })? * 3600.0)
                        .round() as i64,
                ),
                description: args.get("description").and_then(Value::as_str).map(str::to_string),
                billed: None,
            };
            client.create_entry(&api_entry).await.map_err(failed)
        }
        "submit_timesheet" => {
            let yaml = required_str(args, "yaml")?;
            let timesheet = Timesheet::from_str(&yaml).map_err(failed)?;

            let processor = TimesheetProcessor::new(client, config, &sleeper);
            let (_project_id, task_id) = processor.resolve_project_task(&timesheet.matter).await.map_err(failed)?;
            let api_entries: Vec<ApiEntry> = timesheet
                .entries
                .iter()
                .map(|entry| to_api_entry(entry, task_id, &config.timezone))
                .collect::<Result<_, _>>()
                .map_err(failed)?;
            let created = processor.create_entries(&timesheet.entries, &api_entries).await.map_err(failed)?;

            Ok(json!({
                "success": true,
                "entries_created": created.len(),
                "entries": created,
            }))
        }
        "export_timesheet" => {
            let start = required_date(args, "start_date")?;
            let end = required_date(args, "end_date")?;
            let project_id = args.get("project_id").and_then(Value::as_i64);

            let exporter = EntryExporter::new(client, &sleeper);
            let csv_content = exporter.export_range(start, end, project_id).await.map_err(failed)?;

            let output = args
                .get("output")
                .and_then(Value::as_str)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(format!("paymo_timesheet_{}_{}.csv", start, end)));
            fs::write(&output, &csv_content).map_err(failed)?;

            Ok(json!({ "path": output.display().to_string(), "bytes": csv_content.len() }))
        }
        "list_invoices" => {
            let client_id = args.get("client_id").and_then(Value::as_i64);
            let status = args.get("status").and_then(Value::as_str).map(str::to_string);
            let invoices = client.get_invoices(client_id, status.as_deref()).await.map_err(failed)?;
            Ok(json!({ "invoices": invoices }))
        }
        "outstanding_invoices_last_week" => {
            let invoices = client.outstanding_invoices_last_week().await.map_err(failed)?;
            Ok(json!({ "invoices": invoices }))
        }
        "export_invoice_timesheet" => {
            let invoice_id = required_i64(args, "invoice_id")?;
            let output_dir = args.get("output_dir").and_then(Value::as_str).unwrap_or(".");

            let invoice = client.get_invoice(invoice_id, false).await.map_err(failed)?;
            let exporter = EntryExporter::new(client, &sleeper);
            let csv_content = exporter.export_invoice(invoice_id).await.map_err(failed)?;

            fs::create_dir_all(output_dir).map_err(failed)?;
            let path = PathBuf::from(output_dir).join(invoice_csv_filename(invoice.number.as_deref(), invoice.id));
            fs::write(&path, &csv_content).map_err(failed)?;

            Ok(json!({ "path": path.display().to_string(), "bytes": csv_content.len() }))
        }
        _ => Err(ToolError::UnknownTool),
    }
}

fn tool_descriptors() -> Vec<Value> {
    vec![
        json!({
            "name": "list_projects",
            "description": "List all active Paymo projects",
            "inputSchema": { "type": "object", "properties": {} }
        }),
        json!({
            "name": "list_tasks",
            "description": "List tasks for a specific Paymo project",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "project_id": { "type": "integer", "description": "Paymo project ID" }
                },
                "required": ["project_id"]
            }
        }),
        json!({
            "name": "list_entries",
            "description": "List time entries in a date range with task names, durations, and cleaned descriptions",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "start_date": { "type": "string", "description": "Start date (YYYY-MM-DD)" },
                    "end_date": { "type": "string", "description": "End date (YYYY-MM-DD)" },
                    "project_id": { "type": "integer", "description": "Optional project filter" },
                    "billed": { "type": "boolean", "description": "Optional billed-status filter" }
                },
                "required": ["start_date", "end_date"]
            }
        }),
        json!({
            "name": "create_entry",
            "description": "Create a single time entry from a date and a duration in hours",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "task_id": { "type": "integer", "description": "Paymo task ID" },
                    "date": { "type": "string", "description": "Date (YYYY-MM-DD)" },
                    "duration_hours": { "type": "number", "description": "Hours worked" },
                    "description": { "type": "string", "description": "Entry description" }
                },
                "required": ["task_id", "date", "duration_hours"]
            }
        }),
        json!({
            "name": "submit_timesheet",
            "description": "Submit a complete timesheet from YAML content; entries are created without interactive confirmation",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "yaml": { "type": "string", "description": "YAML timesheet content with matter and entries" }
                },
                "required": ["yaml"]
            }
        }),
        json!({
            "name": "export_timesheet",
            "description": "Export all entries in a date range to a CSV file and return its path",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "start_date": { "type": "string", "description": "Start date (YYYY-MM-DD)" },
                    "end_date": { "type": "string", "description": "End date (YYYY-MM-DD)" },
                    "project_id": { "type": "integer", "description": "Optional project filter" },
                    "output": { "type": "string", "description": "Optional output file path" }
                },
                "required": ["start_date", "end_date"]
            }
        }),
        json!({
            "name": "list_invoices",
            "description": "List Paymo invoices, optionally filtered by client and status",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "client_id": { "type": "integer", "description": "Filter by client ID" },
                    "status": { "type": "string", "description": "Filter by status (sent, viewed, paid)" }
                }
            }
        }),
        json!({
            "name": "outstanding_invoices_last_week",
            "description": "List outstanding invoices (sent or viewed) dated within the last 7 days",
            "inputSchema": { "type": "object", "properties": {} }
        }),
        json!({
            "name": "export_invoice_timesheet",
            "description": "Export the entries billed on a specific invoice to CSV and return the file path",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "invoice_id": { "type": "integer", "description": "Invoice ID to export" },
                    "output_dir": { "type": "string", "description": "Output directory (defaults to current)" }
                },
                "required": ["invoice_id"]
            }
        }),
    ]
}
