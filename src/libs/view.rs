use crate::api::{Entry, Invoice, Project, Task};
use crate::libs::formatter::{format_duration, format_hours, truncate_description};
use crate::libs::processor::PreviewRow;
use crate::libs::sanitize::clean_description;
use chrono::Duration;
use prettytable::{row, Table};
use std::error::Error;

const DESCRIPTION_WIDTH: usize = 50;

pub struct View {}

impl View {
    pub fn projects(projects: &[Project]) -> Result<(), Box<dyn Error>> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "CLIENT", "ACTIVE"]);
        for project in projects {
            table.add_row(row![
                project.id,
                project.name,
                project.client_name.as_deref().unwrap_or(""),
                if project.active.unwrap_or(false) { "✓" } else { "✗" }
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn tasks(tasks: &[Task]) -> Result<(), Box<dyn Error>> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "BILLABLE"]);
        for task in tasks {
            table.add_row(row![task.id, task.name, if task.billable.unwrap_or(false) { "✓" } else { "✗" }]);
        }
        table.printstd();

        Ok(())
    }

    pub fn entries(entries: &[Entry]) -> Result<(), Box<dyn Error>> {
        let mut table = Table::new();

        table.add_row(row!["ID", "DATE", "DURATION", "DESCRIPTION"]);
        for entry in entries {
            let duration = format_duration(&Duration::seconds(entry.duration_seconds()));
            let description = entry.description.as_deref().map(clean_description).unwrap_or_default();
            table.add_row(row![
                entry.id,
                entry.date.as_deref().unwrap_or(""),
                duration,
                truncate_description(&description, DESCRIPTION_WIDTH)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn invoices(invoices: &[Invoice]) -> Result<(), Box<dyn Error>> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NUMBER", "CLIENT", "AMOUNT", "DATE", "STATUS"]);
        for invoice in invoices {
            table.add_row(row![
                invoice.id,
                invoice.number.as_deref().unwrap_or(""),
                invoice.client_name.as_deref().unwrap_or(""),
                format!("${:.2}", invoice.total.unwrap_or(0.0)),
                invoice.date.as_deref().unwrap_or(""),
                invoice.status.as_deref().unwrap_or("")
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn preview(rows: &[PreviewRow]) -> Result<(), Box<dyn Error>> {
        let mut table = Table::new();

        table.add_row(row!["DATE", "TIME", "DURATION", "HOURS", "DESCRIPTION"]);
        for preview in rows {
            table.add_row(row![
                preview.date,
                preview.time,
                preview.duration,
                format_hours(preview.hours),
                truncate_description(&preview.description, DESCRIPTION_WIDTH)
            ]);
        }
        table.printstd();

        Ok(())
    }
}
