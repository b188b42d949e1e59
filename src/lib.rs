//! # Paymo CLI - Timesheet automation for Paymo
//!
//! A command-line utility for creating, listing, and exporting time-tracking
//! entries against the Paymo REST API, driven by YAML work logs.
//!
//! ## Features
//!
//! - **Batch Submission**: Preview and submit YAML timesheets, with automatic
//!   fallback from batch to per-entry creation under provider failures
//! - **Rate-Limit Awareness**: Honors `Retry-After` and the provider's
//!   rate-limit headers with bounded retries
//! - **Invoice Reconciliation**: Export exactly the entries billed on a
//!   specific invoice to CSV
//! - **Tool Server**: Exposes the same operations over a stdio JSON-RPC
//!   surface for automated agents
//!
//! ## Usage
//!
//! ```rust,no_run
//! use paymo_cli::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
