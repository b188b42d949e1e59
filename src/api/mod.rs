//! API client module for the Paymo REST service.
//!
//! Provides the [`Paymo`] client plus the typed wire models for projects,
//! tasks, time entries, and invoices. The client authenticates with basic
//! auth (API key as username), inspects the provider's rate-limit response
//! headers on every call, and surfaces failures through the
//! [`crate::libs::error::PaymoError`] taxonomy.
//!
//! Retry policy deliberately lives in the callers (processor, exporter);
//! the client issues exactly one HTTP request per operation.

pub mod paymo;

pub use paymo::{Entry, Invoice, InvoiceItem, Paymo, Project, Task};
