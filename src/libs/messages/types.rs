#[derive(Debug, Clone)]
pub enum Message {
    // === RATE LIMIT MESSAGES ===
    RateLimitLow {
        remaining: u64,
        limit: String,
        decay: String,
    },
    RateLimitExceeded(u64),
    RateLimitWaiting(u64),

    // === CONFIGURATION MESSAGES ===
    ConfigFileNotFound(String),
    ConfigSaved(String),
    ConfigProjectMappings(usize),
    PromptApiKey,
    PromptTimezone,

    // === RESOLUTION MESSAGES ===
    ResolvingMatter(String),
    UsingProject { name: String, id: i64 },
    UsingTask { name: String, id: i64 },

    // === SUBMISSION MESSAGES ===
    TimesheetTotal(f64),
    TimesheetTotalBilled { hours: f64, amount: f64, rate: f64 },
    DryRun,
    ConfirmCreateEntries(usize),
    Cancelled,
    AutoConfirmed,
    CreatingBatch(usize),
    BatchCreated(usize),
    BatchFallback(String),
    CreatingEntry { index: usize, total: usize, date: String },
    EntryCreated,
    EntryCreatedAfterRetry,
    EntryRetryFailed(String),
    EntryFailed(String),
    EntriesCreated(usize),

    // === DELETE MESSAGES ===
    AboutToDeleteEntries(usize),
    EntryToDelete(i64),
    ConfirmDeleteEntries,
    DeletingEntry(i64),
    DeleteFailed(String),
    EntriesDeleted(usize),

    // === EXPORT MESSAGES ===
    ExportingTimesheet { start: String, end: String },
    ExportProjectFilter(i64),
    ExportCompleted { path: String, bytes: usize },
    ExportingInvoice(String),
    InvoicePeriod { start: String, end: String },
    InvoiceAmount(f64),
    InvoiceExportSaved(String),
    InvoiceExportFailed(String),
    InvoiceExportsCompleted(usize),
    TaskFetchRetry(u64),
    TaskFetchFailed { task_id: i64, error: String },

    // === INVOICE MESSAGES ===
    NoInvoicesFound,
    OutstandingInvoicesHeader,
    OutstandingInvoicesFound(usize),
    InvoicesTotal { total: f64, count: usize },
    MustSpecifyInvoiceSelector,

    // === LIST MESSAGES ===
    TotalHours(f64),

    // === TOOL SERVER MESSAGES ===
    ServerStarted,
    ServerApiKeyMissing,
}
