//! Typed, lenient readings of result envelopes.
//!
//! Missing, null, or wrongly typed fields become `None` and render as
//! `unknown` or `unavailable`; nothing here fails on odd input.

use std::fmt;

use serde_json::Value;

use crate::api::Envelope;

/// Columns shown per transaction row.
const MAX_COLUMNS: usize = 6;

/// Width of a rendered transaction cell.
const CELL_WIDTH: usize = 18;

fn lookup<'a>(env: &'a Envelope, path: &[&str]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    rest.iter()
        .try_fold(env.get(*first)?, |value, key| value.get(key))
}

fn str_at(env: &Envelope, path: &[&str]) -> Option<String> {
    lookup(env, path).and_then(Value::as_str).map(str::to_string)
}

fn bool_at(env: &Envelope, path: &[&str]) -> Option<bool> {
    lookup(env, path).and_then(Value::as_bool)
}

fn u64_at(env: &Envelope, path: &[&str]) -> Option<u64> {
    lookup(env, path).and_then(Value::as_u64)
}

fn or_unknown(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("unknown")
}

fn yes_no(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "yes",
        Some(false) => "no",
        None => "unavailable",
    }
}

fn count(value: Option<u64>) -> String {
    value.map_or_else(|| "unavailable".to_string(), |n| n.to_string())
}

/// Render a JSON scalar for a table cell.
fn cell(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Health report of the service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HealthSummary {
    /// Overall status word, e.g. `healthy` or `error`.
    pub status: Option<String>,
    /// Free-text message; set on fallbacks.
    pub message: Option<String>,
    /// Service version.
    pub version: Option<String>,
    /// `database.connected`
    pub database_connected: Option<bool>,
    /// `database.password_configured`
    pub password_configured: Option<bool>,
    /// `data.available`
    pub data_available: Option<bool>,
    /// `data.total_transactions`
    pub total_transactions: Option<u64>,
    /// `processing.available`
    pub processing_available: Option<bool>,
    /// Time the service produced the report, as sent.
    pub timestamp: Option<String>,
}

impl HealthSummary {
    /// Read a health envelope.
    pub fn from_envelope(env: &Envelope) -> Self {
        Self {
            status: str_at(env, &["status"]),
            message: str_at(env, &["message"]),
            version: str_at(env, &["version"]),
            database_connected: bool_at(env, &["database", "connected"]),
            password_configured: bool_at(env, &["database", "password_configured"]),
            data_available: bool_at(env, &["data", "available"]),
            total_transactions: u64_at(env, &["data", "total_transactions"]),
            processing_available: bool_at(env, &["processing", "available"]),
            timestamp: str_at(env, &["timestamp"]),
        }
    }

    /// Service reported itself healthy.
    pub fn is_healthy(&self) -> bool {
        matches!(self.status.as_deref(), Some("healthy") | Some("ok"))
    }
}

impl fmt::Display for HealthSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Status: {}", or_unknown(&self.status))?;
        if let Some(message) = &self.message {
            writeln!(f, "  Message: {}", message)?;
        }
        writeln!(f, "  Version: {}", or_unknown(&self.version))?;
        writeln!(f, "  Database Connected: {}", yes_no(self.database_connected))?;
        writeln!(f, "  Password Configured: {}", yes_no(self.password_configured))?;
        writeln!(f, "  Data Available: {}", yes_no(self.data_available))?;
        writeln!(f, "  Total Transactions: {}", count(self.total_transactions))?;
        writeln!(f, "  Processing Available: {}", yes_no(self.processing_available))?;
        write!(f, "  Reported At: {}", or_unknown(&self.timestamp))
    }
}

/// State of one database table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStatus {
    /// Table name.
    pub name: String,
    /// Whether the table was found.
    pub exists: Option<bool>,
    /// Row count when the table exists.
    pub row_count: Option<u64>,
    /// Lookup error reported for a missing table.
    pub error: Option<String>,
}

/// Database connectivity and table state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatabaseSummary {
    /// `connection_test`
    pub connected: Option<bool>,
    /// Database manager type in use on the service.
    pub manager: Option<String>,
    /// Per-table state, in the order the service sent them.
    pub tables: Vec<TableStatus>,
    /// Entries of `errors` followed by `error` and `message`, when present.
    pub errors: Vec<String>,
}

impl DatabaseSummary {
    /// Read a database test envelope.
    pub fn from_envelope(env: &Envelope) -> Self {
        let tables: Vec<TableStatus> = lookup(env, &["tables"])
            .and_then(Value::as_object)
            .map(|tables| {
                tables
                    .iter()
                    .map(|(name, info)| TableStatus {
                        name: name.clone(),
                        exists: info.get("exists").and_then(Value::as_bool),
                        row_count: info.get("row_count").and_then(Value::as_u64),
                        error: info.get("error").and_then(Value::as_str).map(str::to_string),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let mut errors: Vec<String> = lookup(env, &["errors"])
            .and_then(Value::as_array)
            .map(|list| {
                list.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        errors.extend(str_at(env, &["error"]));
        errors.extend(str_at(env, &["message"]));

        Self {
            connected: bool_at(env, &["connection_test"]),
            manager: str_at(env, &["database_manager_type"]),
            tables,
            errors,
        }
    }
}

impl fmt::Display for DatabaseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  Connection: {}", yes_no(self.connected))?;
        if let Some(manager) = &self.manager {
            write!(f, "\n  Manager: {}", manager)?;
        }
        for table in &self.tables {
            let state = match (table.exists, &table.error) {
                (Some(true), _) => format!("{} rows", count(table.row_count)),
                (Some(false), Some(error)) => format!("missing ({})", error),
                (Some(false), None) => "missing".to_string(),
                (None, _) => "unknown".to_string(),
            };
            write!(f, "\n  - {}: {}", table.name, state)?;
        }
        for error in &self.errors {
            write!(f, "\n  Error: {}", error)?;
        }
        Ok(())
    }
}

/// Transaction listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionsSummary {
    /// Object rows of `transactions`; other entries are skipped.
    pub rows: Vec<Envelope>,
    /// Table or view the rows came from.
    pub source: Option<String>,
    /// Informational message, e.g. why the listing is empty.
    pub message: Option<String>,
    /// Error text; set on fallbacks.
    pub error: Option<String>,
}

impl TransactionsSummary {
    /// Read a transactions envelope.
    pub fn from_envelope(env: &Envelope) -> Self {
        let rows: Vec<Envelope> = lookup(env, &["transactions"])
            .and_then(Value::as_array)
            .map(|list| list.iter().filter_map(Value::as_object).cloned().collect())
            .unwrap_or_default();

        Self {
            rows,
            source: str_at(env, &["source"]),
            message: str_at(env, &["message"]),
            error: str_at(env, &["error"]),
        }
    }

    /// Column names taken from the first row, in the order the service sent them.
    pub fn columns(&self) -> Vec<&str> {
        self.rows
            .first()
            .map(|row| row.keys().take(MAX_COLUMNS).map(String::as_str).collect())
            .unwrap_or_default()
    }
}

impl fmt::Display for TransactionsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  Rows: {}", self.rows.len())?;
        write!(f, "\n  Source: {}", or_unknown(&self.source))?;
        if let Some(message) = &self.message {
            write!(f, "\n  Message: {}", message)?;
        }
        if let Some(error) = &self.error {
            write!(f, "\n  Error: {}", error)?;
        }

        let columns = self.columns();
        if columns.is_empty() {
            return Ok(());
        }

        write!(f, "\n  ")?;
        for column in &columns {
            write!(f, "{:<width$} ", truncate(column, CELL_WIDTH), width = CELL_WIDTH)?;
        }
        for row in &self.rows {
            write!(f, "\n  ")?;
            for column in &columns {
                let text = row.get(*column).map(cell).unwrap_or_else(|| "-".to_string());
                write!(f, "{:<width$} ", truncate(&text, CELL_WIDTH), width = CELL_WIDTH)?;
            }
        }
        Ok(())
    }
}

/// Outcome of a processing trigger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessingSummary {
    /// Outcome word, e.g. `success` or `error`.
    pub status: Option<String>,
    /// Message from the service or the fallback.
    pub message: Option<String>,
    /// Wall time of the run as measured by the service.
    pub processing_time_seconds: Option<f64>,
}

impl ProcessingSummary {
    /// Read a processing envelope.
    pub fn from_envelope(env: &Envelope) -> Self {
        Self {
            status: str_at(env, &["status"]),
            message: str_at(env, &["message"]),
            processing_time_seconds: lookup(env, &["processing_time_seconds"])
                .and_then(Value::as_f64),
        }
    }
}

impl fmt::Display for ProcessingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  Status: {}", or_unknown(&self.status))?;
        if let Some(message) = &self.message {
            write!(f, "\n  Message: {}", message)?;
        }
        if let Some(seconds) = self.processing_time_seconds {
            write!(f, "\n  Duration: {:.2}s", seconds)?;
        }
        Ok(())
    }
}

/// Environment descriptors of the service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvironmentSummary {
    /// `environment_variables` as name/value pairs.
    pub variables: Vec<(String, String)>,
    /// `processing_status.functions_available`
    pub processing_available: Option<bool>,
    /// Working directory of the service process.
    pub current_directory: Option<String>,
    /// Error text; set on fallbacks.
    pub error: Option<String>,
}

impl EnvironmentSummary {
    /// Read an environment envelope.
    pub fn from_envelope(env: &Envelope) -> Self {
        let variables: Vec<(String, String)> = lookup(env, &["environment_variables"])
            .and_then(Value::as_object)
            .map(|vars| {
                vars.iter()
                    .map(|(name, value)| (name.clone(), cell(value)))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            variables,
            processing_available: bool_at(env, &["processing_status", "functions_available"]),
            current_directory: str_at(env, &["current_directory"]),
            error: str_at(env, &["error"]),
        }
    }
}

impl fmt::Display for EnvironmentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  Processing Available: {}", yes_no(self.processing_available))?;
        write!(f, "\n  Working Directory: {}", or_unknown(&self.current_directory))?;
        for (name, value) in &self.variables {
            write!(f, "\n  {}: {}", name, value)?;
        }
        if let Some(error) = &self.error {
            write!(f, "\n  Error: {}", error)?;
        }
        Ok(())
    }
}
