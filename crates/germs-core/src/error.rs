//! Error types and exit codes for germs-eval
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (I/O, unreadable JSON)
//! - 2: Usage error (bad flags/args, invalid configuration)
//! - 3: Data error (malformed raw records, submission or gold targets)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Maximum number of ids listed per category in an id-set mismatch message
const MAX_LISTED_IDS: usize = 5;

/// Exit codes for the germs-eval binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - malformed table, records or targets (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur while aggregating, validating or scoring
#[derive(Error, Debug)]
pub enum GermsError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Aggregator and ingestion errors (exit code 3)
    #[error("item {id} has no annotations")]
    EmptyAnnotationSet { id: String },

    #[error("invalid record at {path:?} line {line}: {reason}")]
    InvalidRecord {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("duplicate id {id} in {path:?}")]
    DuplicateId { id: String, path: PathBuf },

    #[error("item {id} has {labels} labels but {annotators} annotators")]
    LabelCountMismatch {
        id: String,
        labels: usize,
        annotators: usize,
    },

    // Codec errors (exit code 3)
    #[error("invalid column names, expected: {expected}; got: {found}")]
    SchemaMismatch { expected: String, found: String },

    #[error("too many rows, expected {expected}")]
    RowCountExceeded { expected: usize },

    #[error("missing rows, expected {expected} rows, got {found}")]
    RowCountShort { expected: usize, found: usize },

    #[error("malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    #[error("no file ending with '.{extension}' found in {dir:?}")]
    NoSubmissionFound { dir: PathBuf, extension: String },

    #[error("multiple files ending with '.{extension}' found in {dir:?}: {candidates}")]
    AmbiguousSubmission {
        dir: PathBuf,
        extension: String,
        candidates: String,
    },

    // Validator errors (exit code 3)
    #[error("invalid value {value:?} not one of {allowed} in column {column} at index {index} with id {id}")]
    InvalidCategoricalValue {
        id: String,
        index: usize,
        column: String,
        value: String,
        allowed: String,
    },

    #[error("invalid value {value:?} not a number in column {column} at index {index} with id {id}")]
    NonNumericValue {
        id: String,
        index: usize,
        column: String,
        value: String,
    },

    #[error("invalid value {value} not in range [0.0, 1.0] in column {column} at index {index} with id {id}")]
    OutOfRangeValue {
        id: String,
        index: usize,
        column: String,
        value: f64,
    },

    #[error("values in columns {columns} sum to {sum} instead of 1.0 at index {index} with id {id}")]
    DistributionNotNormalized {
        id: String,
        index: usize,
        columns: String,
        sum: f64,
    },

    #[error("{} validation errors, first: {}", .violations.len(), first_message(.violations))]
    ValidationFailed { violations: Vec<GermsError> },

    // Scorer errors (exit code 3)
    #[error("ids in submission do not match ids in targets ({})", describe_id_mismatch(.missing, .unexpected, .duplicated))]
    IdSetMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
        duplicated: Vec<String>,
    },

    #[error("submission columns do not match, expected: {expected}; got: {found}")]
    ColumnSetMismatch { expected: String, found: String },

    #[error("invalid target for id {id} in column {column}: {reason}")]
    InvalidTarget {
        id: String,
        column: String,
        reason: String,
    },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

fn first_message(violations: &[GermsError]) -> String {
    violations
        .first()
        .map(ToString::to_string)
        .unwrap_or_default()
}

fn describe_id_mismatch(missing: &[String], unexpected: &[String], duplicated: &[String]) -> String {
    let mut parts = Vec::new();
    for (label, ids) in [
        ("missing", missing),
        ("unexpected", unexpected),
        ("duplicated", duplicated),
    ] {
        if ids.is_empty() {
            continue;
        }
        let shown: Vec<&str> = ids.iter().take(MAX_LISTED_IDS).map(String::as_str).collect();
        let more = if ids.len() > MAX_LISTED_IDS {
            format!(", ... {} more", ids.len() - MAX_LISTED_IDS)
        } else {
            String::new()
        };
        parts.push(format!("{}: {}{}", label, shown.join(", "), more));
    }
    parts.join("; ")
}

impl GermsError {
    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        GermsError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        GermsError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for a gold target that cannot be used for scoring
    pub fn invalid_target(id: &str, column: &str, reason: impl Into<String>) -> Self {
        GermsError::InvalidTarget {
            id: id.to_string(),
            column: column.to_string(),
            reason: reason.into(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            // Usage errors
            GermsError::UnknownFormat(_)
            | GermsError::UsageError(_)
            | GermsError::InvalidValue { .. } => ExitCode::Usage,

            // Data errors
            GermsError::EmptyAnnotationSet { .. }
            | GermsError::InvalidRecord { .. }
            | GermsError::DuplicateId { .. }
            | GermsError::LabelCountMismatch { .. }
            | GermsError::SchemaMismatch { .. }
            | GermsError::RowCountExceeded { .. }
            | GermsError::RowCountShort { .. }
            | GermsError::MalformedRow { .. }
            | GermsError::NoSubmissionFound { .. }
            | GermsError::AmbiguousSubmission { .. }
            | GermsError::InvalidCategoricalValue { .. }
            | GermsError::NonNumericValue { .. }
            | GermsError::OutOfRangeValue { .. }
            | GermsError::DistributionNotNormalized { .. }
            | GermsError::ValidationFailed { .. }
            | GermsError::IdSetMismatch { .. }
            | GermsError::ColumnSetMismatch { .. }
            | GermsError::InvalidTarget { .. } => ExitCode::Data,

            // Generic failures
            GermsError::Io(_)
            | GermsError::Json(_)
            | GermsError::Toml(_)
            | GermsError::Csv(_)
            | GermsError::FailedOperationWithTarget { .. }
            | GermsError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            GermsError::UnknownFormat(_) => "unknown_format",
            GermsError::UsageError(_) => "usage_error",
            GermsError::InvalidValue { .. } => "invalid_value",
            GermsError::EmptyAnnotationSet { .. } => "empty_annotation_set",
            GermsError::InvalidRecord { .. } => "invalid_record",
            GermsError::DuplicateId { .. } => "duplicate_id",
            GermsError::LabelCountMismatch { .. } => "label_count_mismatch",
            GermsError::SchemaMismatch { .. } => "schema_mismatch",
            GermsError::RowCountExceeded { .. } => "row_count_exceeded",
            GermsError::RowCountShort { .. } => "row_count_short",
            GermsError::MalformedRow { .. } => "malformed_row",
            GermsError::NoSubmissionFound { .. } => "no_submission_found",
            GermsError::AmbiguousSubmission { .. } => "ambiguous_submission",
            GermsError::InvalidCategoricalValue { .. } => "invalid_categorical_value",
            GermsError::NonNumericValue { .. } => "non_numeric_value",
            GermsError::OutOfRangeValue { .. } => "out_of_range_value",
            GermsError::DistributionNotNormalized { .. } => "distribution_not_normalized",
            GermsError::ValidationFailed { .. } => "validation_failed",
            GermsError::IdSetMismatch { .. } => "id_set_mismatch",
            GermsError::ColumnSetMismatch { .. } => "column_set_mismatch",
            GermsError::InvalidTarget { .. } => "invalid_target",
            GermsError::Io(_) => "io_error",
            GermsError::Json(_) => "json_error",
            GermsError::Toml(_) => "toml_error",
            GermsError::Csv(_) => "tsv_error",
            GermsError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            GermsError::Other(_) => "other",
        }
    }

    /// Row id the error refers to, if any
    pub fn row_id(&self) -> Option<&str> {
        match self {
            GermsError::EmptyAnnotationSet { id }
            | GermsError::DuplicateId { id, .. }
            | GermsError::LabelCountMismatch { id, .. }
            | GermsError::InvalidCategoricalValue { id, .. }
            | GermsError::NonNumericValue { id, .. }
            | GermsError::OutOfRangeValue { id, .. }
            | GermsError::DistributionNotNormalized { id, .. }
            | GermsError::InvalidTarget { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Convert error to JSON representation for structured error output.
    /// Collected validation errors are listed under `violations`.
    pub fn to_json(&self) -> serde_json::Value {
        let mut error_obj = serde_json::json!({
            "code": self.exit_code() as i32,
            "type": self.error_type(),
            "message": self.to_string(),
        });

        if let Some(id) = self.row_id() {
            error_obj["id"] = serde_json::json!(id);
        }

        if let GermsError::ValidationFailed { violations } = self {
            let entries: Vec<serde_json::Value> = violations
                .iter()
                .map(|v| {
                    serde_json::json!({
                        "type": v.error_type(),
                        "id": v.row_id(),
                        "message": v.to_string(),
                    })
                })
                .collect();
            error_obj["violations"] = serde_json::json!(entries);
        }

        serde_json::json!({ "error": error_obj })
    }
}

/// Result type alias for germs-eval operations
pub type Result<T> = std::result::Result<T, GermsError>;
