// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rota::StoreError;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// A stored row could not be mapped to a domain value.
    MalformedRow {
        table: &'static str,
        key: String,
        reason: String,
    },
    /// A timestamp could not be formatted or parsed.
    TimestampError(String),
    /// The requested record was not found.
    NotFound(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::MalformedRow { table, key, reason } => {
                write!(f, "Malformed row in {table} ({key}): {reason}")
            }
            Self::TimestampError(msg) => write!(f, "Timestamp error: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl PersistenceError {
    /// Converts this error into the store contract's error.
    ///
    /// `NotFound` keeps its meaning; everything else means the store is
    /// unavailable for `operation` on `key`.
    #[must_use]
    pub fn into_store_error(self, resource: &'static str, operation: &'static str, key: &str) -> StoreError {
        match self {
            Self::NotFound(_) => StoreError::NotFound {
                resource,
                key: key.to_string(),
            },
            other => StoreError::Unavailable {
                operation,
                key: key.to_string(),
                message: other.to_string(),
            },
        }
    }
}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<time::error::Format> for PersistenceError {
    fn from(err: time::error::Format) -> Self {
        Self::TimestampError(err.to_string())
    }
}
