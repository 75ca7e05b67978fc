/// Failure of a data-access operation, tagged with what went wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Schema provisioning failed or the store could not be reached at startup.
    #[error("Initialization failed: {0}")]
    Initialization(String),

    /// The store could not be reached (pool exhausted, connection refused, TLS).
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("{0}")]
    NotFound(String),

    /// A write was rejected by a constraint (not-null, unique, foreign key, check).
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Database(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// The human-readable message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Initialization(msg)
            | Self::Unavailable(msg)
            | Self::NotFound(msg)
            | Self::Validation(msg)
            | Self::Database(msg) => msg,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// PostgreSQL SQLSTATE codes that signal a rejected write rather than a broken store.
const VALIDATION_SQLSTATES: &[&str] = &[
    "22001", // string_data_right_truncation
    "22003", // numeric_value_out_of_range
    "22P02", // invalid_text_representation
    "23502", // not_null_violation
    "23503", // foreign_key_violation
    "23505", // unique_violation
    "23514", // check_violation
];

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => {
                let code = db_err.code();
                if code
                    .as_deref()
                    .is_some_and(|code| VALIDATION_SQLSTATES.contains(&code))
                {
                    Self::Validation(db_err.message().to_string())
                } else {
                    Self::Database(db_err.message().to_string())
                }
            }
            sqlx::Error::RowNotFound => Self::NotFound(err.to_string()),
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => Self::Unavailable(err.to_string()),
            _ => Self::Database(err.to_string()),
        }
    }
}
