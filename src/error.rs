//! Error type shared by every model operation.
//!
//! There is a single error-returning API. Callers that prefer to abort on
//! failure do so at their own boundary.

use config::ConfigError;
use may_postgres::Error as PostgresError;

/// Result alias used throughout the crate.
pub type Result<T, E = ModelError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// A single-row read matched nothing.
    #[error("models: no rows in result set")]
    NotFound,

    /// Driver error annotated with the operation that failed.
    #[error("models: {context}: {source}")]
    Database {
        context: String,
        #[source]
        source: PostgresError,
    },

    /// Caller error such as an empty column list or a missing key value.
    #[error("models: {0}")]
    Invalid(String),

    /// A column name or value could not be bound to a struct field.
    #[error("models: cannot bind {table}.{column}: {reason}")]
    Bind {
        table: &'static str,
        column: String,
        reason: String,
    },

    /// A returned row could not be scanned into a struct field.
    #[error("models: cannot decode {table}.{column}: {source}")]
    Decode {
        table: &'static str,
        column: &'static str,
        #[source]
        source: PostgresError,
    },

    #[error("models: connection error: {0}")]
    Connection(String),

    #[error("models: transaction error: {0}")]
    Transaction(String),

    #[error("models: configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ModelError {
    /// Wrap a driver error with a description of the failed operation.
    pub fn database(context: impl Into<String>, source: PostgresError) -> Self {
        ModelError::Database {
            context: context.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ModelError::NotFound)
    }
}

/// Attach operation context to driver results.
pub(crate) trait ResultExt<T> {
    fn context(self, context: impl FnOnce() -> String) -> Result<T>;
}

impl<T> ResultExt<T> for std::result::Result<T, PostgresError> {
    fn context(self, context: impl FnOnce() -> String) -> Result<T> {
        self.map_err(|e| ModelError::database(context(), e))
    }
}

impl<T> ResultExt<T> for Result<T> {
    /// Re-label driver errors coming back through an executor; other variants pass through.
    fn context(self, context: impl FnOnce() -> String) -> Result<T> {
        self.map_err(|e| match e {
            ModelError::Database { source, .. } => ModelError::database(context(), source),
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_sentinel() {
        let err = ModelError::NotFound;
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "models: no rows in result set");
    }

    #[test]
    fn test_invalid_display() {
        let err = ModelError::Invalid("unable to update sources, could not build whitelist".into());
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("could not build whitelist"));
    }

    #[test]
    fn test_bind_display_names_column() {
        let err = ModelError::Bind {
            table: "authors",
            column: "nickname".into(),
            reason: "unknown column".into(),
        };
        assert_eq!(
            err.to_string(),
            "models: cannot bind authors.nickname: unknown column"
        );
    }

    #[test]
    fn test_context_passes_non_database_errors_through() {
        let res: Result<()> = Err(ModelError::NotFound);
        let err = res.context(|| "unable to reload authors".into()).unwrap_err();
        assert!(err.is_not_found());
    }
}
