//! Statement execution.
//!
//! Every statement runs on its own connection: [`SqlxExecutor`] connects,
//! executes exactly one statement and closes the connection again, whether
//! or not the statement succeeded.

use std::future::Future;
use std::sync::{Mutex, PoisonError};

use sqlx::{AnyConnection, Connection};
use tracing::{debug, info, warn};

use crate::error::Result;

/// Runs a single SQL statement against the remote system.
pub trait SqlExecutor: Send + Sync {
    /// Executes `statement`, failing with [`ProviderError::Execution`](crate::error::ProviderError::Execution)
    /// when the remote system rejects it.
    fn execute(&self, statement: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Executes statements through a fresh sqlx connection per call.
#[derive(Debug, Clone)]
pub struct SqlxExecutor {
    url: String,
}

impl SqlxExecutor {
    /// Creates an executor for the given connection URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        sqlx::any::install_default_drivers();
        Self { url: url.into() }
    }
}

impl SqlExecutor for SqlxExecutor {
    async fn execute(&self, statement: &str) -> Result<()> {
        debug!(sql = %statement, "Executing SQL");

        let mut conn = AnyConnection::connect(&self.url).await?;
        let result = sqlx::query(statement).execute(&mut conn).await;

        if let Err(e) = conn.close().await {
            warn!(error = %e, "Failed to close connection");
        }

        let done = result?;
        debug!(rows_affected = done.rows_affected(), "Statement executed");
        Ok(())
    }
}

/// Records statements instead of executing them.
///
/// Used for dry runs and as a spy in tests.
#[derive(Debug, Default)]
pub struct DryRunExecutor {
    statements: Mutex<Vec<String>>,
}

impl DryRunExecutor {
    /// Creates an executor with no recorded statements.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every statement received so far, oldest first.
    #[must_use]
    pub fn statements(&self) -> Vec<String> {
        self.statements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SqlExecutor for DryRunExecutor {
    async fn execute(&self, statement: &str) -> Result<()> {
        info!(sql = %statement, "Dry run, statement not executed");
        self.statements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(statement.to_string());
        Ok(())
    }
}
