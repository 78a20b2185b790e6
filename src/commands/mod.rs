//! Command handlers for the tdash CLI.
//!
//! This module contains implementations for all CLI subcommands. Each handler loads the
//! configuration, builds the API client for the current [`Mode`](crate::Mode), drives the
//! stores, and returns an [`Out`] for the CLI to print.

mod accounts;
mod categories;
mod init;
mod institutions;
mod mappings;
mod transactions;

use anyhow::bail;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use accounts::{accounts, balance};
pub use categories::{add_category, delete_category, list_categories, update_category};
pub use init::init;
pub use institutions::{disconnect, link, list_institutions};
pub use mappings::{add_mapping, delete_mapping, list_mappings};
pub use transactions::{categorize, export, list_transactions, summary, MonthSummary};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// The stores record fetch failures instead of returning them. A one-shot CLI invocation has no
/// retry UI, so a recorded error becomes a hard failure here.
pub(crate) fn bail_on_store_error(error: Option<&str>) -> crate::Result<()> {
    if let Some(message) = error {
        bail!("{message}");
    }
    Ok(())
}
