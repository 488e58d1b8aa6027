//! Configuration errors and data-integrity warnings.
//!
//! Two severities, handled differently:
//!
//! - [`ConfigError`] — malformed input entities. Fatal: returned to the
//!   caller before any allocation work starts.
//! - [`Warning`] — a referenced id could not be resolved. Recoverable:
//!   the offending item is skipped and the warning is aggregated into
//!   the result structure, so a run always completes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal precondition failure detected before allocation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// No agents were supplied.
    #[error("at least one agent is required")]
    NoAgents,

    /// An agent has a non-positive weight or volume capacity.
    #[error("agent '{agent_id}' has non-positive capacity")]
    NonPositiveCapacity { agent_id: String },

    /// An agent has a non-positive speed.
    #[error("agent '{agent_id}' has non-positive speed")]
    NonPositiveSpeed { agent_id: String },

    /// The warehouse grid has no cells.
    #[error("warehouse grid must not be empty")]
    EmptyGrid,

    /// The warehouse grid rows have differing lengths.
    #[error("warehouse grid row {row} has length {found}, expected {expected}")]
    RaggedGrid {
        row: usize,
        found: usize,
        expected: usize,
    },

    /// The entry point lies outside the grid.
    #[error("entry point ({x}, {y}) is outside the {width}x{height} grid")]
    EntryOutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    /// An agent priority list names an agent that does not exist.
    #[error("priority list names unknown agent '{agent_id}'")]
    UnknownPriorityAgent { agent_id: String },

    /// An agent priority list names the same agent twice.
    #[error("priority list names agent '{agent_id}' more than once")]
    DuplicatePriorityAgent { agent_id: String },
}

/// Recoverable data-integrity condition, aggregated into results.
///
/// Serializable so renderers can surface it alongside the result it
/// rode in on.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Warning {
    /// An order line item references a product id not in the catalog.
    #[error("order '{order_id}' references unknown product '{product_id}'")]
    UnknownProduct { order_id: String, product_id: String },

    /// An assignment list references an order id not in the order set.
    #[error("assignment references unknown order '{order_id}'")]
    UnknownOrder { order_id: String },
}
