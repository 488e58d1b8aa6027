//! Typed input records: products, orders, agents.
//!
//! These are the engine's read-only inputs, loaded once per run by an
//! external collaborator. Validation happens at the load boundary, so
//! the allocation and routing layers never probe for missing fields.

mod totals;
mod types;

pub use totals::{order_totals, OrderTotals};
pub use types::{Agent, AgentKind, Catalog, Order, OrderItem, Product, ProductAttribute};
