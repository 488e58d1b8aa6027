//! First-fit order allocation.
//!
//! Assigns each order to the first agent (in an explicit priority
//! order) that can take it, without backtracking. The contract is
//! "first feasible assignment", not "best assignment": optimality is
//! measured downstream by routing and analytics, never guaranteed
//! here.
//!
//! Two modes: [`AllocationMode::Naive`] checks capacity only;
//! [`AllocationMode::Constrained`] additionally enforces product
//! compatibility, zone access, and cart escort pairing.

mod config;
mod engine;
mod result;

pub use config::{AllocationConfig, AllocationMode};
pub use engine::{allocate, estimate_total_distance};
pub use result::AllocationResult;
