//! Post-hoc reports over allocation results and order history.
//!
//! Everything here is read-only: load balance, order compatibility
//! grouping, product demand statistics, and storage reorganization
//! advice. Nothing mutates allocation or routing state.

mod affinity;
mod balance;
mod storage;

pub use affinity::{
    find_compatible_orders, order_distance_sum, product_affinity, product_frequency,
};
pub use balance::{load_balance, LoadBalance};
pub use storage::{suggest_reorganization, ReorganizationPlan};
