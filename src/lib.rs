//! Warehouse allocation and routing optimization engine.
//!
//! Assigns customer orders to heterogeneous picking agents under
//! capacity and compatibility constraints, then builds near-optimal
//! pick routes through a gridded warehouse:
//!
//! - **Spatial model**: grid locations, zones, the Manhattan metric.
//! - **Constraints**: pure predicates over swappable rule tables
//!   (capacity, product compatibility, zone access).
//! - **Allocation**: first-fit bin-packing, naive or fully
//!   constrained, with cart/human escort pairing.
//! - **Routing**: per-agent closed tours from the warehouse entry,
//!   solved with a deterministic nearest-neighbor heuristic.
//! - **Analytics**: load balance, order compatibility grouping,
//!   product frequency/affinity, storage reorganization tiers.
//!
//! # Architecture
//!
//! The engine is a single-shot, synchronous batch computation over
//! immutable inputs: one allocation pass, one routing pass per agent,
//! one analytics pass. Loading, rendering, and interaction live in
//! consumer layers; their only contract with this crate is the typed
//! records in [`model`] and the result snapshots each pass returns.
//! Recoverable data problems become warnings inside those results; a
//! run always completes with a best-effort answer.
//!
//! # Examples
//!
//! ```
//! use optipick::allocation::{allocate, AllocationConfig};
//! use optipick::model::{Agent, AgentKind, Catalog, Order};
//! use optipick::routing::{optimize_routes, RoutingConfig};
//! use optipick::spatial::{Location, Warehouse};
//!
//! let warehouse = Warehouse::new(vec![vec!['0', 'A']], Location::new(0, 0))?;
//! let agents = vec![Agent {
//!     id: "R1".into(),
//!     kind: AgentKind::Robot,
//!     capacity_weight: 20.0,
//!     capacity_volume: 30.0,
//!     speed: 2.0,
//!     cost: 5.0,
//!     forbidden_zones: Default::default(),
//! }];
//! let orders: Vec<Order> = Vec::new();
//! let catalog = Catalog::new();
//!
//! let result = allocate(&orders, &agents, &catalog, &warehouse,
//!     &AllocationConfig::constrained())?;
//! let plan = optimize_routes(&result, &orders, &catalog, &agents,
//!     &warehouse, &RoutingConfig::default());
//! assert!(plan.routes.is_empty());
//! # Ok::<(), optipick::error::ConfigError>(())
//! ```

pub mod allocation;
pub mod analytics;
pub mod constraints;
pub mod error;
pub mod model;
pub mod routing;
pub mod spatial;
