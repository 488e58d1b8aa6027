//! Pick-route construction.
//!
//! For each agent with work, the unique shelf positions of its
//! assigned orders are framed as a closed tour rooted at the warehouse
//! entry and solved with the nearest-neighbor heuristic. Fast and
//! deterministic, not optimal; the exact solver is deliberately out of
//! scope.
//!
//! Per-agent tours share no mutable state, so [`optimize_routes`] can
//! fan them out across rayon workers purely as a speed-up.

mod config;
mod matrix;
mod runner;

pub use config::RoutingConfig;
pub use matrix::{compute_distance_matrix, route_distance};
pub use runner::{
    build_nodes, extract_locations, nearest_neighbor_route, optimize_agent_route,
    optimize_routes, AgentRoute, ExtractedLocations, RoutePlan,
};
