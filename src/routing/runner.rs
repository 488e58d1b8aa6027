//! Location extraction and nearest-neighbor tour construction.

use super::config::RoutingConfig;
use super::matrix::compute_distance_matrix;
use crate::allocation::AllocationResult;
use crate::error::Warning;
use crate::model::{Agent, Catalog, Order};
use crate::spatial::{Location, Warehouse};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Unique pick locations per agent, extracted from an allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedLocations {
    /// Agent id → distinct shelf positions its orders require.
    pub per_agent: BTreeMap<String, BTreeSet<Location>>,

    /// Ids that could not be resolved while extracting.
    pub warnings: Vec<Warning>,
}

/// One agent's optimized tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRoute {
    /// Visit sequence, starting and ending at the warehouse entry.
    /// Every required location appears exactly once in the interior.
    pub path: Vec<Location>,

    /// Total Manhattan length, including the closing return leg.
    pub distance: u32,

    /// Estimated traversal time: `distance / speed` plus the
    /// configured pick time per interior stop.
    pub time_minutes: f64,
}

/// Routes for every agent with work, plus extraction warnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    pub routes: BTreeMap<String, AgentRoute>,
    pub warnings: Vec<Warning>,
}

/// Collects the distinct shelf positions each agent must visit.
///
/// A product needed by two different orders of the same agent is still
/// a single physical stop. Unresolvable order or product ids are
/// skipped and reported, never fatal.
pub fn extract_locations(
    allocation: &AllocationResult,
    orders: &[Order],
    catalog: &Catalog,
) -> ExtractedLocations {
    let by_id: BTreeMap<&str, &Order> =
        orders.iter().map(|order| (order.id.as_str(), order)).collect();

    let mut per_agent = BTreeMap::new();
    let mut warnings = Vec::new();

    for (agent_id, order_ids) in &allocation.assignments {
        let mut locations = BTreeSet::new();
        for order_id in order_ids {
            let Some(order) = by_id.get(order_id.as_str()) else {
                warnings.push(Warning::UnknownOrder {
                    order_id: order_id.clone(),
                });
                continue;
            };
            for item in &order.items {
                match catalog.get(&item.product_id) {
                    Some(product) => {
                        locations.insert(product.location);
                    }
                    None => warnings.push(Warning::UnknownProduct {
                        order_id: order_id.clone(),
                        product_id: item.product_id.clone(),
                    }),
                }
            }
        }
        per_agent.insert(agent_id.clone(), locations);
    }

    ExtractedLocations {
        per_agent,
        warnings,
    }
}

/// Frames the routing problem as a closed tour: the entry node first,
/// then the pick locations in ascending coordinate order. The interior
/// order is arbitrary but deterministic; the solver reorders it.
pub fn build_nodes(entry: Location, locations: &BTreeSet<Location>) -> Vec<Location> {
    let mut nodes = Vec::with_capacity(locations.len() + 1);
    nodes.push(entry);
    nodes.extend(locations.iter().copied());
    nodes
}

/// Nearest-neighbor tour over `nodes`, starting and ending at
/// `start`.
///
/// Repeatedly steps to the closest unvisited node; ties go to the
/// lowest node index, which makes the result reproducible. Returns the
/// visit sequence as indices into `nodes` (with `start` at both ends)
/// and the total distance including the closing leg.
pub fn nearest_neighbor_route(nodes: &[Location], start: usize) -> (Vec<usize>, u32) {
    if nodes.is_empty() {
        return (Vec::new(), 0);
    }
    if nodes.len() == 1 {
        return (vec![start], 0);
    }

    let matrix = compute_distance_matrix(nodes);
    let mut visited = vec![false; nodes.len()];
    let mut route = Vec::with_capacity(nodes.len() + 1);
    let mut total = 0u32;

    let mut current = start;
    visited[current] = true;
    route.push(current);

    for _ in 1..nodes.len() {
        let mut nearest = None;
        let mut best = u32::MAX;
        for (idx, &seen) in visited.iter().enumerate() {
            // strict < keeps the lowest index on ties
            if !seen && matrix[current][idx] < best {
                best = matrix[current][idx];
                nearest = Some(idx);
            }
        }
        // nodes.len() > 1 guarantees an unvisited node here
        if let Some(next) = nearest {
            visited[next] = true;
            route.push(next);
            total += best;
            current = next;
        }
    }

    // close the tour
    total += matrix[current][start];
    route.push(start);

    (route, total)
}

/// Builds one agent's tour over its pick locations.
///
/// Degenerate inputs yield trivial routes: no locations gives just the
/// entry with distance 0; a single location gives entry → stop → entry.
pub fn optimize_agent_route(
    agent: &Agent,
    entry: Location,
    locations: &BTreeSet<Location>,
    config: &RoutingConfig,
) -> AgentRoute {
    if locations.is_empty() {
        return AgentRoute {
            path: vec![entry],
            distance: 0,
            time_minutes: 0.0,
        };
    }

    let nodes = build_nodes(entry, locations);
    let (indices, distance) = nearest_neighbor_route(&nodes, 0);
    let path: Vec<Location> = indices.into_iter().map(|idx| nodes[idx]).collect();

    let stops = locations.len();
    let time_minutes = f64::from(distance) / agent.speed + config.pick_time_per_stop * stops as f64;

    AgentRoute {
        path,
        distance,
        time_minutes,
    }
}

/// Optimizes routes for every agent with at least one pick location.
///
/// With `config.parallel`, agents are solved on rayon workers; the
/// output is identical to the sequential run.
pub fn optimize_routes(
    allocation: &AllocationResult,
    orders: &[Order],
    catalog: &Catalog,
    agents: &[Agent],
    warehouse: &Warehouse,
    config: &RoutingConfig,
) -> RoutePlan {
    let extracted = extract_locations(allocation, orders, catalog);
    let entry = warehouse.entry();

    let jobs: Vec<(&Agent, &BTreeSet<Location>)> = agents
        .iter()
        .filter_map(|agent| {
            extracted
                .per_agent
                .get(&agent.id)
                .filter(|locations| !locations.is_empty())
                .map(|locations| (agent, locations))
        })
        .collect();

    let routes: BTreeMap<String, AgentRoute> = if config.parallel {
        jobs.par_iter()
            .map(|(agent, locations)| {
                (
                    agent.id.clone(),
                    optimize_agent_route(agent, entry, locations, config),
                )
            })
            .collect::<Vec<_>>()
            .into_iter()
            .collect()
    } else {
        jobs.iter()
            .map(|(agent, locations)| {
                (
                    agent.id.clone(),
                    optimize_agent_route(agent, entry, locations, config),
                )
            })
            .collect()
    };

    RoutePlan {
        routes,
        warnings: extracted.warnings,
    }
}
