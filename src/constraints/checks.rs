//! Constraint predicates.
//!
//! All predicates are evaluated over resolved product data; the
//! allocation engine filters out unresolvable line items first and
//! surfaces them as data-integrity warnings, so an unknown id can
//! never crash a check.

use super::rules::{CompatibilityRules, ZoneAccessPolicy};
use crate::model::{Agent, ProductAttribute};
use std::collections::BTreeSet;
use thiserror::Error;

/// Why an order was rejected for a candidate agent.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RejectReason {
    /// Adding the order would exceed the agent's weight capacity.
    #[error("cumulative weight {would_be:.2}kg exceeds capacity {capacity:.2}kg")]
    CapacityWeight { would_be: f64, capacity: f64 },

    /// Adding the order would exceed the agent's volume capacity.
    #[error("cumulative volume {would_be:.2}dm3 exceeds capacity {capacity:.2}dm3")]
    CapacityVolume { would_be: f64, capacity: f64 },

    /// The combined load would contain an incompatible attribute pair.
    #[error("attributes {0:?} and {1:?} may not share a load")]
    Incompatible(ProductAttribute, ProductAttribute),

    /// The order touches a zone the agent may not enter.
    #[error("agent may not enter zone '{0}'")]
    ForbiddenZone(char),
}

/// Capacity check, evaluated incrementally: the agent's running load
/// plus the candidate order must stay within both capacities.
pub fn check_capacity(
    agent: &Agent,
    load_weight: f64,
    load_volume: f64,
    order_weight: f64,
    order_volume: f64,
) -> Result<(), RejectReason> {
    let would_be_weight = load_weight + order_weight;
    if would_be_weight > agent.capacity_weight {
        return Err(RejectReason::CapacityWeight {
            would_be: would_be_weight,
            capacity: agent.capacity_weight,
        });
    }
    let would_be_volume = load_volume + order_volume;
    if would_be_volume > agent.capacity_volume {
        return Err(RejectReason::CapacityVolume {
            would_be: would_be_volume,
            capacity: agent.capacity_volume,
        });
    }
    Ok(())
}

/// Incompatibility check against the agent's full working set.
///
/// The union of the attributes already on board and the candidate
/// order's attributes must contain no pair the rules forbid. A pair
/// inside the candidate order alone is also a violation.
pub fn check_compatibility(
    candidate: &BTreeSet<ProductAttribute>,
    load: &BTreeSet<ProductAttribute>,
    rules: &CompatibilityRules,
) -> Result<(), RejectReason> {
    if rules.is_empty() {
        return Ok(());
    }
    let combined: BTreeSet<ProductAttribute> = candidate.union(load).copied().collect();
    let attrs: Vec<ProductAttribute> = combined.into_iter().collect();
    for (i, &a) in attrs.iter().enumerate() {
        for &b in &attrs[i + 1..] {
            if rules.are_incompatible(a, b) {
                return Err(RejectReason::Incompatible(a, b));
            }
        }
    }
    Ok(())
}

/// Zone-access check: every zone the order's products sit in must be
/// enterable by the agent, under both the kind-level policy and the
/// agent's own forbidden set.
pub fn check_zone_access(
    agent: &Agent,
    order_zones: &BTreeSet<char>,
    policy: &ZoneAccessPolicy,
) -> Result<(), RejectReason> {
    for &zone in order_zones {
        if !policy.allows(agent.kind, zone) || agent.forbidden_zones.contains(&zone) {
            return Err(RejectReason::ForbiddenZone(zone));
        }
    }
    Ok(())
}
