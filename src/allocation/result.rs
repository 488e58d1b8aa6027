//! Allocation result types.

use crate::error::Warning;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of one allocation run.
///
/// Every order id appears in exactly one agent's assignment list or in
/// `unassigned`, never both, never neither. Every agent id is present
/// in `assignments`, possibly with an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    /// Agent id → assigned order ids, in assignment order.
    pub assignments: BTreeMap<String, Vec<String>>,

    /// Orders no agent could take, in input order.
    pub unassigned: Vec<String>,

    /// Order id → derived (weight kg, volume dm³), over resolvable
    /// items.
    pub order_totals: BTreeMap<String, (f64, f64)>,

    /// Cart agent id → escorting human agent id. Only carts that
    /// received at least one order appear here.
    pub cart_escorts: BTreeMap<String, String>,

    /// Data-integrity conditions encountered while allocating.
    pub warnings: Vec<Warning>,
}

impl AllocationResult {
    /// Total number of assigned orders across all agents.
    pub fn assigned_count(&self) -> usize {
        self.assignments.values().map(Vec::len).sum()
    }

    /// The agent an order was assigned to, if any.
    pub fn agent_of(&self, order_id: &str) -> Option<&str> {
        self.assignments
            .iter()
            .find(|(_, orders)| orders.iter().any(|id| id == order_id))
            .map(|(agent_id, _)| agent_id.as_str())
    }

    /// Cumulative (weight, volume) of an agent's assigned orders.
    pub fn agent_load(&self, agent_id: &str) -> (f64, f64) {
        let mut weight = 0.0;
        let mut volume = 0.0;
        if let Some(orders) = self.assignments.get(agent_id) {
            for order_id in orders {
                if let Some(&(w, v)) = self.order_totals.get(order_id) {
                    weight += w;
                    volume += v;
                }
            }
        }
        (weight, volume)
    }
}
