//! Load-balance statistics.

use crate::allocation::AllocationResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Distribution of assigned-order counts across agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalance {
    /// Agent id → number of assigned orders.
    pub per_agent: BTreeMap<String, usize>,

    /// Mean orders per agent.
    pub mean: f64,

    /// Population standard deviation of orders per agent.
    pub std_dev: f64,
}

impl LoadBalance {
    /// The site convention: a standard deviation under 1.0 counts as
    /// well balanced.
    pub fn is_balanced(&self) -> bool {
        self.std_dev < 1.0
    }
}

/// Mean and spread of per-agent assigned-order counts.
pub fn load_balance(allocation: &AllocationResult) -> LoadBalance {
    let per_agent: BTreeMap<String, usize> = allocation
        .assignments
        .iter()
        .map(|(agent_id, orders)| (agent_id.clone(), orders.len()))
        .collect();

    let n = per_agent.len();
    if n == 0 {
        return LoadBalance {
            per_agent,
            mean: 0.0,
            std_dev: 0.0,
        };
    }

    let mean = per_agent.values().sum::<usize>() as f64 / n as f64;
    let variance = per_agent
        .values()
        .map(|&count| {
            let diff = count as f64 - mean;
            diff * diff
        })
        .sum::<f64>()
        / n as f64;

    LoadBalance {
        per_agent,
        mean,
        std_dev: variance.sqrt(),
    }
}
