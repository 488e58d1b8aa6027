//! Storage reorganization advice.

use super::affinity::product_frequency;
use crate::model::{Catalog, Order};
use serde::{Deserialize, Serialize};

/// Frequency tiers of product ids.
///
/// High-tier products are picked most often and belong close to the
/// entry; low-tier products can live in the far corners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorganizationPlan {
    pub high: Vec<String>,
    pub medium: Vec<String>,
    pub low: Vec<String>,
}

/// Tiers every catalog product by how many distinct orders reference
/// it.
///
/// Products are ranked by frequency descending (ties by id ascending,
/// for reproducibility) and split into thirds: the top third is
/// `high`, the next `medium`, the rest `low`. Products no order ever
/// references rank with frequency zero.
pub fn suggest_reorganization(catalog: &Catalog, orders: &[Order]) -> ReorganizationPlan {
    let frequency = product_frequency(orders);

    let mut ranked: Vec<(&str, usize)> = catalog
        .keys()
        .map(|id| (id.as_str(), frequency.get(id).copied().unwrap_or(0)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let n = ranked.len();
    let cut_high = n.div_ceil(3);
    let cut_medium = (2 * n).div_ceil(3);

    let ids = |range: std::ops::Range<usize>| -> Vec<String> {
        ranked[range].iter().map(|(id, _)| id.to_string()).collect()
    };

    ReorganizationPlan {
        high: ids(0..cut_high),
        medium: ids(cut_high..cut_medium),
        low: ids(cut_medium..n),
    }
}
