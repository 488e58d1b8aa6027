//! Derived order totals.

use super::types::{Catalog, Order};

/// Weight and volume of an order, derived from catalog data.
///
/// Items whose product id is missing from the catalog contribute
/// nothing; their ids are reported in `missing` so the caller can
/// surface a data-integrity warning.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTotals {
    /// Total weight in kilograms over resolvable items.
    pub weight_kg: f64,
    /// Total volume in cubic decimetres over resolvable items.
    pub volume_dm3: f64,
    /// Product ids that could not be resolved, in item order.
    pub missing: Vec<String>,
}

/// Computes an order's weight and volume from product data × quantity.
pub fn order_totals(order: &Order, catalog: &Catalog) -> OrderTotals {
    let mut weight_kg = 0.0;
    let mut volume_dm3 = 0.0;
    let mut missing = Vec::new();

    for item in &order.items {
        match catalog.get(&item.product_id) {
            Some(product) => {
                let qty = f64::from(item.quantity);
                weight_kg += product.weight_kg * qty;
                volume_dm3 += product.volume_dm3 * qty;
            }
            None => missing.push(item.product_id.clone()),
        }
    }

    OrderTotals {
        weight_kg,
        volume_dm3,
        missing,
    }
}
