//! Demand statistics and compatibility grouping over order history.

use crate::constraints::{check_compatibility, CompatibilityRules};
use crate::model::{Catalog, Order, ProductAttribute};
use crate::spatial::{manhattan, Location};
use std::collections::{BTreeMap, BTreeSet};

/// Number of **distinct orders** referencing each product.
///
/// Quantities and repeated line items within one order do not inflate
/// the count.
pub fn product_frequency(orders: &[Order]) -> BTreeMap<String, usize> {
    let mut frequency = BTreeMap::new();
    for order in orders {
        let distinct: BTreeSet<&str> = order
            .items
            .iter()
            .map(|item| item.product_id.as_str())
            .collect();
        for product_id in distinct {
            *frequency.entry(product_id.to_string()).or_insert(0) += 1;
        }
    }
    frequency
}

/// For each unordered product pair, the number of orders containing
/// both. Pairs are keyed lexicographically ascending. Products that
/// never co-occur are absent.
///
/// High-affinity pairs are candidates for shelf co-location.
pub fn product_affinity(orders: &[Order]) -> BTreeMap<(String, String), usize> {
    let mut affinity = BTreeMap::new();
    for order in orders {
        let distinct: BTreeSet<&str> = order
            .items
            .iter()
            .map(|item| item.product_id.as_str())
            .collect();
        let ids: Vec<&str> = distinct.into_iter().collect();
        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                *affinity.entry((a.to_string(), b.to_string())).or_insert(0) += 1;
            }
        }
    }
    affinity
}

/// Partitions orders into groups that could share one agent's load
/// without violating the compatibility rules.
///
/// Greedy and deterministic: orders in input order, each joining the
/// first group whose combined attributes stay rule-clean, opening a
/// new group otherwise. Useful for suggesting batches before an
/// allocation run; independent of any actual allocation.
pub fn find_compatible_orders(
    orders: &[Order],
    catalog: &Catalog,
    rules: &CompatibilityRules,
) -> Vec<BTreeSet<String>> {
    let mut groups: Vec<(BTreeSet<String>, BTreeSet<ProductAttribute>)> = Vec::new();

    for order in orders {
        let attributes: BTreeSet<ProductAttribute> = order
            .items
            .iter()
            .filter_map(|item| catalog.get(&item.product_id))
            .flat_map(|product| product.attributes.iter().copied())
            .collect();

        let slot = groups
            .iter()
            .position(|(_, group_attrs)| {
                check_compatibility(&attributes, group_attrs, rules).is_ok()
            });

        match slot {
            Some(idx) => {
                groups[idx].0.insert(order.id.clone());
                groups[idx].1.extend(attributes);
            }
            None => {
                let mut ids = BTreeSet::new();
                ids.insert(order.id.clone());
                groups.push((ids, attributes));
            }
        }
    }

    groups.into_iter().map(|(ids, _)| ids).collect()
}

/// Sum of one-way entry→shelf distances over an order's resolvable
/// items. A rough "how far from the door is this order" figure.
pub fn order_distance_sum(order: &Order, catalog: &Catalog, entry: Location) -> u32 {
    order
        .items
        .iter()
        .filter_map(|item| catalog.get(&item.product_id))
        .map(|product| manhattan(entry, product.location))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderItem, Product};

    fn order(id: &str, product_ids: &[&str]) -> Order {
        Order {
            id: id.into(),
            items: product_ids
                .iter()
                .map(|pid| OrderItem {
                    product_id: pid.to_string(),
                    quantity: 1,
                })
                .collect(),
        }
    }

    fn product(id: &str, location: Location, attributes: &[ProductAttribute]) -> Product {
        Product {
            id: id.into(),
            name: id.into(),
            weight_kg: 1.0,
            volume_dm3: 1.0,
            location,
            zone: 'A',
            attributes: attributes.iter().copied().collect(),
        }
    }

    #[test]
    fn test_frequency_counts_distinct_orders() {
        let orders = vec![
            order("O1", &["P1", "P2"]),
            order("O2", &["P1"]),
            // P1 listed twice in one order still counts once
            order("O3", &["P1", "P1", "P3"]),
        ];
        let frequency = product_frequency(&orders);

        assert_eq!(frequency["P1"], 3);
        assert_eq!(frequency["P2"], 1);
        assert_eq!(frequency["P3"], 1);
    }

    #[test]
    fn test_affinity_counts_co_occurrence() {
        let orders = vec![
            order("O1", &["P1", "P2", "P3"]),
            order("O2", &["P2", "P1"]),
            order("O3", &["P3"]),
        ];
        let affinity = product_affinity(&orders);

        assert_eq!(affinity[&("P1".to_string(), "P2".to_string())], 2);
        assert_eq!(affinity[&("P1".to_string(), "P3".to_string())], 1);
        assert_eq!(affinity[&("P2".to_string(), "P3".to_string())], 1);
        // keys are normalized; the reversed pair does not exist
        assert!(!affinity.contains_key(&("P2".to_string(), "P1".to_string())));
    }

    #[test]
    fn test_affinity_empty_orders() {
        assert!(product_affinity(&[]).is_empty());
    }

    #[test]
    fn test_compatible_orders_partition() {
        let catalog: Catalog = [
            product("P-haz", Location::new(1, 1), &[ProductAttribute::Hazardous]),
            product("P-food", Location::new(2, 1), &[ProductAttribute::Food]),
            product("P-plain", Location::new(3, 1), &[]),
        ]
        .into_iter()
        .map(|p| (p.id.clone(), p))
        .collect();

        let orders = vec![
            order("O1", &["P-haz"]),
            order("O2", &["P-food"]),
            order("O3", &["P-plain"]),
        ];

        let groups = find_compatible_orders(&orders, &catalog, &CompatibilityRules::default());

        // O1 opens a group; O2 clashes with it and opens another; O3
        // joins the first group it fits, which is O1's.
        assert_eq!(groups.len(), 2);
        assert!(groups[0].contains("O1"));
        assert!(groups[0].contains("O3"));
        assert!(groups[1].contains("O2"));

        // every order lands in exactly one group
        let total: usize = groups.iter().map(BTreeSet::len).sum();
        assert_eq!(total, orders.len());
    }

    #[test]
    fn test_compatible_orders_no_rules_single_group() {
        let catalog = Catalog::new();
        let orders = vec![order("O1", &["X"]), order("O2", &["Y"])];
        let groups = find_compatible_orders(&orders, &catalog, &CompatibilityRules::none());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 2);
    }

    #[test]
    fn test_order_distance_sum() {
        let catalog: Catalog = [
            product("P1", Location::new(2, 1), &[]),
            product("P2", Location::new(3, 2), &[]),
        ]
        .into_iter()
        .map(|p| (p.id.clone(), p))
        .collect();

        let o = order("O1", &["P1", "P2", "P-unknown"]);
        // 3 + 5; the unknown id contributes nothing
        assert_eq!(order_distance_sum(&o, &catalog, Location::new(0, 0)), 8);
    }
}
