//! First-fit allocation engine.

use super::config::{AllocationConfig, AllocationMode};
use super::result::AllocationResult;
use crate::constraints::{check_capacity, check_compatibility, check_zone_access};
use crate::error::{ConfigError, Warning};
use crate::model::{order_totals, Agent, AgentKind, Catalog, Order, ProductAttribute};
use crate::spatial::{manhattan, Warehouse};
use std::collections::{BTreeMap, BTreeSet};

/// An order with its catalog references resolved once up front.
struct ResolvedOrder<'a> {
    order: &'a Order,
    weight: f64,
    volume: f64,
    attributes: BTreeSet<ProductAttribute>,
    zones: BTreeSet<char>,
    resolvable_items: usize,
}

/// Mutable per-agent bookkeeping during the first-fit scan.
struct AgentState<'a> {
    agent: &'a Agent,
    load_weight: f64,
    load_volume: f64,
    attributes: BTreeSet<ProductAttribute>,
    orders: Vec<String>,
}

impl<'a> AgentState<'a> {
    fn new(agent: &'a Agent) -> Self {
        Self {
            agent,
            load_weight: 0.0,
            load_volume: 0.0,
            attributes: BTreeSet::new(),
            orders: Vec::new(),
        }
    }

    fn take(&mut self, resolved: &ResolvedOrder<'_>) {
        self.load_weight += resolved.weight;
        self.load_volume += resolved.volume;
        self.attributes.extend(resolved.attributes.iter().copied());
        self.orders.push(resolved.order.id.clone());
    }
}

/// Assigns orders to agents with a first-fit scan.
///
/// Orders are visited in input order; for each, the first agent in
/// priority order that passes every active constraint takes it, with
/// no backtracking. Orders are atomic: one that fits no agent lands in
/// `unassigned`, never split.
///
/// In [`AllocationMode::Constrained`] a cart may only start taking
/// orders once a human agent is free to escort it; the pairing is
/// recorded in `cart_escorts`. Escorting humans may still carry orders
/// of their own.
///
/// Line items whose product id is not in the catalog are skipped and
/// reported as warnings; an order with no resolvable item at all is
/// unassigned. Malformed configuration (zero agents, non-positive
/// capacity or speed, bad priority list) fails fast with a
/// [`ConfigError`] before any allocation is attempted.
///
/// Deterministic: identical inputs yield identical results.
pub fn allocate(
    orders: &[Order],
    agents: &[Agent],
    catalog: &Catalog,
    warehouse: &Warehouse,
    config: &AllocationConfig,
) -> Result<AllocationResult, ConfigError> {
    let scan_order = validate_agents(agents, config.agent_priority.as_deref())?;

    let mut warnings = Vec::new();
    let resolved: Vec<ResolvedOrder<'_>> = orders
        .iter()
        .map(|order| resolve_order(order, catalog, warehouse, &mut warnings))
        .collect();

    let mut states: Vec<AgentState<'_>> = agents.iter().map(AgentState::new).collect();
    let mut unassigned = Vec::new();
    let mut cart_escorts: BTreeMap<String, String> = BTreeMap::new();
    let mut escorting: BTreeSet<String> = BTreeSet::new();

    for order in &resolved {
        if !order.order.items.is_empty() && order.resolvable_items == 0 {
            unassigned.push(order.order.id.clone());
            continue;
        }

        let chosen = scan_order.iter().copied().find(|&idx| {
            fits(
                &states[idx],
                order,
                config,
                agents,
                &scan_order,
                &cart_escorts,
                &escorting,
            )
        });

        match chosen {
            Some(idx) => {
                if config.mode == AllocationMode::Constrained
                    && states[idx].agent.kind.requires_escort()
                    && !cart_escorts.contains_key(&states[idx].agent.id)
                {
                    // fits() guaranteed an escort exists
                    if let Some(human) = free_escort(agents, &scan_order, &escorting) {
                        escorting.insert(human.clone());
                        cart_escorts.insert(states[idx].agent.id.clone(), human);
                    }
                }
                states[idx].take(order);
            }
            None => unassigned.push(order.order.id.clone()),
        }
    }

    let assignments = states
        .into_iter()
        .map(|state| (state.agent.id.clone(), state.orders))
        .collect();
    let order_totals = resolved
        .iter()
        .map(|r| (r.order.id.clone(), (r.weight, r.volume)))
        .collect();

    Ok(AllocationResult {
        assignments,
        unassigned,
        order_totals,
        cart_escorts,
        warnings,
    })
}

/// Naive pre-routing distance figure: the sum of one-way entry→shelf
/// Manhattan distances over every resolvable line item. A picker who
/// returned to the entry between picks would walk twice this.
pub fn estimate_total_distance(orders: &[Order], catalog: &Catalog, warehouse: &Warehouse) -> u32 {
    orders
        .iter()
        .flat_map(|order| &order.items)
        .filter_map(|item| catalog.get(&item.product_id))
        .map(|product| manhattan(warehouse.entry(), product.location))
        .sum()
}

/// Validates agents and resolves the first-fit scan order.
///
/// Agents named in the priority list come first, in list order; any
/// remaining agents follow in input order.
fn validate_agents(
    agents: &[Agent],
    priority: Option<&[String]>,
) -> Result<Vec<usize>, ConfigError> {
    if agents.is_empty() {
        return Err(ConfigError::NoAgents);
    }
    for agent in agents {
        if agent.capacity_weight <= 0.0 || agent.capacity_volume <= 0.0 {
            return Err(ConfigError::NonPositiveCapacity {
                agent_id: agent.id.clone(),
            });
        }
        if agent.speed <= 0.0 {
            return Err(ConfigError::NonPositiveSpeed {
                agent_id: agent.id.clone(),
            });
        }
    }

    let Some(priority) = priority else {
        return Ok((0..agents.len()).collect());
    };

    let mut scan = Vec::with_capacity(agents.len());
    for id in priority {
        let idx = agents.iter().position(|a| &a.id == id).ok_or_else(|| {
            ConfigError::UnknownPriorityAgent {
                agent_id: id.clone(),
            }
        })?;
        if scan.contains(&idx) {
            return Err(ConfigError::DuplicatePriorityAgent {
                agent_id: id.clone(),
            });
        }
        scan.push(idx);
    }
    for idx in 0..agents.len() {
        if !scan.contains(&idx) {
            scan.push(idx);
        }
    }
    Ok(scan)
}

fn resolve_order<'a>(
    order: &'a Order,
    catalog: &Catalog,
    warehouse: &Warehouse,
    warnings: &mut Vec<Warning>,
) -> ResolvedOrder<'a> {
    let totals = order_totals(order, catalog);
    warnings.extend(totals.missing.iter().map(|product_id| {
        Warning::UnknownProduct {
            order_id: order.id.clone(),
            product_id: product_id.clone(),
        }
    }));

    let mut attributes = BTreeSet::new();
    let mut zones = BTreeSet::new();
    for product in order
        .items
        .iter()
        .filter_map(|item| catalog.get(&item.product_id))
    {
        attributes.extend(product.attributes.iter().copied());
        // The grid is authoritative when the shelf cell is zoned; fall
        // back to the product record otherwise.
        zones.insert(warehouse.zone_at(product.location).unwrap_or(product.zone));
    }

    ResolvedOrder {
        order,
        weight: totals.weight_kg,
        volume: totals.volume_dm3,
        attributes,
        zones,
        resolvable_items: order.items.len() - totals.missing.len(),
    }
}

fn fits(
    state: &AgentState<'_>,
    order: &ResolvedOrder<'_>,
    config: &AllocationConfig,
    agents: &[Agent],
    scan_order: &[usize],
    cart_escorts: &BTreeMap<String, String>,
    escorting: &BTreeSet<String>,
) -> bool {
    if check_capacity(
        state.agent,
        state.load_weight,
        state.load_volume,
        order.weight,
        order.volume,
    )
    .is_err()
    {
        return false;
    }

    if config.mode == AllocationMode::Naive {
        return true;
    }

    if check_compatibility(&order.attributes, &state.attributes, &config.rules).is_err() {
        return false;
    }
    if check_zone_access(state.agent, &order.zones, &config.zone_policy).is_err() {
        return false;
    }

    // A cart without an escort yet needs a free human before it can
    // take its first order.
    if state.agent.kind.requires_escort() && !cart_escorts.contains_key(&state.agent.id) {
        return free_escort(agents, scan_order, escorting).is_some();
    }
    true
}

/// First human in scan order not already escorting a cart.
fn free_escort(
    agents: &[Agent],
    scan_order: &[usize],
    escorting: &BTreeSet<String>,
) -> Option<String> {
    scan_order
        .iter()
        .map(|&idx| &agents[idx])
        .find(|agent| agent.kind == AgentKind::Human && !escorting.contains(&agent.id))
        .map(|agent| agent.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderItem, Product};
    use crate::spatial::Location;
    use proptest::prelude::*;

    /// 10x8 grid: row 0 is the entry aisle, rows 1..=5 are zones A..E.
    fn test_warehouse() -> Warehouse {
        let mut grid = vec![vec!['0'; 10]; 8];
        for (row, code) in [(1, 'A'), (2, 'B'), (3, 'C'), (4, 'D'), (5, 'E')] {
            grid[row] = vec![code; 10];
        }
        Warehouse::new(grid, Location::new(0, 0)).unwrap()
    }

    fn product(
        id: &str,
        weight: f64,
        volume: f64,
        location: Location,
        zone: char,
        attributes: &[ProductAttribute],
    ) -> Product {
        Product {
            id: id.into(),
            name: id.into(),
            weight_kg: weight,
            volume_dm3: volume,
            location,
            zone,
            attributes: attributes.iter().copied().collect(),
        }
    }

    fn test_catalog() -> Catalog {
        [
            product("P-A", 2.0, 5.0, Location::new(2, 1), 'A', &[]),
            product("P-B", 4.0, 5.0, Location::new(3, 2), 'B', &[]),
            product(
                "P-C",
                1.0,
                2.0,
                Location::new(4, 3),
                'C',
                &[ProductAttribute::Food, ProductAttribute::Refrigerated],
            ),
            product(
                "P-D",
                3.0,
                4.0,
                Location::new(5, 4),
                'D',
                &[ProductAttribute::Hazardous],
            ),
            product(
                "P-E",
                1.5,
                8.0,
                Location::new(6, 5),
                'E',
                &[ProductAttribute::Fragile],
            ),
        ]
        .into_iter()
        .map(|p| (p.id.clone(), p))
        .collect()
    }

    fn order(id: &str, items: &[(&str, u32)]) -> Order {
        Order {
            id: id.into(),
            items: items
                .iter()
                .map(|(pid, qty)| OrderItem {
                    product_id: pid.to_string(),
                    quantity: *qty,
                })
                .collect(),
        }
    }

    fn agent(id: &str, kind: AgentKind, weight: f64, volume: f64) -> Agent {
        Agent {
            id: id.into(),
            kind,
            capacity_weight: weight,
            capacity_volume: volume,
            speed: 2.0,
            cost: 1.0,
            forbidden_zones: BTreeSet::new(),
        }
    }

    #[test]
    fn test_naive_first_fit_uses_first_agent_with_room() {
        let agents = vec![
            agent("R1", AgentKind::Robot, 10.0, 12.0),
            agent("R2", AgentKind::Robot, 100.0, 100.0),
        ];
        let orders = vec![
            order("O1", &[("P-A", 2)]), // 4kg / 10dm3
            order("O2", &[("P-B", 1)]), // 4kg / 5dm3, volume no longer fits R1
            order("O3", &[("P-A", 1)]), // 2kg / 5dm3
        ];

        let result = allocate(
            &orders,
            &agents,
            &test_catalog(),
            &test_warehouse(),
            &AllocationConfig::naive(),
        )
        .unwrap();

        assert_eq!(result.assignments["R1"], vec!["O1"]);
        assert_eq!(result.assignments["R2"], vec!["O2", "O3"]);
        assert!(result.unassigned.is_empty());
        assert!(result.cart_escorts.is_empty());
    }

    #[test]
    fn test_capacity_scenario_12kg_25dm3() {
        let agents = vec![agent("R1", AgentKind::Robot, 20.0, 30.0)];
        let orders = vec![
            order("O1", &[("P-A", 2)]),             // 4.0kg / 10.0dm3
            order("O2", &[("P-B", 1), ("P-A", 2)]), // 8.0kg / 15.0dm3
        ];
        let result = allocate(
            &orders,
            &agents,
            &test_catalog(),
            &test_warehouse(),
            &AllocationConfig::naive(),
        )
        .unwrap();

        assert_eq!(result.assignments["R1"].len(), 2);
        let (w, v) = result.agent_load("R1");
        assert!((w - 12.0).abs() < 1e-10);
        assert!((v - 25.0).abs() < 1e-10);
        assert!(w <= agents[0].capacity_weight);
        assert!(v <= agents[0].capacity_volume);
    }

    #[test]
    fn test_oversized_order_is_unassigned_never_split() {
        let agents = vec![
            agent("R1", AgentKind::Robot, 5.0, 5.0),
            agent("R2", AgentKind::Robot, 5.0, 5.0),
        ];
        let orders = vec![order("O1", &[("P-B", 3)])]; // 12kg

        let result = allocate(
            &orders,
            &agents,
            &test_catalog(),
            &test_warehouse(),
            &AllocationConfig::naive(),
        )
        .unwrap();

        assert_eq!(result.unassigned, vec!["O1"]);
        assert_eq!(result.assigned_count(), 0);
    }

    #[test]
    fn test_empty_order_list() {
        let agents = vec![agent("R1", AgentKind::Robot, 5.0, 5.0)];
        let result = allocate(
            &[],
            &agents,
            &test_catalog(),
            &test_warehouse(),
            &AllocationConfig::constrained(),
        )
        .unwrap();

        assert_eq!(result.assignments["R1"], Vec::<String>::new());
        assert!(result.unassigned.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_incompatible_products_split_across_agents() {
        let agents = vec![
            agent("H1", AgentKind::Human, 100.0, 100.0),
            agent("H2", AgentKind::Human, 100.0, 100.0),
        ];
        let orders = vec![
            order("O1", &[("P-D", 1)]), // hazardous
            order("O2", &[("P-C", 1)]), // food, incompatible with hazardous
        ];

        let result = allocate(
            &orders,
            &agents,
            &test_catalog(),
            &test_warehouse(),
            &AllocationConfig::constrained(),
        )
        .unwrap();

        assert_eq!(result.assignments["H1"], vec!["O1"]);
        assert_eq!(result.assignments["H2"], vec!["O2"]);
    }

    #[test]
    fn test_zone_restriction_falls_through_to_human() {
        let agents = vec![
            agent("R1", AgentKind::Robot, 100.0, 100.0),
            agent("H1", AgentKind::Human, 100.0, 100.0),
        ];
        // P-D sits in the chemical zone, closed to robots.
        let orders = vec![order("O1", &[("P-D", 1)]), order("O2", &[("P-A", 1)])];

        let result = allocate(
            &orders,
            &agents,
            &test_catalog(),
            &test_warehouse(),
            &AllocationConfig::constrained(),
        )
        .unwrap();

        assert_eq!(result.assignments["H1"], vec!["O1"]);
        assert_eq!(result.assignments["R1"], vec!["O2"]);
    }

    #[test]
    fn test_cart_is_paired_with_free_human() {
        let agents = vec![
            agent("C1", AgentKind::Cart, 100.0, 100.0),
            agent("H1", AgentKind::Human, 100.0, 100.0),
        ];
        let orders = vec![order("O1", &[("P-A", 1)])];

        let result = allocate(
            &orders,
            &agents,
            &test_catalog(),
            &test_warehouse(),
            &AllocationConfig::constrained(),
        )
        .unwrap();

        assert_eq!(result.assignments["C1"], vec!["O1"]);
        assert_eq!(result.cart_escorts["C1"], "H1");
    }

    #[test]
    fn test_cart_without_human_is_unusable() {
        let agents = vec![
            agent("C1", AgentKind::Cart, 100.0, 100.0),
            agent("R1", AgentKind::Robot, 3.0, 6.0),
        ];
        let orders = vec![
            order("O1", &[("P-A", 1)]), // fits R1
            order("O2", &[("P-B", 1)]), // 4kg, fits nobody once C1 is out
        ];

        let result = allocate(
            &orders,
            &agents,
            &test_catalog(),
            &test_warehouse(),
            &AllocationConfig::constrained(),
        )
        .unwrap();

        assert!(result.assignments["C1"].is_empty());
        assert!(!result.cart_escorts.contains_key("C1"));
        assert_eq!(result.assignments["R1"], vec!["O1"]);
        assert_eq!(result.unassigned, vec!["O2"]);
    }

    #[test]
    fn test_two_carts_one_human() {
        let agents = vec![
            agent("C1", AgentKind::Cart, 3.0, 6.0),
            agent("C2", AgentKind::Cart, 100.0, 100.0),
            agent("H1", AgentKind::Human, 100.0, 100.0),
        ];
        let orders = vec![
            order("O1", &[("P-A", 1)]), // C1 takes it, claiming H1
            order("O2", &[("P-B", 1)]), // too heavy for C1; C2 has no escort left
        ];

        let result = allocate(
            &orders,
            &agents,
            &test_catalog(),
            &test_warehouse(),
            &AllocationConfig::constrained(),
        )
        .unwrap();

        assert_eq!(result.assignments["C1"], vec!["O1"]);
        assert_eq!(result.cart_escorts.get("C1"), Some(&"H1".to_string()));
        assert!(!result.cart_escorts.contains_key("C2"));
        // H1 still carries orders of its own
        assert_eq!(result.assignments["H1"], vec!["O2"]);
    }

    #[test]
    fn test_unknown_product_skipped_with_warning() {
        let agents = vec![agent("H1", AgentKind::Human, 100.0, 100.0)];
        let orders = vec![order("O1", &[("P-A", 1), ("P-X", 2)])];

        let result = allocate(
            &orders,
            &agents,
            &test_catalog(),
            &test_warehouse(),
            &AllocationConfig::constrained(),
        )
        .unwrap();

        assert_eq!(result.assignments["H1"], vec!["O1"]);
        let (w, _) = result.order_totals["O1"];
        assert!((w - 2.0).abs() < 1e-10);
        assert_eq!(
            result.warnings,
            vec![Warning::UnknownProduct {
                order_id: "O1".into(),
                product_id: "P-X".into(),
            }]
        );
    }

    #[test]
    fn test_fully_unresolvable_order_is_unassigned() {
        let agents = vec![agent("H1", AgentKind::Human, 100.0, 100.0)];
        let orders = vec![order("O1", &[("P-X", 1)]), order("O2", &[("P-A", 1)])];

        let result = allocate(
            &orders,
            &agents,
            &test_catalog(),
            &test_warehouse(),
            &AllocationConfig::constrained(),
        )
        .unwrap();

        assert_eq!(result.unassigned, vec!["O1"]);
        assert_eq!(result.assignments["H1"], vec!["O2"]);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_agent_priority_overrides_input_order() {
        let agents = vec![
            agent("R1", AgentKind::Robot, 100.0, 100.0),
            agent("R2", AgentKind::Robot, 100.0, 100.0),
        ];
        let orders = vec![order("O1", &[("P-A", 1)])];
        let config = AllocationConfig::naive().with_agent_priority(vec!["R2".into()]);

        let result = allocate(&orders, &agents, &test_catalog(), &test_warehouse(), &config)
            .unwrap();

        assert_eq!(result.assignments["R2"], vec!["O1"]);
        assert!(result.assignments["R1"].is_empty());
    }

    #[test]
    fn test_priority_list_validation() {
        let agents = vec![agent("R1", AgentKind::Robot, 1.0, 1.0)];

        let unknown = AllocationConfig::naive().with_agent_priority(vec!["R9".into()]);
        assert_eq!(
            allocate(&[], &agents, &test_catalog(), &test_warehouse(), &unknown).unwrap_err(),
            ConfigError::UnknownPriorityAgent {
                agent_id: "R9".into()
            }
        );

        let dup =
            AllocationConfig::naive().with_agent_priority(vec!["R1".into(), "R1".into()]);
        assert_eq!(
            allocate(&[], &agents, &test_catalog(), &test_warehouse(), &dup).unwrap_err(),
            ConfigError::DuplicatePriorityAgent {
                agent_id: "R1".into()
            }
        );
    }

    #[test]
    fn test_configuration_errors_are_fatal() {
        let catalog = test_catalog();
        let wh = test_warehouse();

        assert_eq!(
            allocate(&[], &[], &catalog, &wh, &AllocationConfig::naive()).unwrap_err(),
            ConfigError::NoAgents
        );

        let bad_cap = vec![agent("R1", AgentKind::Robot, 0.0, 5.0)];
        assert!(matches!(
            allocate(&[], &bad_cap, &catalog, &wh, &AllocationConfig::naive()).unwrap_err(),
            ConfigError::NonPositiveCapacity { .. }
        ));

        let mut slow = agent("R1", AgentKind::Robot, 5.0, 5.0);
        slow.speed = 0.0;
        assert!(matches!(
            allocate(&[], &[slow], &catalog, &wh, &AllocationConfig::naive()).unwrap_err(),
            ConfigError::NonPositiveSpeed { .. }
        ));
    }

    #[test]
    fn test_idempotent_on_identical_inputs() {
        let agents = vec![
            agent("R1", AgentKind::Robot, 8.0, 12.0),
            agent("H1", AgentKind::Human, 20.0, 25.0),
            agent("C1", AgentKind::Cart, 50.0, 80.0),
        ];
        let orders = vec![
            order("O1", &[("P-A", 2)]),
            order("O2", &[("P-D", 1)]),
            order("O3", &[("P-C", 3)]),
            order("O4", &[("P-E", 2), ("P-B", 1)]),
        ];
        let config = AllocationConfig::constrained();

        let first = allocate(&orders, &agents, &test_catalog(), &test_warehouse(), &config)
            .unwrap();
        let second = allocate(&orders, &agents, &test_catalog(), &test_warehouse(), &config)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_estimate_total_distance() {
        let orders = vec![order("O1", &[("P-A", 2), ("P-B", 1)])];
        // entry (0,0): P-A at (2,1) = 3, P-B at (3,2) = 5; quantity does
        // not multiply, the figure is per line item.
        assert_eq!(
            estimate_total_distance(&orders, &test_catalog(), &test_warehouse()),
            8
        );
    }

    // ---- Invariants over generated instances ----

    fn arb_orders() -> impl Strategy<Value = Vec<Order>> {
        let item = (0usize..5, 1u32..4).prop_map(|(p, qty)| OrderItem {
            product_id: format!("P-{}", ['A', 'B', 'C', 'D', 'E'][p]),
            quantity: qty,
        });
        proptest::collection::vec(proptest::collection::vec(item, 1..4), 0..12).prop_map(
            |orders| {
                orders
                    .into_iter()
                    .enumerate()
                    .map(|(i, items)| Order {
                        id: format!("O{i}"),
                        items,
                    })
                    .collect()
            },
        )
    }

    proptest! {
        #[test]
        fn prop_partition_invariant(orders in arb_orders()) {
            let agents = vec![
                agent("R1", AgentKind::Robot, 10.0, 15.0),
                agent("H1", AgentKind::Human, 18.0, 22.0),
            ];
            let result = allocate(
                &orders,
                &agents,
                &test_catalog(),
                &test_warehouse(),
                &AllocationConfig::constrained(),
            )
            .unwrap();

            for order in &orders {
                let assigned = result.agent_of(&order.id).is_some();
                let unassigned = result.unassigned.contains(&order.id);
                prop_assert!(assigned != unassigned,
                    "order {} must be assigned xor unassigned", order.id);
            }
            prop_assert_eq!(result.assigned_count() + result.unassigned.len(), orders.len());
        }

        #[test]
        fn prop_capacity_never_exceeded(orders in arb_orders()) {
            let agents = vec![
                agent("R1", AgentKind::Robot, 10.0, 15.0),
                agent("H1", AgentKind::Human, 18.0, 22.0),
            ];
            let result = allocate(
                &orders,
                &agents,
                &test_catalog(),
                &test_warehouse(),
                &AllocationConfig::constrained(),
            )
            .unwrap();

            for a in &agents {
                let (w, v) = result.agent_load(&a.id);
                prop_assert!(w <= a.capacity_weight + 1e-9);
                prop_assert!(v <= a.capacity_volume + 1e-9);
            }
        }
    }
}
