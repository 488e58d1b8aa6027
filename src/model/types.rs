//! Input entity definitions.

use crate::spatial::Location;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Product attribute consulted by the compatibility and storage rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductAttribute {
    /// Breaks easily; handled by humans in practice.
    Fragile,
    /// Dangerous goods (chemicals, flammables).
    Hazardous,
    /// Requires cold-chain handling.
    Refrigerated,
    /// Edible goods.
    Food,
}

/// A stocked product. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Unit weight in kilograms.
    pub weight_kg: f64,
    /// Unit volume in cubic decimetres.
    pub volume_dm3: f64,
    /// Shelf position on the warehouse grid (a non-aisle cell).
    pub location: Location,
    /// Zone code of the shelf.
    pub zone: char,
    #[serde(default)]
    pub attributes: BTreeSet<ProductAttribute>,
}

impl Product {
    pub fn has_attribute(&self, attr: ProductAttribute) -> bool {
        self.attributes.contains(&attr)
    }
}

/// Product catalog keyed by product id.
pub type Catalog = BTreeMap<String, Product>;

/// One line of an order: a product reference and a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub quantity: u32,
}

/// A customer order: an ordered sequence of line items.
///
/// Weight and volume totals are derived from the catalog, never
/// stored; see [`super::order_totals`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub items: Vec<OrderItem>,
}

/// The kind of a picking agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Robot,
    Human,
    Cart,
}

impl AgentKind {
    /// Carts cannot move on their own; they need a human escort.
    pub fn requires_escort(self) -> bool {
        matches!(self, AgentKind::Cart)
    }
}

/// A picking agent. Immutable configuration for the duration of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub kind: AgentKind,
    /// Maximum total load weight in kilograms.
    pub capacity_weight: f64,
    /// Maximum total load volume in cubic decimetres.
    pub capacity_volume: f64,
    /// Travel speed in grid units per minute.
    pub speed: f64,
    /// Operating cost per run, used by external reporting.
    pub cost: f64,
    /// Zones this specific agent may not enter, on top of the
    /// kind-level policy.
    #[serde(default)]
    pub forbidden_zones: BTreeSet<char>,
}
