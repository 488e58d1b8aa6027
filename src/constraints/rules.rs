//! Data-driven rule tables.

use crate::model::{AgentKind, ProductAttribute};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Pairs of product attributes that must not share an agent's load.
///
/// Pairs are stored in normalized (ascending) order, so lookups are
/// order-insensitive.
///
/// # Examples
///
/// ```
/// use optipick::constraints::CompatibilityRules;
/// use optipick::model::ProductAttribute;
///
/// let rules = CompatibilityRules::none()
///     .with_incompatible(ProductAttribute::Hazardous, ProductAttribute::Food);
/// assert!(rules.are_incompatible(ProductAttribute::Food, ProductAttribute::Hazardous));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityRules {
    incompatible: BTreeSet<(ProductAttribute, ProductAttribute)>,
}

impl CompatibilityRules {
    /// No incompatibilities: everything may share a load.
    pub fn none() -> Self {
        Self {
            incompatible: BTreeSet::new(),
        }
    }

    /// Adds an incompatible attribute pair.
    pub fn with_incompatible(mut self, a: ProductAttribute, b: ProductAttribute) -> Self {
        self.incompatible.insert(normalize(a, b));
        self
    }

    /// Whether two attributes may not co-occur in one load.
    pub fn are_incompatible(&self, a: ProductAttribute, b: ProductAttribute) -> bool {
        self.incompatible.contains(&normalize(a, b))
    }

    pub fn is_empty(&self) -> bool {
        self.incompatible.is_empty()
    }
}

impl Default for CompatibilityRules {
    /// Hazardous goods may not travel with food or refrigerated goods.
    fn default() -> Self {
        Self::none()
            .with_incompatible(ProductAttribute::Hazardous, ProductAttribute::Food)
            .with_incompatible(ProductAttribute::Hazardous, ProductAttribute::Refrigerated)
    }
}

fn normalize(
    a: ProductAttribute,
    b: ProductAttribute,
) -> (ProductAttribute, ProductAttribute) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Per-kind zone restrictions.
///
/// An agent's effective forbidden set is the policy set for its kind
/// plus its own `forbidden_zones` configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ZoneAccessPolicy {
    by_kind: BTreeMap<AgentKind, BTreeSet<char>>,
}

impl ZoneAccessPolicy {
    /// No kind-level restrictions.
    pub fn open() -> Self {
        Self::default()
    }

    /// The original site policy: robots and carts stay out of the
    /// refrigerated (`C`) and chemical (`D`) zones; humans go anywhere.
    pub fn human_only_cold_and_chemical() -> Self {
        Self::open()
            .with_forbidden(AgentKind::Robot, ['C', 'D'])
            .with_forbidden(AgentKind::Cart, ['C', 'D'])
    }

    /// Forbids zones for an agent kind, merging with earlier entries.
    pub fn with_forbidden(
        mut self,
        kind: AgentKind,
        zones: impl IntoIterator<Item = char>,
    ) -> Self {
        self.by_kind.entry(kind).or_default().extend(zones);
        self
    }

    /// Whether the given kind may enter the given zone.
    pub fn allows(&self, kind: AgentKind, zone: char) -> bool {
        self.by_kind
            .get(&kind)
            .is_none_or(|forbidden| !forbidden.contains(&zone))
    }
}
