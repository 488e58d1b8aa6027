//! Allocation configuration.

use crate::constraints::{CompatibilityRules, ZoneAccessPolicy};

/// Which constraint set the first-fit scan applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllocationMode {
    /// Capacity only. No compatibility or zone checks, no escort
    /// pairing.
    Naive,

    /// Capacity, product compatibility, zone access, and cart escort
    /// pairing.
    #[default]
    Constrained,
}

/// Configuration for the allocation engine.
///
/// # Examples
///
/// ```
/// use optipick::allocation::{AllocationConfig, AllocationMode};
///
/// let config = AllocationConfig::default()
///     .with_mode(AllocationMode::Constrained)
///     .with_agent_priority(vec!["H1".into(), "R1".into()]);
/// ```
#[derive(Debug, Clone)]
pub struct AllocationConfig {
    /// Active constraint set.
    pub mode: AllocationMode,

    /// Product attribute pairs that may not share a load.
    pub rules: CompatibilityRules,

    /// Kind-level zone restrictions.
    pub zone_policy: ZoneAccessPolicy,

    /// Explicit first-fit tie-break ordering by agent id.
    ///
    /// When `None`, the input agent order is used. Making the ordering
    /// a declared parameter keeps the first-fit contract auditable
    /// instead of depending on incidental list order.
    pub agent_priority: Option<Vec<String>>,
}

impl Default for AllocationConfig {
    /// Same as [`AllocationConfig::constrained`].
    fn default() -> Self {
        Self::constrained()
    }
}

impl AllocationConfig {
    /// Capacity-only allocation with no compatibility or zone rules.
    pub fn naive() -> Self {
        Self {
            mode: AllocationMode::Naive,
            rules: CompatibilityRules::none(),
            zone_policy: ZoneAccessPolicy::open(),
            agent_priority: None,
        }
    }

    /// Fully constrained allocation under the default rule tables.
    pub fn constrained() -> Self {
        Self {
            mode: AllocationMode::Constrained,
            rules: CompatibilityRules::default(),
            zone_policy: ZoneAccessPolicy::human_only_cold_and_chemical(),
            agent_priority: None,
        }
    }

    pub fn with_mode(mut self, mode: AllocationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_rules(mut self, rules: CompatibilityRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_zone_policy(mut self, policy: ZoneAccessPolicy) -> Self {
        self.zone_policy = policy;
        self
    }

    pub fn with_agent_priority(mut self, priority: Vec<String>) -> Self {
        self.agent_priority = Some(priority);
        self
    }
}
