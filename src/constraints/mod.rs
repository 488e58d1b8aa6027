//! Assignment constraints.
//!
//! Pure, side-effect-free predicates deciding whether an order may
//! join an agent's load, plus the data-driven rule tables they
//! consult. Rule tables are explicit configuration, not hard-coded
//! logic, so callers can swap them per run.
//!
//! Every predicate returns `Ok(())` or a [`RejectReason`]. Predicates
//! never panic: unresolvable product ids are filtered out by the
//! allocation engine before evaluation and reported as warnings.

mod checks;
mod rules;

pub use checks::{check_capacity, check_compatibility, check_zone_access, RejectReason};
pub use rules::{CompatibilityRules, ZoneAccessPolicy};
