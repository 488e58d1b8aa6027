//! Spatial model: grid locations, the Manhattan metric, and the
//! warehouse layout.
//!
//! Agents move along aisles, so all distances in the engine are
//! Manhattan distances. The warehouse is a rectangular grid of zone
//! codes with a single entry point from which every pick tour starts
//! and ends.

mod location;
mod warehouse;

pub use location::{manhattan, Location};
pub use warehouse::{Warehouse, AISLE};
