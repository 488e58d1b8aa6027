//! Warehouse layout: zone grid and entry point.

use super::location::Location;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Grid code for aisle cells. Aisles belong to no zone.
pub const AISLE: char = '0';

/// A rectangular warehouse: a grid of zone codes, the derived
/// zone → cells mapping, and the single entry point.
///
/// The zone mapping is built from the grid at construction, so every
/// zone-coded cell is guaranteed to appear in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    grid: Vec<Vec<char>>,
    zones: BTreeMap<char, BTreeSet<Location>>,
    width: usize,
    height: usize,
    entry: Location,
}

impl Warehouse {
    /// Builds a warehouse from a row-major grid of zone codes.
    ///
    /// `grid[y][x]` is the code of the cell at `(x, y)`; [`AISLE`]
    /// cells carry no zone. Fails if the grid is empty or ragged, or
    /// if the entry point lies outside it.
    pub fn new(grid: Vec<Vec<char>>, entry: Location) -> Result<Self, ConfigError> {
        if grid.is_empty() || grid[0].is_empty() {
            return Err(ConfigError::EmptyGrid);
        }
        let width = grid[0].len();
        let height = grid.len();
        for (row, cells) in grid.iter().enumerate() {
            if cells.len() != width {
                return Err(ConfigError::RaggedGrid {
                    row,
                    found: cells.len(),
                    expected: width,
                });
            }
        }

        let in_bounds = entry.x >= 0
            && entry.y >= 0
            && (entry.x as usize) < width
            && (entry.y as usize) < height;
        if !in_bounds {
            return Err(ConfigError::EntryOutOfBounds {
                x: entry.x,
                y: entry.y,
                width,
                height,
            });
        }

        let mut zones: BTreeMap<char, BTreeSet<Location>> = BTreeMap::new();
        for (y, cells) in grid.iter().enumerate() {
            for (x, &code) in cells.iter().enumerate() {
                if code != AISLE {
                    zones
                        .entry(code)
                        .or_default()
                        .insert(Location::new(x as i32, y as i32));
                }
            }
        }

        Ok(Self {
            grid,
            zones,
            width,
            height,
            entry,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The entry point every pick tour starts and ends at.
    pub fn entry(&self) -> Location {
        self.entry
    }

    pub fn in_bounds(&self, loc: Location) -> bool {
        loc.x >= 0
            && loc.y >= 0
            && (loc.x as usize) < self.width
            && (loc.y as usize) < self.height
    }

    /// Zone code of a cell, or `None` for aisles and out-of-bounds cells.
    pub fn zone_at(&self, loc: Location) -> Option<char> {
        if !self.in_bounds(loc) {
            return None;
        }
        let code = self.grid[loc.y as usize][loc.x as usize];
        (code != AISLE).then_some(code)
    }

    /// Cells belonging to a zone. Empty for unknown codes.
    pub fn zone_cells(&self, code: char) -> impl Iterator<Item = Location> + '_ {
        self.zones
            .get(&code)
            .into_iter()
            .flat_map(|cells| cells.iter().copied())
    }

    /// All zone codes present in the grid, in ascending order.
    pub fn zone_codes(&self) -> impl Iterator<Item = char> + '_ {
        self.zones.keys().copied()
    }
}
