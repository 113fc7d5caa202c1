//! The table of named maps and the lock that guards it.

use std::collections::HashMap;

use gridway_core::Point;
use log::debug;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{Error, Result};
use crate::map::{GridMap, Tile};
use crate::snapshot;

/// Map id → [`GridMap`]. Not synchronised on its own; see [`MapRegistry`].
#[derive(Debug, Default)]
pub struct MapTable {
    maps: HashMap<String, GridMap>,
}

impl MapTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of maps.
    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.maps.contains_key(id)
    }

    /// Map ids in ascending order.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.maps.keys().cloned().collect();
        ids.sort_unstable();
        ids
    }

    /// Replace any map named `id` with a fresh all-road map.
    ///
    /// On invalid dimensions the table is left untouched, including any
    /// existing map under `id`.
    pub fn create_map(&mut self, id: &str, width: i32, height: i32) -> Result<()> {
        let map = GridMap::new(width, height)?;
        self.insert(id, map);
        Ok(())
    }

    /// Store `map` under `id`, returning the map it replaced.
    pub fn insert(&mut self, id: &str, map: GridMap) -> Option<GridMap> {
        debug!("map {id:?}: {}x{}", map.width(), map.height());
        self.maps.insert(id.to_owned(), map)
    }

    /// Remove `id`. Returns whether a map was removed.
    pub fn free_map(&mut self, id: &str) -> bool {
        let removed = self.maps.remove(id).is_some();
        if removed {
            debug!("map {id:?} freed");
        }
        removed
    }

    pub fn get(&self, id: &str) -> Result<&GridMap> {
        self.maps.get(id).ok_or_else(|| Error::map_not_found(id))
    }

    pub fn get_mut(&mut self, id: &str) -> Result<&mut GridMap> {
        self.maps.get_mut(id).ok_or_else(|| Error::map_not_found(id))
    }

    /// Overwrite one cell of map `id`.
    pub fn set_cell(&mut self, id: &str, p: Point, tile: Tile) -> Result<()> {
        let map = self.get_mut(id)?;
        if !map.set(p, tile) {
            return Err(Error::InvalidParameters(format!(
                "{p} outside map {id:?} of size {}x{}",
                map.width(),
                map.height()
            )));
        }
        Ok(())
    }

    /// Tile at `p` in map `id`, `None` when `p` is out of bounds.
    pub fn cell(&self, id: &str, p: Point) -> Result<Option<Tile>> {
        Ok(self.get(id)?.at(p))
    }

    /// Every point of map `id` holding `tile`, row-major.
    pub fn get_cells_of(&self, id: &str, tile: Tile) -> Result<Vec<Point>> {
        Ok(self.get(id)?.cells_of(tile))
    }

    /// A by-value copy of map `id`.
    pub fn snapshot(&self, id: &str) -> Result<GridMap> {
        self.get(id).cloned()
    }

    /// Serialize map `id` in the snapshot wire format.
    pub fn save(&self, id: &str) -> Result<Vec<u8>> {
        Ok(snapshot::to_bytes(self.get(id)?))
    }

    /// Replace map `id` with one decoded from `bytes`. Malformed input
    /// leaves the table untouched.
    pub fn load(&mut self, id: &str, bytes: &[u8]) -> Result<()> {
        let map = snapshot::from_bytes(bytes)?;
        self.insert(id, map);
        Ok(())
    }
}

/// Every named map, behind one reader/writer lock.
///
/// The lock covers the whole table rather than each map, so an edit to one
/// map waits for searches on any other. Readers never observe a map midway
/// through a mutation. Only [`crate::MapService`] takes the lock; share the
/// registry between services with an `Arc`.
#[derive(Debug, Default)]
pub struct MapRegistry {
    table: RwLock<MapTable>,
}

impl MapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with `table`.
    pub fn from_table(table: MapTable) -> Self {
        Self {
            table: RwLock::new(table),
        }
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, MapTable> {
        self.table.read()
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, MapTable> {
        self.table.write()
    }
}
