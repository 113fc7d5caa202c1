//! The facade hosts talk to.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;

use gridway_core::{Color, Point};
use gridway_paths::{AstarSearch, Passable, SearchParams};
use log::{debug, warn};
use parking_lot::RwLock;

use crate::bitmap;
use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use crate::map::{GridMap, Tile};
use crate::registry::MapRegistry;
use crate::snapshot::{self, MapEncoder};

/// Map management and path queries over a shared [`MapRegistry`].
///
/// Every method takes `&self`; a service can be shared across threads
/// directly or through an `Arc`. Path queries on any map run in parallel
/// with each other and wait for in-flight edits.
///
/// Settings live behind a separate lock, so changing a colour never blocks
/// a search.
#[derive(Debug)]
pub struct MapService {
    registry: Arc<MapRegistry>,
    config: RwLock<ServiceConfig>,
}

impl MapService {
    pub fn new(registry: Arc<MapRegistry>, config: ServiceConfig) -> Self {
        Self {
            registry,
            config: RwLock::new(config),
        }
    }

    /// A service with default settings.
    pub fn with_registry(registry: Arc<MapRegistry>) -> Self {
        Self::new(registry, ServiceConfig::default())
    }

    pub fn registry(&self) -> &Arc<MapRegistry> {
        &self.registry
    }

    // ------------------------------------------------------------------
    // Path queries
    // ------------------------------------------------------------------

    /// Shortest path on map `id` using the configured corner rule.
    ///
    /// The path excludes `start` and ends at `end`. It is empty when
    /// `start == end`.
    pub fn find_path(
        &self,
        id: &str,
        start: impl Into<Point>,
        end: impl Into<Point>,
    ) -> Result<Vec<Point>> {
        let allow_corner = self.config.read().allow_corner;
        self.find_path_with(id, start, end, allow_corner)
    }

    /// Like [`find_path`](Self::find_path) with an explicit corner rule.
    pub fn find_path_with(
        &self,
        id: &str,
        start: impl Into<Point>,
        end: impl Into<Point>,
        allow_corner: bool,
    ) -> Result<Vec<Point>> {
        let (start, end) = (start.into(), end.into());
        let config = self.config();

        let (path, image) = {
            let table = self.registry.read();
            let map = table.get(id)?;
            let params = SearchParams::new(
                map.width(),
                map.height(),
                start,
                end,
                |p: Point| map.passable(p),
            )
            .allow_corner(allow_corner);

            let mut search = AstarSearch::new();
            let path = match search.find(&params) {
                Ok(path) => path,
                Err(e) => {
                    debug!("map {id:?}: no path {start} -> {end}: {e}");
                    return Err(e.into());
                }
            };
            debug!(
                "map {id:?}: path {start} -> {end}, {} steps, {} expanded",
                path.len(),
                search.expanded()
            );
            let image = config
                .auto_render
                .then(|| bitmap::render(map, &path, &config.palette()));
            (path, image)
        };

        if let Some(image) = image {
            let file = config.render_dir().join(format!("{id}.bmp"));
            if let Err(e) = bitmap::encode_bmp(&image).and_then(|b| write_file(&file, &b)) {
                warn!("map {id:?}: failed to render {}: {e}", file.display());
            }
        }
        Ok(path)
    }

    // ------------------------------------------------------------------
    // Map management
    // ------------------------------------------------------------------

    /// Create or replace map `id` with an all-road map.
    pub fn create_map(&self, id: &str, width: i32, height: i32) -> Result<()> {
        self.registry.write().create_map(id, width, height)
    }

    /// Returns whether a map was removed.
    pub fn free_map(&self, id: &str) -> bool {
        self.registry.write().free_map(id)
    }

    pub fn add_collision(&self, id: &str, p: impl Into<Point>) -> Result<()> {
        self.registry.write().set_cell(id, p.into(), Tile::Collision)
    }

    pub fn remove_collision(&self, id: &str, p: impl Into<Point>) -> Result<()> {
        self.registry.write().set_cell(id, p.into(), Tile::Road)
    }

    /// `false` for points outside the map.
    pub fn is_road(&self, id: &str, p: impl Into<Point>) -> Result<bool> {
        Ok(self.registry.read().get(id)?.is_road(p.into()))
    }

    /// `false` for points outside the map.
    pub fn is_collision(&self, id: &str, p: impl Into<Point>) -> Result<bool> {
        Ok(self.registry.read().get(id)?.is_collision(p.into()))
    }

    /// Every road cell, row-major.
    pub fn roads(&self, id: &str) -> Result<Vec<Point>> {
        self.registry.read().get_cells_of(id, Tile::Road)
    }

    /// Every collision cell, row-major.
    pub fn collisions(&self, id: &str) -> Result<Vec<Point>> {
        self.registry.read().get_cells_of(id, Tile::Collision)
    }

    /// A detached copy of map `id`.
    pub fn snapshot(&self, id: &str) -> Result<GridMap> {
        self.registry.read().snapshot(id)
    }

    pub fn map_ids(&self) -> Vec<String> {
        self.registry.read().ids()
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    pub fn save_map(&self, id: &str) -> Result<Vec<u8>> {
        self.registry.read().save(id)
    }

    /// Replace map `id` with a decoded snapshot. On error nothing changes.
    pub fn load_map(&self, id: &str, bytes: &[u8]) -> Result<()> {
        let map = snapshot::from_bytes(bytes)?;
        self.registry.write().insert(id, map);
        Ok(())
    }

    /// Stream map `id` to `file`. The registry lock is released before
    /// the file is touched.
    pub fn save_map_to(&self, id: &str, file: impl AsRef<Path>) -> Result<()> {
        let map = self.snapshot(id)?;
        let mut encoder = MapEncoder::new(BufWriter::new(File::create(file)?));
        encoder.encode(&map)?;
        encoder.flush()?;
        Ok(())
    }

    pub fn load_map_from(&self, id: &str, file: impl AsRef<Path>) -> Result<()> {
        let bytes = fs::read(file)?;
        self.load_map(id, &bytes)
    }

    // ------------------------------------------------------------------
    // Bitmaps
    // ------------------------------------------------------------------

    /// Render map `id` without a path to a BMP file.
    pub fn print_map(&self, id: &str, file: impl AsRef<Path>) -> Result<()> {
        let palette = self.config.read().palette();
        let image = bitmap::render(self.registry.read().get(id)?, &[], &palette);
        let bytes = bitmap::encode_bmp(&image)?;
        write_file(file.as_ref(), &bytes)
    }

    /// Create or replace map `id` from a BMP file, classifying pixels by
    /// the configured wall and road colours.
    pub fn read_bitmap(&self, id: &str, file: impl AsRef<Path>) -> Result<()> {
        let bytes = fs::read(file)?;
        let (wall, road) = {
            let config = self.config.read();
            (config.wall_color, config.road_color)
        };
        let map = bitmap::import(&bytes, wall, road)?;
        self.registry.write().insert(id, map);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    /// A copy of the current settings.
    pub fn config(&self) -> ServiceConfig {
        self.config.read().clone()
    }

    pub fn set_config(&self, config: ServiceConfig) {
        *self.config.write() = config;
    }

    pub fn set_wall_color(&self, rgb: u32) {
        self.config.write().wall_color = Color::from_packed(rgb);
    }

    pub fn set_road_color(&self, rgb: u32) {
        self.config.write().road_color = Color::from_packed(rgb);
    }

    pub fn set_path_color(&self, rgb: u32) {
        self.config.write().path_color = Color::from_packed(rgb);
    }

    /// Rejects an empty path.
    pub fn set_output_dir(&self, dir: impl AsRef<Path>) -> bool {
        let dir = dir.as_ref();
        if dir.as_os_str().is_empty() {
            return false;
        }
        self.config.write().output_dir = Some(dir.to_path_buf());
        true
    }

    pub fn set_auto_render(&self, on: bool) {
        self.config.write().auto_render = on;
    }

    pub fn set_allow_corner(&self, on: bool) {
        self.config.write().allow_corner = on;
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::error::ErrorKind;

    fn service() -> MapService {
        MapService::with_registry(Arc::new(MapRegistry::new()))
    }

    #[test]
    fn find_on_open_map() {
        let s = service();
        s.create_map("m", 3, 3).unwrap();
        let path = s.find_path("m", (0, 0), (2, 2)).unwrap();
        assert_eq!(path, vec![Point::new(1, 1), Point::new(2, 2)]);
        assert!(s.find_path("m", (1, 1), (1, 1)).unwrap().is_empty());
    }

    #[test]
    fn corner_rule_from_config() {
        let s = service();
        s.create_map("m", 3, 3).unwrap();
        s.set_allow_corner(false);
        let path = s.find_path("m", (0, 0), (2, 2)).unwrap();
        assert_eq!(path.len(), 4);
        let path = s.find_path_with("m", (0, 0), (2, 2), true).unwrap();
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn error_kinds() {
        let s = service();
        assert_eq!(
            s.find_path("nope", (0, 0), (1, 1)).unwrap_err().kind(),
            ErrorKind::MapNotFound
        );
        s.create_map("m", 3, 3).unwrap();
        assert_eq!(
            s.find_path("m", (0, 0), (3, 3)).unwrap_err().kind(),
            ErrorKind::InvalidParameters
        );
        s.add_collision("m", (2, 2)).unwrap();
        assert_eq!(
            s.find_path("m", (0, 0), (2, 2)).unwrap_err().kind(),
            ErrorKind::PathNotFound
        );
        assert_eq!(
            s.add_collision("nope", (0, 0)).unwrap_err().kind(),
            ErrorKind::MapNotFound
        );
        assert_eq!(
            s.remove_collision("m", (-1, 0)).unwrap_err().kind(),
            ErrorKind::InvalidParameters
        );
        assert_eq!(s.create_map("m", 0, 3).unwrap_err().kind(), ErrorKind::InvalidParameters);
    }

    #[test]
    fn cell_queries() {
        let s = service();
        s.create_map("m", 2, 2).unwrap();
        s.add_collision("m", (0, 1)).unwrap();
        assert!(s.is_collision("m", (0, 1)).unwrap());
        assert!(!s.is_road("m", (0, 1)).unwrap());
        assert!(!s.is_road("m", (5, 5)).unwrap());
        assert!(!s.is_collision("m", (5, 5)).unwrap());
        assert!(s.is_road("x", (0, 0)).is_err());
        assert_eq!(s.collisions("m").unwrap(), vec![Point::new(0, 1)]);
        assert_eq!(s.roads("m").unwrap().len(), 3);

        s.remove_collision("m", (0, 1)).unwrap();
        assert!(s.collisions("m").unwrap().is_empty());
        assert!(s.free_map("m"));
        assert!(s.map_ids().is_empty());
    }

    #[test]
    fn failed_load_keeps_map() {
        let s = service();
        s.create_map("m", 2, 2).unwrap();
        s.add_collision("m", (1, 0)).unwrap();
        assert_eq!(s.load_map("m", &[9, 9]).unwrap_err().kind(), ErrorKind::Io);
        let mut padded = s.save_map("m").unwrap();
        padded.extend_from_slice(&[0, 0]);
        assert_eq!(s.load_map("m", &padded).unwrap_err().kind(), ErrorKind::Io);
        assert!(s.is_collision("m", (1, 0)).unwrap());
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("m.map");
        let s = service();
        s.create_map("m", 4, 3).unwrap();
        s.add_collision("m", (3, 2)).unwrap();
        s.save_map_to("m", &file).unwrap();
        s.load_map_from("copy", &file).unwrap();
        assert_eq!(s.snapshot("copy").unwrap(), s.snapshot("m").unwrap());

        assert_eq!(fs::read(&file).unwrap(), s.save_map("m").unwrap());
        let missing = dir.path().join("missing.map");
        assert_eq!(s.load_map_from("m", &missing).unwrap_err().kind(), ErrorKind::Io);
    }

    #[test]
    fn bitmap_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("m.bmp");
        let s = service();
        s.set_wall_color(0xFF00_0000 | 0x102030);
        s.create_map("m", 3, 2).unwrap();
        s.add_collision("m", (1, 0)).unwrap();
        s.print_map("m", &file).unwrap();
        s.read_bitmap("back", &file).unwrap();
        assert_eq!(s.snapshot("back").unwrap(), s.snapshot("m").unwrap());
        assert_eq!(s.config().wall_color, Color(0x102030));
    }

    #[test]
    fn auto_render_writes_bitmap() {
        let dir = tempfile::tempdir().unwrap();
        let s = service();
        assert!(!s.set_output_dir(""));
        assert!(s.set_output_dir(dir.path()));
        s.set_auto_render(true);
        s.create_map("m", 3, 3).unwrap();
        s.find_path("m", (0, 0), (2, 2)).unwrap();
        let bytes = fs::read(dir.path().join("m.bmp")).unwrap();
        assert_eq!(&bytes[0..2], b"BM");
    }

    #[test]
    fn render_failure_keeps_path() {
        let dir = tempfile::tempdir().unwrap();
        let s = service();
        s.set_output_dir(dir.path().join("does/not/exist"));
        s.set_auto_render(true);
        s.create_map("m", 2, 2).unwrap();
        assert_eq!(s.find_path("m", (0, 0), (1, 1)).unwrap(), vec![Point::new(1, 1)]);
    }

    #[test]
    fn concurrent_queries_agree() {
        let s = service();
        s.create_map("m", 32, 32).unwrap();
        for y in 0..31 {
            s.add_collision("m", (16, y)).unwrap();
        }
        let expected = s.find_path("m", (0, 0), (31, 0)).unwrap();
        thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| s.find_path("m", (0, 0), (31, 0)).unwrap()))
                .collect();
            for h in handles {
                assert_eq!(h.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn edits_interleave_with_queries() {
        let s = service();
        s.create_map("m", 16, 16).unwrap();
        thread::scope(|scope| {
            scope.spawn(|| {
                for x in 1..15 {
                    s.add_collision("m", (x, 8)).unwrap();
                    s.remove_collision("m", (x, 8)).unwrap();
                }
            });
            for _ in 0..16 {
                let path = s.find_path("m", (0, 0), (15, 15)).unwrap();
                assert_eq!(path.last(), Some(&Point::new(15, 15)));
            }
        });
    }
}
