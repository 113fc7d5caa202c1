//! Named grid maps and the path query facade.
//!
//! - [`GridMap`]: a width × height field of [`Tile`]s.
//! - [`MapRegistry`]: every map, behind one reader/writer lock.
//! - [`MapService`]: the only component that takes that lock. Path queries
//!   hold it shared for the whole search, edits hold it exclusively.
//! - [`snapshot`] and [`bitmap`]: persistence and image collaborators.
//!
//! ```
//! use std::sync::Arc;
//! use gridway_core::Point;
//! use gridway_maps::{MapRegistry, MapService};
//!
//! let service = MapService::with_registry(Arc::new(MapRegistry::new()));
//! service.create_map("town", 3, 3).unwrap();
//! service.add_collision("town", (1, 1)).unwrap();
//! let path = service.find_path("town", (0, 0), (2, 2)).unwrap();
//! assert_eq!(path.last(), Some(&Point::new(2, 2)));
//! assert!(!path.contains(&Point::new(1, 1)));
//! ```

pub mod bitmap;
pub mod config;
pub mod error;
pub mod format;
pub mod map;
pub mod registry;
pub mod service;
pub mod snapshot;

pub use bitmap::Palette;
pub use config::ServiceConfig;
pub use error::{Error, ErrorKind, Result};
pub use format::{PathFormat, format_path};
pub use map::{GridMap, Tile};
pub use registry::{MapRegistry, MapTable};
pub use service::MapService;
