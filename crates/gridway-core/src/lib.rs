//! **gridway-core** — shared value types for the gridway pathfinding service.
//!
//! This crate provides the foundational types used across the *gridway*
//! workspace: integer grid geometry and the packed RGB colour used by map
//! rendering and configuration.

pub mod color;
pub mod geom;

pub use color::Color;
pub use geom::{Point, Range, RangeIter};
