//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - RNG passed in by the caller
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod entity;
pub mod polygon;
pub mod shape;
pub mod state;
pub mod tick;

pub use collision::collides;
pub use entity::{AsteroidSize, AsteroidState, Bounds, Entity, EntityKind, Rgba};
pub use polygon::Polygon;
pub use shape::{ShapeError, generate_polygon};
pub use state::{GameEvent, GamePhase, GameState, InputEvent, Key};
pub use tick::{TickInput, tick};
