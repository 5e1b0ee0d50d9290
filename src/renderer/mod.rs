//! Rendering module
//!
//! Turns a `GameState` into a backend-neutral draw list. The host owns the
//! window and uploads the vertex buffers; nothing here touches a GPU.

pub mod frame;
pub mod shapes;
pub mod vertex;

pub use frame::{DrawPolygon, DrawText, Frame, build_frame};
pub use vertex::Vertex;
