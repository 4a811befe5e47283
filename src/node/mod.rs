//! Simulated host model consumed by the renderers.

pub mod types;

pub use types::{Interface, Node, NodeView};
