//! Outline document rendered as a pannable, zoomable node-link map.

mod clipboard;
mod component;
mod render;
mod state;

pub use component::ThoughtMap;
pub use state::MapState;
