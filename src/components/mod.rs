//! Interactive components.

pub mod thought_map;
