//! Browser-independent core of the thought map: document projection, link
//! derivation, geometry cache, viewport math, interaction state machines and
//! connector routing.

pub mod config;
pub mod document;
pub mod geometry;
pub mod interaction;
pub mod links;
pub mod parser;
pub mod router;
pub mod stamp;
pub mod viewport;

pub use config::{ConfigError, EngineConfig, LayoutConfig, RoutingConfig, ViewportConfig};
pub use document::{DocNode, DocumentError, SourceDocument};
pub use geometry::{GeometryTracker, NodeSize};
pub use interaction::{ContextMenu, Emphasis, FocusChange, InteractionController};
pub use links::{StructuralEdge, ThematicLink, derive_links, structural_edges};
pub use parser::{NodeId, Position, ThoughtNode, parse};
pub use router::{ConnectorKind, ConnectorPath, RouteInput, route};
pub use stamp::stamp_links;
pub use viewport::{ViewportController, ViewportTransform, ZoomDirection};
