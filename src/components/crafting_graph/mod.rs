//! Crafting graph visualization component.
//!
//! Renders the graph around one focal item on an HTML canvas with:
//! - Nodes pinned at the two-column layout positions
//! - Edges colored by relation kind, parallel relations fanned out as curves
//! - Pan, zoom, node dragging and click-to-select
//! - Smooth highlight transitions on hover
//!
//! # Example
//!
//! ```ignore
//! use crafting_graph::{Catalog, CraftingGraph, CraftingGraphCanvas, LayoutConfig, build};
//!
//! let item = catalog.get("Power Rod").unwrap();
//! let elements = build(item, &catalog);
//! let positions = elements.layout(&LayoutConfig::default())?;
//! let data = CraftingGraph { elements, positions };
//!
//! view! { <CraftingGraphCanvas data=data fullscreen=true /> }
//! ```

mod component;
mod render;
pub mod scale;
mod state;
pub mod theme;
mod types;

pub use component::CraftingGraphCanvas;
pub use scale::ScaleConfig;
pub use state::NodeSelection;
pub use theme::Theme;
pub use types::CraftingGraph;
