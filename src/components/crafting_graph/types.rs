//! Input to the crafting graph canvas.

use log::info;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::graph::{GraphElements, LayoutConfig, LayoutPositions, build};

/// Built elements together with their layout.
#[derive(Clone, Debug, PartialEq)]
pub struct CraftingGraph {
	pub elements: GraphElements,
	pub positions: LayoutPositions,
}

impl CraftingGraph {
	/// Builds and positions the graph around `name`.
	///
	/// Returns `Ok(None)` when the catalog has no such item; a layout failure is an
	/// `Err` and never yields a partial graph.
	pub fn for_item(catalog: &Catalog, name: &str, config: &LayoutConfig) -> Result<Option<Self>> {
		let Some(item) = catalog.get(name) else {
			return Ok(None);
		};
		let elements = build(item, catalog);
		let positions = elements.layout(config)?;
		info!(
			"crafting-graph: {name}: {} nodes, {} edges ({} left, {} right clusters)",
			elements.nodes.len(),
			elements.edges.len(),
			elements.left.len(),
			elements.right.len()
		);
		Ok(Some(Self {
			elements,
			positions,
		}))
	}
}
