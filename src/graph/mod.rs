//! Crafting graph description: nodes, edges and column grouping around a focal item.
//!
//! [`build`] turns a focal item and the catalog into [`GraphElements`]; [`position`]
//! places those elements on a fixed two-column template. Neither touches pixels: the
//! output is a declarative description any renderer can draw.

use std::fmt;

use serde::Serialize;

use crate::catalog::{Direction, Level, Rarity, RelationKind};

mod builder;
mod layout;
mod policy;

pub use builder::build;
pub use layout::{LayoutConfig, LayoutError, LayoutPositions, Point, position};
pub use policy::{Side, side_for};

/// Node identifier, derived from the item name.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
	pub fn new(name: impl Into<String>) -> Self {
		Self(name.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Whether a node is the focal item or one of its relations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
	Center,
	Related,
}

/// A node of the crafting graph.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphNode {
	pub id: NodeId,
	pub role: NodeRole,
	/// Untranslated display label.
	pub label: String,
	/// Catalog name to navigate to.
	pub item_name: String,
	pub rarity: Option<Rarity>,
	pub thumb: Option<String>,
}

/// A typed relation between the center and a related node.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphEdge {
	pub id: String,
	pub source: NodeId,
	pub target: NodeId,
	pub kind: RelationKind,
	pub direction: Direction,
	pub input_level: Option<Level>,
	pub output_level: Option<Level>,
}

impl GraphEdge {
	/// The non-center endpoint.
	pub fn related(&self) -> &NodeId {
		match self.direction {
			Direction::Inbound => &self.source,
			Direction::Outbound => &self.target,
		}
	}
}

/// Same-kind run of nodes within one column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupCluster {
	pub kind: RelationKind,
	pub members: Vec<NodeId>,
}

/// Everything the renderer needs except coordinates.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphElements {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
	pub left: Vec<GroupCluster>,
	pub right: Vec<GroupCluster>,
}

impl GraphElements {
	pub fn center(&self) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.role == NodeRole::Center)
	}

	pub fn node(&self, id: &NodeId) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| &n.id == id)
	}

	/// Column clusters for `side`.
	pub fn group(&self, side: Side) -> &[GroupCluster] {
		match side {
			Side::Left => &self.left,
			Side::Right => &self.right,
		}
	}

	/// Positions these elements with [`position`].
	pub fn layout(&self, config: &LayoutConfig) -> Result<LayoutPositions, LayoutError> {
		position(&self.nodes, &self.left, &self.right, config)
	}
}
