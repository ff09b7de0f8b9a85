//! Fixed two-column placement around the center node.
//!
//! The center sits at the origin. Left and right columns stand a constant distance to
//! either side, so larger graphs grow taller rather than wider. Within a column,
//! members of one relation kind are `row_spacing` apart and consecutive kinds are
//! separated by the wider `cluster_spacing`. Each column is shifted so its vertical
//! midpoint lines up with the center.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use super::{GraphNode, GroupCluster, NodeId, NodeRole};

/// A 2D position in graph (world) units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Node id to coordinate, one entry per node.
pub type LayoutPositions = BTreeMap<NodeId, Point>;

/// Geometry of the layout template.
#[derive(Clone, Debug)]
pub struct LayoutConfig {
	/// Position of the center node.
	pub center: Point,
	/// Horizontal distance from the center to each column.
	pub column_offset: f64,
	/// Vertical distance between neighbours of the same kind.
	pub row_spacing: f64,
	/// Vertical distance between the last node of one kind and the first of the next.
	pub cluster_spacing: f64,
	/// Rendered node size; spacing below this would overlap.
	pub node_diameter: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			center: Point::new(0.0, 0.0),
			column_offset: 640.0,
			row_spacing: 190.0,
			cluster_spacing: 300.0,
			node_diameter: 160.0,
		}
	}
}

/// The node set and the grouping lists disagree, or the template cannot be laid out.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
	#[error("graph has no center node")]
	MissingCenter,
	#[error("graph has {0} center nodes")]
	MultipleCenters(usize),
	#[error("node {0} appears more than once")]
	DuplicateNode(NodeId),
	#[error("grouped node {0} is not in the element set")]
	UnknownGroupMember(NodeId),
	#[error("node {0} is grouped more than once")]
	DuplicateGroupMember(NodeId),
	#[error("center node {0} must not be grouped")]
	GroupedCenter(NodeId),
	#[error("related node {0} is in neither group")]
	Ungrouped(NodeId),
	#[error("row spacing {row} and cluster spacing {cluster} must be at least the node diameter {diameter}")]
	Spacing { row: f64, cluster: f64, diameter: f64 },
}

fn check_config(config: &LayoutConfig) -> Result<(), LayoutError> {
	let ok = config.row_spacing >= config.node_diameter
		&& config.cluster_spacing >= config.row_spacing;
	if ok {
		Ok(())
	} else {
		Err(LayoutError::Spacing {
			row: config.row_spacing,
			cluster: config.cluster_spacing,
			diameter: config.node_diameter,
		})
	}
}

/// Places one column of clusters at `x`, vertically centered on `center_y`.
fn place_column(
	clusters: &[GroupCluster],
	x: f64,
	center_y: f64,
	config: &LayoutConfig,
	out: &mut LayoutPositions,
) {
	let mut offsets: Vec<(&NodeId, f64)> = Vec::new();
	let mut cursor: Option<f64> = None;

	for cluster in clusters {
		for (i, id) in cluster.members.iter().enumerate() {
			let y = match cursor {
				None => 0.0,
				Some(prev) if i == 0 => prev + config.cluster_spacing,
				Some(prev) => prev + config.row_spacing,
			};
			offsets.push((id, y));
			cursor = Some(y);
		}
	}

	let height = cursor.unwrap_or(0.0);
	let top = center_y - height / 2.0;
	for (id, y) in offsets {
		out.insert(id.clone(), Point::new(x, top + y));
	}
}

/// Computes a coordinate for every node.
///
/// Fails fast when `nodes` and the grouping lists are not consistent, since that means
/// element construction is broken and a partial layout would hide it.
pub fn position(
	nodes: &[GraphNode],
	left: &[GroupCluster],
	right: &[GroupCluster],
	config: &LayoutConfig,
) -> Result<LayoutPositions, LayoutError> {
	check_config(config)?;

	let mut ids: HashSet<&NodeId> = HashSet::with_capacity(nodes.len());
	let mut center = None;
	let mut centers = 0;
	for node in nodes {
		if !ids.insert(&node.id) {
			return Err(LayoutError::DuplicateNode(node.id.clone()));
		}
		if node.role == NodeRole::Center {
			centers += 1;
			center = Some(&node.id);
		}
	}
	let center = match (center, centers) {
		(Some(id), 1) => id,
		(None, _) => return Err(LayoutError::MissingCenter),
		(Some(_), n) => return Err(LayoutError::MultipleCenters(n)),
	};

	let mut grouped: HashSet<&NodeId> = HashSet::new();
	for id in left.iter().chain(right).flat_map(|c| &c.members) {
		if id == center {
			return Err(LayoutError::GroupedCenter(id.clone()));
		}
		if !ids.contains(id) {
			return Err(LayoutError::UnknownGroupMember(id.clone()));
		}
		if !grouped.insert(id) {
			return Err(LayoutError::DuplicateGroupMember(id.clone()));
		}
	}
	if let Some(node) = nodes
		.iter()
		.find(|n| n.role == NodeRole::Related && !grouped.contains(&n.id))
	{
		return Err(LayoutError::Ungrouped(node.id.clone()));
	}

	let origin = config.center;
	let mut positions = LayoutPositions::new();
	positions.insert(center.clone(), origin);
	place_column(left, origin.x - config.column_offset, origin.y, config, &mut positions);
	place_column(right, origin.x + config.column_offset, origin.y, config, &mut positions);

	Ok(positions)
}
