use std::collections::{HashMap, HashSet};

use log::debug;

use super::policy::{Side, side_for};
use super::{GraphEdge, GraphElements, GraphNode, GroupCluster, NodeId, NodeRole};
use crate::catalog::{Catalog, Direction, Item, RelationKind};

fn node_for(item: &Item, role: NodeRole) -> GraphNode {
	GraphNode {
		id: NodeId::new(item.name.as_str()),
		role,
		label: item.name.clone(),
		item_name: item.name.clone(),
		rarity: item.rarity(),
		thumb: item.thumb().map(str::to_string),
	}
}

/// Appends `id` to the `kind` cluster of `column`. Kinds arrive in priority order, so
/// only the last cluster can match.
fn push_member(column: &mut Vec<GroupCluster>, kind: RelationKind, id: NodeId) {
	match column.last_mut() {
		Some(cluster) if cluster.kind == kind => cluster.members.push(id),
		_ => column.push(GroupCluster {
			kind,
			members: vec![id],
		}),
	}
}

/// Builds the crafting graph around `center`.
///
/// Relations are walked by kind priority, then inbound before outbound, then in data
/// order. Names missing from `lookup` and references back to `center` itself are
/// dropped. Each related item yields one node and one edge per relation kind; it joins
/// the column of the first relation that reached it.
pub fn build(center: &Item, lookup: &Catalog) -> GraphElements {
	let mut elements = GraphElements {
		nodes: vec![node_for(center, NodeRole::Center)],
		edges: Vec::new(),
		left: Vec::new(),
		right: Vec::new(),
	};
	let center_id = NodeId::new(center.name.as_str());

	let mut nodes: HashSet<&str> = HashSet::new();
	let mut edges: HashSet<(RelationKind, &str)> = HashSet::new();
	let mut placed: HashMap<&str, Side> = HashMap::new();

	for edge in &center.edges {
		if !edge.is_complete() {
			debug!(
				"crafting-graph: {:?} lists an edge without name or relation",
				center.name
			);
		} else if edge.parsed().is_none() {
			debug!(
				"crafting-graph: {:?} lists unknown relation {:?}",
				center.name, edge.relation
			);
		}
	}

	for kind in RelationKind::ALL {
		for direction in Direction::ALL {
			let side = side_for(kind, direction);
			let relations = center
				.edges
				.iter()
				.filter(|e| e.parsed() == Some((kind, direction)));

			for relation in relations {
				let name = relation.name.as_str();
				if name.is_empty() || name == center.name {
					continue;
				}
				let Some(related) = lookup.get(name) else {
					debug!(
						"crafting-graph: dropping {kind} relation {:?} -> {name:?}, not in catalog",
						center.name
					);
					continue;
				};

				let related_id = NodeId::new(name);
				if nodes.insert(name) {
					elements.nodes.push(node_for(related, NodeRole::Related));
				}

				if edges.insert((kind, name)) {
					let (source, target) = match direction {
						Direction::Inbound => (related_id.clone(), center_id.clone()),
						Direction::Outbound => (center_id.clone(), related_id.clone()),
					};
					elements.edges.push(GraphEdge {
						id: format!("{kind}:{name}"),
						source,
						target,
						kind,
						direction,
						input_level: relation.input_level.clone(),
						output_level: relation.output_level.clone(),
					});
				}

				if !placed.contains_key(name) {
					placed.insert(name, side);
					let column = match side {
						Side::Left => &mut elements.left,
						Side::Right => &mut elements.right,
					};
					push_member(column, kind, related_id);
				}
			}
		}
	}

	elements
}
