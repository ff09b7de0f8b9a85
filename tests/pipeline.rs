//! Dataset fixture through load, verification, element construction and layout.

#![allow(unused_crate_dependencies)]

use crafting_graph::catalog::verify::EdgeIssue;
use crafting_graph::{
	Catalog, CraftingGraph, Direction, LayoutConfig, NodeId, NodeRole, RelationKind, verify,
};

const FIXTURE: &str = include_str!("fixtures/items_relation.json");

fn catalog() -> Catalog {
	Catalog::from_json(FIXTURE).expect("fixture parses")
}

fn power_rod() -> CraftingGraph {
	CraftingGraph::for_item(&catalog(), "Power Rod", &LayoutConfig::default())
		.expect("layout succeeds")
		.expect("item exists")
}

#[test]
fn fixture_verifies_except_for_the_dangling_ingredient() {
	let report = verify(&catalog());

	assert_eq!(report.total_nodes, 6);
	assert_eq!(report.nodes_with_edges, 5);
	assert_eq!(report.nodes_without_edges(), 1);
	assert_eq!(report.total_edges, 11);
	assert!(report.missing_fields.is_empty());
	assert_eq!(
		report.edge_issues,
		vec![EdgeIssue::MissingReverse {
			source: "Power Rod".into(),
			target: "Mystery Alloy".into(),
			relation: "craft_from".into(),
			expected: "craft_to",
		}]
	);
	assert!(!report.passed());
	assert_eq!(report.node_types.get("trader"), Some(&1));
}

#[test]
fn power_rod_graph_groups_relations_by_side() {
	let graph = power_rod();
	let elements = &graph.elements;

	let names: Vec<&str> = elements.nodes.iter().map(|n| n.id.as_str()).collect();
	assert_eq!(
		names,
		["Power Rod", "Copper Wire", "Battery", "Advanced Power Rod", "Celeste"]
	);
	assert_eq!(elements.center().map(|c| c.role), Some(NodeRole::Center));

	let edges: Vec<(&str, RelationKind, Direction)> = elements
		.edges
		.iter()
		.map(|e| (e.id.as_str(), e.kind, e.direction))
		.collect();
	assert_eq!(
		edges,
		[
			("craft:Copper Wire", RelationKind::Craft, Direction::Inbound),
			("craft:Battery", RelationKind::Craft, Direction::Inbound),
			("upgrade:Advanced Power Rod", RelationKind::Upgrade, Direction::Outbound),
			("recycle:Copper Wire", RelationKind::Recycle, Direction::Outbound),
			("trade:Celeste", RelationKind::Trade, Direction::Inbound),
		]
	);

	let left: Vec<(RelationKind, usize)> = elements
		.left
		.iter()
		.map(|c| (c.kind, c.members.len()))
		.collect();
	assert_eq!(left, [(RelationKind::Craft, 2), (RelationKind::Trade, 1)]);
	let right: Vec<(RelationKind, usize)> = elements
		.right
		.iter()
		.map(|c| (c.kind, c.members.len()))
		.collect();
	assert_eq!(right, [(RelationKind::Upgrade, 1)]);
}

#[test]
fn power_rod_positions_form_two_centered_columns() {
	let graph = power_rod();
	let at = |name: &str| {
		let p = graph.positions[&NodeId::new(name)];
		(p.x, p.y)
	};

	assert_eq!(graph.positions.len(), graph.elements.nodes.len());
	assert_eq!(at("Power Rod"), (0.0, 0.0));
	assert_eq!(at("Copper Wire"), (-640.0, -245.0));
	assert_eq!(at("Battery"), (-640.0, -55.0));
	assert_eq!(at("Celeste"), (-640.0, 245.0));
	assert_eq!(at("Advanced Power Rod"), (640.0, 0.0));
}

#[test]
fn unknown_and_isolated_items() {
	let catalog = catalog();
	let config = LayoutConfig::default();

	assert_eq!(
		CraftingGraph::for_item(&catalog, "Mystery Alloy", &config).unwrap(),
		None
	);

	let gear = CraftingGraph::for_item(&catalog, "Rusted Gear", &config)
		.unwrap()
		.unwrap();
	assert_eq!(gear.elements.nodes.len(), 1);
	assert!(gear.elements.edges.is_empty());
	assert!(gear.elements.left.is_empty() && gear.elements.right.is_empty());
	assert_eq!(gear.positions.len(), 1);
}

#[test]
fn graph_description_serializes_for_other_renderers() {
	let graph = power_rod();
	let json = serde_json::to_value(&graph.elements).unwrap();

	assert_eq!(json["nodes"][0]["role"], "center");
	assert_eq!(json["edges"][0]["kind"], "craft");
	assert_eq!(json["edges"][0]["source"], "Copper Wire");
	assert_eq!(json["edges"][2]["input_level"], 1);
	assert_eq!(json["left"][1]["kind"], "trade");
}
