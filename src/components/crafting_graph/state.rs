//! Canvas-side graph state and interaction tracking.
//!
//! Nodes live in a `force_graph` store as anchored nodes, so the simulation never moves
//! them away from their layout positions; only user drags do. The struct also carries
//! the pan/zoom transform and hover highlight state.

use std::collections::{HashMap, HashSet};

use force_graph::{DefaultNodeIdx, ForceGraph, NodeData, SimulationParameters};
use log::warn;

use super::scale::{ScaleConfig, ScaledValues};
use super::theme::{Color, Theme};
use super::types::CraftingGraph;
use crate::graph::NodeRole;
use crate::i18n::Translations;

/// Per-node display metadata attached to each node in the store.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub item_name: String,
	/// Translated label.
	pub label: String,
	pub color: Color,
	pub is_center: bool,
}

/// An edge resolved to store indices, ready to draw.
#[derive(Clone, Debug)]
pub struct EdgeInfo {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub color: Color,
	/// Upgrade level annotation, e.g. `"1 → 2"`.
	pub label: Option<String>,
	/// Signed curvature; 0 draws a straight line.
	pub bend: f64,
}

/// What a click landed on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeSelection {
	pub item_name: String,
	pub is_center: bool,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

/// Pointer movement (screen pixels) after which a press becomes a drag, not a click.
pub const CLICK_SLOP: f64 = 4.0;

/// Tracks a press on a node, which becomes either a click or a drag.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Hover highlight with a smoothed intensity.
///
/// The hovered node and its direct neighbours form the target set; `intensity` eases
/// towards 1 while something is hovered and back to 0 afterwards.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	pub hovered_node: Option<DefaultNodeIdx>,
	lit: HashSet<DefaultNodeIdx>,
	intensity: f64,
}

impl HighlightState {
	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>, edges: &[EdgeInfo]) {
		if self.hovered_node == node {
			return;
		}
		self.hovered_node = node;
		let Some(idx) = node else {
			// Keep `lit` so the fade-out still knows what to dim back.
			return;
		};
		self.lit.clear();
		self.lit.insert(idx);
		for edge in edges {
			if edge.source == idx {
				self.lit.insert(edge.target);
			} else if edge.target == idx {
				self.lit.insert(edge.source);
			}
		}
	}

	/// Exponential smoothing towards the target intensity.
	pub fn tick(&mut self, dt: f64) {
		const SPEED: f64 = 6.0;
		let target = if self.hovered_node.is_some() { 1.0 } else { 0.0 };
		self.intensity += (target - self.intensity) * (1.0 - (-SPEED * dt).exp());
		if self.intensity < 0.005 && target == 0.0 {
			self.intensity = 0.0;
			self.lit.clear();
		}
	}

	pub fn intensity(&self) -> f64 {
		self.intensity
	}

	pub fn is_lit(&self, idx: DefaultNodeIdx) -> bool {
		self.lit.contains(&idx)
	}

	pub fn is_edge_lit(&self, edge: &EdgeInfo) -> bool {
		self.hovered_node
			.is_some_and(|h| edge.source == h || edge.target == h)
			|| (self.hovered_node.is_none()
				&& self.is_lit(edge.source)
				&& self.is_lit(edge.target))
	}
}

/// Core canvas state: node store, edges, view transform and interaction tracking.
pub struct CraftingGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub edges: Vec<EdgeInfo>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub highlight: HighlightState,
	pub width: f64,
	pub height: f64,
}

/// Level annotation shown on upgrade-style edges.
fn level_label(input: Option<String>, output: Option<String>) -> Option<String> {
	match (input, output) {
		(None, None) => None,
		(Some(i), None) => Some(format!("{i} →")),
		(None, Some(o)) => Some(format!("→ {o}")),
		(Some(i), Some(o)) => Some(format!("{i} → {o}")),
	}
}

impl CraftingGraphState {
	pub fn new(
		data: &CraftingGraph,
		width: f64,
		height: f64,
		theme: &Theme,
		translations: &Translations,
	) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut id_to_idx = HashMap::new();

		for node in &data.elements.nodes {
			let Some(point) = data.positions.get(&node.id) else {
				warn!("crafting-graph: no position for node {}", node.id);
				continue;
			};
			let idx = graph.add_node(NodeData {
				x: point.x as f32,
				y: point.y as f32,
				mass: 10.0,
				is_anchor: true,
				user_data: NodeInfo {
					item_name: node.item_name.clone(),
					label: translations.item_name(&node.label).to_string(),
					color: theme.rarity_color(node.rarity),
					is_center: node.role == NodeRole::Center,
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		// Parallel edges (same unordered pair) fan out as curves.
		let mut pair_counts: HashMap<(String, String), usize> = HashMap::new();
		let pair_key = |a: &str, b: &str| {
			if a <= b {
				(a.to_string(), b.to_string())
			} else {
				(b.to_string(), a.to_string())
			}
		};
		for edge in &data.elements.edges {
			*pair_counts
				.entry(pair_key(edge.source.as_str(), edge.target.as_str()))
				.or_default() += 1;
		}

		let mut pair_seen: HashMap<(String, String), usize> = HashMap::new();
		let mut edges = Vec::with_capacity(data.elements.edges.len());
		for edge in &data.elements.edges {
			let (Some(&source), Some(&target)) =
				(id_to_idx.get(&edge.source), id_to_idx.get(&edge.target))
			else {
				continue;
			};
			let key = pair_key(edge.source.as_str(), edge.target.as_str());
			let count = pair_counts.get(&key).copied().unwrap_or(1);
			let seen = pair_seen.entry(key).or_default();
			let slot = *seen as f64 - (count as f64 - 1.0) / 2.0;
			*seen += 1;

			edges.push(EdgeInfo {
				source,
				target,
				color: theme.kind_color(edge.kind),
				label: level_label(
					edge.input_level.as_ref().map(ToString::to_string),
					edge.output_level.as_ref().map(ToString::to_string),
				),
				bend: slot * theme.edge.parallel_tension,
			});
		}

		Self {
			graph,
			edges,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			highlight: HighlightState::default(),
			width,
			height,
		}
	}

	/// Current world position of every node.
	pub fn node_positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut out = HashMap::new();
		self.graph.visit_nodes(|node| {
			out.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		out
	}

	/// Zooms and centers so every node is visible with `config.fit_padding` to spare.
	pub fn fit_to_view(&mut self, config: &ScaleConfig) {
		let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
		let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
		self.graph.visit_nodes(|node| {
			let r = config.node_radius
				* if node.data.user_data.is_center {
					config.center_factor
				} else {
					1.0
				};
			let (x, y) = (node.x() as f64, node.y() as f64);
			min_x = min_x.min(x - r);
			max_x = max_x.max(x + r);
			min_y = min_y.min(y - r);
			max_y = max_y.max(y + r);
		});
		if !min_x.is_finite() {
			return;
		}

		let avail_w = (self.width - 2.0 * config.fit_padding).max(1.0);
		let avail_h = (self.height - 2.0 * config.fit_padding).max(1.0);
		let k = (avail_w / (max_x - min_x).max(1.0))
			.min(avail_h / (max_y - min_y).max(1.0))
			.clamp(0.1, 1.5);
		let (cx, cy) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
		self.transform = ViewTransform {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		};
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(
		&self,
		sx: f64,
		sy: f64,
		config: &ScaleConfig,
	) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < scale.radius(node.data.user_data.is_center) {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn selection(&self, idx: DefaultNodeIdx) -> Option<NodeSelection> {
		let mut out = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				out = Some(NodeSelection {
					item_name: node.data.user_data.item_name.clone(),
					is_center: node.data.user_data.is_center,
				});
			}
		});
		out
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		self.highlight.set_hover(node, &self.edges);
	}

	pub fn tick(&mut self, dt: f64) {
		self.highlight.tick(dt);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::catalog::{Catalog, Item};
	use crate::graph::{LayoutConfig, build};

	fn graph_data() -> CraftingGraph {
		let catalog = Catalog::from_json(
			r#"[
				{ "name": "X", "infobox": { "rarity": "Epic" }, "edges": [
					{ "name": "Y", "relation": "craft_from" },
					{ "name": "Y", "relation": "repair_from" },
					{ "name": "Z", "relation": "upgrade_to", "input_level": 1, "output_level": 2 }
				] },
				{ "name": "Y" },
				{ "name": "Z" }
			]"#,
		)
		.unwrap();
		let x: &Item = catalog.get("X").unwrap();
		let elements = build(x, &catalog);
		let positions = elements.layout(&LayoutConfig::default()).unwrap();
		CraftingGraph {
			elements,
			positions,
		}
	}

	fn state() -> CraftingGraphState {
		let translations = Translations {
			items: [("Y".to_string(), "Igrek".to_string())].into_iter().collect(),
			..Translations::english()
		};
		CraftingGraphState::new(&graph_data(), 1200.0, 800.0, &Theme::default(), &translations)
	}

	#[test]
	fn nodes_keep_layout_positions_and_translated_labels() {
		let state = state();
		let mut labels = Vec::new();
		state.graph.visit_nodes(|node| {
			labels.push((
				node.data.user_data.label.clone(),
				node.x(),
				node.y(),
				node.data.user_data.is_center,
			));
		});
		labels.sort_by(|a, b| a.0.cmp(&b.0));
		assert_eq!(
			labels,
			vec![
				("Igrek".to_string(), -640.0, 0.0, false),
				("X".to_string(), 0.0, 0.0, true),
				("Z".to_string(), 640.0, 0.0, false),
			]
		);
	}

	#[test]
	fn parallel_edges_bend_apart() {
		let state = state();
		let bends: Vec<f64> = state.edges.iter().map(|e| e.bend).collect();
		assert_eq!(bends, vec![-0.3, 0.3, 0.0]);
		assert_eq!(state.edges[2].label.as_deref(), Some("1 → 2"));
	}

	#[test]
	fn fit_centers_graph_and_hit_tests_nodes() {
		let mut state = state();
		state.fit_to_view(&ScaleConfig::default());
		let k = state.transform.k;
		assert!(k > 0.1 && k < 1.5);
		assert!((state.transform.x - 600.0).abs() < 1e-9);
		assert!((state.transform.y - 400.0).abs() < 1e-9);

		let hit = state
			.node_at_position(600.0, 400.0, &ScaleConfig::default())
			.and_then(|idx| state.selection(idx));
		assert_eq!(
			hit,
			Some(NodeSelection {
				item_name: "X".into(),
				is_center: true
			})
		);
		assert_eq!(state.node_at_position(600.0, 20.0, &ScaleConfig::default()), None);
	}

	#[test]
	fn hover_lights_neighbours_and_fades() {
		let mut state = state();
		let center = state.node_at_position(600.0, 400.0, &ScaleConfig::default());
		state.set_hover(center);
		for _ in 0..120 {
			state.tick(0.016);
		}
		assert!(state.highlight.intensity() > 0.99);
		assert!(state.edges.iter().all(|e| state.highlight.is_edge_lit(e)));

		state.set_hover(None);
		for _ in 0..240 {
			state.tick(0.016);
		}
		assert_eq!(state.highlight.intensity(), 0.0);
	}
}
