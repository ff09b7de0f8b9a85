//! Canvas rendering for the crafting graph.
//!
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Edges, then edge level labels (world space)
//! 3. Nodes, with highlighted nodes and the center drawn last

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::{CraftingGraphState, EdgeInfo, NodeInfo};
use super::theme::{Color, Theme};

fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Renders the complete graph to the canvas.
pub fn render(
	state: &CraftingGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, state.transform.k);
	let positions = state.node_positions();

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx, &scale, theme, &positions);
	draw_nodes(state, ctx, &scale, theme);

	ctx.restore();

	if theme.background.vignette > 0.0 {
		draw_vignette(state, ctx, theme);
	}
}

fn draw_background(state: &CraftingGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (cx, cy) = (state.width / 2.0, state.height / 2.0);
	match ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, state.width.max(state.height) * 0.8) {
		Ok(gradient) => {
			let _ = gradient.add_color_stop(0.0, &theme.background.color_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &theme.background.color.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		Err(_) => ctx.set_fill_style_str(&theme.background.color.to_css()),
	}
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_vignette(state: &CraftingGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (cx, cy) = (state.width / 2.0, state.height / 2.0);
	let Ok(gradient) = ctx.create_radial_gradient(
		cx,
		cy,
		state.width.min(state.height) * 0.3,
		cx,
		cy,
		state.width.max(state.height) * 0.7,
	) else {
		return;
	};

	let _ = gradient.add_color_stop(0.0, "rgba(0, 0, 0, 0)");
	let _ = gradient.add_color_stop(
		1.0,
		&Color::rgba(0, 0, 0, theme.background.vignette).to_css(),
	);

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_edges(
	state: &CraftingGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	positions: &HashMap<DefaultNodeIdx, (f64, f64)>,
) {
	let t = smooth_step(state.highlight.intensity());

	for edge in &state.edges {
		let (Some(&from), Some(&to)) = (positions.get(&edge.source), positions.get(&edge.target))
		else {
			continue;
		};
		let lit = state.highlight.is_edge_lit(edge);
		let alpha = if lit {
			theme.edge.alpha + (1.0 - theme.edge.alpha) * t
		} else {
			theme.edge.alpha * (1.0 - 0.7 * t)
		};
		let width = if lit {
			scale.edge_width * (1.0 + 0.6 * t)
		} else {
			scale.edge_width
		};
		draw_edge(state, ctx, scale, edge, from, to, alpha, width);
	}
}

/// Radius of the node at `idx`.
fn node_radius(state: &CraftingGraphState, scale: &ScaledValues, idx: DefaultNodeIdx) -> f64 {
	let mut is_center = false;
	state.graph.visit_nodes(|node| {
		if node.index() == idx {
			is_center = node.data.user_data.is_center;
		}
	});
	scale.radius(is_center)
}

#[allow(clippy::too_many_arguments)]
fn draw_edge(
	state: &CraftingGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	edge: &EdgeInfo,
	(x1, y1): (f64, f64),
	(x2, y2): (f64, f64),
	alpha: f64,
	width: f64,
) {
	let (dx, dy) = (x2 - x1, y2 - y1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}
	let (ux, uy) = (dx / dist, dy / dist);
	let r1 = node_radius(state, scale, edge.source);
	let r2 = node_radius(state, scale, edge.target);

	// Control point offset perpendicular to the edge.
	let curve = dist * edge.bend * 0.5;
	let (px, py) = (-uy * curve, ux * curve);
	let (mid_x, mid_y) = ((x1 + x2) / 2.0 + px, (y1 + y2) / 2.0 + py);

	// Trim both ends to the node rims, leaving room for the arrow head.
	let dir_to = |x: f64, y: f64, fx: f64, fy: f64| {
		let (vx, vy) = (x - fx, y - fy);
		let len = (vx * vx + vy * vy).sqrt().max(0.001);
		(vx / len, vy / len)
	};
	let (sx, sy) = dir_to(mid_x, mid_y, x1, y1);
	let (ex, ey) = dir_to(x2, y2, mid_x, mid_y);
	let (start_x, start_y) = (x1 + sx * r1, y1 + sy * r1);
	let (tip_x, tip_y) = (x2 - ex * r2, y2 - ey * r2);
	let (end_x, end_y) = (tip_x - ex * scale.arrow_size, tip_y - ey * scale.arrow_size);

	let color = edge.color.with_alpha(alpha);
	ctx.set_stroke_style_str(&color.to_css());
	ctx.set_line_width(width);
	ctx.begin_path();
	ctx.move_to(start_x, start_y);
	if edge.bend == 0.0 {
		ctx.line_to(end_x, end_y);
	} else {
		let _ = ctx.quadratic_curve_to(mid_x, mid_y, end_x, end_y);
	}
	ctx.stroke();

	let (nx, ny) = (-ey * scale.arrow_size * 0.5, ex * scale.arrow_size * 0.5);
	ctx.set_fill_style_str(&color.to_css());
	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(end_x + nx, end_y + ny);
	ctx.line_to(end_x - nx, end_y - ny);
	ctx.close_path();
	ctx.fill();

	if let Some(label) = &edge.label {
		if scale.label_alpha > 0.0 {
			// Quadratic midpoint sits halfway between chord midpoint and control point.
			let lx = (x1 + x2) / 2.0 + px / 2.0;
			let ly = (y1 + y2) / 2.0 + py / 2.0;
			ctx.set_fill_style_str(&edge.color.with_alpha(alpha * scale.label_alpha).to_css());
			ctx.set_font(&scale.label_font);
			ctx.set_text_align("center");
			let _ = ctx.fill_text(label, lx, ly - scale.ring_offset * 2.0);
		}
	}
}

fn draw_nodes(
	state: &CraftingGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let t = smooth_step(state.highlight.intensity());

	// Pass 1: nodes outside the highlight, dimmed while something is hovered.
	state.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		if state.highlight.is_lit(node.index()) || info.is_center {
			return;
		}
		let (x, y) = (node.x() as f64, node.y() as f64);
		draw_node(ctx, info, x, y, scale, theme, 1.0 - 0.6 * t, 1.0);
	});

	// Pass 2: highlighted nodes and the center on top.
	state.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		let idx = node.index();
		let lit = state.highlight.is_lit(idx);
		if !lit && !info.is_center {
			return;
		}
		let (x, y) = (node.x() as f64, node.y() as f64);
		let (alpha, grow) = if lit {
			(1.0, 1.0 + 0.08 * t)
		} else {
			(1.0 - 0.6 * t, 1.0)
		};
		draw_node(ctx, info, x, y, scale, theme, alpha, grow);

		if state.highlight.hovered_node == Some(idx) && t > 0.01 {
			let radius = scale.radius(info.is_center) * grow;
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + scale.ring_offset, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&Color::rgba(255, 255, 255, 0.8 * t).to_css());
			ctx.set_line_width(scale.ring_width);
			ctx.stroke();
		}
	});
}

#[allow(clippy::too_many_arguments)]
fn draw_node(
	ctx: &CanvasRenderingContext2d,
	info: &NodeInfo,
	x: f64,
	y: f64,
	scale: &ScaledValues,
	theme: &Theme,
	alpha: f64,
	grow: f64,
) {
	let radius = scale.radius(info.is_center) * grow;
	ctx.set_global_alpha(alpha);

	let gradient = ctx.create_radial_gradient(
		x - radius * 0.3,
		y - radius * 0.3,
		0.0,
		x,
		y,
		radius,
	);
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	match gradient {
		Ok(gradient) => {
			let _ = gradient.add_color_stop(0.0, &info.color.lighten(0.35).to_css());
			let _ = gradient.add_color_stop(0.7, &info.color.darken(0.35).to_css());
			let _ = gradient.add_color_stop(1.0, &info.color.darken(0.7).to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		Err(_) => ctx.set_fill_style_str(&info.color.to_css()),
	}
	ctx.fill();

	if theme.node.border_width > 0.0 {
		let border = if info.is_center {
			theme.node.center_border
		} else {
			info.color
		};
		ctx.set_stroke_style_str(&border.to_css());
		let width = theme.node.border_width / scale.k;
		ctx.set_line_width(if info.is_center { width * 2.0 } else { width });
		ctx.stroke();
	}

	if scale.label_alpha > 0.0 {
		ctx.set_global_alpha(alpha * scale.label_alpha);
		ctx.set_fill_style_str(&theme.node.label.to_css());
		ctx.set_font(&scale.label_font);
		ctx.set_text_align("center");
		let _ = ctx.fill_text(&info.label, x, y + radius + scale.ring_offset * 6.0);
	}
	ctx.set_global_alpha(1.0);
}
