//! Zoom-dependent scaling configuration for graph visuals.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: layout coordinates. Values in world-space scale with zoom.
//! - **Screen-space**: canvas pixels. Values in screen-space stay constant.
//!
//! Node discs are world-sized so they match the layout spacing; strokes and text are
//! kept readable through [`ScaleBehavior::Screen`] and [`ScaleBehavior::Clamped`].

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// Compute the world-space value for a given base value and zoom level.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Alpha that fades labels out when zoomed far away.
#[derive(Clone, Debug)]
pub struct LabelFade {
	/// Zoom at which labels disappear.
	pub zero_alpha_k: f64,
	/// Zoom at which labels are fully opaque.
	pub full_alpha_k: f64,
}

impl LabelFade {
	pub fn apply(&self, k: f64) -> f64 {
		if self.zero_alpha_k >= self.full_alpha_k {
			return 1.0;
		}
		((k - self.zero_alpha_k) / (self.full_alpha_k - self.zero_alpha_k)).clamp(0.0, 1.0)
	}
}

/// Complete scale configuration for all graph elements.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Related node radius in world units. Must stay under half the layout row spacing.
	pub node_radius: f64,
	/// Center node radius relative to related nodes.
	pub center_factor: f64,
	pub radius_behavior: ScaleBehavior,
	/// Label font size in world units.
	pub label_size: f64,
	pub label_behavior: ScaleBehavior,
	pub label_fade: LabelFade,
	/// Edge stroke width in screen pixels.
	pub edge_width: f64,
	/// Arrow head length in world units.
	pub arrow_size: f64,
	pub arrow_behavior: ScaleBehavior,
	/// Hover ring stroke in screen pixels.
	pub ring_width: f64,
	/// Gap between node edge and hover ring in screen pixels.
	pub ring_offset: f64,
	/// Padding kept around the graph when fitting it to the canvas, in pixels.
	pub fit_padding: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node_radius: 70.0,
			center_factor: 1.5,
			radius_behavior: ScaleBehavior::World,
			label_size: 22.0,
			label_behavior: ScaleBehavior::Clamped {
				min_screen: 9.0,
				max_screen: 18.0,
			},
			label_fade: LabelFade {
				zero_alpha_k: 0.08,
				full_alpha_k: 0.2,
			},
			edge_width: 2.0,
			arrow_size: 22.0,
			arrow_behavior: ScaleBehavior::Clamped {
				min_screen: 5.0,
				max_screen: 16.0,
			},
			ring_width: 2.0,
			ring_offset: 4.0,
			fit_padding: 120.0,
		}
	}
}

/// Pre-computed scale values for a specific zoom level.
///
/// Create this once per frame and pass it to rendering functions.
/// All sizes are in world-space (ready to use after canvas transform).
#[derive(Clone, Debug)]
pub struct ScaledValues {
	pub k: f64,
	pub node_radius: f64,
	pub center_radius: f64,
	/// Label font string (e.g., "600 14px sans-serif").
	pub label_font: String,
	pub label_alpha: f64,
	pub edge_width: f64,
	pub arrow_size: f64,
	pub ring_width: f64,
	pub ring_offset: f64,
}

impl ScaledValues {
	/// Compute scaled values from configuration and current zoom level.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let node_radius = config.radius_behavior.apply(config.node_radius, k);
		let label_size = config.label_behavior.apply(config.label_size, k);

		Self {
			k,
			node_radius,
			center_radius: node_radius * config.center_factor,
			label_font: format!("600 {label_size}px sans-serif"),
			label_alpha: config.label_fade.apply(k),
			edge_width: config.edge_width / k,
			arrow_size: config.arrow_behavior.apply(config.arrow_size, k),
			ring_width: config.ring_width / k,
			ring_offset: config.ring_offset / k,
		}
	}

	/// Hit/draw radius for a node.
	pub fn radius(&self, is_center: bool) -> f64 {
		if is_center {
			self.center_radius
		} else {
			self.node_radius
		}
	}
}
