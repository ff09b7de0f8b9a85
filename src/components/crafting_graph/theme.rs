//! Visual theming for the crafting graph.
//!
//! Node fill comes from item rarity, edge stroke from relation kind.

use crate::catalog::{Rarity, RelationKind};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Outer background color
	pub color: Color,
	/// Inner color of the radial gradient
	pub color_secondary: Color,
	/// Vignette intensity (0.0 = none, 1.0 = strong)
	pub vignette: f64,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Resting opacity of edges
	pub alpha: f64,
	/// Curve tension for parallel edges between the same pair
	pub parallel_tension: f64,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Border/stroke width in screen pixels (0 = no border)
	pub border_width: f64,
	/// Border color of the focal item
	pub center_border: Color,
	/// Label color
	pub label: Color,
}

/// Node fill per item rarity.
#[derive(Clone, Debug)]
pub struct RarityPalette {
	pub common: Color,
	pub uncommon: Color,
	pub rare: Color,
	pub epic: Color,
	pub legendary: Color,
}

/// Edge stroke per relation kind.
#[derive(Clone, Debug)]
pub struct KindPalette {
	pub craft: Color,
	pub repair: Color,
	pub upgrade: Color,
	pub recycle: Color,
	pub salvage: Color,
	pub trade: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: BackgroundStyle,
	pub edge: EdgeStyle,
	pub node: NodeStyle,
	pub rarity: RarityPalette,
	pub kinds: KindPalette,
}

impl Theme {
	/// Deep violet night theme.
	pub fn default_theme() -> Self {
		Self {
			background: BackgroundStyle {
				color: Color::rgb(7, 2, 11),
				color_secondary: Color::rgb(20, 12, 32),
				vignette: 0.2,
			},
			edge: EdgeStyle {
				alpha: 0.75,
				parallel_tension: 0.6,
			},
			node: NodeStyle {
				border_width: 1.5,
				center_border: Color::rgb(196, 181, 253),
				label: Color::rgb(243, 244, 246),
			},
			rarity: RarityPalette {
				common: Color::rgb(0x71, 0x74, 0x71),
				uncommon: Color::rgb(0x41, 0xeb, 0x6a),
				rare: Color::rgb(0x1e, 0xcb, 0xfc),
				epic: Color::rgb(0xd8, 0x29, 0x9b),
				legendary: Color::rgb(0xfb, 0xc7, 0x00),
			},
			kinds: KindPalette {
				craft: Color::rgb(0x60, 0xa5, 0xfa),
				repair: Color::rgb(0xef, 0x44, 0x44),
				upgrade: Color::rgb(0xec, 0x48, 0x99),
				recycle: Color::rgb(0x34, 0xd3, 0x99),
				salvage: Color::rgb(0x10, 0xb9, 0x81),
				trade: Color::rgb(0xfb, 0xbf, 0x24),
			},
		}
	}

	/// Fill for an item of the given rarity. Unknown rarity renders as Common.
	pub fn rarity_color(&self, rarity: Option<Rarity>) -> Color {
		let p = &self.rarity;
		match rarity.unwrap_or(Rarity::Common) {
			Rarity::Common => p.common,
			Rarity::Uncommon => p.uncommon,
			Rarity::Rare => p.rare,
			Rarity::Epic => p.epic,
			Rarity::Legendary => p.legendary,
		}
	}

	/// Stroke for a relation kind.
	pub fn kind_color(&self, kind: RelationKind) -> Color {
		let p = &self.kinds;
		match kind {
			RelationKind::Craft => p.craft,
			RelationKind::Repair => p.repair,
			RelationKind::Upgrade => p.upgrade,
			RelationKind::Recycle => p.recycle,
			RelationKind::Salvage => p.salvage,
			RelationKind::Trade => p.trade,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_output_drops_alpha_when_opaque() {
		assert_eq!(Color::rgb(7, 2, 11).to_css(), "#07020b");
		assert_eq!(
			Color::rgb(7, 2, 11).with_alpha(0.5).to_css(),
			"rgba(7, 2, 11, 0.5)"
		);
	}

	#[test]
	fn missing_rarity_uses_common_color() {
		let theme = Theme::default();
		assert_eq!(
			theme.rarity_color(None),
			theme.rarity_color(Some(Rarity::Common))
		);
		assert_eq!(theme.rarity_color(Some(Rarity::Legendary)).to_css(), "#fbc700");
		assert_eq!(theme.kind_color(RelationKind::Trade).to_css(), "#fbbf24");
	}

	#[test]
	fn palettes_come_from_theme_data() {
		let mut theme = Theme::default();
		theme.rarity.epic = Color::rgb(1, 2, 3);
		theme.kinds.repair = Color::rgb(4, 5, 6);
		assert_eq!(theme.rarity_color(Some(Rarity::Epic)), Color::rgb(1, 2, 3));
		assert_eq!(theme.kind_color(RelationKind::Repair), Color::rgb(4, 5, 6));
		assert_eq!(theme.kind_color(RelationKind::Craft).to_css(), "#60a5fa");
	}
}
