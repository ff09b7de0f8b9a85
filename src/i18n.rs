//! Translation tables for UI strings and item names.
//!
//! Graph elements always carry base (English) item names; labels are translated only
//! when the renderer builds its display metadata.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Built-in English strings, used when the active table lacks a key.
const ENGLISH: &[(&str, &str)] = &[
	("graph.craft", "Craft"),
	("graph.repair", "Repair"),
	("graph.upgrade", "Upgrade"),
	("graph.recycle", "Recycle"),
	("graph.salvage", "Salvage"),
	("graph.trade", "Trade"),
	("graph.legend", "Relations"),
	("graph.search", "Jump to item..."),
	("graph.notFound", "Item not found"),
	("graph.notFoundDetail", "could not be found in the database"),
	("graph.goTo", "Go to"),
	("graph.layoutError", "The crafting graph could not be laid out"),
	("grid.search", "Search items..."),
	("grid.sortBy", "Sort by"),
	("grid.sortName", "Name"),
	("grid.sortRarity", "Rarity"),
	("grid.sortSellPrice", "Sell Price"),
	("grid.sortWeight", "Weight"),
	("grid.ascending", "Ascending"),
	("grid.descending", "Descending"),
	("grid.filterByType", "Filter by type"),
	("grid.selectAll", "Select all"),
	("grid.clearAll", "Clear all"),
	("grid.itemFound", "item found"),
	("grid.itemsFound", "items found"),
	("grid.noResults", "No items found"),
	("grid.noResultsHint", "Try adjusting your search query"),
	("nav.items", "Item Database"),
	("nav.graph", "Crafting Graph"),
	("help.clickNodesToNavigate", "Click a node to open its graph. Scroll to zoom, drag to pan."),
	("item.type", "Type"),
	("item.weight", "Weight"),
	("item.sellPrice", "Sell price"),
	("item.stackSize", "Stack size"),
	("item.damage", "Damage"),
	("item.sources", "Sources"),
	("item.wiki", "View on wiki"),
	("buttons.close", "Close"),
];

/// Active locale tables.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Translations {
	#[serde(default = "default_locale")]
	pub locale: String,
	/// UI string table, key to text.
	#[serde(default)]
	pub ui: HashMap<String, String>,
	/// Item name table, base name to translated name.
	#[serde(default)]
	pub items: HashMap<String, String>,
}

fn default_locale() -> String {
	"en".to_string()
}

impl Translations {
	/// English with no overrides.
	pub fn english() -> Self {
		Self {
			locale: default_locale(),
			..Self::default()
		}
	}

	pub fn from_json(json: &str) -> Result<Self> {
		serde_json::from_str(json).map_err(|source| Error::Json {
			what: "translations",
			source,
		})
	}

	/// UI string for `key`: active table, then English, then the key itself.
	pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
		self.ui
			.get(key)
			.map(String::as_str)
			.or_else(|| ENGLISH.iter().find(|(k, _)| *k == key).map(|(_, v)| *v))
			.unwrap_or(key)
	}

	/// Translated item name, or `base` when there is no entry.
	pub fn item_name<'a>(&'a self, base: &'a str) -> &'a str {
		self.items.get(base).map(String::as_str).unwrap_or(base)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lookups_fall_back_to_english_then_key() {
		let fr = Translations::from_json(
			r#"{ "locale": "fr", "ui": { "graph.craft": "Fabrication" }, "items": { "Power Rod": "Barre d'énergie" } }"#,
		)
		.unwrap();

		assert_eq!(fr.locale, "fr");
		assert_eq!(fr.t("graph.craft"), "Fabrication");
		assert_eq!(fr.t("graph.repair"), "Repair");
		assert_eq!(fr.t("graph.unknown"), "graph.unknown");
		assert_eq!(fr.item_name("Power Rod"), "Barre d'énergie");
		assert_eq!(fr.item_name("Copper Wire"), "Copper Wire");
	}

	#[test]
	fn empty_payload_is_english() {
		let t = Translations::from_json("{}").unwrap();
		assert_eq!(t.locale, "en");
		assert_eq!(t.t("graph.trade"), "Trade");
		assert_eq!(Translations::english().locale, "en");
	}
}
