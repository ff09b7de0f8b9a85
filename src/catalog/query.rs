//! Search, type filtering and sorting over the catalog, as used by the item grid and the
//! graph's search box.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::{Catalog, Item, Rarity};

/// Sort key for item listings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortField {
	#[default]
	Name,
	Rarity,
	SellPrice,
	Weight,
}

impl SortField {
	pub const ALL: [Self; 4] = [Self::Name, Self::Rarity, Self::SellPrice, Self::Weight];

	/// Translation key for the sort button.
	pub fn label_key(self) -> &'static str {
		match self {
			Self::Name => "grid.sortName",
			Self::Rarity => "grid.sortRarity",
			Self::SellPrice => "grid.sortSellPrice",
			Self::Weight => "grid.sortWeight",
		}
	}
}

/// A filter/sort request over the catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemQuery {
	/// Case-insensitive substring matched against name, rarity and type.
	pub search: String,
	/// Allowed infobox types. `None` or an empty set disables the filter.
	pub types: Option<BTreeSet<String>>,
	pub sort: SortField,
	pub ascending: bool,
}

impl Default for ItemQuery {
	fn default() -> Self {
		Self {
			search: String::new(),
			types: None,
			sort: SortField::Name,
			ascending: true,
		}
	}
}

impl ItemQuery {
	pub fn search(text: impl Into<String>) -> Self {
		Self {
			search: text.into(),
			..Self::default()
		}
	}

	/// The item grid's starting point: every type in `catalog` selected.
	pub fn for_catalog(catalog: &Catalog) -> Self {
		let mut query = Self::default();
		query.select_all_types(catalog);
		query
	}

	pub fn has_type(&self, item_type: &str) -> bool {
		self.types.as_ref().is_some_and(|t| t.contains(item_type))
	}

	/// Adds `item_type` to the selection, or removes it if already selected.
	pub fn toggle_type(&mut self, item_type: &str) {
		let types = self.types.get_or_insert_with(BTreeSet::new);
		if !types.remove(item_type) {
			types.insert(item_type.to_string());
		}
	}

	pub fn select_all_types(&mut self, catalog: &Catalog) {
		self.types = Some(catalog.item_types().into_iter().collect());
	}

	/// Empties the selection, which shows every item again.
	pub fn clear_types(&mut self) {
		self.types = Some(BTreeSet::new());
	}

	pub fn matches(&self, item: &Item) -> bool {
		self.matches_search(item) && self.matches_type(item)
	}

	fn matches_search(&self, item: &Item) -> bool {
		let needle = self.search.trim().to_lowercase();
		if needle.is_empty() {
			return true;
		}
		let infobox = item.infobox.as_ref();
		item.name.to_lowercase().contains(&needle)
			|| infobox
				.and_then(|i| i.rarity.as_deref())
				.is_some_and(|r| r.to_lowercase().contains(&needle))
			|| infobox
				.and_then(|i| i.item_type.as_deref())
				.is_some_and(|t| t.to_lowercase().contains(&needle))
	}

	fn matches_type(&self, item: &Item) -> bool {
		match &self.types {
			Some(types) if !types.is_empty() => item.item_type().is_some_and(|t| types.contains(t)),
			_ => true,
		}
	}

	fn compare(&self, a: &Item, b: &Item) -> Ordering {
		let ord = match self.sort {
			SortField::Name => compare_names(&a.name, &b.name),
			SortField::Rarity => rarity_rank(a).cmp(&rarity_rank(b)),
			SortField::SellPrice => sell_price(a).total_cmp(&sell_price(b)),
			SortField::Weight => weight(a).total_cmp(&weight(b)),
		};
		if self.ascending { ord } else { ord.reverse() }
	}

	/// Matching items, sorted. Ties keep dataset order.
	pub fn run<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Item> {
		let mut items: Vec<&Item> = catalog.iter().filter(|item| self.matches(item)).collect();
		items.sort_by(|a, b| self.compare(a, b));
		items
	}
}

/// Case-insensitive, then byte order to keep the result total.
fn compare_names(a: &str, b: &str) -> Ordering {
	a.to_lowercase()
		.cmp(&b.to_lowercase())
		.then_with(|| a.cmp(b))
}

/// Missing rarity counts as Common; an unrecognized one ranks below it.
fn rarity_rank(item: &Item) -> u8 {
	match item.infobox.as_ref().and_then(|i| i.rarity.as_deref()) {
		None => Rarity::Common.rank(),
		Some(raw) => Rarity::parse(raw).map_or(0, Rarity::rank),
	}
}

fn sell_price(item: &Item) -> f64 {
	item.infobox
		.as_ref()
		.and_then(|i| i.sellprice.as_ref())
		.map_or(0.0, |p| p.min())
}

fn weight(item: &Item) -> f64 {
	item.infobox.as_ref().and_then(|i| i.weight).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn catalog() -> Catalog {
		Catalog::from_json(
			r#"[
				{ "name": "Rusted Gear", "infobox": { "rarity": "Common", "type": "Recyclable", "sellprice": 40, "weight": 0.5 } },
				{ "name": "Battery", "infobox": { "rarity": "Uncommon", "type": "Basic Material", "sellprice": [50, 90], "weight": 0.25 } },
				{ "name": "Arc Alloy", "infobox": { "rarity": "Epic", "type": "Refined Material", "sellprice": 300 } },
				{ "name": "Mystery Box" },
				{ "name": "Gear Bench", "infobox": { "rarity": "Rare", "type": "Recyclable", "weight": 4 } }
			]"#,
		)
		.unwrap()
	}

	fn names(items: Vec<&Item>) -> Vec<&str> {
		items.into_iter().map(|i| i.name.as_str()).collect()
	}

	#[test]
	fn blank_search_returns_everything_by_name() {
		let catalog = catalog();
		let got = names(ItemQuery::search("   ").run(&catalog));
		assert_eq!(
			got,
			["Arc Alloy", "Battery", "Gear Bench", "Mystery Box", "Rusted Gear"]
		);
	}

	#[test]
	fn search_covers_name_rarity_and_type() {
		let catalog = catalog();
		assert_eq!(
			names(ItemQuery::search("GEAR").run(&catalog)),
			["Gear Bench", "Rusted Gear"]
		);
		assert_eq!(names(ItemQuery::search("epic").run(&catalog)), ["Arc Alloy"]);
		assert_eq!(
			names(ItemQuery::search("material").run(&catalog)),
			["Arc Alloy", "Battery"]
		);
	}

	#[test]
	fn type_filter_drops_untyped_items() {
		let catalog = catalog();
		let query = ItemQuery {
			types: Some(["Recyclable".to_string()].into_iter().collect()),
			..ItemQuery::default()
		};
		assert_eq!(names(query.run(&catalog)), ["Gear Bench", "Rusted Gear"]);

		let empty = ItemQuery {
			types: Some(BTreeSet::new()),
			..ItemQuery::default()
		};
		assert_eq!(empty.run(&catalog).len(), 5);
	}

	#[test]
	fn sorts_by_rarity_price_and_weight() {
		let catalog = catalog();
		let by = |sort, ascending| {
			let query = ItemQuery {
				sort,
				ascending,
				..ItemQuery::default()
			};
			names(query.run(&catalog))
		};

		assert_eq!(
			by(SortField::Rarity, false),
			["Arc Alloy", "Gear Bench", "Battery", "Rusted Gear", "Mystery Box"]
		);
		assert_eq!(
			by(SortField::SellPrice, true),
			["Mystery Box", "Gear Bench", "Rusted Gear", "Battery", "Arc Alloy"]
		);
		assert_eq!(
			by(SortField::Weight, true),
			["Arc Alloy", "Mystery Box", "Battery", "Rusted Gear", "Gear Bench"]
		);
	}

	#[test]
	fn unrecognized_rarity_ranks_below_common() {
		let catalog = Catalog::from_json(
			r#"[
				{ "name": "Relic", "infobox": { "rarity": "Mythic" } },
				{ "name": "Scrap", "infobox": { "rarity": "Common" } },
				{ "name": "Plain" }
			]"#,
		)
		.unwrap();
		let query = ItemQuery {
			sort: SortField::Rarity,
			..ItemQuery::default()
		};
		assert_eq!(names(query.run(&catalog)), ["Relic", "Scrap", "Plain"]);
	}

	#[test]
	fn name_sort_ignores_case() {
		let catalog = Catalog::from_json(
			r#"[{ "name": "battery" }, { "name": "Arc Alloy" }, { "name": "Zipline" }, { "name": "Battery" }]"#,
		)
		.unwrap();
		assert_eq!(
			names(ItemQuery::default().run(&catalog)),
			["Arc Alloy", "Battery", "battery", "Zipline"]
		);
	}

	#[test]
	fn grid_selection_starts_full_and_toggles() {
		let catalog = catalog();
		let mut query = ItemQuery::for_catalog(&catalog);
		assert!(query.has_type("Recyclable") && query.has_type("Basic Material"));
		// Every typed item passes; the untyped one does not.
		assert_eq!(query.run(&catalog).len(), 4);

		query.toggle_type("Recyclable");
		assert!(!query.has_type("Recyclable"));
		assert_eq!(names(query.run(&catalog)), ["Arc Alloy", "Battery"]);
		query.toggle_type("Recyclable");
		assert_eq!(query.run(&catalog).len(), 4);

		query.clear_types();
		assert!(!query.has_type("Recyclable"));
		assert_eq!(query.run(&catalog).len(), 5);

		query.select_all_types(&catalog);
		query.ascending = false;
		query.sort = SortField::Weight;
		assert_eq!(
			names(query.run(&catalog)),
			["Gear Bench", "Rusted Gear", "Battery", "Arc Alloy"]
		);
		assert_eq!(SortField::ALL.map(SortField::label_key)[2], "grid.sortSellPrice");
	}
}
