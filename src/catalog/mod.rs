//! Item catalog: the read-only dataset every graph is built from.
//!
//! Records are deserialized from the relation dataset (a JSON array of items, each
//! carrying its own relation edges) and indexed by name. Nothing here mutates an item
//! after load.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub mod query;
pub mod relation;
pub mod verify;

pub use relation::{Direction, RelationKind};

/// Item rarity tiers, lowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Rarity {
	Common,
	Uncommon,
	Rare,
	Epic,
	Legendary,
}

impl Rarity {
	/// All tiers in ascending order.
	pub const ALL: [Self; 5] = [
		Self::Common,
		Self::Uncommon,
		Self::Rare,
		Self::Epic,
		Self::Legendary,
	];

	/// Parses the infobox spelling (`"Epic"`). Unknown strings yield `None`.
	pub fn parse(s: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|r| r.key() == s)
	}

	pub fn key(self) -> &'static str {
		match self {
			Self::Common => "Common",
			Self::Uncommon => "Uncommon",
			Self::Rare => "Rare",
			Self::Epic => "Epic",
			Self::Legendary => "Legendary",
		}
	}

	/// Sort rank, 1 (Common) through 5 (Legendary).
	pub fn rank(self) -> u8 {
		self as u8 + 1
	}
}

impl fmt::Display for Rarity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.key())
	}
}

/// Sell price: a single value or a range listed low to high.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SellPrice {
	Single(f64),
	Range(Vec<f64>),
}

impl SellPrice {
	/// Lowest price, used for sorting.
	pub fn min(&self) -> f64 {
		match self {
			SellPrice::Single(v) => *v,
			SellPrice::Range(vs) => vs.first().copied().unwrap_or(0.0),
		}
	}

	/// Renders `"N/A"`, `"120"` or `"80 - 160"`.
	pub fn display(price: Option<&SellPrice>) -> String {
		match price {
			None => "N/A".to_string(),
			Some(SellPrice::Single(v)) if *v == 0.0 => "N/A".to_string(),
			Some(SellPrice::Single(v)) => format_number(*v),
			Some(SellPrice::Range(vs)) => match (vs.first(), vs.last()) {
				(Some(lo), Some(hi)) => format!("{} - {}", format_number(*lo), format_number(*hi)),
				_ => "N/A".to_string(),
			},
		}
	}
}

fn format_number(v: f64) -> String {
	if v.fract() == 0.0 {
		format!("{}", v as i64)
	} else {
		format!("{v}")
	}
}

/// Scalar wiki infobox values. Unknown keys are ignored.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Infobox {
	pub rarity: Option<String>,
	#[serde(rename = "type")]
	pub item_type: Option<String>,
	pub quote: Option<String>,
	pub weight: Option<f64>,
	pub sellprice: Option<SellPrice>,
	pub stacksize: Option<serde_json::Value>,
	pub damage: Option<serde_json::Value>,
}

/// Image locations scraped from the wiki.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ImageUrls {
	pub thumb: Option<String>,
	pub original: Option<String>,
	pub file_page: Option<String>,
}

/// Upgrade tier attached to a relation, either a label or a number (integral or not).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Level {
	Number(serde_json::Number),
	Text(String),
}

impl fmt::Display for Level {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Level::Number(n) => write!(f, "{n}"),
			Level::Text(s) => f.write_str(s),
		}
	}
}

/// One raw relation entry as stored on an item.
///
/// A missing `name` or `relation` deserializes as empty; such entries are kept so the
/// verifier can report them, and the builder ignores them.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct RelationEdge {
	/// Name of the related item.
	#[serde(default)]
	pub name: String,
	/// Raw relation string such as `craft_from` or `sold_by`.
	#[serde(default)]
	pub relation: String,
	#[serde(default)]
	pub input_level: Option<Level>,
	#[serde(default)]
	pub output_level: Option<Level>,
}

impl RelationEdge {
	/// The parsed (kind, direction), if the relation string is known.
	pub fn parsed(&self) -> Option<(RelationKind, Direction)> {
		relation::parse_relation(&self.relation)
	}

	/// Both the related name and the relation are present.
	pub fn is_complete(&self) -> bool {
		!self.name.is_empty() && !self.relation.is_empty()
	}
}

/// A catalog record.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Item {
	/// Empty when the record has no name; such records are never indexed.
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub node_type: Option<String>,
	#[serde(default)]
	pub wiki_url: Option<String>,
	#[serde(default)]
	pub infobox: Option<Infobox>,
	#[serde(default)]
	pub image_urls: Option<ImageUrls>,
	#[serde(default)]
	pub sources: Vec<String>,
	/// Relations from this item to others.
	#[serde(default)]
	pub edges: Vec<RelationEdge>,
}

impl Item {
	/// Rarity from the infobox, if present and recognized.
	pub fn rarity(&self) -> Option<Rarity> {
		self.infobox
			.as_ref()
			.and_then(|i| i.rarity.as_deref())
			.and_then(Rarity::parse)
	}

	pub fn item_type(&self) -> Option<&str> {
		self.infobox.as_ref().and_then(|i| i.item_type.as_deref())
	}

	pub fn thumb(&self) -> Option<&str> {
		self.image_urls.as_ref().and_then(|i| i.thumb.as_deref())
	}
}

/// Name-indexed, read-only item dataset.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
	items: Vec<Item>,
	by_name: HashMap<String, usize>,
}

impl Catalog {
	/// Indexes `items` by name. The first record with a given name wins and records
	/// without a name are left out of the index.
	pub fn new(items: Vec<Item>) -> Self {
		let mut by_name = HashMap::with_capacity(items.len());
		for (i, item) in items.iter().enumerate() {
			if item.name.is_empty() {
				warn!("catalog: record #{i} has no name, skipping");
				continue;
			}
			if by_name.contains_key(&item.name) {
				warn!("catalog: duplicate item name {:?}, keeping first", item.name);
				continue;
			}
			by_name.insert(item.name.clone(), i);
		}
		Self { items, by_name }
	}

	/// Parses the relation dataset JSON.
	pub fn from_json(json: &str) -> Result<Self> {
		let items: Vec<Item> = serde_json::from_str(json).map_err(|source| Error::Json {
			what: "item dataset",
			source,
		})?;
		Ok(Self::new(items))
	}

	pub fn get(&self, name: &str) -> Option<&Item> {
		self.by_name.get(name).map(|&i| &self.items[i])
	}

	pub fn contains(&self, name: &str) -> bool {
		self.by_name.contains_key(name)
	}

	/// Number of distinct names.
	pub fn len(&self) -> usize {
		self.by_name.len()
	}

	pub fn is_empty(&self) -> bool {
		self.by_name.is_empty()
	}

	/// Every record as loaded, including duplicates and unnamed ones.
	pub fn records(&self) -> &[Item] {
		&self.items
	}

	/// Indexed items in dataset order.
	pub fn iter(&self) -> impl Iterator<Item = &Item> {
		self.items
			.iter()
			.enumerate()
			.filter(|(i, item)| self.by_name.get(&item.name) == Some(i))
			.map(|(_, item)| item)
	}

	/// Distinct infobox types, sorted.
	pub fn item_types(&self) -> Vec<String> {
		self.iter()
			.filter_map(|item| item.item_type())
			.map(str::to_string)
			.collect::<BTreeSet<_>>()
			.into_iter()
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const DATA: &str = r#"[
		{
			"name": "Power Rod",
			"node_type": "item",
			"infobox": { "rarity": "Rare", "type": "Topside Material", "sellprice": [80, 160], "weight": 1.5 },
			"image_urls": { "thumb": "https://wiki.example/power_rod.png" },
			"edges": [
				{ "name": "Copper Wire", "relation": "craft_from" },
				{ "name": "Advanced Power Rod", "relation": "upgrade_to", "input_level": 1, "output_level": "II" }
			]
		},
		{ "name": "Copper Wire", "infobox": { "rarity": "Common", "type": "Basic Material", "sellprice": 10 } },
		{ "name": "Copper Wire", "infobox": { "rarity": "Epic" } }
	]"#;

	#[test]
	fn from_json_indexes_first_record_per_name() {
		let catalog = Catalog::from_json(DATA).unwrap();
		assert_eq!(catalog.len(), 2);
		assert_eq!(catalog.iter().count(), 2);
		assert_eq!(
			catalog.get("Copper Wire").unwrap().rarity(),
			Some(Rarity::Common)
		);
		assert!(catalog.get("Advanced Power Rod").is_none());
	}

	#[test]
	fn relation_levels_accept_numbers_and_text() {
		let catalog = Catalog::from_json(DATA).unwrap();
		let rod = catalog.get("Power Rod").unwrap();
		let upgrade = &rod.edges[1];
		assert_eq!(upgrade.input_level, Some(Level::Number(1.into())));
		assert_eq!(upgrade.output_level, Some(Level::Text("II".into())));
		assert_eq!(
			upgrade.parsed(),
			Some((RelationKind::Upgrade, Direction::Outbound))
		);
		assert_eq!(rod.thumb(), Some("https://wiki.example/power_rod.png"));
	}

	#[test]
	fn incomplete_records_still_load() {
		let catalog = Catalog::from_json(
			r#"[
				{ "node_type": "item", "edges": [{ "name": "Battery", "relation": "craft_from" }] },
				{ "name": "Battery", "edges": [
					{ "name": "Power Rod" },
					{ "relation": "craft_to" },
					{ "name": "Power Rod", "relation": "upgrade_to", "input_level": 1.5, "output_level": 2 }
				] }
			]"#,
		)
		.unwrap();

		assert_eq!(catalog.len(), 1);
		assert_eq!(catalog.records().len(), 2);
		assert!(catalog.get("").is_none());
		let names: Vec<&str> = catalog.iter().map(|i| i.name.as_str()).collect();
		assert_eq!(names, ["Battery"]);

		let edges = &catalog.get("Battery").unwrap().edges;
		assert_eq!(edges[0].relation, "");
		assert!(!edges[0].is_complete());
		assert_eq!(edges[1].name, "");
		assert!(!edges[1].is_complete());
		assert!(edges[2].is_complete());
		assert_eq!(edges[2].input_level.as_ref().map(ToString::to_string).as_deref(), Some("1.5"));
		assert_eq!(edges[2].output_level, Some(Level::Number(2.into())));
	}

	#[test]
	fn item_types_are_sorted_and_distinct() {
		let catalog = Catalog::from_json(DATA).unwrap();
		assert_eq!(
			catalog.item_types(),
			vec!["Basic Material".to_string(), "Topside Material".to_string()]
		);
	}

	#[test]
	fn sell_price_display() {
		assert_eq!(SellPrice::display(None), "N/A");
		assert_eq!(SellPrice::display(Some(&SellPrice::Single(0.0))), "N/A");
		assert_eq!(SellPrice::display(Some(&SellPrice::Single(120.0))), "120");
		assert_eq!(
			SellPrice::display(Some(&SellPrice::Range(vec![80.0, 120.0, 160.0]))),
			"80 - 160"
		);
		assert_eq!(SellPrice::Range(vec![80.0, 160.0]).min(), 80.0);
	}

	#[test]
	fn malformed_dataset_is_an_error() {
		let err = Catalog::from_json("{ not json").unwrap_err();
		assert!(matches!(err, Error::Json { what: "item dataset", .. }));
	}

	#[test]
	fn rarity_rank_follows_tier_order() {
		assert_eq!(Rarity::Common.rank(), 1);
		assert_eq!(Rarity::Legendary.rank(), 5);
		assert_eq!(Rarity::parse("Uncommon"), Some(Rarity::Uncommon));
		assert_eq!(Rarity::parse("Mythic"), None);
	}
}
