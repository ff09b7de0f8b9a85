//! Relation vocabulary: kinds, directions and the raw relation strings of the dataset.

use std::fmt;

use serde::Serialize;

/// Category of crafting-graph edge, in display priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
	Craft,
	Repair,
	Upgrade,
	Recycle,
	Salvage,
	Trade,
}

impl RelationKind {
	/// Every kind, highest priority first.
	pub const ALL: [Self; 6] = [
		Self::Craft,
		Self::Repair,
		Self::Upgrade,
		Self::Recycle,
		Self::Salvage,
		Self::Trade,
	];

	pub fn key(self) -> &'static str {
		match self {
			Self::Craft => "craft",
			Self::Repair => "repair",
			Self::Upgrade => "upgrade",
			Self::Recycle => "recycle",
			Self::Salvage => "salvage",
			Self::Trade => "trade",
		}
	}

	/// Translation key for the kind's legend label.
	pub fn label_key(self) -> &'static str {
		match self {
			Self::Craft => "graph.craft",
			Self::Repair => "graph.repair",
			Self::Upgrade => "graph.upgrade",
			Self::Recycle => "graph.recycle",
			Self::Salvage => "graph.salvage",
			Self::Trade => "graph.trade",
		}
	}
}

impl fmt::Display for RelationKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.key())
	}
}

/// Direction of a relation relative to the item that lists it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
	/// The related item is consumed to produce or affect this one.
	Inbound,
	/// This item is consumed to produce or affect the related one.
	Outbound,
}

impl Direction {
	pub const ALL: [Self; 2] = [Self::Inbound, Self::Outbound];

	pub fn reverse(self) -> Self {
		match self {
			Self::Inbound => Self::Outbound,
			Self::Outbound => Self::Inbound,
		}
	}
}

/// Parses a dataset relation string into its kind and direction.
pub fn parse_relation(raw: &str) -> Option<(RelationKind, Direction)> {
	use Direction::*;
	use RelationKind::*;

	Some(match raw {
		"craft_from" => (Craft, Inbound),
		"craft_to" => (Craft, Outbound),
		"repair_from" => (Repair, Inbound),
		"repair_to" => (Repair, Outbound),
		"upgrade_from" => (Upgrade, Inbound),
		"upgrade_to" => (Upgrade, Outbound),
		"recycle_from" => (Recycle, Inbound),
		"recycle_to" => (Recycle, Outbound),
		"salvage_from" => (Salvage, Inbound),
		"salvage_to" => (Salvage, Outbound),
		"sold_by" => (Trade, Inbound),
		"trader" => (Trade, Outbound),
		_ => return None,
	})
}

/// The dataset spelling of a (kind, direction) pair.
pub fn relation_name(kind: RelationKind, direction: Direction) -> &'static str {
	use Direction::*;
	use RelationKind::*;

	match (kind, direction) {
		(Craft, Inbound) => "craft_from",
		(Craft, Outbound) => "craft_to",
		(Repair, Inbound) => "repair_from",
		(Repair, Outbound) => "repair_to",
		(Upgrade, Inbound) => "upgrade_from",
		(Upgrade, Outbound) => "upgrade_to",
		(Recycle, Inbound) => "recycle_from",
		(Recycle, Outbound) => "recycle_to",
		(Salvage, Inbound) => "salvage_from",
		(Salvage, Outbound) => "salvage_to",
		(Trade, Inbound) => "sold_by",
		(Trade, Outbound) => "trader",
	}
}

/// The relation string the related item is expected to list back.
pub fn reverse_relation(raw: &str) -> Option<&'static str> {
	parse_relation(raw).map(|(kind, direction)| relation_name(kind, direction.reverse()))
}
