//! Which column each (relation kind, direction) pair is drawn in.

use serde::Serialize;

use crate::catalog::{Direction, RelationKind};

/// Display column relative to the center node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
	Left,
	Right,
}

/// Side table. Ingredients and sources read left to right into the focal item; whatever
/// the focal item turns into sits on the right.
pub fn side_for(kind: RelationKind, direction: Direction) -> Side {
	use Direction::*;
	use RelationKind::*;

	match (kind, direction) {
		(Craft, Inbound) => Side::Left,
		(Craft, Outbound) => Side::Right,
		(Repair, Inbound) => Side::Left,
		(Repair, Outbound) => Side::Right,
		(Upgrade, Inbound) => Side::Left,
		(Upgrade, Outbound) => Side::Right,
		(Recycle, Inbound) => Side::Left,
		(Recycle, Outbound) => Side::Right,
		(Salvage, Inbound) => Side::Left,
		(Salvage, Outbound) => Side::Right,
		(Trade, Inbound) => Side::Left,
		(Trade, Outbound) => Side::Right,
	}
}
