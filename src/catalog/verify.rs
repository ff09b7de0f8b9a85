//! Dataset consistency checks: required fields and reverse-edge symmetry.
//!
//! Every relation an item lists should be mirrored on the related item with the
//! reverse relation (`craft_from` on one side, `craft_to` on the other) and the
//! input/output levels swapped. The viewer tolerates gaps, so this only reports.

use std::collections::{BTreeMap, HashSet};

use super::relation::reverse_relation;
use super::{Catalog, Item, Level};

/// Fields a record is missing, by node name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingFields {
	pub node: String,
	pub fields: Vec<&'static str>,
}

/// A relation edge that fails the symmetry check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EdgeIssue {
	/// The entry lacks the related name or the relation.
	Incomplete {
		source: String,
	},
	UnknownRelation {
		source: String,
		target: String,
		relation: String,
	},
	MissingReverse {
		source: String,
		target: String,
		relation: String,
		expected: &'static str,
	},
}

impl std::fmt::Display for EdgeIssue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			EdgeIssue::Incomplete { source } => {
				write!(f, "invalid edge in node '{source}': missing name or relation")
			}
			EdgeIssue::UnknownRelation {
				source,
				target,
				relation,
			} => write!(f, "unknown relation '{relation}' in edge {source} -> {target}"),
			EdgeIssue::MissingReverse {
				source,
				target,
				relation,
				expected,
			} => write!(
				f,
				"missing reverse edge: {source} -{relation}-> {target} (expected {target} -{expected}-> {source})"
			),
		}
	}
}

/// Outcome of [`verify`].
#[derive(Clone, Debug, Default)]
pub struct VerifyReport {
	pub missing_fields: Vec<MissingFields>,
	pub edge_issues: Vec<EdgeIssue>,
	pub total_nodes: usize,
	pub nodes_with_edges: usize,
	pub total_edges: usize,
	pub node_types: BTreeMap<String, usize>,
	pub relations: BTreeMap<String, usize>,
}

impl VerifyReport {
	pub fn passed(&self) -> bool {
		self.missing_fields.is_empty() && self.edge_issues.is_empty()
	}

	pub fn nodes_without_edges(&self) -> usize {
		self.total_nodes - self.nodes_with_edges
	}
}

fn missing_fields(item: &Item) -> Vec<&'static str> {
	let mut missing = Vec::new();
	if item.name.is_empty() {
		missing.push("name");
	}
	if item.node_type.as_deref().is_none_or(str::is_empty) {
		missing.push("node_type");
	}
	if item.node_type.as_deref() != Some("item") {
		return missing;
	}

	if item.wiki_url.as_deref().is_none_or(str::is_empty) {
		missing.push("wiki_url");
	}
	match &item.infobox {
		None => missing.push("infobox"),
		Some(infobox) => {
			if infobox.item_type.as_deref().is_none_or(str::is_empty) {
				missing.push("infobox.type");
			}
			if infobox.rarity.as_deref().is_none_or(str::is_empty) {
				missing.push("infobox.rarity");
			}
		}
	}
	match &item.image_urls {
		None => missing.push("image_urls"),
		Some(urls) if urls.thumb.as_deref().is_none_or(str::is_empty) => {
			missing.push("image_urls.thumb")
		}
		Some(_) => {}
	}
	missing
}

type EdgeKey<'a> = (&'a str, &'a str, &'a str, Option<&'a Level>, Option<&'a Level>);

/// Checks every loaded record, unnamed and duplicate ones included, and gathers statistics.
pub fn verify(catalog: &Catalog) -> VerifyReport {
	let mut report = VerifyReport::default();

	for item in catalog.records() {
		report.total_nodes += 1;
		if !item.edges.is_empty() {
			report.nodes_with_edges += 1;
		}
		let node_type = item.node_type.clone().unwrap_or_else(|| "unknown".into());
		*report.node_types.entry(node_type).or_default() += 1;
		for edge in &item.edges {
			let relation = match edge.relation.as_str() {
				"" => "unknown",
				r => r,
			};
			*report.relations.entry(relation.to_string()).or_default() += 1;
		}

		let fields = missing_fields(item);
		if !fields.is_empty() {
			let node = match item.name.as_str() {
				"" => "<unnamed>".to_string(),
				name => name.to_string(),
			};
			report.missing_fields.push(MissingFields { node, fields });
		}
	}

	let mut keys: HashSet<EdgeKey<'_>> = HashSet::new();
	let mut ordered: Vec<(EdgeKey<'_>, &str)> = Vec::new();
	for item in catalog.records().iter().filter(|i| !i.name.is_empty()) {
		for edge in &item.edges {
			if !edge.is_complete() {
				report.edge_issues.push(EdgeIssue::Incomplete {
					source: item.name.clone(),
				});
				continue;
			}
			let key = (
				item.name.as_str(),
				edge.name.as_str(),
				edge.relation.as_str(),
				edge.input_level.as_ref(),
				edge.output_level.as_ref(),
			);
			if keys.insert(key) {
				ordered.push((key, edge.relation.as_str()));
			}
		}
	}
	report.total_edges = keys.len();

	for ((source, target, _, input, output), relation) in ordered {
		let Some(expected) = reverse_relation(relation) else {
			report.edge_issues.push(EdgeIssue::UnknownRelation {
				source: source.into(),
				target: target.into(),
				relation: relation.into(),
			});
			continue;
		};
		if !keys.contains(&(target, source, expected, output, input)) {
			report.edge_issues.push(EdgeIssue::MissingReverse {
				source: source.into(),
				target: target.into(),
				relation: relation.into(),
				expected,
			});
		}
	}

	report
}

#[cfg(test)]
mod tests {
	use super::*;

	fn catalog(json: &str) -> Catalog {
		Catalog::from_json(json).unwrap()
	}

	#[test]
	fn symmetric_complete_dataset_passes() {
		let report = verify(&catalog(
			r#"[
				{
					"name": "Power Rod", "node_type": "item", "wiki_url": "https://wiki.example/Power_Rod",
					"infobox": { "type": "Material", "rarity": "Rare" },
					"image_urls": { "thumb": "https://wiki.example/rod.png" },
					"edges": [{ "name": "Copper Wire", "relation": "craft_from", "output_level": 2 }]
				},
				{
					"name": "Copper Wire", "node_type": "item", "wiki_url": "https://wiki.example/Copper_Wire",
					"infobox": { "type": "Material", "rarity": "Common" },
					"image_urls": { "thumb": "https://wiki.example/wire.png" },
					"edges": [{ "name": "Power Rod", "relation": "craft_to", "input_level": 2 }]
				},
				{ "name": "Celeste", "node_type": "trader" }
			]"#,
		));

		assert!(report.passed(), "{report:?}");
		assert_eq!(report.total_nodes, 3);
		assert_eq!(report.nodes_with_edges, 2);
		assert_eq!(report.nodes_without_edges(), 1);
		assert_eq!(report.total_edges, 2);
		assert_eq!(report.node_types.get("item"), Some(&2));
		assert_eq!(report.node_types.get("trader"), Some(&1));
		assert_eq!(report.relations.get("craft_to"), Some(&1));
	}

	#[test]
	fn reports_missing_item_fields() {
		let report = verify(&catalog(
			r#"[
				{ "name": "Bare", "node_type": "item", "infobox": { "type": "Material" }, "image_urls": {} },
				{ "name": "Untyped" }
			]"#,
		));

		assert_eq!(
			report.missing_fields,
			vec![
				MissingFields {
					node: "Bare".into(),
					fields: vec!["wiki_url", "infobox.rarity", "image_urls.thumb"],
				},
				MissingFields {
					node: "Untyped".into(),
					fields: vec!["node_type"],
				},
			]
		);
		assert_eq!(report.node_types.get("unknown"), Some(&1));
	}

	#[test]
	fn reports_asymmetric_and_unknown_edges() {
		let report = verify(&catalog(
			r#"[
				{ "name": "A", "node_type": "trader", "edges": [
					{ "name": "B", "relation": "trader" },
					{ "name": "B", "relation": "teleport_to" }
				] },
				{ "name": "B", "node_type": "trader", "edges": [
					{ "name": "A", "relation": "sold_by", "input_level": 1 }
				] }
			]"#,
		));

		assert!(!report.passed());
		let messages: Vec<String> = report.edge_issues.iter().map(ToString::to_string).collect();
		assert_eq!(
			messages,
			vec![
				"missing reverse edge: A -trader-> B (expected B -sold_by-> A)".to_string(),
				"unknown relation 'teleport_to' in edge A -> B".to_string(),
				"missing reverse edge: B -sold_by-> A (expected A -trader-> B)".to_string(),
			]
		);
	}

	#[test]
	fn reports_unnamed_records_and_incomplete_edges() {
		let report = verify(&catalog(
			r#"[
				{ "node_type": "trader", "edges": [{ "name": "A", "relation": "trader" }] },
				{ "name": "A", "node_type": "trader", "edges": [
					{ "name": "B" },
					{ "relation": "sold_by" }
				] },
				{ "name": "B", "node_type": "trader" }
			]"#,
		));

		assert_eq!(report.total_nodes, 3);
		assert_eq!(
			report.missing_fields,
			vec![MissingFields {
				node: "<unnamed>".into(),
				fields: vec!["name"],
			}]
		);
		let messages: Vec<String> = report.edge_issues.iter().map(ToString::to_string).collect();
		assert_eq!(
			messages,
			vec![
				"invalid edge in node 'A': missing name or relation".to_string(),
				"invalid edge in node 'A': missing name or relation".to_string(),
			]
		);
		assert_eq!(report.total_edges, 0);
		assert_eq!(report.relations.get("unknown"), Some(&1));
		assert_eq!(report.relations.get("trader"), Some(&1));
	}
}
