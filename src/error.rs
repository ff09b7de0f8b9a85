//! Crate-level error type.

use crate::graph::LayoutError;

/// Errors surfaced while loading data or laying out a graph.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// A JSON payload embedded in the page could not be parsed.
	#[error("failed to parse {what}: {source}")]
	Json {
		what: &'static str,
		#[source]
		source: serde_json::Error,
	},
	/// An expected `<script>` data element is absent or unreadable.
	#[error("missing data element #{0}")]
	MissingDataElement(&'static str),
	/// Element construction and positioning disagree.
	#[error(transparent)]
	Layout(#[from] LayoutError),
}

/// Result alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
