use std::collections::HashSet;

use serde::Deserialize;

/// An author in the collaboration graph.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GraphNode {
	/// Author name; doubles as the node label.
	pub id: String,
}

/// A co-authorship edge, by node id.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GraphLink {
	/// Id of the first author.
	pub source: String,
	/// Id of the second author.
	pub target: String,
}

/// Node/link payload as served in `coauthors_collab_filtered.json`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct GraphData {
	/// Authors.
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	/// Co-authorships.
	#[serde(default)]
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Drop links whose source or target is not a known node id.
	///
	/// Returns the number of links removed.
	pub fn retain_known_links(&mut self) -> usize {
		let known: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
		let before = self.links.len();
		self.links
			.retain(|l| known.contains(l.source.as_str()) && known.contains(l.target.as_str()));
		before - self.links.len()
	}
}
