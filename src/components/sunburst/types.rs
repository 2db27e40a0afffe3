use serde::Deserialize;

/// One node of the author hierarchy as it appears in the JSON literal.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct TreeData {
	/// Display label; not guaranteed unique.
	pub name: String,
	/// Leaf weight. Ignored on nodes that have children.
	#[serde(default)]
	pub value: Option<f64>,
	/// Author profile link.
	#[serde(default)]
	pub url: Option<String>,
	/// Name of the most frequent co-author.
	#[serde(default)]
	pub most_collaborated: Option<String>,
	/// Sub-trees. Missing and empty both mean leaf.
	#[serde(default)]
	pub children: Vec<TreeData>,
}

impl TreeData {
	/// Parse the tree from a JSON document.
	pub fn from_json(json: &str) -> crate::error::Result<Self> {
		serde_json::from_str(json).map_err(|e| crate::error::VizError::decode("sunburst tree", e))
	}
}
