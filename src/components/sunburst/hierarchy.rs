//! Arena representation of the weighted author tree.
//!
//! Nodes live in a flat `Vec` and refer to each other by index, so parent
//! lookups (tooltips, color inheritance, zoom-out) need no back-pointers.

use std::collections::VecDeque;

use super::types::TreeData;

/// Index of a node in a [`Hierarchy`].
pub type NodeId = usize;

/// Per-node payload carried through layout but not used by the geometry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeMeta {
	/// Display label.
	pub name: String,
	/// Author profile link.
	pub url: Option<String>,
	/// Most frequent co-author.
	pub most_collaborated: Option<String>,
}

/// One node of the arena.
#[derive(Clone, Debug, PartialEq)]
pub struct HierarchyNode {
	/// Display metadata.
	pub meta: NodeMeta,
	/// Parent index; `None` for the root.
	pub parent: Option<NodeId>,
	/// Child indices, in sibling order.
	pub children: Vec<NodeId>,
	/// Distance from the root.
	pub depth: usize,
	/// Longest distance to a descendant leaf.
	pub height: usize,
	/// Aggregated weight: own value for leaves, children's sum otherwise.
	pub value: f64,
}

impl HierarchyNode {
	/// Whether the node has children.
	pub fn has_children(&self) -> bool {
		!self.children.is_empty()
	}
}

/// A tree of [`HierarchyNode`]s with the root at index 0.
#[derive(Clone, Debug, PartialEq)]
pub struct Hierarchy {
	nodes: Vec<HierarchyNode>,
}

impl Hierarchy {
	/// The root's index.
	pub const ROOT: NodeId = 0;

	/// Build the arena, aggregate weights bottom-up and order siblings by
	/// descending weight.
	pub fn new(tree: TreeData) -> Self {
		let mut nodes = Vec::new();
		let mut pending = VecDeque::new();
		pending.push_back((tree, None, 0usize));

		// Breadth-first, so every child's index is larger than its parent's.
		while let Some((data, parent, depth)) = pending.pop_front() {
			let id = nodes.len();
			let TreeData {
				name,
				value,
				url,
				most_collaborated,
				children,
			} = data;
			nodes.push(HierarchyNode {
				meta: NodeMeta {
					name,
					url,
					most_collaborated,
				},
				parent,
				children: Vec::new(),
				depth,
				height: 0,
				value: value.filter(|v| v.is_finite()).unwrap_or(0.0).max(0.0),
			});
			if let Some(parent) = parent {
				let parent: &mut HierarchyNode = &mut nodes[parent];
				parent.children.push(id);
			}
			for child in children {
				pending.push_back((child, Some(id), depth + 1));
			}
		}

		let mut hierarchy = Self { nodes };
		hierarchy.aggregate();
		hierarchy.sort_by_value();
		hierarchy
	}

	fn aggregate(&mut self) {
		for id in (0..self.nodes.len()).rev() {
			let node = &self.nodes[id];
			if !node.has_children() {
				continue;
			}
			let (sum, height) = node.children.iter().fold((0.0, 0), |(sum, height), &c| {
				let child = &self.nodes[c];
				(sum + child.value, height.max(child.height + 1))
			});
			self.nodes[id].value = sum;
			self.nodes[id].height = height;
		}
	}

	fn sort_by_value(&mut self) {
		for id in 0..self.nodes.len() {
			let mut children = std::mem::take(&mut self.nodes[id].children);
			children.sort_by(|&a, &b| self.nodes[b].value.total_cmp(&self.nodes[a].value));
			self.nodes[id].children = children;
		}
	}

	/// Number of nodes, root included.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// The root node.
	pub fn root(&self) -> &HierarchyNode {
		&self.nodes[Self::ROOT]
	}

	/// Node by index.
	pub fn node(&self, id: NodeId) -> &HierarchyNode {
		&self.nodes[id]
	}

	/// All nodes in breadth-first order, siblings in sorted order.
	pub fn descendants(&self) -> Vec<NodeId> {
		let mut order = Vec::with_capacity(self.nodes.len());
		let mut queue = VecDeque::from([Self::ROOT]);
		while let Some(id) = queue.pop_front() {
			order.push(id);
			queue.extend(self.nodes[id].children.iter().copied());
		}
		order
	}

	/// `id` followed by each of its ancestors up to the root.
	pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
		let mut chain = vec![id];
		let mut cursor = self.nodes[id].parent;
		while let Some(parent) = cursor {
			chain.push(parent);
			cursor = self.nodes[parent].parent;
		}
		chain
	}

	/// The depth-1 ancestor of `id` (itself at depth 1, the root for the root).
	pub fn top_level_ancestor(&self, id: NodeId) -> NodeId {
		let mut id = id;
		while self.nodes[id].depth > 1 {
			match self.nodes[id].parent {
				Some(parent) => id = parent,
				None => break,
			}
		}
		id
	}

	/// Tooltip text: the root-to-node name path, the formatted weight, then any
	/// author metadata.
	pub fn tooltip(&self, id: NodeId) -> String {
		let path = self
			.ancestors(id)
			.iter()
			.rev()
			.map(|&a| self.nodes[a].meta.name.as_str())
			.collect::<Vec<_>>()
			.join("/");
		let meta = &self.nodes[id].meta;
		let mut text = format!("{}\n{}", path, format_thousands(self.nodes[id].value));
		if let Some(co) = &meta.most_collaborated {
			text.push_str(&format!("\nmost collaborated: {co}"));
		}
		if let Some(url) = &meta.url {
			text.push('\n');
			text.push_str(url);
		}
		text
	}
}

/// Round to an integer and group digits by thousands, e.g. `1234.6` → `"1,235"`.
pub fn format_thousands(value: f64) -> String {
	let rounded = value.round();
	let digits = format!("{}", rounded.abs() as u64);
	let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
	if rounded < 0.0 {
		out.push('−');
	}
	for (i, ch) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			out.push(',');
		}
		out.push(ch);
	}
	out
}
