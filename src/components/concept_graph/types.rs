use serde::{Deserialize, Serialize};

/// Fill color used for nodes whose category is not one of the known set.
pub const DEFAULT_NODE_COLOR: &str = "#90a4ae";
/// Radius used for nodes whose size class is not recognized.
pub const DEFAULT_NODE_RADIUS: f64 = 20.0;

/// A single concept extracted from a document summary.
///
/// The JSON shape is fixed by the summarization backend: `type` carries the
/// category and `size` the size class, both as open-ended strings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConceptNode {
	pub id: String,
	#[serde(default)]
	pub label: String,
	#[serde(rename = "type", default)]
	pub category: String,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub size: String,
}

/// A directed relationship between two concepts.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConceptEdge {
	pub from: String,
	pub to: String,
	#[serde(default)]
	pub label: Option<String>,
	#[serde(rename = "type", default)]
	pub kind: String,
}

/// The concept-map payload as delivered by the backend.
///
/// Edges are allowed to reference node ids that do not exist; such edges are
/// skipped when laying out and rendering rather than rejected up front.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConceptGraph {
	#[serde(default)]
	pub nodes: Vec<ConceptNode>,
	#[serde(default)]
	pub edges: Vec<ConceptEdge>,
}

impl ConceptGraph {
	/// Parse a concept-map JSON payload.
	pub fn from_json(payload: &str) -> serde_json::Result<Self> {
		serde_json::from_str(payload)
	}
}

/// Map a node category to its fill color, falling back to a neutral tone.
pub fn category_color(category: &str) -> &'static str {
	match category {
		"central" => "#7c3aed",
		"key" => "#2563eb",
		"support" => "#059669",
		"application" => "#d97706",
		"bridge" => "#db2777",
		_ => DEFAULT_NODE_COLOR,
	}
}

/// Map a node size class to its radius in pixels.
pub fn size_radius(size: &str) -> f64 {
	match size {
		"large" => 32.0,
		"medium" => 24.0,
		"small" => 16.0,
		_ => DEFAULT_NODE_RADIUS,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_backend_payload_shape() {
		let payload = r#"{
			"nodes": [
				{"id": "central", "label": "Photosynthesis", "type": "central", "description": "Core process", "size": "large"},
				{"id": "key1", "label": "Light Reactions", "type": "key", "size": "medium"}
			],
			"edges": [
				{"from": "central", "to": "key1", "label": "relates to", "type": "primary"}
			]
		}"#;
		let graph = ConceptGraph::from_json(payload).unwrap();
		assert_eq!(graph.nodes.len(), 2);
		assert_eq!(graph.nodes[0].category, "central");
		assert_eq!(graph.nodes[0].description.as_deref(), Some("Core process"));
		assert!(graph.nodes[1].description.is_none());
		assert_eq!(graph.edges[0].from, "central");
		assert_eq!(graph.edges[0].kind, "primary");
	}

	#[test]
	fn lenient_on_missing_fields() {
		let graph = ConceptGraph::from_json(r#"{"nodes": [{"id": "a"}], "edges": []}"#).unwrap();
		assert_eq!(graph.nodes[0].label, "");
		assert_eq!(graph.nodes[0].category, "");
		let empty = ConceptGraph::from_json("{}").unwrap();
		assert!(empty.nodes.is_empty() && empty.edges.is_empty());
	}

	#[test]
	fn unknown_category_and_size_fall_back() {
		assert_eq!(category_color("central"), "#7c3aed");
		assert_eq!(category_color("made-up"), DEFAULT_NODE_COLOR);
		assert_eq!(category_color(""), DEFAULT_NODE_COLOR);
		assert_eq!(size_radius("large"), 32.0);
		assert_eq!(size_radius("tiny"), DEFAULT_NODE_RADIUS);
	}
}
