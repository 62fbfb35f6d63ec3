use super::state::GraphState;
use super::types::{category_color, size_radius};

/// Character budget for node labels.
pub const NODE_LABEL_MAX: usize = 14;
/// Character budget for edge labels.
pub const EDGE_LABEL_MAX: usize = 18;

const ARROW_SIZE: f64 = 8.0;
const BACKGROUND_COLOR: &str = "#1a1a2e";
const LABEL_FONT_SIZE: f64 = 10.0;
const EDGE_LABEL_COLOR: &str = "rgba(200, 220, 255, 0.8)";
const NODE_LABEL_COLOR: &str = "rgba(255, 255, 255, 0.85)";
const SELECTION_RING: &str = "rgba(255, 255, 255, 0.9)";

/// One drawable primitive. Coordinates are viewport pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
	Line {
		x1: f64,
		y1: f64,
		x2: f64,
		y2: f64,
		width: f64,
		dash: Option<(f64, f64)>,
		color: String,
	},
	Polygon {
		points: Vec<(f64, f64)>,
		color: String,
	},
	Circle {
		x: f64,
		y: f64,
		radius: f64,
		fill: String,
		stroke: Option<(String, f64)>,
	},
	Text {
		x: f64,
		y: f64,
		content: String,
		size: f64,
		color: String,
	},
}

/// A fully resolved vector scene, ready to paint in a single ordered pass.
#[derive(Clone, Debug, Default)]
pub struct Scene {
	pub width: f64,
	pub height: f64,
	pub background: String,
	pub shapes: Vec<Shape>,
}

/// Truncate a label to a character budget, appending an ellipsis.
pub fn truncate_label(label: &str, max: usize) -> String {
	if label.chars().count() <= max {
		return label.to_string();
	}
	let mut out: String = label.chars().take(max).collect();
	out.push('…');
	out
}

/// Stroke width, dash pattern and color for an edge kind.
fn edge_style(kind: &str) -> (f64, Option<(f64, f64)>, &'static str) {
	match kind {
		"primary" => (2.2, None, "rgba(100, 180, 255, 0.9)"),
		"elaborates" => (1.4, Some((4.0, 3.0)), "rgba(100, 180, 255, 0.6)"),
		"cross_link" => (1.2, Some((8.0, 4.0)), "rgba(160, 140, 255, 0.6)"),
		_ => (1.2, None, "rgba(100, 180, 255, 0.5)"),
	}
}

/// Build the vector scene for the current state: edges first, then nodes, so
/// node glyphs paint over edge lines. Edges with unknown endpoints or
/// degenerate geometry are skipped silently.
pub fn build_scene(state: &GraphState) -> Scene {
	let mut scene = Scene {
		width: state.width,
		height: state.height,
		background: BACKGROUND_COLOR.to_string(),
		shapes: Vec::new(),
	};
	push_edges(state, &mut scene.shapes);
	push_nodes(state, &mut scene.shapes);
	scene
}

fn push_edges(state: &GraphState, shapes: &mut Vec<Shape>) {
	for edge in &state.graph.edges {
		let (Some(from_idx), Some(to_idx)) = (
			state.layout.index_of(&edge.from),
			state.layout.index_of(&edge.to),
		) else {
			continue;
		};
		let (Some(from), Some(to)) = (state.layout.get(from_idx), state.layout.get(to_idx)) else {
			continue;
		};
		let (dx, dy) = (to.x - from.x, to.y - from.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);
		let r_from = size_radius(&state.graph.nodes[from_idx].size);
		let r_to = size_radius(&state.graph.nodes[to_idx].size);
		let (width, dash, color) = edge_style(&edge.kind);

		// Trim to the circle boundaries; the arrowhead occupies the last
		// ARROW_SIZE pixels before the destination boundary.
		let (x1, y1) = (from.x + ux * r_from, from.y + uy * r_from);
		let (tip_x, tip_y) = (to.x - ux * r_to, to.y - uy * r_to);
		let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
		shapes.push(Shape::Line {
			x1,
			y1,
			x2: back_x,
			y2: back_y,
			width,
			dash,
			color: color.to_string(),
		});
		let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
		shapes.push(Shape::Polygon {
			points: vec![
				(tip_x, tip_y),
				(back_x + px, back_y + py),
				(back_x - px, back_y - py),
			],
			color: color.to_string(),
		});

		if let Some(label) = edge.label.as_deref().filter(|l| !l.is_empty()) {
			shapes.push(Shape::Text {
				x: (x1 + tip_x) / 2.0,
				y: (y1 + tip_y) / 2.0 - 4.0,
				content: truncate_label(label, EDGE_LABEL_MAX),
				size: LABEL_FONT_SIZE,
				color: EDGE_LABEL_COLOR.to_string(),
			});
		}
	}
}

fn push_nodes(state: &GraphState, shapes: &mut Vec<Shape>) {
	for (i, node) in state.graph.nodes.iter().enumerate() {
		let Some(layout) = state.layout.get(i) else {
			continue;
		};
		let radius = size_radius(&node.size);
		let stroke = (state.selected == Some(i)).then(|| (SELECTION_RING.to_string(), 2.0));
		shapes.push(Shape::Circle {
			x: layout.x,
			y: layout.y,
			radius,
			fill: category_color(&node.category).to_string(),
			stroke,
		});
		if !node.label.is_empty() {
			shapes.push(Shape::Text {
				x: layout.x + radius + 3.0,
				y: layout.y + 3.0,
				content: truncate_label(&node.label, NODE_LABEL_MAX),
				size: LABEL_FONT_SIZE,
				color: NODE_LABEL_COLOR.to_string(),
			});
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::concept_graph::state::GraphState;
	use crate::components::concept_graph::types::{
		ConceptEdge, ConceptGraph, ConceptNode, DEFAULT_NODE_COLOR,
	};

	fn state_with(nodes: Vec<ConceptNode>, edges: Vec<ConceptEdge>) -> GraphState {
		GraphState::new(ConceptGraph { nodes, edges }, 800.0, 600.0)
	}

	fn node(id: &str, size: &str) -> ConceptNode {
		ConceptNode {
			id: id.into(),
			label: id.into(),
			size: size.into(),
			..Default::default()
		}
	}

	#[test]
	fn edge_endpoints_offset_by_node_radii() {
		let mut state = state_with(
			vec![node("a", "large"), node("b", "small")],
			vec![ConceptEdge {
				from: "a".into(),
				to: "b".into(),
				kind: "primary".into(),
				..Default::default()
			}],
		);
		state.layout.set_position(0, 100.0, 300.0);
		state.layout.set_position(1, 500.0, 300.0);
		let scene = build_scene(&state);

		// Line leaves the source boundary (radius 32 for "large").
		let line = scene
			.shapes
			.iter()
			.find_map(|s| match s {
				Shape::Line { x1, y1, x2, y2, .. } => Some((*x1, *y1, *x2, *y2)),
				_ => None,
			})
			.unwrap();
		assert_eq!((line.0, line.1), (132.0, 300.0));

		// Arrow tip sits exactly on the destination boundary (radius 16).
		let arrow = scene
			.shapes
			.iter()
			.find_map(|s| match s {
				Shape::Polygon { points, .. } => Some(points.clone()),
				_ => None,
			})
			.unwrap();
		assert_eq!(arrow[0], (484.0, 300.0));
		// The line stops where the arrowhead begins.
		assert_eq!((line.2, line.3), (476.0, 300.0));
	}

	#[test]
	fn edges_with_unknown_endpoints_are_skipped() {
		let state = state_with(
			vec![node("a", "medium")],
			vec![ConceptEdge {
				from: "a".into(),
				to: "ghost".into(),
				..Default::default()
			}],
		);
		let scene = build_scene(&state);
		assert!(
			!scene
				.shapes
				.iter()
				.any(|s| matches!(s, Shape::Line { .. } | Shape::Polygon { .. }))
		);
		// The node itself still renders.
		assert!(scene.shapes.iter().any(|s| matches!(s, Shape::Circle { .. })));
	}

	#[test]
	fn coincident_endpoints_omit_the_edge() {
		let mut state = state_with(
			vec![node("a", "small"), node("b", "small")],
			vec![ConceptEdge {
				from: "a".into(),
				to: "b".into(),
				..Default::default()
			}],
		);
		state.layout.set_position(0, 400.0, 300.0);
		state.layout.set_position(1, 400.0, 300.0);
		let scene = build_scene(&state);
		assert!(!scene.shapes.iter().any(|s| matches!(s, Shape::Line { .. })));
	}

	#[test]
	fn labels_are_truncated() {
		assert_eq!(truncate_label("short", NODE_LABEL_MAX), "short");
		let long = "a very long concept label indeed";
		let cut = truncate_label(long, NODE_LABEL_MAX);
		assert_eq!(cut.chars().count(), NODE_LABEL_MAX + 1);
		assert!(cut.ends_with('…'));
	}

	#[test]
	fn unknown_category_renders_with_default_fill() {
		let mut n = node("a", "medium");
		n.category = "novel".into();
		let scene = build_scene(&state_with(vec![n], vec![]));
		let fill = scene
			.shapes
			.iter()
			.find_map(|s| match s {
				Shape::Circle { fill, .. } => Some(fill.clone()),
				_ => None,
			})
			.unwrap();
		assert_eq!(fill, DEFAULT_NODE_COLOR);
	}

	#[test]
	fn selected_node_gets_a_ring() {
		let mut state = state_with(vec![node("a", "medium")], vec![]);
		state.selected = Some(0);
		let scene = build_scene(&state);
		let stroke = scene.shapes.iter().find_map(|s| match s {
			Shape::Circle { stroke, .. } => stroke.clone(),
			_ => None,
		});
		assert!(stroke.is_some());
	}
}
