use log::info;

use super::layout::LayoutEngine;
use super::types::{ConceptGraph, ConceptNode, size_radius};

/// Wall-clock period of the simulation timer.
pub const TICK_INTERVAL_MS: i32 = 50;
/// Hard stop for the simulation (3 s at the 50 ms tick rate).
pub const MAX_TICKS: u32 = 60;
/// The layout counts as settled once kinetic energy drops below this.
const SETTLE_ENERGY: f64 = 0.05;

/// Minimum hit-test radius so small nodes stay grabbable.
pub const MIN_HIT_RADIUS: f64 = 12.0;
/// Pointer travel below this between press and release counts as a click.
const CLICK_SLOP: f64 = 4.0;

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub moved: bool,
}

/// All per-display-session state for the concept map: the immutable payload,
/// the engine-owned layout arena, drag bookkeeping and the current selection.
pub struct GraphState {
	pub graph: ConceptGraph,
	pub layout: LayoutEngine,
	pub drag: DragState,
	pub selected: Option<usize>,
	pub width: f64,
	pub height: f64,
	pub ticks: u32,
	pub animation_running: bool,
}

impl GraphState {
	pub fn new(graph: ConceptGraph, width: f64, height: f64) -> Self {
		info!(
			"concept map loaded: {} nodes, {} edges",
			graph.nodes.len(),
			graph.edges.len()
		);
		let layout = LayoutEngine::new(&graph, width, height);
		Self {
			graph,
			layout,
			drag: DragState::default(),
			selected: None,
			width,
			height,
			ticks: 0,
			animation_running: true,
		}
	}

	/// The topmost node under the pointer, if any.
	pub fn node_at_position(&self, x: f64, y: f64) -> Option<usize> {
		let mut found = None;
		for (i, node) in self.graph.nodes.iter().enumerate() {
			let Some(layout) = self.layout.get(i) else {
				continue;
			};
			let (dx, dy) = (layout.x - x, layout.y - y);
			let hit = size_radius(&node.size).max(MIN_HIT_RADIUS);
			if (dx * dx + dy * dy).sqrt() < hit {
				found = Some(i);
			}
		}
		found
	}

	/// Advance the simulation by one tick; stops on the tick budget or once
	/// the layout has settled.
	pub fn tick(&mut self) {
		if !self.animation_running {
			return;
		}
		self.layout.step();
		self.ticks += 1;
		if self.ticks >= MAX_TICKS || self.layout.kinetic_energy() < SETTLE_ENERGY {
			self.animation_running = false;
			info!("layout settled after {} ticks", self.ticks);
		}
	}

	/// Press: start dragging a hit node, or clear the selection on empty
	/// space. Returns true if the selection changed.
	pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
		if let Some(i) = self.node_at_position(x, y) {
			self.drag = DragState {
				active: true,
				node: Some(i),
				start_x: x,
				start_y: y,
				moved: false,
			};
			self.layout.begin_drag(i);
			false
		} else {
			let changed = self.selected.is_some();
			self.selected = None;
			changed
		}
	}

	/// Move: while a drag is active the dragged node follows the pointer
	/// exactly; every other node keeps simulating.
	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			return;
		}
		let Some(i) = self.drag.node else {
			return;
		};
		let (dx, dy) = (x - self.drag.start_x, y - self.drag.start_y);
		if (dx * dx + dy * dy).sqrt() > CLICK_SLOP {
			self.drag.moved = true;
		}
		self.layout.drag_to(i, x, y);
	}

	/// Release: end the drag (velocity reset happens in the engine); a press
	/// that never moved past the slop selects the node instead. Returns true
	/// if the selection changed.
	pub fn pointer_up(&mut self) -> bool {
		let mut changed = false;
		if self.drag.active {
			if let Some(i) = self.drag.node {
				self.layout.end_drag(i);
				if !self.drag.moved && self.selected != Some(i) {
					self.selected = Some(i);
					changed = true;
				}
			}
		}
		self.drag = DragState::default();
		changed
	}

	/// Cancel any in-flight drag, e.g. when the pointer leaves the canvas.
	pub fn pointer_cancel(&mut self) {
		if self.drag.active {
			if let Some(i) = self.drag.node {
				self.layout.end_drag(i);
			}
		}
		self.drag = DragState::default();
	}

	pub fn selected_node(&self) -> Option<&ConceptNode> {
		self.graph.nodes.get(self.selected?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::concept_graph::types::{ConceptEdge, ConceptNode};

	fn two_node_state() -> GraphState {
		let graph = ConceptGraph {
			nodes: vec![
				ConceptNode {
					id: "central".into(),
					label: "Central".into(),
					category: "central".into(),
					size: "large".into(),
					..Default::default()
				},
				ConceptNode {
					id: "key".into(),
					label: "Key".into(),
					category: "key".into(),
					size: "medium".into(),
					..Default::default()
				},
			],
			edges: vec![ConceptEdge {
				from: "central".into(),
				to: "key".into(),
				kind: "primary".into(),
				..Default::default()
			}],
		};
		let mut state = GraphState::new(graph, 800.0, 600.0);
		state.layout.set_position(0, 200.0, 300.0);
		state.layout.set_position(1, 600.0, 300.0);
		state
	}

	#[test]
	fn click_without_movement_selects() {
		let mut state = two_node_state();
		assert!(!state.pointer_down(200.0, 300.0));
		assert!(state.pointer_up());
		assert_eq!(state.selected_node().unwrap().id, "central");
		// Pressing empty space clears the selection.
		assert!(state.pointer_down(400.0, 100.0));
		assert!(state.selected.is_none());
	}

	#[test]
	fn drag_moves_node_without_selecting() {
		let mut state = two_node_state();
		state.pointer_down(200.0, 300.0);
		state.pointer_move(260.0, 340.0);
		assert_eq!(state.layout.position("central"), Some((260.0, 340.0)));
		assert!(!state.pointer_up());
		assert!(state.selected.is_none());
		let released = state.layout.get(0).unwrap();
		assert_eq!((released.vx, released.vy), (0.0, 0.0));
	}

	#[test]
	fn other_nodes_keep_simulating_during_drag() {
		let mut state = two_node_state();
		state.pointer_down(200.0, 300.0);
		state.pointer_move(100.0, 100.0);
		let before = state.layout.position("key").unwrap();
		state.tick();
		let after = state.layout.position("key").unwrap();
		assert_ne!(before, after);
		assert_eq!(state.layout.position("central"), Some((100.0, 100.0)));
	}

	#[test]
	fn simulation_stops_at_tick_budget() {
		let mut state = two_node_state();
		for _ in 0..(MAX_TICKS * 2) {
			state.tick();
		}
		assert!(!state.animation_running);
		assert!(state.ticks <= MAX_TICKS);
	}

	#[test]
	fn settled_layout_stops_early() {
		let graph = ConceptGraph {
			nodes: vec![ConceptNode {
				id: "only".into(),
				..Default::default()
			}],
			edges: vec![],
		};
		let mut state = GraphState::new(graph, 800.0, 600.0);
		// A lone node at the exact center feels no net force.
		state.layout.set_position(0, 400.0, 300.0);
		state.tick();
		assert!(!state.animation_running);
		assert!(state.ticks < MAX_TICKS);
	}

	#[test]
	fn run_to_completion_stays_in_bounds() {
		let mut state = two_node_state();
		while state.animation_running {
			state.tick();
		}
		for i in 0..state.layout.len() {
			let n = state.layout.get(i).unwrap();
			assert!(n.x >= 50.0 && n.x <= 750.0);
			assert!(n.y >= 50.0 && n.y <= 550.0);
		}
	}
}
