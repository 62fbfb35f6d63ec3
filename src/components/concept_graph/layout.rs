use std::collections::HashMap;
use std::f64::consts::PI;

use super::types::ConceptGraph;

/// Repulsion magnitude is `REPULSION_STRENGTH / d²` for nodes within range.
pub const REPULSION_STRENGTH: f64 = 500.0;
/// Nodes farther apart than this exert no repulsion on each other.
pub const REPULSION_RANGE: f64 = 120.0;
/// Constant pull applied along edges longer than the rest length.
pub const ATTRACTION_STRENGTH: f64 = 0.1;
/// Edges shorter than this exert no attraction (prevents collapse).
pub const EDGE_REST_LENGTH: f64 = 100.0;
/// Proportional pull toward the viewport center.
pub const CENTERING_FACTOR: f64 = 0.01;
/// Velocity carried over between ticks.
pub const VELOCITY_DECAY: f64 = 0.8;
/// Force-to-velocity gain per tick.
pub const FORCE_GAIN: f64 = 0.1;
/// Positions are clamped this far inside the viewport edges.
pub const VIEWPORT_MARGIN: f64 = 50.0;

const INITIAL_RING_FACTOR: f64 = 0.35;
const JITTER: f64 = 20.0;

/// Deterministic pseudo-random source for the initial jitter.
struct Lcg(u64);

impl Lcg {
	fn new(seed: u64) -> Self {
		Self(seed)
	}

	/// Next value in `[0, 1)`.
	fn next_f64(&mut self) -> f64 {
		self.0 = (self.0.wrapping_mul(9301).wrapping_add(49297)) % 233280;
		self.0 as f64 / 233280.0
	}
}

/// Simulated state for one node. The concept payload itself stays immutable;
/// position and velocity live here, owned by the engine.
#[derive(Clone, Debug, Default)]
pub struct NodeLayout {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// While pinned (dragged) the node is excluded from force integration.
	pub pinned: bool,
}

/// Force-directed layout over a concept graph.
///
/// Layout state is a parallel arena indexed like the graph's node list, with
/// an id lookup for edge resolution and hit testing. Edges referencing
/// unknown ids are dropped at construction.
pub struct LayoutEngine {
	nodes: Vec<NodeLayout>,
	index: HashMap<String, usize>,
	edges: Vec<(usize, usize)>,
	width: f64,
	height: f64,
}

impl LayoutEngine {
	/// Lay the nodes out on a ring with the default jitter seed.
	pub fn new(graph: &ConceptGraph, width: f64, height: f64) -> Self {
		Self::with_seed(graph, width, height, graph.nodes.len() as u64)
	}

	/// Same as [`LayoutEngine::new`] with an explicit jitter seed; the same
	/// graph and seed always reproduce the same initial placement.
	pub fn with_seed(graph: &ConceptGraph, width: f64, height: f64, seed: u64) -> Self {
		let n = graph.nodes.len();
		let (cx, cy) = (width / 2.0, height / 2.0);
		let ring = INITIAL_RING_FACTOR * width.min(height);
		let mut rng = Lcg::new(seed);

		let mut nodes = Vec::with_capacity(n);
		let mut index = HashMap::with_capacity(n);
		for (i, node) in graph.nodes.iter().enumerate() {
			let angle = 2.0 * PI * i as f64 / n.max(1) as f64;
			nodes.push(NodeLayout {
				x: cx + ring * angle.cos() + (rng.next_f64() * 2.0 - 1.0) * JITTER,
				y: cy + ring * angle.sin() + (rng.next_f64() * 2.0 - 1.0) * JITTER,
				vx: 0.0,
				vy: 0.0,
				pinned: false,
			});
			index.insert(node.id.clone(), i);
		}

		let edges = graph
			.edges
			.iter()
			.filter_map(|e| Some((*index.get(&e.from)?, *index.get(&e.to)?)))
			.collect();

		Self {
			nodes,
			index,
			edges,
			width,
			height,
		}
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	pub fn get(&self, i: usize) -> Option<&NodeLayout> {
		self.nodes.get(i)
	}

	/// Position of the node with the given id, if it exists in the arena.
	pub fn position(&self, id: &str) -> Option<(f64, f64)> {
		let node = &self.nodes[self.index_of(id)?];
		Some((node.x, node.y))
	}

	pub fn set_position(&mut self, i: usize, x: f64, y: f64) {
		if let Some(node) = self.nodes.get_mut(i) {
			node.x = x;
			node.y = y;
		}
	}

	/// Exclude a node from force integration while it is being dragged.
	pub fn begin_drag(&mut self, i: usize) {
		if let Some(node) = self.nodes.get_mut(i) {
			node.pinned = true;
		}
	}

	/// Track the pointer exactly, overriding any simulated motion.
	pub fn drag_to(&mut self, i: usize, x: f64, y: f64) {
		self.set_position(i, x, y);
	}

	/// Release a dragged node back to the simulation with no residual momentum.
	pub fn end_drag(&mut self, i: usize) {
		if let Some(node) = self.nodes.get_mut(i) {
			node.pinned = false;
			node.vx = 0.0;
			node.vy = 0.0;
		}
	}

	/// Total kinetic energy, used to detect a settled layout.
	pub fn kinetic_energy(&self) -> f64 {
		self.nodes.iter().map(|n| n.vx * n.vx + n.vy * n.vy).sum()
	}

	/// Advance the simulation by one tick.
	///
	/// Explicit-Euler with damped velocity accumulation; stability depends on
	/// the constants above staying fixed together with the tick rate.
	pub fn step(&mut self) {
		let n = self.nodes.len();
		let (cx, cy) = (self.width / 2.0, self.height / 2.0);
		let mut forces = vec![(0.0f64, 0.0f64); n];

		for i in 0..n {
			if self.nodes[i].pinned {
				continue;
			}
			let (x, y) = (self.nodes[i].x, self.nodes[i].y);
			let (mut fx, mut fy) = (0.0, 0.0);

			// Bounded-range repulsion, not true n-body gravity.
			for j in 0..n {
				if j == i {
					continue;
				}
				let (dx, dy) = (x - self.nodes[j].x, y - self.nodes[j].y);
				let d2 = dx * dx + dy * dy;
				let d = d2.sqrt();
				if d < 1e-6 || d >= REPULSION_RANGE {
					continue;
				}
				let f = REPULSION_STRENGTH / d2;
				fx += dx / d * f;
				fy += dy / d * f;
			}

			// Constant-magnitude attraction along edges past rest length.
			for &(a, b) in &self.edges {
				let other = match (a == i, b == i) {
					(true, _) => b,
					(_, true) => a,
					_ => continue,
				};
				let (dx, dy) = (self.nodes[other].x - x, self.nodes[other].y - y);
				let d = (dx * dx + dy * dy).sqrt();
				if d <= EDGE_REST_LENGTH {
					continue;
				}
				fx += dx / d * ATTRACTION_STRENGTH;
				fy += dy / d * ATTRACTION_STRENGTH;
			}

			fx += (cx - x) * CENTERING_FACTOR;
			fy += (cy - y) * CENTERING_FACTOR;
			forces[i] = (fx, fy);
		}

		let x_max = (self.width - VIEWPORT_MARGIN).max(VIEWPORT_MARGIN);
		let y_max = (self.height - VIEWPORT_MARGIN).max(VIEWPORT_MARGIN);
		for (node, &(fx, fy)) in self.nodes.iter_mut().zip(&forces) {
			if node.pinned {
				continue;
			}
			node.vx = VELOCITY_DECAY * node.vx + FORCE_GAIN * fx;
			node.vy = VELOCITY_DECAY * node.vy + FORCE_GAIN * fy;
			node.x = (node.x + node.vx).clamp(VIEWPORT_MARGIN, x_max);
			node.y = (node.y + node.vy).clamp(VIEWPORT_MARGIN, y_max);
		}
	}
}
