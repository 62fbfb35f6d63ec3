mod component;
mod layout;
mod render;
mod scene;
mod state;
mod types;

pub use component::ConceptGraphCanvas;
pub use types::{ConceptEdge, ConceptGraph, ConceptNode};
