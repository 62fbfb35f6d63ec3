use leptos::prelude::*;
use log::error;

use crate::components::concept_graph::{ConceptGraph, ConceptGraphCanvas, ConceptNode};

/// Sample concept map in the JSON shape the summarization backend returns.
const SAMPLE_GRAPH: &str = r#"{
	"nodes": [
		{"id": "central", "label": "Photosynthesis", "type": "central", "description": "How plants convert light energy into chemical energy", "size": "large"},
		{"id": "key1", "label": "Light Reactions", "type": "key", "description": "Capture light energy in the thylakoid membranes", "size": "medium"},
		{"id": "key2", "label": "Calvin Cycle", "type": "key", "description": "Fixes carbon dioxide into sugars in the stroma", "size": "medium"},
		{"id": "support1", "label": "Chlorophyll", "type": "support", "description": "Pigment that absorbs red and blue light", "size": "small"},
		{"id": "support2", "label": "ATP and NADPH", "type": "support", "description": "Energy carriers produced by the light reactions", "size": "small"},
		{"id": "application1", "label": "Crop Yields", "type": "application", "description": "Optimizing light exposure to improve harvests", "size": "small"},
		{"id": "bridge1", "label": "Cellular Respiration", "type": "bridge", "description": "Consumes the sugars photosynthesis produces", "size": "small"}
	],
	"edges": [
		{"from": "central", "to": "key1", "label": "begins with", "type": "primary"},
		{"from": "central", "to": "key2", "label": "completes in", "type": "primary"},
		{"from": "key1", "to": "support1", "label": "powered by", "type": "elaborates"},
		{"from": "key1", "to": "support2", "label": "produces", "type": "elaborates"},
		{"from": "support2", "to": "key2", "label": "fuels", "type": "cross_link"},
		{"from": "key2", "to": "application1", "label": "applied in", "type": "implements"},
		{"from": "central", "to": "bridge1", "label": "paired with", "type": "cross_link"}
	]
}"#;

fn sample_graph() -> ConceptGraph {
	ConceptGraph::from_json(SAMPLE_GRAPH).unwrap_or_else(|err| {
		error!("failed to parse sample concept map: {err}");
		ConceptGraph::default()
	})
}

/// Default Home Page: the concept map canvas plus a detail panel for the
/// selected node.
#[component]
pub fn Home() -> impl IntoView {
	let graph = Signal::derive(sample_graph);
	let (selected, set_selected) = signal(None::<ConceptNode>);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="concept-map-page">
				<ConceptGraphCanvas
					data=graph
					on_select=Some(Callback::new(move |node| set_selected.set(node)))
				/>
				<div class="concept-detail">
					{move || match selected.get() {
						Some(node) => {
							view! {
								<h2>{node.label.clone()}</h2>
								<p class="category">{node.category.clone()}</p>
								<p>{node.description.clone().unwrap_or_default()}</p>
							}
								.into_any()
						}
						None => {
							view! { <p class="hint">"Click a concept to see its details. Drag nodes to rearrange the map."</p> }
								.into_any()
						}
					}}
				</div>
			</div>
		</ErrorBoundary>
	}
}
