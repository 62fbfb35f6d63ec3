use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::__reexports::send_wrapper::SendWrapper;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::render;
use super::scene;
use super::state::{GraphState, TICK_INTERVAL_MS};
use super::types::{ConceptGraph, ConceptNode};

fn context_of(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

fn draw(state: &GraphState, ctx: &CanvasRenderingContext2d) {
	render::render(&scene::build_scene(state), ctx);
}

/// Interactive force-directed concept map.
///
/// Runs the layout simulation on a fixed 50 ms timer for a bounded window,
/// then keeps the scene static apart from drag interaction. The timer is
/// cleared on settle, on re-initialization and on unmount.
#[component]
pub fn ConceptGraphCanvas(
	#[prop(into)] data: Signal<ConceptGraph>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(default = None)] on_select: Option<Callback<Option<ConceptNode>>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<GraphState>>> = Rc::new(RefCell::new(None));
	let tick_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let interval_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
	let (state_init, tick_cb_init, interval_init) =
		(state.clone(), tick_cb.clone(), interval_id.clone());

	Effect::new(move |_| {
		let graph = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let w = width.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_width() as f64)
				.filter(|w| *w > 0.0)
				.unwrap_or(800.0)
		});
		let h = height.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_height() as f64)
				.filter(|h| *h > 0.0)
				.unwrap_or(600.0)
		});
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = context_of(&canvas) else {
			return;
		};
		*state_init.borrow_mut() = Some(GraphState::new(graph, w, h));

		// A data change re-runs this effect; the old timer must not outlive
		// the state it was driving.
		if let Some(id) = interval_init.take() {
			window.clear_interval_with_handle(id);
		}

		let (state_tick, interval_tick) = (state_init.clone(), interval_init.clone());
		*tick_cb_init.borrow_mut() = Some(Closure::new(move || {
			let mut done = false;
			if let Some(ref mut s) = *state_tick.borrow_mut() {
				s.tick();
				draw(s, &ctx);
				done = !s.animation_running && !s.drag.active;
			}
			if done {
				if let Some(id) = interval_tick.take() {
					web_sys::window().unwrap().clear_interval_with_handle(id);
				}
			}
		}));
		if let Some(ref cb) = *tick_cb_init.borrow() {
			let id = window
				.set_interval_with_callback_and_timeout_and_arguments_0(
					cb.as_ref().unchecked_ref(),
					TICK_INTERVAL_MS,
				)
				.unwrap();
			interval_init.set(Some(id));
		}
	});

	let interval_cleanup = SendWrapper::new(interval_id.clone());
	let tick_cb_cleanup = SendWrapper::new(tick_cb.clone());
	on_cleanup(move || {
		if let Some(id) = (*interval_cleanup).take() {
			if let Some(window) = web_sys::window() {
				window.clear_interval_with_handle(id);
			}
		}
		tick_cb_cleanup.borrow_mut().take();
	});

	let pointer_of = move |ev: &MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		)
	};

	let notify = move |state: &GraphState| {
		if let Some(cb) = on_select {
			cb.run(state.selected_node().cloned());
		}
	};

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let (x, y) = pointer_of(&ev);
		if let Some(ref mut s) = *state_md.borrow_mut() {
			if s.pointer_down(x, y) {
				notify(s);
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let (x, y) = pointer_of(&ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.drag.active {
				s.pointer_move(x, y);
				// Keep the dragged node tracking the pointer even after the
				// simulation timer has stopped.
				let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
				if let Some(ctx) = context_of(&canvas) {
					draw(s, &ctx);
				}
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			if s.pointer_up() {
				notify(s);
			}
			let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
			if let Some(ctx) = context_of(&canvas) {
				draw(s, &ctx);
			}
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_cancel();
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="concept-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			style="display: block; cursor: grab;"
		/>
	}
}
