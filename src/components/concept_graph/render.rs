use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scene::{Scene, Shape};

/// Paint a resolved scene to the canvas in one ordered pass. All geometry is
/// decided in [`super::scene::build_scene`]; this only issues draw calls.
pub fn render(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(&scene.background);
	ctx.fill_rect(0.0, 0.0, scene.width, scene.height);

	for shape in &scene.shapes {
		match shape {
			Shape::Line {
				x1,
				y1,
				x2,
				y2,
				width,
				dash,
				color,
			} => {
				ctx.set_stroke_style_str(color);
				ctx.set_line_width(*width);
				if let Some((on, off)) = dash {
					let _ = ctx.set_line_dash(&js_sys::Array::of2(
						&JsValue::from_f64(*on),
						&JsValue::from_f64(*off),
					));
				}
				ctx.begin_path();
				ctx.move_to(*x1, *y1);
				ctx.line_to(*x2, *y2);
				ctx.stroke();
				if dash.is_some() {
					let _ = ctx.set_line_dash(&js_sys::Array::new());
				}
			}
			Shape::Polygon { points, color } => {
				let Some((first, rest)) = points.split_first() else {
					continue;
				};
				ctx.set_fill_style_str(color);
				ctx.begin_path();
				ctx.move_to(first.0, first.1);
				for (x, y) in rest {
					ctx.line_to(*x, *y);
				}
				ctx.close_path();
				ctx.fill();
			}
			Shape::Circle {
				x,
				y,
				radius,
				fill,
				stroke,
			} => {
				ctx.begin_path();
				let _ = ctx.arc(*x, *y, *radius, 0.0, 2.0 * PI);
				ctx.set_fill_style_str(fill);
				ctx.fill();
				if let Some((color, width)) = stroke {
					ctx.set_stroke_style_str(color);
					ctx.set_line_width(*width);
					ctx.stroke();
				}
			}
			Shape::Text {
				x,
				y,
				content,
				size,
				color,
			} => {
				ctx.set_fill_style_str(color);
				ctx.set_font(&format!("{}px sans-serif", size));
				let _ = ctx.fill_text(content, *x, *y);
			}
		}
	}
}
