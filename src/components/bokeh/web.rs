//! Browser adapters: the [`Host`] and [`Surface`] implementations backed by
//! `web_sys`.

use std::f64::consts::PI;

use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasGradient, CanvasRenderingContext2d, Element, HtmlCanvasElement, IntersectionObserver,
	IntersectionObserverEntry, IntersectionObserverInit, ResizeObserver, Window,
};

use super::engine::Host;
use super::render::{ColorStop, Surface};
use super::theme::Color;
use super::types::{EngineEvent, FrameHandle, Size};

/// JS callbacks handed to `requestAnimationFrame` and the observers.
///
/// Each one forwards an [`EngineEvent`] to the sink it was built with.
pub struct HostCallbacks {
	frame: Closure<dyn FnMut(f64)>,
	resize: Closure<dyn FnMut(js_sys::Array)>,
	intersect: Closure<dyn FnMut(js_sys::Array)>,
}

impl HostCallbacks {
	pub fn new(sink: impl Fn(EngineEvent) + Clone + 'static) -> Self {
		let (frame_sink, resize_sink, intersect_sink) = (sink.clone(), sink.clone(), sink);
		Self {
			frame: Closure::new(move |timestamp: f64| {
				frame_sink(EngineEvent::Frame { timestamp });
			}),
			resize: Closure::new(move |_entries: js_sys::Array| {
				resize_sink(EngineEvent::Resized);
			}),
			intersect: Closure::new(move |entries: js_sys::Array| {
				// Only the latest entry reflects the current state.
				let latest = entries
					.iter()
					.filter_map(|e| e.dyn_into::<IntersectionObserverEntry>().ok())
					.last();
				if let Some(entry) = latest {
					let ratio = if entry.is_intersecting() {
						entry.intersection_ratio()
					} else {
						0.0
					};
					intersect_sink(EngineEvent::Intersection { ratio });
				}
			}),
		}
	}
}

/// [`Host`] over the browser window and the hero element.
pub struct WebHost {
	window: Window,
	region: Element,
	callbacks: HostCallbacks,
	visibility_threshold: f64,
	resize_observer: Option<ResizeObserver>,
	intersection_observer: Option<IntersectionObserver>,
}

impl WebHost {
	pub fn new(
		window: Window,
		region: Element,
		callbacks: HostCallbacks,
		visibility_threshold: f64,
	) -> Self {
		Self {
			window,
			region,
			callbacks,
			visibility_threshold,
			resize_observer: None,
			intersection_observer: None,
		}
	}

	fn observe_resize(&self) -> Option<ResizeObserver> {
		let observer = ResizeObserver::new(self.callbacks.resize.as_ref().unchecked_ref()).ok()?;
		observer.observe(&self.region);
		Some(observer)
	}

	fn observe_intersection(&self) -> Option<IntersectionObserver> {
		let options = IntersectionObserverInit::new();
		options.set_threshold(&JsValue::from_f64(self.visibility_threshold));
		let observer = IntersectionObserver::new_with_options(
			self.callbacks.intersect.as_ref().unchecked_ref(),
			&options,
		)
		.ok()?;
		observer.observe(&self.region);
		Some(observer)
	}
}

impl Host for WebHost {
	fn measure(&self) -> Option<Size> {
		let rect = self.region.get_bounding_client_rect();
		Some(Size::new(rect.width(), rect.height())).filter(|s| s.is_drawable())
	}

	fn device_pixel_ratio(&self) -> f64 {
		self.window.device_pixel_ratio()
	}

	fn prefers_reduced_motion(&self) -> bool {
		crate::components::prefers_reduced_motion(&self.window)
	}

	fn now(&self) -> f64 {
		self.window.performance().map_or(0.0, |p| p.now())
	}

	fn request_frame(&mut self) -> Option<FrameHandle> {
		self.window
			.request_animation_frame(self.callbacks.frame.as_ref().unchecked_ref())
			.ok()
			.map(FrameHandle)
	}

	fn cancel_frame(&mut self, handle: FrameHandle) {
		let _ = self.window.cancel_animation_frame(handle.0);
	}

	fn observe(&mut self) -> bool {
		self.resize_observer = self.observe_resize();
		self.intersection_observer = self.observe_intersection();
		self.resize_observer.is_some() || self.intersection_observer.is_some()
	}

	fn disconnect(&mut self) {
		if let Some(observer) = self.resize_observer.take() {
			observer.disconnect();
		}
		if let Some(observer) = self.intersection_observer.take() {
			observer.disconnect();
		}
	}
}

/// [`Surface`] over a 2D canvas context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	/// Acquire the 2D context of `canvas`, if the browser provides one.
	pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
		let ctx = canvas
			.get_context("2d")
			.ok()
			.flatten()?
			.dyn_into::<CanvasRenderingContext2d>()
			.ok()?;
		Some(Self { canvas, ctx })
	}

	fn apply_stops(gradient: &CanvasGradient, stops: &[ColorStop]) {
		for stop in stops {
			let _ = gradient.add_color_stop(stop.offset as f32, &stop.color.to_css());
		}
	}
}

impl Surface for CanvasSurface {
	fn resize(&mut self, size: Size, pixel_ratio: f64) {
		self.canvas.set_width((size.width * pixel_ratio).round() as u32);
		self.canvas.set_height((size.height * pixel_ratio).round() as u32);

		let style = self.canvas.style();
		let _ = style.set_property("width", &format!("{}px", size.width));
		let _ = style.set_property("height", &format!("{}px", size.height));

		// Resizing resets the context, so the scale is reapplied every time.
		let _ = self.ctx.set_transform(pixel_ratio, 0.0, 0.0, pixel_ratio, 0.0, 0.0);
	}

	fn clear(&mut self, size: Size) {
		self.ctx.clear_rect(0.0, 0.0, size.width, size.height);
	}

	fn fill_radial(&mut self, x: f64, y: f64, radius: f64, stops: &[ColorStop]) {
		if radius <= 0.0 {
			return;
		}
		let Ok(gradient) = self.ctx.create_radial_gradient(x, y, 0.0, x, y, radius) else {
			return;
		};
		Self::apply_stops(&gradient, stops);

		self.ctx.begin_path();
		let _ = self.ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		#[allow(deprecated)]
		self.ctx.set_fill_style(&gradient);
		self.ctx.fill();
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64) {
		self.ctx.set_stroke_style_str(&color.to_css());
		self.ctx.set_line_width(width);
		self.ctx.begin_path();
		self.ctx.move_to(from.0, from.1);
		self.ctx.line_to(to.0, to.1);
		self.ctx.stroke();
	}

	fn fill_linear(&mut self, size: Size, from: (f64, f64), to: (f64, f64), stops: &[ColorStop]) {
		let gradient = self.ctx.create_linear_gradient(from.0, from.1, to.0, to.1);
		Self::apply_stops(&gradient, stops);

		#[allow(deprecated)]
		self.ctx.set_fill_style(&gradient);
		self.ctx.fill_rect(0.0, 0.0, size.width, size.height);
	}
}
