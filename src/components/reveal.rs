//! Fade-in of content blocks as they scroll into view.

use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

/// Blocks that fade in on first appearance.
pub const FADE_TARGETS: &str = ".section-header, .about-text, .about-values, .timeline-item, \
	.competency-card, .education-card, .contact-info, .contact-form";

/// Class set on `<body>` once the page has rendered, for entry transitions.
pub const LOADED_CLASS: &str = "loaded";

/// Fraction of a block that must be visible before it is revealed.
const REVEAL_THRESHOLD: f64 = 0.1;
/// Reveal slightly before blocks reach the bottom edge.
const REVEAL_MARGIN: &str = "0px 0px -50px 0px";

/// Mark every fade target and reveal each once it enters the viewport.
///
/// Does nothing when the visitor prefers reduced motion; the blocks then stay
/// in their normal, fully visible state.
pub fn init_fade_in() {
	let Some(window) = web_sys::window() else {
		return;
	};
	if super::prefers_reduced_motion(&window) {
		debug!("bokeh-folio: reduced motion preferred, skipping fade-ins");
		return;
	}
	let Some(list) = window
		.document()
		.and_then(|d| d.query_selector_all(FADE_TARGETS).ok())
	else {
		return;
	};

	let on_intersect = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
		|entries: js_sys::Array, observer: IntersectionObserver| {
			for entry in entries
				.iter()
				.filter_map(|e| e.dyn_into::<IntersectionObserverEntry>().ok())
				.filter(|e| e.is_intersecting())
			{
				let target = entry.target();
				let _ = target.class_list().add_1("visible");
				observer.unobserve(&target);
			}
		},
	);

	let options = IntersectionObserverInit::new();
	options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
	options.set_root_margin(REVEAL_MARGIN);
	let Ok(observer) =
		IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &options)
	else {
		return;
	};
	// The observer lives as long as the page.
	on_intersect.forget();

	let elements: Vec<Element> = (0..list.length())
		.filter_map(|i| list.item(i))
		.filter_map(|node| node.dyn_into::<Element>().ok())
		.collect();
	for el in &elements {
		let _ = el.class_list().add_1("fade-in");
		observer.observe(el);
	}
	debug!("bokeh-folio: observing {} fade-in blocks", elements.len());
}

/// Flag the body as loaded so CSS entry transitions can run.
pub fn mark_loaded() {
	if let Some(body) = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.body())
	{
		let _ = body.class_list().add_1(LOADED_CLASS);
	}
}
