//! Leptos component hosting the bokeh canvas inside the hero region.
//!
//! The component mounts an absolutely positioned canvas in its parent element,
//! builds the [`PageLifecycle`] once the canvas exists, and connects the
//! browser callbacks (animation frames, observers, document visibility) to it.
//! Callbacks hold only weak handles, so dropping the component releases the
//! engine, which cancels its frame and disconnects its observers, and removes
//! the document listener.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement};

use super::engine::{BokehEngine, PageLifecycle};
use super::types::{BokehConfig, EngineEvent};
use super::web::{CanvasSurface, HostCallbacks, WebHost};

type Page = PageLifecycle<WebHost, CanvasSurface>;
type SharedPage = Rc<RefCell<Option<Page>>>;

/// Renders the animated bokeh background into its parent element.
///
/// The parent is the host region: the canvas follows its layout box, pauses
/// while it is scrolled out of view, and stops while the document is hidden.
#[component]
pub fn BokehCanvas(#[prop(optional)] config: Option<BokehConfig>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let page: SharedPage = Rc::new(RefCell::new(None));
	let visibility: Rc<RefCell<Option<DocumentListener>>> = Rc::new(RefCell::new(None));
	let config = config.unwrap_or_default();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if page.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();

		let lifecycle = build_lifecycle(canvas, &config, Rc::downgrade(&page));
		*page.borrow_mut() = Some(lifecycle);
		if let Some(ref mut lifecycle) = *page.borrow_mut() {
			lifecycle.on_ready();
		}

		*visibility.borrow_mut() = watch_visibility(Rc::downgrade(&page));
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="bokeh-canvas"
			aria-hidden="true"
			style="position: absolute; inset: 0; display: block; pointer-events: none;"
		/>
	}
}

/// Run `f` against the lifecycle if it is still alive and not already borrowed.
fn with_page(handle: &Weak<RefCell<Option<Page>>>, f: impl FnOnce(&mut Page)) {
	let Some(shared) = handle.upgrade() else {
		return;
	};
	let Ok(mut guard) = shared.try_borrow_mut() else {
		return;
	};
	if let Some(page) = guard.as_mut() {
		f(page);
	}
}

/// Wire the engine to the canvas, its parent and the window. Any missing piece
/// yields an inert lifecycle.
fn build_lifecycle(
	canvas: HtmlCanvasElement,
	config: &BokehConfig,
	handle: Weak<RefCell<Option<Page>>>,
) -> Page {
	let Some(window) = web_sys::window() else {
		warn!("bokeh-folio: no window, animation disabled");
		return PageLifecycle::inert();
	};
	let Some(region) = canvas.parent_element() else {
		warn!("bokeh-folio: canvas has no host region, animation disabled");
		return PageLifecycle::inert();
	};
	let Some(surface) = CanvasSurface::new(canvas) else {
		warn!("bokeh-folio: 2d context unavailable, animation disabled");
		return PageLifecycle::inert();
	};

	let callbacks = HostCallbacks::new(move |event: EngineEvent| {
		with_page(&handle, |page| page.dispatch(event));
	});
	let host = WebHost::new(window, region, callbacks, config.visibility_threshold);
	let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;

	PageLifecycle::new(BokehEngine::new(host, surface, config.clone(), seed))
}

/// A document event listener that unregisters itself when dropped.
struct DocumentListener {
	document: Document,
	event: &'static str,
	callback: Closure<dyn FnMut()>,
}

impl Drop for DocumentListener {
	fn drop(&mut self) {
		let _ = self
			.document
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}

/// Stop the engine while the document is hidden and restart it when shown.
fn watch_visibility(handle: Weak<RefCell<Option<Page>>>) -> Option<DocumentListener> {
	let document = web_sys::window()?.document()?;
	let callback = Closure::<dyn FnMut()>::new(move || {
		let hidden = web_sys::window()
			.and_then(|w| w.document())
			.is_some_and(|d| d.hidden());
		info!("bokeh-folio: document {}", if hidden { "hidden" } else { "visible" });
		with_page(&handle, |page| page.on_visibility_change(hidden));
	});
	document
		.add_event_listener_with_callback("visibilitychange", callback.as_ref().unchecked_ref())
		.ok()?;
	Some(DocumentListener {
		document,
		event: "visibilitychange",
		callback,
	})
}
