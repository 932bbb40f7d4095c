//! Site navigation: scroll styling, mobile menu, smooth in-page scrolling and
//! active-section tracking.

use leptos::ev::MouseEvent;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, KeyboardEvent, ScrollBehavior, ScrollToOptions};

/// Scroll offset past which the bar switches to its compact style.
const SCROLLED_AFTER: f64 = 50.0;
/// Gap kept between the bar and a section scrolled into place.
const SCROLL_GAP: f64 = 20.0;
/// How far below the bar a section must reach to count as current.
const ACTIVE_PROBE: f64 = 100.0;

/// In-page navigation targets, as (section id, label).
pub const LINKS: &[(&str, &str)] = &[
	("about", "About"),
	("experience", "Experience"),
	("expertise", "Expertise"),
	("education", "Education"),
	("contact", "Contact"),
];

/// Vertical extent of a page section.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
	pub id: String,
	pub top: f64,
	pub height: f64,
}

/// Whether the bar should use its compact style.
pub fn is_scrolled(scroll_y: f64) -> bool {
	scroll_y > SCROLLED_AFTER
}

/// Scroll position that places a section just below the bar.
pub fn scroll_target(section_top: f64, nav_height: f64) -> f64 {
	section_top - nav_height - SCROLL_GAP
}

/// Id of the section under the probe line, if any. Later sections win when
/// bounds overlap.
pub fn active_section(scroll_y: f64, nav_height: f64, sections: &[SectionBounds]) -> Option<&str> {
	let probe = scroll_y + nav_height + ACTIVE_PROBE;
	sections
		.iter()
		.rev()
		.find(|s| probe >= s.top && probe < s.top + s.height)
		.map(|s| s.id.as_str())
}

fn measure_sections() -> Vec<SectionBounds> {
	let Some(list) = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.query_selector_all(".section").ok())
	else {
		return Vec::new();
	};
	(0..list.length())
		.filter_map(|i| list.item(i))
		.filter_map(|node| node.dyn_into::<HtmlElement>().ok())
		.map(|el| SectionBounds {
			id: el.id(),
			top: el.offset_top() as f64,
			height: el.offset_height() as f64,
		})
		.collect()
}

fn set_body_scroll_locked(locked: bool) {
	if let Some(body) = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.body())
	{
		let _ = body
			.style()
			.set_property("overflow", if locked { "hidden" } else { "" });
	}
}

/// Top navigation bar.
#[component]
pub fn Nav() -> impl IntoView {
	let nav_ref = NodeRef::<leptos::html::Nav>::new();
	let (scrolled, set_scrolled) = signal(false);
	let (menu_open, set_menu_open) = signal(false);
	let (active, set_active) = signal(None::<String>);

	let nav_height = move || {
		nav_ref
			.get_untracked()
			.map_or(0.0, |nav| nav.offset_height() as f64)
	};

	let refresh = move || {
		let scroll_y = web_sys::window()
			.and_then(|w| w.scroll_y().ok())
			.unwrap_or(0.0);
		set_scrolled.set(is_scrolled(scroll_y));
		let sections = measure_sections();
		if let Some(id) = active_section(scroll_y, nav_height(), &sections) {
			if active.get_untracked().as_deref() != Some(id) {
				set_active.set(Some(id.to_string()));
			}
		}
	};

	let close_menu = move || {
		set_menu_open.set(false);
		set_body_scroll_locked(false);
	};

	// Page-lifetime listeners.
	Effect::new(move |_| {
		let Some(window) = web_sys::window() else {
			return;
		};
		refresh();

		let on_scroll = Closure::<dyn FnMut()>::new(refresh);
		let _ = window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
		on_scroll.forget();

		let on_key = Closure::<dyn FnMut(KeyboardEvent)>::new(move |ev: KeyboardEvent| {
			if ev.key() == "Escape" && menu_open.get_untracked() {
				close_menu();
			}
		});
		if let Some(document) = window.document() {
			let _ = document.add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref());
		}
		on_key.forget();
	});

	let toggle_menu = move |_: MouseEvent| {
		let open = !menu_open.get_untracked();
		set_menu_open.set(open);
		set_body_scroll_locked(open);
	};

	let go_to = move |ev: MouseEvent, id: &'static str| {
		ev.prevent_default();
		close_menu();
		let Some(window) = web_sys::window() else {
			return;
		};
		let Some(target) = window
			.document()
			.and_then(|d| d.get_element_by_id(id))
			.and_then(|el| el.dyn_into::<HtmlElement>().ok())
		else {
			return;
		};
		let options = ScrollToOptions::new();
		options.set_top(scroll_target(target.offset_top() as f64, nav_height()));
		options.set_behavior(ScrollBehavior::Smooth);
		window.scroll_to_with_scroll_to_options(&options);
	};

	view! {
		<nav id="nav" class="nav" class:scrolled=move || scrolled.get() node_ref=nav_ref>
			<a href="#hero" class="nav-logo" on:click=move |ev| go_to(ev, "hero")>
				"Portfolio"
			</a>
			<button
				id="nav-toggle"
				class="nav-toggle"
				class:active=move || menu_open.get()
				aria-label="Toggle navigation"
				on:click=toggle_menu
			>
				<span></span>
				<span></span>
			</button>
			<ul id="nav-menu" class="nav-menu" class:active=move || menu_open.get()>
				{LINKS
					.iter()
					.map(|&(id, label)| {
						view! {
							<li>
								<a
									href=format!("#{id}")
									class="nav-link"
									class:active=move || active.get().as_deref() == Some(id)
									on:click=move |ev| go_to(ev, id)
								>
									{label}
								</a>
							</li>
						}
					})
					.collect_view()}
			</ul>
		</nav>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sections() -> Vec<SectionBounds> {
		[("about", 600.0, 800.0), ("experience", 1400.0, 1000.0), ("contact", 2400.0, 700.0)]
			.into_iter()
			.map(|(id, top, height)| SectionBounds {
				id: id.to_string(),
				top,
				height,
			})
			.collect()
	}

	#[test]
	fn bar_compacts_after_threshold() {
		assert!(!is_scrolled(0.0));
		assert!(!is_scrolled(50.0));
		assert!(is_scrolled(50.5));
	}

	#[test]
	fn scroll_target_leaves_room_for_bar() {
		assert_eq!(scroll_target(1400.0, 80.0), 1300.0);
	}

	#[test]
	fn active_section_uses_probe_below_bar() {
		let s = sections();
		// Probe = scroll + 80 + 100.
		assert_eq!(active_section(0.0, 80.0, &s), None);
		assert_eq!(active_section(420.0, 80.0, &s), Some("about"));
		assert_eq!(active_section(1219.0, 80.0, &s), Some("about"));
		assert_eq!(active_section(1220.0, 80.0, &s), Some("experience"));
		assert_eq!(active_section(2900.0, 80.0, &s), Some("contact"));
		assert_eq!(active_section(5000.0, 80.0, &s), None);
	}
}
