//! bokeh-folio: single-page portfolio with an animated bokeh hero background.
//!
//! This crate provides a WASM client that renders the portfolio page, drives
//! the canvas particle animation behind the hero banner, and wires the
//! navigation, scroll fade-ins, and simulated contact form.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::bokeh::{BokehCanvas, BokehConfig, BokehEngine, Host, PageLifecycle, Surface};
pub use components::contact::{ContactError, ContactForm};
pub use components::nav::Nav;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("bokeh-folio: logging initialized");
}

/// Load animation settings from a script element with id="bokeh-config".
/// Missing fields keep their defaults.
fn load_config() -> Option<BokehConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("bokeh-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match BokehConfig::from_json(&json_text) {
		Ok(config) => {
			info!("bokeh-folio: loaded config, theme {}", config.theme);
			Some(config)
		}
		Err(e) => {
			warn!("bokeh-folio: failed to parse bokeh config: {}", e);
			None
		}
	}
}

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config().unwrap_or_default();

	// Content is in the DOM once the first effect runs.
	Effect::new(move |_| {
		components::reveal::mark_loaded();
		components::reveal::init_fade_in();
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Nav />

		<section id="hero" class="hero">
			<BokehCanvas config=config />
			<div class="hero-content">
				<h1 class="hero-title">"Building quiet, durable software"</h1>
				<p class="hero-subtitle">"Engineering lead, systems tinkerer, occasional writer."</p>
			</div>
		</section>

		<section id="about" class="section">
			<h2 class="section-header">"About"</h2>
			<div class="about-text">
				<p>"I design and ship products end to end, from storage engines to the pixels on screen."</p>
			</div>
			<ul class="about-values">
				<li>"Clarity over cleverness"</li>
				<li>"Measure before optimizing"</li>
				<li>"Leave things better than found"</li>
			</ul>
		</section>

		<section id="experience" class="section">
			<h2 class="section-header">"Experience"</h2>
			<div class="timeline">
				<div class="timeline-item">
					<h3>"Staff Engineer"</h3>
					<p>"Platform infrastructure and developer tooling."</p>
				</div>
				<div class="timeline-item">
					<h3>"Senior Engineer"</h3>
					<p>"Real-time data pipelines and client rendering."</p>
				</div>
			</div>
		</section>

		<section id="expertise" class="section">
			<h2 class="section-header">"Expertise"</h2>
			<div class="competency-grid">
				<div class="competency-card">"Systems programming"</div>
				<div class="competency-card">"Web performance"</div>
				<div class="competency-card">"Team leadership"</div>
			</div>
		</section>

		<section id="education" class="section">
			<h2 class="section-header">"Education"</h2>
			<div class="education-card">
				<h3>"B.Sc. Computer Science"</h3>
			</div>
		</section>

		<section id="contact" class="section">
			<h2 class="section-header">"Contact"</h2>
			<div class="contact-info">
				<p>"Questions, projects, or just hello."</p>
			</div>
			<ContactForm />
		</section>
	}
}
