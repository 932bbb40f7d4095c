//! Bokeh engine lifecycle: sizing, the frame loop, pausing and teardown.
//!
//! The engine never talks to the browser directly. Capabilities it needs from
//! its environment come through the [`Host`] trait, drawing goes through
//! [`Surface`], and everything the environment reports back arrives as an
//! [`EngineEvent`] passed to [`BokehEngine::handle`]. This keeps the whole
//! loop runnable headlessly.

use log::{debug, info, warn};

use super::particles::{BokehField, Rng};
use super::render::{self, Surface};
use super::theme::Theme;
use super::types::{BokehConfig, EngineEvent, FrameHandle, Size};

/// Environment capabilities consumed by the engine.
pub trait Host {
	/// Current layout box of the host region, if it can be measured.
	fn measure(&self) -> Option<Size>;
	fn device_pixel_ratio(&self) -> f64;
	fn prefers_reduced_motion(&self) -> bool;
	/// Monotonic clock in milliseconds.
	fn now(&self) -> f64;
	/// Ask for an [`EngineEvent::Frame`] before the next repaint. `None` when
	/// the environment cannot schedule frames.
	fn request_frame(&mut self) -> Option<FrameHandle>;
	fn cancel_frame(&mut self, handle: FrameHandle);
	/// Start delivering [`EngineEvent::Resized`] and
	/// [`EngineEvent::Intersection`]. Returns whether any observer was
	/// registered.
	fn observe(&mut self) -> bool;
	/// Stop all observers registered by [`Host::observe`].
	fn disconnect(&mut self);
}

/// The animation context: populations, surface, and loop state.
///
/// Owned by a [`PageLifecycle`]; nothing else mutates the surface or the
/// populations.
pub struct BokehEngine<H: Host, S: Surface> {
	host: H,
	surface: S,
	config: BokehConfig,
	theme: Theme,
	rng: Rng,
	field: BokehField,
	/// Between a successful `init` and `destroy`.
	active: bool,
	/// Frame loop scheduled.
	running: bool,
	observing: bool,
	pending_frame: Option<FrameHandle>,
	last_frame: Option<f64>,
	started_at: f64,
}

impl<H: Host, S: Surface> BokehEngine<H, S> {
	pub fn new(host: H, surface: S, config: BokehConfig, seed: u64) -> Self {
		let config = config.sanitized();
		let theme = Theme::named(&config.theme);
		Self {
			host,
			surface,
			config,
			theme,
			rng: Rng::new(seed),
			field: BokehField::default(),
			active: false,
			running: false,
			observing: false,
			pending_frame: None,
			last_frame: None,
			started_at: 0.0,
		}
	}

	/// Measure the host region, build populations, draw once, register
	/// observers and start the frame loop.
	///
	/// Does nothing when reduced motion is preferred or the region cannot be
	/// measured. Calling it again before [`destroy`](Self::destroy) is ignored.
	pub fn init(&mut self) {
		if self.active {
			debug!("bokeh-folio: init ignored, engine already active");
			return;
		}
		if self.host.prefers_reduced_motion() {
			info!("bokeh-folio: reduced motion preferred, animation disabled");
			return;
		}
		let Some(size) = self.host.measure().filter(|s| s.is_drawable()) else {
			warn!("bokeh-folio: host region has no drawable size, animation disabled");
			return;
		};

		self.active = true;
		self.rebuild(size);
		self.started_at = self.host.now();
		self.draw(self.started_at);

		self.observing = self.host.observe();
		if !self.observing {
			debug!("bokeh-folio: observers unavailable, running without resize/visibility tracking");
		}
		self.start();
		info!(
			"bokeh-folio: started with {} particles, {} orbs at {}x{}",
			self.field.particles.len(),
			self.field.orbs.len(),
			size.width,
			size.height
		);
	}

	/// Stop the frame loop and disconnect observers. Safe to call repeatedly.
	pub fn destroy(&mut self) {
		if !self.active {
			return;
		}
		self.stop();
		if self.observing {
			self.host.disconnect();
			self.observing = false;
		}
		self.active = false;
		info!("bokeh-folio: stopped");
	}

	/// React to an environment signal.
	pub fn handle(&mut self, event: EngineEvent) {
		match event {
			EngineEvent::Frame { timestamp } => self.on_frame(timestamp),
			EngineEvent::Resized => self.on_resize(),
			EngineEvent::Intersection { ratio } => self.on_intersection(ratio),
		}
	}

	pub fn is_active(&self) -> bool {
		self.active
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	pub fn field(&self) -> &BokehField {
		&self.field
	}

	pub fn host(&self) -> &H {
		&self.host
	}

	pub fn host_mut(&mut self) -> &mut H {
		&mut self.host
	}

	pub fn surface(&self) -> &S {
		&self.surface
	}

	fn on_frame(&mut self, timestamp: f64) {
		if !self.running {
			return;
		}
		self.pending_frame = None;

		let elapsed = self
			.last_frame
			.map_or(self.config.baseline_frame_ms, |last| timestamp - last)
			.clamp(self.config.min_frame_ms, self.config.max_frame_ms);
		self.last_frame = Some(timestamp);

		self.field.update(elapsed / self.config.baseline_frame_ms);
		self.draw(timestamp);
		self.schedule();
	}

	fn on_resize(&mut self) {
		if !self.active {
			return;
		}
		let Some(size) = self.host.measure().filter(|s| s.is_drawable()) else {
			return;
		};
		if size == self.field.size {
			return;
		}
		debug!(
			"bokeh-folio: host resized to {}x{}, regenerating",
			size.width, size.height
		);
		self.rebuild(size);
		self.draw(self.host.now());
	}

	fn on_intersection(&mut self, ratio: f64) {
		if !self.active {
			return;
		}
		let visible = ratio >= self.config.visibility_threshold;
		if visible && !self.running {
			if self.host.prefers_reduced_motion() {
				return;
			}
			debug!("bokeh-folio: hero visible, resuming");
			self.start();
		} else if !visible && self.running {
			debug!("bokeh-folio: hero hidden, pausing");
			self.stop();
		}
	}

	/// Size the surface and replace both populations.
	fn rebuild(&mut self, size: Size) {
		let ratio = self.host.device_pixel_ratio();
		let ratio = if ratio.is_finite() && ratio > 0.0 {
			ratio.min(self.config.max_pixel_ratio)
		} else {
			1.0
		};
		self.surface.resize(size, ratio);
		self.field = BokehField::new(&self.config, size, &mut self.rng);
	}

	fn draw(&mut self, now: f64) {
		render::render(
			&mut self.surface,
			&self.field,
			&self.theme,
			&self.config,
			now - self.started_at,
		);
	}

	fn start(&mut self) {
		self.running = true;
		self.last_frame = None;
		self.schedule();
	}

	fn stop(&mut self) {
		if let Some(handle) = self.pending_frame.take() {
			self.host.cancel_frame(handle);
		}
		self.running = false;
		self.last_frame = None;
	}

	fn schedule(&mut self) {
		self.pending_frame = self.host.request_frame();
		if self.pending_frame.is_none() {
			warn!("bokeh-folio: frame scheduling unavailable, animation halted");
			self.running = false;
		}
	}
}

impl<H: Host, S: Surface> Drop for BokehEngine<H, S> {
	fn drop(&mut self) {
		self.destroy();
	}
}

/// Page-level owner of the engine.
///
/// Translates page signals (ready, visibility) into engine lifecycle calls.
/// Without an engine (missing canvas or host region) every call is a no-op.
pub struct PageLifecycle<H: Host, S: Surface> {
	engine: Option<BokehEngine<H, S>>,
}

impl<H: Host, S: Surface> PageLifecycle<H, S> {
	pub fn new(engine: BokehEngine<H, S>) -> Self {
		Self {
			engine: Some(engine),
		}
	}

	/// A lifecycle with nothing to drive.
	pub fn inert() -> Self {
		Self { engine: None }
	}

	pub fn engine(&self) -> Option<&BokehEngine<H, S>> {
		self.engine.as_ref()
	}

	pub fn engine_mut(&mut self) -> Option<&mut BokehEngine<H, S>> {
		self.engine.as_mut()
	}

	/// The page finished loading.
	pub fn on_ready(&mut self) {
		if let Some(engine) = self.engine.as_mut() {
			engine.init();
		}
	}

	/// The document was hidden or shown.
	pub fn on_visibility_change(&mut self, hidden: bool) {
		let Some(engine) = self.engine.as_mut() else {
			return;
		};
		if hidden {
			engine.destroy();
		} else if !engine.is_active() {
			engine.init();
		}
	}

	/// Forward an observer or frame signal to the engine.
	pub fn dispatch(&mut self, event: EngineEvent) {
		if let Some(engine) = self.engine.as_mut() {
			engine.handle(event);
		}
	}
}
