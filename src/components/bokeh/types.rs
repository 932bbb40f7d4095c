//! Shared value types: sizes, frame handles, engine events and configuration.

use log::warn;
use serde::Deserialize;

/// Logical layout size of the host region, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
	pub width: f64,
	pub height: f64,
}

impl Size {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	pub fn area(self) -> f64 {
		self.width * self.height
	}

	/// Whether the size can back a drawing surface.
	pub fn is_drawable(self) -> bool {
		self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
	}
}

/// Opaque id of a pending frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Signals delivered to the engine by its environment.
///
/// Every browser callback (animation frame, resize observer, intersection
/// observer) is translated into one of these and handed to
/// [`BokehEngine::handle`](super::engine::BokehEngine::handle), which reacts
/// synchronously.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EngineEvent {
	/// A requested frame fired. `timestamp` is in milliseconds.
	Frame { timestamp: f64 },
	/// The host region's layout box may have changed.
	Resized,
	/// Fraction (0.0 to 1.0) of the host region currently in the viewport.
	Intersection { ratio: f64 },
}

/// Tunables for the bokeh engine.
///
/// Deserialized from the optional `<script id="bokeh-config">` element; any
/// missing field takes its default.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct BokehConfig {
	/// Upper bound on the particle population.
	pub max_particles: usize,
	/// Surface area (px²) that yields one particle.
	pub area_per_particle: f64,
	/// Surface width (px) that yields one orb.
	pub orb_spacing: f64,
	pub min_orbs: usize,
	pub max_orbs: usize,
	/// Device pixel ratio cap for the backing store.
	pub max_pixel_ratio: f64,
	/// Link distance as a fraction of the smaller surface dimension.
	pub link_fraction: f64,
	pub link_min: f64,
	pub link_max: f64,
	/// Line opacity for two particles at distance zero.
	pub link_alpha: f64,
	pub min_frame_ms: f64,
	pub max_frame_ms: f64,
	/// Frame duration that corresponds to a simulation scale of 1.0 (60 fps).
	pub baseline_frame_ms: f64,
	/// Minimum visible fraction of the host region for the loop to run.
	pub visibility_threshold: f64,
	/// Highlight sweep speed in px per millisecond.
	pub sweep_speed: f64,
	/// Distance the sweep travels beyond each edge.
	pub sweep_margin: f64,
	/// Name of the theme preset.
	pub theme: String,
}

impl Default for BokehConfig {
	fn default() -> Self {
		Self {
			max_particles: 85,
			area_per_particle: 16_000.0,
			orb_spacing: 180.0,
			min_orbs: 5,
			max_orbs: 10,
			max_pixel_ratio: 2.0,
			link_fraction: 0.2,
			link_min: 120.0,
			link_max: 160.0,
			link_alpha: 0.1,
			min_frame_ms: 8.0,
			max_frame_ms: 48.0,
			baseline_frame_ms: 16.67,
			visibility_threshold: 0.05,
			sweep_speed: 0.03,
			sweep_margin: 200.0,
			theme: "champagne".to_string(),
		}
	}
}

impl BokehConfig {
	/// Parse a config from JSON; fields absent from the JSON keep defaults.
	/// The result is already [`sanitized`](Self::sanitized).
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str::<Self>(json).map(Self::sanitized)
	}

	/// Put every min/max pair in order and replace unusable values with their
	/// defaults, so the engine can clamp and divide without checks.
	pub fn sanitized(mut self) -> Self {
		let defaults = Self::default();

		positive_or(&mut self.area_per_particle, defaults.area_per_particle, "area_per_particle");
		positive_or(&mut self.orb_spacing, defaults.orb_spacing, "orb_spacing");
		positive_or(&mut self.baseline_frame_ms, defaults.baseline_frame_ms, "baseline_frame_ms");
		positive_or(&mut self.max_pixel_ratio, defaults.max_pixel_ratio, "max_pixel_ratio");

		if self.min_orbs > self.max_orbs {
			warn!("bokeh-folio: min_orbs > max_orbs, swapping");
			std::mem::swap(&mut self.min_orbs, &mut self.max_orbs);
		}
		ordered_or(
			(&mut self.link_min, &mut self.link_max),
			(defaults.link_min, defaults.link_max),
			"link",
		);
		ordered_or(
			(&mut self.min_frame_ms, &mut self.max_frame_ms),
			(defaults.min_frame_ms, defaults.max_frame_ms),
			"frame_ms",
		);
		self
	}
}

fn positive_or(value: &mut f64, default: f64, name: &str) {
	if !(value.is_finite() && *value > 0.0) {
		warn!("bokeh-folio: {} must be positive, using {}", name, default);
		*value = default;
	}
}

/// Finite bounds are swapped if inverted; anything else takes the defaults.
fn ordered_or(bounds: (&mut f64, &mut f64), defaults: (f64, f64), name: &str) {
	let (min, max) = bounds;
	if !(min.is_finite() && max.is_finite()) {
		warn!("bokeh-folio: {} bounds are not finite, using defaults", name);
		(*min, *max) = defaults;
	} else if *min > *max {
		warn!("bokeh-folio: {} bounds are inverted, swapping", name);
		std::mem::swap(min, max);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_json_keeps_defaults() {
		let config = BokehConfig::from_json(r#"{ "max_particles": 40, "theme": "moonlight" }"#)
			.unwrap();
		assert_eq!(config.max_particles, 40);
		assert_eq!(config.theme, "moonlight");
		assert_eq!(config.area_per_particle, 16_000.0);
		assert_eq!(config.visibility_threshold, 0.05);
	}

	#[test]
	fn malformed_json_is_rejected() {
		assert!(BokehConfig::from_json("{ max_particles: }").is_err());
	}

	#[test]
	fn inverted_bounds_are_put_in_order() {
		let config = BokehConfig::from_json(
			r#"{ "min_orbs": 12, "link_min": 200, "max_frame_ms": 4 }"#,
		)
		.unwrap();
		assert_eq!((config.min_orbs, config.max_orbs), (10, 12));
		assert_eq!((config.link_min, config.link_max), (160.0, 200.0));
		assert_eq!((config.min_frame_ms, config.max_frame_ms), (4.0, 8.0));
	}

	#[test]
	fn non_positive_divisors_fall_back_to_defaults() {
		let config = BokehConfig::from_json(
			r#"{ "area_per_particle": 0, "orb_spacing": -5, "baseline_frame_ms": 0 }"#,
		)
		.unwrap();
		let defaults = BokehConfig::default();
		assert_eq!(config.area_per_particle, defaults.area_per_particle);
		assert_eq!(config.orb_spacing, defaults.orb_spacing);
		assert_eq!(config.baseline_frame_ms, defaults.baseline_frame_ms);
	}

	#[test]
	fn defaults_survive_sanitizing() {
		assert_eq!(BokehConfig::default().sanitized(), BokehConfig::default());
	}

	#[test]
	fn zero_sized_regions_are_not_drawable() {
		assert!(Size::new(800.0, 600.0).is_drawable());
		assert!(!Size::new(0.0, 600.0).is_drawable());
		assert!(!Size::new(800.0, f64::NAN).is_drawable());
	}
}
