//! Rendering for the bokeh background.
//!
//! Drawing goes through the [`Surface`] trait so the passes can run against a
//! canvas in the browser or a recorder in tests. Passes run back to front:
//! 1. Orbs (large soft radial blobs)
//! 2. Connecting lines between nearby particles
//! 3. Particles (glow halo, then bright core)
//! 4. Diagonal highlight sweep

use super::particles::{BokehField, link_distance};
use super::theme::{Color, Theme};
use super::types::{BokehConfig, Size};

/// A single gradient color stop. `offset` is in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
	pub offset: f64,
	pub color: Color,
}

impl ColorStop {
	pub const fn new(offset: f64, color: Color) -> Self {
		Self { offset, color }
	}
}

/// Drawing target bound to the host region.
///
/// Coordinates are logical units; implementations map one unit to one layout
/// pixel regardless of the backing store's pixel density.
pub trait Surface {
	/// Bind the surface to a logical size drawn at `pixel_ratio` physical
	/// pixels per unit.
	fn resize(&mut self, size: Size, pixel_ratio: f64);
	fn clear(&mut self, size: Size);
	/// Fill a circle with a radial gradient running from its center outwards.
	fn fill_radial(&mut self, x: f64, y: f64, radius: f64, stops: &[ColorStop]);
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64);
	/// Fill the rectangle at the origin spanning `size` with a linear gradient
	/// running from `from` to `to`.
	fn fill_linear(&mut self, size: Size, from: (f64, f64), to: (f64, f64), stops: &[ColorStop]);
}

/// Line opacity for two particles `distance` apart; zero at or beyond
/// `threshold`.
pub fn link_alpha(distance: f64, threshold: f64, max_alpha: f64) -> f64 {
	if distance >= threshold || threshold <= 0.0 {
		return 0.0;
	}
	max_alpha * (1.0 - distance / threshold)
}

/// Horizontal center of the highlight band after `elapsed_ms`.
///
/// The band enters `margin` units left of the surface and leaves `margin`
/// units right of it, repeating every `width + 2 * margin` units.
pub fn sweep_position(elapsed_ms: f64, width: f64, speed: f64, margin: f64) -> f64 {
	let period = width + 2.0 * margin;
	(elapsed_ms * speed).rem_euclid(period) - margin
}

/// Renders the complete field to the surface.
pub fn render<S: Surface + ?Sized>(
	surface: &mut S,
	field: &BokehField,
	theme: &Theme,
	config: &BokehConfig,
	elapsed_ms: f64,
) {
	surface.clear(field.size);
	draw_orbs(surface, field, theme);
	draw_links(surface, field, theme, config);
	draw_particles(surface, field, theme);
	draw_sweep(surface, field.size, theme, config, elapsed_ms);
}

fn draw_orbs<S: Surface + ?Sized>(surface: &mut S, field: &BokehField, theme: &Theme) {
	for orb in &field.orbs {
		let color = theme.orbs.color(orb.tone);
		let stops = [
			ColorStop::new(0.0, color.with_alpha(orb.opacity)),
			ColorStop::new(0.5, color.with_alpha(orb.opacity * 0.5)),
			ColorStop::new(1.0, color.clear()),
		];
		surface.fill_radial(orb.x, orb.y, orb.rendered_radius(), &stops);
	}
}

fn draw_links<S: Surface + ?Sized>(
	surface: &mut S,
	field: &BokehField,
	theme: &Theme,
	config: &BokehConfig,
) {
	let threshold = link_distance(config, field.size);
	let threshold_sq = threshold * threshold;
	let particles = &field.particles;

	for (i, a) in particles.iter().enumerate() {
		for b in &particles[i + 1..] {
			let (dx, dy) = (a.x - b.x, a.y - b.y);
			let dist_sq = dx * dx + dy * dy;
			if dist_sq >= threshold_sq {
				continue;
			}
			let alpha = link_alpha(dist_sq.sqrt(), threshold, config.link_alpha);
			if alpha <= 0.0 {
				continue;
			}
			surface.stroke_line(
				(a.x, a.y),
				(b.x, b.y),
				theme.links.color.with_alpha(alpha),
				theme.links.width,
			);
		}
	}
}

fn draw_particles<S: Surface + ?Sized>(surface: &mut S, field: &BokehField, theme: &Theme) {
	for p in &field.particles {
		let color = theme.particles.color(p.tone);
		let glow = [
			ColorStop::new(0.0, color.with_alpha(p.opacity * 0.6)),
			ColorStop::new(0.4, color.with_alpha(p.opacity * 0.25)),
			ColorStop::new(1.0, color.clear()),
		];
		surface.fill_radial(p.x, p.y, p.radius * theme.glow_scale, &glow);

		let core = color.lighten(0.5);
		let body = [
			ColorStop::new(0.0, core.with_alpha(p.opacity)),
			ColorStop::new(1.0, core.lerp(color, 0.6).with_alpha(p.opacity * 0.4)),
		];
		surface.fill_radial(p.x, p.y, p.radius, &body);
	}
}

fn draw_sweep<S: Surface + ?Sized>(
	surface: &mut S,
	size: Size,
	theme: &Theme,
	config: &BokehConfig,
	elapsed_ms: f64,
) {
	let center = sweep_position(elapsed_ms, size.width, config.sweep_speed, config.sweep_margin);
	let half = theme.sweep.half_width;
	let color = theme.sweep.color;
	let stops = [
		ColorStop::new(0.0, color.clear()),
		ColorStop::new(0.5, color),
		ColorStop::new(1.0, color.clear()),
	];
	// Leaning gradient axis gives the band its diagonal edge.
	surface.fill_linear(
		size,
		(center - half, 0.0),
		(center + half, size.height * 0.35),
		&stops,
	);
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::bokeh::particles::Rng;
	use crate::components::bokeh::testing::{DrawOp, RecordingSurface};

	#[test]
	fn link_alpha_decays_linearly() {
		assert_eq!(link_alpha(0.0, 150.0, 0.1), 0.1);
		assert!((link_alpha(75.0, 150.0, 0.1) - 0.05).abs() < 1e-12);
		assert_eq!(link_alpha(150.0, 150.0, 0.1), 0.0);
		assert_eq!(link_alpha(400.0, 150.0, 0.1), 0.0);
	}

	#[test]
	fn sweep_wraps_over_width_plus_margins() {
		assert_eq!(sweep_position(0.0, 800.0, 0.25, 200.0), -200.0);
		// Period is (800 + 400) / 0.25 = 4800 ms.
		assert_eq!(sweep_position(2400.0, 800.0, 0.25, 200.0), 400.0);
		assert_eq!(sweep_position(4800.0, 800.0, 0.25, 200.0), -200.0);
		assert_eq!(sweep_position(4800.0 + 400.0, 800.0, 0.25, 200.0), -100.0);
	}

	#[test]
	fn passes_draw_back_to_front() {
		let config = BokehConfig::default();
		let mut field = BokehField::new(&config, Size::new(800.0, 600.0), &mut Rng::new(4));
		// Two particles close together guarantee at least one line.
		field.particles[1].x = field.particles[0].x + 5.0;
		field.particles[1].y = field.particles[0].y;

		let mut surface = RecordingSurface::default();
		render(&mut surface, &field, &Theme::default(), &config, 1000.0);

		let ops = &surface.ops;
		assert_eq!(ops.first(), Some(&DrawOp::Clear));
		assert_eq!(ops.last(), Some(&DrawOp::Linear));

		let orbs = field.orbs.len();
		assert!(ops[1..=orbs].iter().all(|op| *op == DrawOp::Radial));
		let first_line = ops.iter().position(|op| *op == DrawOp::Line).unwrap();
		let last_line = ops.iter().rposition(|op| *op == DrawOp::Line).unwrap();
		assert_eq!(first_line, orbs + 1);
		let particle_ops = &ops[last_line + 1..ops.len() - 1];
		assert_eq!(particle_ops.len(), field.particles.len() * 2);
		assert!(particle_ops.iter().all(|op| *op == DrawOp::Radial));
	}

	#[test]
	fn distant_particles_are_not_linked() {
		let config = BokehConfig::default();
		let mut field = BokehField::new(&config, Size::new(800.0, 600.0), &mut Rng::new(4));
		field.particles.truncate(2);
		field.particles[0].x = 0.0;
		field.particles[0].y = 0.0;
		field.particles[1].x = 700.0;
		field.particles[1].y = 500.0;

		let mut surface = RecordingSurface::default();
		render(&mut surface, &field, &Theme::default(), &config, 0.0);
		assert_eq!(surface.count(DrawOp::Line), 0);
	}
}
