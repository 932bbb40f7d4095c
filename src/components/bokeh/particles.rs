//! Particle and orb simulation for the bokeh background.
//!
//! Populations are plain value records in two vectors, advanced in place by
//! [`BokehField::update`]. A field is always generated whole for a given
//! surface size; a size change builds a new field rather than rescaling the
//! old one.

use std::f64::consts::TAU;

use super::types::{BokehConfig, Size};

/// Lower bound of the particle opacity oscillation.
pub const MIN_OPACITY: f64 = 0.05;
/// Upper bound of the particle opacity oscillation.
pub const MAX_OPACITY: f64 = 0.6;
/// How far past an edge a particle travels before wrapping.
pub const WRAP_MARGIN: f64 = 10.0;

/// Small seeded generator (SplitMix64) for population layout.
#[derive(Clone, Debug)]
pub struct Rng(u64);

impl Rng {
	pub fn new(seed: u64) -> Self {
		Self(seed)
	}

	/// Next value in `[0, 1)`.
	pub fn next_f64(&mut self) -> f64 {
		self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
		let mut z = self.0;
		z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
		z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
		z ^= z >> 31;
		(z >> 11) as f64 / (1u64 << 53) as f64
	}

	pub fn range(&mut self, min: f64, max: f64) -> f64 {
		min + self.next_f64() * (max - min)
	}

	/// A magnitude in `[min, max)` with a random sign.
	fn signed(&mut self, min: f64, max: f64) -> f64 {
		let v = self.range(min, max);
		if self.next_f64() < 0.5 { -v } else { v }
	}
}

/// Color-class of a particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleTone {
	Primary,
	Bright,
	Soft,
	Accent,
}

impl ParticleTone {
	/// Map a uniform sample to a tone: 50% primary, 25% bright, 15% soft,
	/// 10% accent.
	pub fn from_sample(u: f64) -> Self {
		if u < 0.5 {
			Self::Primary
		} else if u < 0.75 {
			Self::Bright
		} else if u < 0.9 {
			Self::Soft
		} else {
			Self::Accent
		}
	}
}

/// Color-class of an orb.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrbTone {
	Primary,
	Soft,
}

impl OrbTone {
	/// 70% primary, 30% soft.
	pub fn from_sample(u: f64) -> Self {
		if u < 0.7 { Self::Primary } else { Self::Soft }
	}
}

/// A small floating glow point.
#[derive(Clone, Debug)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub base_radius: f64,
	/// Radius after pulsation.
	pub radius: f64,
	pub opacity: f64,
	/// Opacity change per baseline frame; sign flips at the bounds.
	pub opacity_drift: f64,
	pub tone: ParticleTone,
	pub phase: f64,
	pub pulse_rate: f64,
}

impl Particle {
	fn spawn(rng: &mut Rng, size: Size) -> Self {
		let base_radius = rng.range(0.6, 2.4);
		let phase = rng.range(0.0, TAU);
		Self {
			x: rng.range(0.0, size.width),
			y: rng.range(0.0, size.height),
			vx: rng.signed(0.02, 0.25),
			vy: rng.signed(0.02, 0.25),
			base_radius,
			radius: base_radius,
			opacity: rng.range(MIN_OPACITY, MAX_OPACITY),
			opacity_drift: rng.signed(0.001, 0.004),
			tone: ParticleTone::from_sample(rng.next_f64()),
			phase,
			pulse_rate: rng.range(0.01, 0.035),
		}
	}

	/// Advance by `scale` baseline frames inside a `size` surface.
	pub fn update(&mut self, scale: f64, size: Size) {
		self.x += self.vx * scale;
		self.y += self.vy * scale;

		// Wrap around surface edges
		if self.x < -WRAP_MARGIN {
			self.x = size.width + WRAP_MARGIN;
		} else if self.x > size.width + WRAP_MARGIN {
			self.x = -WRAP_MARGIN;
		}
		if self.y < -WRAP_MARGIN {
			self.y = size.height + WRAP_MARGIN;
		} else if self.y > size.height + WRAP_MARGIN {
			self.y = -WRAP_MARGIN;
		}

		self.phase = (self.phase + self.pulse_rate * scale) % TAU;
		self.radius = self.base_radius * (1.0 + 0.3 * self.phase.sin());

		self.opacity += self.opacity_drift * scale;
		if self.opacity >= MAX_OPACITY {
			self.opacity = MAX_OPACITY;
			self.opacity_drift = -self.opacity_drift.abs();
		} else if self.opacity <= MIN_OPACITY {
			self.opacity = MIN_OPACITY;
			self.opacity_drift = self.opacity_drift.abs();
		}
	}
}

/// A large, faint background blob.
#[derive(Clone, Debug)]
pub struct Orb {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
	pub opacity: f64,
	pub tone: OrbTone,
	pub phase: f64,
	pub breath_rate: f64,
}

impl Orb {
	fn spawn(rng: &mut Rng, size: Size) -> Self {
		Self {
			x: rng.range(0.0, size.width),
			y: rng.range(0.0, size.height),
			vx: rng.signed(0.03, 0.2),
			vy: rng.signed(0.03, 0.2),
			radius: rng.range(60.0, 160.0),
			opacity: rng.range(0.02, 0.07),
			tone: OrbTone::from_sample(rng.next_f64()),
			phase: rng.range(0.0, TAU),
			breath_rate: rng.range(0.004, 0.012),
		}
	}

	/// Radius as drawn, modulated by the breathing phase.
	pub fn rendered_radius(&self) -> f64 {
		self.radius * (1.0 + 0.08 * self.phase.sin())
	}

	/// Advance by `scale` baseline frames, bouncing off the surface bounds
	/// extended by the orb radius.
	pub fn update(&mut self, scale: f64, size: Size) {
		self.x += self.vx * scale;
		self.y += self.vy * scale;

		if self.x < -self.radius {
			self.vx = self.vx.abs();
		} else if self.x > size.width + self.radius {
			self.vx = -self.vx.abs();
		}
		if self.y < -self.radius {
			self.vy = self.vy.abs();
		} else if self.y > size.height + self.radius {
			self.vy = -self.vy.abs();
		}

		self.phase = (self.phase + self.breath_rate * scale) % TAU;
	}
}

/// Particle population for a surface size.
pub fn particle_count(config: &BokehConfig, size: Size) -> usize {
	let by_area = (size.area() / config.area_per_particle).floor().max(0.0) as usize;
	by_area.min(config.max_particles)
}

/// Orb population for a surface size.
pub fn orb_count(config: &BokehConfig, size: Size) -> usize {
	let by_width = (size.width / config.orb_spacing).floor().max(0.0) as usize;
	by_width.clamp(config.min_orbs, config.max_orbs)
}

/// Maximum distance at which two particles are joined by a line.
pub fn link_distance(config: &BokehConfig, size: Size) -> f64 {
	(size.width.min(size.height) * config.link_fraction).clamp(config.link_min, config.link_max)
}

/// Both populations together with the bounds they live in.
#[derive(Clone, Debug, Default)]
pub struct BokehField {
	pub particles: Vec<Particle>,
	pub orbs: Vec<Orb>,
	pub size: Size,
}

impl BokehField {
	/// Generate fresh populations sized to `size`.
	pub fn new(config: &BokehConfig, size: Size, rng: &mut Rng) -> Self {
		let orbs = (0..orb_count(config, size))
			.map(|_| Orb::spawn(rng, size))
			.collect();
		let particles = (0..particle_count(config, size))
			.map(|_| Particle::spawn(rng, size))
			.collect();

		Self {
			particles,
			orbs,
			size,
		}
	}

	/// Advance every orb and particle by `scale` baseline frames.
	pub fn update(&mut self, scale: f64) {
		let size = self.size;
		for orb in &mut self.orbs {
			orb.update(scale, size);
		}
		for p in &mut self.particles {
			p.update(scale, size);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn config() -> BokehConfig {
		BokehConfig::default()
	}

	#[test]
	fn particle_count_follows_area() {
		let c = config();
		assert_eq!(particle_count(&c, Size::new(400.0, 400.0)), 10);
		assert_eq!(particle_count(&c, Size::new(800.0, 600.0)), 30);
		assert_eq!(particle_count(&c, Size::new(100.0, 100.0)), 0);
	}

	#[test]
	fn particle_count_is_capped() {
		let c = config();
		assert_eq!(particle_count(&c, Size::new(1600.0, 1200.0)), 85);
		assert_eq!(particle_count(&c, Size::new(10_000.0, 10_000.0)), 85);
	}

	#[test]
	fn orb_count_is_clamped() {
		let c = config();
		assert_eq!(orb_count(&c, Size::new(320.0, 600.0)), 5);
		assert_eq!(orb_count(&c, Size::new(1440.0, 600.0)), 8);
		assert_eq!(orb_count(&c, Size::new(4000.0, 600.0)), 10);
	}

	#[test]
	fn link_distance_is_clamped() {
		let c = config();
		assert_eq!(link_distance(&c, Size::new(400.0, 300.0)), 120.0);
		assert_eq!(link_distance(&c, Size::new(1000.0, 700.0)), 140.0);
		assert_eq!(link_distance(&c, Size::new(2000.0, 1500.0)), 160.0);
	}

	#[test]
	fn tone_partition_matches_weights() {
		assert_eq!(ParticleTone::from_sample(0.0), ParticleTone::Primary);
		assert_eq!(ParticleTone::from_sample(0.49), ParticleTone::Primary);
		assert_eq!(ParticleTone::from_sample(0.5), ParticleTone::Bright);
		assert_eq!(ParticleTone::from_sample(0.8), ParticleTone::Soft);
		assert_eq!(ParticleTone::from_sample(0.95), ParticleTone::Accent);
		assert_eq!(OrbTone::from_sample(0.69), OrbTone::Primary);
		assert_eq!(OrbTone::from_sample(0.7), OrbTone::Soft);
	}

	#[test]
	fn rng_stays_in_unit_interval() {
		let mut rng = Rng::new(7);
		for _ in 0..10_000 {
			let v = rng.next_f64();
			assert!((0.0..1.0).contains(&v));
		}
	}

	#[test]
	fn field_is_populated_for_size() {
		let size = Size::new(800.0, 600.0);
		let field = BokehField::new(&config(), size, &mut Rng::new(1));
		assert_eq!(field.particles.len(), 30);
		assert_eq!(field.orbs.len(), 5);
		for p in &field.particles {
			assert!((0.0..=size.width).contains(&p.x));
			assert!((MIN_OPACITY..=MAX_OPACITY).contains(&p.opacity));
		}
	}

	#[test]
	fn particles_stay_within_wrap_margin() {
		let size = Size::new(300.0, 200.0);
		let mut field = BokehField::new(&config(), Size::new(1200.0, 900.0), &mut Rng::new(3));
		field.size = size;
		for step in 0..20_000 {
			let scale = if step % 3 == 0 { 48.0 / 16.67 } else { 1.0 };
			field.update(scale);
			for p in &field.particles {
				assert!(p.x >= -WRAP_MARGIN && p.x <= size.width + WRAP_MARGIN);
				assert!(p.y >= -WRAP_MARGIN && p.y <= size.height + WRAP_MARGIN);
			}
		}
	}

	#[test]
	fn particle_wraps_to_opposite_edge() {
		let size = Size::new(300.0, 200.0);
		let mut p = Particle::spawn(&mut Rng::new(9), size);
		p.x = size.width + WRAP_MARGIN - 0.05;
		p.vx = 0.2;
		p.update(1.0, size);
		assert_eq!(p.x, -WRAP_MARGIN);

		p.x = -WRAP_MARGIN + 0.05;
		p.vx = -0.2;
		p.update(1.0, size);
		assert_eq!(p.x, size.width + WRAP_MARGIN);
	}

	#[test]
	fn opacity_reverses_at_bounds() {
		let size = Size::new(300.0, 200.0);
		let mut p = Particle::spawn(&mut Rng::new(11), size);
		p.opacity = MAX_OPACITY - 0.001;
		p.opacity_drift = 0.004;
		p.update(1.0, size);
		assert_eq!(p.opacity, MAX_OPACITY);
		assert!(p.opacity_drift < 0.0);

		p.opacity = MIN_OPACITY + 0.001;
		p.opacity_drift = -0.004;
		p.update(1.0, size);
		assert_eq!(p.opacity, MIN_OPACITY);
		assert!(p.opacity_drift > 0.0);
	}

	#[test]
	fn opacity_stays_bounded_over_time() {
		let mut field = BokehField::new(&config(), Size::new(800.0, 600.0), &mut Rng::new(5));
		for _ in 0..5_000 {
			field.update(2.5);
			for p in &field.particles {
				assert!((MIN_OPACITY..=MAX_OPACITY).contains(&p.opacity));
			}
		}
	}

	#[test]
	fn orb_velocity_reverses_past_bounds() {
		let size = Size::new(800.0, 600.0);
		let mut orb = Orb::spawn(&mut Rng::new(2), size);
		orb.x = size.width + orb.radius - 0.05;
		orb.vx = 0.1;
		orb.update(1.0, size);
		assert!(orb.vx < 0.0);

		orb.y = -orb.radius + 0.05;
		orb.vy = -0.1;
		orb.update(1.0, size);
		assert!(orb.vy > 0.0);
	}

	#[test]
	fn orbs_stay_finite_and_near_surface() {
		let size = Size::new(800.0, 600.0);
		let mut field = BokehField::new(&config(), size, &mut Rng::new(13));
		for _ in 0..10_000 {
			field.update(48.0 / 16.67);
		}
		for orb in &field.orbs {
			assert!(orb.x.is_finite() && orb.y.is_finite());
			assert!(orb.x >= -orb.radius - 1.0 && orb.x <= size.width + orb.radius + 1.0);
			assert!(orb.y >= -orb.radius - 1.0 && orb.y <= size.height + orb.radius + 1.0);
		}
	}
}
