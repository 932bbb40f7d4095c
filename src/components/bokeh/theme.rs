//! Visual theming for the bokeh background.
//!
//! Provides the color type used by the renderer and the palettes that map
//! particle and orb color-classes to concrete colors.

use log::warn;

use super::particles::{OrbTone, ParticleTone};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Fully transparent version of this color.
	pub fn clear(self) -> Self {
		self.with_alpha(0.0)
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Linear interpolation between two colors
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * (1.0 - t) + other.r as f64 * t) as u8,
			g: (self.g as f64 * (1.0 - t) + other.g as f64 * t) as u8,
			b: (self.b as f64 * (1.0 - t) + other.b as f64 * t) as u8,
			a: self.a * (1.0 - t) + other.a * t,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!(
				"rgba({}, {}, {}, {:.4})",
				self.r,
				self.g,
				self.b,
				self.a.clamp(0.0, 1.0)
			)
		}
	}
}

/// Colors for the four particle color-classes.
#[derive(Clone, Debug)]
pub struct ParticlePalette {
	pub primary: Color,
	pub bright: Color,
	pub soft: Color,
	pub accent: Color,
}

impl ParticlePalette {
	pub fn color(&self, tone: ParticleTone) -> Color {
		match tone {
			ParticleTone::Primary => self.primary,
			ParticleTone::Bright => self.bright,
			ParticleTone::Soft => self.soft,
			ParticleTone::Accent => self.accent,
		}
	}
}

/// Colors for the two orb color-classes.
#[derive(Clone, Debug)]
pub struct OrbPalette {
	pub primary: Color,
	pub soft: Color,
}

impl OrbPalette {
	pub fn color(&self, tone: OrbTone) -> Color {
		match tone {
			OrbTone::Primary => self.primary,
			OrbTone::Soft => self.soft,
		}
	}
}

/// Connecting line style.
#[derive(Clone, Debug)]
pub struct LinkStyle {
	/// Line color; alpha is computed per pair from distance.
	pub color: Color,
	pub width: f64,
}

/// Diagonal highlight sweep style.
#[derive(Clone, Debug)]
pub struct SweepStyle {
	/// Peak color at the center of the band.
	pub color: Color,
	/// Horizontal half-width of the band
	pub half_width: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub particles: ParticlePalette,
	pub orbs: OrbPalette,
	pub links: LinkStyle,
	pub sweep: SweepStyle,
	/// Glow radius as a multiple of the particle radius.
	pub glow_scale: f64,
}

impl Theme {
	/// Warm gold and champagne tones (default)
	pub fn champagne() -> Self {
		Self {
			name: "champagne",
			particles: ParticlePalette {
				primary: Color::rgb(212, 175, 55), // Gold
				bright: Color::rgb(255, 226, 160), // Pale gold
				soft: Color::rgb(232, 214, 180),   // Champagne
				accent: Color::rgb(236, 184, 160), // Rose gold
			},
			orbs: OrbPalette {
				primary: Color::rgb(201, 162, 39),
				soft: Color::rgb(245, 230, 200),
			},
			links: LinkStyle {
				color: Color::rgb(232, 205, 140),
				width: 0.6,
			},
			sweep: SweepStyle {
				color: Color::rgba(255, 244, 220, 0.05),
				half_width: 200.0,
			},
			glow_scale: 4.0,
		}
	}

	/// Cool silver and pale blue tones
	pub fn moonlight() -> Self {
		Self {
			name: "moonlight",
			particles: ParticlePalette {
				primary: Color::rgb(180, 196, 220), // Silver blue
				bright: Color::rgb(235, 242, 255),  // Moon white
				soft: Color::rgb(160, 170, 200),    // Slate
				accent: Color::rgb(190, 170, 230),  // Lavender
			},
			orbs: OrbPalette {
				primary: Color::rgb(120, 140, 190),
				soft: Color::rgb(200, 210, 235),
			},
			links: LinkStyle {
				color: Color::rgb(190, 205, 235),
				width: 0.6,
			},
			sweep: SweepStyle {
				color: Color::rgba(230, 238, 255, 0.05),
				half_width: 200.0,
			},
			glow_scale: 4.0,
		}
	}

	/// Look up a preset by name, falling back to the default.
	pub fn named(name: &str) -> Self {
		match name {
			"champagne" => Self::champagne(),
			"moonlight" => Self::moonlight(),
			other => {
				warn!("bokeh-folio: unknown theme {:?}, using champagne", other);
				Self::champagne()
			}
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::champagne()
	}
}
