//! Animated bokeh background for the hero region.
//!
//! Renders drifting light particles and large soft orbs on an HTML canvas:
//! - Area-scaled populations, regenerated whenever the region resizes
//! - Frame-rate independent motion with clamped frame deltas
//! - Connecting lines between nearby particles and a slow highlight sweep
//! - Pauses while off screen or while the document is hidden, and stays off
//!   when the user prefers reduced motion
//!
//! The simulation and renderer are environment-agnostic: [`BokehEngine`]
//! drives any [`Host`] and [`Surface`] pair, and [`BokehCanvas`] binds it to
//! the browser.
//!
//! # Example
//!
//! ```ignore
//! view! {
//!     <section class="hero">
//!         <BokehCanvas />
//!         <h1>"Hello"</h1>
//!     </section>
//! }
//! ```

mod component;
pub mod engine;
pub mod particles;
pub mod render;
#[cfg(test)]
mod testing;
pub mod theme;
mod types;
mod web;

pub use component::BokehCanvas;
pub use engine::{BokehEngine, Host, PageLifecycle};
pub use render::Surface;
pub use theme::Theme;
pub use types::{BokehConfig, EngineEvent, FrameHandle, Size};
