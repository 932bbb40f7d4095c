//! Page components.

use web_sys::Window;

pub mod bokeh;
pub mod contact;
pub mod nav;
pub mod reveal;

/// Media query matched when the visitor asks for less animation.
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Whether the visitor prefers reduced motion. False if the query cannot run.
pub(crate) fn prefers_reduced_motion(window: &Window) -> bool {
	window
		.match_media(REDUCED_MOTION_QUERY)
		.ok()
		.flatten()
		.is_some_and(|query| query.matches())
}
