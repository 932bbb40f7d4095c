//! Headless stand-ins for the browser: a recording surface and a scripted host.

use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

use super::engine::Host;
use super::render::{ColorStop, Surface};
use super::theme::Color;
use super::types::{FrameHandle, Size};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOp {
	Clear,
	Radial,
	Line,
	Linear,
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
	pub ops: Vec<DrawOp>,
	pub resizes: Vec<(Size, f64)>,
}

impl RecordingSurface {
	pub fn count(&self, op: DrawOp) -> usize {
		self.ops.iter().filter(|o| **o == op).count()
	}

	pub fn frames_drawn(&self) -> usize {
		self.count(DrawOp::Clear)
	}
}

impl Surface for RecordingSurface {
	fn resize(&mut self, size: Size, pixel_ratio: f64) {
		self.resizes.push((size, pixel_ratio));
	}

	fn clear(&mut self, _size: Size) {
		self.ops.push(DrawOp::Clear);
	}

	fn fill_radial(&mut self, _x: f64, _y: f64, _radius: f64, _stops: &[ColorStop]) {
		self.ops.push(DrawOp::Radial);
	}

	fn stroke_line(&mut self, _from: (f64, f64), _to: (f64, f64), _color: Color, _width: f64) {
		self.ops.push(DrawOp::Line);
	}

	fn fill_linear(&mut self, _size: Size, _from: (f64, f64), _to: (f64, f64), _stops: &[ColorStop]) {
		self.ops.push(DrawOp::Linear);
	}
}

/// Scripted environment: tests set the region size, clock and preferences,
/// and inspect pending frames and observers.
#[derive(Debug)]
pub struct FakeHost {
	pub size: Option<Size>,
	pub pixel_ratio: f64,
	pub reduced_motion: bool,
	pub clock: f64,
	pub supports_observers: bool,
	pub supports_frames: bool,
	pub pending: HashSet<FrameHandle>,
	pub observers: usize,
	pub frame_requests: usize,
	/// (frames cancelled, disconnects), readable after the host is dropped.
	pub released: Rc<Cell<(usize, usize)>>,
	next_handle: i32,
}

impl FakeHost {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			size: Some(Size::new(width, height)),
			pixel_ratio: 1.0,
			reduced_motion: false,
			clock: 0.0,
			supports_observers: true,
			supports_frames: true,
			pending: HashSet::new(),
			observers: 0,
			frame_requests: 0,
			released: Rc::default(),
			next_handle: 0,
		}
	}
}

impl Host for FakeHost {
	fn measure(&self) -> Option<Size> {
		self.size
	}

	fn device_pixel_ratio(&self) -> f64 {
		self.pixel_ratio
	}

	fn prefers_reduced_motion(&self) -> bool {
		self.reduced_motion
	}

	fn now(&self) -> f64 {
		self.clock
	}

	fn request_frame(&mut self) -> Option<FrameHandle> {
		if !self.supports_frames {
			return None;
		}
		self.next_handle += 1;
		self.frame_requests += 1;
		let handle = FrameHandle(self.next_handle);
		self.pending.insert(handle);
		Some(handle)
	}

	fn cancel_frame(&mut self, handle: FrameHandle) {
		self.pending.remove(&handle);
		let (cancelled, disconnects) = self.released.get();
		self.released.set((cancelled + 1, disconnects));
	}

	fn observe(&mut self) -> bool {
		if self.supports_observers {
			self.observers += 2;
		}
		self.supports_observers
	}

	fn disconnect(&mut self) {
		self.observers = 0;
		let (cancelled, disconnects) = self.released.get();
		self.released.set((cancelled, disconnects + 1));
	}
}
