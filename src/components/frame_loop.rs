//! `requestAnimationFrame` loop tied to the lifetime of the view that owns it.
//!
//! The callback lives in a shared slot so it can re-request itself; that slot
//! is emptied when the owning view is cleaned up, which cancels the pending
//! frame and breaks the callback's reference to its own slot.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

/// Outstanding frame request of one loop.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Requests {
	pending: Option<i32>,
	stopped: bool,
}

impl Requests {
	fn can_request(&self) -> bool {
		!self.stopped && self.pending.is_none()
	}

	fn requested(&mut self, id: i32) {
		self.pending = Some(id);
	}

	fn fired(&mut self) {
		self.pending = None;
	}

	/// Stop for good. Returns the request to cancel, if any.
	fn stop(&mut self) -> Option<i32> {
		self.stopped = true;
		self.pending.take()
	}
}

/// A frame callback and its request bookkeeping.
#[derive(Default)]
pub struct FrameLoop {
	callback: Option<Closure<dyn FnMut()>>,
	requests: Requests,
}

/// Handle shared by the callback and the code that starts or stops it.
pub type SharedFrameLoop = Rc<RefCell<FrameLoop>>;

impl FrameLoop {
	/// An empty loop that stops when the current reactive owner is cleaned up.
	pub fn new_shared() -> SharedFrameLoop {
		let frame_loop: SharedFrameLoop = Rc::default();
		let on_unmount = StoredValue::new_local(frame_loop.clone());
		on_cleanup(move || {
			on_unmount.try_with_value(|frame_loop| {
				if let Ok(mut frame_loop) = frame_loop.try_borrow_mut() {
					frame_loop.stop();
				}
			});
		});
		frame_loop
	}

	/// Install `body` as the frame callback, replacing (and cancelling) any
	/// previous one. Frames keep coming while `body` returns `true`.
	pub fn set_body(this: &SharedFrameLoop, mut body: impl FnMut() -> bool + 'static) {
		let inner = this.clone();
		let callback = Closure::new(move || {
			inner.borrow_mut().requests.fired();
			if body() {
				inner.borrow_mut().request();
			}
		});
		let mut frame_loop = this.borrow_mut();
		frame_loop.stop();
		frame_loop.callback = Some(callback);
		frame_loop.requests = Requests::default();
	}

	/// Ask for the next frame unless one is already pending.
	pub fn request(&mut self) {
		if !self.requests.can_request() {
			return;
		}
		let (Some(cb), Some(window)) = (&self.callback, web_sys::window()) else {
			return;
		};
		if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
			self.requests.requested(id);
		}
	}

	/// Cancel the pending frame and drop the callback.
	pub fn stop(&mut self) {
		if let (Some(id), Some(window)) = (self.requests.stop(), web_sys::window()) {
			let _ = window.cancel_animation_frame(id);
		}
		self.callback = None;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn one_request_at_a_time() {
		let mut r = Requests::default();
		assert!(r.can_request());
		r.requested(7);
		assert!(!r.can_request());
		r.fired();
		assert!(r.can_request());
	}

	#[test]
	fn stopped_loop_cancels_pending_and_never_requests_again() {
		let mut r = Requests::default();
		r.requested(3);
		assert_eq!(r.stop(), Some(3));
		assert!(!r.can_request());
		// A frame already in flight when the view went away.
		r.fired();
		assert!(!r.can_request());
		assert_eq!(r.stop(), None);
	}

	#[test]
	fn stopping_an_idle_loop_has_nothing_to_cancel() {
		let mut r = Requests::default();
		assert_eq!(r.stop(), None);
		assert!(!r.can_request());
	}
}
