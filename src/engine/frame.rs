use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;

pub type FrameCallback = Box<dyn FnOnce()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("frame request {_0}")]
pub struct FrameHandle(u64);

/// A periodic frame-callback facility, in the manner of `requestAnimationFrame`.
///
/// Implementations must guarantee that a request cancelled with `cancel_frame` never fires, and must
/// never invoke a callback from inside `request_frame`.
pub trait FrameScheduler {
	fn request_frame(&self, callback: FrameCallback) -> FrameHandle;
	fn cancel_frame(&self, handle: FrameHandle);
}

#[derive(Default)]
struct ClockState {
	next_id: u64,
	frames: u64,
	pending: VecDeque<(FrameHandle, FrameCallback)>,
}

/// Deterministic frame clock driven by explicit calls to [`ManualFrameClock::advance`].
#[derive(Default)]
pub struct ManualFrameClock {
	state: RefCell<ClockState>,
}

impl fmt::Debug for ManualFrameClock {
	fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
		let state = self.state.borrow();
		fmt.debug_struct("ManualFrameClock")
			.field("frames", &state.frames)
			.field("pending", &state.pending.len())
			.finish()
	}
}

impl ManualFrameClock {
	pub fn new() -> Self {
		Self::default()
	}

	/// Runs one frame: fires every callback that was pending when called, in request order.
	/// Callbacks requested during the frame wait for the next one. Returns how many fired.
	pub fn advance(&self) -> usize {
		let due: Vec<FrameHandle> = {
			let mut state = self.state.borrow_mut();
			state.frames += 1;
			state.pending.iter().map(|(handle, _)| *handle).collect()
		};
		let mut fired = 0;
		for handle in due {
			// A callback earlier in this frame may have cancelled this one.
			let callback = {
				let mut state = self.state.borrow_mut();
				let position = state.pending.iter().position(|(h, _)| *h == handle);
				position.and_then(|i| state.pending.remove(i))
			};
			if let Some((_, callback)) = callback {
				callback();
				fired += 1;
			}
		}
		fired
	}

	/// Advances until nothing is pending or `max_frames` frames have run. Returns the number of
	/// frames that fired at least one callback.
	pub fn run_until_idle(&self, max_frames: usize) -> usize {
		let mut frames = 0;
		while frames < max_frames && self.pending() > 0 {
			self.advance();
			frames += 1;
		}
		frames
	}

	pub fn pending(&self) -> usize {
		self.state.borrow().pending.len()
	}

	/// Frames elapsed since creation.
	pub fn frames(&self) -> u64 {
		self.state.borrow().frames
	}
}

impl FrameScheduler for ManualFrameClock {
	fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
		let mut state = self.state.borrow_mut();
		let handle = FrameHandle(state.next_id);
		state.next_id += 1;
		state.pending.push_back((handle, callback));
		tracing::trace!(%handle, "frame requested");
		handle
	}

	fn cancel_frame(&self, handle: FrameHandle) {
		let mut state = self.state.borrow_mut();
		let before = state.pending.len();
		state.pending.retain(|(h, _)| *h != handle);
		if state.pending.len() != before {
			tracing::trace!(%handle, "frame cancelled");
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cell::Cell;
	use std::rc::Rc;

	#[test]
	fn fires_once() {
		let clock = ManualFrameClock::new();
		let count = Rc::new(Cell::new(0));
		{
			let count = count.clone();
			clock.request_frame(Box::new(move || count.set(count.get() + 1)));
		}
		assert_eq!(clock.pending(), 1);
		assert_eq!(count.get(), 0);
		assert_eq!(clock.advance(), 1);
		assert_eq!(count.get(), 1);
		assert_eq!(clock.advance(), 0);
		assert_eq!(count.get(), 1);
		assert_eq!(clock.frames(), 2);
	}

	#[test]
	fn cancelled_never_fires() {
		let clock = ManualFrameClock::new();
		let fired = Rc::new(Cell::new(false));
		let handle = {
			let fired = fired.clone();
			clock.request_frame(Box::new(move || fired.set(true)))
		};
		clock.cancel_frame(handle);
		// Cancelling twice is harmless.
		clock.cancel_frame(handle);
		assert_eq!(clock.advance(), 0);
		assert!(!fired.get());
	}

	#[test]
	fn requests_from_callbacks_wait_a_frame() {
		let clock = Rc::new(ManualFrameClock::new());
		let count = Rc::new(Cell::new(0));
		{
			let inner_clock = clock.clone();
			let count = count.clone();
			clock.request_frame(Box::new(move || {
				count.set(count.get() + 1);
				let count = count.clone();
				inner_clock.request_frame(Box::new(move || count.set(count.get() + 1)));
			}));
		}
		assert_eq!(clock.advance(), 1);
		assert_eq!(count.get(), 1);
		assert_eq!(clock.pending(), 1);
		assert_eq!(clock.run_until_idle(10), 1);
		assert_eq!(count.get(), 2);
	}

	#[test]
	fn callback_can_cancel_a_later_one() {
		let clock = Rc::new(ManualFrameClock::new());
		let fired = Rc::new(Cell::new(false));
		let victim = Rc::new(Cell::new(None));
		{
			let clock2 = clock.clone();
			let victim = victim.clone();
			clock.request_frame(Box::new(move || {
				if let Some(handle) = victim.get() {
					clock2.cancel_frame(handle);
				}
			}));
		}
		{
			let fired = fired.clone();
			victim.set(Some(clock.request_frame(Box::new(move || fired.set(true)))));
		}
		assert_eq!(clock.advance(), 1);
		assert!(!fired.get());
	}
}
