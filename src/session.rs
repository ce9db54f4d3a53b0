use crate::engine::{
	FrameScheduler, ReplayScheduler, ReplayState, SharedStore, StrokeRecorder, StrokeStore,
};
use crate::render::StrokeRender;
use crate::util::{Publisher, Subscription};
use crate::{Color, SessionConfig};
use glam::Vec2;
use std::cell::Cell;
use std::rc::Rc;

/// One drawing canvas: the stroke store plus its recorder, replay scheduler and pen.
///
/// Two channels carry render descriptors out. The capture channel carries the full drawing after
/// every change to the store; the replay channel carries the partially revealed drawing on every
/// replay tick. Every method takes `&self` and holds no borrow while listeners run, so listeners
/// holding the session behind an `Rc` may call back into it.
#[derive(Debug)]
pub struct DrawingSession {
	config: SessionConfig,
	store: SharedStore,
	recorder: StrokeRecorder,
	replay: ReplayScheduler,
	pen_color: Cell<Color>,
	capture: Publisher<[StrokeRender]>,
	playback: Publisher<[StrokeRender]>,
}

impl DrawingSession {
	pub fn new(config: SessionConfig, frames: Rc<dyn FrameScheduler>) -> Self {
		let store = StrokeStore::new().shared();
		let capture = Publisher::new();
		let playback = Publisher::new();
		let recorder = StrokeRecorder::builder()
			.store(store.clone())
			.changes(capture.clone())
			.style(config.style)
			.min_distance(config.min_distance)
			.build();
		let replay = ReplayScheduler::builder()
			.store(store.clone())
			.frames(frames)
			.output(playback.clone())
			.style(config.style)
			.build();
		Self {
			pen_color: Cell::new(config.pen_color),
			config,
			store,
			recorder,
			replay,
			capture,
			playback,
		}
	}

	pub fn config(&self) -> &SessionConfig {
		&self.config
	}

	fn capture_blocked(&self) -> bool {
		!self.config.capture_during_replay && self.replay.is_playing()
	}

	/// Starts a stroke at `point` in the current pen color. Returns the new stroke's index, or `None`
	/// if capture is disabled while replaying.
	pub fn begin_gesture(&self, point: Vec2) -> Option<usize> {
		if self.capture_blocked() {
			tracing::debug!("gesture ignored during replay");
			return None;
		}
		Some(self.recorder.begin(point, self.pen_color.get()))
	}

	/// Extends the stroke in progress. Returns whether a segment was added.
	pub fn update_gesture(&self, point: Vec2) -> bool {
		if self.capture_blocked() {
			return false;
		}
		self.recorder.extend(point)
	}

	pub fn end_gesture(&self) {
		self.recorder.end();
	}

	pub fn start_replay(&self) -> bool {
		self.replay.start()
	}

	pub fn stop_replay(&self) -> bool {
		self.replay.stop()
	}

	/// Removes every stroke. A running replay is cancelled first, so none of its frames fire
	/// afterwards. Both channels then publish an empty frame.
	pub fn clear(&self) {
		self.replay.stop();
		self.recorder.end();
		self.store.borrow_mut().clear();
		tracing::debug!("drawing cleared");
		self.capture.publish(&[]);
		self.playback.publish(&[]);
	}

	/// Only affects strokes started after the call.
	pub fn set_pen_color(&self, color: Color) {
		tracing::debug!(%color, "pen color changed");
		self.pen_color.set(color);
	}

	pub fn pen_color(&self) -> Color {
		self.pen_color.get()
	}

	pub fn replay_state(&self) -> ReplayState {
		self.replay.state()
	}

	pub fn is_replaying(&self) -> bool {
		self.replay.is_playing()
	}

	pub fn is_drawing(&self) -> bool {
		self.recorder.is_active()
	}

	pub fn with_store<R>(&self, f: impl FnOnce(&StrokeStore) -> R) -> R {
		f(&*self.store.borrow())
	}

	/// The full drawing as the capture channel last published it.
	pub fn capture_frame(&self) -> Vec<StrokeRender> {
		self.recorder.frame()
	}

	pub fn subscribe_capture(&self, listener: impl Fn(&[StrokeRender]) + 'static) -> Subscription {
		self.capture.subscribe(listener)
	}

	pub fn subscribe_replay(&self, listener: impl Fn(&[StrokeRender]) + 'static) -> Subscription {
		self.playback.subscribe(listener)
	}
}

impl Drop for DrawingSession {
	fn drop(&mut self) {
		if self.replay.stop() {
			tracing::debug!("replay cancelled by session teardown");
		}
	}
}
