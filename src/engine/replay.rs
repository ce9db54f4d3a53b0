use super::{FrameHandle, FrameScheduler, SharedStore, Stroke, StrokeStore};
use crate::render::{StrokeRender, StrokeStyle};
use crate::util::Publisher;
use bon::bon;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Position of a running replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playback {
	stroke_index: usize,
	segment_index: usize,
	// Segment count of every stroke when the replay started. Strokes captured afterwards, or
	// segments appended afterwards, are not replayed.
	segment_counts: Vec<usize>,
}

impl Playback {
	fn new(segment_counts: Vec<usize>) -> Self {
		Self {
			stroke_index: 0,
			segment_index: 0,
			segment_counts,
		}
	}

	pub fn stroke_index(&self) -> usize {
		self.stroke_index
	}

	pub fn segment_index(&self) -> usize {
		self.segment_index
	}

	pub fn stroke_count(&self) -> usize {
		self.segment_counts.len()
	}

	/// Number of ticks a full replay takes.
	pub fn total_segments(&self) -> usize {
		self.segment_counts.iter().sum()
	}

	/// Number of segments revealed so far.
	pub fn revealed_segments(&self) -> usize {
		self.segment_counts[..self.stroke_index].iter().sum::<usize>() + self.segment_index
	}
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum ReplayState {
	#[default]
	Idle,
	Playing(Playback),
}

impl ReplayState {
	pub fn is_playing(&self) -> bool {
		matches!(self, Self::Playing(_))
	}

	/// Zero while idle.
	pub fn stroke_index(&self) -> usize {
		match self {
			Self::Idle => 0,
			Self::Playing(playback) => playback.stroke_index,
		}
	}

	/// Zero while idle.
	pub fn segment_index(&self) -> usize {
		match self {
			Self::Idle => 0,
			Self::Playing(playback) => playback.segment_index,
		}
	}
}

enum Step {
	Continue(Vec<StrokeRender>),
	Finished(Vec<StrokeRender>),
	Aborted,
}

struct ReplayCore {
	store: SharedStore,
	frames: Rc<dyn FrameScheduler>,
	output: Publisher<[StrokeRender]>,
	style: StrokeStyle,
	state: ReplayState,
	pending: Option<FrameHandle>,
	// Bumped on every start and stop. A frame callback only acts if the generation it was scheduled
	// under is still current.
	generation: u64,
}

impl ReplayCore {
	fn advance(&mut self) -> Step {
		let ReplayState::Playing(playback) = &mut self.state else {
			return Step::Aborted;
		};
		let store = self.store.borrow();
		let stroke_index = playback.stroke_index;
		let count = playback
			.segment_counts
			.get(stroke_index)
			.copied()
			.filter(|&count| store.get(stroke_index).is_some_and(|s| s.len() >= count));
		let Some(count) = count else {
			tracing::debug!(stroke_index, strokes = store.len(), "replayed stroke left the store");
			self.state = ReplayState::Idle;
			return Step::Aborted;
		};

		playback.segment_index += 1;
		debug_assert!(playback.segment_index <= count);
		let frame = reveal(
			&store,
			&playback.segment_counts,
			stroke_index,
			playback.segment_index,
			self.style,
		);
		tracing::trace!(stroke_index, segment_index = playback.segment_index, "replay tick");

		if playback.segment_index < count {
			Step::Continue(frame)
		} else if stroke_index + 1 < playback.segment_counts.len() {
			playback.stroke_index += 1;
			playback.segment_index = 0;
			Step::Continue(frame)
		} else {
			tracing::debug!("replay finished");
			self.state = ReplayState::Idle;
			Step::Finished(frame)
		}
	}
}

/// Renders strokes `..stroke_index` as they were at the start of the replay, followed by the first
/// `segment_index` segments of the stroke at `stroke_index`.
fn reveal(
	store: &StrokeStore,
	segment_counts: &[usize],
	stroke_index: usize,
	segment_index: usize,
	style: StrokeStyle,
) -> Vec<StrokeRender> {
	store.strokes()[..=stroke_index]
		.iter()
		.zip(segment_counts)
		.enumerate()
		.map(|(i, (stroke, &count))| {
			let visible = if i == stroke_index { segment_index } else { count };
			let segments = &stroke.segments()[..visible.min(stroke.len())];
			StrokeRender::new(segments, stroke.color(), style)
		})
		.collect()
}

/// Frame-driven, progressive reveal of the strokes in a store.
///
/// Every tick reveals one more segment, so a replay over strokes of `n1..nm` segments ends after
/// exactly `n1 + .. + nm` ticks. Each tick publishes the full visible state on the output channel.
/// Dropping the scheduler cancels any pending frame.
pub struct ReplayScheduler {
	core: Rc<RefCell<ReplayCore>>,
}

impl fmt::Debug for ReplayScheduler {
	fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
		let core = self.core.borrow();
		fmt.debug_struct("ReplayScheduler")
			.field("state", &core.state)
			.field("pending", &core.pending)
			.finish()
	}
}

#[bon]
impl ReplayScheduler {
	#[builder]
	pub fn new(
		store: SharedStore,
		frames: Rc<dyn FrameScheduler>,
		output: Publisher<[StrokeRender]>,
		#[builder(default)] style: StrokeStyle,
	) -> Self {
		Self {
			core: Rc::new(RefCell::new(ReplayCore {
				store,
				frames,
				output,
				style,
				state: ReplayState::Idle,
				pending: None,
				generation: 0,
			})),
		}
	}

	/// Starts replaying from the first stroke. Returns `false`, doing nothing, if a replay is already
	/// running or there is nothing to replay.
	pub fn start(&self) -> bool {
		{
			let mut core = self.core.borrow_mut();
			if core.state.is_playing() {
				tracing::debug!("replay already running");
				return false;
			}
			let segment_counts: Vec<usize> = core.store.borrow().iter().map(Stroke::len).collect();
			if segment_counts.is_empty() {
				tracing::debug!("nothing to replay");
				return false;
			}
			let playback = Playback::new(segment_counts);
			tracing::debug!(
				strokes = playback.stroke_count(),
				segments = playback.total_segments(),
				"replay started"
			);
			core.generation += 1;
			core.state = ReplayState::Playing(playback);
		}
		Self::schedule(&self.core);
		true
	}

	/// Cancels the pending frame, if any, and returns to `Idle`. Returns whether a replay was running.
	pub fn stop(&self) -> bool {
		let mut core = self.core.borrow_mut();
		if let Some(handle) = core.pending.take() {
			core.frames.cancel_frame(handle);
		}
		core.generation += 1;
		let was_playing = std::mem::take(&mut core.state).is_playing();
		if was_playing {
			tracing::debug!("replay stopped");
		}
		was_playing
	}

	pub fn state(&self) -> ReplayState {
		self.core.borrow().state.clone()
	}

	pub fn is_playing(&self) -> bool {
		self.core.borrow().state.is_playing()
	}

	pub fn pending_frame(&self) -> Option<FrameHandle> {
		self.core.borrow().pending
	}

	fn schedule(core: &Rc<RefCell<ReplayCore>>) {
		let (frames, generation) = {
			let core = core.borrow();
			(core.frames.clone(), core.generation)
		};
		let weak: Weak<RefCell<ReplayCore>> = Rc::downgrade(core);
		let handle = frames.request_frame(Box::new(move || {
			if let Some(core) = weak.upgrade() {
				Self::tick(&core, generation);
			}
		}));
		core.borrow_mut().pending = Some(handle);
	}

	fn tick(core: &Rc<RefCell<ReplayCore>>, generation: u64) {
		let (step, output) = {
			let mut core = core.borrow_mut();
			if core.generation != generation {
				tracing::trace!(generation, "stale replay frame ignored");
				return;
			}
			core.pending = None;
			(core.advance(), core.output.clone())
		};
		match step {
			Step::Continue(frame) => {
				// Schedule before publishing so a listener that stops the replay cancels this request.
				Self::schedule(core);
				output.publish(&frame);
			}
			Step::Finished(frame) => output.publish(&frame),
			Step::Aborted => {}
		}
	}
}

impl Drop for ReplayScheduler {
	fn drop(&mut self) {
		self.stop();
	}
}
