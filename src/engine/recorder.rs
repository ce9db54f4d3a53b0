use super::{SharedStore, Stroke};
use crate::render::{self, StrokeRender, StrokeStyle};
use crate::util::Publisher;
use crate::Color;
use bon::bon;
use glam::Vec2;
use std::cell::Cell;

/// Turns pointer gestures into strokes.
///
/// Each mutation re-publishes the full capture state on `changes`. Methods take `&self` and release
/// every borrow before publishing, so listeners may call back in.
#[derive(Debug)]
pub struct StrokeRecorder {
	store: SharedStore,
	changes: Publisher<[StrokeRender]>,
	style: StrokeStyle,
	min_distance: f32,
	active: Cell<Option<usize>>,
}

#[bon]
impl StrokeRecorder {
	#[builder]
	pub fn new(
		store: SharedStore,
		changes: Publisher<[StrokeRender]>,
		#[builder(default)] style: StrokeStyle,
		// Points closer than this to the previous kept point are dropped. Zero keeps every point.
		#[builder(default)]
		min_distance: f32,
	) -> Self {
		Self {
			store,
			changes,
			style,
			min_distance: min_distance.max(0.0),
			active: Cell::new(None),
		}
	}

	/// Starts a new stroke at `point`, implicitly ending any stroke still in progress. Returns the
	/// index of the new stroke.
	pub fn begin(&self, point: Vec2, color: Color) -> usize {
		let index = self.store.borrow_mut().push(Stroke::new(point, color));
		if let Some(previous) = self.active.replace(Some(index)) {
			tracing::trace!(previous, "stroke implicitly ended");
		}
		tracing::debug!(index, %color, "stroke started");
		self.publish();
		index
	}

	/// Extends the active stroke with a line to `point`. Returns whether a segment was added.
	///
	/// Without an active stroke (no `begin`, gesture ended, or store cleared since) this does nothing.
	pub fn extend(&self, point: Vec2) -> bool {
		let Some(index) = self.active.get() else {
			tracing::debug!(?point, "update without active stroke ignored");
			return false;
		};
		{
			let mut store = self.store.borrow_mut();
			let Some(stroke) = store.get_mut(index) else {
				tracing::debug!(index, "active stroke no longer in store");
				self.active.set(None);
				return false;
			};
			if stroke.end().distance(point) < self.min_distance {
				tracing::trace!(?point, "point within minimum distance dropped");
				return false;
			}
			stroke.line_to(point);
		}
		self.publish();
		true
	}

	/// Ends the active gesture. Later updates are ignored until the next `begin`.
	pub fn end(&self) {
		if let Some(index) = self.active.take() {
			tracing::debug!(index, "stroke ended");
		}
	}

	pub fn is_active(&self) -> bool {
		self.active.get().is_some()
	}

	pub fn active_index(&self) -> Option<usize> {
		self.active.get()
	}

	pub fn min_distance(&self) -> f32 {
		self.min_distance
	}

	/// Renders the whole store.
	pub fn frame(&self) -> Vec<StrokeRender> {
		render::render_strokes(self.store.borrow().strokes(), self.style)
	}

	/// Publishes the current capture state to every listener.
	pub fn publish(&self) {
		let frame = self.frame();
		self.changes.publish(&frame);
	}
}
