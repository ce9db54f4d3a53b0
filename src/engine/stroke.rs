use crate::Color;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display)]
pub enum PathCommand {
	#[display("M {x} {y}")]
	MoveTo { x: f32, y: f32 },
	#[display("L {x} {y}")]
	LineTo { x: f32, y: f32 },
}

impl PathCommand {
	pub fn move_to(point: Vec2) -> Self {
		Self::MoveTo {
			x: point.x,
			y: point.y,
		}
	}

	pub fn line_to(point: Vec2) -> Self {
		Self::LineTo {
			x: point.x,
			y: point.y,
		}
	}

	pub fn point(&self) -> Vec2 {
		match *self {
			Self::MoveTo { x, y } | Self::LineTo { x, y } => Vec2::new(x, y),
		}
	}
}

/// One continuous pointer drag.
///
/// The first segment is always a `MoveTo` and every later one a `LineTo`. The segment list is only
/// reachable through `Stroke::new` and `Stroke::line_to`, so no other shape can be built.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
	segments: Vec<PathCommand>,
	color: Color,
}

impl Stroke {
	pub fn new(start: Vec2, color: Color) -> Self {
		Self {
			segments: vec![PathCommand::move_to(start)],
			color,
		}
	}

	pub(crate) fn line_to(&mut self, point: Vec2) {
		self.segments.push(PathCommand::line_to(point));
	}

	pub fn segments(&self) -> &[PathCommand] {
		&self.segments
	}

	pub fn color(&self) -> Color {
		self.color
	}

	/// Number of segments, including the initial `MoveTo`. Never zero.
	pub fn len(&self) -> usize {
		self.segments.len()
	}

	pub fn start(&self) -> Vec2 {
		self.segments[0].point()
	}

	pub fn end(&self) -> Vec2 {
		self.segments[self.segments.len() - 1].point()
	}
}

/// All strokes of a drawing, in creation order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StrokeStore {
	strokes: Vec<Stroke>,
}

pub type SharedStore = Rc<RefCell<StrokeStore>>;

impl StrokeStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn shared(self) -> SharedStore {
		Rc::new(RefCell::new(self))
	}

	/// Appends a new stroke and returns its index.
	pub fn push(&mut self, stroke: Stroke) -> usize {
		self.strokes.push(stroke);
		self.strokes.len() - 1
	}

	pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Stroke> {
		self.strokes.get_mut(index)
	}

	pub fn get(&self, index: usize) -> Option<&Stroke> {
		self.strokes.get(index)
	}

	pub fn last(&self) -> Option<&Stroke> {
		self.strokes.last()
	}

	pub fn strokes(&self) -> &[Stroke] {
		&self.strokes
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Stroke> {
		self.strokes.iter()
	}

	pub fn len(&self) -> usize {
		self.strokes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.strokes.is_empty()
	}

	/// Total number of segments across all strokes; the length of a full replay in frames.
	pub fn segment_count(&self) -> usize {
		self.strokes.iter().map(Stroke::len).sum()
	}

	pub fn clear(&mut self) {
		self.strokes.clear();
	}
}

impl<'a> IntoIterator for &'a StrokeStore {
	type Item = &'a Stroke;
	type IntoIter = std::slice::Iter<'a, Stroke>;

	fn into_iter(self) -> Self::IntoIter {
		self.strokes.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use glam::vec2;

	#[test]
	fn new_stroke_starts_with_move() {
		let stroke = Stroke::new(vec2(1.0, 2.0), Color::BLACK);
		assert_eq!(stroke.len(), 1);
		assert_eq!(stroke.segments(), &[PathCommand::MoveTo { x: 1.0, y: 2.0 }]);
		assert_eq!(stroke.start(), stroke.end());
	}

	#[test]
	fn line_to_appends() {
		let mut stroke = Stroke::new(vec2(1.0, 2.0), Color::BLACK);
		stroke.line_to(vec2(3.0, 4.0));
		stroke.line_to(vec2(5.0, 6.0));
		assert_eq!(
			stroke.segments(),
			&[
				PathCommand::MoveTo { x: 1.0, y: 2.0 },
				PathCommand::LineTo { x: 3.0, y: 4.0 },
				PathCommand::LineTo { x: 5.0, y: 6.0 },
			]
		);
		assert_eq!(stroke.end(), vec2(5.0, 6.0));
	}

	#[test]
	fn command_display() {
		assert_eq!(PathCommand::move_to(vec2(0.0, 0.0)).to_string(), "M 0 0");
		assert_eq!(PathCommand::line_to(vec2(2.5, -1.0)).to_string(), "L 2.5 -1");
	}

	#[test]
	fn store_order() {
		let mut store = StrokeStore::new();
		assert!(store.is_empty());
		assert_eq!(store.push(Stroke::new(vec2(0.0, 0.0), Color::BLACK)), 0);
		assert_eq!(store.push(Stroke::new(vec2(1.0, 1.0), Color::WHITE)), 1);
		assert_eq!(store.len(), 2);
		assert_eq!(store.get(1).map(Stroke::color), Some(Color::WHITE));
		assert_eq!(store.last().map(Stroke::start), Some(vec2(1.0, 1.0)));
		assert_eq!(store.segment_count(), 2);

		store.clear();
		assert!(store.is_empty());
		assert_eq!(store.segment_count(), 0);
	}
}
