//! Descriptors handed to the vector-rendering collaborator.
//!
//! Every published frame is a `Vec<StrokeRender>` describing the complete visible state, never a
//! delta.

mod path;
pub use path::*;

use crate::engine::{PathCommand, Stroke};
use crate::geom::Bounds;
use crate::Color;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum LineCap {
	#[display("butt")]
	Butt,
	#[default]
	#[display("round")]
	Round,
	#[display("square")]
	Square,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum LineJoin {
	#[display("miter")]
	Miter,
	#[default]
	#[display("round")]
	Round,
	#[display("bevel")]
	Bevel,
}

#[derive(Debug, Clone, Copy, PartialEq, bon::Builder)]
pub struct StrokeStyle {
	#[builder(default = StrokeStyle::DEFAULT_WIDTH)]
	pub width: f32,
	#[builder(default)]
	pub cap: LineCap,
	#[builder(default)]
	pub join: LineJoin,
}

impl StrokeStyle {
	pub const DEFAULT_WIDTH: f32 = 20.0;
}

impl Default for StrokeStyle {
	fn default() -> Self {
		Self::builder().build()
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrokeRender {
	pub path: String,
	pub color: Color,
	pub style: StrokeStyle,
	/// Area touched by the stroke, including the pen radius.
	pub bounds: Bounds,
}

impl StrokeRender {
	pub fn new(segments: &[PathCommand], color: Color, style: StrokeStyle) -> Self {
		Self {
			path: serialize(segments),
			color,
			style,
			bounds: Bounds::containing(segments.iter().map(PathCommand::point))
				.inflated(0.5 * style.width),
		}
	}
}

/// Renders every stroke in full.
pub fn render_strokes(strokes: &[Stroke], style: StrokeStyle) -> Vec<StrokeRender> {
	strokes
		.iter()
		.map(|stroke| StrokeRender::new(stroke.segments(), stroke.color(), style))
		.collect()
}

/// Union of the damage regions of a frame.
pub fn frame_bounds(frame: &[StrokeRender]) -> Bounds {
	frame
		.iter()
		.fold(Bounds::empty(), |bounds, stroke| bounds.union(stroke.bounds))
}

#[cfg(test)]
mod tests {
	use super::*;
	use glam::vec2;

	fn strokes() -> Vec<Stroke> {
		let mut a = Stroke::new(vec2(0.0, 0.0), Color::rgb(255, 0, 0));
		a.line_to(vec2(1.0, 0.0));
		a.line_to(vec2(2.0, 0.0));
		let mut b = Stroke::new(vec2(5.0, 5.0), Color::rgb(0, 0, 255));
		b.line_to(vec2(6.0, 7.0));
		vec![a, b]
	}

	#[test]
	fn style_defaults() {
		let style = StrokeStyle::default();
		assert_eq!(style.width, 20.0);
		assert_eq!(style.cap, LineCap::Round);
		assert_eq!(style.join, LineJoin::Round);
		assert_eq!(style.cap.to_string(), "round");

		let style = StrokeStyle::builder().width(4.0).cap(LineCap::Square).build();
		assert_eq!(style.width, 4.0);
		assert_eq!(style.cap, LineCap::Square);
		assert_eq!(style.join, LineJoin::Round);
	}

	#[test]
	fn full_render() {
		let frame = render_strokes(&strokes(), StrokeStyle::default());
		assert_eq!(frame.len(), 2);
		assert_eq!(frame[0].path, "M 0 0 L 1 0 L 2 0");
		assert_eq!(frame[0].color, Color::rgb(255, 0, 0));
		assert_eq!(frame[1].path, "M 5 5 L 6 7");
	}

	#[test]
	fn bounds_include_pen_radius() {
		let style = StrokeStyle::builder().width(2.0).build();
		let frame = render_strokes(&strokes(), style);
		assert_eq!(frame[0].bounds.min(), vec2(-1.0, -1.0));
		assert_eq!(frame[0].bounds.max(), vec2(3.0, 1.0));

		let bounds = frame_bounds(&frame);
		assert_eq!(bounds.min(), vec2(-1.0, -1.0));
		assert_eq!(bounds.max(), vec2(7.0, 8.0));
		assert!(frame_bounds(&[]).is_empty());
	}
}
