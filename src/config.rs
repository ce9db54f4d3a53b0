use crate::render::StrokeStyle;
use crate::Color;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct SessionConfig {
	/// Width, cap and join applied to every emitted stroke.
	#[builder(default)]
	pub style: StrokeStyle,

	/// Minimum distance between consecutive captured points. Zero keeps every pointer update, which
	/// lets slow drags grow strokes without bound.
	#[builder(default)]
	pub min_distance: f32,

	/// Pen color for strokes started before any `set_pen_color`.
	#[builder(default)]
	pub pen_color: Color,

	/// Whether gestures are recorded while a replay is running. Strokes recorded mid-replay are
	/// never part of that replay.
	#[builder(default = true)]
	pub capture_during_replay: bool,

	/// Target spacing of frame ticks for drivers that pace a frame clock themselves.
	#[builder(default = SessionConfig::DEFAULT_FRAME_INTERVAL)]
	pub frame_interval: Duration,
}

impl SessionConfig {
	pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);
}

impl Default for SessionConfig {
	fn default() -> Self {
		Self::builder().build()
	}
}
