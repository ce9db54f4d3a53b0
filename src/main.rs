use glam::{vec2, Vec2};
use retrace::engine::ManualFrameClock;
use retrace::{Color, DrawingSession, ResultExt, SessionConfig};
use std::f32::consts::TAU;
use std::rc::Rc;

#[derive(thiserror::Error, Debug)]
#[error("no global tracing subscriber set")]
struct NoTracingSubscriber;

fn configure_tracing() -> anyhow::Result<()> {
	let max_level = if cfg!(debug_assertions) {
		tracing::Level::TRACE
	} else {
		tracing::Level::INFO
	};
	tracing::subscriber::set_global_default(
		tracing_subscriber::FmtSubscriber::builder()
			.with_max_level(max_level)
			.finish(),
	)
	.map_err(|_| NoTracingSubscriber)?;
	Ok(())
}

fn configure_logging() -> anyhow::Result<()> {
	configure_tracing()?;

	// Redirect `log` to `tracing` for any dependency that logs through `log`.
	#[cfg(feature = "log")]
	tracing_log::LogTracer::init()?;
	Ok(())
}

/// Samples `f` over `[0, 1]` as a pointer drag of `steps` updates.
fn gesture(steps: usize, f: impl Fn(f32) -> Vec2) -> Vec<Vec2> {
	(0..=steps).map(|i| f(i as f32 / steps as f32)).collect()
}

fn draw(session: &DrawingSession, points: &[Vec2]) {
	let Some((first, rest)) = points.split_first() else {
		return;
	};
	session.begin_gesture(*first);
	for point in rest {
		session.update_gesture(*point);
	}
	session.end_gesture();
}

fn main() -> anyhow::Result<()> {
	if let Err(error) = configure_logging() {
		// We can technically continue without logging.
		eprintln!("{error}");
	}

	let pen_color = std::env::args()
		.nth(1)
		.and_then(|arg| Color::parse(&arg).ok_or_warn("ignoring pen color argument"))
		.unwrap_or_default();

	let config = SessionConfig::builder().pen_color(pen_color).build();
	let frame_interval = config.frame_interval;
	let clock = Rc::new(ManualFrameClock::new());
	let session = DrawingSession::new(config, clock.clone());

	let _replay_log = session.subscribe_replay(|frame| {
		for (i, stroke) in frame.iter().enumerate() {
			tracing::info!(
				stroke = i,
				color = %stroke.color,
				width = stroke.style.width,
				path = %stroke.path,
				"replay frame"
			);
		}
	});

	draw(
		&session,
		&gesture(12, |t| vec2(100.0, 100.0) + 60.0 * Vec2::from_angle(TAU * t)),
	);
	session.set_pen_color(Color::parse("#0068f0")?);
	draw(&session, &gesture(6, |t| vec2(40.0 + 120.0 * t, 200.0)));

	let segments = session.with_store(|store| store.segment_count());
	tracing::info!(segments, "replaying");
	session.start_replay();
	while session.is_replaying() {
		std::thread::sleep(frame_interval);
		clock.advance();
	}
	tracing::info!(frames = clock.frames(), "replay finished");
	Ok(())
}
