//! Freehand stroke capture and animated, stroke-by-stroke replay.
//!
//! Pointer gestures go in through [`DrawingSession`] and come out as [`render::StrokeRender`]
//! descriptors: the full drawing on every capture change, and a progressively revealed drawing on
//! every replay frame. Rasterization, widgets and the frame source are left to the embedder; the
//! frame source plugs in through [`engine::FrameScheduler`].

pub(crate) mod util;
pub use util::{Publisher, ResultExt, Subscription};

pub mod engine;
pub mod geom;
pub mod render;

mod color;
pub use color::*;

mod config;
pub use config::*;

mod session;
pub use session::*;
