//! Textual path descriptors.
//!
//! The grammar is the SVG path-data subset `M x y` / `L x y`, one instruction per command separated
//! by single spaces. Numbers use the shortest representation that round-trips the `f32`, so equal
//! command sequences always serialize to identical strings.

use crate::engine::PathCommand;
use itertools::Itertools;
use std::fmt;

/// Serializes `commands` in order. Any prefix of a stroke's segments is a valid input.
pub fn serialize(commands: &[PathCommand]) -> String {
	commands.iter().join(" ")
}

/// Streaming form of [`serialize`].
pub fn write_path(out: &mut impl fmt::Write, commands: &[PathCommand]) -> fmt::Result {
	for (i, command) in commands.iter().enumerate() {
		if i > 0 {
			out.write_char(' ')?;
		}
		write!(out, "{command}")?;
	}
	Ok(())
}
