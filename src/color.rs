use glam::*;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum ColorError {
	#[error("invalid color {input:?}")]
	Parse {
		input: String,
		#[source]
		source: csscolorparser::ParseColorError,
	},
}

static_assertions::assert_impl_all!(ColorError: std::error::Error, Send, Sync);

/// An 8-bit RGBA pen color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: u8,
}

impl Color {
	pub const BLACK: Color = Color::rgb(0, 0, 0);
	pub const WHITE: Color = Color::rgb(255, 255, 255);

	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self::rgba(r, g, b, 255)
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self { r, g, b, a }
	}

	/// Parses any CSS color: hex, named, `rgb()`, `hsl()` and friends.
	pub fn parse(input: &str) -> Result<Self, ColorError> {
		let [r, g, b, a] = csscolorparser::parse(input)
			.map_err(|source| ColorError::Parse {
				input: input.to_owned(),
				source,
			})?
			.to_rgba8();
		Ok(Self::rgba(r, g, b, a))
	}

	/// Converts a perceptual OKLab coordinate, as produced by a lightness/chroma picker, to an opaque
	/// sRGB color. Out-of-gamut channels are clamped.
	pub fn from_oklab(lab: Vec3) -> Self {
		let rgb = linear_srgb_to_rgb(oklab_to_linear_srgb(lab));
		let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
		Self::rgb(channel(rgb.x), channel(rgb.y), channel(rgb.z))
	}

	pub fn is_opaque(&self) -> bool {
		self.a == 255
	}

	/// `#rrggbb`, or `#rrggbbaa` when not opaque.
	pub fn to_hex(&self) -> String {
		self.to_string()
	}
}

impl Default for Color {
	fn default() -> Self {
		Self::BLACK
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
		if !self.is_opaque() {
			write!(f, "{:02x}", self.a)?;
		}
		Ok(())
	}
}

impl FromStr for Color {
	type Err = ColorError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

fn oklab_to_linear_srgb(lab: Vec3) -> Vec3 {
	#[cfg_attr(rustfmt, rustfmt_skip)]
	static LMS: Mat3 = Mat3::from_cols_array(&[
		1.0, 1.0, 1.0,
		0.3963377774, -0.1055613458, -0.0894841775,
		0.2158037573, -0.0638541728, -1.2914855480]);
	#[cfg_attr(rustfmt, rustfmt_skip)]
	static RGB: Mat3 = Mat3::from_cols_array(&[
		4.0767416621, -1.2684380046, -0.0041960863,
		-3.3077115913, 2.6097574011, -0.7034186147,
		0.2309699292, -0.3413193965, 1.7076147010]);
	let lms = LMS * lab;
	RGB * (lms * lms * lms)
}

fn linear_srgb_to_rgb(linear: Vec3) -> Vec3 {
	vec3(srgb_gamma(linear.x), srgb_gamma(linear.y), srgb_gamma(linear.z))
}

fn srgb_gamma(x: f32) -> f32 {
	if x >= 0.0031308 {
		1.055 * x.powf(1.0 / 2.4) - 0.055
	} else {
		12.92 * x
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_hex() -> anyhow::Result<()> {
		assert_eq!(Color::parse("#ff0000")?, Color::rgb(255, 0, 0));
		assert_eq!("#00ff0080".parse::<Color>()?, Color::rgba(0, 255, 0, 128));
		Ok(())
	}

	#[test]
	fn parse_named() -> anyhow::Result<()> {
		assert_eq!(Color::parse("black")?, Color::BLACK);
		assert_eq!(Color::parse("white")?, Color::WHITE);
		Ok(())
	}

	#[test]
	fn parse_invalid() {
		let error = Color::parse("not a color").unwrap_err();
		assert_eq!(error.to_string(), "invalid color \"not a color\"");
	}

	#[test]
	fn display() {
		assert_eq!(Color::rgb(255, 0, 0).to_hex(), "#ff0000");
		assert_eq!(Color::rgba(1, 2, 3, 4).to_string(), "#01020304");
		assert_eq!(Color::default().to_string(), "#000000");
	}

	#[test]
	fn oklab_extremes() {
		assert_eq!(Color::from_oklab(Vec3::ZERO), Color::BLACK);
		assert_eq!(Color::from_oklab(vec3(1.0, 0.0, 0.0)), Color::WHITE);
	}

	#[test]
	fn oklab_red() {
		// Reference OKLab coordinates of sRGB red.
		let red = Color::from_oklab(vec3(0.627955, 0.224863, 0.125846));
		assert!(red.r >= 254, "{red}");
		assert!(red.g <= 1, "{red}");
		assert!(red.b <= 1, "{red}");
	}

	#[test]
	fn oklab_gray_axis() {
		for l in [0.25, 0.5, 0.75, 1.0] {
			let linear = oklab_to_linear_srgb(vec3(l, 0.0, 0.0));
			approx::assert_abs_diff_eq!(linear.x, l * l * l, epsilon = 1e-4);
			approx::assert_abs_diff_eq!(linear.y, linear.x, epsilon = 1e-4);
			approx::assert_abs_diff_eq!(linear.z, linear.x, epsilon = 1e-4);
		}
	}
}
