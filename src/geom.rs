use glam::Vec2;

/// Axis-aligned bounding box in capture-surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
	min: Vec2,
	max: Vec2,
}

impl Bounds {
	pub fn new(min: Vec2, max: Vec2) -> Self {
		Self { min, max }
	}

	pub fn empty() -> Self {
		Self::new(Vec2::MAX, Vec2::MIN)
	}

	pub fn is_empty(&self) -> bool {
		self.min.x > self.max.x || self.min.y > self.max.y
	}

	pub fn min(&self) -> Vec2 {
		self.min
	}

	pub fn max(&self) -> Vec2 {
		self.max
	}

	pub fn size(&self) -> Vec2 {
		if self.is_empty() {
			Vec2::ZERO
		} else {
			self.max - self.min
		}
	}

	pub fn expanded_to_contain(self, point: Vec2) -> Self {
		Self::new(self.min.min(point), self.max.max(point))
	}

	pub fn containing(points: impl IntoIterator<Item = Vec2>) -> Self {
		points
			.into_iter()
			.fold(Self::empty(), |b, p| b.expanded_to_contain(p))
	}

	/// Grows the box by `radius` on every side. Empty boxes stay empty.
	pub fn inflated(self, radius: f32) -> Self {
		if self.is_empty() {
			return self;
		}
		Self::new(self.min - Vec2::splat(radius), self.max + Vec2::splat(radius))
	}

	pub fn union(self, other: Self) -> Self {
		match (self.is_empty(), other.is_empty()) {
			(true, _) => other,
			(_, true) => self,
			_ => Self::new(self.min.min(other.min), self.max.max(other.max)),
		}
	}

	pub fn contains(&self, point: Vec2) -> bool {
		!(point.x < self.min.x)
			&& !(point.y < self.min.y)
			&& !(point.x > self.max.x)
			&& !(point.y > self.max.y)
	}
}

impl Default for Bounds {
	fn default() -> Self {
		Self::empty()
	}
}
