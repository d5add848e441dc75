//! Math utilities and helpers.

use glam::DVec3;

use crate::coords::WorldPos;

/// The maximum distance unit spheres can be apart and still leave no gaps,
/// when arranged in an axis-aligned grid.
pub const GAP_FACTOR: f64 = 1.154_700_538_379_251_5; // 2 / sqrt(3)

/// Rotate a vector around the vertical (Y) axis by `angle` radians.
///
/// A positive angle turns +X towards -Z, so `(1, 0, 0)` rotated by 90° is
/// `(0, 0, -1)`.
#[inline]
pub fn rotate_around_y(v: DVec3, angle: f64) -> DVec3 {
    let (sin, cos) = angle.sin_cos();
    DVec3::new(cos * v.x + sin * v.z, v.y, -sin * v.x + cos * v.z)
}

/// Heading angle of a vector in the horizontal plane, `atan2(z, x)`.
#[inline]
pub fn yaw(v: DVec3) -> f64 {
    v.z.atan2(v.x)
}

/// Integer axis-aligned bounding box over block positions (inclusive).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockBounds {
    /// Minimum corner
    pub min: WorldPos,
    /// Maximum corner
    pub max: WorldPos,
}

impl BlockBounds {
    /// Bounds covering a single block
    #[inline]
    pub const fn point(pos: WorldPos) -> Self {
        Self { min: pos, max: pos }
    }

    /// Extent along each axis, in blocks
    #[inline]
    pub const fn size(&self) -> (i64, i64, i64) {
        (
            self.max.x - self.min.x + 1,
            self.max.y - self.min.y + 1,
            self.max.z - self.min.z + 1,
        )
    }

    /// Check if a block is inside the bounds
    #[inline]
    pub const fn contains(&self, pos: WorldPos) -> bool {
        pos.x >= self.min.x
            && pos.x <= self.max.x
            && pos.y >= self.min.y
            && pos.y <= self.max.y
            && pos.z >= self.min.z
            && pos.z <= self.max.z
    }

    /// Expand bounds to include a block
    #[inline]
    pub fn expand_to_include(&mut self, pos: WorldPos) {
        self.min = WorldPos::new(
            self.min.x.min(pos.x),
            self.min.y.min(pos.y),
            self.min.z.min(pos.z),
        );
        self.max = WorldPos::new(
            self.max.x.max(pos.x),
            self.max.y.max(pos.y),
            self.max.z.max(pos.z),
        );
    }

    /// Merge two bounds
    #[inline]
    pub fn merge(&self, other: &BlockBounds) -> BlockBounds {
        let mut merged = *self;
        merged.expand_to_include(other.min);
        merged.expand_to_include(other.max);
        merged
    }
}
