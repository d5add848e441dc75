use delve_core::Result;
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::centroid::{CaveOutput, Centroid, Tags};
use crate::context::{Cursor, GenerationContext};
use crate::rooms::{ensure_at_least, ensure_ordered, RoomGeometry};

/// A straight run of centroids pitched up or down. Pitch is in degrees,
/// positive values descend.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VerticalRoom {
    pub min_pitch: f64,
    pub max_pitch: f64,
    pub min_length: i32,
    pub max_length: i32,
}

impl Default for VerticalRoom {
    fn default() -> Self {
        Self {
            min_pitch: 90.0,
            max_pitch: 90.0,
            min_length: 3,
            max_length: 5,
        }
    }
}

/// Sampled pitch (radians) and number of centroids.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalShape {
    pub pitch: f64,
    pub length: i32,
}

impl VerticalShape {
    /// Offset between consecutive centroids.
    fn step(self, direction: DVec3, radius: i32) -> DVec3 {
        let r = f64::from(radius);
        direction * (r * self.pitch.cos()) + DVec3::new(0.0, r * (-self.pitch).sin(), 0.0)
    }
}

impl VerticalRoom {
    /// Create a vertical room, checking both ranges.
    pub fn new(min_pitch: f64, max_pitch: f64, min_length: i32, max_length: i32) -> Result<Self> {
        let room = Self {
            min_pitch,
            max_pitch,
            min_length,
            max_length,
        };
        room.validate()?;
        Ok(room)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        ensure_ordered("vertical", "pitch", self.min_pitch, self.max_pitch)?;
        ensure_at_least("vertical", "length", self.min_length, 1)?;
        ensure_ordered("vertical", "length", self.min_length, self.max_length)
    }
}

impl RoomGeometry for VerticalRoom {
    type UserData = VerticalShape;

    fn create_user_data(
        &self,
        ctx: &mut GenerationContext<'_>,
        _: Cursor,
        _: i32,
        _: &Tags,
    ) -> VerticalShape {
        let pitch = ctx.range_f64(self.min_pitch, self.max_pitch).to_radians();
        let length = ctx.range_i32(self.min_length, self.max_length);
        VerticalShape { pitch, length }
    }

    fn add_centroids(
        &self,
        _ctx: &mut GenerationContext<'_>,
        cursor: Cursor,
        radius: i32,
        tags: &Tags,
        shape: &VerticalShape,
        out: &mut CaveOutput,
    ) -> Result<()> {
        let step = shape.step(cursor.direction, radius);
        let mut pos = cursor.location;
        for _ in 0..shape.length {
            out.push(Centroid::new(pos, radius, tags));
            pos += step;
        }
        Ok(())
    }

    fn adjust_location(
        &self,
        _: &mut GenerationContext<'_>,
        location: DVec3,
        direction: DVec3,
        radius: i32,
        shape: &VerticalShape,
    ) -> DVec3 {
        location + shape.step(direction, radius) * f64::from(shape.length)
    }
}
