use delve_core::math::rotate_around_y;
use delve_core::Result;
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::centroid::{CaveOutput, Centroid, Tags};
use crate::context::{Cursor, GenerationContext};
use crate::rooms::{ensure_ordered, RoomGeometry};

/// Rotates the heading about the vertical axis by an angle drawn from
/// `[min_angle, max_angle)` degrees. Both bounds are required in config.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnRoom {
    pub min_angle: f64,
    pub max_angle: f64,
}

impl TurnRoom {
    /// Create a turn room; fails if `max_angle < min_angle`.
    pub fn new(min_angle: f64, max_angle: f64) -> Result<Self> {
        let room = Self {
            min_angle,
            max_angle,
        };
        room.validate()?;
        Ok(room)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        ensure_ordered("turn", "angle", self.min_angle, self.max_angle)
    }
}

impl RoomGeometry for TurnRoom {
    type UserData = ();

    fn create_user_data(&self, _: &mut GenerationContext<'_>, _: Cursor, _: i32, _: &Tags) {}

    fn add_centroids(
        &self,
        _ctx: &mut GenerationContext<'_>,
        cursor: Cursor,
        radius: i32,
        tags: &Tags,
        _data: &(),
        out: &mut CaveOutput,
    ) -> Result<()> {
        out.push(Centroid::new(cursor.location, radius, tags));
        Ok(())
    }

    fn adjust_direction(&self, ctx: &mut GenerationContext<'_>, direction: DVec3, _: &()) -> DVec3 {
        let degrees = ctx.range_f64(self.min_angle, self.max_angle);
        rotate_around_y(direction, degrees.to_radians())
    }
}
