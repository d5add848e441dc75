use delve_core::Result;
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::centroid::{CaveOutput, Centroid, Tags};
use crate::context::{Cursor, GenerationContext};
use crate::rooms::{ensure_at_least, ensure_ordered, RoomGeometry};

/// A loose cluster of centroids scattered around the cursor.
///
/// Exits along a random cardinal axis, `next_location_scale * radius -
/// next_location_offset` blocks away, regardless of the heading.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CavernRoom {
    pub min_centroids: i32,
    pub max_centroids: i32,
    pub min_spread: i32,
    pub max_spread: i32,
    pub centroid_size_variance: i32,
    pub next_location_scale: i32,
    pub next_location_offset: i32,
}

impl Default for CavernRoom {
    fn default() -> Self {
        Self {
            min_centroids: 4,
            max_centroids: 7,
            min_spread: 1,
            max_spread: 2,
            centroid_size_variance: 0,
            next_location_scale: 1,
            next_location_offset: 3,
        }
    }
}

impl CavernRoom {
    /// Create a cavern room, checking every range.
    pub fn new(
        min_centroids: i32,
        max_centroids: i32,
        min_spread: i32,
        max_spread: i32,
        centroid_size_variance: i32,
        next_location_scale: i32,
        next_location_offset: i32,
    ) -> Result<Self> {
        let room = Self {
            min_centroids,
            max_centroids,
            min_spread,
            max_spread,
            centroid_size_variance,
            next_location_scale,
            next_location_offset,
        };
        room.validate()?;
        Ok(room)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        ensure_at_least("cavern", "centroids", self.min_centroids, 1)?;
        ensure_ordered("cavern", "centroids", self.min_centroids, self.max_centroids)?;
        ensure_at_least("cavern", "spread", self.min_spread, 1)?;
        ensure_ordered("cavern", "spread", self.min_spread, self.max_spread)?;
        ensure_at_least(
            "cavern",
            "centroidSizeVariance",
            self.centroid_size_variance,
            0,
        )
    }

    /// Scatter this cavern's centroids around `location`.
    pub(crate) fn scatter(
        &self,
        ctx: &mut GenerationContext<'_>,
        location: DVec3,
        radius: i32,
        tags: &Tags,
        out: &mut Vec<Centroid>,
    ) {
        let count = ctx.range_i32(self.min_centroids, self.max_centroids);
        let spread = (radius - 1).max(self.min_spread).min(self.max_spread);

        for _ in 0..count {
            let mut tx = ctx.next_int(spread) + 2;
            let ty = ctx.next_int(spread.saturating_add(2));
            let mut tz = ctx.next_int(spread) + 2;
            if ctx.next_bool() {
                tx = -tx;
            }
            if ctx.next_bool() {
                tz = -tz;
            }
            let mut size = ctx.next_int(self.centroid_size_variance.saturating_add(1));
            if ctx.next_bool() {
                size = -size;
            }

            let offset = DVec3::new(f64::from(tx), f64::from(ty), f64::from(tz));
            out.push(Centroid::new(
                location + offset,
                spread.saturating_add(size),
                tags,
            ));
        }
    }

    /// Step to a random cardinal neighbour.
    pub(crate) fn exit(
        &self,
        ctx: &mut GenerationContext<'_>,
        location: DVec3,
        radius: i32,
    ) -> DVec3 {
        let reach = f64::from(self.next_location_scale) * f64::from(radius)
            - f64::from(self.next_location_offset);
        let offset = match ctx.next_int(4) {
            0 => DVec3::new(reach, 0.0, 0.0),
            1 => DVec3::new(-reach, 0.0, 0.0),
            2 => DVec3::new(0.0, 0.0, reach),
            _ => DVec3::new(0.0, 0.0, -reach),
        };
        location + offset
    }
}

impl RoomGeometry for CavernRoom {
    type UserData = ();

    fn create_user_data(&self, _: &mut GenerationContext<'_>, _: Cursor, _: i32, _: &Tags) {}

    fn add_centroids(
        &self,
        ctx: &mut GenerationContext<'_>,
        cursor: Cursor,
        radius: i32,
        tags: &Tags,
        _data: &(),
        out: &mut CaveOutput,
    ) -> Result<()> {
        self.scatter(ctx, cursor.location, radius, tags, &mut out.centroids);
        Ok(())
    }

    fn adjust_location(
        &self,
        ctx: &mut GenerationContext<'_>,
        location: DVec3,
        _: DVec3,
        radius: i32,
        _: &(),
    ) -> DVec3 {
        self.exit(ctx, location, radius)
    }
}
