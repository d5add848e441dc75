use std::f64::consts::{FRAC_PI_2, PI};

use delve_core::math::rotate_around_y;
use delve_core::Result;
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::centroid::{CaveOutput, Centroid, Tags};
use crate::context::{Cursor, GenerationContext};
use crate::rooms::{ensure_ordered, CavernRoom, RoomGeometry};

/// Two levels side by side: the main path and a raised ledge beside it, both
/// built from caverns. Which level is generated first is a coin flip.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShelfRoom {
    pub min_shelf_height: i32,
    pub max_shelf_height: i32,
    pub min_shelf_size: i32,
    pub max_shelf_size: i32,
}

impl Default for ShelfRoom {
    fn default() -> Self {
        Self {
            min_shelf_height: 6,
            max_shelf_height: 10,
            min_shelf_size: 3,
            max_shelf_size: 3,
        }
    }
}

/// Centroids of both levels, and where the main path continues.
#[derive(Clone, Debug, PartialEq)]
pub struct ShelfLayout {
    pub next_location: DVec3,
    pub centroids: Vec<Centroid>,
}

impl ShelfRoom {
    /// Cavern used for each segment of a level.
    pub const SMALL: CavernRoom = CavernRoom {
        min_centroids: 4,
        max_centroids: 7,
        min_spread: 4,
        max_spread: i32::MAX,
        centroid_size_variance: 0,
        next_location_scale: 1,
        next_location_offset: 3,
    };

    /// Cavern opening up the lower end of a shelf.
    pub const LARGE: CavernRoom = CavernRoom {
        min_centroids: 3,
        max_centroids: 7,
        min_spread: 3,
        max_spread: i32::MAX,
        centroid_size_variance: 1,
        next_location_scale: 2,
        next_location_offset: 2,
    };

    /// Create a shelf room, checking both ranges.
    pub fn new(
        min_shelf_height: i32,
        max_shelf_height: i32,
        min_shelf_size: i32,
        max_shelf_size: i32,
    ) -> Result<Self> {
        let room = Self {
            min_shelf_height,
            max_shelf_height,
            min_shelf_size,
            max_shelf_size,
        };
        room.validate()?;
        Ok(room)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        ensure_ordered(
            "shelf",
            "shelfHeight",
            self.min_shelf_height,
            self.max_shelf_height,
        )?;
        ensure_ordered(
            "shelf",
            "shelfSize",
            self.min_shelf_size,
            self.max_shelf_size,
        )
    }

    /// Start of the ledge: raised, and nudged sideways off the main path.
    fn ledge_start(&self, ctx: &mut GenerationContext<'_>, cursor: Cursor) -> DVec3 {
        let rise = ctx.range_i32(self.min_shelf_height, self.max_shelf_height);
        let side = f64::from(ctx.next_sign());
        let swing = FRAC_PI_2 + ctx.next_f64() * PI / 18.0 * side;
        cursor.location + DVec3::new(0.0, f64::from(rise), 0.0)
            + rotate_around_y(cursor.direction, swing)
    }

    /// A run of small caverns, each followed by a jittered step forward.
    fn run(
        ctx: &mut GenerationContext<'_>,
        mut location: DVec3,
        direction: DVec3,
        radius: i32,
        segments: i32,
        tags: &Tags,
        out: &mut Vec<Centroid>,
    ) -> DVec3 {
        for _ in 0..segments {
            location = place(&Self::SMALL, ctx, location, radius, tags, out);
            location = ctx.vary(location);
            location += direction * f64::from(radius);
        }
        location
    }

    fn from_bottom(
        &self,
        ctx: &mut GenerationContext<'_>,
        cursor: Cursor,
        radius: i32,
        tags: &Tags,
        out: &mut Vec<Centroid>,
    ) -> DVec3 {
        let mut next = place(&Self::LARGE, ctx, cursor.location, radius, tags, out);
        next = place(&Self::SMALL, ctx, next, radius, tags, out);

        let ledge = self.ledge_start(ctx, cursor);
        let ledge_radius = radius.max(5);
        let segments = ctx.range_i32(self.min_shelf_size, self.max_shelf_size);
        Self::run(ctx, ledge, cursor.direction, ledge_radius, segments, tags, out);
        next
    }

    fn from_top(
        &self,
        ctx: &mut GenerationContext<'_>,
        cursor: Cursor,
        radius: i32,
        tags: &Tags,
        out: &mut Vec<Centroid>,
    ) -> DVec3 {
        let ledge = self.ledge_start(ctx, cursor);
        let ledge_radius = radius.max(5);
        let segments = ctx.range_i32(self.min_shelf_size, self.max_shelf_size);
        let next = Self::run(
            ctx,
            cursor.location,
            cursor.direction,
            ledge_radius,
            segments,
            tags,
            out,
        );

        let ledge = place(&Self::LARGE, ctx, ledge, radius, tags, out);
        place(&Self::SMALL, ctx, ledge, radius, tags, out);
        next
    }
}

/// Scatter a cavern at `location` and return its exit.
fn place(
    cavern: &CavernRoom,
    ctx: &mut GenerationContext<'_>,
    location: DVec3,
    radius: i32,
    tags: &Tags,
    out: &mut Vec<Centroid>,
) -> DVec3 {
    cavern.scatter(ctx, location, radius, tags, out);
    cavern.exit(ctx, location, radius)
}

impl RoomGeometry for ShelfRoom {
    type UserData = ShelfLayout;

    fn create_user_data(
        &self,
        ctx: &mut GenerationContext<'_>,
        cursor: Cursor,
        radius: i32,
        tags: &Tags,
    ) -> ShelfLayout {
        let mut centroids = Vec::new();
        let next_location = if ctx.next_bool() {
            self.from_bottom(ctx, cursor, radius, tags, &mut centroids)
        } else {
            self.from_top(ctx, cursor, radius, tags, &mut centroids)
        };
        ShelfLayout {
            next_location,
            centroids,
        }
    }

    fn add_centroids(
        &self,
        _ctx: &mut GenerationContext<'_>,
        _cursor: Cursor,
        _radius: i32,
        _tags: &Tags,
        layout: &ShelfLayout,
        out: &mut CaveOutput,
    ) -> Result<()> {
        out.centroids.extend_from_slice(&layout.centroids);
        Ok(())
    }

    fn adjust_location(
        &self,
        _: &mut GenerationContext<'_>,
        _: DVec3,
        _: DVec3,
        _: i32,
        layout: &ShelfLayout,
    ) -> DVec3 {
        layout.next_location
    }
}
