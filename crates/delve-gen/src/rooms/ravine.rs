use std::f64::consts::{FRAC_PI_2, PI};

use delve_core::math::{rotate_around_y, GAP_FACTOR};
use delve_core::{Error, Result};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::centroid::{CaveOutput, Centroid, Tags};
use crate::context::{Cursor, GenerationContext};
use crate::rooms::{ensure_at_least, ensure_ordered, RoomGeometry};

/// Share of the ravine's length (and height) within which entrances and
/// exits are picked, as a divisor.
const EDGE_PROPORTION: i32 = 5;

/// A tall, narrow, gently curving slot running across the heading.
///
/// The ravine is entered from one side wall and left through the opposite one;
/// its width tapers towards both ends.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RavineRoom {
    pub min_length: i32,
    pub max_length: i32,
    pub min_height: i32,
    pub max_height: i32,
    pub min_width: i32,
    pub max_width: i32,
    pub min_turn: f64,
    pub max_turn: f64,
    pub height_vary_chance: f64,
}

impl Default for RavineRoom {
    fn default() -> Self {
        Self {
            min_length: 70,
            max_length: 100,
            min_height: 80,
            max_height: 120,
            min_width: 10,
            max_width: 20,
            min_turn: 0.0,
            max_turn: 30.0,
            height_vary_chance: 0.2,
        }
    }
}

/// Sampled dimensions of one ravine. `turn` is the total bend in degrees and
/// `origin` the center of the ravine floor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RavineShape {
    pub length: i32,
    pub height: i32,
    pub width: i32,
    pub turn: f64,
    pub origin: DVec3,
}

impl RavineShape {
    fn turn_per_block(&self, turn: f64) -> f64 {
        (turn / f64::from(self.length)).to_radians()
    }

    fn width_at(&self, distance: i32) -> f64 {
        f64::from(self.width) * (f64::from(distance) / f64::from(self.length) * PI).cos()
    }

    /// A random point on a side wall: walk a random distance along the
    /// ravine from `origin`, step out to the wall, then pick a height.
    fn random_wall_point(
        &self,
        ctx: &mut GenerationContext<'_>,
        origin: DVec3,
        direction: DVec3,
        turn: f64,
    ) -> DVec3 {
        let turn_per_block = self.turn_per_block(turn);
        let along = (self.length + EDGE_PROPORTION - 1) / EDGE_PROPORTION;
        let distance = ctx.next_int(along) - ctx.next_int(along);
        let side = FRAC_PI_2.copysign(f64::from(distance));

        let mut pos = origin;
        let mut local_dir = rotate_around_y(direction, side);
        for _ in 0..distance.unsigned_abs() {
            pos += local_dir;
            local_dir = rotate_around_y(local_dir, turn_per_block * f64::from(distance.signum()));
        }

        pos += rotate_around_y(local_dir * (self.width_at(distance) * 0.5), side);

        let vertical = (self.height + EDGE_PROPORTION - 1) / EDGE_PROPORTION;
        let up = self.height / 2 + ctx.next_int(vertical) - ctx.next_int(vertical);
        pos.y += f64::from(up);
        pos
    }
}

impl RavineRoom {
    /// Create a ravine room, checking every range.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        min_length: i32,
        max_length: i32,
        min_height: i32,
        max_height: i32,
        min_width: i32,
        max_width: i32,
        min_turn: f64,
        max_turn: f64,
        height_vary_chance: f64,
    ) -> Result<Self> {
        let room = Self {
            min_length,
            max_length,
            min_height,
            max_height,
            min_width,
            max_width,
            min_turn,
            max_turn,
            height_vary_chance,
        };
        room.validate()?;
        Ok(room)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        ensure_at_least("ravine", "length", self.min_length, 1)?;
        ensure_ordered("ravine", "length", self.min_length, self.max_length)?;
        ensure_at_least("ravine", "height", self.min_height, 1)?;
        ensure_ordered("ravine", "height", self.min_height, self.max_height)?;
        ensure_at_least("ravine", "width", self.min_width, 1)?;
        ensure_ordered("ravine", "width", self.min_width, self.max_width)?;
        ensure_ordered("ravine", "turn", self.min_turn, self.max_turn)?;
        if !(0.0..=1.0).contains(&self.height_vary_chance) {
            return Err(Error::InvalidRange {
                room: "ravine",
                field: "heightVaryChance",
                reason: format!("{} is outside [0, 1]", self.height_vary_chance),
            });
        }
        Ok(())
    }
}

impl RoomGeometry for RavineRoom {
    type UserData = RavineShape;

    fn create_user_data(
        &self,
        ctx: &mut GenerationContext<'_>,
        cursor: Cursor,
        _: i32,
        _: &Tags,
    ) -> RavineShape {
        let length = ctx.range_i32(self.min_length, self.max_length);
        let height = ctx.range_i32(self.min_height, self.max_height);
        let width = ctx.range_i32(self.min_width, self.max_width);
        let mut turn = ctx.range_f64(self.min_turn, self.max_turn);
        if ctx.next_bool() {
            turn = -turn;
        }

        let mut shape = RavineShape {
            length,
            height,
            width,
            turn,
            origin: cursor.location + cursor.direction * (f64::from(width) * 0.5),
        };
        // shift the ravine so the entrance lands on the cursor
        let entrance = shape.random_wall_point(ctx, shape.origin, cursor.direction, turn);
        shape.origin += cursor.location - entrance;
        shape
    }

    #[allow(clippy::cast_possible_truncation)]
    fn add_centroids(
        &self,
        ctx: &mut GenerationContext<'_>,
        cursor: Cursor,
        _radius: i32,
        tags: &Tags,
        shape: &RavineShape,
        out: &mut CaveOutput,
    ) -> Result<()> {
        let height = f64::from(shape.height);
        let turn_per_block = shape.turn_per_block(shape.turn);

        // walk outwards from the middle, once each way
        for dir in [-1_i32, 1] {
            let sign = f64::from(dir);
            let mut pos = shape.origin;
            let mut local_dir = rotate_around_y(cursor.direction, FRAC_PI_2 * sign);
            let mut since_last = if dir == -1 { i32::MAX - 1 } else { 0 };

            for distance in 0..shape.length / 2 {
                let local_width = shape.width_at(distance);
                let centroid_width = (local_width.ceil() as i32).clamp(3, 10);
                let centroid_radius = (centroid_width + 1) / 2;
                let gap = f64::from(centroid_radius) * GAP_FACTOR;
                let across = (local_width / gap).ceil() as i32;
                let vertically = (height / gap).ceil() as i32;

                since_last += 1;
                if f64::from(since_last) > f64::from(centroid_radius - 1) * GAP_FACTOR {
                    since_last = 0;
                    let horizontal = rotate_around_y(local_dir, FRAC_PI_2);
                    for y in 0..vertically {
                        for x in 0..across {
                            let sideways = -local_width * 0.5
                                + gap * 0.5
                                + f64::from(x) * local_width / f64::from(across);
                            let up = gap * 0.5 + f64::from(y) * height / f64::from(vertically);
                            let position = pos + horizontal * sideways + DVec3::new(0.0, up, 0.0);
                            out.push(Centroid::new(position, centroid_radius, tags));
                        }
                    }
                }

                pos += local_dir;
                if ctx.next_f64() < self.height_vary_chance {
                    pos = ctx.vary(pos);
                }
                local_dir = rotate_around_y(local_dir, turn_per_block * sign);
            }
        }
        Ok(())
    }

    fn adjust_location(
        &self,
        ctx: &mut GenerationContext<'_>,
        _: DVec3,
        direction: DVec3,
        _: i32,
        shape: &RavineShape,
    ) -> DVec3 {
        // an entrance seen from the far side
        shape.random_wall_point(ctx, shape.origin, -direction, -shape.turn)
    }
}
