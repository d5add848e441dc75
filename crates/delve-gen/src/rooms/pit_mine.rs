use std::f64::consts::{PI, TAU};

use delve_core::math::{rotate_around_y, yaw, GAP_FACTOR};
use delve_core::Result;
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::centroid::{CaveOutput, Centroid, Tags};
use crate::context::{Cursor, GenerationContext};
use crate::rooms::{ensure_at_least, ensure_ordered, RoomGeometry};

/// A terraced open pit: a stack of elliptical steps, each wider than the one
/// below it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PitMineRoom {
    pub min_steps: i32,
    pub max_steps: i32,
    pub min_step_height: i32,
    pub max_step_height: i32,
    pub min_step_width: i32,
    pub max_step_width: i32,
    pub min_base_width: i32,
    pub max_base_width: i32,
    pub min_step_variance: f64,
    pub max_step_variance: f64,
}

impl Default for PitMineRoom {
    fn default() -> Self {
        Self {
            min_steps: 3,
            max_steps: 5,
            min_step_height: 2,
            max_step_height: 5,
            min_step_width: 4,
            max_step_width: 7,
            min_base_width: 15,
            max_base_width: 45,
            min_step_variance: -2.0,
            max_step_variance: 2.0,
        }
    }
}

/// One elliptical terrace.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PitStep {
    /// Center of the terrace floor
    pub center: DVec3,
    /// Semi-axis along the terrace's local x
    pub rx: f64,
    /// Semi-axis along the terrace's local z
    pub rz: f64,
    /// Rotation of the ellipse about the vertical axis
    pub angle: f64,
    pub height: i32,
}

impl PitStep {
    /// Point on the rim at world yaw `angle`, half way up the terrace.
    pub fn edge(&self, angle: f64) -> DVec3 {
        let local = angle - self.angle;
        let rim = DVec3::new(
            self.rx * local.cos(),
            f64::from(self.height) * 0.5,
            self.rz * local.sin(),
        );
        self.center + rotate_around_y(rim, self.angle)
    }
}

impl PitMineRoom {
    /// Create a pit mine room, checking every range.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        min_steps: i32,
        max_steps: i32,
        min_step_height: i32,
        max_step_height: i32,
        min_step_width: i32,
        max_step_width: i32,
        min_base_width: i32,
        max_base_width: i32,
        min_step_variance: f64,
        max_step_variance: f64,
    ) -> Result<Self> {
        let room = Self {
            min_steps,
            max_steps,
            min_step_height,
            max_step_height,
            min_step_width,
            max_step_width,
            min_base_width,
            max_base_width,
            min_step_variance,
            max_step_variance,
        };
        room.validate()?;
        Ok(room)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        ensure_at_least("pit_mine", "steps", self.min_steps, 1)?;
        ensure_ordered("pit_mine", "steps", self.min_steps, self.max_steps)?;
        ensure_at_least("pit_mine", "stepHeight", self.min_step_height, 0)?;
        ensure_ordered(
            "pit_mine",
            "stepHeight",
            self.min_step_height,
            self.max_step_height,
        )?;
        ensure_at_least("pit_mine", "stepWidth", self.min_step_width, 0)?;
        ensure_ordered(
            "pit_mine",
            "stepWidth",
            self.min_step_width,
            self.max_step_width,
        )?;
        ensure_at_least("pit_mine", "baseWidth", self.min_base_width, 1)?;
        ensure_ordered(
            "pit_mine",
            "baseWidth",
            self.min_base_width,
            self.max_base_width,
        )?;
        // a step may never shrink below the one beneath it
        ensure_at_least(
            "pit_mine",
            "stepVariance",
            self.min_step_variance,
            -f64::from(self.min_step_width),
        )?;
        ensure_ordered(
            "pit_mine",
            "stepVariance",
            self.min_step_variance,
            self.max_step_variance,
        )
    }
}

impl RoomGeometry for PitMineRoom {
    type UserData = Vec<PitStep>;

    fn create_user_data(
        &self,
        ctx: &mut GenerationContext<'_>,
        cursor: Cursor,
        _: i32,
        _: &Tags,
    ) -> Vec<PitStep> {
        let count = ctx.range_i32(self.min_steps, self.max_steps);
        let mut radius = (ctx.range_i32(self.min_base_width, self.max_base_width) + 1) / 2;
        let mut dy = 0;
        let mut steps = Vec::with_capacity(usize::try_from(count).unwrap_or_default());

        for _ in 0..count {
            let height = ctx.range_i32(self.min_step_height, self.max_step_height);
            let base = f64::from(radius);
            let rx = base + ctx.range_f64(self.min_step_variance, self.max_step_variance);
            let rz = base + ctx.range_f64(self.min_step_variance, self.max_step_variance);
            let angle = TAU * ctx.next_f64();
            steps.push(PitStep {
                center: cursor.location + DVec3::new(0.0, f64::from(dy), 0.0),
                rx,
                rz,
                angle,
                height,
            });
            dy += height;
            radius += ctx.range_i32(self.min_step_width, self.max_step_width);
        }

        // the rim facing back along the heading sits on the cursor
        let entrance = ctx.next_int(count);
        let entrance_pos = steps
            .get(usize::try_from(entrance).unwrap_or_default())
            .map_or(cursor.location, |s| s.edge(PI + yaw(cursor.direction)));
        let shift = cursor.location - entrance_pos;
        for step in &mut steps {
            step.center += shift;
        }
        steps
    }

    #[allow(clippy::cast_possible_truncation)]
    fn add_centroids(
        &self,
        _ctx: &mut GenerationContext<'_>,
        _cursor: Cursor,
        _radius: i32,
        tags: &Tags,
        steps: &Vec<PitStep>,
        out: &mut CaveOutput,
    ) -> Result<()> {
        for step in steps {
            let narrowest = step.rx.min(step.rz).ceil() as i32;
            let centroid_width = step.height.min(narrowest).clamp(3, 10);
            let centroid_radius = (centroid_width + 1) / 2;
            let gap = f64::from(centroid_radius) * GAP_FACTOR;
            let height = f64::from(step.height);
            let vertically = (height / gap).ceil() as i32;
            let rings = (0.5 * (step.rx + step.rz) / gap).ceil() as i32;
            let around = (PI * (step.rx + step.rz) / gap).ceil() as i32;

            for ring in 0..rings {
                let rx = gap * 0.5 + f64::from(ring) * step.rx / f64::from(rings);
                let rz = gap * 0.5 + f64::from(ring) * step.rz / f64::from(rings);
                for d in 0..around {
                    let angle = TAU / f64::from(around) * f64::from(d);
                    let flat = DVec3::new(rx * angle.cos(), 0.0, rz * angle.sin());
                    let xz = step.center + rotate_around_y(flat, step.angle);
                    for y in 0..vertically {
                        let up = gap * 0.5 + f64::from(y) * height / f64::from(vertically);
                        out.push(Centroid::new(
                            xz + DVec3::new(0.0, up, 0.0),
                            centroid_radius,
                            tags,
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    fn adjust_location(
        &self,
        ctx: &mut GenerationContext<'_>,
        location: DVec3,
        direction: DVec3,
        _: i32,
        steps: &Vec<PitStep>,
    ) -> DVec3 {
        let count = i32::try_from(steps.len()).unwrap_or(i32::MAX);
        let exit = usize::try_from(ctx.next_int(count)).unwrap_or_default();
        // anywhere on the forward half of the rim
        let angle = yaw(direction) - PI / 2.0 + ctx.next_f64() * PI;
        steps.get(exit).map_or(location, |s| s.edge(angle))
    }
}
