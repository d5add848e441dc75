use delve_core::math::rotate_around_y;
use delve_core::Result;
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::branch::generate_branch;
use crate::centroid::{CaveOutput, Tags};
use crate::context::{Cursor, GenerationContext};
use crate::rooms::{ensure_at_least, ensure_ordered, RoomGeometry};

/// Forks a narrower sub-cave off to one side. The main path resumes from
/// the fork point with its heading unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BranchRoom {
    pub min_angle: f64,
    pub max_angle: f64,
    pub min_size_reduction: i32,
    pub max_size_reduction: i32,
    pub min_branch_length: i32,
    pub max_branch_length: i32,
}

impl Default for BranchRoom {
    fn default() -> Self {
        Self {
            min_angle: 90.0,
            max_angle: 90.0,
            min_size_reduction: 1,
            max_size_reduction: 1,
            min_branch_length: 20,
            max_branch_length: 39,
        }
    }
}

impl BranchRoom {
    /// Create a branch room, checking every range.
    pub fn new(
        min_angle: f64,
        max_angle: f64,
        min_size_reduction: i32,
        max_size_reduction: i32,
        min_branch_length: i32,
        max_branch_length: i32,
    ) -> Result<Self> {
        let room = Self {
            min_angle,
            max_angle,
            min_size_reduction,
            max_size_reduction,
            min_branch_length,
            max_branch_length,
        };
        room.validate()?;
        Ok(room)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        ensure_ordered("branch", "angle", self.min_angle, self.max_angle)?;
        ensure_at_least("branch", "sizeReduction", self.min_size_reduction, 1)?;
        ensure_ordered(
            "branch",
            "sizeReduction",
            self.min_size_reduction,
            self.max_size_reduction,
        )?;
        ensure_at_least("branch", "branchLength", self.min_branch_length, 1)?;
        ensure_ordered(
            "branch",
            "branchLength",
            self.min_branch_length,
            self.max_branch_length,
        )
    }
}

impl RoomGeometry for BranchRoom {
    type UserData = ();

    fn create_user_data(&self, _: &mut GenerationContext<'_>, _: Cursor, _: i32, _: &Tags) {}

    fn add_centroids(
        &self,
        ctx: &mut GenerationContext<'_>,
        cursor: Cursor,
        radius: i32,
        _tags: &Tags,
        _data: &(),
        out: &mut CaveOutput,
    ) -> Result<()> {
        let side = f64::from(ctx.next_sign());
        let length = ctx.range_i32(self.min_branch_length, self.max_branch_length);
        let reduction = ctx.range_i32(self.min_size_reduction, self.max_size_reduction);
        let angle = ctx.range_f64(self.min_angle, self.max_angle) * side;
        let heading = rotate_around_y(cursor.direction, angle.to_radians());
        generate_branch(
            ctx,
            radius.saturating_sub(reduction),
            cursor.location,
            length,
            false,
            heading,
            out,
        )
    }

    fn adjust_location(
        &self,
        _: &mut GenerationContext<'_>,
        location: DVec3,
        _: DVec3,
        _: i32,
        _: &(),
    ) -> DVec3 {
        location
    }
}
