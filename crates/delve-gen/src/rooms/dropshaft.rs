use delve_core::Result;
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::centroid::{CaveOutput, Centroid, Tags};
use crate::context::{Cursor, GenerationContext};
use crate::rooms::{ensure_at_least, ensure_ordered, RoomGeometry};

/// A shaft dropping straight down in uneven steps.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DropshaftRoom {
    pub min_depth: i32,
    pub max_depth: i32,
    pub min_step: i32,
    pub max_step: i32,
}

impl Default for DropshaftRoom {
    fn default() -> Self {
        Self {
            min_depth: 8,
            max_depth: 11,
            min_step: 2,
            max_step: 3,
        }
    }
}

impl DropshaftRoom {
    /// Create a dropshaft room, checking both ranges.
    pub fn new(min_depth: i32, max_depth: i32, min_step: i32, max_step: i32) -> Result<Self> {
        let room = Self {
            min_depth,
            max_depth,
            min_step,
            max_step,
        };
        room.validate()?;
        Ok(room)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        ensure_at_least("dropshaft", "depth", self.min_depth, 1)?;
        ensure_ordered("dropshaft", "depth", self.min_depth, self.max_depth)?;
        ensure_at_least("dropshaft", "step", self.min_step, 1)?;
        ensure_ordered("dropshaft", "step", self.min_step, self.max_step)
    }
}

impl RoomGeometry for DropshaftRoom {
    /// Sampled depth
    type UserData = i32;

    fn create_user_data(&self, ctx: &mut GenerationContext<'_>, _: Cursor, _: i32, _: &Tags) -> i32 {
        ctx.range_i32(self.min_depth, self.max_depth)
    }

    fn add_centroids(
        &self,
        ctx: &mut GenerationContext<'_>,
        cursor: Cursor,
        radius: i32,
        tags: &Tags,
        depth: &i32,
        out: &mut CaveOutput,
    ) -> Result<()> {
        let shaft_radius = if radius >= 4 { radius - 1 } else { radius };
        let mut pos = cursor.location;
        let mut descended = 0;
        while descended < *depth {
            out.push(Centroid::new(pos, shaft_radius, tags));
            pos = ctx.vary(pos);
            let step = ctx.range_i32(self.min_step, self.max_step);
            pos.y -= f64::from(step);
            descended += step;
        }
        Ok(())
    }

    fn adjust_location(
        &self,
        _: &mut GenerationContext<'_>,
        location: DVec3,
        _: DVec3,
        radius: i32,
        depth: &i32,
    ) -> DVec3 {
        let drop = if radius <= 5 { depth - 4 } else { depth - 2 };
        location - DVec3::new(0.0, f64::from(drop), 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rooms::{step, testing};

    #[test]
    fn fixed_steps_emit_expected_count() {
        let style = testing::style();
        let mut world = testing::world();
        let mut ctx = GenerationContext::new(&style, &mut world, 17);
        let mut out = CaveOutput::new();
        let room = DropshaftRoom::new(9, 9, 3, 3).unwrap();
        let start = Cursor::new(DVec3::new(0.0, 100.0, 0.0), DVec3::X);

        let next = step(&room, &mut ctx, start, 5, &testing::no_tags(), &mut out).unwrap();

        assert_eq!(out.centroids.len(), 3);
        assert!(out.centroids.iter().all(|c| c.radius == 4));
        // each step drops 3 plus at most one block of jitter
        for pair in out.centroids.windows(2) {
            let dy = pair[0].position.y - pair[1].position.y;
            assert!((2.0..=4.0).contains(&dy));
        }
        // radius <= 5: fixed drop of depth - 4, no jitter
        assert_eq!(next.location, DVec3::new(0.0, 95.0, 0.0));
    }

    #[test]
    fn wide_shafts_drop_further() {
        let style = testing::style();
        let mut world = testing::world();
        let mut ctx = GenerationContext::new(&style, &mut world, 17);
        let mut out = CaveOutput::new();
        let room = DropshaftRoom::new(10, 10, 2, 2).unwrap();
        let start = Cursor::new(DVec3::new(0.0, 100.0, 0.0), DVec3::X);

        let next = step(&room, &mut ctx, start, 6, &testing::no_tags(), &mut out).unwrap();

        assert_eq!(out.centroids.len(), 5);
        assert_eq!(next.location.y, 92.0);
    }

    #[test]
    fn small_radius_is_not_reduced() {
        let style = testing::style();
        let mut world = testing::world();
        let mut ctx = GenerationContext::new(&style, &mut world, 1);
        let mut out = CaveOutput::new();
        let start = Cursor::new(DVec3::new(0.0, 100.0, 0.0), DVec3::X);

        step(&DropshaftRoom::default(), &mut ctx, start, 3, &testing::no_tags(), &mut out).unwrap();

        assert!(out.centroids.iter().all(|c| c.radius == 3));
    }

    #[test]
    fn rejects_bad_ranges() {
        assert!(DropshaftRoom::new(0, 4, 1, 2).is_err());
        assert!(DropshaftRoom::new(4, 4, 0, 2).is_err());
        assert!(DropshaftRoom::new(4, 4, 3, 2).is_err());
    }
}
