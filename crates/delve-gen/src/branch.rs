//! Sub-cave generation for branch rooms.

use delve_core::Result;
use glam::DVec3;
use tracing::{debug, warn};

use crate::centroid::CaveOutput;
use crate::context::GenerationContext;
use crate::module_generator::generate_module;

/// Generate and carve a sub-cave of `length` rooms from the style's layout.
///
/// Centroids and room starts are appended to `out`. At the style's
/// `max_branch_depth` the branch is skipped with a warning. Radii below 1
/// are raised to 1.
pub fn generate_branch(
    ctx: &mut GenerationContext<'_>,
    radius: i32,
    start: DVec3,
    length: i32,
    is_main_branch: bool,
    direction: DVec3,
    out: &mut CaveOutput,
) -> Result<()> {
    if !ctx.enter_branch() {
        warn!(
            depth = ctx.branch_depth(),
            "Branch depth limit reached, skipping branch"
        );
        return Ok(());
    }

    let radius = radius.max(1);
    let style = ctx.style;
    let cave = style
        .layout
        .generate(ctx, length, is_main_branch, &style.rooms);
    debug!(%cave, radius, depth = ctx.branch_depth(), "Branching");

    let result = generate_module(ctx, &cave, start, direction, radius, out);
    ctx.exit_branch();
    result.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::CaveStyle;
    use delve_world::VoxelWorld;

    #[test]
    fn appends_rooms_and_restores_depth() {
        let style = CaveStyle::builtin().unwrap();
        let mut world = VoxelWorld::stone();
        let mut ctx = GenerationContext::new(&style, &mut world, 10);
        let mut out = CaveOutput::new();

        generate_branch(
            &mut ctx,
            3,
            DVec3::new(0.0, 80.0, 0.0),
            6,
            false,
            DVec3::Z,
            &mut out,
        )
        .unwrap();

        assert_eq!(out.room_starts.len(), 6);
        assert!(!out.centroids.is_empty());
        assert_eq!(ctx.branch_depth(), 0);
        assert!(ctx.carved() > 0);
    }

    #[test]
    fn tiny_radius_is_clamped() {
        let style = CaveStyle::builtin().unwrap();
        let mut world = VoxelWorld::stone();
        let mut ctx = GenerationContext::new(&style, &mut world, 11);
        let mut out = CaveOutput::new();

        generate_branch(&mut ctx, -4, DVec3::new(0.0, 80.0, 0.0), 4, false, DVec3::X, &mut out)
            .unwrap();

        assert_eq!(out.room_starts.len(), 4);
        assert!(out.centroids.iter().all(|c| c.radius >= 1));
    }

    #[test]
    fn skipped_at_depth_cap() {
        let mut style = CaveStyle::builtin().unwrap();
        style.max_branch_depth = 1;
        let mut world = VoxelWorld::stone();
        let mut ctx = GenerationContext::new(&style, &mut world, 12);
        let mut out = CaveOutput::new();

        assert!(ctx.enter_branch());
        generate_branch(&mut ctx, 4, DVec3::ZERO, 5, false, DVec3::X, &mut out).unwrap();

        assert!(out.room_starts.is_empty());
        assert_eq!(ctx.branch_depth(), 1);
    }
}
