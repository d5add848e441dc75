//! Sphere carving and ore cluster placement.
//!
//! Both walk the cube `[-r, r]^3` around a block and keep offsets with
//! `tx² + ty² + tz² <= (r - 2)²`, so the affected sphere is two blocks
//! smaller than the nominal radius. Blocks at or below `y = 0` are never
//! touched.

use delve_core::{BlockState, WorldPos};
use glam::DVec3;
use tracing::trace;

use crate::context::GenerationContext;

/// Offsets inside the shrunken sphere of nominal radius `radius`.
fn sphere_offsets(radius: i32) -> impl Iterator<Item = (i64, i64, i64)> {
    let r = i64::from(radius);
    let inner = r - 2;
    (-r..=r).flat_map(move |tx| {
        (-r..=r).flat_map(move |ty| {
            (-r..=r)
                .filter(move |tz| tx * tx + ty * ty + tz * tz <= inner * inner)
                .map(move |tz| (tx, ty, tz))
        })
    })
}

/// Whether an offset is one of the six pole voxels of the shrunken sphere.
///
/// Overlapping spheres leave single-block spikes at their poles; both carve
/// and ore placement treat these voxels specially.
#[inline]
fn is_pole(tx: i64, ty: i64, tz: i64, radius: i32) -> bool {
    let on_axis = (tx == 0 && ty == 0) || (tx == 0 && tz == 0) || (ty == 0 && tz == 0);
    on_axis && (tx + ty + tz).abs() == i64::from(radius) - 2
}

/// Carve a hollow sphere around `center` with the palette's air block.
///
/// Returns the number of blocks written. Existing blocks are overwritten
/// regardless of what they are.
pub fn carve_sphere(ctx: &mut GenerationContext<'_>, center: DVec3, radius: i32) -> usize {
    let base = WorldPos::from(center);
    let air = ctx.palette.air_block();
    let mut carved = 0;

    for (tx, ty, tz) in sphere_offsets(radius) {
        if is_pole(tx, ty, tz, radius) {
            continue;
        }
        let pos = base.offset(tx, ty, tz);
        if pos.y > 0 {
            ctx.world.set_block(pos, air);
            carved += 1;
        }
    }

    ctx.record_carved(carved);
    carved
}

/// Place a cluster of `ore` around `center`.
///
/// With no `replaceable` set, any block the palette does not consider
/// transparent is replaced; otherwise only blocks fuzzily matching an entry
/// of the set. Pole voxels are replaced on a coin flip. Returns the number of
/// blocks replaced.
pub fn generate_ore_cluster(
    ctx: &mut GenerationContext<'_>,
    center: WorldPos,
    radius: i32,
    replaceable: Option<&[BlockState]>,
    ore: BlockState,
) -> usize {
    let mut placed = 0;

    for (tx, ty, tz) in sphere_offsets(radius) {
        let pos = center.offset(tx, ty, tz);
        if pos.y <= 0 {
            continue;
        }
        let existing = ctx.world.get_block(pos);
        let eligible = match replaceable {
            None => !ctx.palette.is_transparent(existing),
            Some(set) => set.iter().any(|candidate| candidate.matches_fuzzy(&existing)),
        };
        if !eligible {
            continue;
        }
        if is_pole(tx, ty, tz, radius) && ctx.next_bool() {
            continue;
        }
        ctx.world.set_block(pos, ore);
        placed += 1;
    }

    trace!(x = center.x, y = center.y, z = center.z, radius, placed, "ore cluster");
    placed
}
