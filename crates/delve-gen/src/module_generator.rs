//! Cave description traversal.
//!
//! Walks a cursor through a string of room symbols, collects the centroids
//! every room emits, then carves them. Branch rooms re-enter
//! [`generate_module`] through [`crate::branch::generate_branch`] and write
//! into the same [`CaveOutput`].

use delve_core::{Error, Result};
use glam::DVec3;
use tracing::{debug, info, trace};

use crate::carve::carve_sphere;
use crate::centroid::CaveOutput;
use crate::context::{Cursor, GenerationContext};
use crate::registry::RoomRegistry;
use crate::rooms::Room;

/// Look up every symbol of `cave`, in order.
///
/// Fails on the first symbol with no registered room.
pub fn resolve<'r>(rooms: &'r RoomRegistry, cave: &str) -> Result<Vec<&'r Room>> {
    cave.chars()
        .enumerate()
        .map(|(position, symbol)| {
            rooms
                .get(symbol)
                .ok_or(Error::UnknownSymbol { symbol, position })
        })
        .collect()
}

/// Generate the cave described by `cave`, starting at `start` heading along
/// `direction`, and carve it.
///
/// Only centroids emitted by this call are carved; anything already in `out`
/// is left alone. Unknown symbols are reported before any room runs.
/// Returns the cursor after the last room.
pub fn generate_module(
    ctx: &mut GenerationContext<'_>,
    cave: &str,
    start: DVec3,
    direction: DVec3,
    radius: i32,
    out: &mut CaveOutput,
) -> Result<Cursor> {
    info!(
        rooms = cave.chars().count(),
        radius,
        depth = ctx.branch_depth(),
        "Beginning module generation"
    );
    debug!(cave, "Cave string");

    let style = ctx.style;
    let rooms = resolve(&style.rooms, cave)?;

    let start_index = out.centroids.len();
    let mut cursor = Cursor::new(start, direction);
    for room in rooms {
        out.room_starts.push(out.centroids.len());
        trace!(
            symbol = %room.symbol(),
            room = room.room_type().name(),
            x = cursor.location.x,
            y = cursor.location.y,
            z = cursor.location.z,
            "Room"
        );
        cursor = room.generate(ctx, cursor, radius, out)?;
    }

    let mut carved = 0;
    for i in start_index..out.centroids.len() {
        let (position, radius) = (out.centroids[i].position, out.centroids[i].radius);
        carved += carve_sphere(ctx, position, radius);
    }
    debug!(
        centroids = out.centroids.len() - start_index,
        carved,
        "Module carved"
    );

    Ok(cursor)
}
