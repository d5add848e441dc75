use delve_core::Result;
use serde::{Deserialize, Serialize};

use crate::centroid::{CaveOutput, Centroid, Tags};
use crate::context::{Cursor, GenerationContext};
use crate::rooms::RoomGeometry;

/// One centroid at the cursor, then a jittered step forward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimpleRoom {}

impl RoomGeometry for SimpleRoom {
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
}
