use delve_core::Result;
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::centroid::{CaveOutput, Tags};
use crate::context::{Cursor, GenerationContext};
use crate::rooms::RoomGeometry;

/// Emits nothing and leaves the cursor in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NilRoom {}

impl RoomGeometry for NilRoom {
    type UserData = ();

    fn create_user_data(&self, _: &mut GenerationContext<'_>, _: Cursor, _: i32, _: &Tags) {}

    fn add_centroids(
        &self,
        _: &mut GenerationContext<'_>,
        _: Cursor,
        _: i32,
        _: &Tags,
        _: &(),
        _: &mut CaveOutput,
    ) -> Result<()> {
        Ok(())
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
