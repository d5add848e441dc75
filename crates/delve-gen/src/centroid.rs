//! Centroids: the placement points rooms emit and the carve pass consumes.

use std::sync::Arc;

use glam::DVec3;

/// Tags attached to every centroid a room emits. Shared, never mutated.
pub type Tags = Arc<[String]>;

/// A sphere to be carved: center, nominal radius, and the emitting room's tags.
#[derive(Clone, Debug, PartialEq)]
pub struct Centroid {
    /// Sphere center in world space
    pub position: DVec3,
    /// Nominal radius in blocks, at least 1
    pub radius: i32,
    /// Tags of the emitting room, in declaration order
    pub tags: Tags,
}

impl Centroid {
    /// Create a centroid. Radii below 1 are raised to 1.
    #[inline]
    pub fn new(position: DVec3, radius: i32, tags: &Tags) -> Self {
        Self {
            position,
            radius: radius.max(1),
            tags: Arc::clone(tags),
        }
    }
}

/// Accumulators shared by a whole generation, branches included.
#[derive(Clone, Debug, Default)]
pub struct CaveOutput {
    /// Every centroid emitted so far, in emission order
    pub centroids: Vec<Centroid>,
    /// Index into `centroids` at which each room's output begins
    pub room_starts: Vec<usize>,
}

impl CaveOutput {
    /// Create empty accumulators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one centroid.
    #[inline]
    pub fn push(&mut self, centroid: Centroid) {
        self.centroids.push(centroid);
    }

    /// Centroids emitted by the room whose output starts at `room_starts[room]`.
    pub fn room_centroids(&self, room: usize) -> &[Centroid] {
        let Some(&start) = self.room_starts.get(room) else {
            return &[];
        };
        let end = self
            .room_starts
            .get(room + 1)
            .copied()
            .unwrap_or(self.centroids.len());
        &self.centroids[start..end.max(start)]
    }
}

/// Build a tag list.
pub fn tags<I, S>(items: I) -> Tags
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_is_at_least_one() {
        let t = tags(["ore"]);
        assert_eq!(Centroid::new(DVec3::ZERO, -3, &t).radius, 1);
        assert_eq!(Centroid::new(DVec3::ZERO, 0, &t).radius, 1);
        assert_eq!(Centroid::new(DVec3::ZERO, 6, &t).radius, 6);
    }

    #[test]
    fn tags_are_shared_not_copied() {
        let t = tags(["wet", "wet", "dark"]);
        let c = Centroid::new(DVec3::ONE, 4, &t);
        assert!(Arc::ptr_eq(&c.tags, &t));
        assert_eq!(&*c.tags, ["wet", "wet", "dark"]);
    }

    #[test]
    fn room_centroids_slices_by_room_start() {
        let t = tags::<_, String>([]);
        let mut out = CaveOutput::new();
        out.room_starts.push(0);
        out.push(Centroid::new(DVec3::ZERO, 2, &t));
        out.push(Centroid::new(DVec3::X, 2, &t));
        out.room_starts.push(2);
        out.room_starts.push(2);
        out.push(Centroid::new(DVec3::Y, 3, &t));

        assert_eq!(out.room_centroids(0).len(), 2);
        assert!(out.room_centroids(1).is_empty());
        assert_eq!(out.room_centroids(2)[0].radius, 3);
        assert!(out.room_centroids(7).is_empty());
    }
}
