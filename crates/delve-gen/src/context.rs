//! Per-generation state threaded through every room and carve call.

use delve_world::{BlockAccess, Palette};
use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::style::CaveStyle;

/// Position and heading of the traversal cursor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cursor {
    /// Current location
    pub location: DVec3,
    /// Current heading (unit-ish, normally horizontal)
    pub direction: DVec3,
}

impl Cursor {
    /// Create a cursor
    #[inline]
    pub const fn new(location: DVec3, direction: DVec3) -> Self {
        Self {
            location,
            direction,
        }
    }
}

/// Random stream, style and world for one generation call.
///
/// The random stream is the only source of randomness. Every room draws from
/// it in a fixed order, so a seed plus a cave description always produces the
/// same centroids.
pub struct GenerationContext<'a> {
    rng: ChaCha8Rng,
    /// Active style: rooms, layout, ores
    pub style: &'a CaveStyle,
    /// Air and transparency rules for carving and ore placement
    pub palette: &'a dyn Palette,
    /// World written by the carve and ore passes
    pub world: &'a mut dyn BlockAccess,
    branch_depth: usize,
    carved: usize,
}

impl<'a> GenerationContext<'a> {
    /// Create a context with a stream seeded from `seed`.
    pub fn new(style: &'a CaveStyle, world: &'a mut dyn BlockAccess, seed: u64) -> Self {
        Self::with_rng(style, world, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Create a context around an existing stream.
    pub fn with_rng(
        style: &'a CaveStyle,
        world: &'a mut dyn BlockAccess,
        rng: ChaCha8Rng,
    ) -> Self {
        Self {
            rng,
            style,
            palette: &style.palette,
            world,
            branch_depth: 0,
            carved: 0,
        }
    }

    /// Carve and place ores against `palette` instead of the style's own.
    #[must_use]
    pub fn with_palette(mut self, palette: &'a dyn Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Uniform integer in `0..bound`. Returns 0 without drawing if `bound <= 0`.
    #[inline]
    pub fn next_int(&mut self, bound: i32) -> i32 {
        if bound <= 0 {
            0
        } else {
            self.rng.gen_range(0..bound)
        }
    }

    /// Uniform integer in `min..=max`. Returns `min` without drawing if `max < min`.
    #[inline]
    pub fn range_i32(&mut self, min: i32, max: i32) -> i32 {
        if max < min {
            return min;
        }
        let span = i64::from(max) - i64::from(min) + 1;
        let offset = self.rng.gen_range(0..span);
        (i64::from(min) + offset) as i32
    }

    /// Uniform double in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// `min + next_f64() * (max - min)`.
    #[inline]
    pub fn range_f64(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Fair coin flip.
    #[inline]
    pub fn next_bool(&mut self) -> bool {
        self.rng.gen::<bool>()
    }

    /// `1` or `-1` with equal probability.
    #[inline]
    pub fn next_sign(&mut self) -> i32 {
        if self.next_bool() {
            1
        } else {
            -1
        }
    }

    /// Jitter a location by an independent offset in `-1..=1` on each axis.
    ///
    /// Draws x, then y, then z.
    pub fn vary(&mut self, location: DVec3) -> DVec3 {
        let x = self.next_int(3) - 1;
        let y = self.next_int(3) - 1;
        let z = self.next_int(3) - 1;
        location + DVec3::new(f64::from(x), f64::from(y), f64::from(z))
    }

    /// Current branch nesting depth (0 on the main path).
    pub fn branch_depth(&self) -> usize {
        self.branch_depth
    }

    /// Enter a branch. Returns false, without entering, at the style's cap.
    pub fn enter_branch(&mut self) -> bool {
        if self.branch_depth >= self.style.max_branch_depth {
            return false;
        }
        self.branch_depth += 1;
        true
    }

    /// Leave a branch entered with [`Self::enter_branch`].
    pub fn exit_branch(&mut self) {
        self.branch_depth = self.branch_depth.saturating_sub(1);
    }

    /// Number of blocks written by carve passes so far.
    pub fn carved(&self) -> usize {
        self.carved
    }

    pub(crate) fn record_carved(&mut self, count: usize) {
        self.carved += count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_world::VoxelWorld;

    #[test]
    fn same_seed_same_stream() {
        let style = CaveStyle::builtin().unwrap();
        let mut w1 = VoxelWorld::stone();
        let mut w2 = VoxelWorld::stone();
        let mut a = GenerationContext::new(&style, &mut w1, 7);
        let mut b = GenerationContext::new(&style, &mut w2, 7);
        for _ in 0..64 {
            assert_eq!(a.range_i32(-5, 5), b.range_i32(-5, 5));
            assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
            assert_eq!(a.next_bool(), b.next_bool());
        }
    }

    #[test]
    fn ranges_are_inclusive_and_degenerate_ranges_are_constant() {
        let style = CaveStyle::builtin().unwrap();
        let mut world = VoxelWorld::stone();
        let mut ctx = GenerationContext::new(&style, &mut world, 1);
        let mut seen = [false; 3];
        for _ in 0..500 {
            let v = ctx.range_i32(4, 6);
            assert!((4..=6).contains(&v));
            seen[(v - 4) as usize] = true;
            assert_eq!(ctx.range_i32(9, 9), 9);
            assert_eq!(ctx.range_f64(2.5, 2.5), 2.5);
        }
        assert!(seen.iter().all(|s| *s));
        assert_eq!(ctx.next_int(0), 0);
        assert_eq!(ctx.range_i32(3, 1), 3);
        assert_eq!(ctx.range_i32(i32::MIN, i32::MIN), i32::MIN);
    }

    #[test]
    fn vary_stays_within_one_block() {
        let style = CaveStyle::builtin().unwrap();
        let mut world = VoxelWorld::stone();
        let mut ctx = GenerationContext::new(&style, &mut world, 99);
        let mut hit_positive = false;
        let mut hit_negative = false;
        for _ in 0..300 {
            let d = ctx.vary(DVec3::ZERO);
            for c in d.to_array() {
                assert!(c == -1.0 || c == 0.0 || c == 1.0);
                hit_positive |= c > 0.0;
                hit_negative |= c < 0.0;
            }
        }
        assert!(hit_positive && hit_negative);
    }

    #[test]
    fn branch_depth_is_capped() {
        let mut style = CaveStyle::builtin().unwrap();
        style.max_branch_depth = 2;
        let mut world = VoxelWorld::stone();
        let mut ctx = GenerationContext::new(&style, &mut world, 0);
        assert!(ctx.enter_branch());
        assert!(ctx.enter_branch());
        assert!(!ctx.enter_branch());
        assert_eq!(ctx.branch_depth(), 2);
        ctx.exit_branch();
        ctx.exit_branch();
        ctx.exit_branch();
        assert_eq!(ctx.branch_depth(), 0);
    }
}
