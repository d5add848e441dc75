//! Top-level cave generation.

use delve_core::{Result, WorldPos};
use delve_world::BlockAccess;
use glam::DVec3;
use tracing::{debug, info};

use crate::carve::generate_ore_cluster;
use crate::centroid::{CaveOutput, Centroid};
use crate::context::{Cursor, GenerationContext};
use crate::module_generator::generate_module;
use crate::style::CaveStyle;

/// Where and how big a cave to generate.
#[derive(Clone, Debug, PartialEq)]
pub struct CaveRequest {
    /// Entrance location
    pub start: DVec3,
    /// Initial heading
    pub direction: DVec3,
    /// Base centroid radius
    pub radius: i32,
    /// Rooms on the main path when no description is given
    pub length: i32,
    /// Explicit room symbols; built from the style's layout if absent
    pub description: Option<String>,
}

impl Default for CaveRequest {
    fn default() -> Self {
        Self {
            start: DVec3::new(0.0, 64.0, 0.0),
            direction: DVec3::X,
            radius: 5,
            length: 24,
            description: None,
        }
    }
}

/// What a generation run produced.
#[derive(Clone, Debug, PartialEq)]
pub struct CaveReport {
    /// Main path description that was walked
    pub description: String,
    /// Every centroid, branches included, in emission order
    pub centroids: Vec<Centroid>,
    /// Index of each room's first centroid
    pub room_starts: Vec<usize>,
    /// Cursor after the last main path room
    pub end: Cursor,
    /// Blocks written by the carve pass
    pub blocks_carved: usize,
    /// Blocks written by the ore pass
    pub ores_placed: usize,
}

/// Generates caves of one style.
#[derive(Clone, Debug)]
pub struct CaveGenerator {
    style: CaveStyle,
}

impl CaveGenerator {
    /// Create a generator for `style`.
    pub fn new(style: CaveStyle) -> Self {
        Self { style }
    }

    /// The style in use
    pub fn style(&self) -> &CaveStyle {
        &self.style
    }

    /// Generate one cave into `world`.
    ///
    /// The same seed, style and request always produce the same cave.
    pub fn generate(
        &self,
        world: &mut dyn BlockAccess,
        seed: u64,
        request: &CaveRequest,
    ) -> Result<CaveReport> {
        let mut ctx = GenerationContext::new(&self.style, world, seed);
        let description = match &request.description {
            Some(description) => description.clone(),
            None => self
                .style
                .layout
                .generate(&mut ctx, request.length, true, &self.style.rooms),
        };
        info!(seed, rooms = description.chars().count(), "Generating cave");

        let mut out = CaveOutput::new();
        let end = generate_module(
            &mut ctx,
            &description,
            request.start,
            request.direction,
            request.radius,
            &mut out,
        )?;
        let ores_placed = place_ores(&mut ctx, &out.centroids);
        let blocks_carved = ctx.carved();

        info!(
            centroids = out.centroids.len(),
            blocks_carved, ores_placed, "Cave generated"
        );
        Ok(CaveReport {
            description,
            centroids: out.centroids,
            room_starts: out.room_starts,
            end,
            blocks_carved,
            ores_placed,
        })
    }
}

/// Roll every configured ore against every centroid; on success place a
/// cluster one centroid radius away along a random horizontal axis.
fn place_ores(ctx: &mut GenerationContext<'_>, centroids: &[Centroid]) -> usize {
    let style = ctx.style;
    let mut placed = 0;
    for ore in &style.ores {
        let mut clusters = 0;
        for centroid in centroids {
            if ctx.next_f64() >= ore.chance {
                continue;
            }
            let r = f64::from(centroid.radius);
            let offset = match ctx.next_int(4) {
                0 => DVec3::new(r, 0.0, 0.0),
                1 => DVec3::new(-r, 0.0, 0.0),
                2 => DVec3::new(0.0, 0.0, r),
                _ => DVec3::new(0.0, 0.0, -r),
            };
            let center = WorldPos::from(centroid.position + offset);
            placed += generate_ore_cluster(
                ctx,
                center,
                ore.radius,
                ore.replaces.as_deref(),
                ore.block,
            );
            clusters += 1;
        }
        debug!(block = ore.block.block_id.0, clusters, "Ore pass");
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::centroid::tags;
    use crate::rooms::{Room, RoomKind, SimpleRoom};
    use crate::style::OreConfig;
    use delve_core::{BlockId, BlockState, Error};
    use delve_world::VoxelWorld;

    fn simple_style() -> CaveStyle {
        CaveStyle::with_rooms(vec![Room::new(
            's',
            tags::<_, String>([]),
            RoomKind::Simple(SimpleRoom {}),
        )
        .unwrap()])
        .unwrap()
    }

    #[test]
    fn builtin_style_is_reproducible() {
        let generator = CaveGenerator::new(CaveStyle::builtin().unwrap());
        let request = CaveRequest {
            start: DVec3::new(0.0, 120.0, 0.0),
            length: 10,
            ..CaveRequest::default()
        };

        let mut a = VoxelWorld::stone();
        let mut b = VoxelWorld::stone();
        let first = generator.generate(&mut a, 5, &request).unwrap();
        let second = generator.generate(&mut b, 5, &request).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.description.chars().count(), 10);
        assert_eq!(a.writes(), b.writes());
        assert!(first.blocks_carved > 0);
        assert!(first.room_starts.len() >= 10);
    }

    #[test]
    fn explicit_description_is_walked() {
        let generator = CaveGenerator::new(simple_style());
        let mut world = VoxelWorld::stone();
        let request = CaveRequest {
            description: Some("sss".into()),
            ..CaveRequest::default()
        };

        let report = generator.generate(&mut world, 1, &request).unwrap();

        assert_eq!(report.description, "sss");
        assert_eq!(report.room_starts, vec![0, 1, 2]);
        assert_eq!(report.centroids.len(), 3);
        assert_eq!(report.ores_placed, 0);
        assert!(report.end.location.x > 10.0);
    }

    #[test]
    fn unknown_symbol_leaves_world_untouched() {
        let generator = CaveGenerator::new(simple_style());
        let mut world = VoxelWorld::stone();
        let request = CaveRequest {
            description: Some("ss?".into()),
            ..CaveRequest::default()
        };

        let err = generator.generate(&mut world, 1, &request).unwrap_err();

        assert!(matches!(err, Error::UnknownSymbol { symbol: '?', position: 2 }));
        assert_eq!(world.writes(), 0);
    }

    #[test]
    fn ore_pass_places_clusters_next_to_centroids() {
        let mut style = simple_style();
        let ore = BlockState::new(BlockId::DIAMOND_ORE);
        style.ores.push(OreConfig {
            block: ore,
            replaces: Some(vec![BlockState::STONE]),
            radius: 4,
            chance: 1.0,
        });
        let generator = CaveGenerator::new(style);
        let mut world = VoxelWorld::stone();
        let request = CaveRequest {
            description: Some("ssss".into()),
            ..CaveRequest::default()
        };

        let report = generator.generate(&mut world, 9, &request).unwrap();

        assert!(report.ores_placed > 0);
        assert_eq!(world.count(|b| b == ore), report.ores_placed);
    }

    #[test]
    fn zero_chance_ores_never_spawn() {
        let mut style = simple_style();
        style.ores.push(OreConfig {
            block: BlockState::new(BlockId::COAL_ORE),
            replaces: None,
            radius: 4,
            chance: 0.0,
        });
        let generator = CaveGenerator::new(style);
        let mut world = VoxelWorld::stone();

        let report = generator
            .generate(&mut world, 3, &CaveRequest::default())
            .unwrap();

        assert_eq!(report.ores_placed, 0);
        assert_eq!(report.description.chars().count(), 24);
    }
}
