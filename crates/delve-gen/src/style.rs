//! Cave styles: rooms, layout, palette and ores, loaded from TOML.

use std::path::Path;

use delve_core::{BlockState, Error, Result};
use delve_world::StylePalette;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layout::Layout;
use crate::registry::RoomRegistry;
use crate::rooms::Room;

const BUILTIN_STYLE: &str = include_str!("../styles/default.toml");

/// Ore clusters scattered around a cave's centroids after carving.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OreConfig {
    /// Block placed
    pub block: BlockState,
    /// Blocks the ore may replace; any non-transparent block if absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replaces: Option<Vec<BlockState>>,
    /// Nominal cluster radius
    #[serde(default = "default_ore_radius")]
    pub radius: i32,
    /// Per-centroid probability of spawning a cluster
    #[serde(default = "default_ore_chance")]
    pub chance: f64,
}

fn default_ore_radius() -> i32 {
    3
}

fn default_ore_chance() -> f64 {
    0.05
}

fn default_max_branch_depth() -> usize {
    8
}

impl OreConfig {
    fn validate(&self) -> Result<()> {
        if self.radius < 1 {
            return Err(Error::InvalidRange {
                room: "ore",
                field: "radius",
                reason: format!("{} is below 1", self.radius),
            });
        }
        if !(0.0..=1.0).contains(&self.chance) {
            return Err(Error::InvalidRange {
                room: "ore",
                field: "chance",
                reason: format!("{} is outside [0, 1]", self.chance),
            });
        }
        Ok(())
    }
}

/// On-disk shape of a style.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StyleFile {
    #[serde(default = "default_max_branch_depth")]
    max_branch_depth: usize,
    #[serde(default)]
    palette: StylePalette,
    #[serde(default)]
    rooms: toml::Table,
    #[serde(default)]
    layout: Layout,
    #[serde(default)]
    ores: Vec<OreConfig>,
}

/// Everything a generation run needs besides the world and the seed.
#[derive(Clone, Debug, PartialEq)]
pub struct CaveStyle {
    /// Air and transparency rules
    pub palette: StylePalette,
    /// Rooms by symbol
    pub rooms: RoomRegistry,
    /// Weighted symbols for default descriptions
    pub layout: Layout,
    /// Ore pass settings, run in order
    pub ores: Vec<OreConfig>,
    /// Deepest allowed branch nesting; deeper branch rooms emit nothing
    pub max_branch_depth: usize,
}

impl CaveStyle {
    /// The style shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_STYLE)
    }

    /// A style with the given rooms, the default palette, no ores, and a
    /// layout weighting every room equally.
    pub fn with_rooms(rooms: Vec<Room>) -> Result<Self> {
        let rooms = RoomRegistry::new(rooms)?;
        let layout = Layout::uniform(&rooms);
        Ok(Self {
            palette: StylePalette::default(),
            rooms,
            layout,
            ores: Vec::new(),
            max_branch_depth: default_max_branch_depth(),
        })
    }

    /// Parse a style from TOML.
    ///
    /// Every room table is validated, symbols must be single characters,
    /// and every layout entry must name a registered room.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let file: StyleFile =
            toml::from_str(src).map_err(|e| Error::Serialization(e.to_string()))?;

        let mut rooms = Vec::with_capacity(file.rooms.len());
        for (key, value) in &file.rooms {
            let symbol = single_char(key)?;
            let table = value.as_table().ok_or_else(|| {
                Error::Serialization(format!("room {key:?} must be a table"))
            })?;
            rooms.push(Room::deserialize(symbol, table)?);
        }
        let rooms = RoomRegistry::new(rooms)?;

        for entry in &file.layout.entries {
            if !rooms.contains(entry.symbol) {
                return Err(Error::InvalidSymbol(format!(
                    "layout entry {:?} has no room",
                    entry.symbol
                )));
            }
        }
        for ore in &file.ores {
            ore.validate()?;
        }

        debug!(
            rooms = rooms.len(),
            layout = file.layout.entries.len(),
            ores = file.ores.len(),
            "Loaded cave style"
        );
        Ok(Self {
            palette: file.palette,
            rooms,
            layout: file.layout,
            ores: file.ores,
            max_branch_depth: file.max_branch_depth,
        })
    }

    /// Load a style from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let src = std::fs::read_to_string(path)?;
        Self::from_toml_str(&src)
    }

    /// Write this style back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        let mut rooms = toml::Table::new();
        for room in self.rooms.iter() {
            rooms.insert(room.symbol().to_string(), toml::Value::Table(room.serialize()?));
        }
        let file = StyleFile {
            max_branch_depth: self.max_branch_depth,
            palette: self.palette.clone(),
            rooms,
            layout: self.layout.clone(),
            ores: self.ores.clone(),
        };
        toml::to_string(&file).map_err(|e| Error::Serialization(e.to_string()))
    }
}

fn single_char(key: &str) -> Result<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(Error::InvalidSymbol(key.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rooms::RoomType;
    use delve_core::BlockId;
    use delve_world::Palette;

    #[test]
    fn builtin_style_loads() {
        let style = CaveStyle::builtin().unwrap();
        assert!(!style.rooms.is_empty());
        assert!(!style.layout.entries.is_empty());
        for entry in &style.layout.entries {
            assert!(style.rooms.contains(entry.symbol));
        }
        // every room type is represented
        for t in RoomType::ALL {
            assert!(
                style.rooms.iter().any(|r| r.room_type() == t),
                "no {} room",
                t.name()
            );
        }
        assert_eq!(style.palette.air_block(), BlockState::AIR);
    }

    #[test]
    fn minimal_style_uses_defaults() {
        let style = CaveStyle::from_toml_str(
            r#"
            [rooms.s]
            type = "simple"
            "#,
        )
        .unwrap();
        assert_eq!(style.max_branch_depth, 8);
        assert_eq!(style.palette, StylePalette::default());
        assert!(style.layout.entries.is_empty());
        assert!(style.ores.is_empty());
        assert_eq!(style.rooms.get('s').map(Room::room_type), Some(RoomType::Simple));
    }

    #[test]
    fn ore_defaults_and_replaceable_blocks() {
        let style = CaveStyle::from_toml_str(
            r#"
            [rooms.s]
            type = "simple"

            [[ores]]
            block = 7

            [[ores]]
            block = { id = 8, metadata = 2 }
            replaces = [1, 2]
            radius = 5
            chance = 1.0
            "#,
        )
        .unwrap();
        assert_eq!(style.ores.len(), 2);
        assert_eq!(style.ores[0].block, BlockState::new(BlockId::IRON_ORE));
        assert_eq!(style.ores[0].radius, 3);
        assert!((style.ores[0].chance - 0.05).abs() < f64::EPSILON);
        assert!(style.ores[0].replaces.is_none());
        assert_eq!(style.ores[1].block, BlockState::with_metadata(BlockId::GOLD_ORE, 2));
        assert_eq!(
            style.ores[1].replaces.as_deref(),
            Some(&[BlockState::STONE, BlockState::new(BlockId::DIRT)][..])
        );
    }

    #[test]
    fn rejects_bad_styles() {
        let long_key = CaveStyle::from_toml_str("[rooms.ab]\ntype = \"simple\"");
        assert!(matches!(long_key, Err(Error::InvalidSymbol(k)) if k == "ab"));

        let dangling = CaveStyle::from_toml_str(
            "[rooms.s]\ntype = \"simple\"\n[layout]\nentries = [{ symbol = \"q\" }]",
        );
        assert!(matches!(dangling, Err(Error::InvalidSymbol(_))));

        let bad_room =
            CaveStyle::from_toml_str("[rooms.t]\ntype = \"turn\"\nminAngle = 5\nmaxAngle = 1");
        assert!(matches!(bad_room, Err(Error::InvalidRange { room: "turn", .. })));

        let bad_ore = CaveStyle::from_toml_str("[[ores]]\nblock = 6\nchance = 2.0");
        assert!(matches!(bad_ore, Err(Error::InvalidRange { room: "ore", field: "chance", .. })));

        let not_toml = CaveStyle::from_toml_str("rooms = [");
        assert!(matches!(not_toml, Err(Error::Serialization(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = CaveStyle::from_path("/nonexistent/delve/style.toml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_config_error());
    }

    #[test]
    fn toml_roundtrip_preserves_style() {
        let style = CaveStyle::builtin().unwrap();
        let text = style.to_toml_string().unwrap();
        let back = CaveStyle::from_toml_str(&text).unwrap();
        assert_eq!(back, style);
    }
}
