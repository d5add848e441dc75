//! Room variants and the contract they share.
//!
//! Every room runs as four steps, always in this order:
//! 1. [`RoomGeometry::create_user_data`] samples the per-use parameters,
//! 2. [`RoomGeometry::add_centroids`] emits centroids,
//! 3. [`RoomGeometry::adjust_direction`] turns the cursor,
//! 4. [`RoomGeometry::adjust_location`] moves the cursor, relative to the new
//!    heading.
//!
//! Rooms hold only their configured ranges; all per-use state lives in the
//! typed user data returned by step 1.

mod branch;
mod cavern;
mod dropshaft;
mod nil;
mod pit_mine;
mod ravine;
mod shelf;
mod simple;
mod turn;
mod vertical;

use std::cmp::Ordering;
use std::fmt::Display;

use delve_core::{Error, Result};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::centroid::{CaveOutput, Tags};
use crate::context::{Cursor, GenerationContext};

pub use branch::BranchRoom;
pub use cavern::CavernRoom;
pub use dropshaft::DropshaftRoom;
pub use nil::NilRoom;
pub use pit_mine::{PitMineRoom, PitStep};
pub use ravine::{RavineRoom, RavineShape};
pub use shelf::{ShelfLayout, ShelfRoom};
pub use simple::SimpleRoom;
pub use turn::TurnRoom;
pub use vertical::{VerticalRoom, VerticalShape};

/// The geometry contract every room variant implements.
pub trait RoomGeometry {
    /// Per-use parameters sampled in [`Self::create_user_data`].
    type UserData;

    /// Sample the per-use parameters of one invocation.
    fn create_user_data(
        &self,
        ctx: &mut GenerationContext<'_>,
        cursor: Cursor,
        radius: i32,
        tags: &Tags,
    ) -> Self::UserData;

    /// Append this invocation's centroids to `out`.
    fn add_centroids(
        &self,
        ctx: &mut GenerationContext<'_>,
        cursor: Cursor,
        radius: i32,
        tags: &Tags,
        data: &Self::UserData,
        out: &mut CaveOutput,
    ) -> Result<()>;

    /// Heading after this room. Unchanged by default.
    fn adjust_direction(
        &self,
        _ctx: &mut GenerationContext<'_>,
        direction: DVec3,
        _data: &Self::UserData,
    ) -> DVec3 {
        direction
    }

    /// Location after this room, given the heading from [`Self::adjust_direction`].
    ///
    /// Defaults to a jittered advance of `direction * radius`.
    fn adjust_location(
        &self,
        ctx: &mut GenerationContext<'_>,
        location: DVec3,
        direction: DVec3,
        radius: i32,
        _data: &Self::UserData,
    ) -> DVec3 {
        advance(ctx, location, direction, radius)
    }
}

/// Jitter `location`, then step `radius` blocks along `direction`.
pub fn advance(
    ctx: &mut GenerationContext<'_>,
    location: DVec3,
    direction: DVec3,
    radius: i32,
) -> DVec3 {
    ctx.vary(location) + direction * f64::from(radius)
}

/// Run all four steps of a room and return the new cursor.
pub fn step<G: RoomGeometry>(
    geometry: &G,
    ctx: &mut GenerationContext<'_>,
    cursor: Cursor,
    radius: i32,
    tags: &Tags,
    out: &mut CaveOutput,
) -> Result<Cursor> {
    let data = geometry.create_user_data(ctx, cursor, radius, tags);
    geometry.add_centroids(ctx, cursor, radius, tags, &data, out)?;
    let direction = geometry.adjust_direction(ctx, cursor.direction, &data);
    let location = geometry.adjust_location(ctx, cursor.location, direction, radius, &data);
    Ok(Cursor::new(location, direction))
}

/// Room type tag, as written in the `type` key of a room table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoomType {
    Simple,
    Turn,
    Vertical,
    Branch,
    Dropshaft,
    Cavern,
    Ravine,
    PitMine,
    Shelf,
    Nil,
}

impl RoomType {
    /// All room types
    pub const ALL: [RoomType; 10] = [
        Self::Simple,
        Self::Turn,
        Self::Vertical,
        Self::Branch,
        Self::Dropshaft,
        Self::Cavern,
        Self::Ravine,
        Self::PitMine,
        Self::Shelf,
        Self::Nil,
    ];

    /// Config name of this type
    pub const fn name(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Turn => "turn",
            Self::Vertical => "vertical",
            Self::Branch => "branch",
            Self::Dropshaft => "dropshaft",
            Self::Cavern => "cavern",
            Self::Ravine => "ravine",
            Self::PitMine => "pit_mine",
            Self::Shelf => "shelf",
            Self::Nil => "nil",
        }
    }

    /// Parse a config name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}

/// Variant-specific parameters of a room.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoomKind {
    Simple(SimpleRoom),
    Turn(TurnRoom),
    Vertical(VerticalRoom),
    Branch(BranchRoom),
    Dropshaft(DropshaftRoom),
    Cavern(CavernRoom),
    Ravine(RavineRoom),
    PitMine(PitMineRoom),
    Shelf(ShelfRoom),
    Nil(NilRoom),
}

impl RoomKind {
    /// Type tag of this variant
    pub const fn room_type(&self) -> RoomType {
        match self {
            Self::Simple(_) => RoomType::Simple,
            Self::Turn(_) => RoomType::Turn,
            Self::Vertical(_) => RoomType::Vertical,
            Self::Branch(_) => RoomType::Branch,
            Self::Dropshaft(_) => RoomType::Dropshaft,
            Self::Cavern(_) => RoomType::Cavern,
            Self::Ravine(_) => RoomType::Ravine,
            Self::PitMine(_) => RoomType::PitMine,
            Self::Shelf(_) => RoomType::Shelf,
            Self::Nil(_) => RoomType::Nil,
        }
    }

    /// Check the range invariants of this variant.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Simple(_) | Self::Nil(_) => Ok(()),
            Self::Turn(room) => room.validate(),
            Self::Vertical(room) => room.validate(),
            Self::Branch(room) => room.validate(),
            Self::Dropshaft(room) => room.validate(),
            Self::Cavern(room) => room.validate(),
            Self::Ravine(room) => room.validate(),
            Self::PitMine(room) => room.validate(),
            Self::Shelf(room) => room.validate(),
        }
    }
}

/// A room bound to a symbol of the cave description alphabet.
#[derive(Clone, Debug, PartialEq)]
pub struct Room {
    symbol: char,
    tags: Tags,
    kind: RoomKind,
}

impl Room {
    /// Create a room, checking the variant's range invariants.
    pub fn new(symbol: char, tags: Tags, kind: RoomKind) -> Result<Self> {
        kind.validate()?;
        Ok(Self { symbol, tags, kind })
    }

    /// Symbol selecting this room in cave descriptions
    pub fn symbol(&self) -> char {
        self.symbol
    }

    /// Tags attached to every centroid this room emits
    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Variant parameters
    pub fn kind(&self) -> &RoomKind {
        &self.kind
    }

    /// Type tag
    pub fn room_type(&self) -> RoomType {
        self.kind.room_type()
    }

    /// Whether this room forks a sub-cave
    pub fn is_branch(&self) -> bool {
        matches!(self.kind, RoomKind::Branch(_))
    }

    /// Run this room at `cursor` and return the cursor for the next room.
    pub fn generate(
        &self,
        ctx: &mut GenerationContext<'_>,
        cursor: Cursor,
        radius: i32,
        out: &mut CaveOutput,
    ) -> Result<Cursor> {
        let tags = &self.tags;
        match &self.kind {
            RoomKind::Simple(room) => step(room, ctx, cursor, radius, tags, out),
            RoomKind::Turn(room) => step(room, ctx, cursor, radius, tags, out),
            RoomKind::Vertical(room) => step(room, ctx, cursor, radius, tags, out),
            RoomKind::Branch(room) => step(room, ctx, cursor, radius, tags, out),
            RoomKind::Dropshaft(room) => step(room, ctx, cursor, radius, tags, out),
            RoomKind::Cavern(room) => step(room, ctx, cursor, radius, tags, out),
            RoomKind::Ravine(room) => step(room, ctx, cursor, radius, tags, out),
            RoomKind::PitMine(room) => step(room, ctx, cursor, radius, tags, out),
            RoomKind::Shelf(room) => step(room, ctx, cursor, radius, tags, out),
            RoomKind::Nil(room) => step(room, ctx, cursor, radius, tags, out),
        }
    }

    /// Build a room from a key-value table (`type`, optional `tags`, and the
    /// variant's camelCase parameters; absent parameters take their defaults).
    pub fn deserialize(symbol: char, table: &toml::Table) -> Result<Self> {
        let type_name = table
            .get("type")
            .and_then(toml::Value::as_str)
            .ok_or(Error::MissingField {
                room: "room",
                field: "type",
            })?;
        if RoomType::from_name(type_name).is_none() {
            return Err(Error::UnknownRoomType(type_name.to_owned()));
        }

        let tags = parse_tags(table.get("tags"))?;
        let mut params = table.clone();
        params.remove("tags");
        let kind: RoomKind = toml::Value::Table(params)
            .try_into()
            .map_err(|e: toml::de::Error| {
                Error::Serialization(format!("room {symbol:?}: {}", e.message()))
            })?;
        Self::new(symbol, tags, kind)
    }

    /// Write this room's type, tags and parameters to a key-value table.
    pub fn serialize(&self) -> Result<toml::Table> {
        let mut table = match toml::Value::try_from(&self.kind) {
            Ok(toml::Value::Table(table)) => table,
            Ok(other) => {
                return Err(Error::Serialization(format!(
                    "room {:?} serialized to {}",
                    self.symbol,
                    other.type_str()
                )))
            }
            Err(e) => return Err(Error::Serialization(e.to_string())),
        };
        match &*self.tags {
            [] => {}
            [single] => {
                table.insert("tags".into(), toml::Value::String(single.clone()));
            }
            many => {
                let list = many.iter().cloned().map(toml::Value::String).collect();
                table.insert("tags".into(), toml::Value::Array(list));
            }
        }
        Ok(table)
    }
}

/// `tags` may be a single string or a list of strings.
fn parse_tags(value: Option<&toml::Value>) -> Result<Tags> {
    match value {
        None => Ok(Tags::from([])),
        Some(toml::Value::String(tag)) => Ok(Tags::from([tag.clone()])),
        Some(toml::Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_owned).ok_or_else(|| {
                    Error::Serialization(format!("tag must be a string, got {}", item.type_str()))
                })
            })
            .collect(),
        Some(other) => Err(Error::Serialization(format!(
            "tags must be a string or a list, got {}",
            other.type_str()
        ))),
    }
}

/// Reject `max < min` (and unordered values such as NaN).
pub(crate) fn ensure_ordered<T: PartialOrd + Display>(
    room: &'static str,
    field: &'static str,
    min: T,
    max: T,
) -> Result<()> {
    match min.partial_cmp(&max) {
        Some(Ordering::Less | Ordering::Equal) => Ok(()),
        _ => Err(Error::InvalidRange {
            room,
            field,
            reason: format!("max {max} < min {min}"),
        }),
    }
}

/// Reject values below `floor`.
pub(crate) fn ensure_at_least<T: PartialOrd + Display>(
    room: &'static str,
    field: &'static str,
    value: T,
    floor: T,
) -> Result<()> {
    if value >= floor {
        Ok(())
    } else {
        Err(Error::InvalidRange {
            room,
            field,
            reason: format!("{value} is below {floor}"),
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::centroid::tags;

    fn table(src: &str) -> toml::Table {
        toml::from_str(src).unwrap()
    }

    #[test]
    fn type_names_roundtrip() {
        for t in RoomType::ALL {
            assert_eq!(RoomType::from_name(t.name()), Some(t));
        }
        assert_eq!(RoomType::from_name("lake"), None);
    }

    #[test]
    fn deserialize_applies_defaults() {
        let room = Room::deserialize('v', &table(r#"type = "vertical""#)).unwrap();
        assert_eq!(room.symbol(), 'v');
        assert_eq!(room.room_type(), RoomType::Vertical);
        assert!(room.tags().is_empty());
        assert_eq!(room.kind(), &RoomKind::Vertical(VerticalRoom::default()));
    }

    #[test]
    fn deserialize_single_tag_and_tag_list() {
        let single = Room::deserialize('s', &table("type = \"simple\"\ntags = \"wet\"")).unwrap();
        assert_eq!(&**single.tags(), ["wet"]);

        let many =
            Room::deserialize('s', &table("type = \"simple\"\ntags = [\"a\", \"b\"]")).unwrap();
        assert_eq!(&**many.tags(), ["a", "b"]);

        let bad = Room::deserialize('s', &table("type = \"simple\"\ntags = 3"));
        assert!(matches!(bad, Err(Error::Serialization(_))));
    }

    #[test]
    fn deserialize_rejects_unknown_and_missing_type() {
        let unknown = Room::deserialize('x', &table(r#"type = "lake""#));
        assert!(matches!(unknown, Err(Error::UnknownRoomType(t)) if t == "lake"));

        let missing = Room::deserialize('x', &table("minAngle = 3"));
        assert!(matches!(missing, Err(Error::MissingField { field: "type", .. })));
    }

    #[test]
    fn deserialize_checks_ranges() {
        let err = Room::deserialize(
            'd',
            &table("type = \"dropshaft\"\nminDepth = 10\nmaxDepth = 4"),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidRange { room: "dropshaft", field: "depth", .. }));
        assert!(err.is_config_error());
    }

    #[test]
    fn serialize_then_deserialize_preserves_room() {
        let kind = RoomKind::Branch(BranchRoom::new(30.0, 60.0, 1, 2, 5, 9).unwrap());
        let room = Room::new('b', tags(["side", "narrow"]), kind).unwrap();
        let table = room.serialize().unwrap();

        assert_eq!(table.get("type").and_then(toml::Value::as_str), Some("branch"));
        assert_eq!(table.get("maxBranchLength").and_then(toml::Value::as_integer), Some(9));

        let back = Room::deserialize('b', &table).unwrap();
        assert_eq!(back, room);
    }

    /// Run one room from a fixed cursor with its own fresh stream.
    fn run_with_seed<G: RoomGeometry>(room: &G, seed: u64) -> (CaveOutput, Cursor) {
        let style = testing::style();
        let mut world = testing::world();
        let mut ctx = GenerationContext::new(&style, &mut world, seed);
        let mut out = CaveOutput::new();
        let start = Cursor::new(DVec3::new(4.0, 60.0, -2.0), DVec3::new(0.6, 0.0, 0.8));
        let next = step(room, &mut ctx, start, 5, &testing::no_tags(), &mut out).unwrap();
        (out, next)
    }

    #[test]
    fn fixed_ranges_ignore_the_seed() {
        let vertical = VerticalRoom::new(30.0, 30.0, 4, 4).unwrap();
        let (a, a_next) = run_with_seed(&vertical, 1);
        let (b, b_next) = run_with_seed(&vertical, 0xdead_beef);
        assert_eq!(a.centroids.len(), 4);
        assert_eq!(a.centroids, b.centroids);
        assert_eq!(a_next, b_next);

        // the advance after a turn is jittered, the heading is not
        let turn = TurnRoom::new(-45.0, -45.0).unwrap();
        let (a, a_next) = run_with_seed(&turn, 1);
        let (b, b_next) = run_with_seed(&turn, 0xdead_beef);
        assert_eq!(a.centroids, b.centroids);
        assert_eq!(a_next.direction, b_next.direction);

        let (a, a_next) = run_with_seed(&NilRoom {}, 1);
        let (b, b_next) = run_with_seed(&NilRoom {}, 0xdead_beef);
        assert!(a.centroids.is_empty() && b.centroids.is_empty());
        assert_eq!(a_next, b_next);
    }

    #[test]
    fn hand_built_rooms_are_validated() {
        let kind = RoomKind::Turn(TurnRoom {
            min_angle: 40.0,
            max_angle: 10.0,
        });
        assert!(matches!(
            Room::new('t', testing::no_tags(), kind),
            Err(Error::InvalidRange { room: "turn", .. })
        ));
    }
}
