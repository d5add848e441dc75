//! Weighted room selection for cave descriptions.

use serde::{Deserialize, Serialize};

use crate::context::GenerationContext;
use crate::registry::RoomRegistry;
use crate::rooms::Room;

/// One candidate symbol and its relative weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEntry {
    pub symbol: char,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

/// How default cave descriptions are built from a style's rooms.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    /// Candidate symbols with weights
    #[serde(default)]
    pub entries: Vec<LayoutEntry>,
    /// Whether sub-branches may fork again
    #[serde(default)]
    pub allow_nested_branches: bool,
}

impl Layout {
    /// Every room of `rooms` with weight 1, in registration order.
    pub fn uniform(rooms: &RoomRegistry) -> Self {
        Self {
            entries: rooms
                .iter()
                .map(|room| LayoutEntry {
                    symbol: room.symbol(),
                    weight: 1,
                })
                .collect(),
            allow_nested_branches: false,
        }
    }

    /// Build a description of `length` symbols.
    ///
    /// A main description never opens with a branch room. Sub-branch
    /// descriptions contain no branch rooms unless nesting is allowed. The
    /// result is shorter than `length` only if no entry is eligible.
    pub fn generate(
        &self,
        ctx: &mut GenerationContext<'_>,
        length: i32,
        is_main_branch: bool,
        rooms: &RoomRegistry,
    ) -> String {
        let forks = |entry: &LayoutEntry| rooms.get(entry.symbol).is_some_and(Room::is_branch);
        let pool: Vec<LayoutEntry> = self
            .entries
            .iter()
            .copied()
            .filter(|e| e.weight > 0)
            .filter(|e| is_main_branch || self.allow_nested_branches || !forks(e))
            .collect();
        let openers: Vec<LayoutEntry> = pool.iter().copied().filter(|e| !forks(e)).collect();

        let mut cave = String::new();
        for i in 0..length {
            let candidates = if i == 0 && is_main_branch {
                &openers
            } else {
                &pool
            };
            match pick(ctx, candidates) {
                Some(symbol) => cave.push(symbol),
                None => break,
            }
        }
        cave
    }
}

/// Weighted draw. Totals beyond `i32::MAX` saturate.
fn pick(ctx: &mut GenerationContext<'_>, entries: &[LayoutEntry]) -> Option<char> {
    let total: u64 = entries.iter().map(|e| u64::from(e.weight)).sum();
    if total == 0 {
        return None;
    }
    let mut roll = u64::try_from(ctx.next_int(i32::try_from(total).unwrap_or(i32::MAX)))
        .unwrap_or_default();
    for entry in entries {
        let weight = u64::from(entry.weight);
        if roll < weight {
            return Some(entry.symbol);
        }
        roll -= weight;
    }
    entries.last().map(|e| e.symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::centroid::tags;
    use crate::rooms::{BranchRoom, RoomKind, SimpleRoom};
    use crate::style::CaveStyle;
    use delve_world::VoxelWorld;

    fn rooms() -> Vec<Room> {
        let none = tags::<_, String>([]);
        vec![
            Room::new('s', none.clone(), RoomKind::Simple(SimpleRoom {})).unwrap(),
            Room::new('b', none, RoomKind::Branch(BranchRoom::default())).unwrap(),
        ]
    }

    fn layout(allow_nested_branches: bool) -> Layout {
        Layout {
            entries: vec![
                LayoutEntry { symbol: 's', weight: 1 },
                LayoutEntry { symbol: 'b', weight: 9 },
            ],
            allow_nested_branches,
        }
    }

    #[test]
    fn main_description_never_opens_with_a_branch() {
        let style = CaveStyle::with_rooms(rooms()).unwrap();
        let mut world = VoxelWorld::stone();
        let mut ctx = GenerationContext::new(&style, &mut world, 0);
        let layout = layout(false);
        let mut saw_branch = false;
        for _ in 0..50 {
            let cave = layout.generate(&mut ctx, 8, true, &style.rooms);
            assert_eq!(cave.len(), 8);
            assert!(cave.starts_with('s'));
            saw_branch |= cave.contains('b');
        }
        assert!(saw_branch);
    }

    #[test]
    fn sub_branches_skip_branch_rooms_unless_nesting() {
        let style = CaveStyle::with_rooms(rooms()).unwrap();
        let mut world = VoxelWorld::stone();
        let mut ctx = GenerationContext::new(&style, &mut world, 1);

        let flat = layout(false).generate(&mut ctx, 30, false, &style.rooms);
        assert_eq!(flat, "s".repeat(30));

        let nested = layout(true).generate(&mut ctx, 30, false, &style.rooms);
        assert!(nested.contains('b'));
    }

    #[test]
    fn weights_bias_selection() {
        let style = CaveStyle::with_rooms(rooms()).unwrap();
        let mut world = VoxelWorld::stone();
        let mut ctx = GenerationContext::new(&style, &mut world, 2);
        let cave = layout(true).generate(&mut ctx, 1000, false, &style.rooms);
        let branches = cave.chars().filter(|&c| c == 'b').count();
        assert!((850..=950).contains(&branches), "{branches}");
    }

    #[test]
    fn no_eligible_entries_gives_empty_description() {
        let style = CaveStyle::with_rooms(rooms()).unwrap();
        let mut world = VoxelWorld::stone();
        let mut ctx = GenerationContext::new(&style, &mut world, 3);
        let only_branch = Layout {
            entries: vec![LayoutEntry { symbol: 'b', weight: 1 }],
            allow_nested_branches: false,
        };
        assert_eq!(only_branch.generate(&mut ctx, 5, true, &style.rooms), "");
        assert_eq!(Layout::default().generate(&mut ctx, 5, false, &style.rooms), "");
    }

    #[test]
    fn uniform_layout_covers_every_room() {
        let style = CaveStyle::with_rooms(rooms()).unwrap();
        let layout = Layout::uniform(&style.rooms);
        let symbols: String = layout.entries.iter().map(|e| e.symbol).collect();
        assert_eq!(symbols, "sb");
        assert!(layout.entries.iter().all(|e| e.weight == 1));
    }
}
