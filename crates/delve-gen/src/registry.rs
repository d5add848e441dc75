//! Symbol to room lookup.

use delve_core::{Error, Result};
use hashbrown::HashMap;

use crate::rooms::Room;

/// The rooms of a style, indexed by symbol.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoomRegistry {
    rooms: Vec<Room>,
    by_symbol: HashMap<char, usize>,
}

impl RoomRegistry {
    /// Index `rooms` by symbol. Two rooms sharing a symbol is an error.
    pub fn new(rooms: Vec<Room>) -> Result<Self> {
        let mut by_symbol = HashMap::with_capacity(rooms.len());
        for (i, room) in rooms.iter().enumerate() {
            if by_symbol.insert(room.symbol(), i).is_some() {
                return Err(Error::DuplicateSymbol(room.symbol()));
            }
        }
        Ok(Self { rooms, by_symbol })
    }

    /// Room registered under `symbol`
    #[inline]
    pub fn get(&self, symbol: char) -> Option<&Room> {
        self.by_symbol.get(&symbol).map(|&i| &self.rooms[i])
    }

    /// Check if a room is registered under `symbol`
    pub fn contains(&self, symbol: char) -> bool {
        self.by_symbol.contains_key(&symbol)
    }

    /// All rooms in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    /// Number of registered rooms
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Check if no rooms are registered
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
