//! The manor map
//!
//! Rooms form a strict binary tree. Each room owns its two optional
//! children, so the map can only be walked downwards from the entrance.

use serde::{Deserialize, Serialize};

/// One of the two ways out of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// A room of the manor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    name: String,
    clue: Option<String>,
    left: Option<Box<Room>>,
    right: Option<Box<Room>>,
}

impl Room {
    /// Create a leaf room. An empty clue text means the room hides nothing.
    pub fn new(name: &str, clue: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            clue: clue.filter(|c| !c.is_empty()).map(str::to_string),
            left: None,
            right: None,
        }
    }

    pub fn with_left(mut self, room: Room) -> Self {
        self.set_left(room);
        self
    }

    pub fn with_right(mut self, room: Room) -> Self {
        self.set_right(room);
        self
    }

    pub fn set_left(&mut self, room: Room) {
        self.left = Some(Box::new(room));
    }

    pub fn set_right(&mut self, room: Room) {
        self.right = Some(Box::new(room));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The clue hidden in this room, if any
    pub fn clue(&self) -> Option<&str> {
        self.clue.as_deref()
    }

    pub fn has_left(&self) -> bool {
        self.left.is_some()
    }

    pub fn has_right(&self) -> bool {
        self.right.is_some()
    }

    pub fn left(&self) -> Option<&Room> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Room> {
        self.right.as_deref()
    }

    /// Follow one exit, if it exists
    pub fn child(&self, direction: Direction) -> Option<&Room> {
        match direction {
            Direction::Left => self.left(),
            Direction::Right => self.right(),
        }
    }

    /// A room with no exits is a dead end
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    fn count(&self) -> usize {
        1 + self.left().map_or(0, Room::count) + self.right().map_or(0, Room::count)
    }

    fn depth(&self) -> usize {
        1 + self
            .left()
            .map_or(0, Room::depth)
            .max(self.right().map_or(0, Room::depth))
    }
}

/// The whole manor, rooted at its entrance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomTree {
    root: Room,
}

impl RoomTree {
    pub fn new(root: Room) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Room {
        &self.root
    }

    /// Total number of rooms
    pub fn len(&self) -> usize {
        self.root.count()
    }

    /// A tree always holds at least its entrance
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of levels from the entrance to the deepest room
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Walk a path of exits from the entrance.
    ///
    /// Returns `None` as soon as the path asks for an exit that doesn't exist.
    pub fn resolve(&self, path: &[Direction]) -> Option<&Room> {
        path.iter()
            .try_fold(&self.root, |room, &direction| room.child(direction))
    }

    /// Every room on a path, entrance first
    pub fn rooms_along(&self, path: &[Direction]) -> Vec<&Room> {
        let mut rooms = vec![&self.root];
        let mut current = &self.root;
        for &direction in path {
            match current.child(direction) {
                Some(next) => {
                    rooms.push(next);
                    current = next;
                }
                None => break,
            }
        }
        rooms
    }
}
