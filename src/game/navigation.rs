//! Moving through the manor
//!
//! The navigator only ever descends: it remembers the exits taken from the
//! entrance and resolves the current room from that path. It borrows the
//! room tree and the catalog for each step and owns neither.
//!
//! A dead end does not end the exploration by itself. The player stays in
//! the room until they choose to stop.

use crate::data::{ClueCatalog, Direction, Room, RoomTree};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A player's move, decoded from one key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Choice {
    Go(Direction),
    Stop,
    Invalid,
}

impl Choice {
    /// Decode a key, ignoring case.
    ///
    /// `L`/`E` go left, `R`/`D` go right, `S` stops. Anything else is invalid.
    pub fn from_key(key: char) -> Self {
        match key.to_ascii_lowercase() {
            'l' | 'e' => Choice::Go(Direction::Left),
            'r' | 'd' => Choice::Go(Direction::Right),
            's' => Choice::Stop,
            _ => Choice::Invalid,
        }
    }
}

/// What the player found on entering a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrival {
    pub room: String,
    /// The room's clue, whether or not it was already in the catalog
    pub clue: Option<String>,
    /// True if the clue went into the catalog on this visit
    pub collected: bool,
    pub dead_end: bool,
}

/// Outcome of one turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Entered(Arrival),
    NoPath(Direction),
    Invalid,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavState {
    AtRoom,
    Finished,
}

/// Drives the descent from the entrance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    path: Vec<Direction>,
    state: NavState,
}

impl Navigator {
    /// Stand in the entrance and collect whatever is there
    pub fn start(rooms: &RoomTree, catalog: &mut ClueCatalog) -> (Self, Arrival) {
        let navigator = Self {
            path: Vec::new(),
            state: NavState::AtRoom,
        };
        let arrival = enter(rooms.root(), catalog);
        (navigator, arrival)
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == NavState::Finished
    }

    /// Exits taken so far, entrance first
    pub fn path(&self) -> &[Direction] {
        &self.path
    }

    pub fn current<'a>(&self, rooms: &'a RoomTree) -> &'a Room {
        // The path only ever records exits that existed when taken
        rooms.resolve(&self.path).unwrap_or_else(|| rooms.root())
    }

    /// Play one turn
    pub fn step(
        &mut self,
        choice: Choice,
        rooms: &RoomTree,
        catalog: &mut ClueCatalog,
    ) -> Transition {
        if self.is_finished() {
            return Transition::Finished;
        }

        let here = self.current(rooms);
        match choice {
            Choice::Go(direction) => match here.child(direction) {
                Some(next) => {
                    self.path.push(direction);
                    Transition::Entered(enter(next, catalog))
                }
                None => {
                    debug!(room = here.name(), %direction, "no path");
                    Transition::NoPath(direction)
                }
            },
            Choice::Stop => {
                info!(room = here.name(), depth = self.path.len(), "exploration finished");
                self.state = NavState::Finished;
                Transition::Finished
            }
            Choice::Invalid => {
                debug!(room = here.name(), "invalid option");
                Transition::Invalid
            }
        }
    }
}

fn enter(room: &Room, catalog: &mut ClueCatalog) -> Arrival {
    let collected = room.clue().is_some_and(|clue| catalog.insert(clue));
    info!(room = room.name(), collected, "entered room");
    Arrival {
        room: room.name().to_string(),
        clue: room.clue().map(str::to_string),
        collected,
        dead_end: room.is_leaf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manor() -> RoomTree {
        RoomTree::new(
            Room::new("Hall", Some("lock"))
                .with_left(Room::new("Parlour", None).with_right(Room::new("Music", Some("score"))))
                .with_right(Room::new("Kitchen", Some("knife"))),
        )
    }

    #[test]
    fn keys_are_case_insensitive() {
        assert_eq!(Choice::from_key('E'), Choice::Go(Direction::Left));
        assert_eq!(Choice::from_key('l'), Choice::Go(Direction::Left));
        assert_eq!(Choice::from_key('D'), Choice::Go(Direction::Right));
        assert_eq!(Choice::from_key('r'), Choice::Go(Direction::Right));
        assert_eq!(Choice::from_key('S'), Choice::Stop);
        assert_eq!(Choice::from_key('x'), Choice::Invalid);
        assert_eq!(Choice::from_key('7'), Choice::Invalid);
    }

    #[test]
    fn start_collects_entrance_clue() {
        let rooms = manor();
        let mut catalog = ClueCatalog::new();
        let (nav, arrival) = Navigator::start(&rooms, &mut catalog);
        assert_eq!(arrival.room, "Hall");
        assert!(arrival.collected);
        assert!(!arrival.dead_end);
        assert_eq!(nav.state(), NavState::AtRoom);
        assert!(catalog.contains("lock"));
    }

    #[test]
    fn descends_and_collects() {
        let rooms = manor();
        let mut catalog = ClueCatalog::new();
        let (mut nav, _) = Navigator::start(&rooms, &mut catalog);

        let t = nav.step(Choice::Go(Direction::Left), &rooms, &mut catalog);
        assert!(matches!(t, Transition::Entered(ref a) if a.room == "Parlour" && a.clue.is_none()));
        let t = nav.step(Choice::Go(Direction::Right), &rooms, &mut catalog);
        assert!(matches!(t, Transition::Entered(ref a) if a.collected && a.dead_end));

        assert_eq!(nav.current(&rooms).name(), "Music");
        assert_eq!(catalog.iter().collect::<Vec<_>>(), vec!["lock", "score"]);
    }

    #[test]
    fn missing_exit_keeps_position() {
        let rooms = manor();
        let mut catalog = ClueCatalog::new();
        let (mut nav, _) = Navigator::start(&rooms, &mut catalog);
        nav.step(Choice::Go(Direction::Right), &rooms, &mut catalog);

        let t = nav.step(Choice::Go(Direction::Left), &rooms, &mut catalog);
        assert_eq!(t, Transition::NoPath(Direction::Left));
        assert_eq!(nav.current(&rooms).name(), "Kitchen");
        assert_eq!(catalog.count(), 2);
    }

    #[test]
    fn invalid_choice_changes_nothing() {
        let rooms = manor();
        let mut catalog = ClueCatalog::new();
        let (mut nav, _) = Navigator::start(&rooms, &mut catalog);
        let before = (nav.clone(), catalog.clone());

        assert_eq!(nav.step(Choice::Invalid, &rooms, &mut catalog), Transition::Invalid);
        assert_eq!((nav, catalog), before);
    }

    #[test]
    fn dead_end_waits_for_stop() {
        let rooms = manor();
        let mut catalog = ClueCatalog::new();
        let (mut nav, _) = Navigator::start(&rooms, &mut catalog);
        let t = nav.step(Choice::Go(Direction::Right), &rooms, &mut catalog);
        assert!(matches!(t, Transition::Entered(ref a) if a.dead_end));
        assert!(!nav.is_finished());

        assert_eq!(
            nav.step(Choice::Go(Direction::Right), &rooms, &mut catalog),
            Transition::NoPath(Direction::Right)
        );
        assert!(!nav.is_finished());

        assert_eq!(nav.step(Choice::Stop, &rooms, &mut catalog), Transition::Finished);
        assert!(nav.is_finished());
    }

    #[test]
    fn finished_is_absorbing() {
        let rooms = manor();
        let mut catalog = ClueCatalog::new();
        let (mut nav, _) = Navigator::start(&rooms, &mut catalog);
        nav.step(Choice::Stop, &rooms, &mut catalog);

        let t = nav.step(Choice::Go(Direction::Right), &rooms, &mut catalog);
        assert_eq!(t, Transition::Finished);
        assert!(nav.path().is_empty());
        assert_eq!(catalog.count(), 1);
    }

    #[test]
    fn path_never_revisits_a_room() {
        let rooms = manor();
        let mut catalog = ClueCatalog::new();
        let (mut nav, _) = Navigator::start(&rooms, &mut catalog);
        for key in ['x', 'l', 'l', 'r', 'r', 'q', 'l'] {
            nav.step(Choice::from_key(key), &rooms, &mut catalog);
        }
        let names: Vec<&str> = rooms.rooms_along(nav.path()).into_iter().map(Room::name).collect();
        assert_eq!(names, vec!["Hall", "Parlour", "Music"]);
        let mut unique = names.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), names.len());
    }
}
