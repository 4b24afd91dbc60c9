//! Core game logic and state management

pub mod accusation;
pub mod navigation;

pub use accusation::{Verdict, CONVICTION_THRESHOLD, MAX_ACCUSED_LEN};
pub use navigation::{Arrival, Choice, Navigator, Transition};

use crate::data::*;
use crate::{GameError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Current phase of the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Exploring,            // Walking the manor
    Accusing,             // Exploration over, waiting for a name
    Closed(Verdict),      // Verdict delivered
}

/// Game statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub rooms_visited: u32,
    pub clues_collected: u32,
    pub turns_taken: u32,
    pub blocked_moves: u32,
    pub invalid_inputs: u32,
}

/// A message to display to the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMessage {
    pub timestamp: DateTime<Utc>,
    pub kind: MessageKind,
    pub message: String,
}

impl GameMessage {
    pub fn new(kind: MessageKind, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            message: message.to_string(),
        }
    }

    pub fn info(message: &str) -> Self {
        Self::new(MessageKind::Info, message)
    }

    pub fn warning(message: &str) -> Self {
        Self::new(MessageKind::Warning, message)
    }
}

/// The main game state.
///
/// Owns the manor, the catalog and the suspect index for the whole run.
#[derive(Debug)]
pub struct Game {
    pub case_id: CaseId,
    pub title: String,
    pub phase: GamePhase,
    pub stats: GameStats,

    /// Message log (for UI display)
    pub message_log: Vec<GameMessage>,

    rooms: RoomTree,
    catalog: ClueCatalog,
    suspects: SuspectIndex,
    navigator: Navigator,
}

impl Game {
    /// Set up a new case from a scenario and step into the entrance
    pub fn new(scenario: &Scenario) -> std::result::Result<Self, GameError> {
        let rooms = scenario.build_rooms()?;
        let suspects = scenario.build_index()?;
        let mut catalog = ClueCatalog::new();
        let (navigator, arrival) = Navigator::start(&rooms, &mut catalog);

        let case_id = CaseId::new();
        info!(case = %case_id, title = %scenario.title, rooms = rooms.len(), "new case opened");

        let mut game = Self {
            case_id,
            title: scenario.title.clone(),
            phase: GamePhase::Exploring,
            stats: GameStats::default(),
            message_log: Vec::new(),
            rooms,
            catalog,
            suspects,
            navigator,
        };

        if !scenario.synopsis.is_empty() {
            game.add_message(GameMessage::info(&scenario.synopsis));
        }
        game.add_message(GameMessage::info(&format!(
            "You need at least {} clues against someone to accuse them.",
            CONVICTION_THRESHOLD
        )));
        game.record_arrival(&arrival);
        Ok(game)
    }

    /// Add a message to the log
    pub fn add_message(&mut self, message: GameMessage) {
        self.message_log.push(message);
    }

    pub fn rooms(&self) -> &RoomTree {
        &self.rooms
    }

    pub fn catalog(&self) -> &ClueCatalog {
        &self.catalog
    }

    pub fn suspects(&self) -> &SuspectIndex {
        &self.suspects
    }

    pub fn current_room(&self) -> &Room {
        self.navigator.current(&self.rooms)
    }

    /// Room names from the entrance to where the player stands
    pub fn breadcrumb(&self) -> Vec<&str> {
        self.rooms
            .rooms_along(self.navigator.path())
            .into_iter()
            .map(Room::name)
            .collect()
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        match &self.phase {
            GamePhase::Closed(verdict) => Some(verdict),
            _ => None,
        }
    }

    /// Play one exploration turn
    pub fn choose(&mut self, choice: Choice) -> Transition {
        if self.phase != GamePhase::Exploring {
            return Transition::Finished;
        }

        self.stats.turns_taken += 1;
        let transition = self.navigator.step(choice, &self.rooms, &mut self.catalog);
        match &transition {
            Transition::Entered(arrival) => self.record_arrival(arrival),
            Transition::NoPath(direction) => {
                self.stats.blocked_moves += 1;
                let note = format!("There is no path to the {}.", direction);
                self.add_message(GameMessage::warning(&note));
            }
            Transition::Invalid => {
                self.stats.invalid_inputs += 1;
                self.add_message(GameMessage::warning("Invalid option."));
            }
            Transition::Finished => {
                self.phase = GamePhase::Accusing;
                self.add_message(GameMessage::info("Exploration over. Time to name the culprit."));
            }
        }
        transition
    }

    /// Accuse a suspect. Only one accusation is allowed per case.
    pub fn accuse(&mut self, name: &str) -> Result<&Verdict> {
        if self.phase != GamePhase::Accusing {
            return Err(GameError::InvalidState(format!(
                "cannot accuse while {:?}",
                self.phase
            ))
            .into());
        }

        let accused = accusation::bounded_name(name);
        let verdict = accusation::evaluate(&self.catalog, &self.suspects, &accused);
        info!(
            case = %self.case_id,
            accused = %verdict.accused,
            clues = verdict.clue_count(),
            convicted = verdict.is_conviction(),
            "verdict delivered"
        );

        let message = format!("{}: {}", verdict.headline(), verdict.summary());
        self.add_message(GameMessage::new(MessageKind::Verdict, &message));
        self.phase = GamePhase::Closed(verdict);

        self.verdict().ok_or_else(|| {
            GameError::InvalidState("verdict missing after accusation".to_string()).into()
        })
    }

    /// Check current game status
    pub fn check_status(&self) -> String {
        format!(
            "Turn: {} | Room: {} | Rooms visited: {} | Clues: {}",
            self.stats.turns_taken,
            self.current_room().name(),
            self.stats.rooms_visited,
            self.catalog.count()
        )
    }

    fn record_arrival(&mut self, arrival: &Arrival) {
        self.stats.rooms_visited += 1;
        self.add_message(GameMessage::info(&format!("You enter the {}.", arrival.room)));

        match &arrival.clue {
            Some(clue) if arrival.collected => {
                self.stats.clues_collected += 1;
                let note = format!("Clue found: \"{}\"", clue);
                self.add_message(GameMessage::new(MessageKind::Clue, &note));
                if let Some(suspect) = self.suspects.lookup(clue) {
                    let note = format!("Related suspect: {}", suspect);
                    self.add_message(GameMessage::new(MessageKind::Clue, &note));
                }
            }
            Some(_) => {
                self.add_message(GameMessage::info("You already noted this room's clue."));
            }
            None => {
                self.add_message(GameMessage::info("Nothing of interest here."));
            }
        }

        if arrival.dead_end {
            warn!(room = %arrival.room, "dead end reached");
            self.add_message(GameMessage::warning("This room has no more paths. Press S to stop."));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> Game {
        Game::new(&Scenario::manor()).expect("game")
    }

    #[test]
    fn huge_bucket_count_is_an_allocation_error() {
        let scenario = Scenario {
            buckets: 1 << 60,
            ..Scenario::manor()
        };
        assert!(matches!(
            Game::new(&scenario),
            Err(GameError::AllocationFailed(_))
        ));
    }

    #[test]
    fn new_game_stands_in_the_hall() {
        let game = game();
        assert_eq!(game.phase, GamePhase::Exploring);
        assert_eq!(game.current_room().name(), "Hall de Entrada");
        assert_eq!(game.catalog().count(), 1);
        assert_eq!(game.stats.rooms_visited, 1);
        assert!(game
            .message_log
            .iter()
            .any(|m| m.message.contains("Related suspect: Mordomo James")));
    }

    #[test]
    fn blocked_and_invalid_moves_are_counted() {
        let mut game = game();
        game.choose(Choice::Go(Direction::Right)); // Cozinha
        game.choose(Choice::Go(Direction::Left)); // Despensa, a dead end
        game.choose(Choice::Go(Direction::Left));
        game.choose(Choice::Invalid);
        assert_eq!(game.stats.blocked_moves, 1);
        assert_eq!(game.stats.invalid_inputs, 1);
        assert_eq!(game.stats.turns_taken, 4);
        assert_eq!(game.current_room().name(), "Despensa");
        assert_eq!(game.breadcrumb(), vec!["Hall de Entrada", "Cozinha", "Despensa"]);
    }

    #[test]
    fn cannot_accuse_before_stopping() {
        let mut game = game();
        assert!(game.accuse("Mordomo James").is_err());
        assert_eq!(game.phase, GamePhase::Exploring);
    }

    #[test]
    fn accusation_happens_once() {
        let mut game = game();
        game.choose(Choice::Stop);
        assert_eq!(game.phase, GamePhase::Accusing);
        assert_eq!(game.choose(Choice::Go(Direction::Left)), Transition::Finished);

        let verdict = game.accuse("Mordomo James\n").expect("verdict").clone();
        assert_eq!(verdict.accused, "Mordomo James");
        assert_eq!(verdict.clue_count(), 1);
        assert!(!verdict.is_conviction());

        assert!(game.accuse("Chef Marcel").is_err());
        assert_eq!(game.verdict(), Some(&verdict));
    }

    #[test]
    fn broken_scenario_does_not_start() {
        let mut scenario = Scenario::manor();
        scenario.buckets = 0;
        assert!(matches!(Game::new(&scenario), Err(GameError::EmptyBucketTable)));
    }
}
