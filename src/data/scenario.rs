//! Scenario datasets
//!
//! A scenario supplies the manor layout and the clue attributions. The
//! built-in manor is used unless a scenario file is configured.

use super::{Room, RoomTree, SuspectIndex, DEFAULT_BUCKETS};
use crate::config::ConfigError;
use crate::GameError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Deepest manor a scenario may describe
pub const MAX_DEPTH: usize = 64;

/// A complete mystery: where things are and who they point at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub title: String,

    #[serde(default)]
    pub synopsis: String,

    /// Bucket count for the suspect index
    #[serde(default = "default_buckets")]
    pub buckets: usize,

    /// The entrance, with every other room nested below it
    pub rooms: RoomSpec,

    #[serde(default)]
    pub attributions: Vec<Attribution>,
}

/// A room as written in a scenario file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSpec {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clue: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Box<RoomSpec>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<Box<RoomSpec>>,
}

/// One clue → suspect pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    pub clue: String,
    pub suspect: String,
}

fn default_buckets() -> usize {
    DEFAULT_BUCKETS
}

impl RoomSpec {
    pub fn new(name: &str, clue: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            clue: clue.map(str::to_string),
            left: None,
            right: None,
        }
    }

    pub fn left(mut self, room: RoomSpec) -> Self {
        self.left = Some(Box::new(room));
        self
    }

    pub fn right(mut self, room: RoomSpec) -> Self {
        self.right = Some(Box::new(room));
        self
    }

    fn build(&self, depth: usize) -> Result<Room, GameError> {
        if depth > MAX_DEPTH {
            return Err(GameError::InvalidScenario(format!(
                "manor is deeper than {} levels",
                MAX_DEPTH
            )));
        }
        if self.name.trim().is_empty() {
            return Err(GameError::InvalidScenario("room without a name".to_string()));
        }

        // Children first, so a failure never leaves a half-built parent behind
        let left = self.left.as_ref().map(|spec| spec.build(depth + 1)).transpose()?;
        let right = self.right.as_ref().map(|spec| spec.build(depth + 1)).transpose()?;

        let mut room = Room::new(&self.name, self.clue.as_deref());
        if let Some(left) = left {
            room.set_left(left);
        }
        if let Some(right) = right {
            room.set_right(right);
        }
        Ok(room)
    }
}

impl Scenario {
    /// Parse a scenario from TOML
    pub fn parse(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load a scenario file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => ConfigError::ScenarioNotFound {
                path: path.to_path_buf(),
            },
            _ => ConfigError::Scenario {
                path: path.to_path_buf(),
                source,
            },
        })?;
        Self::parse(&contents)
    }

    /// Build the room tree
    pub fn build_rooms(&self) -> Result<RoomTree, GameError> {
        Ok(RoomTree::new(self.rooms.build(1)?))
    }

    /// Build the suspect index, inserting attributions in file order
    pub fn build_index(&self) -> Result<SuspectIndex, GameError> {
        if let Some(bad) = self
            .attributions
            .iter()
            .find(|a| a.clue.is_empty() || a.suspect.trim().is_empty())
        {
            return Err(GameError::InvalidScenario(format!(
                "incomplete attribution: {:?} -> {:?}",
                bad.clue, bad.suspect
            )));
        }
        SuspectIndex::from_pairs(
            self.buckets,
            self.attributions
                .iter()
                .map(|a| (a.clue.as_str(), a.suspect.as_str())),
        )
    }

    /// The mansion mystery shipped with the game
    pub fn manor() -> Self {
        let rooms = RoomSpec::new("Hall de Entrada", Some("Porta principal foi arrombada"))
            .left(
                RoomSpec::new("Sala de Estar", None)
                    .left(
                        RoomSpec::new("Biblioteca", Some("Livro de venenos aberto na página 13"))
                            .left(RoomSpec::new(
                                "Escritório Secreto",
                                Some("Carta ameaçadora no cofre"),
                            ))
                            .right(RoomSpec::new(
                                "Sala de Troféus",
                                Some("Troféu de prata manchado"),
                            )),
                    )
                    .right(
                        RoomSpec::new("Sala de Música", None)
                            .left(RoomSpec::new("Piano Room", Some("Partitura rasgada"))),
                    ),
            )
            .right(
                RoomSpec::new("Cozinha", Some("Faca desaparecida do bloco"))
                    .left(RoomSpec::new("Despensa", Some("Garrafa de vinho vazia no chão")))
                    .right(
                        RoomSpec::new("Jardim", Some("Pegadas levam ao gazebo"))
                            .left(RoomSpec::new("Estufa", Some("Planta venenosa recém-cortada")))
                            .right(RoomSpec::new("Gazebo", Some("Relógio parado às 23:47"))),
                    ),
            );

        let attributions = [
            ("Porta principal foi arrombada", "Mordomo James"),
            ("Faca desaparecida do bloco", "Chef Marcel"),
            ("Livro de venenos aberto na página 13", "Professor Harrington"),
            ("Garrafa de vinho vazia no chão", "Lady Elizabeth"),
            ("Pegadas levam ao gazebo", "Mordomo James"),
            ("Carta ameaçadora no cofre", "Lady Elizabeth"),
            ("Troféu de prata manchado", "Professor Harrington"),
            ("Partitura rasgada", "Lady Elizabeth"),
            ("Planta venenosa recém-cortada", "Professor Harrington"),
            ("Relógio parado às 23:47", "Mordomo James"),
        ]
        .into_iter()
        .map(|(clue, suspect)| Attribution {
            clue: clue.to_string(),
            suspect: suspect.to_string(),
        })
        .collect();

        Self {
            title: "O Mistério da Mansão".to_string(),
            synopsis: "A crime was committed in the manor. Explore the rooms, \
                       collect clues and find the culprit."
                .to_string(),
            buckets: DEFAULT_BUCKETS,
            rooms,
            attributions,
        }
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::manor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manor_layout() {
        let tree = Scenario::manor().build_rooms().expect("rooms");
        assert_eq!(tree.len(), 12);
        assert_eq!(tree.depth(), 4);
        assert_eq!(tree.root().name(), "Hall de Entrada");
        assert!(tree.root().left().is_some_and(|r| r.clue().is_none()));
    }

    #[test]
    fn manor_index_covers_every_clue() {
        let scenario = Scenario::manor();
        let index = scenario.build_index().expect("index");
        assert_eq!(index.len(), 10);
        assert_eq!(index.bucket_count(), DEFAULT_BUCKETS);
        assert_eq!(
            index.suspects(),
            vec!["Chef Marcel", "Lady Elizabeth", "Mordomo James", "Professor Harrington"]
        );
        assert_eq!(index.lookup("Relógio parado às 23:47"), Some("Mordomo James"));
    }

    #[test]
    fn unnamed_room_fails_without_partial_tree() {
        let mut scenario = Scenario::manor();
        scenario.rooms = RoomSpec::new("Hall", None).right(RoomSpec::new(" ", None));
        assert!(matches!(
            scenario.build_rooms(),
            Err(GameError::InvalidScenario(_))
        ));
    }

    #[test]
    fn too_deep_manor_is_rejected() {
        let mut spec = RoomSpec::new("bottom", None);
        for i in 0..MAX_DEPTH {
            spec = RoomSpec::new(&format!("room {i}"), None).left(spec);
        }
        let scenario = Scenario {
            rooms: spec,
            ..Scenario::manor()
        };
        assert!(scenario.build_rooms().is_err());
    }

    #[test]
    fn incomplete_attribution_is_rejected() {
        let mut scenario = Scenario::manor();
        scenario.attributions.push(Attribution {
            clue: "Pó no tapete".to_string(),
            suspect: String::new(),
        });
        assert!(matches!(
            scenario.build_index(),
            Err(GameError::InvalidScenario(_))
        ));
    }

    #[test]
    fn parses_nested_rooms() {
        let scenario = Scenario::parse(
            r#"
title = "Tiny"

[rooms]
name = "Porch"
clue = "Muddy boots"

[rooms.right]
name = "Shed"

[[attributions]]
clue = "Muddy boots"
suspect = "Gardener"
"#,
        )
        .expect("scenario");
        assert_eq!(scenario.buckets, DEFAULT_BUCKETS);
        let tree = scenario.build_rooms().expect("rooms");
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.root().right().map(Room::name), Some("Shed"));
        let index = scenario.build_index().expect("index");
        assert_eq!(index.lookup("Muddy boots"), Some("Gardener"));
    }
}
