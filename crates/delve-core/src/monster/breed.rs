//! Monster species templates
//!
//! A [`Breed`] is immutable content shared by every monster of a species.
//! Breeds are loaded from JSON through [`BreedDef`] and validated up front so
//! nothing downstream has to cope with, say, a monster with no attacks.

use std::sync::Arc;

use bitflags::bitflags;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::combat::AttackProfile;
use crate::world::ContentError;

bitflags! {
    /// Behavioral flags for a breed
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct BreedFlags: u32 {
        /// Gets angrier, not afraid, when hurt or when others are hurt
        const BERZERK = 0x0001;
        /// Frightens more easily
        const COWARDLY = 0x0002;
        /// Never afraid
        const FEARLESS = 0x0004;
        /// Cannot move
        const IMMOBILE = 0x0008;
        /// Enraged by harm done to its own kind
        const PROTECTIVE = 0x0010;
    }
}

impl BreedFlags {
    /// Parse a flag by its content name, e.g. `"berzerk"`.
    pub fn parse(name: &str) -> Option<BreedFlags> {
        BreedFlags::from_name(&name.to_ascii_uppercase())
    }
}

/// Pronoun used when narrating a monster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Pronoun {
    #[default]
    It,
    He,
    She,
    They,
}

impl Pronoun {
    /// Object form used when a sentence mentions its subject again.
    pub const fn reflexive(self) -> &'static str {
        match self {
            Pronoun::It => "itself",
            Pronoun::He => "himself",
            Pronoun::She => "herself",
            Pronoun::They => "themselves",
        }
    }
}

/// What a move does when used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MoveKind {
    /// Restore health
    Heal { amount: i32 },
    /// Speed up for a while
    Haste { duration: i32, speed: i32 },
    /// A ranged attack at the hero
    Bolt { attack: AttackProfile },
}

/// A special ability a breed can use, throttled by its rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    #[serde(flatten)]
    pub kind: MoveKind,
    /// Average number of turns between uses
    pub rate: f64,
}

impl Move {
    pub fn new(kind: MoveKind, rate: f64) -> Self {
        Self { kind, rate }
    }
}

fn default_tracking_range() -> i32 {
    10
}

/// Raw breed content as it appears in a bestiary file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreedDef {
    pub name: String,
    #[serde(default)]
    pub pronoun: Pronoun,
    #[serde(rename = "health")]
    pub max_health: i32,
    #[serde(default)]
    pub attacks: Vec<AttackProfile>,
    #[serde(default)]
    pub moves: Vec<Move>,
    #[serde(default)]
    pub speed: i32,
    #[serde(default)]
    pub dodge: i32,
    #[serde(default)]
    pub armor: i32,
    #[serde(default = "default_tracking_range")]
    pub tracking_range: i32,
    /// Percent chance per step of wandering instead of pursuing
    #[serde(default)]
    pub meander: i32,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub experience: i32,
}

impl Default for BreedDef {
    fn default() -> Self {
        Self {
            name: String::new(),
            pronoun: Pronoun::default(),
            max_health: 1,
            attacks: Vec::new(),
            moves: Vec::new(),
            speed: 0,
            dodge: 0,
            armor: 0,
            tracking_range: default_tracking_range(),
            meander: 0,
            flags: Vec::new(),
            experience: 0,
        }
    }
}

/// A validated species template.
#[derive(Debug, Clone, PartialEq)]
pub struct Breed {
    pub name: String,
    pub pronoun: Pronoun,
    pub max_health: i32,
    pub attacks: Vec<AttackProfile>,
    pub moves: Vec<Move>,
    pub speed: i32,
    pub dodge: i32,
    pub armor: i32,
    pub tracking_range: i32,
    pub meander: i32,
    pub flags: BreedFlags,
    pub experience: i32,
}

impl Breed {
    /// Validate raw content into a breed.
    pub fn from_def(def: BreedDef) -> Result<Breed, ContentError> {
        if def.max_health <= 0 {
            return Err(ContentError::BadHealth {
                breed: def.name,
                max_health: def.max_health,
            });
        }
        if def.attacks.is_empty() {
            return Err(ContentError::NoAttacks { breed: def.name });
        }
        if let Some(index) = def.moves.iter().position(|m| !(m.rate > 0.0)) {
            return Err(ContentError::BadMoveRate {
                breed: def.name,
                index,
            });
        }

        let mut flags = BreedFlags::empty();
        for name in &def.flags {
            let flag = BreedFlags::parse(name).ok_or_else(|| ContentError::UnknownFlag {
                breed: def.name.clone(),
                flag: name.clone(),
            })?;
            flags |= flag;
        }

        Ok(Breed {
            name: def.name,
            pronoun: def.pronoun,
            max_health: def.max_health,
            attacks: def.attacks,
            moves: def.moves,
            speed: def.speed,
            dodge: def.dodge.max(0),
            armor: def.armor.max(0),
            tracking_range: def.tracking_range.max(0),
            meander: def.meander.clamp(0, 100),
            flags,
            experience: def.experience.max(0),
        })
    }

    pub const fn is_berzerk(&self) -> bool {
        self.flags.contains(BreedFlags::BERZERK)
    }

    pub const fn is_cowardly(&self) -> bool {
        self.flags.contains(BreedFlags::COWARDLY)
    }

    pub const fn is_fearless(&self) -> bool {
        self.flags.contains(BreedFlags::FEARLESS)
    }

    pub const fn is_immobile(&self) -> bool {
        self.flags.contains(BreedFlags::IMMOBILE)
    }

    pub const fn is_protective(&self) -> bool {
        self.flags.contains(BreedFlags::PROTECTIVE)
    }

    /// Mean damage across the breed's attacks.
    pub fn average_damage(&self) -> f64 {
        let total: f64 = self.attacks.iter().map(AttackProfile::average_damage).sum();
        total / self.attacks.len() as f64
    }
}

/// A collection of breeds indexed by name.
#[derive(Debug, Clone, Default)]
pub struct Bestiary {
    breeds: Vec<Arc<Breed>>,
    by_name: HashMap<String, usize>,
}

impl Bestiary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON array of breed definitions.
    pub fn from_json(json: &str) -> Result<Bestiary, ContentError> {
        let defs: Vec<BreedDef> = serde_json::from_str(json)?;
        let mut bestiary = Bestiary::new();
        for def in defs {
            bestiary.add(Breed::from_def(def)?)?;
        }
        Ok(bestiary)
    }

    /// The bestiary shipped with the crate.
    pub fn builtin() -> Result<Bestiary, ContentError> {
        Self::from_json(include_str!("../../data/bestiary.json"))
    }

    pub fn add(&mut self, breed: Breed) -> Result<Arc<Breed>, ContentError> {
        if self.by_name.contains_key(&breed.name) {
            return Err(ContentError::DuplicateBreed(breed.name));
        }
        let breed = Arc::new(breed);
        self.by_name.insert(breed.name.clone(), self.breeds.len());
        self.breeds.push(Arc::clone(&breed));
        Ok(breed)
    }

    pub fn get(&self, name: &str) -> Option<Arc<Breed>> {
        self.by_name.get(name).map(|&index| Arc::clone(&self.breeds[index]))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Breed>> {
        self.breeds.iter()
    }

    pub fn len(&self) -> usize {
        self.breeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breeds.is_empty()
    }
}
