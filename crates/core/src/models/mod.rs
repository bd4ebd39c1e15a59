//! Domain models for the Traveller dataset.
//!
//! These models are storage-agnostic. Every model is one of the eight
//! node kinds that can be resolved through a global ID, so each one
//! carries a local `i64` identifier and implements [`Entity`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::relay::GlobalId;

// =============================================================================
// Node Kinds
// =============================================================================

/// Closed set of entity kinds that participate in global identification.
///
/// The type tag written into a global ID is the kind's name, verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Character,
    Career,
    Skill,
    World,
    Weapon,
    Armor,
    Vehicle,
    Spaceship,
}

impl NodeKind {
    /// Every node kind, in registration order.
    pub const ALL: [NodeKind; 8] = [
        NodeKind::Character,
        NodeKind::Career,
        NodeKind::Skill,
        NodeKind::World,
        NodeKind::Weapon,
        NodeKind::Armor,
        NodeKind::Vehicle,
        NodeKind::Spaceship,
    ];

    /// Type tag literal used on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            NodeKind::Character => "Character",
            NodeKind::Career => "Career",
            NodeKind::Skill => "Skill",
            NodeKind::World => "World",
            NodeKind::Weapon => "Weapon",
            NodeKind::Armor => "Armor",
            NodeKind::Vehicle => "Vehicle",
            NodeKind::Spaceship => "Spaceship",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DomainError::UnknownNodeType(s.to_string()))
    }
}

/// A persisted model addressable by a global ID.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Node kind of this model.
    const KIND: NodeKind;

    /// Local (database) identifier.
    fn id(&self) -> i64;

    /// Opaque global identifier for this entity.
    fn global_id(&self) -> GlobalId {
        GlobalId::new(Self::KIND.as_str(), self.id())
    }
}

/// Implement [`Entity`] for a model with an `id: i64` field.
macro_rules! entity {
    ($model:ident, $kind:expr) => {
        impl Entity for $model {
            const KIND: NodeKind = $kind;

            fn id(&self) -> i64 {
                self.id
            }
        }
    };
}

// =============================================================================
// Enumerations
// =============================================================================

/// Life status of a character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterStatus {
    #[default]
    Alive,
    Dead,
    Retired,
}

impl CharacterStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CharacterStatus::Alive => "alive",
            CharacterStatus::Dead => "dead",
            CharacterStatus::Retired => "retired",
        }
    }
}

impl FromStr for CharacterStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alive" => Ok(CharacterStatus::Alive),
            "dead" => Ok(CharacterStatus::Dead),
            "retired" => Ok(CharacterStatus::Retired),
            other => Err(format!("unknown character status '{}'", other)),
        }
    }
}

/// Travel advisory zone of a world.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TravelZone {
    #[default]
    Green,
    Amber,
    Red,
}

impl TravelZone {
    pub fn as_str(self) -> &'static str {
        match self {
            TravelZone::Green => "green",
            TravelZone::Amber => "amber",
            TravelZone::Red => "red",
        }
    }
}

impl FromStr for TravelZone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "green" => Ok(TravelZone::Green),
            "amber" => Ok(TravelZone::Amber),
            "red" => Ok(TravelZone::Red),
            other => Err(format!("unknown travel zone '{}'", other)),
        }
    }
}

// =============================================================================
// Characters & Careers
// =============================================================================

/// A player or non-player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub gender: Option<String>,
    /// Cash on hand, in credits.
    pub credits: i32,
    pub background: Option<String>,
    pub status: CharacterStatus,
}

/// A profession a character can serve terms in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Career {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Dice modifier applied to qualification rolls.
    pub qualification_dm: i32,
}

/// A trained skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: i64,
    pub name: String,
    pub level: i32,
    pub category: String,
    pub primary_characteristic: Option<String>,
}

// =============================================================================
// Worlds
// =============================================================================

/// A mainworld described by its Universal World Profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub id: i64,
    pub name: String,
    /// Universal World Profile string, e.g. `A867974-C`.
    pub uwp: String,
    /// Starport class (A, B, C, D, E or X).
    pub starport_class: String,
    pub size: i32,
    pub atmosphere: i32,
    pub hydrographics: i32,
    pub population: i32,
    pub government: i32,
    pub law_level: i32,
    pub tech_level: i32,
    pub travel_zone: TravelZone,
    pub trade_codes: Vec<String>,
}

// =============================================================================
// Equipment
// =============================================================================

/// A personal weapon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub id: i64,
    pub name: String,
    pub weapon_type: String,
    pub tech_level: i32,
    /// Damage dice, e.g. `3D6`.
    pub damage_formula: String,
    /// Effective range in metres.
    pub range: i32,
    pub magazine: i32,
    pub cost: i32,
    pub automatic: bool,
}

/// Personal protection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Armor {
    pub id: i64,
    pub name: String,
    pub armor_type: String,
    pub tech_level: i32,
    pub protection: i32,
    pub cost: i32,
    pub powered: bool,
}

/// A ground, water or air vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: i64,
    pub name: String,
    pub vehicle_type: String,
    pub tech_level: i32,
    pub cost: i32,
    pub passenger_capacity: i32,
    /// Top speed in km/h.
    pub max_speed: i32,
}

/// A starship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spaceship {
    pub id: i64,
    pub name: String,
    pub spaceship_type: String,
    pub tech_level: i32,
    pub displacement_tons: i32,
    pub jump_drive_rating: i32,
    pub maneuver_drive_rating: i32,
}

entity!(Character, NodeKind::Character);
entity!(Career, NodeKind::Career);
entity!(Skill, NodeKind::Skill);
entity!(World, NodeKind::World);
entity!(Weapon, NodeKind::Weapon);
entity!(Armor, NodeKind::Armor);
entity!(Vehicle, NodeKind::Vehicle);
entity!(Spaceship, NodeKind::Spaceship);
