//! GraphQL type definitions.
//!
//! Each entity kind is exposed as an object implementing the `Node`
//! interface: `id` is the opaque global ID, `databaseId` the local one.

use async_graphql::{EmptyMutation, EmptySubscription, Interface, Object, Schema, ID};

use traveller_core::models::{self, Entity};

use crate::schema::QueryRoot;

/// The Traveller GraphQL schema type.
pub type TravellerSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

fn global_id<T: Entity>(entity: &T) -> ID {
    ID(entity.global_id().encode())
}

// -----------------------------------------------------------------------------
// Node Interface
// -----------------------------------------------------------------------------

/// An object with a global ID.
#[derive(Interface, Clone)]
#[graphql(field(name = "id", ty = "ID", desc = "Opaque global identifier."))]
pub enum Node {
    Character(Character),
    Career(Career),
    Skill(Skill),
    World(World),
    Weapon(Weapon),
    Armor(Armor),
    Vehicle(Vehicle),
    Spaceship(Spaceship),
}

// -----------------------------------------------------------------------------
// Characters & Careers
// -----------------------------------------------------------------------------

/// A player or non-player character.
#[derive(Clone)]
pub struct Character(pub models::Character);

#[Object]
impl Character {
    async fn id(&self) -> ID {
        global_id(&self.0)
    }

    async fn database_id(&self) -> i64 {
        self.0.id
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn age(&self) -> i32 {
        self.0.age
    }

    async fn gender(&self) -> Option<&str> {
        self.0.gender.as_deref()
    }

    /// Cash on hand, in credits.
    async fn credits(&self) -> i32 {
        self.0.credits
    }

    async fn background(&self) -> Option<&str> {
        self.0.background.as_deref()
    }

    /// One of `alive`, `dead`, `retired`.
    async fn status(&self) -> &'static str {
        self.0.status.as_str()
    }
}

/// A profession a character can serve terms in.
#[derive(Clone)]
pub struct Career(pub models::Career);

#[Object]
impl Career {
    async fn id(&self) -> ID {
        global_id(&self.0)
    }

    async fn database_id(&self) -> i64 {
        self.0.id
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }

    async fn qualification_dm(&self) -> i32 {
        self.0.qualification_dm
    }
}

/// A trained skill.
#[derive(Clone)]
pub struct Skill(pub models::Skill);

#[Object]
impl Skill {
    async fn id(&self) -> ID {
        global_id(&self.0)
    }

    async fn database_id(&self) -> i64 {
        self.0.id
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn level(&self) -> i32 {
        self.0.level
    }

    async fn category(&self) -> &str {
        &self.0.category
    }

    async fn primary_characteristic(&self) -> Option<&str> {
        self.0.primary_characteristic.as_deref()
    }
}

// -----------------------------------------------------------------------------
// Worlds
// -----------------------------------------------------------------------------

/// A mainworld.
#[derive(Clone)]
pub struct World(pub models::World);

#[Object]
impl World {
    async fn id(&self) -> ID {
        global_id(&self.0)
    }

    async fn database_id(&self) -> i64 {
        self.0.id
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    /// Universal World Profile.
    async fn uwp(&self) -> &str {
        &self.0.uwp
    }

    async fn starport_class(&self) -> &str {
        &self.0.starport_class
    }

    async fn size(&self) -> i32 {
        self.0.size
    }

    async fn atmosphere(&self) -> i32 {
        self.0.atmosphere
    }

    async fn hydrographics(&self) -> i32 {
        self.0.hydrographics
    }

    async fn population(&self) -> i32 {
        self.0.population
    }

    async fn government(&self) -> i32 {
        self.0.government
    }

    async fn law_level(&self) -> i32 {
        self.0.law_level
    }

    async fn tech_level(&self) -> i32 {
        self.0.tech_level
    }

    /// One of `green`, `amber`, `red`.
    async fn travel_zone(&self) -> &'static str {
        self.0.travel_zone.as_str()
    }

    async fn trade_codes(&self) -> &Vec<String> {
        &self.0.trade_codes
    }
}

// -----------------------------------------------------------------------------
// Equipment
// -----------------------------------------------------------------------------

/// A personal weapon.
#[derive(Clone)]
pub struct Weapon(pub models::Weapon);

#[Object]
impl Weapon {
    async fn id(&self) -> ID {
        global_id(&self.0)
    }

    async fn database_id(&self) -> i64 {
        self.0.id
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn weapon_type(&self) -> &str {
        &self.0.weapon_type
    }

    async fn tech_level(&self) -> i32 {
        self.0.tech_level
    }

    async fn damage_formula(&self) -> &str {
        &self.0.damage_formula
    }

    async fn range(&self) -> i32 {
        self.0.range
    }

    async fn magazine(&self) -> i32 {
        self.0.magazine
    }

    async fn cost(&self) -> i32 {
        self.0.cost
    }

    async fn automatic(&self) -> bool {
        self.0.automatic
    }
}

/// Personal protection.
#[derive(Clone)]
pub struct Armor(pub models::Armor);

#[Object]
impl Armor {
    async fn id(&self) -> ID {
        global_id(&self.0)
    }

    async fn database_id(&self) -> i64 {
        self.0.id
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn armor_type(&self) -> &str {
        &self.0.armor_type
    }

    async fn tech_level(&self) -> i32 {
        self.0.tech_level
    }

    async fn protection(&self) -> i32 {
        self.0.protection
    }

    async fn cost(&self) -> i32 {
        self.0.cost
    }

    async fn powered(&self) -> bool {
        self.0.powered
    }
}

/// A ground, water or air vehicle.
#[derive(Clone)]
pub struct Vehicle(pub models::Vehicle);

#[Object]
impl Vehicle {
    async fn id(&self) -> ID {
        global_id(&self.0)
    }

    async fn database_id(&self) -> i64 {
        self.0.id
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn vehicle_type(&self) -> &str {
        &self.0.vehicle_type
    }

    async fn tech_level(&self) -> i32 {
        self.0.tech_level
    }

    async fn cost(&self) -> i32 {
        self.0.cost
    }

    async fn passenger_capacity(&self) -> i32 {
        self.0.passenger_capacity
    }

    async fn max_speed(&self) -> i32 {
        self.0.max_speed
    }
}

/// A starship.
#[derive(Clone)]
pub struct Spaceship(pub models::Spaceship);

#[Object]
impl Spaceship {
    async fn id(&self) -> ID {
        global_id(&self.0)
    }

    async fn database_id(&self) -> i64 {
        self.0.id
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn spaceship_type(&self) -> &str {
        &self.0.spaceship_type
    }

    async fn tech_level(&self) -> i32 {
        self.0.tech_level
    }

    async fn displacement_tons(&self) -> i32 {
        self.0.displacement_tons
    }

    async fn jump_drive_rating(&self) -> i32 {
        self.0.jump_drive_rating
    }

    async fn maneuver_drive_rating(&self) -> i32 {
        self.0.maneuver_drive_rating
    }
}

macro_rules! impl_from_model {
    ($($object:ident),* $(,)?) => {
        $(
            impl From<models::$object> for $object {
                fn from(model: models::$object) -> Self {
                    Self(model)
                }
            }
        )*
    };
}

impl_from_model!(Character, Career, Skill, World, Weapon, Armor, Vehicle, Spaceship);
