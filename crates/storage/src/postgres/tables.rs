//! Table descriptions and row conversion for each node kind.

use sqlx::postgres::PgRow;
use sqlx::FromRow;

use traveller_core::error::{StorageError, StorageResult};
use traveller_core::models::{
    Armor, Career, Character, CharacterStatus, Entity, Skill, Spaceship, TravelZone, Vehicle,
    Weapon, World,
};

/// Maps an entity kind onto its PostgreSQL table.
pub trait PgEntity: Entity {
    /// Table name.
    const TABLE: &'static str;

    /// Comma-separated column list, in [`PgEntity::Row`] field order.
    const COLUMNS: &'static str;

    /// Raw row as read by `sqlx`.
    type Row: for<'r> FromRow<'r, PgRow> + Send + Unpin;

    /// Convert a raw row into the domain model.
    fn from_row(row: Self::Row) -> StorageResult<Self>;
}

fn parse_column<T>(value: &str, column: &str) -> StorageResult<T>
where
    T: std::str::FromStr<Err = String>,
{
    value
        .parse()
        .map_err(|e| StorageError::SerializationError(format!("{}: {}", column, e)))
}

// =============================================================================
// Characters & Careers
// =============================================================================

#[derive(FromRow)]
pub struct CharacterRow {
    id: i64,
    name: String,
    age: i32,
    gender: Option<String>,
    credits: i32,
    background: Option<String>,
    status: String,
}

impl PgEntity for Character {
    const TABLE: &'static str = "characters";
    const COLUMNS: &'static str = "id, name, age, gender, credits, background, status";
    type Row = CharacterRow;

    fn from_row(row: CharacterRow) -> StorageResult<Self> {
        Ok(Character {
            id: row.id,
            name: row.name,
            age: row.age,
            gender: row.gender,
            credits: row.credits,
            background: row.background,
            status: parse_column::<CharacterStatus>(&row.status, "characters.status")?,
        })
    }
}

#[derive(FromRow)]
pub struct CareerRow {
    id: i64,
    name: String,
    description: Option<String>,
    qualification_dm: i32,
}

impl PgEntity for Career {
    const TABLE: &'static str = "careers";
    const COLUMNS: &'static str = "id, name, description, qualification_dm";
    type Row = CareerRow;

    fn from_row(row: CareerRow) -> StorageResult<Self> {
        Ok(Career {
            id: row.id,
            name: row.name,
            description: row.description,
            qualification_dm: row.qualification_dm,
        })
    }
}

#[derive(FromRow)]
pub struct SkillRow {
    id: i64,
    name: String,
    level: i32,
    category: String,
    primary_characteristic: Option<String>,
}

impl PgEntity for Skill {
    const TABLE: &'static str = "skills";
    const COLUMNS: &'static str = "id, name, level, category, primary_characteristic";
    type Row = SkillRow;

    fn from_row(row: SkillRow) -> StorageResult<Self> {
        Ok(Skill {
            id: row.id,
            name: row.name,
            level: row.level,
            category: row.category,
            primary_characteristic: row.primary_characteristic,
        })
    }
}

// =============================================================================
// Worlds
// =============================================================================

#[derive(FromRow)]
pub struct WorldRow {
    id: i64,
    name: String,
    uwp: String,
    starport_class: String,
    size: i32,
    atmosphere: i32,
    hydrographics: i32,
    population: i32,
    government: i32,
    law_level: i32,
    tech_level: i32,
    travel_zone: String,
    trade_codes: Vec<String>,
}

impl PgEntity for World {
    const TABLE: &'static str = "worlds";
    const COLUMNS: &'static str = "id, name, uwp, starport_class, size, atmosphere, \
        hydrographics, population, government, law_level, tech_level, travel_zone, trade_codes";
    type Row = WorldRow;

    fn from_row(row: WorldRow) -> StorageResult<Self> {
        Ok(World {
            id: row.id,
            name: row.name,
            uwp: row.uwp,
            starport_class: row.starport_class,
            size: row.size,
            atmosphere: row.atmosphere,
            hydrographics: row.hydrographics,
            population: row.population,
            government: row.government,
            law_level: row.law_level,
            tech_level: row.tech_level,
            travel_zone: parse_column::<TravelZone>(&row.travel_zone, "worlds.travel_zone")?,
            trade_codes: row.trade_codes,
        })
    }
}

// =============================================================================
// Equipment
// =============================================================================

#[derive(FromRow)]
pub struct WeaponRow {
    id: i64,
    name: String,
    weapon_type: String,
    tech_level: i32,
    damage_formula: String,
    range: i32,
    magazine: i32,
    cost: i32,
    automatic: bool,
}

impl PgEntity for Weapon {
    const TABLE: &'static str = "weapons";
    const COLUMNS: &'static str =
        "id, name, weapon_type, tech_level, damage_formula, range, magazine, cost, automatic";
    type Row = WeaponRow;

    fn from_row(row: WeaponRow) -> StorageResult<Self> {
        Ok(Weapon {
            id: row.id,
            name: row.name,
            weapon_type: row.weapon_type,
            tech_level: row.tech_level,
            damage_formula: row.damage_formula,
            range: row.range,
            magazine: row.magazine,
            cost: row.cost,
            automatic: row.automatic,
        })
    }
}

#[derive(FromRow)]
pub struct ArmorRow {
    id: i64,
    name: String,
    armor_type: String,
    tech_level: i32,
    protection: i32,
    cost: i32,
    powered: bool,
}

impl PgEntity for Armor {
    const TABLE: &'static str = "armor";
    const COLUMNS: &'static str = "id, name, armor_type, tech_level, protection, cost, powered";
    type Row = ArmorRow;

    fn from_row(row: ArmorRow) -> StorageResult<Self> {
        Ok(Armor {
            id: row.id,
            name: row.name,
            armor_type: row.armor_type,
            tech_level: row.tech_level,
            protection: row.protection,
            cost: row.cost,
            powered: row.powered,
        })
    }
}

#[derive(FromRow)]
pub struct VehicleRow {
    id: i64,
    name: String,
    vehicle_type: String,
    tech_level: i32,
    cost: i32,
    passenger_capacity: i32,
    max_speed: i32,
}

impl PgEntity for Vehicle {
    const TABLE: &'static str = "vehicles";
    const COLUMNS: &'static str =
        "id, name, vehicle_type, tech_level, cost, passenger_capacity, max_speed";
    type Row = VehicleRow;

    fn from_row(row: VehicleRow) -> StorageResult<Self> {
        Ok(Vehicle {
            id: row.id,
            name: row.name,
            vehicle_type: row.vehicle_type,
            tech_level: row.tech_level,
            cost: row.cost,
            passenger_capacity: row.passenger_capacity,
            max_speed: row.max_speed,
        })
    }
}

#[derive(FromRow)]
pub struct SpaceshipRow {
    id: i64,
    name: String,
    spaceship_type: String,
    tech_level: i32,
    displacement_tons: i32,
    jump_drive_rating: i32,
    maneuver_drive_rating: i32,
}

impl PgEntity for Spaceship {
    const TABLE: &'static str = "spaceships";
    const COLUMNS: &'static str = "id, name, spaceship_type, tech_level, displacement_tons, \
        jump_drive_rating, maneuver_drive_rating";
    type Row = SpaceshipRow;

    fn from_row(row: SpaceshipRow) -> StorageResult<Self> {
        Ok(Spaceship {
            id: row.id,
            name: row.name,
            spaceship_type: row.spaceship_type,
            tech_level: row.tech_level,
            displacement_tons: row.displacement_tons,
            jump_drive_rating: row.jump_drive_rating,
            maneuver_drive_rating: row.maneuver_drive_rating,
        })
    }
}
