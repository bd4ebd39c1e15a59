//! PostgreSQL storage adapter.
//!
//! This module implements the repository traits defined in `traveller-core`
//! using PostgreSQL as the backing store.
//!
//! # Architecture
//!
//! - [`Database`] - Connection pool and migrations
//! - [`PgRepositories`] - Composite repository implementing `Repositories` trait
//! - [`PgEntityRepository`] - One generic repository, specialised per table
//!   through [`PgEntity`]
//!
//! # Usage
//!
//! ```ignore
//! let config = DatabaseConfig::for_graphql(&database_url);
//! let db = Database::connect(&config).await?;
//! db.migrate().await?;
//!
//! let repositories = PgRepositories::new(&db);
//! ```

mod database;
mod entity_repo;
mod tables;

pub use database::{Database, DatabaseConfig};
pub use entity_repo::PgEntityRepository;
pub use tables::PgEntity;

use traveller_core::models::{
    Armor, Career, Character, Skill, Spaceship, Vehicle, Weapon, World,
};
use traveller_core::ports::{EntityRepository, Repositories};

// =============================================================================
// Composite Repository
// =============================================================================

/// Aggregated PostgreSQL repositories implementing the `Repositories` trait.
pub struct PgRepositories {
    characters: PgEntityRepository<Character>,
    careers: PgEntityRepository<Career>,
    skills: PgEntityRepository<Skill>,
    worlds: PgEntityRepository<World>,
    weapons: PgEntityRepository<Weapon>,
    armor: PgEntityRepository<Armor>,
    vehicles: PgEntityRepository<Vehicle>,
    spaceships: PgEntityRepository<Spaceship>,
}

impl PgRepositories {
    /// Create a new repository aggregate sharing one connection pool.
    pub fn new(db: &Database) -> Self {
        Self {
            characters: PgEntityRepository::new(db),
            careers: PgEntityRepository::new(db),
            skills: PgEntityRepository::new(db),
            worlds: PgEntityRepository::new(db),
            weapons: PgEntityRepository::new(db),
            armor: PgEntityRepository::new(db),
            vehicles: PgEntityRepository::new(db),
            spaceships: PgEntityRepository::new(db),
        }
    }
}

impl Repositories for PgRepositories {
    fn characters(&self) -> &dyn EntityRepository<Character> {
        &self.characters
    }

    fn careers(&self) -> &dyn EntityRepository<Career> {
        &self.careers
    }

    fn skills(&self) -> &dyn EntityRepository<Skill> {
        &self.skills
    }

    fn worlds(&self) -> &dyn EntityRepository<World> {
        &self.worlds
    }

    fn weapons(&self) -> &dyn EntityRepository<Weapon> {
        &self.weapons
    }

    fn armor(&self) -> &dyn EntityRepository<Armor> {
        &self.armor
    }

    fn vehicles(&self) -> &dyn EntityRepository<Vehicle> {
        &self.vehicles
    }

    fn spaceships(&self) -> &dyn EntityRepository<Spaceship> {
        &self.spaceships
    }
}
