//! In-memory storage adapter.
//!
//! Read-only repositories over fixed data sets, ordered by id like the
//! PostgreSQL adapter. Used by tests and for running the API without a
//! database.

use std::collections::BTreeMap;

use async_trait::async_trait;

use traveller_core::error::StorageResult;
use traveller_core::models::{
    Armor, Career, Character, Entity, Skill, Spaceship, Vehicle, Weapon, World,
};
use traveller_core::ports::{EntityRepository, Page, PageRequest, Repositories};

/// Entities of one kind, keyed by id.
#[derive(Debug, Clone)]
pub struct InMemoryRepository<T> {
    items: BTreeMap<i64, T>,
}

impl<T: Entity> InMemoryRepository<T> {
    /// Build from any set of entities; a later duplicate id replaces an
    /// earlier one.
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: items.into_iter().map(|item| (item.id(), item)).collect(),
        }
    }

    fn ordered(&self) -> Vec<T> {
        self.items.values().cloned().collect()
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }
}

#[async_trait]
impl<T: Entity> EntityRepository<T> for InMemoryRepository<T> {
    async fn get(&self, id: i64) -> StorageResult<Option<T>> {
        Ok(self.items.get(&id).cloned())
    }

    async fn list(&self) -> StorageResult<Vec<T>> {
        Ok(self.ordered())
    }

    async fn list_page(&self, request: PageRequest) -> StorageResult<Page<T>> {
        Ok(Page::from_sorted(self.ordered(), request))
    }

    async fn count(&self) -> StorageResult<usize> {
        Ok(self.items.len())
    }
}

/// In-memory implementation of the `Repositories` trait.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepositories {
    pub characters: InMemoryRepository<Character>,
    pub careers: InMemoryRepository<Career>,
    pub skills: InMemoryRepository<Skill>,
    pub worlds: InMemoryRepository<World>,
    pub weapons: InMemoryRepository<Weapon>,
    pub armor: InMemoryRepository<Armor>,
    pub vehicles: InMemoryRepository<Vehicle>,
    pub spaceships: InMemoryRepository<Spaceship>,
}

impl InMemoryRepositories {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_characters(mut self, items: impl IntoIterator<Item = Character>) -> Self {
        self.characters = InMemoryRepository::new(items);
        self
    }

    pub fn with_careers(mut self, items: impl IntoIterator<Item = Career>) -> Self {
        self.careers = InMemoryRepository::new(items);
        self
    }

    pub fn with_skills(mut self, items: impl IntoIterator<Item = Skill>) -> Self {
        self.skills = InMemoryRepository::new(items);
        self
    }

    pub fn with_worlds(mut self, items: impl IntoIterator<Item = World>) -> Self {
        self.worlds = InMemoryRepository::new(items);
        self
    }

    pub fn with_weapons(mut self, items: impl IntoIterator<Item = Weapon>) -> Self {
        self.weapons = InMemoryRepository::new(items);
        self
    }

    pub fn with_armor(mut self, items: impl IntoIterator<Item = Armor>) -> Self {
        self.armor = InMemoryRepository::new(items);
        self
    }

    pub fn with_vehicles(mut self, items: impl IntoIterator<Item = Vehicle>) -> Self {
        self.vehicles = InMemoryRepository::new(items);
        self
    }

    pub fn with_spaceships(mut self, items: impl IntoIterator<Item = Spaceship>) -> Self {
        self.spaceships = InMemoryRepository::new(items);
        self
    }
}

impl Repositories for InMemoryRepositories {
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
