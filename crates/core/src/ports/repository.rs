//! Port traits for data repositories.
//!
//! These traits define the read interface used by the Relay layer.
//! Implementations live in the infrastructure layer (e.g., `traveller-storage`).

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::models::{Armor, Career, Character, Entity, Skill, Spaceship, Vehicle, Weapon, World};

use super::pagination::{Page, PageRequest};

// =============================================================================
// Repository Traits
// =============================================================================

/// Read access to one entity kind.
///
/// Every listing is ordered by local id ascending, so cursor positions stay
/// stable between calls as long as the table does not change.
#[async_trait]
pub trait EntityRepository<T: Entity>: Send + Sync {
    /// Get an entity by local id.
    async fn get(&self, id: i64) -> StorageResult<Option<T>>;

    /// List every entity, ordered by id.
    async fn list(&self) -> StorageResult<Vec<T>>;

    /// List one page, ordered by id.
    async fn list_page(&self, request: PageRequest) -> StorageResult<Page<T>>;

    /// Count all entities.
    async fn count(&self) -> StorageResult<usize>;
}

// =============================================================================
// Composite Repository
// =============================================================================

/// Combined repository access, one repository per node kind.
pub trait Repositories: Send + Sync {
    fn characters(&self) -> &dyn EntityRepository<Character>;

    fn careers(&self) -> &dyn EntityRepository<Career>;

    fn skills(&self) -> &dyn EntityRepository<Skill>;

    fn worlds(&self) -> &dyn EntityRepository<World>;

    fn weapons(&self) -> &dyn EntityRepository<Weapon>;

    fn armor(&self) -> &dyn EntityRepository<Armor>;

    fn vehicles(&self) -> &dyn EntityRepository<Vehicle>;

    fn spaceships(&self) -> &dyn EntityRepository<Spaceship>;
}
