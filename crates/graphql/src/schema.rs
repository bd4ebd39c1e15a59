//! GraphQL schema definition.
//!
//! This module provides the query root: global object lookup (`node`,
//! `nodes`) and one Relay connection per entity kind.

use std::sync::Arc;

use async_graphql::{
    Context, EmptyMutation, EmptySubscription, Object, Result, Schema, SchemaBuilder, ID,
};
use tracing::debug;

use traveller_core::metrics::record_connection_served;
use traveller_core::models::Entity;
use traveller_core::ports::{
    EntityRepository, PageArgs, PageRequest, PaginationMode, Repositories, DEFAULT_PAGE_SIZE,
    MAX_PAGE_SIZE,
};
use traveller_core::relay::{
    connection_from_page, connection_from_slice, ConnectionFactory, NodeRegistry,
};

use crate::connection::*;
use crate::types::{
    Armor, Career, Character, Node, Skill, Spaceship, TravellerSchema, Vehicle, Weapon, World,
};

// -----------------------------------------------------------------------------
// Schema Configuration
// -----------------------------------------------------------------------------

/// Maximum query depth to prevent deeply nested queries (DoS protection).
/// Note: GraphQL introspection requires depth ~13, so we use 15 to allow it.
pub const MAX_QUERY_DEPTH: usize = 15;

/// Maximum query complexity score (DoS protection).
/// Each field has a default complexity of 1, nested objects multiply.
pub const MAX_QUERY_COMPLEXITY: usize = 500;

/// Maximum number of IDs a single `nodes` call may resolve.
pub const MAX_NODES_PER_REQUEST: usize = MAX_PAGE_SIZE;

/// Pagination behaviour of connection queries.
#[derive(Debug, Clone, Copy)]
pub struct RelayConfig {
    /// Slice in memory, or let the repository page.
    pub mode: PaginationMode,
    /// Reject non-Relay argument combinations instead of composing them.
    pub strict: bool,
    /// Page size for paged mode when neither `first` nor `last` is given.
    pub default_page_size: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            mode: PaginationMode::Materialized,
            strict: false,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Type tag to lookup table used by `node` and `nodes`.
pub type NodeLookup = NodeRegistry<dyn Repositories, Node>;

/// Register a lookup for every node kind.
pub fn build_node_registry() -> NodeLookup {
    let mut registry = NodeLookup::new();
    registry.register_entity(|r| r.characters(), |m| Node::Character(Character(m)));
    registry.register_entity(|r| r.careers(), |m| Node::Career(Career(m)));
    registry.register_entity(|r| r.skills(), |m| Node::Skill(Skill(m)));
    registry.register_entity(|r| r.worlds(), |m| Node::World(World(m)));
    registry.register_entity(|r| r.weapons(), |m| Node::Weapon(Weapon(m)));
    registry.register_entity(|r| r.armor(), |m| Node::Armor(Armor(m)));
    registry.register_entity(|r| r.vehicles(), |m| Node::Vehicle(Vehicle(m)));
    registry.register_entity(|r| r.spaceships(), |m| Node::Spaceship(Spaceship(m)));
    registry
}

// -----------------------------------------------------------------------------
// Schema Builder
// -----------------------------------------------------------------------------

/// Build the GraphQL schema.
///
/// Includes query depth and complexity limits for DoS protection.
pub fn build_schema<R: Repositories + 'static>(
    repositories: Arc<R>,
    config: RelayConfig,
) -> TravellerSchema {
    schema_builder(repositories, config)
        .limit_depth(MAX_QUERY_DEPTH)
        .limit_complexity(MAX_QUERY_COMPLEXITY)
        .finish()
}

/// Create a schema builder with repositories, node registry and config data.
///
/// Remember to call `.limit_depth()` and `.limit_complexity()` before `.finish()`.
pub fn schema_builder<R: Repositories + 'static>(
    repositories: Arc<R>,
    config: RelayConfig,
) -> SchemaBuilder<QueryRoot, EmptyMutation, EmptySubscription> {
    let repos: Arc<dyn Repositories> = repositories;
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(repos)
        .data(Arc::new(build_node_registry()))
        .data(config)
}

// -----------------------------------------------------------------------------
// Query Root
// -----------------------------------------------------------------------------

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Fetch any object by global ID. Unknown, malformed or dangling IDs
    /// resolve to null.
    async fn node<'ctx>(&self, ctx: &Context<'ctx>, id: ID) -> Result<Option<Node>> {
        let repos = ctx.data::<Arc<dyn Repositories>>()?;
        let registry = ctx.data::<Arc<NodeLookup>>()?;

        Ok(registry.node(repos.as_ref(), id.as_str()).await)
    }

    /// Fetch several objects by global ID, in order. IDs that do not
    /// resolve are left out.
    async fn nodes<'ctx>(&self, ctx: &Context<'ctx>, ids: Vec<ID>) -> Result<Vec<Node>> {
        validate_node_batch(&ids)?;

        let repos = ctx.data::<Arc<dyn Repositories>>()?;
        let registry = ctx.data::<Arc<NodeLookup>>()?;

        let ids: Vec<String> = ids.into_iter().map(|id| id.0).collect();
        Ok(registry.nodes(repos.as_ref(), &ids).await)
    }

    async fn characters<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<CharacterConnection> {
        let args = PageArgs::new(first, after, last, before);
        list_connection(ctx, |r| r.characters(), CharacterConnectionFactory, args).await
    }

    async fn careers<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<CareerConnection> {
        let args = PageArgs::new(first, after, last, before);
        list_connection(ctx, |r| r.careers(), CareerConnectionFactory, args).await
    }

    async fn skills<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<SkillConnection> {
        let args = PageArgs::new(first, after, last, before);
        list_connection(ctx, |r| r.skills(), SkillConnectionFactory, args).await
    }

    async fn worlds<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<WorldConnection> {
        let args = PageArgs::new(first, after, last, before);
        list_connection(ctx, |r| r.worlds(), WorldConnectionFactory, args).await
    }

    async fn weapons<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<WeaponConnection> {
        let args = PageArgs::new(first, after, last, before);
        list_connection(ctx, |r| r.weapons(), WeaponConnectionFactory, args).await
    }

    async fn armor<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<ArmorConnection> {
        let args = PageArgs::new(first, after, last, before);
        list_connection(ctx, |r| r.armor(), ArmorConnectionFactory, args).await
    }

    async fn vehicles<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<VehicleConnection> {
        let args = PageArgs::new(first, after, last, before);
        list_connection(ctx, |r| r.vehicles(), VehicleConnectionFactory, args).await
    }

    async fn spaceships<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<SpaceshipConnection> {
        let args = PageArgs::new(first, after, last, before);
        list_connection(ctx, |r| r.spaceships(), SpaceshipConnectionFactory, args).await
    }
}

/// Shared body of every connection query.
async fn list_connection<T, F>(
    ctx: &Context<'_>,
    repository: fn(&dyn Repositories) -> &dyn EntityRepository<T>,
    factory: F,
    args: PageArgs,
) -> Result<F::Connection>
where
    T: Entity,
    F: ConnectionFactory,
    F::Node: From<T>,
    F::Connection: ConnectionPage,
{
    let repos = ctx.data::<Arc<dyn Repositories>>()?;
    let config = ctx.data_opt::<RelayConfig>().copied().unwrap_or_default();

    if config.strict {
        args.validate_strict()?;
    }

    let repository = repository(repos.as_ref());

    let connection = match config.mode {
        PaginationMode::Materialized => {
            let items: Vec<F::Node> = repository.list().await?.into_iter().map(Into::into).collect();
            connection_from_slice(&factory, items, &args)
        }
        PaginationMode::Paged => {
            let request = PageRequest::from_args(&args, config.default_page_size);
            let page = repository.list_page(request).await?.map(Into::into);
            connection_from_page(&factory, page)
        }
    };

    let kind = T::KIND.as_str();
    debug!(kind, edges = connection.edge_count(), mode = ?config.mode, "Connection served");
    record_connection_served(kind, connection.edge_count());

    Ok(connection)
}

// -----------------------------------------------------------------------------
// Validation
// -----------------------------------------------------------------------------

fn validate_node_batch(ids: &[ID]) -> Result<()> {
    if ids.len() > MAX_NODES_PER_REQUEST {
        return Err(async_graphql::Error::new(format!(
            "Too many ids: maximum {} per request",
            MAX_NODES_PER_REQUEST
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use traveller_core::models::{self, CharacterStatus, TravelZone};
    use traveller_core::relay::{cursor, GlobalId};
    use traveller_storage::InMemoryRepositories;

    fn world(id: i64, name: &str) -> models::World {
        models::World {
            id,
            name: name.into(),
            uwp: "A766865-C".into(),
            starport_class: "A".into(),
            size: 7,
            atmosphere: 6,
            hydrographics: 6,
            population: 8,
            government: 6,
            law_level: 5,
            tech_level: 12,
            travel_zone: TravelZone::Green,
            trade_codes: vec!["Ri".into()],
        }
    }

    fn character(id: i64, name: &str) -> models::Character {
        models::Character {
            id,
            name: name.into(),
            age: 34,
            gender: None,
            credits: 15_000,
            background: None,
            status: CharacterStatus::Alive,
        }
    }

    fn repositories() -> Arc<InMemoryRepositories> {
        let names = [
            "Regina", "Jewell", "Rhylanor", "Efate", "Mora", "Glisten", "Trin", "Lanth", "Boughene",
            "Pixie",
        ];
        Arc::new(
            InMemoryRepositories::new()
                .with_worlds(names.iter().zip(1..).map(|(name, id)| world(id, name)))
                .with_characters(vec![character(1, "Marcus Starling"), character(2, "Zara Chen")]),
        )
    }

    fn schema(config: RelayConfig) -> TravellerSchema {
        build_schema(repositories(), config)
    }

    async fn run(schema: &TravellerSchema, query: &str) -> Value {
        let res = schema.execute(query).await;
        assert!(res.errors.is_empty(), "{:?}", res.errors);
        res.data.into_json().unwrap()
    }

    fn gid(tag: &str, id: i64) -> String {
        GlobalId::new(tag, id).encode()
    }

    #[tokio::test]
    async fn test_node_resolves_world() {
        let schema = schema(RelayConfig::default());
        let query = format!(
            r#"{{ node(id: "{}") {{ __typename id ... on World {{ name databaseId }} }} }}"#,
            gid("World", 3)
        );

        let data = run(&schema, &query).await;
        assert_eq!(
            data["node"],
            json!({
                "__typename": "World",
                "id": gid("World", 3),
                "name": "Rhylanor",
                "databaseId": 3,
            })
        );
    }

    // Test critique: tag inconnu, id invalide ou entité absente = null, jamais une erreur
    #[tokio::test]
    async fn test_node_unresolvable_is_null() {
        let schema = schema(RelayConfig::default());

        for id in [gid("Starport", 1), "garbage".to_string(), gid("World", 999)] {
            let query = format!(r#"{{ node(id: "{}") {{ id }} }}"#, id);
            let data = run(&schema, &query).await;
            assert_eq!(data["node"], Value::Null, "{}", id);
        }
    }

    #[tokio::test]
    async fn test_nodes_drops_garbage_and_keeps_order() {
        let schema = schema(RelayConfig::default());
        let query = format!(
            r#"{{ nodes(ids: ["{}", "garbage", "{}"]) {{ __typename id }} }}"#,
            gid("World", 2),
            gid("Character", 1)
        );

        let data = run(&schema, &query).await;
        assert_eq!(
            data["nodes"],
            json!([
                { "__typename": "World", "id": gid("World", 2) },
                { "__typename": "Character", "id": gid("Character", 1) },
            ])
        );
    }

    #[tokio::test]
    async fn test_nodes_accepts_full_batch() {
        let schema = schema(RelayConfig::default());
        let ids: Vec<String> = (0..MAX_NODES_PER_REQUEST)
            .map(|i| format!("\"{}\"", gid("World", i as i64)))
            .collect();
        let query = format!("{{ nodes(ids: [{}]) {{ id }} }}", ids.join(", "));

        let data = run(&schema, &query).await;
        // Seuls les ids 1..=10 existent
        assert_eq!(data["nodes"].as_array().unwrap().len(), 10);
    }

    // Test critique: au-delà de la limite, l'appel entier est refusé
    #[tokio::test]
    async fn test_nodes_batch_limit() {
        let schema = schema(RelayConfig::default());
        let ids: Vec<String> = (0..=MAX_NODES_PER_REQUEST)
            .map(|i| format!("\"{}\"", gid("World", i as i64)))
            .collect();
        let query = format!("{{ nodes(ids: [{}]) {{ id }} }}", ids.join(", "));

        let res = schema.execute(query).await;
        assert_eq!(res.errors.len(), 1);
        assert!(res.errors[0].message.contains("Too many ids"));
    }

    // Test critique: parcours complet first=3 -> pages 3,3,3,1 sans trou ni doublon
    #[tokio::test]
    async fn test_worlds_forward_walk() {
        let schema = schema(RelayConfig::default());
        let mut after = String::new();
        let mut sizes = Vec::new();
        let mut ids = Vec::new();

        loop {
            let query = format!(
                r#"{{ worlds(first: 3{}) {{
                    edges {{ cursor node {{ databaseId }} }}
                    pageInfo {{ hasNextPage endCursor }}
                    totalCount
                }} }}"#,
                after
            );
            let data = run(&schema, &query).await;
            let conn = &data["worlds"];

            assert_eq!(conn["totalCount"], 10);
            let edges = conn["edges"].as_array().unwrap();
            sizes.push(edges.len());
            ids.extend(edges.iter().map(|e| e["node"]["databaseId"].as_i64().unwrap()));

            if !conn["pageInfo"]["hasNextPage"].as_bool().unwrap() {
                break;
            }
            after = format!(r#", after: "{}""#, conn["pageInfo"]["endCursor"].as_str().unwrap());
        }

        assert_eq!(sizes, vec![3, 3, 3, 1]);
        assert_eq!(ids, (1..=10).collect::<Vec<i64>>());
    }

    #[tokio::test]
    async fn test_first_zero_is_empty_page() {
        let schema = schema(RelayConfig::default());
        let data = run(
            &schema,
            "{ worlds(first: 0) { edges { cursor } nodes { id } totalCount pageInfo { startCursor endCursor } } }",
        )
        .await;

        assert_eq!(
            data["worlds"],
            json!({
                "edges": [],
                "nodes": [],
                "totalCount": 10,
                "pageInfo": { "startCursor": null, "endCursor": null },
            })
        );
    }

    // Test critique: politique laxiste = first+last composés, politique stricte = refus
    #[tokio::test]
    async fn test_first_and_last_policies() {
        let query = "{ worlds(first: 6, last: 2) { nodes { databaseId } } }";

        let lenient = schema(RelayConfig::default());
        let data = run(&lenient, query).await;
        assert_eq!(data["worlds"]["nodes"], json!([{ "databaseId": 5 }, { "databaseId": 6 }]));

        let strict = schema(RelayConfig {
            strict: true,
            ..Default::default()
        });
        let res = strict.execute(query).await;
        assert_eq!(res.errors.len(), 1);
        assert!(res.errors[0].message.contains("first and last"));
    }

    #[tokio::test]
    async fn test_malformed_cursor_is_ignored_when_lenient() {
        let schema = schema(RelayConfig::default());
        let data = run(
            &schema,
            r#"{ characters(first: 1, after: "not-a-cursor") { nodes { name } pageInfo { hasPreviousPage } } }"#,
        )
        .await;

        assert_eq!(data["characters"]["nodes"], json!([{ "name": "Marcus Starling" }]));
        assert_eq!(data["characters"]["pageInfo"]["hasPreviousPage"], false);
    }

    #[tokio::test]
    async fn test_paged_mode_uses_page_local_cursors() {
        let schema = schema(RelayConfig {
            mode: PaginationMode::Paged,
            ..Default::default()
        });
        // after = index 3 avec first = 2 -> page 2 (offset 4)
        let query = format!(
            r#"{{ worlds(first: 2, after: "{}") {{
                edges {{ cursor node {{ databaseId }} }}
                pageInfo {{ hasNextPage hasPreviousPage }}
                totalCount
            }} }}"#,
            cursor::encode_index(3)
        );

        let data = run(&schema, &query).await;
        let conn = &data["worlds"];
        assert_eq!(conn["totalCount"], 10);
        assert_eq!(conn["edges"][0]["node"]["databaseId"], 5);
        assert_eq!(conn["edges"][0]["cursor"], cursor::encode_index(0));
        assert_eq!(conn["edges"][1]["cursor"], cursor::encode_index(1));
        assert_eq!(conn["pageInfo"]["hasNextPage"], true);
        assert_eq!(conn["pageInfo"]["hasPreviousPage"], true);
    }

    #[tokio::test]
    async fn test_paged_mode_huge_cursor_is_empty_page() {
        let schema = schema(RelayConfig {
            mode: PaginationMode::Paged,
            ..Default::default()
        });
        let query = format!(
            r#"{{ worlds(first: 1, after: "{}") {{
                nodes {{ databaseId }}
                pageInfo {{ hasNextPage hasPreviousPage }}
                totalCount
            }} }}"#,
            cursor::encode_index(usize::MAX)
        );

        let data = run(&schema, &query).await;
        assert_eq!(
            data["worlds"],
            json!({
                "nodes": [],
                "pageInfo": { "hasNextPage": false, "hasPreviousPage": true },
                "totalCount": 10,
            })
        );
    }

    #[tokio::test]
    async fn test_empty_collection() {
        let schema = schema(RelayConfig::default());
        let data = run(
            &schema,
            "{ spaceships { totalCount pageInfo { hasNextPage hasPreviousPage startCursor } } }",
        )
        .await;

        assert_eq!(
            data["spaceships"],
            json!({
                "totalCount": 0,
                "pageInfo": { "hasNextPage": false, "hasPreviousPage": false, "startCursor": null },
            })
        );
    }

    #[test]
    fn test_registry_covers_every_node_kind() {
        let registry = build_node_registry();
        for kind in models::NodeKind::ALL {
            assert!(registry.is_registered(kind.as_str()), "{}", kind);
        }
    }
}
