//! Relay connection types, one set per entity kind.

use async_graphql::SimpleObject;

use traveller_core::ports;
use traveller_core::relay::ConnectionFactory;

use crate::types::{Armor, Career, Character, Skill, Spaceship, Vehicle, Weapon, World};

#[derive(SimpleObject, Clone, Debug, PartialEq, Eq)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

impl From<ports::PageInfo> for PageInfo {
    fn from(info: ports::PageInfo) -> Self {
        Self {
            has_next_page: info.has_next_page,
            has_previous_page: info.has_previous_page,
            start_cursor: info.start_cursor.map(|c| c.value),
            end_cursor: info.end_cursor.map(|c| c.value),
        }
    }
}

/// A built connection page.
pub trait ConnectionPage {
    /// Number of edges in this page.
    fn edge_count(&self) -> usize;
}

/// Generate Relay-style connection types (Edge + Connection) and the
/// factory that builds them.
macro_rules! define_connection {
    ($node:ident, $edge:ident, $connection:ident, $factory:ident) => {
        #[derive(SimpleObject)]
        pub struct $edge {
            pub node: $node,
            pub cursor: String,
        }

        #[derive(SimpleObject)]
        pub struct $connection {
            pub edges: Vec<$edge>,
            pub nodes: Vec<$node>,
            pub page_info: PageInfo,
            /// Size of the whole collection, not of this page.
            pub total_count: i64,
        }

        impl ConnectionPage for $connection {
            fn edge_count(&self) -> usize {
                self.edges.len()
            }
        }

        #[derive(Debug, Clone, Copy, Default)]
        pub struct $factory;

        impl ConnectionFactory for $factory {
            type Node = $node;
            type Edge = $edge;
            type Connection = $connection;

            fn create_edge(&self, node: $node, cursor: ports::Cursor) -> $edge {
                $edge {
                    node,
                    cursor: cursor.value,
                }
            }

            fn cursor(&self, edge: &$edge) -> ports::Cursor {
                ports::Cursor::from(edge.cursor.clone())
            }

            fn create_connection(
                &self,
                edges: Vec<$edge>,
                nodes: Vec<$node>,
                page_info: ports::PageInfo,
                total_count: usize,
            ) -> $connection {
                $connection {
                    edges,
                    nodes,
                    page_info: page_info.into(),
                    total_count: i64::try_from(total_count).unwrap_or(i64::MAX),
                }
            }
        }
    };
}

define_connection!(Character, CharacterEdge, CharacterConnection, CharacterConnectionFactory);
define_connection!(Career, CareerEdge, CareerConnection, CareerConnectionFactory);
define_connection!(Skill, SkillEdge, SkillConnection, SkillConnectionFactory);
define_connection!(World, WorldEdge, WorldConnection, WorldConnectionFactory);
define_connection!(Weapon, WeaponEdge, WeaponConnection, WeaponConnectionFactory);
define_connection!(Armor, ArmorEdge, ArmorConnection, ArmorConnectionFactory);
define_connection!(Vehicle, VehicleEdge, VehicleConnection, VehicleConnectionFactory);
define_connection!(Spaceship, SpaceshipEdge, SpaceshipConnection, SpaceshipConnectionFactory);
