//! Core domain layer for the Traveller backend.
//!
//! This crate contains the domain models, port traits (interfaces), and
//! the Relay pagination and global identification core. It follows
//! hexagonal architecture principles - this is the innermost layer with
//! no dependencies on infrastructure.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    traveller (binary)                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   traveller-graphql                         │
//! │              (schema, connections, server)                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   traveller-storage                         │
//! │               (PostgreSQL, in-memory)                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │                 traveller-core  ← YOU ARE HERE              │
//! │              (models, ports, relay)                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`models`] - Domain models (Character, World, Weapon, etc.)
//! - [`ports`] - Pagination types and repository traits
//! - [`relay`] - Cursors, slicing, connection building, global IDs
//! - [`error`] - Domain error types
//! - [`metrics`] - Prometheus metrics definitions
//!
//! # Key Concepts
//!
//! ## Cursors
//!
//! A cursor is `base64(index)`, a position within one ordered result set.
//! Malformed cursors are treated as absent rather than rejected.
//!
//! ## Connections
//!
//! [`relay::slice_bounds`] turns `first`/`after`/`last`/`before` into a
//! window over the collection, and the builder wraps that window into
//! edges through a per-entity [`relay::ConnectionFactory`]. Backing stores
//! that page by themselves go through [`ports::PageRequest`] and
//! [`relay::connection_from_page`] instead.
//!
//! ## Global IDs
//!
//! Every entity is addressable as `base64("<TypeTag>:<id>")`. A
//! [`relay::NodeRegistry`] maps each type tag to a lookup, so `node` and
//! `nodes` resolve IDs without knowing the entity kind up front.

pub mod error;
pub mod metrics;
pub mod models;
pub mod ports;
pub mod relay;
