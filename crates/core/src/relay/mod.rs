//! Relay connection and global object identification.
//!
//! - [`cursor`] - Opaque cursor codec
//! - [`slice_bounds`] - Window selection from `first`/`after`/`last`/`before`
//! - [`connection_from_slice`] / [`connection_from_page`] - Connection assembly
//! - [`GlobalId`] / [`NodeRegistry`] - Global IDs and polymorphic lookup

pub mod cursor;

mod builder;
mod global_id;
mod node;
mod slicer;

pub use builder::*;
pub use global_id::*;
pub use node::*;
pub use slicer::*;
