//! Connection assembly.
//!
//! The builder is entity-agnostic: each entity kind supplies a
//! [`ConnectionFactory`] that knows how to wrap nodes into its own edge
//! and connection types, and the two entry points here do the rest.

use std::marker::PhantomData;

use crate::ports::{Connection, Cursor, Edge, Page, PageArgs, PageInfo};

use super::slicer::slice_bounds;

/// Per-entity capability for building connection values.
pub trait ConnectionFactory {
    /// Node type carried by edges.
    type Node: Clone;
    /// Edge type (node + cursor).
    type Edge;
    /// Connection type returned to callers.
    type Connection;

    /// Wrap a node and its cursor into an edge.
    fn create_edge(&self, node: Self::Node, cursor: Cursor) -> Self::Edge;

    /// Read the cursor back out of an edge.
    fn cursor(&self, edge: &Self::Edge) -> Cursor;

    /// Assemble the final connection.
    fn create_connection(
        &self,
        edges: Vec<Self::Edge>,
        nodes: Vec<Self::Node>,
        page_info: PageInfo,
        total_count: usize,
    ) -> Self::Connection;
}

/// Build a connection over a fully loaded, ordered collection.
///
/// Each edge's cursor encodes the item's position in `items`, not in the
/// returned page, so an `endCursor` fed back as `after` continues exactly
/// where the previous page stopped.
pub fn connection_from_slice<F>(factory: &F, items: Vec<F::Node>, args: &PageArgs) -> F::Connection
where
    F: ConnectionFactory,
{
    let bounds = slice_bounds(items.len(), args);

    let nodes: Vec<F::Node> = items
        .into_iter()
        .skip(bounds.start)
        .take(bounds.len())
        .collect();

    let edges = nodes
        .iter()
        .cloned()
        .zip(bounds.range())
        .map(|(node, index)| factory.create_edge(node, Cursor::from_index(index)))
        .collect();

    assemble(
        factory,
        edges,
        nodes,
        bounds.has_next_page(),
        bounds.has_previous_page(),
        bounds.total,
    )
}

/// Build a connection from a page the backing store already cut.
///
/// Cursors encode the position within this page only, and the page flags
/// are taken from the store as-is.
pub fn connection_from_page<F>(factory: &F, page: Page<F::Node>) -> F::Connection
where
    F: ConnectionFactory,
{
    let edges = page
        .items
        .iter()
        .cloned()
        .enumerate()
        .map(|(index, node)| factory.create_edge(node, Cursor::from_index(index)))
        .collect();

    assemble(
        factory,
        edges,
        page.items,
        page.has_next,
        page.has_previous,
        page.total_count,
    )
}

fn assemble<F>(
    factory: &F,
    edges: Vec<F::Edge>,
    nodes: Vec<F::Node>,
    has_next_page: bool,
    has_previous_page: bool,
    total_count: usize,
) -> F::Connection
where
    F: ConnectionFactory,
{
    let page_info = PageInfo {
        has_next_page,
        has_previous_page,
        start_cursor: edges.first().map(|e| factory.cursor(e)),
        end_cursor: edges.last().map(|e| factory.cursor(e)),
    };

    factory.create_connection(edges, nodes, page_info, total_count)
}

/// Factory producing the storage-agnostic [`Connection`].
pub struct DefaultConnectionFactory<T>(PhantomData<fn() -> T>);

impl<T> DefaultConnectionFactory<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for DefaultConnectionFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> ConnectionFactory for DefaultConnectionFactory<T> {
    type Node = T;
    type Edge = Edge<T>;
    type Connection = Connection<T>;

    fn create_edge(&self, node: T, cursor: Cursor) -> Edge<T> {
        Edge { node, cursor }
    }

    fn cursor(&self, edge: &Edge<T>) -> Cursor {
        edge.cursor.clone()
    }

    fn create_connection(
        &self,
        edges: Vec<Edge<T>>,
        nodes: Vec<T>,
        page_info: PageInfo,
        total_count: usize,
    ) -> Connection<T> {
        Connection {
            edges,
            nodes,
            page_info,
            total_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::PageRequest;

    fn build(items: Vec<u32>, args: &PageArgs) -> Connection<u32> {
        connection_from_slice(&DefaultConnectionFactory::new(), items, args)
    }

    fn items(n: u32) -> Vec<u32> {
        (0..n).collect()
    }

    #[test]
    fn test_full_collection_without_arguments() {
        let conn = build(items(4), &PageArgs::default());

        assert_eq!(conn.nodes, vec![0, 1, 2, 3]);
        assert_eq!(conn.total_count, 4);
        assert!(!conn.page_info.has_next_page);
        assert!(!conn.page_info.has_previous_page);
        assert_eq!(conn.page_info.start_cursor, Some(Cursor::from_index(0)));
        assert_eq!(conn.page_info.end_cursor, Some(Cursor::from_index(3)));
    }

    #[test]
    fn test_after_one_first_two() {
        let args = PageArgs {
            first: Some(2),
            after: Some(Cursor::from_index(1)),
            ..Default::default()
        };
        let conn = build(items(5), &args);

        assert_eq!(conn.nodes, vec![2, 3]);
        assert!(conn.page_info.has_next_page);
        assert!(conn.page_info.has_previous_page);
        // Les curseurs pointent dans la collection d'origine
        assert_eq!(conn.edges[0].cursor.index(), Some(2));
        assert_eq!(conn.edges[1].cursor.index(), Some(3));
    }

    #[test]
    fn test_empty_page_has_no_cursors() {
        for args in [
            PageArgs {
                first: Some(0),
                ..Default::default()
            },
            PageArgs {
                last: Some(0),
                ..Default::default()
            },
        ] {
            let conn = build(items(7), &args);
            assert!(conn.edges.is_empty());
            assert!(conn.nodes.is_empty());
            assert_eq!(conn.total_count, 7);
            assert_eq!(conn.page_info.start_cursor, None);
            assert_eq!(conn.page_info.end_cursor, None);
        }
    }

    // Test critique: pagination avant répétée = partition exacte, sans trou ni doublon
    #[test]
    fn test_forward_walk_partitions_collection() {
        let all = items(10);
        let mut seen = Vec::new();
        let mut sizes = Vec::new();
        let mut after = None;

        loop {
            let args = PageArgs {
                first: Some(3),
                after: after.clone(),
                ..Default::default()
            };
            let conn = build(all.clone(), &args);
            sizes.push(conn.edges.len());
            seen.extend(conn.nodes.iter().copied());

            if !conn.page_info.has_next_page {
                break;
            }
            after = conn.page_info.end_cursor;
        }

        assert_eq!(sizes, vec![3, 3, 3, 1]);
        assert_eq!(seen, all);
    }

    #[test]
    fn test_backward_walk_from_the_end() {
        let all = items(5);
        let args = PageArgs {
            last: Some(2),
            ..Default::default()
        };
        let conn = build(all.clone(), &args);
        assert_eq!(conn.nodes, vec![3, 4]);
        assert!(conn.page_info.has_previous_page);
        assert!(!conn.page_info.has_next_page);

        let args = PageArgs {
            last: Some(2),
            before: conn.page_info.start_cursor,
            ..Default::default()
        };
        let conn = build(all, &args);
        assert_eq!(conn.nodes, vec![1, 2]);
    }

    #[test]
    fn test_duplicate_items_keep_their_own_positions() {
        let conn = build(vec![7, 7, 7], &PageArgs::default());
        let indices: Vec<_> = conn.edges.iter().map(|e| e.cursor.index()).collect();
        assert_eq!(indices, vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn test_connection_from_page_uses_store_flags() {
        let page = Page::from_sorted(items(10), PageRequest { page: 1, size: 4 });
        let conn = connection_from_page(&DefaultConnectionFactory::new(), page);

        assert_eq!(conn.nodes, vec![4, 5, 6, 7]);
        assert_eq!(conn.total_count, 10);
        assert!(conn.page_info.has_next_page);
        assert!(conn.page_info.has_previous_page);
        // Curseurs locaux à la page
        assert_eq!(conn.page_info.start_cursor, Some(Cursor::from_index(0)));
        assert_eq!(conn.page_info.end_cursor, Some(Cursor::from_index(3)));
    }
}
