//! Pagination types for connection queries.
//!
//! These types implement Relay-style cursor pagination. The algorithms
//! that operate on them live in [`crate::relay`].

use crate::error::{DomainError, DomainResult};
use crate::relay::cursor;

/// Largest page a single request may ask for.
pub const MAX_PAGE_SIZE: usize = 100;

/// Page size used by [`PageRequest::from_args`] when neither `first` nor
/// `last` is given.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Opaque cursor for pagination.
///
/// The cursor value encodes a position within one ordered result set and
/// should be treated as an opaque token by clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub value: String,
}

impl Cursor {
    /// Cursor for a zero-based position.
    pub fn from_index(index: usize) -> Self {
        Self {
            value: cursor::encode_index(index),
        }
    }

    /// Position this cursor points at, or `None` if it is malformed.
    pub fn index(&self) -> Option<usize> {
        cursor::decode_index(&self.value)
    }
}

impl From<String> for Cursor {
    fn from(value: String) -> Self {
        Self { value }
    }
}

/// Relay pagination arguments.
///
/// Supports forward pagination (`first`/`after`) and backward
/// pagination (`last`/`before`). Any subset may be supplied, including
/// `first` together with `last`.
#[derive(Debug, Clone, Default)]
pub struct PageArgs {
    /// Number of items to take from the front of the window.
    pub first: Option<i32>,
    /// Cursor to start after.
    pub after: Option<Cursor>,
    /// Number of items to take from the back of the window.
    pub last: Option<i32>,
    /// Cursor to end before.
    pub before: Option<Cursor>,
}

impl PageArgs {
    /// Build arguments from raw GraphQL inputs.
    pub fn new(
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Self {
        Self {
            first,
            after: after.map(Cursor::from),
            last,
            before: before.map(Cursor::from),
        }
    }

    /// `first`, if supplied and non-negative.
    pub fn first(&self) -> Option<usize> {
        self.first.and_then(|n| usize::try_from(n).ok())
    }

    /// `last`, if supplied and non-negative.
    pub fn last(&self) -> Option<usize> {
        self.last.and_then(|n| usize::try_from(n).ok())
    }

    /// Reject argument combinations that strict Relay servers refuse.
    ///
    /// The default (lenient) policy never calls this: it composes `first`
    /// and `last` and ignores bad cursors.
    pub fn validate_strict(&self) -> DomainResult<()> {
        let invalid = |msg: &str| Err(DomainError::InvalidPagination(msg.to_string()));

        if self.first.is_some() && self.last.is_some() {
            return invalid("cannot specify both first and last");
        }
        if self.first.is_some() && self.before.is_some() {
            return invalid("cannot specify both first and before");
        }
        if self.last.is_some() && self.after.is_some() {
            return invalid("cannot specify both last and after");
        }
        for (name, count) in [("first", self.first), ("last", self.last)] {
            match count {
                Some(n) if n < 0 => {
                    return Err(DomainError::InvalidPagination(format!(
                        "{} must not be negative",
                        name
                    )))
                }
                Some(n) if n as usize > MAX_PAGE_SIZE => {
                    return Err(DomainError::InvalidPagination(format!(
                        "cannot request more than {} items",
                        MAX_PAGE_SIZE
                    )))
                }
                _ => {}
            }
        }
        for (name, cursor) in [("after", &self.after), ("before", &self.before)] {
            if cursor.as_ref().is_some_and(|c| c.index().is_none()) {
                return Err(DomainError::InvalidPagination(format!(
                    "{} is not a valid cursor",
                    name
                )));
            }
        }

        Ok(())
    }
}

/// Paginated result set with edges and page info.
///
/// This is the Relay connection pattern for cursor-based pagination.
#[derive(Debug, Clone)]
pub struct Connection<T> {
    /// List of edges (node + cursor pairs).
    pub edges: Vec<Edge<T>>,
    /// The same nodes as `edges`, without cursors.
    pub nodes: Vec<T>,
    /// Information about the current page.
    pub page_info: PageInfo,
    /// Size of the full logical collection, not of this page.
    pub total_count: usize,
}

/// A single item in a paginated result.
#[derive(Debug, Clone)]
pub struct Edge<T> {
    /// The actual item.
    pub node: T,
    /// Cursor for this item (used for pagination).
    pub cursor: Cursor,
}

/// Information about the current page in a paginated result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    /// Whether there are more items after this page.
    pub has_next_page: bool,
    /// Whether there are items before this page.
    pub has_previous_page: bool,
    /// Cursor of the first item in this page.
    pub start_cursor: Option<Cursor>,
    /// Cursor of the last item in this page.
    pub end_cursor: Option<Cursor>,
}

/// Offset/limit request for a backing store that pages by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page number.
    pub page: usize,
    /// Items per page.
    pub size: usize,
}

impl PageRequest {
    /// Map Relay arguments onto a page of `first`, `last` or `default_size`
    /// items (capped at [`MAX_PAGE_SIZE`]).
    ///
    /// A valid `after` selects the page following the one that holds it, a
    /// valid `before` the page preceding the one that holds it. Malformed
    /// cursors are treated as absent.
    pub fn from_args(args: &PageArgs, default_size: usize) -> Self {
        let size = args
            .first()
            .or(args.last())
            .unwrap_or(default_size)
            .min(MAX_PAGE_SIZE);

        if size == 0 {
            return Self { page: 0, size };
        }

        let after = args.after.as_ref().and_then(Cursor::index);
        let before = args.before.as_ref().and_then(Cursor::index);

        let page = match (after, before) {
            (Some(after), _) => (after / size).saturating_add(1),
            (None, Some(before)) => (before / size).saturating_sub(1),
            (None, None) => 0,
        };

        Self { page, size }
    }

    /// Number of items skipped before this page, saturating for pages
    /// derived from forged cursors.
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

/// A page already limited by the backing store.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_next: bool,
    pub has_previous: bool,
    /// Size of the full collection the page was cut from.
    pub total_count: usize,
}

impl<T> Page<T> {
    /// Cut a page out of a fully loaded, ordered collection.
    pub fn from_sorted(all: Vec<T>, request: PageRequest) -> Self {
        let total_count = all.len();
        let offset = request.offset().min(total_count);
        let items: Vec<T> = all.into_iter().skip(offset).take(request.size).collect();

        Self::from_window(items, offset, total_count)
    }

    /// Wrap rows fetched at `offset` out of `total_count`, deriving the flags.
    ///
    /// `offset` is clamped to `total_count`, so the flags stay consistent even
    /// when the rows and the count disagree.
    pub fn from_window(items: Vec<T>, offset: usize, total_count: usize) -> Self {
        let offset = offset.min(total_count);

        Self {
            has_next: offset.saturating_add(items.len()) < total_count,
            has_previous: offset > 0,
            items,
            total_count,
        }
    }

    /// Convert every item, keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            has_next: self.has_next,
            has_previous: self.has_previous,
            total_count: self.total_count,
        }
    }
}

/// Which builder entry point connection queries use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaginationMode {
    /// Load the whole ordered collection and slice it in memory.
    #[default]
    Materialized,
    /// Let the backing store apply offset/limit.
    Paged,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn after(index: usize) -> Option<Cursor> {
        Some(Cursor::from_index(index))
    }

    #[test]
    fn test_negative_counts_are_absent() {
        let args = PageArgs {
            first: Some(-1),
            last: Some(-5),
            ..Default::default()
        };
        assert_eq!(args.first(), None);
        assert_eq!(args.last(), None);
    }

    // Test critique: la politique stricte refuse les combinaisons non-Relay
    #[test]
    fn test_strict_policy_rejects_mixed_directions() {
        let both = PageArgs {
            first: Some(2),
            last: Some(2),
            ..Default::default()
        };
        assert!(both.validate_strict().is_err());

        let first_before = PageArgs {
            first: Some(2),
            before: after(3),
            ..Default::default()
        };
        assert!(first_before.validate_strict().is_err());

        let last_after = PageArgs {
            last: Some(2),
            after: after(3),
            ..Default::default()
        };
        assert!(last_after.validate_strict().is_err());

        let forward = PageArgs {
            first: Some(2),
            after: after(3),
            ..Default::default()
        };
        assert!(forward.validate_strict().is_ok());
    }

    #[test]
    fn test_strict_policy_rejects_bad_values() {
        let too_many = PageArgs {
            first: Some(101),
            ..Default::default()
        };
        let err = too_many.validate_strict().unwrap_err().to_string();
        assert!(err.contains("100"));

        let negative = PageArgs {
            last: Some(-1),
            ..Default::default()
        };
        assert!(negative.validate_strict().is_err());

        let garbage = PageArgs::new(Some(1), Some("not a cursor!".into()), None, None);
        assert!(garbage.validate_strict().is_err());
    }

    #[test]
    fn test_page_request_mapping() {
        // Pas d'arguments: première page, taille par défaut
        let req = PageRequest::from_args(&PageArgs::default(), 10);
        assert_eq!(req, PageRequest { page: 0, size: 10 });

        // after=4 avec first=3 -> page 2 (offset 6)
        let args = PageArgs {
            first: Some(3),
            after: after(4),
            ..Default::default()
        };
        let req = PageRequest::from_args(&args, 10);
        assert_eq!(req, PageRequest { page: 2, size: 3 });
        assert_eq!(req.offset(), 6);

        // before=7 avec last=3 -> page 1
        let args = PageArgs {
            last: Some(3),
            before: after(7),
            ..Default::default()
        };
        assert_eq!(PageRequest::from_args(&args, 10).page, 1);

        // Curseur invalide = absent
        let args = PageArgs::new(Some(5), Some("???".into()), None, None);
        assert_eq!(PageRequest::from_args(&args, 10).page, 0);

        // Taille plafonnée
        let args = PageArgs {
            first: Some(10_000),
            ..Default::default()
        };
        assert_eq!(PageRequest::from_args(&args, 10).size, MAX_PAGE_SIZE);
    }

    // Test critique: un curseur forgé à usize::MAX ne doit jamais paniquer
    #[test]
    fn test_page_request_saturates_on_huge_cursor() {
        let args = PageArgs::new(
            Some(1),
            Some(cursor::encode_index(usize::MAX)),
            None,
            None,
        );
        let req = PageRequest::from_args(&args, 10);
        assert_eq!(req, PageRequest { page: usize::MAX, size: 1 });
        assert_eq!(req.offset(), usize::MAX);

        let args = PageArgs {
            first: Some(2),
            after: after(usize::MAX),
            ..Default::default()
        };
        let req = PageRequest::from_args(&args, 10);
        assert_eq!(req.offset(), usize::MAX);

        let page = Page::from_sorted(vec![1, 2, 3], req);
        assert!(page.items.is_empty());
        assert!(!page.has_next);
        assert!(page.has_previous);
        assert_eq!(page.total_count, 3);
    }

    #[test]
    fn test_page_from_window_clamps_offset() {
        // Lignes vides à un offset au-delà du total: pas de page suivante
        let page: Page<i32> = Page::from_window(Vec::new(), usize::MAX, 4);
        assert!(!page.has_next);
        assert!(page.has_previous);

        let page = Page::from_window(vec![3, 4], 2, 6);
        assert!(page.has_next && page.has_previous);
        assert_eq!(page.total_count, 6);

        let page = Page::from_window(vec![1, 2], 0, 2);
        assert!(!page.has_next && !page.has_previous);
    }

    #[test]
    fn test_page_from_sorted_flags() {
        let all: Vec<i32> = (0..7).collect();

        let first = Page::from_sorted(all.clone(), PageRequest { page: 0, size: 3 });
        assert_eq!(first.items, vec![0, 1, 2]);
        assert!(first.has_next && !first.has_previous);
        assert_eq!(first.total_count, 7);

        let last = Page::from_sorted(all.clone(), PageRequest { page: 2, size: 3 });
        assert_eq!(last.items, vec![6]);
        assert!(!last.has_next && last.has_previous);

        let beyond = Page::from_sorted(all, PageRequest { page: 9, size: 3 });
        assert!(beyond.items.is_empty());
        assert!(!beyond.has_next);
    }
}
