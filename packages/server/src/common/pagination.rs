//! Relay-style cursor-based pagination types
//!
//! Lists are ordered by their V7 primary key, so the cursor is just the id
//! of the boundary row, base64-encoded.
//!
//! # Usage
//!
//! ```rust,ignore
//! let args = PaginationArgs::from(query.page).validate()?;
//! let (items, has_more) = store.list_chats(&filter, &args).await?;
//! let page_info = page_info_for(&items, has_more, &args, |chat| chat.id.into_uuid());
//! ```

use anyhow::{Context, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default page size when neither `first` nor `last` is given.
pub const DEFAULT_PAGE_SIZE: i32 = 25;

/// Upper bound for a single page.
pub const MAX_PAGE_SIZE: i32 = 100;

// ============================================================================
// Cursor
// ============================================================================

/// Opaque cursor for pagination (base64-encoded UUID).
#[derive(Debug, Clone)]
pub struct Cursor(Uuid);

impl Cursor {
    pub fn new(id: Uuid) -> Self {
        Cursor(id)
    }

    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.0.as_bytes())
    }

    pub fn encode_uuid(id: Uuid) -> String {
        Cursor::new(id).encode()
    }

    pub fn decode(s: &str) -> Result<Self> {
        let bytes = URL_SAFE_NO_PAD
            .decode(s)
            .context("Invalid cursor: not valid base64")?;
        let uuid = Uuid::from_slice(&bytes).context("Invalid cursor: not a valid UUID")?;
        Ok(Cursor(uuid))
    }

    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

// ============================================================================
// PageInfo / Page
// ============================================================================

/// Page information for cursor-based pagination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// When paginating forwards, are there more items?
    pub has_next_page: bool,
    /// When paginating backwards, are there more items?
    pub has_previous_page: bool,
    /// Cursor of the first item in the page.
    pub start_cursor: Option<String>,
    /// Cursor of the last item in the page.
    pub end_cursor: Option<String>,
}

impl PageInfo {
    pub fn empty() -> Self {
        PageInfo {
            has_next_page: false,
            has_previous_page: false,
            start_cursor: None,
            end_cursor: None,
        }
    }
}

impl Default for PageInfo {
    fn default() -> Self {
        Self::empty()
    }
}

/// One page of presentation objects.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub page_info: PageInfo,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, page_info: PageInfo) -> Self {
        Self { data, page_info }
    }
}

// ============================================================================
// Pagination Arguments
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationDirection {
    /// first/after
    Forward,
    /// last/before
    Backward,
}

/// Raw pagination query parameters.
///
/// Everything arrives as text; numbers that fail to parse are treated as
/// absent rather than rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub first: Option<String>,
    pub after: Option<String>,
    pub last: Option<String>,
    pub before: Option<String>,
}

/// Input arguments for cursor-based pagination.
///
/// Use either first/after (forward) or last/before (backward).
#[derive(Debug, Clone, Default)]
pub struct PaginationArgs {
    pub first: Option<i32>,
    pub after: Option<String>,
    pub last: Option<i32>,
    pub before: Option<String>,
}

impl From<PageQuery> for PaginationArgs {
    fn from(query: PageQuery) -> Self {
        fn non_empty(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        PaginationArgs {
            first: query.first.and_then(|v| v.trim().parse().ok()),
            after: non_empty(query.after),
            last: query.last.and_then(|v| v.trim().parse().ok()),
            before: non_empty(query.before),
        }
    }
}

impl PaginationArgs {
    pub fn forward(first: i32, after: Option<String>) -> Self {
        PaginationArgs {
            first: Some(first),
            after,
            last: None,
            before: None,
        }
    }

    pub fn backward(last: i32, before: Option<String>) -> Self {
        PaginationArgs {
            first: None,
            after: None,
            last: Some(last),
            before,
        }
    }

    /// Validate pagination arguments.
    ///
    /// Returns validated args with defaults applied and cursor decoded.
    pub fn validate(&self) -> Result<ValidatedPaginationArgs, &'static str> {
        if (self.first.is_some() || self.after.is_some())
            && (self.last.is_some() || self.before.is_some())
        {
            return Err("Cannot use first/after with last/before");
        }

        let direction = if self.last.is_some() || self.before.is_some() {
            PaginationDirection::Backward
        } else {
            PaginationDirection::Forward
        };

        let limit = self
            .first
            .or(self.last)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        let cursor_str = match direction {
            PaginationDirection::Forward => self.after.as_ref(),
            PaginationDirection::Backward => self.before.as_ref(),
        };

        let cursor = cursor_str
            .map(|c| Cursor::decode(c))
            .transpose()
            .map_err(|_| "Invalid cursor")?
            .map(|c| c.into_uuid());

        Ok(ValidatedPaginationArgs {
            limit,
            cursor,
            direction,
        })
    }
}

/// Validated and normalized pagination arguments.
#[derive(Debug, Clone)]
pub struct ValidatedPaginationArgs {
    /// Number of items to fetch (1-100, default 25).
    pub limit: i32,
    pub cursor: Option<Uuid>,
    pub direction: PaginationDirection,
}

impl Default for ValidatedPaginationArgs {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            cursor: None,
            direction: PaginationDirection::Forward,
        }
    }
}

impl ValidatedPaginationArgs {
    /// SQL LIMIT value (limit + 1 to detect has_more).
    pub fn fetch_limit(&self) -> i64 {
        (self.limit + 1) as i64
    }

    pub fn is_forward(&self) -> bool {
        self.direction == PaginationDirection::Forward
    }

    pub fn is_backward(&self) -> bool {
        self.direction == PaginationDirection::Backward
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Build PageInfo from pagination results.
pub fn build_page_info(
    has_more: bool,
    args: &ValidatedPaginationArgs,
    start_cursor: Option<String>,
    end_cursor: Option<String>,
) -> PageInfo {
    match args.direction {
        PaginationDirection::Forward => PageInfo {
            has_next_page: has_more,
            has_previous_page: args.cursor.is_some(),
            start_cursor,
            end_cursor,
        },
        PaginationDirection::Backward => PageInfo {
            has_next_page: args.cursor.is_some(),
            has_previous_page: has_more,
            start_cursor,
            end_cursor,
        },
    }
}

/// Build PageInfo for an already-trimmed page of items.
pub fn page_info_for<T>(
    items: &[T],
    has_more: bool,
    args: &ValidatedPaginationArgs,
    id_of: impl Fn(&T) -> Uuid,
) -> PageInfo {
    build_page_info(
        has_more,
        args,
        items.first().map(|item| Cursor::encode_uuid(id_of(item))),
        items.last().map(|item| Cursor::encode_uuid(id_of(item))),
    )
}

/// Trim results to the requested limit and determine if there are more.
///
/// Queries fetch `limit + 1` rows; the extra row only signals `has_more`.
pub fn trim_results<T>(results: Vec<T>, limit: i32) -> (Vec<T>, bool) {
    let has_more = results.len() > limit as usize;
    let results = if has_more {
        results.into_iter().take(limit as usize).collect()
    } else {
        results
    };
    (results, has_more)
}

/// Paginate rows that are already filtered and sorted ascending by id.
///
/// Mirrors the SQL the Postgres stores run, for stores that hold their rows
/// in memory.
pub fn paginate_sorted<T>(
    items: Vec<T>,
    args: &ValidatedPaginationArgs,
    id_of: impl Fn(&T) -> Uuid,
) -> (Vec<T>, bool) {
    match args.direction {
        PaginationDirection::Forward => {
            let window: Vec<T> = items
                .into_iter()
                .filter(|item| args.cursor.map_or(true, |cursor| id_of(item) > cursor))
                .take(args.fetch_limit() as usize)
                .collect();
            trim_results(window, args.limit)
        }
        PaginationDirection::Backward => {
            let window: Vec<T> = items
                .into_iter()
                .rev()
                .filter(|item| args.cursor.map_or(true, |cursor| id_of(item) < cursor))
                .take(args.fetch_limit() as usize)
                .collect();
            let (mut window, has_more) = trim_results(window, args.limit);
            window.reverse();
            (window, has_more)
        }
    }
}
