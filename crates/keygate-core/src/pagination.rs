//! Listing query parameters and pagination math.
//!
//! Listing endpoints accept four query parameters:
//!
//! - `search`: free-text filter applied by the caller
//! - `sort`: field name, prefixed with `-` for descending order
//! - `page`: 1-based page number
//! - `per_page`: page size; `0` (or unset) disables pagination entirely and
//!   returns every matching row without metadata
//!
//! The page window arithmetic lives in [`paginate`] as a pure function so the
//! boundary cases can be tested without a database.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use utoipa::{IntoParams, ToSchema};

/// Deserializes an optional string into an optional i64.
///
/// Query parameters may arrive as empty strings, which are treated as `None`.
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Query parameters accepted by listing endpoints.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct ListQuery {
    /// Case-insensitive substring filter
    #[serde(default)]
    pub search: Option<String>,
    /// Sort field, `-` prefix means descending (e.g. `-created_at`)
    #[serde(default)]
    pub sort: Option<String>,
    /// Page number (1-based)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Page size; 0 or unset returns all rows unpaginated
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub per_page: Option<i64>,
}

impl ListQuery {
    /// Effective page number. Negative values are normalized to 0.
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(0).max(0)
    }

    /// Effective page size. Negative values are normalized to 0 (unpaginated).
    #[must_use]
    pub fn per_page(&self) -> i64 {
        self.per_page.unwrap_or(0).max(0)
    }

    /// The search term, if non-empty.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    /// The sort expression, if non-empty.
    #[must_use]
    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref().filter(|s| !s.is_empty())
    }
}

/// Pagination metadata included in paginated responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageMeta {
    pub page: i64,
    pub per_page: i64,
    /// Ceiling of `total / per_page`; 0 when no rows match
    pub last_page: i64,
    pub total: i64,
}

/// The requested page is outside the computed page range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPage {
    pub page: i64,
    pub last_page: i64,
}

impl fmt::Display for InvalidPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "page {} is out of range (last page is {})",
            self.page, self.last_page
        )
    }
}

impl std::error::Error for InvalidPage {}

/// Offset/limit window to apply to the row query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: i64,
    pub limit: i64,
}

/// Resolves a page window for `total` matching rows.
///
/// Returns `Ok(None)` when `per_page` is 0: pagination is disabled and the
/// caller should fetch every row without metadata. Otherwise the page must
/// fall inside `[1, last_page]`, with one exception: an empty result set
/// accepts `page` 0 or 1 and yields a zero-row page with `last_page` 0
/// instead of rejecting the request.
pub fn paginate(
    page: i64,
    per_page: i64,
    total: i64,
) -> Result<Option<(PageWindow, PageMeta)>, InvalidPage> {
    let page = page.max(0);
    let per_page = per_page.max(0);

    if per_page == 0 {
        return Ok(None);
    }

    let last_page = (total + per_page - 1) / per_page;

    if total == 0 {
        if page > 1 {
            return Err(InvalidPage { page, last_page });
        }
        return Ok(Some((
            PageWindow {
                offset: 0,
                limit: per_page,
            },
            PageMeta {
                page,
                per_page,
                last_page: 0,
                total: 0,
            },
        )));
    }

    if page < 1 || page > last_page {
        return Err(InvalidPage { page, last_page });
    }

    Ok(Some((
        PageWindow {
            offset: (page - 1) * per_page,
            limit: per_page,
        },
        PageMeta {
            page,
            per_page,
            last_page,
            total,
        },
    )))
}
