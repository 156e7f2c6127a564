//! Paging, sorting and list metadata.
//!
//! Sort keys arrive as free-form strings (`"name"`, `"-created_at"`) and end up
//! interpolated into an `ORDER BY` clause, so they are resolved against a fixed
//! allow-list first. The resolved [`SortOrder`] only ever holds `&'static str`
//! columns taken from that list.

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::error::AppError;

/// Columns a link listing may be ordered by.
pub const LINK_SORT_ALLOW_LIST: &[&str] = &["id", "name", "created_at", "updated_at"];

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const DEFAULT_SORT: &str = "id";

const MAX_PAGE: i64 = 10_000_000;
const MAX_PAGE_SIZE: i64 = 100;

/// Prefix marking a descending sort key.
const DESCENDING_MARKER: char = '-';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Validated ordering: an allow-listed column plus a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub column: &'static str,
    pub direction: SortDirection,
}

/// A validated page request, ready to be handed to a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub sort: SortOrder,
    pub limit: i64,
    pub offset: i64,
}

/// Raw list parameters as requested by a caller.
#[derive(Debug, Clone)]
pub struct Filters {
    pub page: i64,
    pub page_size: i64,
    pub sort: String,
    pub sort_allow_list: &'static [&'static str],
}

impl Filters {
    pub fn new(
        page: i64,
        page_size: i64,
        sort: impl Into<String>,
        sort_allow_list: &'static [&'static str],
    ) -> Self {
        Self {
            page,
            page_size,
            sort: sort.into(),
            sort_allow_list,
        }
    }

    /// Default filters for listing links.
    pub fn for_links() -> Self {
        Self::new(
            DEFAULT_PAGE,
            DEFAULT_PAGE_SIZE,
            DEFAULT_SORT,
            LINK_SORT_ALLOW_LIST,
        )
    }

    /// Checks paging bounds and the sort key.
    ///
    /// All problems are reported together in the error details, keyed by field.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the page or page size is out of range
    /// or the sort key is not allow-listed.
    pub fn validate(&self) -> Result<PageRequest, AppError> {
        let mut problems = Map::new();

        if self.page < 1 {
            problems.insert("page".into(), json!("must be greater than zero"));
        } else if self.page > MAX_PAGE {
            problems.insert("page".into(), json!("must be a maximum of 10 million"));
        }

        if self.page_size < 1 {
            problems.insert("page_size".into(), json!("must be greater than zero"));
        } else if self.page_size > MAX_PAGE_SIZE {
            problems.insert("page_size".into(), json!("must be a maximum of 100"));
        }

        let sort = match resolve_sort(&self.sort, self.sort_allow_list) {
            Ok(sort) => Some(sort),
            Err(_) => {
                problems.insert("sort".into(), json!("invalid sort value"));
                None
            }
        };

        match sort {
            Some(sort) if problems.is_empty() => Ok(PageRequest {
                sort,
                limit: self.limit(),
                offset: self.offset(),
            }),
            _ => Err(AppError::bad_request(
                "Invalid list parameters",
                Value::Object(problems),
            )),
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).max(0).saturating_mul(self.page_size)
    }
}

/// Splits an optional descending marker off `requested` and checks the column
/// against `allow_list`.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the column is not in the allow-list.
pub fn resolve_sort(
    requested: &str,
    allow_list: &'static [&'static str],
) -> Result<SortOrder, AppError> {
    let (column, direction) = match requested.strip_prefix(DESCENDING_MARKER) {
        Some(rest) => (rest, SortDirection::Desc),
        None => (requested, SortDirection::Asc),
    };

    allow_list
        .iter()
        .find(|allowed| **allowed == column)
        .map(|allowed| SortOrder {
            column: *allowed,
            direction,
        })
        .ok_or_else(|| {
            AppError::bad_request(
                "Invalid sort value",
                json!({ "sort": requested, "allowed": allow_list }),
            )
        })
}

/// Pagination metadata returned alongside a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub current_page: i64,
    pub page_size: i64,
    pub first_page: i64,
    pub last_page: i64,
    pub total_records: i64,
}

/// Builds list metadata. `page` is reported as requested, even past the last page.
pub fn calculate_metadata(total_records: i64, page: i64, page_size: i64) -> Metadata {
    let divisor = page_size.max(1);
    let last_page = ((total_records.max(0) + divisor - 1) / divisor).max(1);

    Metadata {
        current_page: page,
        page_size,
        first_page: 1,
        last_page,
        total_records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters(page: i64, page_size: i64, sort: &str) -> Filters {
        Filters::new(page, page_size, sort, LINK_SORT_ALLOW_LIST)
    }

    #[test]
    fn test_metadata_example() {
        let meta = calculate_metadata(95, 3, 20);

        assert_eq!(meta.first_page, 1);
        assert_eq!(meta.last_page, 5);
        assert_eq!(meta.current_page, 3);
        assert_eq!(meta.total_records, 95);
    }

    #[test]
    fn test_metadata_exact_multiple() {
        assert_eq!(calculate_metadata(100, 1, 20).last_page, 5);
        assert_eq!(calculate_metadata(101, 1, 20).last_page, 6);
    }

    #[test]
    fn test_metadata_empty_total_has_one_page() {
        let meta = calculate_metadata(0, 1, 20);
        assert_eq!(meta.last_page, 1);
        assert_eq!(meta.first_page, 1);
    }

    #[test]
    fn test_metadata_page_is_not_clamped() {
        let meta = calculate_metadata(10, 7, 20);
        assert_eq!(meta.current_page, 7);
        assert_eq!(meta.last_page, 1);
    }

    #[test]
    fn test_resolve_sort_ascending() {
        let sort = resolve_sort("name", LINK_SORT_ALLOW_LIST).unwrap();
        assert_eq!(sort.column, "name");
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn test_resolve_sort_descending() {
        let sort = resolve_sort("-created_at", LINK_SORT_ALLOW_LIST).unwrap();
        assert_eq!(sort.column, "created_at");
        assert_eq!(sort.direction, SortDirection::Desc);
        assert_eq!(sort.direction.as_sql(), "DESC");
    }

    #[test]
    fn test_resolve_sort_rejects_unknown_column() {
        let err = resolve_sort("destination", LINK_SORT_ALLOW_LIST).unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn test_resolve_sort_rejects_injection() {
        assert!(resolve_sort("id; DROP TABLE links", LINK_SORT_ALLOW_LIST).is_err());
        assert!(resolve_sort("--id", LINK_SORT_ALLOW_LIST).is_err());
        assert!(resolve_sort("", LINK_SORT_ALLOW_LIST).is_err());
    }

    #[test]
    fn test_validate_defaults() {
        let page = Filters::for_links().validate().unwrap();

        assert_eq!(page.limit, 20);
        assert_eq!(page.offset, 0);
        assert_eq!(page.sort.column, "id");
    }

    #[test]
    fn test_validate_offset() {
        let page = filters(3, 20, "-name").validate().unwrap();
        assert_eq!(page.offset, 40);
        assert_eq!(page.limit, 20);
    }

    #[test]
    fn test_validate_collects_all_problems() {
        let err = filters(0, 500, "bogus").validate().unwrap_err();

        match err {
            AppError::Validation { details, .. } => {
                assert!(details.get("page").is_some());
                assert!(details.get("page_size").is_some());
                assert!(details.get("sort").is_some());
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_page_bounds() {
        assert!(filters(10_000_000, 20, "id").validate().is_ok());
        assert!(filters(10_000_001, 20, "id").validate().is_err());
        assert!(filters(1, 100, "id").validate().is_ok());
        assert!(filters(1, 0, "id").validate().is_err());
    }
}
