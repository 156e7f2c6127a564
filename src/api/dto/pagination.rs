//! Query parameters for link listing.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::domain::pagination::{
    DEFAULT_PAGE, DEFAULT_PAGE_SIZE, DEFAULT_SORT, Filters, LINK_SORT_ALLOW_LIST,
};

/// `GET /v1/links?name=&page=&page_size=&sort=`
///
/// Uses `serde_with` to parse page numbers from query strings as integers.
/// Range checks happen later in [`Filters::validate`].
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ListLinksQuery {
    #[serde(default)]
    pub name: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page_size: Option<i64>,

    #[serde(default)]
    pub sort: Option<String>,
}

impl ListLinksQuery {
    /// Name query; empty matches every link.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Fills in defaults for absent parameters.
    pub fn filters(&self) -> Filters {
        Filters::new(
            self.page.unwrap_or(DEFAULT_PAGE),
            self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            self.sort.as_deref().unwrap_or(DEFAULT_SORT),
            LINK_SORT_ALLOW_LIST,
        )
    }
}
