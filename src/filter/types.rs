use serde::{Deserialize, Serialize};

/// Per-collection listing rules: which columns free-text search covers,
/// which columns may be sorted on, and the fallback sort column.
#[derive(Debug)]
pub struct ListingColumns {
    pub table: &'static str,
    pub search: &'static [&'static str],
    pub sortable: &'static [&'static str],
    pub default_sort: &'static str,
}

impl ListingColumns {
    pub fn sortable_column(&self, requested: &str) -> Option<&'static str> {
        self.sortable.iter().copied().find(|c| *c == requested)
    }
}

/// Raw `?page&limit&sortBy&order&search` parameters. Kept as strings so that
/// unparsable numbers fall back to defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOrderInfo {
    pub column: &'static str,
    pub sort: SortDirection,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    Int(i64),
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlParam>,
}
