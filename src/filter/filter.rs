use serde::Serialize;

use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::{FilterOrderInfo, ListingColumns, ListingQuery, SortDirection, SqlParam, SqlResult};
use crate::config::ListingConfig;

/// A fully resolved listing request: search term, whitelisted sort and a
/// pagination window. The page query and the count query share one predicate.
#[derive(Debug, Clone)]
pub struct ListingFilter {
    pub columns: &'static ListingColumns,
    pub search: String,
    pub order: FilterOrderInfo,
    pub page: u32,
    pub limit: u32,
}

impl ListingFilter {
    pub fn from_query(
        columns: &'static ListingColumns,
        query: &ListingQuery,
        config: &ListingConfig,
    ) -> Self {
        let page = parse_positive(query.page.as_deref()).unwrap_or(1);
        let limit = parse_positive(query.limit.as_deref())
            .unwrap_or(config.default_limit)
            .min(config.max_limit.max(1));

        Self {
            columns,
            search: query.search.as_deref().unwrap_or("").trim().to_string(),
            order: FilterOrder::resolve(columns, query.sort_by.as_deref(), query.order.as_deref()),
            page,
            limit,
        }
    }

    /// `(page - 1) * limit`
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }

    pub fn has_search(&self) -> bool {
        !self.search.is_empty()
    }

    pub fn to_sql(&self) -> SqlResult {
        let (where_clause, mut params) = self.where_sql();
        let next = params.len() + 1;

        let query = [
            format!("SELECT * FROM \"{}\"", self.columns.table),
            where_clause,
            FilterOrder::generate(&self.order),
            format!("LIMIT ${} OFFSET ${}", next, next + 1),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        params.push(SqlParam::Int(i64::from(self.limit)));
        params.push(SqlParam::Int(self.offset()));
        SqlResult { query, params }
    }

    pub fn to_count_sql(&self) -> SqlResult {
        let (where_clause, params) = self.where_sql();
        let query = if where_clause.is_empty() {
            format!("SELECT COUNT(*) AS count FROM \"{}\"", self.columns.table)
        } else {
            format!("SELECT COUNT(*) AS count FROM \"{}\" {}", self.columns.table, where_clause)
        };
        SqlResult { query, params }
    }

    fn where_sql(&self) -> (String, Vec<SqlParam>) {
        if !self.has_search() {
            return (String::new(), vec![]);
        }
        (
            format!("WHERE {}", FilterWhere::generate(self.columns, 1)),
            vec![SqlParam::Text(FilterWhere::search_pattern(&self.search))],
        )
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|s| s.trim().parse::<u32>().ok()).filter(|n| *n >= 1)
}

/// Pagination metadata echoed back with every listing
#[derive(Debug, Clone, Serialize)]
pub struct ListingMeta {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub pages: i64,
    #[serde(rename = "sortBy")]
    pub sort_by: String,
    pub order: SortDirection,
    pub search: String,
}

impl ListingMeta {
    pub fn new(filter: &ListingFilter, total: i64) -> Self {
        let limit = i64::from(filter.limit);
        Self {
            page: filter.page,
            limit: filter.limit,
            total,
            pages: (total + limit - 1) / limit,
            sort_by: filter.order.column.to_string(),
            order: filter.order.sort,
            search: filter.search.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListingEnvelope<T: Serialize> {
    pub data: Vec<T>,
    pub meta: ListingMeta,
}
