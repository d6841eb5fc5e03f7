use super::types::{FilterOrderInfo, ListingColumns, SortDirection};

pub struct FilterOrder;

impl FilterOrder {
    /// Unknown columns fall back to the collection default; anything other
    /// than `desc` sorts ascending.
    pub fn resolve(
        columns: &ListingColumns,
        sort_by: Option<&str>,
        order: Option<&str>,
    ) -> FilterOrderInfo {
        let column = sort_by
            .map(str::trim)
            .and_then(|requested| columns.sortable_column(requested))
            .unwrap_or(columns.default_sort);

        let sort = match order {
            Some(dir) if dir.trim().eq_ignore_ascii_case("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        };

        FilterOrderInfo { column, sort }
    }

    /// Column names only ever come from the whitelist, so quoting is enough.
    /// `id` breaks ties to keep page boundaries stable.
    pub fn generate(info: &FilterOrderInfo) -> String {
        format!("ORDER BY \"{}\" {}, \"id\" ASC", info.column, info.sort.to_sql())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static COLUMNS: ListingColumns = ListingColumns {
        table: "people",
        search: &["name"],
        sortable: &["name", "year"],
        default_sort: "name",
    };

    #[test]
    fn whitelisted_column_is_kept() {
        let info = FilterOrder::resolve(&COLUMNS, Some("year"), Some("DESC"));
        assert_eq!(info.column, "year");
        assert_eq!(info.sort, SortDirection::Desc);
    }

    #[test]
    fn injection_attempt_falls_back_to_default() {
        let info = FilterOrder::resolve(&COLUMNS, Some("name; DROP TABLE people"), None);
        assert_eq!(info.column, "name");
        assert_eq!(info.sort, SortDirection::Asc);
    }

    #[test]
    fn unknown_direction_is_ascending() {
        let info = FilterOrder::resolve(&COLUMNS, None, Some("sideways"));
        assert_eq!(info.sort, SortDirection::Asc);
        assert_eq!(
            FilterOrder::generate(&info),
            "ORDER BY \"name\" ASC, \"id\" ASC"
        );
    }
}
