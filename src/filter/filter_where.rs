use super::types::ListingColumns;

pub struct FilterWhere;

impl FilterWhere {
    /// Escape LIKE metacharacters so the search term matches literally
    pub fn escape_like(term: &str) -> String {
        let mut out = String::with_capacity(term.len());
        for c in term.chars() {
            if matches!(c, '%' | '_' | '\\') {
                out.push('\\');
            }
            out.push(c);
        }
        out
    }

    pub fn search_pattern(term: &str) -> String {
        format!("%{}%", Self::escape_like(term))
    }

    /// Case-insensitive substring match OR-ed across the search columns,
    /// all sharing the bound parameter `$param_index`
    pub fn generate(columns: &ListingColumns, param_index: usize) -> String {
        let parts: Vec<String> = columns
            .search
            .iter()
            .map(|c| format!("\"{}\" ILIKE ${} ESCAPE '\\'", c, param_index))
            .collect();
        format!("({})", parts.join(" OR "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static COLUMNS: ListingColumns = ListingColumns {
        table: "people",
        search: &["name", "email"],
        sortable: &["name"],
        default_sort: "name",
    };

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(FilterWhere::search_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(FilterWhere::search_pattern("a\\b"), "%a\\\\b%");
        assert_eq!(FilterWhere::search_pattern("ani"), "%ani%");
    }

    #[test]
    fn every_search_column_is_or_ed() {
        assert_eq!(
            FilterWhere::generate(&COLUMNS, 1),
            "(\"name\" ILIKE $1 ESCAPE '\\' OR \"email\" ILIKE $1 ESCAPE '\\')"
        );
    }
}
