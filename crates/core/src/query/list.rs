use super::{FilterSet, Pagination, SqlValue};

/// Rendered SQL text with its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

/// A filtered list query that renders a page statement and a count
/// statement over the same FROM/JOIN/WHERE.
#[derive(Debug, Clone)]
pub struct ListQuery {
    select: &'static str,
    from: &'static str,
    filters: FilterSet,
    order_by: Option<&'static str>,
    pagination: Pagination,
}

impl ListQuery {
    /// `select` is the column list, `from` the table expression including
    /// any joins.
    pub fn new(select: &'static str, from: &'static str) -> Self {
        Self {
            select,
            from,
            filters: FilterSet::new(),
            order_by: None,
            pagination: Pagination::default(),
        }
    }

    pub fn filters(mut self, filters: FilterSet) -> Self {
        self.filters = filters;
        self
    }

    pub fn order_by(mut self, order_by: &'static str) -> Self {
        self.order_by = Some(order_by);
        self
    }

    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// The page of rows: filter placeholders first, then LIMIT and OFFSET.
    pub fn page_statement(&self) -> Statement {
        let mut params = self.filters.values().to_vec();
        let limit_idx = params.len() + 1;
        let offset_idx = params.len() + 2;
        params.push(SqlValue::Integer(self.pagination.limit));
        params.push(SqlValue::Integer(self.pagination.offset));

        let order_by = self
            .order_by
            .map(|o| format!(" ORDER BY {o}"))
            .unwrap_or_default();

        let sql = format!(
            "SELECT {} FROM {}{}{} LIMIT ?{} OFFSET ?{}",
            self.select,
            self.from,
            self.filters.where_clause(),
            order_by,
            limit_idx,
            offset_idx,
        );

        Statement { sql, params }
    }

    /// `COUNT(*)` over the same rows, bound to the filter values only.
    pub fn count_statement(&self) -> Statement {
        let sql = format!(
            "SELECT COUNT(*) FROM {}{}",
            self.from,
            self.filters.where_clause()
        );

        Statement {
            sql,
            params: self.filters.values().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SELECT: &str = "o.id, o.order_number, c.name AS customer_name";
    const FROM: &str = "orders o LEFT JOIN customers c ON c.id = o.customer_id";

    #[test]
    fn test_unfiltered_statements() {
        let query = ListQuery::new(SELECT, FROM)
            .order_by("o.created_at DESC")
            .paginate(Pagination::new(50, 0));

        let page = query.page_statement();
        assert_eq!(
            page.sql,
            format!("SELECT {SELECT} FROM {FROM} ORDER BY o.created_at DESC LIMIT ?1 OFFSET ?2")
        );
        assert_eq!(page.params, vec![SqlValue::Integer(50), SqlValue::Integer(0)]);

        let count = query.count_statement();
        assert_eq!(count.sql, format!("SELECT COUNT(*) FROM {FROM}"));
        assert!(count.params.is_empty());
    }

    #[test]
    fn test_pagination_placeholders_follow_filters() {
        let mut filters = FilterSet::new();
        filters
            .equals("o.status", Some("pending"))
            .contains(&["o.order_number", "c.name"], Some("ada"));

        let query = ListQuery::new(SELECT, FROM)
            .filters(filters)
            .order_by("o.created_at DESC")
            .paginate(Pagination::new(10, 20));

        let page = query.page_statement();
        assert!(page.sql.ends_with("ORDER BY o.created_at DESC LIMIT ?3 OFFSET ?4"));
        assert_eq!(page.params.len(), 4);
        assert_eq!(page.params[2], SqlValue::Integer(10));
        assert_eq!(page.params[3], SqlValue::Integer(20));
    }

    #[test]
    fn test_count_shares_where_clause_without_pagination() {
        let mut filters = FilterSet::new();
        filters.equals("o.status", Some("completed"));

        let query = ListQuery::new(SELECT, FROM)
            .filters(filters)
            .paginate(Pagination::new(5, 100));

        let page = query.page_statement();
        let count = query.count_statement();

        assert!(page.sql.contains(" WHERE o.status = ?1 "));
        assert_eq!(
            count.sql,
            format!("SELECT COUNT(*) FROM {FROM} WHERE o.status = ?1")
        );
        assert_eq!(count.params, vec![SqlValue::from("completed")]);
    }

    #[test]
    fn test_order_by_is_optional() {
        let page = ListQuery::new("*", "products").page_statement();
        assert_eq!(page.sql, "SELECT * FROM products LIMIT ?1 OFFSET ?2");
    }
}
