use super::SqlValue;

/// Ordered WHERE fragments with their bound values.
///
/// Column names are `&'static str` so only code-defined identifiers reach
/// the SQL text; request input only ever travels as a bound value.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    fragments: Vec<String>,
    values: Vec<SqlValue>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a value and returns the placeholder that refers to it.
    fn bind(&mut self, value: SqlValue) -> String {
        self.values.push(value);
        format!("?{}", self.values.len())
    }

    /// Adds `column = ?` when `value` is present and not blank.
    pub fn equals<V>(&mut self, column: &'static str, value: Option<V>) -> &mut Self
    where
        V: Into<SqlValue>,
    {
        let Some(value) = value.map(Into::into) else {
            return self;
        };
        if value.is_blank() {
            return self;
        }

        let placeholder = self.bind(value);
        self.fragments.push(format!("{column} = {placeholder}"));
        self
    }

    /// Adds a boolean equality on `column` when `value` is present.
    pub fn flag(&mut self, column: &'static str, value: Option<bool>) -> &mut Self {
        if let Some(value) = value {
            let placeholder = self.bind(SqlValue::Bool(value));
            self.fragments.push(format!("{column} = {placeholder}"));
        }
        self
    }

    /// Adds a case-insensitive substring match over `columns`.
    ///
    /// Case is folded with SQL `LOWER`, which in SQLite only folds ASCII
    /// letters: `ÉCLAIR` finds `Éclair` but `éclair` does not.
    ///
    /// The columns are OR-ed inside one fragment and share a single
    /// placeholder, so the term is bound once however many columns it
    /// searches.
    pub fn contains(&mut self, columns: &[&'static str], term: Option<&str>) -> &mut Self {
        let Some(term) = term.map(str::trim).filter(|t| !t.is_empty()) else {
            return self;
        };
        if columns.is_empty() {
            return self;
        }

        let placeholder = self.bind(SqlValue::Text(format!("%{}%", escape_like(term))));
        let alternatives: Vec<String> = columns
            .iter()
            .map(|column| format!("LOWER({column}) LIKE LOWER({placeholder}) ESCAPE '\\'"))
            .collect();

        self.fragments
            .push(format!("({})", alternatives.join(" OR ")));
        self
    }

    /// The ` WHERE …` clause, or an empty string when nothing was added.
    pub fn where_clause(&self) -> String {
        if self.fragments.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.fragments.join(" AND "))
        }
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// Escapes `LIKE` wildcards so the term matches literally with `ESCAPE '\'`.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_has_no_where_clause() {
        let filters = FilterSet::new();

        assert!(filters.is_empty());
        assert_eq!(filters.where_clause(), "");
        assert!(filters.values().is_empty());
    }

    #[test]
    fn test_absent_and_blank_values_are_skipped() {
        let mut filters = FilterSet::new();
        filters
            .equals("status", None::<String>)
            .equals("payment_status", Some(""))
            .contains(&["name"], Some("   "))
            .flag("active", None);

        assert!(filters.is_empty());
        assert_eq!(filters.where_clause(), "");
    }

    #[test]
    fn test_fragments_combine_with_and_in_order() {
        let mut filters = FilterSet::new();
        filters
            .equals("o.status", Some("pending"))
            .equals("o.payment_status", Some("paid"));

        assert_eq!(
            filters.where_clause(),
            " WHERE o.status = ?1 AND o.payment_status = ?2"
        );
        assert_eq!(
            filters.values(),
            &[SqlValue::from("pending"), SqlValue::from("paid")]
        );
    }

    #[test]
    fn test_substring_reuses_single_placeholder() {
        let mut filters = FilterSet::new();
        filters
            .equals("category", Some("coffee"))
            .contains(&["name", "sku"], Some("Latte"));

        assert_eq!(
            filters.where_clause(),
            " WHERE category = ?1 AND (LOWER(name) LIKE LOWER(?2) ESCAPE '\\' \
             OR LOWER(sku) LIKE LOWER(?2) ESCAPE '\\')"
        );
        assert_eq!(filters.values().len(), 2);
        assert_eq!(filters.values()[1], SqlValue::from("%Latte%"));
    }

    #[test]
    fn test_flag_binds_boolean() {
        let mut filters = FilterSet::new();
        filters.flag("active", Some(false));

        assert_eq!(filters.where_clause(), " WHERE active = ?1");
        assert_eq!(filters.values(), &[SqlValue::Bool(false)]);
    }

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("plain"), "plain");
    }
}
