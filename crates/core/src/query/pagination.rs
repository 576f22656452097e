use serde::Serialize;

/// Default page size for list endpoints.
pub const DEFAULT_LIMIT: i64 = 50;

/// Default page size for the competitor list.
pub const DEFAULT_COMPETITOR_LIMIT: i64 = 20;

/// LIMIT/OFFSET pair for a list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }

    /// Parses raw query-string values.
    ///
    /// A missing, unparseable or negative limit falls back to
    /// `default_limit`; a missing, unparseable or negative offset becomes 0.
    pub fn parse(limit: Option<&str>, offset: Option<&str>, default_limit: i64) -> Self {
        let limit = parse_non_negative(limit).unwrap_or(default_limit);
        let offset = parse_non_negative(offset).unwrap_or(0);
        Self { limit, offset }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, 0)
    }
}

fn parse_non_negative(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v >= 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_absent() {
        assert_eq!(Pagination::parse(None, None, DEFAULT_LIMIT), Pagination::new(50, 0));
        assert_eq!(
            Pagination::parse(None, None, DEFAULT_COMPETITOR_LIMIT),
            Pagination::new(20, 0)
        );
    }

    #[test]
    fn test_parses_integers() {
        let page = Pagination::parse(Some("10"), Some("30"), DEFAULT_LIMIT);
        assert_eq!(page, Pagination::new(10, 30));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let page = Pagination::parse(Some("ten"), Some("-5"), DEFAULT_LIMIT);
        assert_eq!(page, Pagination::new(50, 0));

        let page = Pagination::parse(Some("-1"), Some("abc"), DEFAULT_COMPETITOR_LIMIT);
        assert_eq!(page, Pagination::new(20, 0));
    }

    #[test]
    fn test_zero_limit_is_kept() {
        let page = Pagination::parse(Some("0"), Some("0"), DEFAULT_LIMIT);
        assert_eq!(page, Pagination::new(0, 0));
    }
}
