//! # Query Builder
//!
//! Turns a list filter into parameterized SQL for the listing endpoints.
//!
//! A filter contributes three pieces:
//!
//! - a predicate list, one [`Predicate`] per present filter field, in a fixed
//!   order chosen by the filter;
//! - a [`Pagination`] clause (`LIMIT ? OFFSET ?`);
//! - an [`OrderBy`] directive on `created_at`.
//!
//! [`page_query`] renders all three; [`count_query`] renders only the
//! predicates, so the total always counts the same row set the page is cut
//! from. Placeholders are assigned by [`sqlx::QueryBuilder`]; values never
//! reach the SQL text.
//!
//! Table and column names come from `&'static str` constants in the
//! repositories, never from request input.

use sqlx::{QueryBuilder, Sqlite};
use uuid::Uuid;

/// Page size used when the caller gives none, zero, or a negative value.
pub const DEFAULT_LIMIT: i64 = 5;

/// Offset used when the caller gives none, zero, or a negative value.
pub const DEFAULT_OFFSET: i64 = 0;

// region: --- Predicates

/// A bindable value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Uuid(Uuid),
    Text(String),
    Int(i64),
}

impl From<Uuid> for SqlValue {
    fn from(value: Uuid) -> Self {
        SqlValue::Uuid(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(value)
    }
}

/// Comparison operator of a [`Predicate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// `column = ?`
    Eq,
    /// Case-insensitive substring match, `column LIKE ?`. The column must hold
    /// lowercased text; the needle is lowercased when the predicate is built.
    ContainsIgnoreCase,
}

/// One `column op value` condition of a WHERE clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: &'static str,
    pub op: Op,
    pub value: SqlValue,
}

impl Predicate {
    pub fn eq(column: &'static str, value: impl Into<SqlValue>) -> Self {
        Self {
            column,
            op: Op::Eq,
            value: value.into(),
        }
    }

    pub fn contains(column: &'static str, needle: &str) -> Self {
        Self {
            column,
            op: Op::ContainsIgnoreCase,
            value: SqlValue::Text(needle.to_lowercase()),
        }
    }
}

// endregion: --- Predicates

// region: --- Pagination and ordering

/// Effective LIMIT/OFFSET of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    /// Build a pagination; values that are absent or `<= 0` fall back to the defaults.
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT),
            offset: offset.filter(|o| *o > 0).unwrap_or(DEFAULT_OFFSET),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// `"asc"` / `"desc"` in any case; anything else, including nothing, is `Desc`.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.eq_ignore_ascii_case("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Sort directive. Listings always sort on creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub column: &'static str,
    pub direction: SortDirection,
}

impl OrderBy {
    pub fn created_at(direction: SortDirection) -> Self {
        Self {
            column: "created_at",
            direction,
        }
    }

    /// Rendered clause. `id` breaks ties so page boundaries are stable.
    pub fn to_sql(&self) -> String {
        let dir = self.direction.as_sql();
        format!("ORDER BY {} {dir}, id {dir}", self.column)
    }
}

// endregion: --- Pagination and ordering

// region: --- Rendering

/// A listing filter the builder can render.
pub trait ListFilter {
    /// Predicates for the present fields, in the filter's fixed field order.
    fn predicates(&self) -> Vec<Predicate>;

    fn pagination(&self) -> Pagination;

    fn order_by(&self) -> OrderBy;
}

/// `SELECT {columns} FROM {table} WHERE ... ORDER BY ... LIMIT ? OFFSET ?`
pub fn page_query<F: ListFilter + ?Sized>(
    table: &'static str,
    columns: &'static str,
    filter: &F,
) -> QueryBuilder<'static, Sqlite> {
    let mut qb = QueryBuilder::new(format!("SELECT {columns} FROM {table}"));
    push_where(&mut qb, &filter.predicates());

    qb.push(" ");
    qb.push(filter.order_by().to_sql());

    let pagination = filter.pagination();
    qb.push(" LIMIT ");
    qb.push_bind(pagination.limit);
    qb.push(" OFFSET ");
    qb.push_bind(pagination.offset);

    qb
}

/// `SELECT COUNT(*) FROM {table} WHERE ...` with the same predicates as [`page_query`].
pub fn count_query<F: ListFilter + ?Sized>(
    table: &'static str,
    filter: &F,
) -> QueryBuilder<'static, Sqlite> {
    let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {table}"));
    push_where(&mut qb, &filter.predicates());
    qb
}

/// Append ` WHERE 1 = 1 AND ...` for every predicate.
pub fn push_where(qb: &mut QueryBuilder<'static, Sqlite>, predicates: &[Predicate]) {
    qb.push(" WHERE 1 = 1");

    for predicate in predicates {
        qb.push(" AND ");
        qb.push(predicate.column);
        match predicate.op {
            Op::Eq => {
                qb.push(" = ");
                push_value(qb, predicate.value.clone());
            }
            Op::ContainsIgnoreCase => {
                qb.push(" LIKE ");
                let pattern = match &predicate.value {
                    SqlValue::Text(needle) => format!("%{}%", escape_like(needle)),
                    SqlValue::Uuid(id) => format!("%{id}%"),
                    SqlValue::Int(n) => format!("%{n}%"),
                };
                qb.push_bind(pattern);
                qb.push(" ESCAPE '\\'");
            }
        }
    }
}

fn push_value(qb: &mut QueryBuilder<'static, Sqlite>, value: SqlValue) {
    match value {
        SqlValue::Uuid(id) => qb.push_bind(id),
        SqlValue::Text(text) => qb.push_bind(text),
        SqlValue::Int(n) => qb.push_bind(n),
    };
}

/// Escape LIKE wildcards so the input matches literally.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

// endregion: --- Rendering

/// One page of a listing plus the size of the whole filtered set.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestFilter {
        predicates: Vec<Predicate>,
        pagination: Pagination,
        direction: SortDirection,
    }

    impl ListFilter for TestFilter {
        fn predicates(&self) -> Vec<Predicate> {
            self.predicates.clone()
        }

        fn pagination(&self) -> Pagination {
            self.pagination
        }

        fn order_by(&self) -> OrderBy {
            OrderBy::created_at(self.direction)
        }
    }

    #[test]
    fn test_pagination_defaults() {
        assert_eq!(Pagination::new(None, None), Pagination { limit: 5, offset: 0 });
        assert_eq!(Pagination::new(Some(0), Some(-3)), Pagination { limit: 5, offset: 0 });
        assert_eq!(Pagination::new(Some(-1), Some(0)), Pagination { limit: 5, offset: 0 });
    }

    #[test]
    fn test_pagination_positive_values_honored() {
        let pagination = Pagination::new(Some(12), Some(40));

        assert_eq!(pagination, Pagination { limit: 12, offset: 40 });
    }

    #[test]
    fn test_sort_direction_parsing() {
        assert_eq!(SortDirection::parse_or_default(Some("asc")), SortDirection::Asc);
        assert_eq!(SortDirection::parse_or_default(Some("ASC")), SortDirection::Asc);
        assert_eq!(SortDirection::parse_or_default(Some("Desc")), SortDirection::Desc);
        assert_eq!(SortDirection::parse_or_default(Some("sideways")), SortDirection::Desc);
        assert_eq!(SortDirection::parse_or_default(Some("")), SortDirection::Desc);
        assert_eq!(SortDirection::parse_or_default(None), SortDirection::Desc);
    }

    #[test]
    fn test_empty_filter_renders_tautology() {
        let filter = TestFilter {
            predicates: vec![],
            pagination: Pagination::default(),
            direction: SortDirection::Desc,
        };

        let qb = page_query("merchants", "*", &filter);
        assert_eq!(
            qb.sql(),
            "SELECT * FROM merchants WHERE 1 = 1 ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
        );

        let qb = count_query("merchants", &filter);
        assert_eq!(qb.sql(), "SELECT COUNT(*) FROM merchants WHERE 1 = 1");
    }

    #[test]
    fn test_predicates_render_in_order_with_placeholders() {
        let filter = TestFilter {
            predicates: vec![
                Predicate::eq("merchant_id", Uuid::nil()),
                Predicate::contains("name", "tea"),
                Predicate::eq("product_category", "Beverage"),
            ],
            pagination: Pagination::new(Some(10), Some(20)),
            direction: SortDirection::Asc,
        };

        let qb = page_query("products", "id", &filter);
        assert_eq!(
            qb.sql(),
            "SELECT id FROM products WHERE 1 = 1 AND merchant_id = ? \
             AND name LIKE ? ESCAPE '\\' AND product_category = ? \
             ORDER BY created_at ASC, id ASC LIMIT ? OFFSET ?"
        );

        let qb = count_query("products", &filter);
        assert_eq!(
            qb.sql(),
            "SELECT COUNT(*) FROM products WHERE 1 = 1 AND merchant_id = ? \
             AND name LIKE ? ESCAPE '\\' AND product_category = ?"
        );
    }

    #[test]
    fn test_contains_lowercases_needle() {
        let predicate = Predicate::contains("name_search", "CAFÉ Ñusa");

        assert_eq!(predicate.value, SqlValue::Text("café ñusa".to_string()));
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }
}
