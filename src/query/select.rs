//! Select builder.

use sea_query::{
    Condition, Expr, ExprTrait, Iden, IntoCondition, Order, PostgresQueryBuilder, SelectStatement,
};
use std::marker::PhantomData;

use crate::error::Result;
use crate::table::Table;
use crate::value::{from_query_values, SqlValue};

struct Ident(&'static str);

impl Iden for Ident {
    fn unquoted(&self) -> &str {
        self.0
    }
}

/// Query over the rows of `T`.
///
/// Conditions are AND-ed. Ordering, limit and offset apply to `all`, `one`
/// and the bulk operations; `count` ignores ordering.
pub struct Select<T: Table> {
    conditions: Vec<Condition>,
    orders: Vec<(&'static str, Order)>,
    limit: Option<u64>,
    offset: Option<u64>,
    _model: PhantomData<fn() -> T>,
}

impl<T: Table> Clone for Select<T> {
    fn clone(&self) -> Self {
        Self {
            conditions: self.conditions.clone(),
            orders: self.orders.clone(),
            limit: self.limit,
            offset: self.offset,
            _model: PhantomData,
        }
    }
}

impl<T: Table> std::fmt::Debug for Select<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Select")
            .field("table", &T::NAME)
            .field("conditions", &self.conditions)
            .field("limit", &self.limit)
            .field("offset", &self.offset)
            .finish()
    }
}

impl<T: Table> Default for Select<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Table> Select<T> {
    pub fn new() -> Self {
        Self {
            conditions: Vec::new(),
            orders: Vec::new(),
            limit: None,
            offset: None,
            _model: PhantomData,
        }
    }

    /// Add a condition built with `sea_query`, e.g. `Expr::col("name").like("Rab%")`.
    pub fn filter<F: IntoCondition>(mut self, condition: F) -> Self {
        self.conditions.push(condition.into_condition());
        self
    }

    pub fn where_eq(self, column: &'static str, value: impl Into<SqlValue>) -> Self {
        let value: SqlValue = value.into();
        self.filter(Expr::col(column).eq(sea_query::Value::from(value)))
    }

    pub fn where_null(self, column: &'static str) -> Self {
        self.filter(Expr::col(column).is_null())
    }

    /// `column IN (values)`. An empty list matches nothing.
    pub fn where_in<I>(self, column: &'static str, values: I) -> Self
    where
        I: IntoIterator<Item = SqlValue>,
    {
        let values: Vec<sea_query::Value> = values.into_iter().map(Into::into).collect();
        self.filter(Expr::col(column).is_in(values))
    }

    /// `column IN (SELECT select FROM table WHERE filter = value)`.
    pub fn where_in_join(
        self,
        column: &'static str,
        table: &'static str,
        select: &'static str,
        filter: &'static str,
        value: SqlValue,
    ) -> Self {
        let value: sea_query::Value = value.into();
        let mut sub = SelectStatement::default();
        sub.column(select)
            .from(Ident(table))
            .and_where(Expr::col(filter).eq(value));
        self.filter(Expr::col(column).in_subquery(sub))
    }

    pub fn order_by(mut self, column: &'static str, order: Order) -> Self {
        self.orders.push((column, order));
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub(crate) fn clear_orders(&mut self) {
        self.orders.clear();
    }

    /// Statement selecting `columns` under the current conditions.
    pub(crate) fn statement(&self, columns: &[&'static str], paged: bool) -> SelectStatement {
        let mut stmt = SelectStatement::default();
        stmt.columns(columns.iter().copied()).from(Ident(T::NAME));
        for condition in &self.conditions {
            stmt.cond_where(condition.clone());
        }
        if paged {
            for (column, order) in &self.orders {
                stmt.order_by(*column, order.clone());
            }
            if let Some(limit) = self.limit {
                stmt.limit(limit);
            }
            if let Some(offset) = self.offset {
                stmt.offset(offset);
            }
        }
        stmt
    }

    /// SQL and parameters selecting `columns`.
    pub(crate) fn build(
        &self,
        columns: &[&'static str],
        paged: bool,
    ) -> Result<(String, Vec<SqlValue>)> {
        let (sql, values) = self.statement(columns, paged).build(PostgresQueryBuilder);
        Ok((sql, from_query_values(&values)?))
    }

    /// SQL and parameters of `all`.
    pub fn to_sql(&self) -> Result<(String, Vec<SqlValue>)> {
        self.build(T::COLUMNS, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Source, Tag};

    #[test]
    fn test_select_lists_all_columns() {
        let (sql, values) = Tag::query().to_sql().unwrap();
        assert_eq!(
            sql,
            r#"SELECT "id", "uid", "pattern", "parent_id", "description" FROM "tags""#
        );
        assert!(values.is_empty());
    }

    #[test]
    fn test_where_eq_binds_parameter() {
        let (sql, values) = Source::query()
            .where_eq("type_id", 2i64)
            .where_null("parent_id")
            .to_sql()
            .unwrap();
        assert!(sql.ends_with(r#"WHERE "type_id" = $1 AND "parent_id" IS NULL"#), "{sql}");
        assert_eq!(values, vec![SqlValue::BigInt(Some(2))]);
    }

    #[test]
    fn test_where_in_binds_each_value() {
        let (sql, values) = Source::query()
            .where_in("parent_id", vec![SqlValue::from(1i64), SqlValue::from(2i64)])
            .to_sql()
            .unwrap();
        assert!(sql.contains(r#""parent_id" IN ($1, $2)"#), "{sql}");
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_paging_is_optional() {
        let query = Tag::query()
            .where_eq("pattern", "kab")
            .order_by("id", Order::Desc)
            .limit(10)
            .offset(20);
        let (paged, _) = query.build(&["id"], true).unwrap();
        assert!(paged.ends_with(r#"ORDER BY "id" DESC LIMIT $2 OFFSET $3"#), "{paged}");

        let (plain, values) = query.build(&["id"], false).unwrap();
        assert_eq!(plain, r#"SELECT "id" FROM "tags" WHERE "pattern" = $1"#);
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_where_in_join_uses_subquery() {
        let (sql, values) = Tag::query()
            .where_in_join(
                "id",
                "content_units_tags",
                "tag_id",
                "content_unit_id",
                SqlValue::from(8i64),
            )
            .to_sql()
            .unwrap();
        assert!(
            sql.ends_with(
                r#"WHERE "id" IN (SELECT "tag_id" FROM "content_units_tags" WHERE "content_unit_id" = $1)"#
            ),
            "{sql}"
        );
        assert_eq!(values, vec![SqlValue::from(8i64)]);
    }
}
