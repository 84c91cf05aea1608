//! Executing a [`Select`].

use crate::error::{ModelError, Result, ResultExt};
use crate::executor::Executor;
use crate::query::Select;
use crate::sql::{column_list, quote};
use crate::table::Table;
use crate::value::{params, SqlValue};

impl<T: Table> Select<T> {
    pub fn all<E: Executor + ?Sized>(&self, exec: &E) -> Result<Vec<T>> {
        let (sql, values) = self.build(T::COLUMNS, true)?;
        exec.query_all(&sql, &params(&values))
            .context(|| format!("failed to assign all query results to {} slice", T::NAME))?
            .iter()
            .map(T::from_row)
            .collect()
    }

    /// The first matching row, or [`ModelError::NotFound`].
    pub fn one<E: Executor + ?Sized>(&self, exec: &E) -> Result<T> {
        let (sql, values) = self.clone().limit(1).build(T::COLUMNS, true)?;
        let rows = exec
            .query_all(&sql, &params(&values))
            .context(|| format!("failed to execute a one query for {}", T::NAME))?;
        rows.first().ok_or(ModelError::NotFound).and_then(T::from_row)
    }

    pub fn first<E: Executor + ?Sized>(&self, exec: &E) -> Result<Option<T>> {
        match self.one(exec) {
            Ok(model) => Ok(Some(model)),
            Err(ModelError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Number of rows the query matches. Limit and offset apply, ordering does not.
    pub fn count<E: Executor + ?Sized>(&self, exec: &E) -> Result<i64> {
        let mut paged = self.clone();
        paged.clear_orders();
        let (inner, values) = paged.build(T::PRIMARY_KEY, true)?;
        let sql = format!("SELECT COUNT(*) FROM ({inner}) AS \"count_subquery\"");
        let row = exec
            .query_one(&sql, &params(&values))
            .context(|| format!("failed to count {} rows", T::NAME))?;
        row.try_get::<_, i64>(0)
            .map_err(|e| ModelError::database(format!("failed to count {} rows", T::NAME), e))
    }

    pub fn exists<E: Executor + ?Sized>(&self, exec: &E) -> Result<bool> {
        let (inner, values) = self.clone().limit(1).build(T::PRIMARY_KEY, true)?;
        let sql = format!("SELECT EXISTS({inner})");
        let row = exec
            .query_one(&sql, &params(&values))
            .context(|| format!("failed to check if {} exists", T::NAME))?;
        row.try_get::<_, bool>(0)
            .map_err(|e| ModelError::database(format!("failed to check if {} exists", T::NAME), e))
    }

    /// Delete every row the query matches.
    pub fn delete_all<E: Executor + ?Sized>(&self, exec: &E) -> Result<u64> {
        let (inner, values) = self.build(T::PRIMARY_KEY, true)?;
        let sql = format!(
            "DELETE FROM {} WHERE ({}) IN ({inner})",
            quote(T::NAME),
            column_list(T::PRIMARY_KEY)
        );
        exec.execute(&sql, &params(&values))
            .context(|| format!("unable to delete all from {}", T::NAME))
    }

    /// Set `columns` on every row the query matches.
    pub fn update_all<E: Executor + ?Sized>(
        &self,
        exec: &E,
        columns: &[(&'static str, SqlValue)],
    ) -> Result<u64> {
        if columns.is_empty() {
            return Err(ModelError::Invalid(
                "update all requires at least one column argument".into(),
            ));
        }
        for (column, _) in columns {
            crate::crud::require_column::<T>(column)?;
        }

        let (inner, mut values) = self.build(T::PRIMARY_KEY, true)?;
        let start = values.len() + 1;
        let sets = columns
            .iter()
            .enumerate()
            .map(|(i, (c, _))| format!("{}=${}", quote(c), start + i))
            .collect::<Vec<_>>()
            .join(",");
        values.extend(columns.iter().map(|(_, v)| v.clone()));

        let sql = format!(
            "UPDATE {} SET {sets} WHERE ({}) IN ({inner})",
            quote(T::NAME),
            column_list(T::PRIMARY_KEY)
        );
        exec.execute(&sql, &params(&values))
            .context(|| format!("unable to update all for {}", T::NAME))
    }
}
