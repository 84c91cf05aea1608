//! Table metadata and generated column accessors.
//!
//! Every model implements [`Table`] through the [`model!`](crate::model) macro:
//! the column constants plus index-based accessors that stand in for
//! reflection. Column indices always refer to positions in [`Table::COLUMNS`].

use may_postgres::types::FromSql;
use may_postgres::Row;

use crate::error::{ModelError, Result};
use crate::query::Select;
use crate::value::{SqlValue, ValueMismatch};

pub trait Table: Clone + Default + std::fmt::Debug + Send + Sync + 'static {
    /// Table name.
    const NAME: &'static str;
    /// All columns, in declaration order.
    const COLUMNS: &'static [&'static str];
    /// Columns with a database default (serial keys, `now()` timestamps).
    const COLUMNS_WITH_DEFAULT: &'static [&'static str];
    const COLUMNS_WITHOUT_DEFAULT: &'static [&'static str];
    const PRIMARY_KEY: &'static [&'static str];

    /// Value of the column at `index`, or `None` past the last column.
    fn value_at(&self, index: usize) -> Option<SqlValue>;

    fn set_value_at(&mut self, index: usize, value: SqlValue) -> Result<()>;

    /// Scan `row[position]` into the field of column `index`.
    fn scan_at(&mut self, index: usize, row: &Row, position: usize) -> Result<()>;

    fn column_index(column: &str) -> Option<usize> {
        Self::COLUMNS.iter().position(|c| *c == column)
    }

    /// Build a value from a row holding every column in declaration order.
    fn from_row(row: &Row) -> Result<Self> {
        let mut model = Self::default();
        for index in 0..Self::COLUMNS.len() {
            model.scan_at(index, row, index)?;
        }
        Ok(model)
    }

    fn value_of(&self, column: &str) -> Result<SqlValue> {
        Self::column_index(column)
            .and_then(|index| self.value_at(index))
            .ok_or_else(|| unknown_column::<Self>(column))
    }

    fn set_value_of(&mut self, column: &str, value: SqlValue) -> Result<()> {
        let index = Self::column_index(column).ok_or_else(|| unknown_column::<Self>(column))?;
        self.set_value_at(index, value)
    }

    fn primary_key_values(&self) -> Result<Vec<SqlValue>> {
        Self::PRIMARY_KEY.iter().map(|c| self.value_of(c)).collect()
    }

    /// Default-bearing columns that currently hold an explicit, non-zero value.
    fn non_zero_defaults(&self) -> Vec<&'static str> {
        Self::COLUMNS_WITH_DEFAULT
            .iter()
            .copied()
            .filter(|c| self.value_of(c).map(|v| !v.is_zero()).unwrap_or(false))
            .collect()
    }

    fn query() -> Select<Self> {
        Select::new()
    }
}

pub(crate) fn unknown_column<T: Table>(column: &str) -> ModelError {
    ModelError::Bind {
        table: T::NAME,
        column: column.to_string(),
        reason: "unknown column".into(),
    }
}

#[doc(hidden)]
pub fn column_out_of_range<T: Table>(index: usize) -> ModelError {
    ModelError::Invalid(format!("{} has no column at index {index}", T::NAME))
}

/// Convert a value for the field of column `index`.
pub fn convert<T: Table, V>(index: usize, value: SqlValue) -> Result<V>
where
    V: TryFrom<SqlValue, Error = ValueMismatch>,
{
    V::try_from(value).map_err(|e| ModelError::Bind {
        table: T::NAME,
        column: T::COLUMNS.get(index).copied().unwrap_or("?").to_string(),
        reason: e.to_string(),
    })
}

/// Read one cell of a row.
pub fn decode<T: Table, V>(row: &Row, index: usize, position: usize) -> Result<V>
where
    V: for<'a> FromSql<'a>,
{
    row.try_get::<_, V>(position).map_err(|source| ModelError::Decode {
        table: T::NAME,
        column: T::COLUMNS.get(index).copied().unwrap_or("?"),
        source,
    })
}

/// Columns to insert and columns to read back for an insert.
///
/// A non-empty whitelist is taken as is. Otherwise every column without a
/// default is inserted together with the default-bearing columns that hold a
/// non-zero value. Default-bearing columns left out are returned.
pub fn insert_column_set(
    columns: &[&'static str],
    with_default: &[&'static str],
    without_default: &[&'static str],
    non_zero_defaults: &[&'static str],
    whitelist: &[&'static str],
) -> (Vec<&'static str>, Vec<&'static str>) {
    if !whitelist.is_empty() {
        let returning = with_default
            .iter()
            .copied()
            .filter(|c| !whitelist.contains(c))
            .collect();
        return (whitelist.to_vec(), returning);
    }

    let insert: Vec<&'static str> = columns
        .iter()
        .copied()
        .filter(|c| without_default.contains(c) || non_zero_defaults.contains(c))
        .collect();
    let returning = with_default
        .iter()
        .copied()
        .filter(|c| !insert.contains(c))
        .collect();
    (insert, returning)
}

/// Columns to set on update: the whitelist, or every column outside the key.
pub fn update_column_set(
    columns: &[&'static str],
    primary_key: &[&'static str],
    whitelist: &[&'static str],
) -> Vec<&'static str> {
    if !whitelist.is_empty() {
        return whitelist.to_vec();
    }
    columns
        .iter()
        .copied()
        .filter(|c| !primary_key.contains(c))
        .collect()
}
