//! Row-level operations.
//!
//! [`Models`] is the repository object. It owns the statement caches, so two
//! `Models` values never share cached statements. Every operation takes the
//! executor explicitly: a connection or an open transaction.

use std::sync::Arc;

use crate::binding::BindingPlan;
use crate::cache::{insert_key, update_key, upsert_key, CacheRegistry, CachedQuery};
use crate::error::{ModelError, Result, ResultExt};
use crate::executor::Executor;
use crate::sql;
use crate::table::{insert_column_set, unknown_column, update_column_set, Table};
use crate::value::{params, SqlValue};

/// Which columns an insert or update touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Columns<'a> {
    /// Derive the columns from the table's defaults and the current values.
    #[default]
    Infer,
    /// Exactly these columns. An empty list behaves like `Infer`.
    Whitelist(&'a [&'static str]),
}

impl<'a> Columns<'a> {
    pub fn whitelist(&self) -> &'a [&'static str] {
        match self {
            Columns::Infer => &[],
            Columns::Whitelist(columns) => columns,
        }
    }
}

/// Arguments of [`Models::upsert`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UpsertOptions<'a> {
    /// `DO UPDATE` on conflict; otherwise `DO NOTHING`.
    pub update_on_conflict: bool,
    /// Conflict target, defaults to the primary key.
    pub conflict_columns: &'a [&'static str],
    /// Columns to overwrite on conflict, defaults to every non-key column.
    pub update_columns: &'a [&'static str],
    /// Columns to insert, inferred like [`Columns::Infer`] when empty.
    pub insert_columns: &'a [&'static str],
}

impl UpsertOptions<'_> {
    pub fn update() -> Self {
        Self {
            update_on_conflict: true,
            ..Self::default()
        }
    }

    pub fn do_nothing() -> Self {
        Self::default()
    }
}

#[derive(Debug, Default)]
pub struct Models {
    caches: CacheRegistry,
}

impl Models {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache(&self) -> &CacheRegistry {
        &self.caches
    }

    /// Insert `model`, reading database defaults back into it.
    ///
    /// Columns without a default are always inserted. Default-bearing columns
    /// are inserted only when they hold a non-zero value; the others are
    /// returned by the statement and scanned into `model`.
    pub fn insert<T, E>(&self, exec: &E, model: &mut T, columns: Columns<'_>) -> Result<()>
    where
        T: Table,
        E: Executor + ?Sized,
    {
        let whitelist = columns.whitelist();
        let non_zero = model.non_zero_defaults();
        let key = insert_key(whitelist, &non_zero);

        let cached = self.caches.table(T::NAME).insert.get_or_build(&key, || {
            let (insert, returning) = insert_column_set(
                T::COLUMNS,
                T::COLUMNS_WITH_DEFAULT,
                T::COLUMNS_WITHOUT_DEFAULT,
                &non_zero,
                whitelist,
            );
            Ok(CachedQuery {
                sql: sql::insert(T::NAME, &insert, &returning),
                values: BindingPlan::build::<T>(&insert)?,
                returning: BindingPlan::build::<T>(&returning)?,
            })
        })?;

        self.run_returning(exec, &cached, model, false)
            .context(|| format!("unable to insert into {}", T::NAME))
    }

    /// Update the row of `model` by primary key. Returns the affected row count.
    pub fn update<T, E>(&self, exec: &E, model: &T, columns: Columns<'_>) -> Result<u64>
    where
        T: Table,
        E: Executor + ?Sized,
    {
        let whitelist = columns.whitelist();
        let key = update_key(whitelist);

        let cached = self.caches.table(T::NAME).update.get_or_build(&key, || {
            let set = update_column_set(T::COLUMNS, T::PRIMARY_KEY, whitelist);
            if set.is_empty() {
                return Err(ModelError::Invalid(format!(
                    "unable to update {}, could not build whitelist",
                    T::NAME
                )));
            }
            let mut bound = set.clone();
            bound.extend_from_slice(T::PRIMARY_KEY);
            Ok(CachedQuery {
                sql: sql::update(T::NAME, &set, T::PRIMARY_KEY),
                values: BindingPlan::build::<T>(&bound)?,
                returning: BindingPlan::default(),
            })
        })?;

        let values = cached.values.values(model)?;
        exec.execute(&cached.sql, &params(&values))
            .context(|| format!("unable to update {} row", T::NAME))
    }

    /// Insert `model`, or resolve a conflict as `options` says.
    pub fn upsert<T, E>(&self, exec: &E, model: &mut T, options: &UpsertOptions<'_>) -> Result<()>
    where
        T: Table,
        E: Executor + ?Sized,
    {
        let non_zero = model.non_zero_defaults();
        let key = upsert_key(
            options.update_on_conflict,
            options.conflict_columns,
            options.update_columns,
            options.insert_columns,
            &non_zero,
        );

        let cached = self.caches.table(T::NAME).upsert.get_or_build(&key, || {
            let (insert, returning) = insert_column_set(
                T::COLUMNS,
                T::COLUMNS_WITH_DEFAULT,
                T::COLUMNS_WITHOUT_DEFAULT,
                &non_zero,
                options.insert_columns,
            );
            let update = update_column_set(T::COLUMNS, T::PRIMARY_KEY, options.update_columns);
            if options.update_on_conflict && update.is_empty() {
                return Err(ModelError::Invalid(format!(
                    "unable to upsert {}, could not build update column list",
                    T::NAME
                )));
            }
            let conflict = if options.conflict_columns.is_empty() {
                T::PRIMARY_KEY
            } else {
                options.conflict_columns
            };
            BindingPlan::build::<T>(conflict)?;
            Ok(CachedQuery {
                sql: sql::upsert(
                    T::NAME,
                    options.update_on_conflict,
                    &insert,
                    &update,
                    conflict,
                    &returning,
                ),
                values: BindingPlan::build::<T>(&insert)?,
                returning: BindingPlan::build::<T>(&returning)?,
            })
        })?;

        // `DO NOTHING` on a conflict returns no row.
        self.run_returning(exec, &cached, model, true)
            .context(|| format!("unable to upsert {}", T::NAME))
    }

    fn run_returning<T, E>(
        &self,
        exec: &E,
        cached: &Arc<CachedQuery>,
        model: &mut T,
        allow_empty: bool,
    ) -> Result<()>
    where
        T: Table,
        E: Executor + ?Sized,
    {
        let values = cached.values.values(model)?;
        let params = params(&values);
        if cached.returning.is_empty() {
            exec.execute(&cached.sql, &params)?;
            return Ok(());
        }
        let rows = exec.query_all(&cached.sql, &params)?;
        match rows.first() {
            Some(row) => cached.returning.scan(model, row),
            None if allow_empty => Ok(()),
            None => Err(ModelError::NotFound),
        }
    }

    /// Delete the row of `model` by primary key.
    pub fn delete<T, E>(&self, exec: &E, model: &T) -> Result<u64>
    where
        T: Table,
        E: Executor + ?Sized,
    {
        let key = model.primary_key_values()?;
        let sql = sql::delete(T::NAME, T::PRIMARY_KEY);
        exec.execute(&sql, &params(&key))
            .context(|| format!("unable to delete from {}", T::NAME))
    }

    /// Delete every row in `rows` with one statement.
    pub fn delete_all<T, E>(&self, exec: &E, rows: &[T]) -> Result<u64>
    where
        T: Table,
        E: Executor + ?Sized,
    {
        if rows.is_empty() {
            return Ok(0);
        }
        let keys = primary_keys(rows)?;
        let sql = sql::delete_in(T::NAME, T::PRIMARY_KEY, rows.len());
        exec.execute(&sql, &params(&keys))
            .context(|| format!("unable to delete all from {} slice", T::NAME))
    }

    /// Set `columns` to the same values on every row in `rows`.
    ///
    /// The in-memory values are left untouched; reload to observe the change.
    pub fn update_all<T, E>(
        &self,
        exec: &E,
        rows: &[T],
        columns: &[(&'static str, SqlValue)],
    ) -> Result<u64>
    where
        T: Table,
        E: Executor + ?Sized,
    {
        if columns.is_empty() {
            return Err(ModelError::Invalid(
                "update all requires at least one column argument".into(),
            ));
        }
        if rows.is_empty() {
            return Ok(0);
        }

        let names: Vec<&'static str> = columns.iter().map(|(c, _)| *c).collect();
        BindingPlan::build::<T>(&names)?;

        let mut values: Vec<SqlValue> = columns.iter().map(|(_, v)| v.clone()).collect();
        values.extend(primary_keys(rows)?);
        let sql = sql::update_in(T::NAME, &names, T::PRIMARY_KEY, rows.len());
        exec.execute(&sql, &params(&values))
            .context(|| format!("unable to update all in {} slice", T::NAME))
    }

    /// Re-read `model` from the database.
    pub fn reload<T, E>(&self, exec: &E, model: &mut T) -> Result<()>
    where
        T: Table,
        E: Executor + ?Sized,
    {
        let key = model.primary_key_values()?;
        *model = self.find::<T, E>(exec, &key, &[])?;
        Ok(())
    }

    /// Re-read every row of `rows` with one query.
    ///
    /// Rows that no longer exist are dropped; the rest keep their order.
    pub fn reload_all<T, E>(&self, exec: &E, rows: &mut Vec<T>) -> Result<()>
    where
        T: Table,
        E: Executor + ?Sized,
    {
        if rows.is_empty() {
            return Ok(());
        }
        let keys = primary_keys(rows)?;
        let sql = sql::select_in(T::NAME, T::COLUMNS, T::PRIMARY_KEY, rows.len());
        let fetched = exec
            .query_all(&sql, &params(&keys))
            .context(|| format!("unable to reload all in {} slice", T::NAME))?
            .iter()
            .map(T::from_row)
            .collect::<Result<Vec<T>>>()?;

        let mut reloaded = Vec::with_capacity(rows.len());
        for row in rows.iter() {
            let key = row.primary_key_values()?;
            if let Some(fresh) = fetched
                .iter()
                .find(|f| f.primary_key_values().map(|k| k == key).unwrap_or(false))
            {
                reloaded.push(fresh.clone());
            }
        }
        *rows = reloaded;
        Ok(())
    }

    /// Whether a row with primary key `key` exists.
    pub fn exists<T, E>(&self, exec: &E, key: &[SqlValue]) -> Result<bool>
    where
        T: Table,
        E: Executor + ?Sized,
    {
        check_key_arity::<T>(key)?;
        let sql = sql::exists(T::NAME, T::PRIMARY_KEY);
        let row = exec
            .query_one(&sql, &params(key))
            .context(|| format!("unable to check if {} exists", T::NAME))?;
        row.try_get::<_, bool>(0)
            .map_err(|e| ModelError::database(format!("unable to check if {} exists", T::NAME), e))
    }

    /// Fetch one row by primary key.
    ///
    /// With a non-empty `select`, only those columns are read and the other
    /// fields keep their default values.
    pub fn find<T, E>(&self, exec: &E, key: &[SqlValue], select: &[&'static str]) -> Result<T>
    where
        T: Table,
        E: Executor + ?Sized,
    {
        check_key_arity::<T>(key)?;
        let columns = if select.is_empty() { T::COLUMNS } else { select };
        let plan = BindingPlan::build::<T>(columns)?;
        let sql = sql::find(T::NAME, columns, T::PRIMARY_KEY);

        let rows = exec
            .query_all(&sql, &params(key))
            .context(|| format!("unable to select from {}", T::NAME))?;
        let row = rows.first().ok_or(ModelError::NotFound)?;
        let mut model = T::default();
        plan.scan(&mut model, row)?;
        Ok(model)
    }
}

fn check_key_arity<T: Table>(key: &[SqlValue]) -> Result<()> {
    if key.len() != T::PRIMARY_KEY.len() {
        return Err(ModelError::Invalid(format!(
            "{} primary key has {} columns, got {} values",
            T::NAME,
            T::PRIMARY_KEY.len(),
            key.len()
        )));
    }
    Ok(())
}

/// Primary key values of every row, flattened in row order.
pub(crate) fn primary_keys<T: Table>(rows: &[T]) -> Result<Vec<SqlValue>> {
    let mut keys = Vec::with_capacity(rows.len() * T::PRIMARY_KEY.len());
    for row in rows {
        keys.extend(row.primary_key_values()?);
    }
    Ok(keys)
}

/// Column index for a name `T` must have.
pub(crate) fn require_column<T: Table>(column: &str) -> Result<usize> {
    T::column_index(column).ok_or_else(|| unknown_column::<T>(column))
}
