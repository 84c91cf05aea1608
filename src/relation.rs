//! Relationships between tables.
//!
//! A relationship is a typed descriptor declared on the model (for example
//! `Source::PARENT`). Related rows are fetched explicitly and returned as
//! plain values; nothing is cached on the models themselves, so results go
//! stale after any write and must be loaded again.
//!
//! Loaders batch: one query covers every local row, and results are matched
//! back by key value in memory, aligned with the input slice.

use std::marker::PhantomData;

use crate::crud::{Columns, Models};
use crate::error::{ModelError, Result, ResultExt};
use crate::executor::Executor;
use crate::query::Select;
use crate::sql::{self, quote};
use crate::table::Table;
use crate::value::{params, read_like, SqlValue};

/// Distinct non-null values of `column` across `rows`.
fn distinct_keys<T: Table>(rows: &[T], column: &str) -> Result<Vec<SqlValue>> {
    let mut keys: Vec<SqlValue> = Vec::new();
    for row in rows {
        let key = row.value_of(column)?;
        if !key.is_null() && !keys.contains(&key) {
            keys.push(key);
        }
    }
    Ok(keys)
}

/// `L` holds a key pointing at one `F`.
pub struct ToOne<L, F> {
    pub name: &'static str,
    /// Key column on `L`.
    pub local_column: &'static str,
    /// Referenced column on `F`.
    pub foreign_column: &'static str,
    _marker: PhantomData<fn() -> (L, F)>,
}

impl<L: Table, F: Table> ToOne<L, F> {
    pub const fn new(
        name: &'static str,
        local_column: &'static str,
        foreign_column: &'static str,
    ) -> Self {
        Self {
            name,
            local_column,
            foreign_column,
            _marker: PhantomData,
        }
    }

    pub fn query(&self, local: &L) -> Result<Select<F>> {
        Ok(F::query().where_eq(self.foreign_column, local.value_of(self.local_column)?))
    }

    /// The related row of every local row; `None` where the key is null or dangling.
    pub fn load<E: Executor + ?Sized>(&self, exec: &E, locals: &[L]) -> Result<Vec<Option<F>>> {
        let keys = distinct_keys(locals, self.local_column)?;
        if keys.is_empty() {
            return Ok(locals.iter().map(|_| None).collect());
        }

        let related = F::query()
            .where_in(self.foreign_column, keys)
            .all(exec)
            .context(|| format!("failed to eager load {}", self.name))?;

        let mut loaded = Vec::with_capacity(locals.len());
        for local in locals {
            let key = local.value_of(self.local_column)?;
            let found = related
                .iter()
                .find(|r| {
                    !key.is_null() && r.value_of(self.foreign_column).ok().as_ref() == Some(&key)
                })
                .cloned();
            loaded.push(found);
        }
        Ok(loaded)
    }

    /// Point `local` at `related`, inserting `related` first when `insert` is set.
    pub fn set<E: Executor + ?Sized>(
        &self,
        models: &Models,
        exec: &E,
        local: &mut L,
        related: &mut F,
        insert: bool,
    ) -> Result<()> {
        if insert {
            models.insert(exec, related, Columns::Infer)?;
        }
        let key = related.value_of(self.foreign_column)?;
        let mut updated = local.clone();
        updated.set_value_of(self.local_column, key)?;
        models
            .update(exec, &updated, Columns::Whitelist(&[self.local_column]))
            .context(|| format!("failed to update local table for {}", self.name))?;
        *local = updated;
        Ok(())
    }

    /// Null the key on `local`. Fails for a non-nullable key.
    pub fn remove<E: Executor + ?Sized>(
        &self,
        models: &Models,
        exec: &E,
        local: &mut L,
    ) -> Result<()> {
        let null = local.value_of(self.local_column)?.to_null();
        let mut updated = local.clone();
        updated.set_value_of(self.local_column, null)?;
        models
            .update(exec, &updated, Columns::Whitelist(&[self.local_column]))
            .context(|| format!("failed to update local table for {}", self.name))?;
        *local = updated;
        Ok(())
    }
}

/// Many `F` rows hold a key pointing at `L`.
pub struct ToMany<L, F> {
    pub name: &'static str,
    /// Referenced column on `L`.
    pub local_column: &'static str,
    /// Key column on `F`.
    pub foreign_column: &'static str,
    _marker: PhantomData<fn() -> (L, F)>,
}

impl<L: Table, F: Table> ToMany<L, F> {
    pub const fn new(
        name: &'static str,
        local_column: &'static str,
        foreign_column: &'static str,
    ) -> Self {
        Self {
            name,
            local_column,
            foreign_column,
            _marker: PhantomData,
        }
    }

    pub fn query(&self, local: &L) -> Result<Select<F>> {
        Ok(F::query().where_eq(self.foreign_column, local.value_of(self.local_column)?))
    }

    /// The related rows of every local row, in the order the database returned them.
    pub fn load<E: Executor + ?Sized>(&self, exec: &E, locals: &[L]) -> Result<Vec<Vec<F>>> {
        let keys = distinct_keys(locals, self.local_column)?;
        if keys.is_empty() {
            return Ok(locals.iter().map(|_| Vec::new()).collect());
        }

        let related = F::query()
            .where_in(self.foreign_column, keys)
            .all(exec)
            .context(|| format!("failed to eager load {}", self.name))?;

        let mut loaded = Vec::with_capacity(locals.len());
        for local in locals {
            let key = local.value_of(self.local_column)?;
            let children = related
                .iter()
                .filter(|r| r.value_of(self.foreign_column).ok().as_ref() == Some(&key))
                .cloned()
                .collect();
            loaded.push(children);
        }
        Ok(loaded)
    }

    /// Attach `related` to `local`: insert them with the key set, or update their key.
    pub fn add<E: Executor + ?Sized>(
        &self,
        models: &Models,
        exec: &E,
        local: &L,
        related: &mut [F],
        insert: bool,
    ) -> Result<()> {
        let key = local.value_of(self.local_column)?;
        for row in related.iter_mut() {
            let mut updated = row.clone();
            updated.set_value_of(self.foreign_column, key.clone())?;
            if insert {
                models.insert(exec, &mut updated, Columns::Infer)?;
            } else {
                models
                    .update(exec, &updated, Columns::Whitelist(&[self.foreign_column]))
                    .context(|| format!("failed to update foreign table for {}", self.name))?;
            }
            *row = updated;
        }
        Ok(())
    }

    /// Detach every current child of `local`, then attach `related`.
    ///
    /// Fails before touching the database when the key on `F` is not nullable.
    pub fn set<E: Executor + ?Sized>(
        &self,
        models: &Models,
        exec: &E,
        local: &L,
        related: &mut [F],
        insert: bool,
    ) -> Result<()> {
        let key = local.value_of(self.local_column)?;
        self.check_nullable(&key)?;
        F::query()
            .where_eq(self.foreign_column, key.clone())
            .update_all(exec, &[(self.foreign_column, key.to_null())])
            .context(|| format!("failed to remove relationships before set for {}", self.name))?;
        self.add(models, exec, local, related, insert)
    }

    /// Null the key on those of `related` that point at `local`.
    ///
    /// Fails before touching the database when the key on `F` is not nullable.
    pub fn remove<E: Executor + ?Sized>(
        &self,
        models: &Models,
        exec: &E,
        local: &L,
        related: &mut [F],
    ) -> Result<()> {
        let key = local.value_of(self.local_column)?;
        self.check_nullable(&key)?;
        let null = key.to_null();

        let mut attached = Vec::new();
        for (i, row) in related.iter().enumerate() {
            if row.value_of(self.foreign_column)? == key {
                attached.push(i);
            }
        }
        if attached.is_empty() {
            return Ok(());
        }

        let targets: Vec<F> = attached.iter().map(|&i| related[i].clone()).collect();
        models
            .update_all(exec, &targets, &[(self.foreign_column, null.clone())])
            .context(|| format!("failed to update foreign table for {}", self.name))?;
        for i in attached {
            related[i].set_value_of(self.foreign_column, null.clone())?;
        }
        Ok(())
    }

    fn check_nullable(&self, key: &SqlValue) -> Result<()> {
        F::default().set_value_of(self.foreign_column, key.to_null())
    }
}

/// `L` and `F` linked through a join table.
pub struct ManyToMany<L, F> {
    pub name: &'static str,
    pub join_table: &'static str,
    /// Join column referencing `L`.
    pub join_local: &'static str,
    /// Join column referencing `F`.
    pub join_foreign: &'static str,
    pub local_column: &'static str,
    pub foreign_column: &'static str,
    _marker: PhantomData<fn() -> (L, F)>,
}

impl<L: Table, F: Table> ManyToMany<L, F> {
    pub const fn new(
        name: &'static str,
        join_table: &'static str,
        join_local: &'static str,
        join_foreign: &'static str,
    ) -> Self {
        Self {
            name,
            join_table,
            join_local,
            join_foreign,
            local_column: "id",
            foreign_column: "id",
            _marker: PhantomData,
        }
    }

    pub fn query(&self, local: &L) -> Result<Select<F>> {
        Ok(F::query().where_in_join(
            self.foreign_column,
            self.join_table,
            self.join_foreign,
            self.join_local,
            local.value_of(self.local_column)?,
        ))
    }

    /// The related rows of every local row, fetched with one joined query.
    pub fn load<E: Executor + ?Sized>(&self, exec: &E, locals: &[L]) -> Result<Vec<Vec<F>>> {
        let keys = distinct_keys(locals, self.local_column)?;
        let Some(template) = keys.first().cloned() else {
            return Ok(locals.iter().map(|_| Vec::new()).collect());
        };

        let sql = sql::select_through(
            F::NAME,
            F::COLUMNS,
            self.foreign_column,
            self.join_table,
            self.join_foreign,
            self.join_local,
            keys.len(),
        );
        let rows = exec
            .query_all(&sql, &params(&keys))
            .context(|| format!("failed to eager load {}", self.name))?;

        let link = F::COLUMNS.len();
        let mut related: Vec<(SqlValue, F)> = Vec::with_capacity(rows.len());
        for row in &rows {
            let owner = read_like(&template, row, link).map_err(|e| {
                ModelError::database(format!("failed to bind eager loaded {}", self.name), e)
            })?;
            related.push((owner, F::from_row(row)?));
        }

        let mut loaded = Vec::with_capacity(locals.len());
        for local in locals {
            let key = local.value_of(self.local_column)?;
            loaded.push(
                related
                    .iter()
                    .filter(|(owner, _)| *owner == key)
                    .map(|(_, f)| f.clone())
                    .collect(),
            );
        }
        Ok(loaded)
    }

    /// Link `related` to `local`, inserting `related` first when `insert` is set.
    pub fn add<E: Executor + ?Sized>(
        &self,
        models: &Models,
        exec: &E,
        local: &L,
        related: &mut [F],
        insert: bool,
    ) -> Result<()> {
        let key = local.value_of(self.local_column)?;
        let sql = format!(
            "INSERT INTO {} ({},{}) VALUES ($1,$2)",
            quote(self.join_table),
            quote(self.join_local),
            quote(self.join_foreign)
        );
        for row in related.iter_mut() {
            if insert {
                models.insert(exec, row, Columns::Infer)?;
            }
            let values = [key.clone(), row.value_of(self.foreign_column)?];
            exec.execute(&sql, &params(&values))
                .context(|| format!("failed to insert into join table for {}", self.name))?;
        }
        Ok(())
    }

    /// Replace every link of `local` with links to `related`.
    pub fn set<E: Executor + ?Sized>(
        &self,
        models: &Models,
        exec: &E,
        local: &L,
        related: &mut [F],
        insert: bool,
    ) -> Result<()> {
        let key = local.value_of(self.local_column)?;
        let sql = format!(
            "DELETE FROM {} WHERE {}=$1",
            quote(self.join_table),
            quote(self.join_local)
        );
        exec.execute(&sql, &params(&[key]))
            .context(|| format!("failed to remove relationships before set for {}", self.name))?;
        self.add(models, exec, local, related, insert)
    }

    /// Unlink `related` from `local`. The rows themselves are kept.
    pub fn remove<E: Executor + ?Sized>(&self, exec: &E, local: &L, related: &[F]) -> Result<()> {
        if related.is_empty() {
            return Ok(());
        }
        let mut values = vec![local.value_of(self.local_column)?];
        for row in related {
            values.push(row.value_of(self.foreign_column)?);
        }
        let sql = format!(
            "DELETE FROM {} WHERE {}=$1 AND {} IN ({})",
            quote(self.join_table),
            quote(self.join_local),
            quote(self.join_foreign),
            sql::placeholders(2, related.len())
        );
        exec.execute(&sql, &params(&values))
            .context(|| format!("failed to remove relationships for {}", self.name))?;
        Ok(())
    }
}

/// Drop `removed` rows from a previously loaded list, matching by primary key.
///
/// The remaining rows keep their relative order.
pub fn detach<F: Table>(loaded: &mut Vec<F>, removed: &[F]) {
    let removed: Vec<Vec<SqlValue>> = removed
        .iter()
        .filter_map(|r| r.primary_key_values().ok())
        .collect();
    loaded.retain(|row| match row.primary_key_values() {
        Ok(key) => !removed.contains(&key),
        Err(_) => true,
    });
}
