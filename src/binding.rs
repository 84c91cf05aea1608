//! Binding plans: which struct fields feed the parameters of a statement and
//! which fields receive the columns it returns.

use may_postgres::Row;

use crate::error::{ModelError, Result};
use crate::table::{unknown_column, Table};
use crate::value::SqlValue;

/// Ordered column indices into `T::COLUMNS`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingPlan(Vec<usize>);

impl BindingPlan {
    /// Map column names onto field indices of `T`. Fails on a name `T` does not have.
    pub fn build<T: Table>(columns: &[&str]) -> Result<Self> {
        columns
            .iter()
            .map(|c| T::column_index(c).ok_or_else(|| unknown_column::<T>(c)))
            .collect::<Result<Vec<_>>>()
            .map(BindingPlan)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Parameter values of `model`, in plan order.
    pub fn values<T: Table>(&self, model: &T) -> Result<Vec<SqlValue>> {
        self.0
            .iter()
            .map(|&index| {
                model.value_at(index).ok_or_else(|| ModelError::Bind {
                    table: T::NAME,
                    column: index.to_string(),
                    reason: "column index out of range".into(),
                })
            })
            .collect()
    }

    /// Scan a row whose columns follow plan order into `model`.
    pub fn scan<T: Table>(&self, model: &mut T, row: &Row) -> Result<()> {
        for (position, &index) in self.0.iter().enumerate() {
            model.scan_at(index, row, position)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Author;

    #[test]
    fn test_build_maps_names_to_indices() {
        let plan = BindingPlan::build::<Author>(&["name", "id"]).unwrap();
        assert_eq!(plan.indices(), &[2, 0]);
    }

    #[test]
    fn test_build_rejects_unknown_column() {
        let err = BindingPlan::build::<Author>(&["name", "nickname"]).unwrap_err();
        match err {
            ModelError::Bind { table, column, .. } => {
                assert_eq!(table, "authors");
                assert_eq!(column, "nickname");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_values_follow_plan_order() {
        let author = Author {
            id: 9,
            code: "rb".into(),
            name: "Rabash".into(),
            ..Default::default()
        };
        let plan = BindingPlan::build::<Author>(&["name", "id"]).unwrap();
        assert_eq!(
            plan.values(&author).unwrap(),
            vec![SqlValue::from("Rabash"), SqlValue::from(9i64)]
        );
    }
}
