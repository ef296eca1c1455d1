//! Connections between dependency classes and scope classes.
//!
//! Cell (d, s) counts the scopes of scope class `s` that depend on at least one
//! dependency of dependency class `d`.

use crate::label::ClassLabel;
use crate::partition::{Element, Partition, PartitionClass};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq)]
pub struct RelationMatrix {
    rows: Vec<ClassLabel>,
    columns: Vec<ClassLabel>,
    row_sizes: Vec<usize>,
    values: Vec<Vec<usize>>,
}

impl RelationMatrix {
    pub fn build<D, S>(
        dependencies: &Partition<D>,
        scopes: &Partition<S>,
        dependency_scopes: &HashMap<D, HashSet<S>>,
    ) -> Self
    where
        D: Element,
        S: Element,
    {
        let rows: Vec<&PartitionClass<D>> = dependencies.iter().collect();
        let columns: Vec<&PartitionClass<S>> = scopes.iter().collect();

        let values: Vec<Vec<usize>> = rows
            .par_iter()
            .map(|row| {
                let source_scopes: HashSet<&S> = row
                    .members
                    .iter()
                    .filter_map(|dep| dependency_scopes.get(dep))
                    .flatten()
                    .collect();
                columns
                    .iter()
                    .map(|column| {
                        column
                            .members
                            .iter()
                            .filter(|scope| source_scopes.contains(scope))
                            .count()
                    })
                    .collect()
            })
            .collect();

        Self {
            rows: rows.iter().map(|r| r.label.clone()).collect(),
            columns: columns.iter().map(|c| c.label.clone()).collect(),
            row_sizes: rows.iter().map(|r| r.len()).collect(),
            values,
        }
    }

    /// Dependency class labels.
    pub fn row_labels(&self) -> &[ClassLabel] {
        &self.rows
    }

    /// Scope class labels.
    pub fn column_labels(&self) -> &[ClassLabel] {
        &self.columns
    }

    pub fn row_size(&self, row: &ClassLabel) -> Option<usize> {
        let r = self.rows.iter().position(|l| l == row)?;
        Some(self.row_sizes[r])
    }

    pub fn get(&self, row: &ClassLabel, column: &ClassLabel) -> Option<usize> {
        let r = self.rows.iter().position(|l| l == row)?;
        let c = self.columns.iter().position(|l| l == column)?;
        Some(self.values[r][c])
    }

    pub fn row(&self, row: &ClassLabel) -> Option<&[usize]> {
        let r = self.rows.iter().position(|l| l == row)?;
        Some(&self.values[r])
    }

    /// All `(row, column, value)` cells, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (&ClassLabel, &ClassLabel, usize)> {
        self.rows.iter().zip(self.values.iter()).flat_map(move |(row, values)| {
            self.columns
                .iter()
                .zip(values.iter())
                .map(move |(column, &value)| (row, column, value))
        })
    }
}
