//! Tabular views of the computed results.
//!
//! Renderers (CSV writers, plotting) consume these frames; nothing here
//! touches the filesystem.

use crate::overlap::OverlapReport;
use crate::partition::PartitionSummary;
use crate::relation::RelationMatrix;
use polars::prelude::*;
use std::fmt::Display;

pub const CLASS_COLUMN: &str = "class";
pub const ALL_ROW: &str = "all";

pub trait ToDataFrame {
    fn to_dataframe(&self) -> PolarsResult<DataFrame>;
}

// Columns `class`, `count`, `percentage`, closed by an `all` row.
impl ToDataFrame for PartitionSummary {
    fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut labels: Vec<String> = self.classes.iter().map(|c| c.label.clone()).collect();
        let mut counts: Vec<u64> = self.classes.iter().map(|c| c.count as u64).collect();
        let mut percentages: Vec<f64> = self.classes.iter().map(|c| c.percentage).collect();

        labels.push(ALL_ROW.to_string());
        counts.push(self.total as u64);
        percentages.push(100.0);

        df!(
            CLASS_COLUMN => labels,
            "count" => counts,
            "percentage" => percentages
        )
    }
}

// Row per dependency class, column per scope class.
impl ToDataFrame for RelationMatrix {
    fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let labels: Vec<String> = self.row_labels().iter().map(|l| l.to_string()).collect();
        let mut columns: Vec<Column> = vec![Column::new(
            PlSmallStr::from_static(CLASS_COLUMN),
            labels,
        )];

        for (c, column) in self.column_labels().iter().enumerate() {
            let values: Vec<u64> = self
                .row_labels()
                .iter()
                .map(|row| self.row(row).map(|r| r[c] as u64).unwrap_or(0))
                .collect();
            columns.push(Column::new(PlSmallStr::from(column.to_string()), values));
        }
        DataFrame::new(columns)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapTable {
    Absolute,
    Percentage,
}

/// Extension methods for OverlapReport
pub trait OverlapReportExt {
    /// One row per class, one column per transition date.
    fn to_dataframe(&self, table: OverlapTable) -> PolarsResult<DataFrame>;
}

impl<K, D> OverlapReportExt for OverlapReport<K, D>
where
    K: PartialEq + Display,
    D: Display,
{
    fn to_dataframe(&self, table: OverlapTable) -> PolarsResult<DataFrame> {
        let labels: Vec<String> = self.iter().map(|(class, _)| class.to_string()).collect();
        let mut columns: Vec<Column> = vec![Column::new(
            PlSmallStr::from_static(CLASS_COLUMN),
            labels,
        )];

        for (i, date) in self.transitions().iter().enumerate() {
            let name = PlSmallStr::from(date.to_string());
            let column = match table {
                OverlapTable::Absolute => {
                    let values: Vec<u64> = self
                        .iter()
                        .map(|(_, series)| series.absolute[i] as u64)
                        .collect();
                    Column::new(name, values)
                }
                OverlapTable::Percentage => {
                    let values: Vec<f64> = self
                        .iter()
                        .map(|(_, series)| series.percentage[i])
                        .collect();
                    Column::new(name, values)
                }
            };
            columns.push(column);
        }
        DataFrame::new(columns)
    }
}
