//! Compares predictions with stored labels and writes the result workbooks.

use crate::pipeline::dataset::{CellValue, LabeledExample, Table};
use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::workbook::write_table;
use std::path::Path;

pub const RESULTS_COLUMN: &str = "Results";
pub const MATCH_COLUMN: &str = "Match";
pub const ACCURACY_COLUMN: &str = "Accuracy";

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredResults {
    /// The test table plus `Results` and `Match`
    table: Table,
    matches: Vec<bool>,
    accuracy: f64,
}

impl ScoredResults {
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn matches(&self) -> &[bool] {
        &self.matches
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    /// The results table with the dataset accuracy repeated on every row
    pub fn accuracy_table(&self) -> PipelineResult<Table> {
        let mut table = self.table.clone();
        table.push_column(
            ACCURACY_COLUMN,
            vec![CellValue::Number(self.accuracy); table.len()],
        )?;
        Ok(table)
    }

    /// Writes both output workbooks, overwriting existing files.
    pub fn write(&self, results_path: &Path, accuracy_path: &Path) -> PipelineResult<()> {
        write_table(&self.table, results_path)?;
        write_table(&self.accuracy_table()?, accuracy_path)?;
        Ok(())
    }
}

/// Exact comparison: case and whitespace count.
pub fn score(
    table: &Table,
    examples: &[LabeledExample],
    predictions: &[String],
) -> PipelineResult<ScoredResults> {
    if table.is_empty() {
        return Err(PipelineError::EmptyDataset {
            table: table.name().to_string(),
        });
    }
    if examples.len() != table.len() {
        return Err(PipelineError::ColumnLength {
            column: "Class".to_string(),
            expected: table.len(),
            actual: examples.len(),
        });
    }

    let matches: Vec<bool> = examples
        .iter()
        .zip(predictions)
        .map(|(example, prediction)| *prediction == example.label)
        .collect();

    let mut scored = table.clone();
    scored.push_column(
        RESULTS_COLUMN,
        predictions.iter().map(|p| CellValue::Text(p.clone())).collect(),
    )?;
    scored.push_column(
        MATCH_COLUMN,
        matches
            .iter()
            .map(|&m| CellValue::Number(if m { 1.0 } else { 0.0 }))
            .collect(),
    )?;

    let accuracy = matches.iter().filter(|&&m| m).count() as f64 / matches.len() as f64;

    Ok(ScoredResults {
        table: scored,
        matches,
        accuracy,
    })
}
