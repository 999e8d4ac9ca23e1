//! In-memory tables and the labeled examples drawn from them.

use crate::pipeline::config::LabelPolicy;
use crate::pipeline::error::{PipelineError, PipelineResult};
use std::fmt;

pub const ABSTRACT_COLUMN: &str = "Abstract";
pub const CLASS_COLUMN: &str = "Class";

static EMPTY_CELL: CellValue = CellValue::Empty;

/// One spreadsheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    /// Renders the cell as text; `None` for an empty cell.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(text) if text.is_empty() => None,
            CellValue::Text(text) => Some(text.clone()),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Some(format!("{}", *n as i64))
            }
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::Bool(b) => Some(b.to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        CellValue::Text(text.to_string())
    }
}

impl From<String> for CellValue {
    fn from(text: String) -> Self {
        CellValue::Text(text)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// Header names plus rows in file order.
///
/// Rows shorter than the header read as empty in the missing columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
    header_row: usize,
}

impl Table {
    pub fn new(name: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows: Vec::new(),
            header_row: 1,
        }
    }

    /// 1-based sheet row holding the header when the sheet does not start at row 1
    pub fn with_header_row(mut self, header_row: usize) -> Self {
        self.header_row = header_row;
        self
    }

    pub fn with_rows(mut self, rows: Vec<Vec<CellValue>>) -> Self {
        self.rows = rows;
        self
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn header_row(&self) -> usize {
        self.header_row
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    pub fn cell(&self, row: usize, column: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&EMPTY_CELL)
    }

    fn require_column(&self, column: &str) -> PipelineResult<usize> {
        self.column_index(column)
            .ok_or_else(|| PipelineError::MissingColumn {
                column: column.to_string(),
                table: self.name.clone(),
            })
    }

    /// Appends a column; `values` must hold exactly one cell per row.
    pub fn push_column(
        &mut self,
        column: impl Into<String>,
        values: Vec<CellValue>,
    ) -> PipelineResult<()> {
        let column = column.into();
        if values.len() != self.rows.len() {
            return Err(PipelineError::ColumnLength {
                column,
                expected: self.rows.len(),
                actual: values.len(),
            });
        }

        let width = self.headers.len();
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.resize(width, CellValue::Empty);
            row.push(value);
        }
        self.headers.push(column);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbstractClass {
    Applied,
    Basic,
}

impl AbstractClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbstractClass::Applied => "applied",
            AbstractClass::Basic => "basic",
        }
    }

    /// Exact, case-sensitive match only
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "applied" => Some(AbstractClass::Applied),
            "basic" => Some(AbstractClass::Basic),
            _ => None,
        }
    }
}

impl fmt::Display for AbstractClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledExample {
    pub abstract_text: String,
    pub label: String,
}

impl LabeledExample {
    pub fn new(abstract_text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            abstract_text: abstract_text.into(),
            label: label.into(),
        }
    }

    pub fn class(&self) -> Option<AbstractClass> {
        AbstractClass::from_label(&self.label)
    }
}

/// Reads `Abstract` and `Class` from every row, in file order.
///
/// Row numbers in errors are spreadsheet rows, counted from the table's
/// header row.
pub fn load_examples(table: &Table, policy: LabelPolicy) -> PipelineResult<Vec<LabeledExample>> {
    let abstract_col = table.require_column(ABSTRACT_COLUMN)?;
    let class_col = table.require_column(CLASS_COLUMN)?;

    if table.is_empty() {
        return Err(PipelineError::EmptyDataset {
            table: table.name().to_string(),
        });
    }

    let mut examples = Vec::with_capacity(table.len());
    for index in 0..table.len() {
        let row = table.header_row() + 1 + index;
        let cell_text = |col: usize, name: &str| {
            table
                .cell(index, col)
                .as_text()
                .ok_or_else(|| PipelineError::EmptyCell {
                    row,
                    column: name.to_string(),
                })
        };

        let abstract_text = cell_text(abstract_col, ABSTRACT_COLUMN)?;
        let label = cell_text(class_col, CLASS_COLUMN)?;

        if AbstractClass::from_label(&label).is_none() {
            match policy {
                LabelPolicy::Strict => return Err(PipelineError::InvalidLabel { row, label }),
                LabelPolicy::Permissive => {
                    tracing::warn!(table = table.name(), row, label = %label, "Unrecognized label kept verbatim");
                }
            }
        }

        examples.push(LabeledExample {
            abstract_text,
            label,
        });
    }

    Ok(examples)
}
