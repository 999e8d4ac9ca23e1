//! `.xlsx` input and output.

use crate::pipeline::dataset::{CellValue, Table};
use crate::pipeline::error::{PipelineError, PipelineResult};
use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::Workbook;
use std::path::Path;

/// Reads the first worksheet; its first used row is the header.
pub fn read_table(path: &Path) -> PipelineResult<Table> {
    let spreadsheet_error = |message: String| PipelineError::Spreadsheet {
        path: path.to_path_buf(),
        message,
    };

    std::fs::metadata(path).map_err(|source| PipelineError::io(path, source))?;
    let mut workbook =
        open_workbook_auto(path).map_err(|err| spreadsheet_error(err.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| spreadsheet_error("workbook has no worksheets".to_string()))?
        .map_err(|err| spreadsheet_error(err.to_string()))?;

    let header_row = range.start().map_or(1, |(row, _)| row as usize + 1);
    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|header| header.iter().map(|cell| cell.to_string()).collect())
        .unwrap_or_default();

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let mut table = Table::new(name, headers).with_header_row(header_row);
    for row in rows {
        table.push_row(row.iter().map(to_cell).collect());
    }

    tracing::debug!(path = %path.display(), rows = table.len(), "Read workbook");
    Ok(table)
}

fn to_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(text) => CellValue::Text(text.clone()),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        other => CellValue::Text(other.to_string()),
    }
}

/// Writes `table` as a single-sheet workbook, replacing any existing file.
pub fn write_table(table: &Table, path: &Path) -> PipelineResult<()> {
    let write_error = |message: String| PipelineError::SpreadsheetWrite {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col_index, header) in table.headers().iter().enumerate() {
        let col_index = u16::try_from(col_index)
            .map_err(|_| write_error("too many columns".to_string()))?;
        worksheet
            .write_string(0, col_index, header)
            .map_err(|err| write_error(err.to_string()))?;
    }

    for (row_index, row) in table.rows().iter().enumerate() {
        let row_index = u32::try_from(row_index + 1)
            .map_err(|_| write_error("too many rows".to_string()))?;

        for (col_index, cell) in row.iter().enumerate() {
            let col_index = u16::try_from(col_index)
                .map_err(|_| write_error("too many columns".to_string()))?;

            let result = match cell {
                CellValue::Empty => continue,
                CellValue::Text(text) => worksheet.write_string(row_index, col_index, text),
                CellValue::Number(n) => worksheet.write_number(row_index, col_index, *n),
                CellValue::Bool(b) => worksheet.write_boolean(row_index, col_index, *b),
            };
            result.map_err(|err| write_error(err.to_string()))?;
        }
    }

    workbook
        .save(path)
        .map_err(|err| write_error(err.to_string()))?;

    tracing::debug!(path = %path.display(), rows = table.len(), "Wrote workbook");
    Ok(())
}
