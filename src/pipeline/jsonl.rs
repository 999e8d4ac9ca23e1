//! Newline-delimited JSON datasets.

use crate::pipeline::error::{PipelineError, PipelineResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Writes one compact JSON object per line, truncating `path`. Returns the line count.
pub fn write_jsonl<T: Serialize>(path: &Path, records: &[T]) -> PipelineResult<usize> {
    let file = File::create(path).map_err(|source| PipelineError::io(path, source))?;
    let mut writer = BufWriter::new(file);

    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer
            .write_all(b"\n")
            .map_err(|source| PipelineError::io(path, source))?;
    }
    writer
        .flush()
        .map_err(|source| PipelineError::io(path, source))?;

    tracing::debug!(path = %path.display(), records = records.len(), "Wrote JSONL");
    Ok(records.len())
}

/// Decodes every line of `path`. Line numbers in errors are 1-based.
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> PipelineResult<Vec<T>> {
    let file = File::open(path).map_err(|source| PipelineError::io(path, source))?;

    BufReader::new(file)
        .lines()
        .enumerate()
        .map(|(index, line)| {
            let line = line.map_err(|source| PipelineError::io(path, source))?;
            serde_json::from_str(&line).map_err(|err| PipelineError::MalformedRecord {
                path: path.to_path_buf(),
                line: index + 1,
                message: err.to_string(),
            })
        })
        .collect()
}
