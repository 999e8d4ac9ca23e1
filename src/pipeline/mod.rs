//! Spreadsheet-to-fine-tune pipeline.
//!
//! A trial reads `training_{i}.xlsx`, `valid_{i}.xlsx` and `test_set.xlsx`,
//! fine-tunes a chat model on the first two, classifies every test abstract
//! with the resulting model and writes the scored workbooks.

pub mod config;
pub mod conversation;
pub mod dataset;
pub mod error;
pub mod inference;
pub mod jsonl;
pub mod poller;
pub mod scoring;
pub mod submit;
pub mod trial;
pub mod workbook;

pub use config::{LabelPolicy, Pacing, PipelineConfig};
pub use conversation::{ConversationFormatter, ConversationRecord, SYSTEM_MESSAGE};
pub use dataset::{load_examples, AbstractClass, CellValue, LabeledExample, Table};
pub use error::{PipelineError, PipelineResult};
pub use inference::{pacer_for, InferenceRunner, RequestPacer};
pub use jsonl::{read_jsonl, write_jsonl};
pub use poller::{JobPoller, JobState, PollSettings};
pub use scoring::{score, ScoredResults};
pub use submit::{delete_uploads, submit_job, SubmittedJob};
pub use trial::{run_trial, TrialPaths, TrialReport};
pub use workbook::{read_table, write_table};
