//! The conversion pipeline: preprocess, tokenize, classify, serialize.
//!
//! [`convert`] is a pure, single-pass function over the full export text.
//! Progress is reported through a callback so callers can run it on a
//! background task and relay stage updates to an interactive surface.

pub mod classify;
pub mod note;
pub mod preprocess;
pub mod serialize;
pub mod tokenize;

use crate::error::ConvertError;
use crate::model::BillRecords;
use classify::RecordKind;
pub use note::NotePolicy;
use serde::{Deserialize, Serialize};

/// The pipeline stages progress events are tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Stripping the banner block from the raw text.
    Preprocessing,
    /// Classifying data lines into the two output lists.
    Categorizing,
}

serde_plain::derive_display_from_serialize!(Stage);
serde_plain::derive_fromstr_from_deserialize!(Stage);

/// One progress report: a stage and a 0–100 percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub stage: Stage,
    pub percent: u8,
}

impl Progress {
    fn new(stage: Stage, percent: u8) -> Self {
        Self { stage, percent }
    }
}

/// Converts a full WeChat export into the two output row lists.
///
/// Reports preprocessing at 0 and 100, then categorizing roughly every tenth
/// of the line count. Either both complete lists come back or exactly one
/// [`ConvertError`]; there is no partial output. Each invocation uses fresh
/// accumulators — nothing is shared across calls.
pub fn convert(
    text: &str,
    policy: NotePolicy,
    mut progress: impl FnMut(Progress),
) -> Result<BillRecords, ConvertError> {
    progress(Progress::new(Stage::Preprocessing, 0));
    let lines = preprocess::preprocess(text);
    progress(Progress::new(Stage::Preprocessing, 100));

    if lines.iter().all(|line| line.trim().is_empty()) {
        return Err(ConvertError::EmptyInput);
    }

    progress(Progress::new(Stage::Categorizing, 0));
    let total = lines.len();
    let step = (total / 10).max(1);
    let mut records = BillRecords::default();

    for (index, line) in lines.iter().enumerate() {
        if let Some(classified) = classify::classify_line(line, policy) {
            match classified.kind {
                RecordKind::Transfer => records.transfers.push(classified.row),
                RecordKind::Transaction => records.transactions.push(classified.row),
            }
        }
        if index % step == 0 {
            let percent = ((index + 1) * 100 / total) as u8;
            progress(Progress::new(Stage::Categorizing, percent));
        }
    }

    if records.is_empty() {
        return Err(ConvertError::NoRecordsFound);
    }
    Ok(records)
}
