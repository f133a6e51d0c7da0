//! Note-text extraction and normalization.
//!
//! Two extraction generations exist in the wild and disagree on how a
//! transfer row's note is assembled. Rather than merging their semantics they
//! are kept as explicit, selectable policies; [`NotePolicy::Merged`] is the
//! current generation and the default.

use crate::model::RawRecord;
use serde::{Deserialize, Serialize};

/// Marker opening the inline note on older transfer exports.
const NOTE_MARKER: &str = "\"转账备注:";

/// Possible terminators for the inline note, checked in this order.
const NOTE_END_MARKERS: [&str; 2] = ["\",\"收入\"", "\","];

/// Which note-extraction generation to apply.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum NotePolicy {
    /// Current generation: positional extraction, merging the recipient into
    /// the note of transfer-labeled rows (`转给{对方}，{备注}`).
    #[default]
    Merged,
    /// Earlier generation: scan the raw line for an inline `"转账备注:`
    /// marker first, falling back to positional extraction without the
    /// recipient merge.
    Marker,
}

serde_plain::derive_display_from_serialize!(NotePolicy);
serde_plain::derive_fromstr_from_deserialize!(NotePolicy);

/// Extracts the note for a transaction row. Returns `""` when no rule
/// matches; never fails.
pub fn extract_note(line: &str, record: &RawRecord, policy: NotePolicy) -> String {
    match policy {
        NotePolicy::Merged => positional_note(record, true),
        NotePolicy::Marker => {
            marker_note(line).unwrap_or_else(|| positional_note(record, false))
        }
    }
}

/// Positional extraction. Transfer-labeled rows read the comment column
/// (optionally merging the recipient in front of it); every other row shape
/// with enough columns reads the export's own note column.
fn positional_note(record: &RawRecord, merge_recipient: bool) -> String {
    if record.kind() == "转账" && record.len() > 3 {
        let comment = normalize_note(record.goods());
        if merge_recipient {
            let recipient = normalize_note(record.counterparty());
            if !recipient.is_empty() {
                return format!("转给{recipient}，{comment}");
            }
        }
        comment
    } else if record.len() > 10 {
        normalize_note(record.note())
    } else {
        String::new()
    }
}

/// Inline-marker extraction: the substring from `"转账备注:` through the
/// first end marker, closing quote included, normalized. `None` when the
/// marker is absent or unterminated.
fn marker_note(line: &str) -> Option<String> {
    let trimmed = line.trim();
    let start = trimmed.find(NOTE_MARKER)?;
    let tail = &trimmed[start..];
    let end = NOTE_END_MARKERS.iter().find_map(|marker| tail.find(marker))?;
    Some(normalize_note(&tail[..end + 1]))
}

/// Cleans a note field for the strict downstream consumer.
///
/// Empty text and the export's `/` placeholder pass through unchanged. One
/// layer of surrounding quotes is stripped, doubled quotes collapse to one,
/// backslash pairs ride through untouched, and remaining ASCII commas become
/// full-width `，` — the importer treats every bare comma as a hard
/// delimiter, so the note must not contain one.
pub fn normalize_note(text: &str) -> String {
    if text.is_empty() || text == "/" {
        return text.to_string();
    }
    let mut text = text;
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        text = &text[1..text.len() - 1];
    }
    text.replace("\"\"", "\"").replace(',', "，")
}
