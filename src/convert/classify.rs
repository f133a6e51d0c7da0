//! Record classification and field remapping.
//!
//! Every non-blank data line becomes exactly one output row: a 转账账单 row
//! when the 收/支 column carries the `/` placeholder, a 收支账单 row
//! otherwise.

use crate::convert::note::{extract_note, NotePolicy};
use crate::model::{
    Amount, RawRecord, TransactionRecord, TransferRecord, LEDGER, TRANSFER_HEADER,
};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A transfer-shaped line needs more fields than this to carry data; shorter
/// ones get the fallback header row instead.
const TRANSFER_MIN_FIELDS: usize = 6;

/// Which output list a classified row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Transfer,
    Transaction,
}

serde_plain::derive_display_from_serialize!(RecordKind);

/// One classified, fully serialized output row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedRow {
    pub kind: RecordKind,
    pub row: String,
}

/// Classifies one data line and builds its output row. Blank lines are
/// skipped with `None`.
pub fn classify_line(line: &str, policy: NotePolicy) -> Option<ClassifiedRow> {
    if line.trim().is_empty() {
        return None;
    }
    let record = RawRecord::parse(line);
    if record.is_transfer() {
        Some(ClassifiedRow {
            kind: RecordKind::Transfer,
            row: transfer_row(&record),
        })
    } else {
        Some(ClassifiedRow {
            kind: RecordKind::Transaction,
            row: transaction_row(line, &record, policy),
        })
    }
}

fn transfer_row(record: &RawRecord) -> String {
    if record.len() <= TRANSFER_MIN_FIELDS {
        // Malformed or truncated transfer line; emit a synthetic header so
        // the row count still lines up for the user.
        return TRANSFER_HEADER.to_string();
    }
    TransferRecord {
        date: record.time().to_string(),
        from_account: record.account().to_string(),
        to_account: normalize_to_account(record.kind()),
        amount: Amount::parse(record.amount()),
        fee: String::new(),
        note: String::new(),
    }
    .to_row()
}

fn transaction_row(line: &str, record: &RawRecord, policy: NotePolicy) -> String {
    let note = extract_note(line, record, policy);
    // Transfer-labeled transactions (inbound 转账 rows) carry 收/支 and 金额
    // in the same columns as everything else.
    TransactionRecord {
        date: record.time().to_string(),
        flow: record.flow().to_string(),
        amount: Amount::parse(record.amount()),
        category: String::new(),
        subcategory: String::new(),
        ledger: LEDGER.to_string(),
        account: record.account().to_string(),
        note,
        tag: String::new(),
    }
    .to_row()
}

/// Extracts the receiving account from a 交易类型 value such as
/// `转账到招商银行卡`; anything without a `转账` marker is already an
/// account name and passes through unchanged.
pub(crate) fn normalize_to_account(account: &str) -> String {
    if !account.contains("转账") {
        return account.to_string();
    }
    Regex::new("转账到(.+)")
        .ok()
        .and_then(|re| re.captures(account))
        .and_then(|caps| caps.get(1))
        .map(|target| target.as_str().trim().to_string())
        .unwrap_or_else(|| account.to_string())
}
