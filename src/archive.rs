//! Packages the two output CSVs into the download archive.
//!
//! Entry and archive names carry a fixed project tag plus the billing date
//! range when the original file name contains one. Each CSV gets the
//! canonical header for its record type, reconciled against whatever the
//! first produced row looks like.

use crate::error::Result;
use crate::model::{BillRecords, TRANSACTION_HEADER, TRANSFER_HEADER};
use anyhow::Context;
use chrono::{Datelike, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const FILE_PREFIX_BASE: &str = "一木记账工坊-微信";
const TRANSFER_LABEL: &str = "转账账单";
const TRANSACTION_LABEL: &str = "收支账单";
const ZIP_LABEL: &str = "处理后的账单";

/// Header-detection partials: a first row containing one of these is already
/// a header and gets replaced by the canonical one.
const TRANSFER_HEADER_PARTIALS: [&str; 1] = ["日期"];
const TRANSACTION_HEADER_PARTIALS: [&str; 2] = ["交易时间", "日期"];

/// What one packaging run produced, mirrored back to the user.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ArchiveSummary {
    /// Data rows written to the 转账账单 entry, headers excluded.
    pub transfer_count: usize,
    /// Data rows written to the 收支账单 entry, headers excluded.
    pub transaction_count: usize,
    /// The archive's file name.
    pub file_name: String,
    /// Where the archive was written.
    pub path: PathBuf,
}

/// Writes both CSVs into `{prefix}处理后的账单.zip` under `out_dir`.
pub fn write_archive(
    records: &BillRecords,
    original_file_name: &str,
    out_dir: &Path,
) -> Result<ArchiveSummary> {
    let prefix = file_prefix(original_file_name);
    let file_name = format!("{prefix}{ZIP_LABEL}.zip");
    let path = out_dir.join(&file_name);

    let file = File::create(&path)
        .with_context(|| format!("Unable to create archive at {}", path.display()))?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(9))
        .last_modified_time(local_zip_time());

    let mut transfer_count = 0;
    if !records.transfers.is_empty() {
        let rows = with_header(&records.transfers, TRANSFER_HEADER, &TRANSFER_HEADER_PARTIALS);
        transfer_count = rows.len() - 1;
        write_entry(&mut writer, &format!("{prefix}{TRANSFER_LABEL}.csv"), &rows, options)?;
    }

    let mut transaction_count = 0;
    if !records.transactions.is_empty() {
        let rows = with_header(
            &records.transactions,
            TRANSACTION_HEADER,
            &TRANSACTION_HEADER_PARTIALS,
        );
        transaction_count = rows.len() - 1;
        write_entry(
            &mut writer,
            &format!("{prefix}{TRANSACTION_LABEL}.csv"),
            &rows,
            options,
        )?;
    }

    writer.finish().context("Unable to finish the archive")?;
    debug!(
        "wrote {} ({} transfers, {} transactions)",
        path.display(),
        transfer_count,
        transaction_count
    );

    Ok(ArchiveSummary {
        transfer_count,
        transaction_count,
        file_name,
        path,
    })
}

fn write_entry(
    writer: &mut ZipWriter<File>,
    name: &str,
    rows: &[String],
    options: SimpleFileOptions,
) -> Result<()> {
    writer
        .start_file(name, options)
        .with_context(|| format!("Unable to start archive entry {name}"))?;
    writer
        .write_all(rows.join("\n").as_bytes())
        .with_context(|| format!("Unable to write archive entry {name}"))?;
    Ok(())
}

/// Ensures the canonical header leads the rows. A lone data row, or a first
/// row that does not look like a header, keeps all rows and gains the header
/// in front; a recognizable header row is replaced by the canonical one.
fn with_header(rows: &[String], header: &str, partials: &[&str]) -> Vec<String> {
    let first_is_header =
        rows.len() > 1 && partials.iter().any(|partial| rows[0].contains(partial));
    let data = if first_is_header { &rows[1..] } else { rows };

    let mut out = Vec::with_capacity(data.len() + 1);
    out.push(header.to_string());
    out.extend(data.iter().cloned());
    out
}

/// The archive/entry prefix derived from the original file name: the project
/// tag plus the `YYYYMMDD-YYYYMMDD` billing range when present.
pub fn file_prefix(original_file_name: &str) -> String {
    let sanitized = sanitize_file_name(original_file_name);
    let base = match sanitized.rsplit_once('.') {
        Some((stem, _ext)) => stem.to_string(),
        None => sanitized,
    };
    match detected_date_range(&base) {
        Some(range) => format!("{FILE_PREFIX_BASE}-{range}-"),
        None => format!("{FILE_PREFIX_BASE}-"),
    }
}

/// The `YYYYMMDD-YYYYMMDD` billing range scraped from a file name, if any.
pub fn detected_date_range(name: &str) -> Option<String> {
    Regex::new(r"\d{8}-\d{8}")
        .ok()?
        .find(name)
        .map(|m| m.as_str().to_string())
}

fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            other => other,
        })
        .collect()
}

fn local_zip_time() -> zip::DateTime {
    let now = chrono::Local::now();
    zip::DateTime::from_date_and_time(
        now.year() as u16,
        now.month() as u8,
        now.day() as u8,
        now.hour() as u8,
        now.minute() as u8,
        now.second() as u8,
    )
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn records() -> BillRecords {
        BillRecords {
            transfers: vec!["2024-01-05,招商银行(1234),零钱提现,200.00,,,,".to_string()],
            transactions: vec![
                "2024-01-02,支出,32.00,,,账本,零钱,".to_string(),
                "2024-01-03,支出,100.00,,,账本,零钱,转给张三，还款".to_string(),
            ],
        }
    }

    fn read_entry(path: &Path, name: &str) -> String {
        let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
        let mut entry = archive.by_name(name).unwrap();
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_prefix_with_date_range() {
        assert_eq!(
            file_prefix("微信支付账单(20240101-20240131).csv"),
            "一木记账工坊-微信-20240101-20240131-"
        );
    }

    #[test]
    fn test_prefix_without_date_range() {
        assert_eq!(file_prefix("微信支付账单.csv"), "一木记账工坊-微信-");
    }

    #[test]
    fn test_prefix_sanitizes_reserved_characters() {
        // The slash would otherwise leak a path separator into entry names.
        assert_eq!(file_prefix("a/b?.csv"), "一木记账工坊-微信-");
        assert_eq!(
            sanitize_file_name("a<b>c:d\"e/f\\g|h?i*j"),
            "a_b_c_d_e_f_g_h_i_j"
        );
    }

    #[test]
    fn test_header_is_prepended_to_data_rows() {
        let rows = with_header(
            &["2024-01-02,支出,1.00".to_string()],
            TRANSACTION_HEADER,
            &TRANSACTION_HEADER_PARTIALS,
        );
        assert_eq!(rows[0], TRANSACTION_HEADER);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_leading_header_row_is_replaced() {
        let rows = with_header(
            &[
                TRANSFER_HEADER.to_string(),
                "2024-01-05,甲,乙,1.00".to_string(),
            ],
            TRANSFER_HEADER,
            &TRANSFER_HEADER_PARTIALS,
        );
        assert_eq!(rows, vec![TRANSFER_HEADER.to_string(), "2024-01-05,甲,乙,1.00".to_string()]);
    }

    #[test]
    fn test_lone_header_like_row_is_kept_as_data() {
        // A single row is never treated as a header, even if it looks like one.
        let rows = with_header(
            &[TRANSFER_HEADER.to_string()],
            TRANSFER_HEADER,
            &TRANSFER_HEADER_PARTIALS,
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], rows[1]);
    }

    #[test]
    fn test_archive_contains_both_entries() {
        let dir = tempfile::tempdir().unwrap();
        let summary = write_archive(
            &records(),
            "微信支付账单(20240101-20240131).csv",
            dir.path(),
        )
        .unwrap();

        assert_eq!(summary.transfer_count, 1);
        assert_eq!(summary.transaction_count, 2);
        assert_eq!(
            summary.file_name,
            "一木记账工坊-微信-20240101-20240131-处理后的账单.zip"
        );
        assert!(summary.path.is_file());

        let transfers = read_entry(
            &summary.path,
            "一木记账工坊-微信-20240101-20240131-转账账单.csv",
        );
        assert!(transfers.starts_with(TRANSFER_HEADER));
        assert_eq!(transfers.lines().count(), 2);

        let transactions = read_entry(
            &summary.path,
            "一木记账工坊-微信-20240101-20240131-收支账单.csv",
        );
        assert!(transactions.starts_with(TRANSACTION_HEADER));
        assert_eq!(transactions.lines().count(), 3);
    }

    #[test]
    fn test_empty_list_writes_no_entry() {
        let dir = tempfile::tempdir().unwrap();
        let only_transactions = BillRecords {
            transfers: Vec::new(),
            transactions: records().transactions,
        };
        let summary = write_archive(&only_transactions, "bill.csv", dir.path()).unwrap();
        assert_eq!(summary.transfer_count, 0);

        let archive = zip::ZipArchive::new(File::open(&summary.path).unwrap()).unwrap();
        assert_eq!(archive.len(), 1);
    }
}
