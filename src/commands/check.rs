//! The `wxbill check` command: run the pre-flight checks without converting.

use crate::archive;
use crate::commands::Out;
use crate::error::Result;
use crate::validate;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What the pre-flight checks learned about the file.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CheckReport {
    pub file: PathBuf,
    pub size_bytes: u64,
    /// The billing range from the file name, when present.
    pub date_range: Option<String>,
}

/// Validates the file and reports its size and detected billing range.
pub async fn check(file: &Path) -> Result<Out<CheckReport>> {
    validate::validate_file(file)?;
    let text = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read file at {}", file.display()))?;
    validate::validate_content(&text)?;

    let metadata = tokio::fs::metadata(file)
        .await
        .with_context(|| format!("Failed to read metadata of {}", file.display()))?;
    let file_name = file
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    let report = CheckReport {
        file: file.to_path_buf(),
        size_bytes: metadata.len(),
        date_range: archive::detected_date_range(&file_name),
    };
    Ok(Out::new("文件验证通过", report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::write_sample_export;

    #[tokio::test]
    async fn test_check_reports_range_and_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("微信支付账单(20240101-20240131).csv");
        write_sample_export(&path);

        let out = check(&path).await.unwrap();
        let report = out.structure().unwrap();
        assert_eq!(out.message(), "文件验证通过");
        assert_eq!(report.date_range.as_deref(), Some("20240101-20240131"));
        assert!(report.size_bytes > 0);
    }

    #[tokio::test]
    async fn test_check_rejects_wrong_extension() {
        let err = check(Path::new("bill.txt")).await.unwrap_err();
        assert!(err.to_string().contains("文件扩展名不支持"));
    }
}
