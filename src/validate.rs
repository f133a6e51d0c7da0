//! Pre-flight checks on the input file.
//!
//! The conversion core only ever sees text that passed these checks: the
//! file must look like a CSV, stay under the size cap, and its opening
//! characters must carry one of the WeChat bill fingerprints.

use crate::error::ConvertError;
use std::path::Path;

/// Maximum accepted input size.
pub const MAX_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// How much of the file's start is searched for a content fingerprint.
pub const SAMPLE_CHARS: usize = 1000;

/// Any one of these in the opening sample marks the file as a WeChat bill.
const CONTENT_MARKERS: [&str; 3] = ["微信支付", "账单", "交易时间"];

/// Checks extension and size before the file is read.
pub fn validate_file(path: &Path) -> Result<(), ConvertError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    if extension != "csv" {
        return Err(ConvertError::Validation(format!(
            "文件扩展名不支持: {extension}。请上传CSV文件"
        )));
    }

    let metadata = std::fs::metadata(path)
        .map_err(|err| ConvertError::Validation(format!("读取文件失败: {err}")))?;
    if metadata.len() > MAX_SIZE_BYTES {
        let size_mb = metadata.len() as f64 / (1024.0 * 1024.0);
        return Err(ConvertError::Validation(format!(
            "文件过大: {size_mb:.2}MB。最大支持10MB"
        )));
    }
    Ok(())
}

/// Checks the content fingerprint once the text is in memory.
pub fn validate_content(text: &str) -> Result<(), ConvertError> {
    let sample: String = text.chars().take(SAMPLE_CHARS).collect();
    if !CONTENT_MARKERS.iter().any(|marker| sample.contains(marker)) {
        return Err(ConvertError::Validation(
            "文件内容不符合微信支付账单格式".to_string(),
        ));
    }
    Ok(())
}
