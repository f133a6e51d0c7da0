//! Strips the export's human-readable banner block.
//!
//! A WeChat export opens with account metadata, then a banner line, then the
//! vendor's own column header, then the data rows. Only the data rows are
//! interesting downstream.

/// The banner line separating the metadata block from the data rows.
pub const BANNER: &str = "----------------------微信支付账单明细列表--------------------";

/// Splits `raw` into lines and drops everything through the banner line and
/// the vendor column header that follows it.
///
/// When no banner is present all lines are returned unchanged; finding zero
/// usable records afterwards is a downstream condition, not an error here.
/// The split is on `\n` alone — CR bytes, if any, ride along inside fields
/// exactly as the export wrote them.
pub fn preprocess(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    let lines: Vec<String> = raw.split('\n').map(str::to_string).collect();
    match lines.iter().position(|line| line.contains(BANNER)) {
        Some(banner_ix) => lines.into_iter().skip(banner_ix + 2).collect(),
        None => lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_and_header_are_dropped() {
        let raw = format!("noise\n{BANNER}\nheader\ndata1\ndata2");
        assert_eq!(preprocess(&raw), vec!["data1", "data2"]);
    }

    #[test]
    fn test_missing_banner_returns_all_lines() {
        assert_eq!(preprocess("a\nb"), vec!["a", "b"]);
    }

    #[test]
    fn test_banner_on_last_line_leaves_nothing() {
        let raw = format!("noise\n{BANNER}");
        assert!(preprocess(&raw).is_empty());
    }

    #[test]
    fn test_empty_input_yields_empty_sequence() {
        assert!(preprocess("").is_empty());
    }

    #[test]
    fn test_no_crlf_normalization() {
        let raw = format!("{BANNER}\r\nheader\r\ndata\r");
        assert_eq!(preprocess(&raw), vec!["data\r"]);
    }
}
