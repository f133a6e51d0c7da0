//! Output-row serialization for the 一木记账 import format.
//!
//! Permissive on input, strict on output: the importer has no escaping
//! support for bare commas, so quoting happens per field here and comma-safe
//! note text is guaranteed upstream by full-width substitution.

/// Output rows never trim below this index — the importer expects a blank
/// slot between notes and tags even when both are empty.
const MIN_KEEP_INDEX: usize = 7;

/// Standard CSV quoting for one field: wraps in quotes and doubles internal
/// quotes when the field contains `,` or `"`, otherwise passes through.
/// Note text never triggers the wrap — its commas were already substituted
/// with `，` upstream.
pub fn format_field(field: &str) -> String {
    if field.is_empty() {
        return String::new();
    }
    if field.contains(',') || field.contains('"') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Joins fields into one CSV row, trimming trailing empty fields but always
/// keeping at least [`MIN_KEEP_INDEX`] + 1 slots, padding with empties when
/// the built array is shorter than that.
pub fn join_row(fields: &[String]) -> String {
    let keep = match fields.iter().rposition(|f| !f.is_empty()) {
        Some(last_non_empty) => last_non_empty.max(MIN_KEEP_INDEX) + 1,
        None => MIN_KEEP_INDEX + 1,
    };

    let mut out: Vec<String> = fields
        .iter()
        .take(keep)
        .map(|f| format_field(f))
        .collect();
    out.resize(keep, String::new());
    out.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::tokenize::parse_line;

    fn row(fields: &[&str]) -> String {
        let owned: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
        join_row(&owned)
    }

    #[test]
    fn test_plain_field_passes_through() {
        assert_eq!(format_field("零钱"), "零钱");
        assert_eq!(format_field(""), "");
    }

    #[test]
    fn test_comma_field_is_quoted() {
        assert_eq!(format_field("a,b"), "\"a,b\"");
    }

    #[test]
    fn test_quote_field_is_quoted_and_doubled() {
        assert_eq!(format_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_fullwidth_comma_bypasses_quoting() {
        assert_eq!(format_field("测试，备注"), "测试，备注");
    }

    #[test]
    fn test_quote_roundtrip() {
        for original in ["a,b", "say \"hi\"", "平淡", "x\"\"y,z"] {
            let formatted = format_field(original);
            assert_eq!(parse_line(&formatted), vec![original.to_string()]);
        }
    }

    #[test]
    fn test_short_row_pads_to_eight_slots() {
        let line = row(&["日期", "甲", "乙", "1.00", "", ""]);
        assert_eq!(line, "日期,甲,乙,1.00,,,,");
        assert_eq!(line.split(',').count(), 8);
    }

    #[test]
    fn test_long_row_trims_trailing_empties() {
        let line = row(&["日期", "支出", "1.00", "", "", "账本", "零钱", "备注", ""]);
        assert_eq!(line, "日期,支出,1.00,,,账本,零钱,备注");
    }

    #[test]
    fn test_trim_never_goes_below_minimum() {
        let line = row(&["日期", "支出", "1.00", "", "", "账本", "零钱", "", ""]);
        assert_eq!(line, "日期,支出,1.00,,,账本,零钱,");
        assert_eq!(line.split(',').count(), 8);
    }

    #[test]
    fn test_field_beyond_minimum_is_kept() {
        let line = row(&["a", "", "", "", "", "", "", "", "标签"]);
        assert_eq!(line, "a,,,,,,,,标签");
        assert_eq!(line.split(',').count(), 9);
    }
}
