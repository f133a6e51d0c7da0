//! The 转账账单 output row.

use crate::convert::serialize::join_row;
use crate::model::Amount;
use serde::{Deserialize, Serialize};

/// Header row of the 转账账单 CSV, and the fallback row emitted for a
/// transfer-shaped line too short to carry data.
pub const TRANSFER_HEADER: &str = "日期,转出账户,转入账户,金额,手续费,备注";

/// One money movement between the user's own accounts.
///
/// The import schema reserves fee and note columns, but this generation of
/// the export never fills them.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TransferRecord {
    pub(crate) date: String,
    pub(crate) from_account: String,
    pub(crate) to_account: String,
    pub(crate) amount: Amount,
    pub(crate) fee: String,
    pub(crate) note: String,
}

impl TransferRecord {
    /// Serializes to one 转账账单 CSV row, padded to the import's minimum
    /// slot count.
    pub fn to_row(&self) -> String {
        let fields = [
            self.date.clone(),
            self.from_account.clone(),
            self.to_account.clone(),
            self.amount.as_str().to_string(),
            self.fee.clone(),
            self.note.clone(),
        ];
        join_row(&fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_is_padded_to_eight_slots() {
        let record = TransferRecord {
            date: "2024-01-05 08:00:00".to_string(),
            from_account: "招商银行(1234)".to_string(),
            to_account: "零钱".to_string(),
            amount: Amount::parse("¥200.00"),
            ..TransferRecord::default()
        };
        let row = record.to_row();
        assert_eq!(row.split(',').count(), 8);
        assert!(row.starts_with("2024-01-05 08:00:00,招商银行(1234),零钱,200.00"));
    }
}
