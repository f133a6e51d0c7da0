//! The 收支账单 output row.

use crate::convert::serialize::join_row;
use crate::model::Amount;
use serde::{Deserialize, Serialize};

/// Header row of the 收支账单 CSV.
pub const TRANSACTION_HEADER: &str = "日期,收支类型,金额,类别,子类,所属账本,收支账户,备注,标签";

/// The fixed ledger tag the import schema requires on every row.
pub const LEDGER: &str = "账本";

/// One income/expense event.
///
/// Category, subcategory and tag are present in the import schema but the
/// export carries nothing to fill them with; they stay empty and the user
/// categorizes inside the app.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TransactionRecord {
    pub(crate) date: String,
    pub(crate) flow: String,
    pub(crate) amount: Amount,
    pub(crate) category: String,
    pub(crate) subcategory: String,
    pub(crate) ledger: String,
    pub(crate) account: String,
    pub(crate) note: String,
    pub(crate) tag: String,
}

impl TransactionRecord {
    /// Serializes to one 收支账单 CSV row. Trailing empty columns are
    /// trimmed down to the import's minimum slot count.
    pub fn to_row(&self) -> String {
        let fields = [
            self.date.clone(),
            self.flow.clone(),
            self.amount.as_str().to_string(),
            self.category.clone(),
            self.subcategory.clone(),
            self.ledger.clone(),
            self.account.clone(),
            self.note.clone(),
            self.tag.clone(),
        ];
        join_row(&fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TransactionRecord {
        TransactionRecord {
            date: "2024-01-02 09:15:00".to_string(),
            flow: "支出".to_string(),
            amount: Amount::parse("¥32.00"),
            ledger: LEDGER.to_string(),
            account: "零钱".to_string(),
            ..TransactionRecord::default()
        }
    }

    #[test]
    fn test_empty_tag_is_trimmed_to_eight_slots() {
        let row = sample().to_row();
        assert_eq!(row, "2024-01-02 09:15:00,支出,32.00,,,账本,零钱,");
        assert_eq!(row.split(',').count(), 8);
    }

    #[test]
    fn test_note_survives_in_slot_eight() {
        let mut record = sample();
        record.note = "转给张三，还款".to_string();
        let row = record.to_row();
        assert!(row.ends_with(",账本,零钱,转给张三，还款"));
        assert_eq!(row.split(',').count(), 8);
    }
}
