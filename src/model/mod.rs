//! Types that represent the core data model, such as `RawRecord` and the two
//! output record shapes.
mod amount;
mod raw;
mod transaction;
mod transfer;

pub use amount::Amount;
pub use raw::RawRecord;
use serde::{Deserialize, Serialize};
pub use transaction::{TransactionRecord, LEDGER, TRANSACTION_HEADER};
pub use transfer::{TransferRecord, TRANSFER_HEADER};

/// The two serialized row lists a conversion produces, in input order.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BillRecords {
    /// Rows destined for the 转账账单 CSV.
    pub transfers: Vec<String>,
    /// Rows destined for the 收支账单 CSV.
    pub transactions: Vec<String>,
}

impl BillRecords {
    /// True when classification produced nothing in either list.
    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty() && self.transactions.is_empty()
    }
}
