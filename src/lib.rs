mod archive;
pub mod args;
pub mod commands;
mod convert;
mod error;
mod model;
mod validate;
mod worker;


pub use archive::{detected_date_range, file_prefix, write_archive, ArchiveSummary};
pub use convert::{convert, NotePolicy, Progress, Stage};
pub use error::{ConvertError, Error, Result};
pub use model::{Amount, BillRecords, RawRecord, TransactionRecord, TransferRecord};
pub use model::{LEDGER, TRANSACTION_HEADER, TRANSFER_HEADER};
pub use validate::{validate_content, validate_file};
pub use worker::{ConvertTask, Converter, Event};
