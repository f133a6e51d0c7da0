use thiserror::Error;

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Terminal failures of the conversion pipeline.
///
/// The `Display` strings are shown to the user as-is, so they carry the same
/// wording the 一木记账 workshop tool displays. A conversion either produces
/// both complete record lists or exactly one of these; there is no partial
/// output and nothing is retried automatically.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Preprocessing left no usable data lines.
    #[error("处理后的CSV数据为空，请检查文件格式是否正确")]
    EmptyInput,

    /// Classification produced zero transfer and zero transaction records.
    #[error("未找到有效的转账或交易记录，请检查文件格式")]
    NoRecordsFound,

    /// Any unexpected failure while tokenizing or classifying, carrying the
    /// original message.
    #[error("处理CSV文件时出错: {0}")]
    Processing(String),

    /// The input file failed the pre-flight checks (extension, size, content
    /// fingerprint).
    #[error("{0}")]
    Validation(String),
}
