//! Amount type for handling monetary values copied out of the WeChat export.
//!
//! The export prints amounts as `¥32.00`; the 一木记账 import wants the bare
//! number. Nothing else about the value is touched: no thousands-separator
//! handling, no rounding, no numeric parsing at all.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A raw amount string with every `¥` glyph removed.
///
/// # Examples
///
/// ```
/// # use wxbill_convert::Amount;
/// assert_eq!(Amount::parse("¥12.34").as_str(), "12.34");
/// assert_eq!(Amount::parse("12.34").as_str(), "12.34");
/// ```
#[derive(Default, Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Amount(String);

impl Amount {
    /// Strips `¥` glyphs from `raw` and keeps the rest verbatim.
    pub fn parse(raw: &str) -> Self {
        Amount(raw.replace('¥', ""))
    }

    /// The cleaned amount text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the source field was empty (or contained only `¥`).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the amount, returning the cleaned text.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromStr for Amount {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Amount::parse(s))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Amount::parse(&s))
    }
}
