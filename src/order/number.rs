use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const PREFIX: &str = "ORD-";
const DATE_FORMAT: &str = "%Y%m%d";
const LEN: usize = 18;

/// Smallest random suffix.
pub const SUFFIX_MIN: u32 = 10_000;
/// Largest random suffix.
pub const SUFFIX_MAX: u32 = 99_999;

/// A well-formed order number, `ORD-YYYYMMDD-NNNNN`.
///
/// `YYYYMMDD` is a real calendar date and `NNNNN` lies in
/// [`SUFFIX_MIN`, `SUFFIX_MAX`].
///
/// # Examples
///
/// ```
/// use storefront_policy::order::OrderNumber;
///
/// let number: OrderNumber = "ORD-20250615-48213".parse().unwrap();
/// assert_eq!(number.suffix(), 48213);
/// assert_eq!(number.date().to_string(), "2025-06-15");
///
/// assert!("ORD-20250615-0421".parse::<OrderNumber>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderNumber {
    value: String,
    date: NaiveDate,
    suffix: u32,
}

impl OrderNumber {
    /// Builds a number from its parts. `suffix` must already be in range.
    pub(crate) fn compose(date: NaiveDate, suffix: u32) -> Self {
        debug_assert!((SUFFIX_MIN..=SUFFIX_MAX).contains(&suffix));
        Self {
            value: format!("{}{}-{}", PREFIX, date.format(DATE_FORMAT), suffix),
            date,
            suffix,
        }
    }

    /// Parses and validates an order number.
    ///
    /// # Errors
    ///
    /// Returns an `OrderNumberError` describing the first malformed part.
    pub fn parse(s: &str) -> Result<Self, OrderNumberError> {
        if s.len() != LEN || !s.is_ascii() {
            return Err(OrderNumberError::Length(s.len()));
        }
        let Some(rest) = s.strip_prefix(PREFIX) else {
            return Err(OrderNumberError::Prefix);
        };

        let (date_part, suffix_part) = rest.split_at(8);
        let Some(suffix_part) = suffix_part.strip_prefix('-') else {
            return Err(OrderNumberError::Separator);
        };

        if !date_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(OrderNumberError::Date(date_part.to_string()));
        }
        let date = parse_date(date_part)
            .ok_or_else(|| OrderNumberError::Date(date_part.to_string()))?;

        if !suffix_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(OrderNumberError::Suffix(suffix_part.to_string()));
        }
        let suffix: u32 = suffix_part
            .parse()
            .map_err(|_| OrderNumberError::Suffix(suffix_part.to_string()))?;
        if !(SUFFIX_MIN..=SUFFIX_MAX).contains(&suffix) {
            return Err(OrderNumberError::Suffix(suffix_part.to_string()));
        }

        Ok(Self {
            value: s.to_string(),
            date,
            suffix,
        })
    }

    /// Returns the number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns the UTC creation date encoded in the number.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the random suffix.
    pub fn suffix(&self) -> u32 {
        self.suffix
    }

    /// Consumes the number, returning the string.
    pub fn into_string(self) -> String {
        self.value
    }
}

/// Parses eight ASCII digits as `YYYYMMDD`.
fn parse_date(digits: &str) -> Option<NaiveDate> {
    let year = digits.get(0..4)?.parse().ok()?;
    let month = digits.get(4..6)?.parse().ok()?;
    let day = digits.get(6..8)?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl FromStr for OrderNumber {
    type Err = OrderNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for OrderNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de> Deserialize<'de> for OrderNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Why a string is not a valid order number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderNumberError {
    /// Wrong overall length (or non-ASCII input)
    Length(usize),
    /// Missing `ORD-` prefix
    Prefix,
    /// Missing `-` between date and suffix
    Separator,
    /// Date segment is not a `YYYYMMDD` calendar date
    Date(String),
    /// Suffix is not a five-digit number in range
    Suffix(String),
}

impl fmt::Display for OrderNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderNumberError::Length(len) => {
                write!(f, "order number must be {} characters, got {}", LEN, len)
            }
            OrderNumberError::Prefix => write!(f, "order number must start with '{}'", PREFIX),
            OrderNumberError::Separator => write!(f, "missing '-' after date segment"),
            OrderNumberError::Date(d) => write!(f, "invalid date segment '{}'", d),
            OrderNumberError::Suffix(s) => write!(f, "invalid suffix '{}'", s),
        }
    }
}

impl std::error::Error for OrderNumberError {}
