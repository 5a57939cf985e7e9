//! Monetary values.
//!
//! `Amount` is the signed value stored on a transaction and in the balance. `Magnitude` is the
//! unsigned value a user types in before it is given a sign by its `TransactionKind`.

use crate::error::{LedgerError, LedgerResult};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::ops::Neg;
use std::str::FromStr;

/// The currency symbol used when nothing else has been configured.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "€";

/// Characters accepted (and ignored) in front of a typed amount.
const CURRENCY_PREFIXES: [char; 4] = ['€', '$', '£', '¥'];

/// Controls how amounts are written for display.
///
/// # Examples
///  - `AmountFormat{ symbol: "€", commas: true }` -> `-€60,000.00`
///  - `AmountFormat{ symbol: "€", commas: false }` -> `-€60000.00`
///  - `AmountFormat{ symbol: "", commas: false }` -> `-60000.00`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AmountFormat {
    /// Printed between the sign and the digits.
    symbol: String,
    /// Whether commas are used as thousands separators.
    commas: bool,
}

impl Default for AmountFormat {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            commas: false,
        }
    }
}

impl AmountFormat {
    pub fn new(symbol: impl Into<String>, commas: bool) -> Self {
        Self {
            symbol: symbol.into(),
            commas,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn commas(&self) -> bool {
        self.commas
    }
}

/// A signed amount of money. Positive values are income, negative values are expenses.
///
/// Arithmetic is done on `Decimal` so that a long run of additions and subtractions never drifts
/// the way binary floating point would. In the persisted document an `Amount` is a plain JSON
/// number.
///
/// ```
/// # use budget_ledger::model::{Amount, AmountFormat};
/// # use rust_decimal::Decimal;
/// let amount = Amount::new(Decimal::new(-20050, 2));
/// assert_eq!(amount.format(&AmountFormat::default()), "-€200.50");
/// assert_eq!(amount.abs().format_signed(&AmountFormat::default()), "+€200.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is positive. Zero is neither positive nor negative.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.0.is_sign_positive()
    }

    /// Returns true if the amount is negative. Zero is neither positive nor negative.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.0.is_sign_negative()
    }

    pub fn abs(&self) -> Amount {
        Amount(self.0.abs())
    }

    /// Returns `None` instead of overflowing.
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    /// Returns `None` instead of overflowing.
    pub fn checked_sub(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_sub(rhs.0).map(Amount)
    }

    /// Writes the amount with a leading `-` for negative values only, e.g. `-€4.50`.
    pub fn format(&self, format: &AmountFormat) -> String {
        self.render(format, false)
    }

    /// Writes the amount with an explicit `+` or `-`, e.g. `+€1000.00`.
    pub fn format_signed(&self, format: &AmountFormat) -> String {
        self.render(format, true)
    }

    fn render(&self, format: &AmountFormat, explicit_plus: bool) -> String {
        let sign = if self.is_negative() {
            "-"
        } else if explicit_plus {
            "+"
        } else {
            ""
        };
        let digits = format!("{:.2}", self.0.abs().round_dp(2));
        let digits = if format.commas {
            group_thousands(&digits)
        } else {
            digits
        };
        format!("{sign}{}{digits}", format.symbol)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(&AmountFormat::default()))
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount(-self.0)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

/// Written as a JSON number with every digit kept, e.g. `-200.50`.
impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let number = serde_json::Number::from_str(&self.0.to_string()).map_err(|e| {
            serde::ser::Error::custom(format!("amount {} cannot be written: {e}", self.0))
        })?;
        number.serialize(serializer)
    }
}

/// Read from the text of the JSON number so that no precision is lost along the way.
impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let number = serde_json::Number::deserialize(deserializer)?;
        let text = number.to_string();
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .map(Amount)
            .map_err(|_| de::Error::custom(format!("{text} is out of range for an amount")))
    }
}

/// Inserts a comma between each group of three digits before the decimal point.
fn group_thousands(digits: &str) -> String {
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits, None),
    };
    let mut grouped = String::with_capacity(digits.len() + whole.len() / 3);
    for (ix, c) in whole.chars().enumerate() {
        if ix > 0 && (whole.len() - ix) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

/// The largest value a single transaction may carry. Keeping magnitudes well inside the range of
/// `Decimal` leaves room for the balance and category totals to grow.
pub const MAX_MAGNITUDE: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// The unsigned value entered by a user. It can never be negative or exceed [`MAX_MAGNITUDE`].
///
/// ```
/// # use budget_ledger::model::Magnitude;
/// # use std::str::FromStr;
/// assert!(Magnitude::from_str("€1,200.50").is_ok());
/// assert!(Magnitude::from_str("-5").is_err());
/// assert!(Magnitude::from_str("twelve").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Magnitude(Decimal);

impl Magnitude {
    pub fn new(value: Decimal) -> LedgerResult<Self> {
        if (value.is_sign_negative() && !value.is_zero()) || value > MAX_MAGNITUDE {
            return Err(LedgerError::InvalidAmount(value.to_string()));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn as_income(&self) -> Amount {
        Amount(self.0)
    }

    pub fn as_expense(&self) -> Amount {
        Amount(-self.0)
    }
}

impl TryFrom<f64> for Magnitude {
    type Error = LedgerError;

    fn try_from(value: f64) -> LedgerResult<Self> {
        if !value.is_finite() {
            return Err(LedgerError::InvalidAmount(value.to_string()));
        }
        let decimal =
            Decimal::from_f64(value).ok_or_else(|| LedgerError::InvalidAmount(value.to_string()))?;
        Magnitude::new(decimal)
    }
}

impl FromStr for Magnitude {
    type Err = LedgerError;

    fn from_str(s: &str) -> LedgerResult<Self> {
        let invalid = || LedgerError::InvalidAmount(s.trim().to_string());
        let trimmed = s.trim();
        let without_symbol = trimmed
            .strip_prefix(CURRENCY_PREFIXES)
            .unwrap_or(trimmed)
            .trim_start();
        let digits = strip_thousands(without_symbol).ok_or_else(invalid)?;
        if digits.is_empty() {
            return Err(invalid());
        }
        let value = Decimal::from_str(&digits).map_err(|_| invalid())?;
        Magnitude::new(value).map_err(|_| invalid())
    }
}

/// Removes thousands separators from typed digits. Commas are only accepted between groups of
/// three digits before the decimal point, so `1,200.50` is fine but `1,2` and `1,,0` are not.
fn strip_thousands(text: &str) -> Option<String> {
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text, None),
    };
    if fraction.is_some_and(|f| f.contains(',')) {
        return None;
    }
    if !whole.contains(',') {
        return Some(text.to_string());
    }
    let all_digits = |group: &str| group.chars().all(|c| c.is_ascii_digit());
    let mut groups = whole.split(',');
    let leading = groups.next().unwrap_or_default();
    if !(1..=3).contains(&leading.len()) || !all_digits(leading) {
        return None;
    }
    if !groups.all(|group| group.len() == 3 && all_digits(group)) {
        return None;
    }
    let mut digits = whole.replace(',', "");
    if let Some(fraction) = fraction {
        digits.push('.');
        digits.push_str(fraction);
    }
    Some(digits)
}

impl Display for Magnitude {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}
