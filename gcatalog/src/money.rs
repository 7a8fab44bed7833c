//! Whole-cent money amounts.

use std::fmt::{Display, Formatter};

/// An amount in US cents. Displays as `$1299.00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn from_dollars(dollars: i64) -> Self {
        Self(dollars * 100)
    }

    /// Rounds a fractional dollar amount to the nearest cent. `None` when the
    /// amount is not finite or does not fit in a cent count.
    pub fn try_from_dollars_f64(dollars: f64) -> Option<Self> {
        let cents = (dollars * 100.0).round();
        // i64::MAX as f64 rounds up to 2^63, which is already out of range.
        if !cents.is_finite() || cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Dollars without cents and with thousands separators, e.g. `$1,299`.
    pub fn whole_dollars(self) -> String {
        let dollars = (self.0 / 100).unsigned_abs().to_string();
        let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
        for (index, digit) in dollars.chars().enumerate() {
            if index > 0 && (dollars.len() - index) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{sign}${grouped}")
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", cents / 100, cents % 100)
    }
}
