use std::fmt;

use crate::{Currency, EngineError, ResultEngine};

const MICROS_PER_MAJOR: i64 = 1_000_000;
const MICROS_PER_CENT: i64 = 10_000;

/// Signed money amount represented as an integer number of **micro-units**
/// (millionths of a real).
///
/// Amounts keep sub-cent precision through sums and differences; rounding to
/// the currency's minor units only happens in [`Money::format`] and
/// [`Money::cents`].
///
/// # Examples
///
/// ```rust
/// use engine::{Currency, Money};
///
/// let amount = Money::from_cents(1_200_00);
/// assert_eq!(amount.cents(), 120000);
/// assert_eq!(amount.format(Currency::Brl), "R$ 1.200,00");
/// ```
///
/// Conversion from JSON numbers keeps fractions of a cent:
///
/// ```rust
/// use engine::{Currency, Money};
///
/// let tiny = Money::from_major(0.004).unwrap();
/// assert_eq!(tiny.micros(), 4_000);
/// assert_eq!(tiny.to_major(), 0.004);
/// assert_eq!(tiny.format(Currency::Brl), "R$ 0,00");
/// assert!(Money::from_major(f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates an amount from whole cents.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents.saturating_mul(MICROS_PER_CENT))
    }

    #[must_use]
    pub const fn from_micros(micros: i64) -> Self {
        Self(micros)
    }

    /// Converts an amount in major units (reais), rounding to the nearest
    /// micro-unit.
    pub fn from_major(value: f64) -> ResultEngine<Self> {
        if !value.is_finite() {
            return Err(EngineError::InvalidAmount(format!("{value} is not finite")));
        }
        let micros = (value * MICROS_PER_MAJOR as f64).round();
        if micros >= i64::MAX as f64 || micros <= i64::MIN as f64 {
            return Err(EngineError::InvalidAmount(format!("{value} is too large")));
        }
        Ok(Self(micros as i64))
    }

    #[must_use]
    pub const fn micros(self) -> i64 {
        self.0
    }

    /// Whole cents, rounded half away from zero.
    #[must_use]
    pub const fn cents(self) -> i64 {
        round_div(self.0, MICROS_PER_CENT)
    }

    /// Returns the value in major units, as handed to charts.
    #[must_use]
    pub fn to_major(self) -> f64 {
        self.0 as f64 / MICROS_PER_MAJOR as f64
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Formats the amount the way the currency's locale displays it, rounded
    /// half away from zero to the currency's minor units.
    ///
    /// BRL follows pt-BR: `R$ 1.234,56`, `-R$ 5,00`.
    #[must_use]
    pub fn format(self, currency: Currency) -> String {
        let divisor = 10i64.pow(u32::from(currency.minor_units()));
        let minor_units = round_div(self.0, MICROS_PER_MAJOR / divisor);
        let sign = if minor_units < 0 { "-" } else { "" };
        let abs = minor_units.unsigned_abs();
        let divisor = divisor.unsigned_abs();
        let major = group_thousands(abs / divisor, currency.group_separator());
        let minor = abs % divisor;
        format!(
            "{sign}{symbol} {major}{decimal}{minor:0width$}",
            symbol = currency.symbol(),
            decimal = currency.decimal_separator(),
            width = usize::from(currency.minor_units()),
        )
    }
}

const fn round_div(value: i64, divisor: i64) -> i64 {
    let quotient = value / divisor;
    let remainder = value % divisor;
    if remainder.unsigned_abs() * 2 >= divisor.unsigned_abs() {
        if value < 0 { quotient - 1 } else { quotient + 1 }
    } else {
        quotient
    }
}

fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(Currency::default()))
    }
}
