use serde::{Deserialize, Serialize};

/// ISO currency code used when formatting money for display.
///
/// Income is tracked in Brazilian Real only, but currency is modelled
/// explicitly so formatting rules live in one place.
///
/// ## Minor units
///
/// `minor_units()` returns how many fraction digits an amount is rounded to
/// for display. Example: BRL has 2 minor units, so `10.504` shows as
/// `R$ 10,50`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Brl,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Brl => "BRL",
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Brl => "R$",
        }
    }

    /// Number of fraction digits used when formatting amounts.
    #[must_use]
    pub const fn minor_units(self) -> u8 {
        match self {
            Currency::Brl => 2,
        }
    }

    /// Thousands separator of the currency's display locale (pt-BR).
    #[must_use]
    pub const fn group_separator(self) -> char {
        match self {
            Currency::Brl => '.',
        }
    }

    #[must_use]
    pub const fn decimal_separator(self) -> char {
        match self {
            Currency::Brl => ',',
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}
