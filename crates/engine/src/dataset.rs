use chrono::NaiveDateTime;

use crate::{EngineError, Money, ResultEngine, date::parse_date_key};

/// One income source on one date.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncomeRecord {
    pub category: String,
    pub gross: Money,
    pub net: Money,
}

impl IncomeRecord {
    pub fn new(category: impl Into<String>, gross: Money, net: Money) -> Self {
        Self {
            category: category.into(),
            gross,
            net,
        }
    }

    /// Builds a record from amounts in major units.
    pub fn from_major(category: impl Into<String>, gross: f64, net: f64) -> ResultEngine<Self> {
        Ok(Self::new(
            category,
            Money::from_major(gross)?,
            Money::from_major(net)?,
        ))
    }
}

/// Gross and net sums over a set of records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    pub gross: Money,
    pub net: Money,
}

impl Totals {
    /// Sums every record, failing instead of wrapping when a sum leaves the
    /// [`Money`] range.
    pub fn of<'a>(records: impl IntoIterator<Item = &'a IncomeRecord>) -> ResultEngine<Self> {
        records.into_iter().try_fold(Self::default(), |acc, record| {
            Ok(Self {
                gross: checked(acc.gross.checked_add(record.gross), "gross total")?,
                net: checked(acc.net.checked_add(record.net), "net total")?,
            })
        })
    }

    /// Difference `self - previous`, component-wise.
    pub fn change_since(self, previous: Totals) -> ResultEngine<Self> {
        Ok(Self {
            gross: checked(self.gross.checked_sub(previous.gross), "gross change")?,
            net: checked(self.net.checked_sub(previous.net), "net change")?,
        })
    }
}

fn checked(value: Option<Money>, what: &str) -> ResultEngine<Money> {
    value.ok_or_else(|| EngineError::Overflow(what.to_string()))
}

/// The records of a single date key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateEntry {
    pub key: String,
    pub instant: NaiveDateTime,
    pub records: Vec<IncomeRecord>,
}

impl DateEntry {
    pub fn new(key: impl Into<String>, records: Vec<IncomeRecord>) -> ResultEngine<Self> {
        let key = key.into();
        let instant = parse_date_key(&key)?;
        Ok(Self {
            key,
            instant,
            records,
        })
    }

    /// Looks up the record for `category` on this date.
    ///
    /// Names match exactly. When a category appears more than once on the
    /// same date the first record wins and the others are ignored.
    pub fn find(&self, category: &str) -> Option<&IncomeRecord> {
        self.records.iter().find(|record| record.category == category)
    }

    pub fn totals(&self) -> ResultEngine<Totals> {
        Totals::of(&self.records)
    }
}

/// Date keys and their records, in the order they were read.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IncomeDataset {
    entries: Vec<DateEntry>,
}

impl IncomeDataset {
    pub fn new(entries: Vec<DateEntry>) -> Self {
        Self { entries }
    }

    /// Builds a dataset from `(date key, records)` pairs, parsing every key.
    pub fn from_entries<K, I>(entries: I) -> ResultEngine<Self>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Vec<IncomeRecord>)>,
    {
        let entries = entries
            .into_iter()
            .map(|(key, records)| DateEntry::new(key, records))
            .collect::<ResultEngine<Vec<_>>>()?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[DateEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.records.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, gross: i64, net: i64) -> IncomeRecord {
        IncomeRecord::new(name, Money::from_cents(gross), Money::from_cents(net))
    }

    #[test]
    fn find_returns_first_match() {
        let entry = DateEntry::new(
            "2024-01-01",
            vec![record("Salary", 100, 80), record("Salary", 999, 999)],
        )
        .unwrap();
        assert_eq!(entry.find("Salary"), Some(&record("Salary", 100, 80)));
        assert_eq!(entry.find("salary"), None);
    }

    #[test]
    fn totals_of_empty_date_are_zero() {
        let entry = DateEntry::new("2024-01-01", Vec::new()).unwrap();
        assert_eq!(entry.totals(), Ok(Totals::default()));
    }

    #[test]
    fn totals_include_duplicates() {
        let entry = DateEntry::new(
            "2024-01-01",
            vec![record("Salary", 100, 80), record("Salary", 50, 40)],
        )
        .unwrap();
        assert_eq!(
            entry.totals(),
            Ok(Totals {
                gross: Money::from_cents(150),
                net: Money::from_cents(120),
            })
        );
    }

    #[test]
    fn totals_report_overflow() {
        let huge = IncomeRecord::from_major("Fundo", 6e12, 1.0).unwrap();
        let entry = DateEntry::new("2024-01-01", vec![huge.clone(), huge]).unwrap();
        assert_eq!(
            entry.totals(),
            Err(EngineError::Overflow("gross total".to_string()))
        );
    }

    #[test]
    fn change_since_reports_overflow() {
        let low = Totals {
            gross: Money::from_micros(i64::MIN),
            net: Money::ZERO,
        };
        let high = Totals {
            gross: Money::from_micros(1),
            net: Money::ZERO,
        };
        assert_eq!(
            high.change_since(low),
            Err(EngineError::Overflow("gross change".to_string()))
        );
        assert_eq!(
            low.change_since(low),
            Ok(Totals::default())
        );
    }

    #[test]
    fn from_entries_rejects_bad_keys() {
        let err = IncomeDataset::from_entries([("2024-01-01", Vec::new()), ("ontem", Vec::new())])
            .unwrap_err();
        assert_eq!(err, EngineError::InvalidDate("ontem".to_string()));
    }
}
