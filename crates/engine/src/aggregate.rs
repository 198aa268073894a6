//! Pure aggregation from an [`IncomeDataset`] to the series the dashboard
//! draws.
//!
//! Everything here is recomputed from scratch on every load; nothing is
//! cached or mutated afterwards.

use std::collections::HashSet;

use crate::{
    DateEntry, EngineError, IncomeDataset, Money, ResultEngine, Totals,
};

/// Gross and net values of one category across the sorted dates.
///
/// `None` marks a date with no record for the category. A record with a zero
/// amount is `Some(Money::ZERO)`; the two cases are not otherwise told apart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategorySeries {
    pub name: String,
    pub gross: Vec<Option<Money>>,
    pub net: Vec<Option<Money>>,
}

/// Change of the per-date totals from the previous date to `date`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delta {
    pub date: String,
    pub gross: Money,
    pub net: Money,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LatestTotals {
    pub date: String,
    pub totals: Totals,
}

/// All aggregates consumed by the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerivedSeries {
    /// Date keys, ascending by calendar instant.
    pub dates: Vec<String>,
    /// Distinct category names in first-seen order.
    pub categories: Vec<String>,
    /// One entry per category, same order as `categories`.
    pub category_series: Vec<CategorySeries>,
    /// One entry per date, same order as `dates`.
    pub totals: Vec<Totals>,
    /// `dates.len() - 1` entries, labelled with the later date of each pair.
    pub deltas: Vec<Delta>,
    pub latest: LatestTotals,
}

impl DerivedSeries {
    pub fn gross_totals(&self) -> impl Iterator<Item = Money> + '_ {
        self.totals.iter().map(|totals| totals.gross)
    }

    pub fn net_totals(&self) -> impl Iterator<Item = Money> + '_ {
        self.totals.iter().map(|totals| totals.net)
    }
}

/// Orders the date entries by calendar instant.
///
/// The sort is stable: keys denoting the same instant keep document order.
pub fn sorted_dates(dataset: &IncomeDataset) -> Vec<&DateEntry> {
    let mut entries: Vec<&DateEntry> = dataset.entries().iter().collect();
    entries.sort_by_key(|entry| entry.instant);
    entries
}

/// Collects category names in the order they are first seen, scanning the
/// given dates in order and each date's records in list order.
pub fn discover_categories(entries: &[&DateEntry]) -> Vec<String> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .flat_map(|entry| entry.records.iter())
        .filter(|record| seen.insert(record.category.as_str()))
        .map(|record| record.category.clone())
        .collect()
}

/// Builds the per-date gross/net values of each category.
pub fn category_series(entries: &[&DateEntry], categories: &[String]) -> Vec<CategorySeries> {
    categories
        .iter()
        .map(|name| {
            let (gross, net) = entries
                .iter()
                .map(|entry| match entry.find(name) {
                    Some(record) => (Some(record.gross), Some(record.net)),
                    None => (None, None),
                })
                .unzip();
            CategorySeries {
                name: name.clone(),
                gross,
                net,
            }
        })
        .collect()
}

pub fn per_date_totals(entries: &[&DateEntry]) -> ResultEngine<Vec<Totals>> {
    entries.iter().map(|entry| entry.totals()).collect()
}

/// Differences between consecutive totals.
///
/// `dates` and `totals` are parallel; the result has `max(0, n - 1)` entries
/// and the first date never appears in it.
pub fn day_over_day(dates: &[String], totals: &[Totals]) -> ResultEngine<Vec<Delta>> {
    dates
        .iter()
        .zip(totals)
        .collect::<Vec<_>>()
        .windows(2)
        .map(|pair| {
            let (_, previous) = pair[0];
            let (date, current) = pair[1];
            let change = current.change_since(*previous)?;
            Ok(Delta {
                date: date.clone(),
                gross: change.gross,
                net: change.net,
            })
        })
        .collect()
}

/// Totals of the last date in sorted order.
pub fn latest_totals(entries: &[&DateEntry]) -> ResultEngine<LatestTotals> {
    let last = entries.last().ok_or(EngineError::EmptyDataset)?;
    Ok(LatestTotals {
        date: last.key.clone(),
        totals: last.totals()?,
    })
}

/// Computes every derived series for `dataset`.
///
/// Fails with [`EngineError::EmptyDataset`] when there are no dates and with
/// [`EngineError::Overflow`] when a total or delta leaves the [`Money`] range.
pub fn aggregate(dataset: &IncomeDataset) -> ResultEngine<DerivedSeries> {
    let entries = sorted_dates(dataset);
    let latest = latest_totals(&entries)?;

    let dates: Vec<String> = entries.iter().map(|entry| entry.key.clone()).collect();
    let categories = discover_categories(&entries);
    let category_series = category_series(&entries, &categories);
    let totals = per_date_totals(&entries)?;
    let deltas = day_over_day(&dates, &totals)?;

    Ok(DerivedSeries {
        dates,
        categories,
        category_series,
        totals,
        deltas,
        latest,
    })
}
