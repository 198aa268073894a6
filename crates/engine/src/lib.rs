//! Income aggregation engine.
//!
//! Turns an [`IncomeDataset`] (date keys mapped to per-category gross/net
//! records) into the [`DerivedSeries`] the dashboard renders: sorted dates,
//! categories, per-category values, per-date totals, day-over-day deltas and
//! the latest-period totals.

pub use aggregate::{
    CategorySeries, Delta, DerivedSeries, LatestTotals, aggregate, category_series,
    day_over_day, discover_categories, latest_totals, per_date_totals, sorted_dates,
};
pub use currency::Currency;
pub use dataset::{DateEntry, IncomeDataset, IncomeRecord, Totals};
pub use date::parse_date_key;
pub use error::EngineError;
pub use money::Money;

mod aggregate;
mod currency;
mod dataset;
mod date;
mod error;
mod money;

type ResultEngine<T> = Result<T, EngineError>;
