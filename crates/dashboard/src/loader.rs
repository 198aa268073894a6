use api_types::income::IncomeDocument;
use engine::{DateEntry, DerivedSeries, EngineError, IncomeDataset, IncomeRecord, aggregate};

use crate::{client::Client, error::LoadError};

/// Converts the wire document into the engine's dataset, parsing every date
/// key. Amounts keep their fractions of a cent until they are formatted.
pub fn dataset_from_document(document: &IncomeDocument) -> Result<IncomeDataset, EngineError> {
    let entries = document
        .dates
        .iter()
        .map(|entry| {
            let records = entry
                .records
                .iter()
                .map(|record| IncomeRecord::from_major(record.name.clone(), record.gross, record.net))
                .collect::<Result<Vec<_>, _>>()?;
            DateEntry::new(entry.date.clone(), records)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(IncomeDataset::new(entries))
}

/// Loads the income document at `location` and computes its derived series.
///
/// Holds no state between calls: every call fetches and aggregates from
/// scratch.
pub async fn load_dashboard(client: &Client, location: &str) -> Result<DerivedSeries, LoadError> {
    let document = client.fetch_dataset(location).await?;
    let dataset = dataset_from_document(&document)?;
    tracing::debug!(
        "parsed {} dates with {} records",
        dataset.len(),
        dataset.record_count()
    );
    Ok(aggregate(&dataset)?)
}
