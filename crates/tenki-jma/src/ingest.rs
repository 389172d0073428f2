//! Forecast ingestion: fetch one office's short-range forecast, normalize
//! it, and write it through the store.

use crate::client::JmaClient;
use crate::error::WeatherError;
use crate::forecast::extract_records;
use crate::store::ForecastStore;
use crate::types::ForecastRecord;

pub struct Ingestor<'a> {
    client: &'a JmaClient,
    store: &'a ForecastStore,
}

impl<'a> Ingestor<'a> {
    pub fn new(client: &'a JmaClient, store: &'a ForecastStore) -> Self {
        Self { client, store }
    }

    /// Fetch, normalize, and cache up to five days for `area_code`.
    ///
    /// Every extracted record is written through before returning. A record
    /// colliding with an existing `(area_code, date)` row is skipped without
    /// touching the existing row; the returned records are the freshly
    /// extracted ones either way. Fetch or schema failures propagate
    /// unmodified and leave no partial record set behind.
    pub async fn ingest(&self, area_code: &str) -> Result<Vec<ForecastRecord>, WeatherError> {
        let documents = self.client.fetch_forecast(area_code).await?;
        let records = extract_records(&documents, area_code)?;

        for record in &records {
            self.store.upsert(record)?;
        }

        tracing::info!(area_code, days = records.len(), "forecast ingested");
        Ok(records)
    }
}
