use crate::core::error::FetchError;
use crate::core::source::TransactionSource;
use crate::core::transaction::{RawTransaction, TransactionSet, normalize_records};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, instrument};

/// Fetches the transaction set from a JSON endpoint.
pub struct HttpTransactionSource {
    api_url: String,
    client: reqwest::Client,
}

impl HttpTransactionSource {
    pub fn new(api_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("txboard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            api_url: api_url.to_string(),
            client,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl TransactionSource for HttpTransactionSource {
    #[instrument(
        name = "TransactionFetch",
        skip(self),
        fields(url = %self.api_url)
    )]
    async fn fetch_all(&self) -> Result<TransactionSet, FetchError> {
        debug!("Requesting transactions from {}", self.api_url);

        let response = self
            .client
            .get(&self.api_url)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Transaction request failed");
                FetchError::transport(format!("Request error: {e} for URL: {}", self.api_url))
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(%status, "Transaction source returned an error status");
            return Err(FetchError::status(
                status.as_u16(),
                format!("Http failure response for {}: {status}", self.api_url),
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| FetchError::transport(format!("Failed to read response body: {e}")))?;

        let records: Vec<RawTransaction> = serde_json::from_str(&text).map_err(|e| {
            error!(error = ?e, "Failed to parse transactions response");
            FetchError::decode(format!(
                "Failed to parse JSON response from {}: {e}",
                self.api_url
            ))
        })?;

        let transactions = normalize_records(records).map_err(FetchError::decode)?;
        debug!(count = transactions.len(), "Fetched transactions");
        Ok(Arc::new(transactions))
    }
}
