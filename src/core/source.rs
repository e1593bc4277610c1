//! Abstraction over where transactions come from

use crate::core::error::FetchError;
use crate::core::transaction::TransactionSet;
use async_trait::async_trait;

#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Fetches the complete transaction set.
    async fn fetch_all(&self) -> Result<TransactionSet, FetchError>;
}
