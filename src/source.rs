use super::*;

/// Read-only view of the upstream item tree.
///
/// `Ok(None)` means the upstream answered cleanly that there is nothing at
/// that location. Transport failures and unexpected statuses are errors.
#[async_trait]
pub(crate) trait Source: Send + Sync {
  async fn fetch_ids(&self, endpoint: &str) -> Result<Option<Vec<u64>>>;

  async fn fetch_item(&self, id: u64) -> Result<Option<ItemRecord>>;
}
