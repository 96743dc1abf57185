use async_trait::async_trait;
use ethers_core::types::H256;
use tokio::time::{sleep_until, Instant};
use xdomain_common::json_rpc::RpcError;

use crate::errors::RelayError;
use crate::structs::SourceTransactionResult;

/// Read-only view of the domain a transaction was submitted to.
#[async_trait]
pub trait SourceClient: Send + Sync {
    /// `Ok(None)` while the transaction is not yet mined.
    async fn transaction_result(
        &self,
        tx_hash: H256,
    ) -> Result<Option<SourceTransactionResult>, RpcError>;
}

/// Can loop until `deadline`, polls every `poll_interval`.
///
/// More than `max_retries` failed lookups in a row surface as `RelayError::Rpc`.
pub async fn wait_for_source_result(
    client: &dyn SourceClient,
    tx_hash: H256,
    poll_interval: std::time::Duration,
    max_retries: u32,
    deadline: Instant,
) -> Result<SourceTransactionResult, RelayError> {
    let started = Instant::now();
    let mut consecutive_errors: u32 = 0;

    loop {
        match client.transaction_result(tx_hash).await {
            Ok(Some(result)) => {
                log::debug!(
                    "source tx {:?} mined in block {:?} success={}",
                    tx_hash,
                    result.block_number,
                    result.success
                );
                return Ok(result);
            }
            Ok(None) => {
                consecutive_errors = 0;
                log::debug!("source tx {:?} not yet mined", tx_hash);
            }
            Err(err) => {
                consecutive_errors += 1;
                log::warn!(
                    "source receipt for {:?} ({}/{}): {}",
                    tx_hash,
                    consecutive_errors,
                    max_retries,
                    err
                );
                if consecutive_errors > max_retries {
                    return Err(RelayError::Rpc(err));
                }
            }
        }

        let now = Instant::now();
        if now >= deadline {
            return Err(RelayError::RelayTimeout {
                elapsed_ms: now.duration_since(started).as_millis(),
                messages: 0,
            });
        }
        sleep_until(std::cmp::min(now + poll_interval, deadline)).await;
    }
}
