use async_trait::async_trait;
use tokio::time::{sleep_until, Instant};
use xdomain_common::json_rpc::RpcError;

use crate::config::RelayWaitConfig;
use crate::errors::RelayError;
use crate::structs::{
    DeliveryStatus, DestinationResult, MessageId, OutboundMessage, RelayObservation,
};

/// Read-only view of the domain a message is delivered to.
#[async_trait]
pub trait DestinationClient: Send + Sync {
    async fn message_status(&self, id: &MessageId) -> Result<DeliveryStatus, RpcError>;
}

/// Polls `client` until `message` reaches a terminal state or `deadline` passes.
///
/// Lookup errors are treated as transient and retried until more than
/// `config.max_retries` of them happened in a row.
pub async fn observe(
    client: &dyn DestinationClient,
    message: &OutboundMessage,
    config: &RelayWaitConfig,
    deadline: Instant,
) -> Result<(DestinationResult, RelayObservation), RelayError> {
    let started = Instant::now();
    let mut attempt: u32 = 0;
    let mut consecutive_errors: u32 = 0;

    loop {
        attempt += 1;
        match client.message_status(&message.id).await {
            Ok(status) => {
                consecutive_errors = 0;
                log::trace!("{} attempt={} {:?}", message.id, attempt, status);

                let observation = RelayObservation {
                    id: message.id,
                    status: status.clone(),
                    attempt,
                };
                match status {
                    DeliveryStatus::Executed(result) => {
                        log::info!(
                            "{} relayed {} via {:?} after {} attempt(s)",
                            message.direction,
                            message.id,
                            result.tx_hash,
                            attempt
                        );
                        return Ok((result, observation));
                    }
                    DeliveryStatus::Failed(result) => {
                        log::warn!(
                            "{} message {} failed in {:?}",
                            message.direction,
                            message.id,
                            result.tx_hash
                        );
                        return Err(RelayError::MessageExecutionFailed {
                            id: message.id,
                            result,
                        });
                    }
                    DeliveryStatus::NotFound | DeliveryStatus::Pending => {}
                }
            }
            Err(err) => {
                consecutive_errors += 1;
                log::warn!(
                    "lookup of {} failed ({}/{}): {}",
                    message.id,
                    consecutive_errors,
                    config.max_retries,
                    err
                );
                if consecutive_errors > config.max_retries {
                    return Err(RelayError::RelayObservationError {
                        id: message.id,
                        attempts: consecutive_errors,
                        source: err,
                    });
                }
            }
        }

        let now = Instant::now();
        if now >= deadline {
            return Err(RelayError::RelayTimeout {
                elapsed_ms: now.duration_since(started).as_millis(),
                messages: 1,
            });
        }
        sleep_until(std::cmp::min(now + config.poll_interval, deadline)).await;
    }
}
