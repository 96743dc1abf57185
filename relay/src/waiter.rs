use std::collections::BTreeMap;

use futures::future::try_join_all;
use tokio::time::{timeout_at, Instant};

use crate::config::RelayWaitConfig;
use crate::errors::RelayError;
use crate::extract::MessageExtractor;
use crate::observer::{observe, DestinationClient};
use crate::structs::{DestinationResult, MessageId, OutboundMessage, SourceTransactionResult};

pub type RelayResults = BTreeMap<MessageId, DestinationResult>;

/// Waits until every selected message of `source` is executed on the destination domain.
///
/// Fails fast: the first observer error cancels the remaining observers. When
/// `config.max_wait` elapses the whole call fails with `RelayTimeout` and results
/// of messages that already finished are discarded.
pub async fn wait_for_relay(
    extractor: &MessageExtractor,
    destination: &dyn DestinationClient,
    source: &SourceTransactionResult,
    config: &RelayWaitConfig,
) -> Result<RelayResults, RelayError> {
    let messages = config.filter.select(extractor.extract(source)?);
    wait_for_messages(destination, &messages, config).await
}

/// Same as [`wait_for_relay`] for messages that were already extracted.
pub async fn wait_for_messages(
    destination: &dyn DestinationClient,
    messages: &[OutboundMessage],
    config: &RelayWaitConfig,
) -> Result<RelayResults, RelayError> {
    let mut unique: Vec<&OutboundMessage> = Vec::with_capacity(messages.len());
    for msg in messages {
        if !unique.iter().any(|m| m.id == msg.id) {
            unique.push(msg);
        }
    }

    if unique.is_empty() {
        return Ok(RelayResults::new());
    }

    let started = Instant::now();
    let deadline = started + config.max_wait;
    log::info!(
        "waiting for {} message(s), max_wait={:?} poll_interval={:?}",
        unique.len(),
        config.max_wait,
        config.poll_interval
    );

    let observers = unique
        .iter()
        .map(|msg| observe(destination, msg, config, deadline));

    let results = match timeout_at(deadline, try_join_all(observers)).await {
        Ok(res) => res.map_err(|err| match err {
            RelayError::RelayTimeout { elapsed_ms, .. } => RelayError::RelayTimeout {
                elapsed_ms,
                messages: unique.len(),
            },
            err => err,
        })?,
        Err(_) => {
            return Err(RelayError::RelayTimeout {
                elapsed_ms: started.elapsed().as_millis(),
                messages: unique.len(),
            })
        }
    };

    Ok(results
        .into_iter()
        .map(|(result, observation)| (observation.id, result))
        .collect())
}
