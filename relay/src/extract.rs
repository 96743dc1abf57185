use ethers_core::abi::{Event, RawLog, Token};
use ethers_core::types::{Address, Bytes, Log};

use crate::errors::RelayError;
use crate::messenger::MessengerAbi;
use crate::structs::{Direction, OutboundMessage, SourceTransactionResult};

/// Pulls the `SentMessage` events of one messenger contract out of a source receipt.
#[derive(Clone, Debug)]
pub struct MessageExtractor {
    pub messenger: Address,
    pub direction: Direction,
    abi: MessengerAbi,
}

impl MessageExtractor {
    pub fn new(messenger: Address, direction: Direction) -> Self {
        Self::with_abi(messenger, direction, MessengerAbi::default())
    }

    pub fn with_abi(messenger: Address, direction: Direction, abi: MessengerAbi) -> Self {
        Self {
            messenger,
            direction,
            abi,
        }
    }

    /// Returns the messages in emission order.
    pub fn extract(
        &self,
        source: &SourceTransactionResult,
    ) -> Result<Vec<OutboundMessage>, RelayError> {
        if !source.success {
            return Err(RelayError::InvalidSourceTransaction(format!(
                "transaction {:?} did not succeed",
                source.tx_hash
            )));
        }

        let evt = self
            .abi
            .abi
            .event("SentMessage")
            .map_err(|err| RelayError::InvalidSourceTransaction(err.to_string()))?;

        let mut messages = vec![];
        for (log_index, log) in source.logs.iter().enumerate() {
            if log.address != self.messenger
                || log.topics.first() != Some(&self.abi.sent_message_topic)
            {
                continue;
            }

            let msg = self.decode(evt, log, log_index).map_err(|err| {
                RelayError::InvalidSourceTransaction(format!(
                    "SentMessage at index {} in {:?}: {}",
                    log_index, source.tx_hash, err
                ))
            })?;
            log::debug!("{} SentMessage: {} nonce={}", self.direction, msg.id, msg.nonce);
            messages.push(msg);
        }

        Ok(messages)
    }

    fn decode(&self, evt: &Event, log: &Log, log_index: usize) -> Result<OutboundMessage, String> {
        let evt = evt
            .parse_log(RawLog::from((log.topics.clone(), log.data.to_vec())))
            .map_err(|err| err.to_string())?;

        let param = |name: &str| -> Result<Token, String> {
            evt.params
                .iter()
                .find(|p| p.name == name)
                .map(|p| p.value.to_owned())
                .ok_or_else(|| format!("missing param {name}"))
        };
        let target = param("target")?.into_address().ok_or("target")?;
        let sender = param("sender")?.into_address().ok_or("sender")?;
        let message = Bytes::from(param("message")?.into_bytes().ok_or("message")?);
        let nonce = param("messageNonce")?.into_uint().ok_or("messageNonce")?;
        let gas_limit = param("gasLimit")?.into_uint().ok_or("gasLimit")?;

        Ok(OutboundMessage {
            id: OutboundMessage::compute_id(target, sender, &message, nonce),
            direction: self.direction,
            target,
            sender,
            message,
            nonce,
            gas_limit,
            log_index,
        })
    }
}
