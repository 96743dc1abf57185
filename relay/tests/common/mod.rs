#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use ethers_core::abi::{encode, Token, Tokenizable};
use ethers_core::types::{Address, Bytes, Log, H256, U256, U64};
use tokio::time::Instant;
use xdomain_common::json_rpc::{JsonRpcError, RpcError};
use xdomain_relay::messenger::MessengerAbi;
use xdomain_relay::observer::DestinationClient;
use xdomain_relay::source::SourceClient;
use xdomain_relay::structs::*;

pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .is_test(true)
        .try_init();
}

pub fn messenger_addr() -> Address {
    "0x4200000000000000000000000000000000000007".parse().unwrap()
}

pub fn random_message() -> (Address, Address, Bytes, U256) {
    let target = random_address();
    let sender = random_address();
    let message = Bytes::from(rand::random::<[u8; 32]>().to_vec());
    let nonce: U256 = rand::random::<u64>().into();

    (target, sender, message, nonce)
}

/// A `SentMessage` log as emitted by the messenger at `emitter`.
pub fn sent_message_log(
    emitter: Address,
    target: Address,
    sender: Address,
    message: &Bytes,
    nonce: U256,
) -> Log {
    let abi = MessengerAbi::default();
    let data = encode(&[
        sender.into_token(),
        Token::Bytes(message.to_vec()),
        nonce.into_token(),
        U256::from(5_000_000u64).into_token(),
    ]);

    Log {
        address: emitter,
        topics: vec![abi.sent_message_topic, H256::from(target)],
        data: Bytes::from(data),
        ..Default::default()
    }
}

pub fn source_result(success: bool, logs: Vec<Log>) -> SourceTransactionResult {
    SourceTransactionResult {
        tx_hash: random_hash(),
        block_hash: Some(random_hash()),
        block_number: Some(U64::from(10u64)),
        success,
        logs,
    }
}

/// Source receipt with `n` random messages from [`messenger_addr`].
pub fn source_with_messages(n: usize) -> (SourceTransactionResult, Vec<MessageId>) {
    let mut logs = vec![];
    let mut ids = vec![];
    for _ in 0..n {
        let (target, sender, message, nonce) = random_message();
        logs.push(sent_message_log(messenger_addr(), target, sender, &message, nonce));
        ids.push(OutboundMessage::compute_id(target, sender, &message, nonce));
    }

    (source_result(true, logs), ids)
}

pub fn destination_result(success: bool) -> DestinationResult {
    DestinationResult {
        tx_hash: random_hash(),
        block_hash: Some(random_hash()),
        block_number: Some(U64::from(20u64)),
        success,
        gas_used: Some(U256::from(21_000u64)),
    }
}

#[derive(Clone, Debug)]
pub struct Script {
    /// status becomes visible at `start + after`
    pub after: Duration,
    pub status: DeliveryStatus,
    /// lookups failing before the first successful one
    pub errors: u32,
}

/// Destination domain that replays a fixed schedule per message.
pub struct ScriptedDestination {
    pub start: Instant,
    pub scripts: HashMap<MessageId, Script>,
    pub calls: Mutex<HashMap<MessageId, u32>>,
}

impl ScriptedDestination {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            scripts: HashMap::new(),
            calls: Mutex::new(HashMap::new()),
        }
    }

    pub fn executed_after(
        mut self,
        id: MessageId,
        after: Duration,
        result: DestinationResult,
    ) -> Self {
        self.scripts.insert(
            id,
            Script {
                after,
                status: DeliveryStatus::Executed(result),
                errors: 0,
            },
        );
        self
    }

    pub fn failed_after(
        mut self,
        id: MessageId,
        after: Duration,
        result: DestinationResult,
    ) -> Self {
        self.scripts.insert(
            id,
            Script {
                after,
                status: DeliveryStatus::Failed(result),
                errors: 0,
            },
        );
        self
    }

    pub fn with_errors(mut self, id: MessageId, errors: u32) -> Self {
        if let Some(script) = self.scripts.get_mut(&id) {
            script.errors = errors;
        }
        self
    }

    pub fn calls(&self, id: &MessageId) -> u32 {
        *self.calls.lock().unwrap().get(id).unwrap_or(&0)
    }

    pub fn total_calls(&self) -> u32 {
        self.calls.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl DestinationClient for ScriptedDestination {
    async fn message_status(&self, id: &MessageId) -> Result<DeliveryStatus, RpcError> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            let call = calls.entry(*id).or_insert(0);
            *call += 1;
            *call
        };

        let script = match self.scripts.get(id) {
            Some(script) => script,
            None => return Ok(DeliveryStatus::NotFound),
        };
        if call <= script.errors {
            return Err(RpcError::Remote(JsonRpcError {
                code: -32000,
                message: "header not found".to_string(),
            }));
        }
        if self.start.elapsed() < script.after {
            return Ok(DeliveryStatus::Pending);
        }

        Ok(script.status.clone())
    }
}

/// Source domain that reports the transaction as mined after `mined_after`.
pub struct DelayedSource {
    pub start: Instant,
    pub mined_after: Duration,
    pub result: SourceTransactionResult,
    pub calls: Mutex<u32>,
}

impl DelayedSource {
    pub fn new(result: SourceTransactionResult, mined_after: Duration) -> Self {
        Self {
            start: Instant::now(),
            mined_after,
            result,
            calls: Mutex::new(0),
        }
    }
}

#[async_trait]
impl SourceClient for DelayedSource {
    async fn transaction_result(
        &self,
        tx_hash: H256,
    ) -> Result<Option<SourceTransactionResult>, RpcError> {
        *self.calls.lock().unwrap() += 1;
        assert_eq!(tx_hash, self.result.tx_hash, "unexpected tx hash");

        if self.start.elapsed() < self.mined_after {
            return Ok(None);
        }

        Ok(Some(self.result.clone()))
    }
}

pub fn random_address() -> Address {
    Address::from(rand::random::<[u8; 20]>())
}

pub fn random_hash() -> H256 {
    H256::from(rand::random::<[u8; 32]>())
}

/// Source domain whose node never answers.
pub struct BrokenSource {
    pub calls: Mutex<u32>,
}

#[async_trait]
impl SourceClient for BrokenSource {
    async fn transaction_result(
        &self,
        _tx_hash: H256,
    ) -> Result<Option<SourceTransactionResult>, RpcError> {
        *self.calls.lock().unwrap() += 1;

        Err(RpcError::Remote(JsonRpcError {
            code: -32603,
            message: "connection refused".to_string(),
        }))
    }
}
