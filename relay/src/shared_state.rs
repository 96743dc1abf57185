use std::collections::{HashMap, VecDeque};
use std::env::var;
use std::sync::Arc;

use ethers_core::types::{Address, H256};
use hyper::client::HttpConnector;
use hyper::Uri;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::time::Instant;
use xdomain_common::json_rpc::RpcError;

use crate::config::RelayWaitConfig;
use crate::errors::RelayError;
use crate::extract::MessageExtractor;
use crate::observer::DestinationClient;
use crate::rpc::JsonRpcDomain;
use crate::source::{wait_for_source_result, SourceClient};
use crate::structs::*;
use crate::waiter::{wait_for_messages, RelayResults};

pub struct RoState {
    pub http_client: hyper::Client<HttpConnector>,
    pub l1: JsonRpcDomain,
    pub l2: JsonRpcDomain,
}

/// Default number of relayed messages remembered by [`RwState`].
pub const RELAYED_CACHE_CAPACITY: usize = 4096;

pub struct RwState {
    /// messages already seen executed on their destination,
    /// the oldest entries are evicted past `capacity`
    pub relayed: HashMap<MessageId, DestinationResult>,
    relayed_order: VecDeque<MessageId>,
    capacity: usize,
}

impl Default for RwState {
    fn default() -> Self {
        Self::with_capacity(RELAYED_CACHE_CAPACITY)
    }
}

impl RwState {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            relayed: HashMap::new(),
            relayed_order: VecDeque::new(),
            capacity,
        }
    }

    pub fn remember(&mut self, id: MessageId, result: DestinationResult) {
        if self.relayed.insert(id, result).is_none() {
            self.relayed_order.push_back(id);
        }
        while self.relayed_order.len() > self.capacity {
            if let Some(oldest) = self.relayed_order.pop_front() {
                self.relayed.remove(&oldest);
            }
        }
    }
}

#[derive(Clone)]
pub struct SharedState {
    pub ro: Arc<RoState>,
    pub rw: Arc<Mutex<RwState>>,
}

/// Result of [`SharedState::wait_for_xdomain_transaction`].
#[derive(Clone, Debug)]
pub struct CrossDomainReceipt {
    pub direction: Direction,
    pub source: SourceTransactionResult,
    /// the awaited messages, in emission order
    pub messages: Vec<OutboundMessage>,
    pub remote: RelayResults,
}

impl CrossDomainReceipt {
    /// Destination result of the first awaited message.
    pub fn remote_receipt(&self) -> Option<&DestinationResult> {
        self.messages.first().and_then(|msg| self.remote.get(&msg.id))
    }
}

impl SharedState {
    pub fn new(
        l1_url: Uri,
        l1_messenger: Address,
        l2_url: Uri,
        l2_messenger: Address,
    ) -> SharedState {
        let http_client = hyper::Client::new();

        Self {
            ro: Arc::new(RoState {
                l1: JsonRpcDomain::new(http_client.clone(), l1_url, l1_messenger),
                l2: JsonRpcDomain::new(http_client.clone(), l2_url, l2_messenger),
                http_client,
            }),
            rw: Arc::new(Mutex::new(RwState::default())),
        }
    }

    /// Bounds the number of relayed messages served without polling.
    pub fn with_cache_capacity(self, capacity: usize) -> SharedState {
        Self {
            ro: self.ro,
            rw: Arc::new(Mutex::new(RwState::with_capacity(capacity))),
        }
    }

    /// Reads `L1_RPC_URL`, `L2_RPC_URL`, `L1_MESSENGER` and `L2_MESSENGER`.
    pub fn from_env() -> Result<SharedState, String> {
        fn env<T: std::str::FromStr>(name: &str) -> Result<T, String>
        where
            T::Err: std::fmt::Display,
        {
            var(name)
                .map_err(|_| format!("{name} env var"))?
                .parse::<T>()
                .map_err(|err| format!("{name}: {err}"))
        }

        Ok(Self::new(
            env::<Uri>("L1_RPC_URL")?,
            env::<Address>("L1_MESSENGER")?,
            env::<Uri>("L2_RPC_URL")?,
            env::<Address>("L2_MESSENGER")?,
        ))
    }

    pub async fn request_l1<T: Serialize + Send + Sync, R: DeserializeOwned>(
        &self,
        method: &str,
        params: T,
    ) -> Result<R, RpcError> {
        self.ro.l1.request(method, params).await
    }

    pub async fn request_l2<T: Serialize + Send + Sync, R: DeserializeOwned>(
        &self,
        method: &str,
        params: T,
    ) -> Result<R, RpcError> {
        self.ro.l2.request(method, params).await
    }

    /// Returns the (source, destination) layers for `direction`.
    pub fn domains(&self, direction: Direction) -> (&JsonRpcDomain, &JsonRpcDomain) {
        match direction {
            Direction::L1ToL2 => (&self.ro.l1, &self.ro.l2),
            Direction::L2ToL1 => (&self.ro.l2, &self.ro.l1),
        }
    }

    pub fn extractor(&self, direction: Direction) -> MessageExtractor {
        let (source, _) = self.domains(direction);
        MessageExtractor::with_abi(source.messenger, direction, source.abi.clone())
    }

    /// Waits for `tx_hash` to be mined on the source layer and for its messages
    /// to be executed on the other one.
    pub async fn wait_for_xdomain_transaction(
        &self,
        tx_hash: H256,
        direction: Direction,
        config: &RelayWaitConfig,
    ) -> Result<CrossDomainReceipt, RelayError> {
        let (source, destination) = self.domains(direction);
        self.wait_with(source, destination, tx_hash, direction, config)
            .await
    }

    /// [`Self::wait_for_xdomain_transaction`] against arbitrary domain clients.
    /// Both waits share the `config.max_wait` budget.
    pub async fn wait_with(
        &self,
        source: &dyn SourceClient,
        destination: &dyn DestinationClient,
        tx_hash: H256,
        direction: Direction,
        config: &RelayWaitConfig,
    ) -> Result<CrossDomainReceipt, RelayError> {
        let started = Instant::now();
        let source_result = wait_for_source_result(
            source,
            tx_hash,
            config.poll_interval,
            config.max_retries,
            started + config.max_wait,
        )
        .await?;

        let messages = config
            .filter
            .select(self.extractor(direction).extract(&source_result)?);
        log::info!(
            "{} tx {:?} emitted {} awaited message(s)",
            direction,
            tx_hash,
            messages.len()
        );

        let mut remote = RelayResults::new();
        let mut todo = vec![];
        {
            let rw = self.rw.lock().await;
            for msg in messages.iter() {
                match rw.relayed.get(&msg.id) {
                    Some(result) => {
                        log::debug!("{} already relayed", msg.id);
                        remote.insert(msg.id, result.clone());
                    }
                    None => todo.push(msg.clone()),
                }
            }
        }

        let remaining = config.max_wait.saturating_sub(started.elapsed());
        let config = config.clone().with_max_wait(remaining);
        let fresh = wait_for_messages(destination, &todo, &config).await?;
        {
            let mut rw = self.rw.lock().await;
            for (id, result) in fresh.iter() {
                rw.remember(*id, result.clone());
            }
        }
        remote.extend(fresh);

        Ok(CrossDomainReceipt {
            direction,
            source: source_result,
            messages,
            remote,
        })
    }
}
