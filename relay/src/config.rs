use std::time::Duration;

use clap::Parser;
use ethers_core::types::{Address, H256};
use hyper::Uri;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};

use crate::structs::{Direction, MessageId, OutboundMessage};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_millis(120_000);
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Selects which of the extracted messages are waited on.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageFilter {
    #[default]
    All,
    First,
    /// positions in emission order
    Indices(Vec<usize>),
    Ids(Vec<MessageId>),
}

impl MessageFilter {
    pub fn select(&self, messages: Vec<OutboundMessage>) -> Vec<OutboundMessage> {
        match self {
            MessageFilter::All => messages,
            MessageFilter::First => messages.into_iter().take(1).collect(),
            MessageFilter::Indices(indices) => messages
                .into_iter()
                .enumerate()
                .filter(|(i, _)| indices.contains(i))
                .map(|(_, msg)| msg)
                .collect(),
            MessageFilter::Ids(ids) => messages
                .into_iter()
                .filter(|msg| ids.contains(&msg.id))
                .collect(),
        }
    }
}

#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayWaitConfig {
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "poll_interval_ms")]
    pub poll_interval: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "max_wait_ms")]
    pub max_wait: Duration,
    /// consecutive failed lookups tolerated per message
    pub max_retries: u32,
    pub filter: MessageFilter,
}

impl Default for RelayWaitConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_wait: DEFAULT_MAX_WAIT,
            max_retries: DEFAULT_MAX_RETRIES,
            filter: MessageFilter::All,
        }
    }
}

impl RelayWaitConfig {
    pub fn with_filter(mut self, filter: MessageFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

#[derive(Parser, Debug)]
#[clap(version, about)]
/// Waits until the cross-domain messages of a transaction are executed on the other layer
pub struct Config {
    #[clap(long, env = "XDOMAIN_L1_RPC_URL")]
    /// XDOMAIN_L1_RPC_URL
    pub l1_rpc_url: Uri,

    #[clap(long, env = "XDOMAIN_L2_RPC_URL")]
    /// XDOMAIN_L2_RPC_URL
    pub l2_rpc_url: Uri,

    #[clap(long, env = "XDOMAIN_L1_MESSENGER")]
    /// XDOMAIN_L1_MESSENGER
    pub l1_messenger: Address,

    #[clap(long, env = "XDOMAIN_L2_MESSENGER")]
    /// XDOMAIN_L2_MESSENGER
    pub l2_messenger: Address,

    #[clap(long, value_enum, env = "XDOMAIN_DIRECTION", default_value = "l1-to-l2")]
    /// XDOMAIN_DIRECTION
    pub direction: Direction,

    #[clap(long, env = "XDOMAIN_POLL_INTERVAL_MS", default_value_t = 1000)]
    /// XDOMAIN_POLL_INTERVAL_MS
    pub poll_interval_ms: u64,

    #[clap(long, env = "XDOMAIN_MAX_WAIT_MS", default_value_t = 120_000)]
    /// XDOMAIN_MAX_WAIT_MS
    pub max_wait_ms: u64,

    #[clap(long, env = "XDOMAIN_MAX_RETRIES", default_value_t = DEFAULT_MAX_RETRIES)]
    /// XDOMAIN_MAX_RETRIES
    pub max_retries: u32,

    #[clap(long)]
    /// only wait for the first message emitted by the transaction
    pub first_only: bool,

    /// hash of the transaction on the origin domain
    pub tx_hash: H256,
}

impl Config {
    pub fn wait_config(&self) -> RelayWaitConfig {
        RelayWaitConfig {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            max_wait: Duration::from_millis(self.max_wait_ms),
            max_retries: self.max_retries,
            filter: match self.first_only {
                true => MessageFilter::First,
                false => MessageFilter::All,
            },
        }
    }
}
