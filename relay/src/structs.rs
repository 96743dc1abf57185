use std::fmt;

use ethers_core::abi::{encode, Token, Tokenizable};
use ethers_core::types::{Address, Bytes, Log, TransactionReceipt, H256, U256, U64};
use ethers_core::utils::keccak256;
use serde::{Deserialize, Serialize};

/// Signature of the destination-side entry point. The message identifier is
/// the hash of its calldata.
pub const RELAY_MESSAGE_SIGNATURE: &str = "relayMessage(address,address,bytes,uint256)";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    L1ToL2,
    L2ToL1,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::L1ToL2 => write!(f, "L1 => L2"),
            Direction::L2ToL1 => write!(f, "L2 => L1"),
        }
    }
}

/// Content derived identifier of a cross-domain message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub H256);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `H256` abbreviates in `Display`
        write!(f, "{:?}", self.0)
    }
}

impl From<H256> for MessageId {
    fn from(hash: H256) -> Self {
        MessageId(hash)
    }
}

/// Outcome of a confirmed transaction on the origin domain.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceTransactionResult {
    pub tx_hash: H256,
    pub block_hash: Option<H256>,
    pub block_number: Option<U64>,
    pub success: bool,
    pub logs: Vec<Log>,
}

impl From<TransactionReceipt> for SourceTransactionResult {
    fn from(receipt: TransactionReceipt) -> Self {
        Self {
            tx_hash: receipt.transaction_hash,
            block_hash: receipt.block_hash,
            block_number: receipt.block_number,
            success: receipt.status.map(|s| s.as_u64() == 1).unwrap_or(false),
            logs: receipt.logs,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub id: MessageId,
    pub direction: Direction,
    pub target: Address,
    pub sender: Address,
    pub message: Bytes,
    pub nonce: U256,
    pub gas_limit: U256,
    /// position of the emitting log inside the source receipt
    pub log_index: usize,
}

impl OutboundMessage {
    /// keccak256 over the `relayMessage` calldata for this message.
    pub fn compute_id(target: Address, sender: Address, message: &Bytes, nonce: U256) -> MessageId {
        let mut calldata = keccak256(RELAY_MESSAGE_SIGNATURE)[0..4].to_vec();
        calldata.extend(encode(&[
            target.into_token(),
            sender.into_token(),
            Token::Bytes(message.to_vec()),
            nonce.into_token(),
        ]));

        H256::from(keccak256(calldata)).into()
    }
}

/// Result of executing a message on the destination domain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationResult {
    pub tx_hash: H256,
    pub block_hash: Option<H256>,
    pub block_number: Option<U64>,
    pub success: bool,
    pub gas_used: Option<U256>,
}

impl From<TransactionReceipt> for DestinationResult {
    fn from(receipt: TransactionReceipt) -> Self {
        Self {
            tx_hash: receipt.transaction_hash,
            block_hash: receipt.block_hash,
            block_number: receipt.block_number,
            success: receipt.status.map(|s| s.as_u64() == 1).unwrap_or(false),
            gas_used: receipt.gas_used,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// nothing recorded on the destination yet
    NotFound,
    /// seen, but not final (e.g. receipt missing or log removed by a reorg)
    Pending,
    Executed(DestinationResult),
    Failed(DestinationResult),
}

impl DeliveryStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DeliveryStatus::Executed(_) | DeliveryStatus::Failed(_))
    }
}

/// Point in time view of a single message on the destination domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelayObservation {
    pub id: MessageId,
    pub status: DeliveryStatus,
    /// number of lookups issued so far, including failed ones
    pub attempt: u32,
}
