use thiserror::Error;
use xdomain_common::json_rpc::RpcError;

use crate::structs::{DestinationResult, MessageId};

#[derive(Error, Debug)]
pub enum RelayError {
    /// The origin action did not succeed or its events could not be decoded.
    #[error("invalid source transaction: {0}")]
    InvalidSourceTransaction(String),

    #[error("relay timeout after {elapsed_ms}ms waiting on {messages} message(s)")]
    RelayTimeout { elapsed_ms: u128, messages: usize },

    #[error("message {id} failed on the destination domain in {:?}", .result.tx_hash)]
    MessageExecutionFailed {
        id: MessageId,
        result: DestinationResult,
    },

    #[error("observing message {id} failed after {attempts} consecutive errors: {source}")]
    RelayObservationError {
        id: MessageId,
        attempts: u32,
        #[source]
        source: RpcError,
    },

    #[error(transparent)]
    Rpc(#[from] RpcError),
}
