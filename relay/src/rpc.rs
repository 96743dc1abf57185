use async_trait::async_trait;
use ethers_core::types::{Address, Filter, Log, TransactionReceipt, ValueOrArray, H256};
use hyper::client::HttpConnector;
use hyper::Uri;
use serde::de::DeserializeOwned;
use serde::Serialize;
use xdomain_common::json_rpc::{
    jsonrpc_request_client, jsonrpc_request_optional, RpcError, RPC_REQUEST_TIMEOUT,
};

use crate::messenger::MessengerAbi;
use crate::observer::DestinationClient;
use crate::source::SourceClient;
use crate::structs::{DeliveryStatus, DestinationResult, MessageId, SourceTransactionResult};

/// One layer of the bridge, reached over json-rpc.
#[derive(Clone, Debug)]
pub struct JsonRpcDomain {
    pub http_client: hyper::Client<HttpConnector>,
    pub uri: Uri,
    /// address of the cross-domain messenger on this layer
    pub messenger: Address,
    pub abi: MessengerAbi,
}

impl JsonRpcDomain {
    pub fn new(http_client: hyper::Client<HttpConnector>, uri: Uri, messenger: Address) -> Self {
        Self {
            http_client,
            uri,
            messenger,
            abi: MessengerAbi::default(),
        }
    }

    pub async fn request<T: Serialize + Send + Sync, R: DeserializeOwned>(
        &self,
        method: &str,
        params: T,
    ) -> Result<R, RpcError> {
        jsonrpc_request_client(RPC_REQUEST_TIMEOUT, &self.http_client, &self.uri, method, params)
            .await
    }

    async fn receipt(&self, tx_hash: H256) -> Result<Option<TransactionReceipt>, RpcError> {
        jsonrpc_request_optional(
            RPC_REQUEST_TIMEOUT,
            &self.http_client,
            &self.uri,
            "eth_getTransactionReceipt",
            [tx_hash],
        )
        .await
    }

    /// `RelayedMessage` / `FailedRelayedMessage` logs for `id` on this layer.
    pub async fn relay_logs(&self, id: &MessageId) -> Result<Vec<Log>, RpcError> {
        let filter = Filter::new()
            .address(ValueOrArray::Value(self.messenger))
            .topic0(ValueOrArray::Array(vec![
                self.abi.relayed_message_topic,
                self.abi.failed_relayed_message_topic,
            ]))
            .topic1(ValueOrArray::Value(id.0))
            .from_block(0u64);

        self.request("eth_getLogs", [&filter]).await
    }
}

#[async_trait]
impl SourceClient for JsonRpcDomain {
    async fn transaction_result(
        &self,
        tx_hash: H256,
    ) -> Result<Option<SourceTransactionResult>, RpcError> {
        Ok(self.receipt(tx_hash).await?.map(SourceTransactionResult::from))
    }
}

#[async_trait]
impl DestinationClient for JsonRpcDomain {
    async fn message_status(&self, id: &MessageId) -> Result<DeliveryStatus, RpcError> {
        let logs = self.relay_logs(id).await?;

        // a successful relay is final, even if earlier attempts failed
        let relayed = logs
            .iter()
            .filter(|log| !log.removed.unwrap_or(false))
            .find(|log| log.topics.first() == Some(&self.abi.relayed_message_topic));
        let failed = logs
            .iter()
            .filter(|log| !log.removed.unwrap_or(false))
            .find(|log| log.topics.first() == Some(&self.abi.failed_relayed_message_topic));

        let (log, executed) = match (relayed, failed) {
            (Some(log), _) => (log, true),
            (None, Some(log)) => (log, false),
            (None, None) => {
                return Ok(match logs.is_empty() {
                    true => DeliveryStatus::NotFound,
                    false => DeliveryStatus::Pending,
                })
            }
        };

        let tx_hash = match log.transaction_hash {
            Some(tx_hash) => tx_hash,
            None => return Ok(DeliveryStatus::Pending),
        };
        let result = match self.receipt(tx_hash).await? {
            Some(receipt) => DestinationResult::from(receipt),
            None => return Ok(DeliveryStatus::Pending),
        };

        Ok(match executed {
            true => DeliveryStatus::Executed(result),
            false => DeliveryStatus::Failed(result),
        })
    }
}
