/// Common utilities for json-rpc
use std::time::Duration;

use hyper::body::Buf;
use hyper::client::HttpConnector;
use hyper::Body;
use hyper::Request;
use hyper::Uri;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;

/// Default timeout in ms for a single request.
pub const RPC_REQUEST_TIMEOUT: u64 = 30_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRpcRequest<T: Serialize> {
    pub jsonrpc: String,
    pub id: serde_json::Value,
    pub method: String,
    pub params: T,
}

#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("jsonrpc: uri={uri} method={method} timed out after {timeout}ms")]
    Timeout {
        uri: String,
        method: String,
        timeout: u64,
    },
    #[error("jsonrpc: transport: {0}")]
    Transport(#[from] hyper::Error),
    #[error("jsonrpc: building request: {0}")]
    Request(#[from] hyper::http::Error),
    #[error("jsonrpc: decode: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("jsonrpc: remote error {}: {}", .0.code, .0.message)]
    Remote(JsonRpcError),
    #[error("no result in response")]
    EmptyResult,
}

/// Invokes a `json-rpc` request with a timeout of `timeout` ms for the network
/// and deserialize part.
pub async fn jsonrpc_request_client<T: Serialize + Send + Sync, R: DeserializeOwned>(
    timeout: u64,
    client: &hyper::Client<HttpConnector>,
    uri: &Uri,
    method: &str,
    params: T,
) -> Result<R, RpcError> {
    #[derive(Debug, Deserialize)]
    struct JsonRpcResponseInternal<T> {
        result: Option<T>,
        error: Option<JsonRpcError>,
    }

    let req_obj = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        id: 0.into(),
        method: method.to_string(),
        params,
    };
    let node_req = Request::post(uri)
        .header(hyper::header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&req_obj)?))?;

    log::trace!("jsonrpc_request_client: {} {}", uri, method);

    let json: JsonRpcResponseInternal<R> =
        tokio::time::timeout(Duration::from_millis(timeout), async {
            let resp = client.request(node_req).await?;
            let body = hyper::body::aggregate(resp).await?;

            Ok::<_, RpcError>(serde_json::from_reader(body.reader())?)
        })
        .await
        .map_err(|_| RpcError::Timeout {
            uri: uri.to_string(),
            method: method.to_string(),
            timeout,
        })??;

    if let Some(err) = json.error {
        return Err(RpcError::Remote(err));
    }

    json.result.ok_or(RpcError::EmptyResult)
}

/// Like [`jsonrpc_request_client`] but maps a `null` result to `None`
/// instead of [`RpcError::EmptyResult`].
pub async fn jsonrpc_request_optional<T: Serialize + Send + Sync, R: DeserializeOwned>(
    timeout: u64,
    client: &hyper::Client<HttpConnector>,
    uri: &Uri,
    method: &str,
    params: T,
) -> Result<Option<R>, RpcError> {
    match jsonrpc_request_client(timeout, client, uri, method, params).await {
        Ok(res) => Ok(Some(res)),
        Err(RpcError::EmptyResult) => Ok(None),
        Err(err) => Err(err),
    }
}

pub async fn jsonrpc_request<T: Serialize + Send + Sync, R: DeserializeOwned>(
    uri: &Uri,
    method: &str,
    params: T,
) -> Result<R, RpcError> {
    let client = hyper::Client::new();
    jsonrpc_request_client(RPC_REQUEST_TIMEOUT, &client, uri, method, params).await
}
