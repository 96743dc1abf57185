use ethers_core::abi::{Abi, AbiParser};
use ethers_core::types::H256;

/// Human readable ABI of the cross-domain messenger contracts on both layers.
pub const MESSENGER_ABI: [&str; 5] = [
    "event SentMessage(address indexed target, address sender, bytes message, uint256 messageNonce, uint256 gasLimit)",
    "event RelayedMessage(bytes32 indexed msgHash)",
    "event FailedRelayedMessage(bytes32 indexed msgHash)",
    "function sendMessage(address target, bytes message, uint32 gasLimit)",
    "function relayMessage(address target, address sender, bytes message, uint256 messageNonce)",
];

#[derive(Clone, Debug)]
pub struct MessengerAbi {
    pub abi: Abi,
    pub sent_message_topic: H256,
    pub relayed_message_topic: H256,
    pub failed_relayed_message_topic: H256,
}

impl Default for MessengerAbi {
    fn default() -> Self {
        let abi = AbiParser::default()
            .parse(&MESSENGER_ABI)
            .expect("parse abi");

        let sent_message_topic = abi.event("SentMessage").expect("SentMessage").signature();
        let relayed_message_topic = abi
            .event("RelayedMessage")
            .expect("RelayedMessage")
            .signature();
        let failed_relayed_message_topic = abi
            .event("FailedRelayedMessage")
            .expect("FailedRelayedMessage")
            .signature();

        Self {
            abi,
            sent_message_topic,
            relayed_message_topic,
            failed_relayed_message_topic,
        }
    }
}
